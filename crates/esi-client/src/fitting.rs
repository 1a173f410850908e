//! Slot-grouped fitting reconstructed from a killmail's victim items
//!
//! Items are classified by inventory flag. Stacks of the same type within one
//! group are merged: destroyed and dropped quantities are summed, every other
//! field is kept from the first stack seen. Flags outside the known slot
//! ranges are left out of the fitting.

use crate::killmail::KillItem;
use std::collections::BTreeMap;

/// Fitting section an inventory flag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotGroup {
    /// High power slots (flags 27-34)
    High,
    /// Medium power slots (flags 19-26)
    Mid,
    /// Low power slots (flags 11-18)
    Low,
    /// Rig slots (flags 92-94)
    Rig,
    /// Strategic cruiser subsystems (flags 125-128)
    Subsystem,
    /// Cargo hold (flag 5)
    Cargo,
    /// Drone bay (flag 87)
    DroneBay,
}

impl SlotGroup {
    /// Every group, in display order
    pub const ALL: [SlotGroup; 7] = [
        SlotGroup::High,
        SlotGroup::Mid,
        SlotGroup::Low,
        SlotGroup::Rig,
        SlotGroup::Subsystem,
        SlotGroup::Cargo,
        SlotGroup::DroneBay,
    ];

    /// Classify an inventory flag
    pub fn from_flag(flag: u16) -> Option<Self> {
        match flag {
            5 => Some(SlotGroup::Cargo),
            87 => Some(SlotGroup::DroneBay),
            27..=34 => Some(SlotGroup::High),
            19..=26 => Some(SlotGroup::Mid),
            11..=18 => Some(SlotGroup::Low),
            92..=94 => Some(SlotGroup::Rig),
            125..=128 => Some(SlotGroup::Subsystem),
            _ => None,
        }
    }
}

/// Victim items grouped by slot and merged by item type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KillFitting {
    /// High slot modules
    pub high_slots: BTreeMap<u32, KillItem>,
    /// Medium slot modules
    pub mid_slots: BTreeMap<u32, KillItem>,
    /// Low slot modules
    pub low_slots: BTreeMap<u32, KillItem>,
    /// Rigs
    pub rig_slots: BTreeMap<u32, KillItem>,
    /// Subsystems
    pub subsystem_slots: BTreeMap<u32, KillItem>,
    /// Cargo hold contents
    pub cargo: BTreeMap<u32, KillItem>,
    /// Drone bay contents
    pub drone_bay: BTreeMap<u32, KillItem>,
}

impl KillFitting {
    /// Build a fitting from a victim's item list
    pub fn from_items(items: &[KillItem]) -> Self {
        let mut fitting = Self::default();
        for item in items {
            fitting.add(item);
        }
        fitting
    }

    /// Add one item stack, returning the group it landed in
    pub fn add(&mut self, item: &KillItem) -> Option<SlotGroup> {
        let slot = SlotGroup::from_flag(item.flag)?;

        self.group_mut(slot)
            .entry(item.item_type_id)
            .and_modify(|current| {
                current.quantity_destroyed = current.quantity_destroyed.saturating_add(item.quantity_destroyed);
                current.quantity_dropped = current.quantity_dropped.saturating_add(item.quantity_dropped);
            })
            .or_insert_with(|| item.clone());

        Some(slot)
    }

    /// Items in one group, keyed by item type
    pub fn group(&self, slot: SlotGroup) -> &BTreeMap<u32, KillItem> {
        match slot {
            SlotGroup::High => &self.high_slots,
            SlotGroup::Mid => &self.mid_slots,
            SlotGroup::Low => &self.low_slots,
            SlotGroup::Rig => &self.rig_slots,
            SlotGroup::Subsystem => &self.subsystem_slots,
            SlotGroup::Cargo => &self.cargo,
            SlotGroup::DroneBay => &self.drone_bay,
        }
    }

    fn group_mut(&mut self, slot: SlotGroup) -> &mut BTreeMap<u32, KillItem> {
        match slot {
            SlotGroup::High => &mut self.high_slots,
            SlotGroup::Mid => &mut self.mid_slots,
            SlotGroup::Low => &mut self.low_slots,
            SlotGroup::Rig => &mut self.rig_slots,
            SlotGroup::Subsystem => &mut self.subsystem_slots,
            SlotGroup::Cargo => &mut self.cargo,
            SlotGroup::DroneBay => &mut self.drone_bay,
        }
    }

    /// Every merged entry with its group
    pub fn iter(&self) -> impl Iterator<Item = (SlotGroup, &KillItem)> + '_ {
        SlotGroup::ALL
            .into_iter()
            .flat_map(move |slot| self.group(slot).values().map(move |item| (slot, item)))
    }

    /// Check if no item was classified
    pub fn is_empty(&self) -> bool {
        SlotGroup::ALL.iter().all(|slot| self.group(*slot).is_empty())
    }
}
