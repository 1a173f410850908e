//! Universe endpoints: item types and id-to-name resolution

use crate::error::{EsiError, Result};
use crate::executor::{EsiClient, EsiRequest, Page};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dogma attribute value on an item type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DogmaAttribute {
    /// Attribute id
    pub attribute_id: u32,
    /// Attribute value
    pub value: f64,
}

/// A dogma effect on an item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogmaEffect {
    /// Effect id
    pub effect_id: u32,
    /// Whether this is the type's default effect
    pub is_default: bool,
}

/// Static information about an item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseType {
    /// Type id
    pub type_id: u32,
    /// Cargo capacity in m3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f32>,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Dogma attributes
    #[serde(default)]
    pub dogma_attributes: Vec<DogmaAttribute>,
    /// Dogma effects
    #[serde(default)]
    pub dogma_effects: Vec<DogmaEffect>,
    /// Graphic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphic_id: Option<u32>,
    /// Inventory group
    pub group_id: u32,
    /// Icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<u32>,
    /// Market group, absent for types that cannot be traded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_group_id: Option<u32>,
    /// Mass in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    /// Type name
    pub name: String,
    /// Packaged volume in m3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaged_volume: Option<f32>,
    /// Units per portion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion_size: Option<u32>,
    /// Whether the type is published in game
    pub published: bool,
    /// Radius in m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    /// Volume in m3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl UniverseType {
    /// Value of a dogma attribute, if the type carries it
    pub fn attribute(&self, attribute_id: u32) -> Option<f64> {
        self.dogma_attributes
            .iter()
            .find(|a| a.attribute_id == attribute_id)
            .map(|a| a.value)
    }
}

/// What kind of entity a resolved id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCategory {
    /// Alliance
    Alliance,
    /// Character
    Character,
    /// Constellation
    Constellation,
    /// Corporation
    Corporation,
    /// Inventory type
    InventoryType,
    /// Region
    Region,
    /// Solar system
    SolarSystem,
    /// Station
    Station,
    /// Faction
    Faction,
}

/// Name and category of a resolved id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    /// Entity category
    pub category: NameCategory,
    /// Entity id
    pub id: u64,
    /// Entity name
    pub name: String,
}

/// Re-key resolved names by id
pub fn index_names(names: Vec<NameRef>) -> HashMap<u64, NameRef> {
    names.into_iter().map(|name| (name.id, name)).collect()
}

impl EsiClient {
    /// Get one page of all item type ids
    pub async fn type_ids(&self, page: u32) -> Result<Page<u32>> {
        self.fetch_page(EsiRequest::get("/v1/universe/types/"), page).await
    }

    /// Get an item type
    pub async fn universe_type(&self, type_id: u32) -> Result<UniverseType> {
        self.fetch(EsiRequest::get(format!("/v3/universe/types/{}/", type_id)))
            .await
    }

    /// Resolve a batch of ids to names in one call
    ///
    /// ESI answers with one record per submitted id. Any other count is
    /// reported as [`EsiError::CountMismatch`]; a full count that still leaves
    /// a submitted id without its own record (duplicated or unrequested ids in
    /// the response) is [`EsiError::UnresolvedIds`]. On success every
    /// submitted id is a key of the returned map.
    pub async fn names(&self, ids: &[u64]) -> Result<HashMap<u64, NameRef>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let request = EsiRequest::post("/v3/universe/names/").json_body(ids)?;
        let names: Vec<NameRef> = self.fetch(request).await?;

        if names.len() != ids.len() {
            return Err(EsiError::CountMismatch {
                requested: ids.len(),
                returned: names.len(),
            });
        }

        let index = index_names(names);
        let missing: Vec<u64> = ids.iter().copied().filter(|id| !index.contains_key(id)).collect();
        if !missing.is_empty() {
            return Err(EsiError::UnresolvedIds { missing });
        }
        if index.len() != ids.len() {
            return Err(EsiError::CountMismatch {
                requested: ids.len(),
                returned: index.len(),
            });
        }

        Ok(index)
    }
}
