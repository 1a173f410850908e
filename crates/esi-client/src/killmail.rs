//! Killmail endpoint

use crate::error::Result;
use crate::executor::{EsiClient, EsiRequest};
use crate::fitting::KillFitting;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A killmail as published by ESI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillMail {
    /// Killmail id
    pub killmail_id: u32,
    /// Time of the kill
    pub killmail_time: DateTime<Utc>,
    /// Solar system of the kill
    pub solar_system_id: u32,
    /// Destroyed party
    pub victim: Victim,
    /// Everyone who dealt damage
    #[serde(default)]
    pub attackers: Vec<Attacker>,
    /// War the kill happened in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub war_id: Option<u32>,
}

impl KillMail {
    /// Attacker credited with the final blow
    pub fn final_blow(&self) -> Option<&Attacker> {
        self.attackers.iter().find(|a| a.final_blow)
    }
}

/// The destroyed ship and its pilot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Victim {
    /// Pilot, absent for structures and NPC-owned ships
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<u32>,
    /// Alliance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_id: Option<u32>,
    /// Corporation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporation_id: Option<u32>,
    /// Total damage taken
    pub damage_taken: u64,
    /// Items that were on the ship
    #[serde(default)]
    pub items: Vec<KillItem>,
    /// Ship type
    pub ship_type_id: u32,
    /// Position in space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Coordinates within a solar system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X
    pub x: f64,
    /// Y
    pub y: f64,
    /// Z
    pub z: f64,
}

/// A party that damaged the victim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attacker {
    /// Pilot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<u32>,
    /// Alliance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_id: Option<u32>,
    /// Corporation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporation_id: Option<u32>,
    /// Damage dealt
    pub damage_done: u64,
    /// Whether this attacker landed the final blow
    pub final_blow: bool,
    /// Security status at the time of the kill
    pub security_status: f32,
    /// Ship type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type_id: Option<u32>,
    /// Weapon type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_type_id: Option<u32>,
}

/// An item stack found on the victim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillItem {
    /// Item type
    pub item_type_id: u32,
    /// Inventory flag, identifies the slot or bay the item was in
    pub flag: u16,
    /// Units dropped into the wreck
    #[serde(default)]
    pub quantity_dropped: u64,
    /// Units destroyed
    #[serde(default)]
    pub quantity_destroyed: u64,
    /// Singleton state (assembled, blueprint copy, ...)
    #[serde(default)]
    pub singleton: u8,
    /// Contents, when the item is a container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<KillItem>,
}

impl EsiClient {
    /// Get a killmail by id and hash
    ///
    /// The hash is percent-encoded as a single path segment.
    pub async fn killmail(&self, killmail_id: u32, hash: &str) -> Result<KillMail> {
        self.fetch(EsiRequest::get(format!(
            "/v1/killmails/{}/{}/",
            killmail_id,
            urlencoding::encode(hash)
        )))
        .await
    }

    /// Get a killmail together with the victim's slot-grouped fitting
    pub async fn killmail_with_fitting(&self, killmail_id: u32, hash: &str) -> Result<(KillMail, KillFitting)> {
        let killmail = self.killmail(killmail_id, hash).await?;
        let fitting = KillFitting::from_items(&killmail.victim.items);
        Ok((killmail, fitting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EsiError;
    use crate::fitting::SlotGroup;
    use crate::test_utils::{fixtures, mock_client, ok};
    use crate::transport::{HttpMethod, TransportResponse};

    const PATH: &str = "/v1/killmails/56733821/b5ee2c9a1fc8c7bfa3b3db2a2a1ac1e4c2b9e2ed/";
    const HASH: &str = "b5ee2c9a1fc8c7bfa3b3db2a2a1ac1e4c2b9e2ed";

    #[tokio::test]
    async fn test_killmail() {
        let client = mock_client(HttpMethod::Get, PATH, ok(fixtures::KILLMAIL));

        let km = client.killmail(56733821, HASH).await.unwrap();

        assert_eq!(km.killmail_id, 56733821);
        assert_eq!(km.solar_system_id, 30002976);
        assert_eq!(km.victim.ship_type_id, 17812);
        assert_eq!(km.victim.items.len(), 8);
        assert_eq!(km.final_blow().and_then(|a| a.character_id), Some(95810944));
        assert_eq!(km.war_id, None);
    }

    #[tokio::test]
    async fn test_killmail_with_fitting() {
        let client = mock_client(HttpMethod::Get, PATH, ok(fixtures::KILLMAIL));

        let (km, fitting) = client.killmail_with_fitting(56733821, HASH).await.unwrap();

        let high = fitting.group(SlotGroup::High);
        assert_eq!(high.len(), 1);
        assert_eq!(high[&2873].quantity_destroyed, 1);
        assert_eq!(high[&2873].quantity_dropped, 1);

        assert_eq!(fitting.group(SlotGroup::Cargo)[&2873].quantity_dropped, 40);
        assert_eq!(fitting.group(SlotGroup::DroneBay)[&2456].quantity_destroyed, 5);
        assert!(fitting.iter().all(|(_, item)| item.flag != 999));

        // unclassified items remain on the raw killmail
        assert!(km.victim.items.iter().any(|i| i.flag == 999));
    }

    #[tokio::test]
    async fn test_killmail_unknown_id() {
        let client = mock_client(
            HttpMethod::Get,
            "/v1/killmails/1/nope/",
            TransportResponse::new(404, r#"{"error":"Killmail not found"}"#),
        );

        let err = client.killmail(1, "nope").await.unwrap_err();
        assert!(matches!(err, EsiError::Client { status: 404, ref body, .. } if body.contains("Killmail not found")));
    }

    #[tokio::test]
    async fn test_killmail_hash_stays_in_its_segment() {
        let client = mock_client(
            HttpMethod::Get,
            "/v1/killmails/1/..%2F..%2Fv2%2Fstatus%3Fx%3D1/",
            TransportResponse::new(404, r#"{"error":"Killmail not found"}"#),
        );

        let err = client.killmail(1, "../../v2/status?x=1").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_nested_container_items() {
        let item: KillItem = serde_json::from_str(
            r#"{"flag":5,"item_type_id":3467,"quantity_dropped":1,"singleton":0,
                "items":[{"flag":0,"item_type_id":34,"quantity_destroyed":500,"singleton":0}]}"#,
        )
        .unwrap();

        assert_eq!(item.items.len(), 1);
        assert_eq!(item.items[0].quantity_destroyed, 500);
        assert_eq!(item.items[0].quantity_dropped, 0);
    }
}
