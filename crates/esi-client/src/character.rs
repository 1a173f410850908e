//! Character endpoints
//!
//! Public endpoints take only the character id. Location, ship, online state,
//! roles and titles are character-scoped and need a bearer token carrying the
//! matching ESI scope.

use crate::error::Result;
use crate::executor::{EsiClient, EsiRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Character gender as reported by ESI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

/// Public information about a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDetails {
    /// Alliance the character's corporation belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_id: Option<u32>,
    /// Creation date
    pub birthday: DateTime<Utc>,
    /// Bloodline
    pub bloodline_id: u32,
    /// Current corporation
    pub corporation_id: u32,
    /// Biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Faction warfare faction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_id: Option<u32>,
    /// Gender
    pub gender: Gender,
    /// Character name
    pub name: String,
    /// Race
    pub race_id: u32,
    /// Security status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_status: Option<f32>,
    /// Corporation title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Login state of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineStatus {
    /// Last login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    /// Last logout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_logout: Option<DateTime<Utc>>,
    /// Total number of logins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logins: Option<u32>,
    /// Currently online
    pub online: bool,
}

/// Where a character currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Solar system
    pub solar_system_id: u32,
    /// Docked NPC station
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_id: Option<u32>,
    /// Docked player structure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_id: Option<u64>,
}

impl Location {
    /// Check if the character is docked in a station or structure
    pub fn is_docked(&self) -> bool {
        self.station_id.is_some() || self.structure_id.is_some()
    }
}

/// Ship the character is currently piloting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    /// Unique item id of the ship
    pub ship_item_id: u64,
    /// Player-given ship name
    pub ship_name: String,
    /// Ship type
    pub ship_type_id: u32,
}

/// Corporation, alliance and faction membership of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    /// Alliance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_id: Option<u32>,
    /// Character
    pub character_id: u32,
    /// Corporation
    pub corporation_id: u32,
    /// Faction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_id: Option<u32>,
}

/// Corporation roles held by a character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    /// Roles granted everywhere
    #[serde(default)]
    pub roles: Vec<String>,
    /// Roles at the character's base
    #[serde(default)]
    pub roles_at_base: Vec<String>,
    /// Roles at headquarters
    #[serde(default)]
    pub roles_at_hq: Vec<String>,
    /// Roles at other locations
    #[serde(default)]
    pub roles_at_other: Vec<String>,
}

impl Roles {
    /// Check if `role` is held anywhere
    pub fn has_role(&self, role: &str) -> bool {
        [&self.roles, &self.roles_at_base, &self.roles_at_hq, &self.roles_at_other]
            .iter()
            .any(|set| set.iter().any(|r| r == role))
    }
}

/// A corporation title awarded to a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Title name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Title id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_id: Option<u32>,
}

/// One corporation a character has belonged to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporationHistory {
    /// Corporation
    pub corporation_id: u32,
    /// Whether the corporation has since closed
    #[serde(default)]
    pub is_deleted: bool,
    /// Increasing sequence number, for ordering records with equal start dates
    pub record_id: u32,
    /// Date the character joined
    pub start_date: DateTime<Utc>,
}

impl EsiClient {
    /// Get a character's public information
    pub async fn character_details(&self, character_id: u32) -> Result<CharacterDetails> {
        self.fetch(EsiRequest::get(format!("/v5/characters/{}/", character_id))).await
    }

    /// Get whether the character is currently online
    pub async fn character_online(&self, character_id: u32, token: &str) -> Result<OnlineStatus> {
        self.fetch(EsiRequest::get(format!("/v3/characters/{}/online/", character_id)).bearer(token))
            .await
    }

    /// Get the character's current location
    pub async fn character_location(&self, character_id: u32, token: &str) -> Result<Location> {
        self.fetch(EsiRequest::get(format!("/v2/characters/{}/location/", character_id)).bearer(token))
            .await
    }

    /// Get the character's current ship
    pub async fn character_ship(&self, character_id: u32, token: &str) -> Result<Ship> {
        self.fetch(EsiRequest::get(format!("/v2/characters/{}/ship/", character_id)).bearer(token))
            .await
    }

    /// Get the character's corporation roles
    pub async fn character_roles(&self, character_id: u32, token: &str) -> Result<Roles> {
        self.fetch(EsiRequest::get(format!("/v3/characters/{}/roles/", character_id)).bearer(token))
            .await
    }

    /// Get the titles awarded to the character
    pub async fn character_titles(&self, character_id: u32, token: &str) -> Result<Vec<Title>> {
        self.fetch(EsiRequest::get(format!("/v2/characters/{}/titles/", character_id)).bearer(token))
            .await
    }

    /// Get the corporations the character has been a member of, newest first
    pub async fn character_corporation_history(&self, character_id: u32) -> Result<Vec<CorporationHistory>> {
        self.fetch(EsiRequest::get(format!(
            "/v2/characters/{}/corporationhistory/",
            character_id
        )))
        .await
    }

    /// Get the affiliations of several characters in one call
    ///
    /// An empty id list returns an empty result without contacting ESI.
    pub async fn character_affiliations(&self, character_ids: &[u32]) -> Result<Vec<Affiliation>> {
        if character_ids.is_empty() {
            return Ok(Vec::new());
        }

        let request = EsiRequest::post("/v2/characters/affiliation/").json_body(character_ids)?;
        self.fetch(request).await
    }
}
