//! Test utilities and fixtures for ESI accessor tests
//!
//! Accessor tests run against a mocked transport that asserts the exact URL,
//! method and auth header of the single expected call.

use crate::executor::{EsiClient, EsiClientConfig};
use crate::sleep::RecordingSleeper;
use crate::transport::{HttpMethod, MockTransport, TransportResponse};

/// Base URL used by every mocked client
pub const BASE: &str = "https://esi.test";

/// Client expecting exactly one public call to `path_and_query`
pub fn mock_client(method: HttpMethod, path_and_query: &str, response: TransportResponse) -> EsiClient {
    mock_call(method, path_and_query, None, response)
}

/// Client expecting exactly one authenticated GET to `path`
pub fn mock_authed_client(path: &str, token: &str, response: TransportResponse) -> EsiClient {
    mock_call(HttpMethod::Get, path, Some(token), response)
}

fn mock_call(
    method: HttpMethod,
    path_and_query: &str,
    token: Option<&str>,
    response: TransportResponse,
) -> EsiClient {
    let url = format!("{}{}", BASE, path_and_query);
    let authorization = token.map(|t| format!("Bearer {}", t));

    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .times(1)
        .withf(move |req| {
            req.method == method && req.url == url && req.header("Authorization") == authorization.as_deref()
        })
        .returning(move |_| Ok(response.clone()));

    EsiClient::with_transport(EsiClientConfig::new(BASE), transport).with_sleeper(RecordingSleeper::new())
}

/// Successful JSON response
pub fn ok(body: &str) -> TransportResponse {
    TransportResponse::new(200, body)
}

/// Sample payloads taken from ESI responses
pub mod fixtures {
    /// `/v5/characters/{id}/`
    pub const CHARACTER: &str = r#"{
        "alliance_id": 99000006,
        "birthday": "2015-03-24T11:37:00Z",
        "bloodline_id": 3,
        "corporation_id": 109299958,
        "description": "",
        "gender": "male",
        "name": "CCP Bartender",
        "race_id": 2,
        "security_status": -9.9,
        "title": "All round pretty awesome guy"
    }"#;

    /// `/v1/killmails/{id}/{hash}/`
    pub const KILLMAIL: &str = r#"{
        "attackers": [
            {
                "character_id": 95810944,
                "corporation_id": 1000179,
                "damage_done": 5745,
                "final_blow": true,
                "security_status": -0.3,
                "ship_type_id": 17841,
                "weapon_type_id": 3074
            }
        ],
        "killmail_id": 56733821,
        "killmail_time": "2016-10-22T17:13:36Z",
        "solar_system_id": 30002976,
        "victim": {
            "alliance_id": 621338554,
            "character_id": 92796241,
            "corporation_id": 841363671,
            "damage_taken": 5745,
            "items": [
                {"flag": 27, "item_type_id": 2873, "quantity_destroyed": 1, "singleton": 0},
                {"flag": 27, "item_type_id": 2873, "quantity_dropped": 1, "singleton": 0},
                {"flag": 19, "item_type_id": 5945, "quantity_dropped": 1, "singleton": 0},
                {"flag": 11, "item_type_id": 1447, "quantity_destroyed": 2, "singleton": 0},
                {"flag": 92, "item_type_id": 31177, "quantity_destroyed": 1, "singleton": 0},
                {"flag": 5, "item_type_id": 2873, "quantity_dropped": 40, "singleton": 0},
                {"flag": 87, "item_type_id": 2456, "quantity_destroyed": 5, "singleton": 0},
                {"flag": 999, "item_type_id": 34, "quantity_dropped": 100, "singleton": 0}
            ],
            "position": {"x": 452186600569.4748, "y": 146704961490.90222, "z": 109514596532.54477},
            "ship_type_id": 17812
        }
    }"#;

    /// `/v1/insurance/prices/`
    pub const INSURANCE: &str = r#"[
        {
            "levels": [
                {"cost": 10.01, "name": "Basic", "payout": 20.01},
                {"cost": 100.0, "name": "Platinum", "payout": 400.0}
            ],
            "type_id": 1
        },
        {
            "levels": [
                {"cost": 5000.0, "name": "Basic", "payout": 10000.0},
                {"cost": 15000.0, "name": "Standard", "payout": 30000.0},
                {"cost": 25000.0, "name": "Bronze", "payout": 50000.0},
                {"cost": 35000.0, "name": "Silver", "payout": 70000.0},
                {"cost": 45000.0, "name": "Gold", "payout": 90000.0},
                {"cost": 55000.0, "name": "Platinum", "payout": 110000.0}
            ],
            "type_id": 587
        }
    ]"#;
}
