//! EVE Swagger Interface (ESI) client
//!
//! Typed accessors for the character, market, universe, killmail, insurance
//! and status endpoints of ESI, all going through one request executor with
//! bounded, status-aware retry.
//!
//! # Example
//!
//! ```rust,no_run
//! use esi_client::{EsiClient, EsiClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EsiClient::new(EsiClientConfig::default().with_user_agent("my-tool/1.0"))?;
//!
//!     let status = client.server_status().await?;
//!     println!("{} players on {}", status.players, status.server_version);
//!
//!     let names = client.names(&[30000142]).await?;
//!     println!("{}", names[&30000142].name);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod character;
pub mod error;
pub mod executor;
pub mod fitting;
pub mod insurance;
pub mod killmail;
pub mod market;
pub mod sleep;
pub mod status;
pub mod transport;
pub mod universe;

#[cfg(test)]
mod test_utils;

pub use error::{EsiError, Result};
pub use executor::{
    EsiClient, EsiClientConfig, EsiRequest, EsiResponse, Page, PageInfo, RetryConfig, StatusClass,
    DEFAULT_BASE_URL,
};
pub use fitting::{KillFitting, SlotGroup};
pub use sleep::{RecordingSleeper, Sleeper, TokioSleeper};
pub use transport::{HttpMethod, ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse};
