//! Twitch adapters.
//!
//! - `HelixClient` - `EventSubClient` over the Helix REST API, authenticated
//!   with an app access token from the client-credentials grant

mod api_types;
mod app_token;
mod helix_client;

pub use helix_client::{HelixClient, HelixConfig};
