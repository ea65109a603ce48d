// meowtail-api: Async Rust client for the meowtail appliance control API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod portmap;
pub mod session;
pub mod transport;
pub mod udhcpd;

pub use client::MeowtailClient;
pub use error::Error;
pub use models::{ActionResponse, PortMapConfigResponse, PortMapRulePayload, StatusResponse};
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};
