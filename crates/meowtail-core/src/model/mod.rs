// ── Canonical domain model ──
//
// What the rest of the workspace sees after normalization. Wire shapes
// live in `meowtail_api::models`; `crate::convert` and
// `crate::normalize` bridge the two.

pub mod dhcp;
pub mod portmap;
pub mod status;

pub use dhcp::{DhcpConfig, DhcpRange, Lease};
pub use portmap::{PortMapConfig, PortMapRule, Protocol};
pub use status::ServiceStatus;
