//! Configuration reconciliation between `meowtail-api` and its consumers.
//!
//! - **[`Appliance`]** builds one shared client and session and vends the
//!   two managers below.
//!
//! - **[`DhcpManager`]** owns the canonical udhcpd config. Raw payloads
//!   are mapped through [`normalize`](normalize::normalize), which resolves
//!   field-name aliases and type variance, and the editable DNS list is
//!   kept as [`DnsSlots`] so the edit surface never goes empty.
//!
//! - **[`PortMapManager`]** owns the forwarding table. Rules have no id and
//!   are deleted by full-body match behind a [`Confirm`] gate.
//!
//! Every mutation goes through [`converge`](sync::converge): one request,
//! then a wholesale reload on success, nothing on failure.

pub mod appliance;
pub mod config;
pub mod convert;
pub mod dhcp;
pub mod error;
pub mod form;
pub mod model;
pub mod normalize;
pub mod notify;
pub mod portmap;
pub mod rule;
pub mod slots;
pub mod status;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use appliance::Appliance;
pub use config::{ApplianceConfig, TlsVerification};
pub use dhcp::DhcpManager;
pub use error::CoreError;
pub use form::{DhcpForm, PortMapForm, RuleDraft};
pub use notify::{Notifier, TracingNotifier};
pub use portmap::{DeleteOutcome, PortMapManager};
pub use rule::{AssumeYes, Confirm};
pub use slots::DnsSlots;
pub use status::StatusPoller;
pub use sync::MutationOutcome;

// ── Model re-exports ────────────────────────────────────────────────
pub use model::{
    DhcpConfig, DhcpRange, Lease, PortMapConfig, PortMapRule, Protocol, ServiceStatus,
};
