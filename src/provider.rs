//! Gateway descriptors (data) and the method catalogue shared by all flows.
//!
//! `descriptor` exposes validated metadata ([`GatewayDescriptor`]) covering the HTTPS-only
//! gateway and authorize endpoints plus the fixed platform fields stamped on every signed
//! request. `method` names the gateway methods this crate calls and the response envelope
//! key each one answers under.

pub mod descriptor;
pub mod method;

pub use descriptor::*;
pub use method::*;
