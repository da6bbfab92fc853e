//! Request styling: deployment profiles and the per-request resolver.

pub(crate) mod policy;
pub(crate) mod resolve;
