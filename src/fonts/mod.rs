//! Font assets: loaded once at startup, shaped per request.

pub(crate) mod registry;
pub(crate) mod text;
