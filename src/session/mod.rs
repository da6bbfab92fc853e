//! Per-request orchestration: the frame sequencer and the render session driving it.

pub(crate) mod render_session;
pub(crate) mod sequencer;
