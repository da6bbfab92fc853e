//! Countdown GIFs rendered on the CPU and streamed over HTTP.
//!
//! A request names a target instant and a few colors. The library:
//!
//! - Resolves the request into a [`StyleConfig`] under a deployment [`Profile`]
//! - Prepares a [`CountdownSession`], sampling the [`Clock`] once
//! - Composes one frame per simulated second with [`FrameComposer`]
//! - Streams every frame into a [`FrameSink`], usually a [`GifSink`] over the response body
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Encoding sinks.
pub mod encode;
pub(crate) mod fonts;
/// CPU frame rendering.
pub mod render;
/// HTTP service.
pub mod server;
pub(crate) mod session;
pub(crate) mod style;
pub(crate) mod time;

pub use crate::foundation::core::{BezPath, Canvas, FrameIndex, Point, Rect, Rgb8};
pub use crate::foundation::error::{CountdownError, CountdownResult};

pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{FRAME_DELAY_MS, FrameSink, InMemorySink, SinkConfig};
pub use crate::fonts::registry::{
    FontFace, FontRegistry, FontWeight, SYSTEM_FONT_CANDIDATES, load_system_fonts,
};
pub use crate::render::composer::{ComposeFrame, FrameComposer};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::layout::{CellSlot, cell_slots};
pub use crate::render::shapes::rounded_rect_path;
pub use crate::server::{AppState, COUNTDOWN_PATH, example_urls, router};
pub use crate::session::render_session::{CountdownSession, RenderStats};
pub use crate::session::sequencer::{AnimationSequencer, FrameStep, SequencerState};
pub use crate::style::policy::{BackgroundPolicy, CellLayout, FramePolicy, Profile, RenderPolicy};
pub use crate::style::resolve::{
    Background, RequestParams, ResolvedRequest, StyleConfig, parse_target_instant,
    resolve_frame_count, resolve_request, resolve_style,
};
pub use crate::time::remaining::{Clock, FixedClock, SystemClock, seconds_remaining};
pub use crate::time::units::{TimeUnit, TimeUnits, format_unit_value};
