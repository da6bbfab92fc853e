use std::io::Write;

use chrono::{DateTime, Utc};

use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::{FRAME_DELAY_MS, FrameSink, SinkConfig};
use crate::fonts::registry::FontRegistry;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::composer::{ComposeFrame, FrameComposer};
use crate::render::frame::FrameRGBA;
use crate::session::sequencer::AnimationSequencer;
use crate::style::policy::RenderPolicy;
use crate::style::resolve::{RequestParams, StyleConfig, resolve_request};
use crate::time::remaining::{Clock, seconds_remaining};

/// Statistics for one rendered countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames composed and pushed to the sink.
    pub frames_rendered: u32,
    /// Seconds remaining shown on the first frame.
    pub initial_secs: u64,
    /// Seconds remaining shown on the last frame.
    pub final_secs: u64,
}

/// A validated countdown request: style resolved, target parsed, "now" sampled once.
///
/// Everything that can fail because of the caller's input fails in [`CountdownSession::prepare`],
/// before any rendering resource is allocated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountdownSession {
    style: StyleConfig,
    target: DateTime<Utc>,
    now: DateTime<Utc>,
    initial_secs: u64,
}

impl CountdownSession {
    /// Validate `params` under `policy`, sampling `clock` exactly once.
    pub fn prepare(
        params: &RequestParams,
        policy: &RenderPolicy,
        clock: &dyn Clock,
    ) -> CountdownResult<Self> {
        let resolved = resolve_request(params, policy)?;
        Ok(Self::from_parts(resolved.style, resolved.target, clock.now()))
    }

    /// Build a session from already-validated parts.
    pub fn from_parts(style: StyleConfig, target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            style,
            target,
            now,
            initial_secs: seconds_remaining(target, now),
        }
    }

    /// Resolved style.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Target instant.
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Seconds remaining at request start, clamped at zero.
    pub fn initial_secs(&self) -> u64 {
        self.initial_secs
    }

    /// Fresh sequencer over this session's frames.
    pub fn sequencer(&self) -> AnimationSequencer {
        AnimationSequencer::new(self.initial_secs, self.style.frame_count)
    }

    /// Sink configuration matching this session.
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            canvas: self.style.canvas,
            frame_count: self.style.frame_count,
            frame_delay_ms: FRAME_DELAY_MS,
            looping: self.style.looping,
        }
    }

    /// Drive every frame through `composer` into `sink`, then finalize the sink.
    ///
    /// Each frame is composed, pushed and dropped before the next one is composed.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(frames = self.style.frame_count, initial_secs = self.initial_secs)
    )]
    pub fn render<C, S>(&self, composer: &mut C, sink: &mut S) -> CountdownResult<RenderStats>
    where
        C: ComposeFrame + ?Sized,
        S: FrameSink + ?Sized,
    {
        sink.begin(self.sink_config())?;
        let mut stats = RenderStats {
            initial_secs: self.initial_secs,
            final_secs: self.initial_secs,
            ..RenderStats::default()
        };
        for step in self.sequencer() {
            let frame = composer.compose(&step.units, &self.style)?;
            sink.push_frame(step.index, &frame)?;
            stats.frames_rendered += 1;
            stats.final_secs = step.seconds_left;
        }
        sink.end()?;
        tracing::debug!(
            frames = stats.frames_rendered,
            final_secs = stats.final_secs,
            "countdown rendered"
        );
        Ok(stats)
    }

    /// Render the animated GIF into `writer`, returning the writer once the trailer is written.
    pub fn render_gif<W: Write>(
        &self,
        fonts: &FontRegistry,
        writer: W,
    ) -> CountdownResult<(RenderStats, W)> {
        let mut composer = FrameComposer::new(fonts, self.style.canvas)?;
        let mut sink = GifSink::new(writer, GifSinkOpts::default());
        let stats = self.render(&mut composer, &mut sink)?;
        let writer = sink
            .into_inner()
            .ok_or_else(|| CountdownError::encoding("gif sink did not finish"))?;
        Ok((stats, writer))
    }

    /// Compose the single frame at `index` without encoding.
    pub fn render_frame(&self, fonts: &FontRegistry, index: u32) -> CountdownResult<FrameRGBA> {
        let step = self.sequencer().nth(index as usize).ok_or_else(|| {
            CountdownError::invalid_input(format!(
                "frame index {index} is outside 0..{}",
                self.style.frame_count
            ))
        })?;
        let mut composer = FrameComposer::new(fonts, self.style.canvas)?;
        composer.compose(&step.units, &self.style)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
