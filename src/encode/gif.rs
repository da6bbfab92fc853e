use std::io::Write;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::frame::FrameRGBA;

/// Options for [`GifSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifSinkOpts {
    /// NeuQuant sampling speed, `1..=30`; lower is better quality and slower.
    pub quantize_speed: i32,
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self { quantize_speed: 10 }
    }
}

enum State<W: Write> {
    Ready(W),
    Encoding(gif::Encoder<W>),
    Finished(W),
    Failed,
}

/// Sink that encodes frames into one animated GIF89a stream.
///
/// Each frame is quantized to its own palette and the writer is flushed after every frame, so
/// the transport receives bytes while later frames are still being composed. `end` writes the
/// trailer; the sink then refuses further frames.
pub struct GifSink<W: Write> {
    opts: GifSinkOpts,
    state: State<W>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    scratch: Vec<u8>,
}

impl<W: Write> GifSink<W> {
    /// Create a sink that will write to `writer` once started.
    pub fn new(writer: W, opts: GifSinkOpts) -> Self {
        Self {
            opts,
            state: State::Ready(writer),
            cfg: None,
            last_idx: None,
            scratch: Vec::new(),
        }
    }

    /// Return the writer after `end` has completed.
    pub fn into_inner(self) -> Option<W> {
        match self.state {
            State::Finished(w) => Some(w),
            _ => None,
        }
    }
}

impl<W: Write> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> CountdownResult<()> {
        let width: u16 = cfg
            .canvas
            .width
            .try_into()
            .map_err(|_| CountdownError::encoding("gif width exceeds u16"))?;
        let height: u16 = cfg
            .canvas
            .height
            .try_into()
            .map_err(|_| CountdownError::encoding("gif height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(CountdownError::encoding("gif width/height must be non-zero"));
        }
        if cfg.frame_count == 0 {
            return Err(CountdownError::encoding("gif needs at least one frame"));
        }

        let writer = match std::mem::replace(&mut self.state, State::Failed) {
            State::Ready(w) => w,
            State::Encoding(enc) => {
                self.state = State::Encoding(enc);
                return Err(CountdownError::encoding("gif sink already started"));
            }
            State::Finished(w) => {
                self.state = State::Finished(w);
                return Err(CountdownError::encoding("gif sink is already finalized"));
            }
            State::Failed => return Err(CountdownError::encoding("gif sink failed earlier")),
        };

        let mut encoder = gif::Encoder::new(writer, width, height, &[])
            .map_err(|e| CountdownError::encoding(format!("failed to start gif stream: {e}")))?;
        // Without a loop extension the animation plays once.
        if cfg.looping {
            encoder
                .set_repeat(gif::Repeat::Infinite)
                .map_err(|e| CountdownError::encoding(format!("failed to set gif repeat: {e}")))?;
        }

        tracing::debug!(
            width,
            height,
            frames = cfg.frame_count,
            looping = cfg.looping,
            "gif stream started"
        );
        self.scratch = vec![0u8; cfg.canvas.rgba8_len()];
        self.state = State::Encoding(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CountdownResult<()> {
        let cfg = match (&self.state, self.cfg) {
            (State::Encoding(_), Some(cfg)) => cfg,
            (State::Finished(_), _) => {
                return Err(CountdownError::encoding("gif sink is already finalized"));
            }
            _ => return Err(CountdownError::encoding("gif sink not started")),
        };
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(CountdownError::encoding(
                "gif sink received out-of-order frame index",
            ));
        }
        if frame.canvas() != cfg.canvas {
            return Err(CountdownError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.canvas.width, cfg.canvas.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(CountdownError::encoding(
                "frame.data size mismatch with width*height*4",
            ));
        }
        self.last_idx = Some(idx);

        // `from_rgba_speed` quantizes in place, so work on a copy.
        self.scratch.copy_from_slice(&frame.data);
        let mut gif_frame = gif::Frame::from_rgba_speed(
            cfg.canvas.width as u16,
            cfg.canvas.height as u16,
            &mut self.scratch,
            self.opts.quantize_speed,
        );
        gif_frame.delay = u16::try_from(cfg.frame_delay_ms / 10).unwrap_or(u16::MAX);
        gif_frame.dispose = gif::DisposalMethod::Background;

        let State::Encoding(encoder) = &mut self.state else {
            return Err(CountdownError::encoding("gif sink not started"));
        };
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| CountdownError::encoding(format!("failed to write gif frame: {e}")))?;
        encoder
            .get_mut()
            .flush()
            .map_err(|e| CountdownError::encoding(format!("failed to flush gif frame: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> CountdownResult<()> {
        let encoder = match std::mem::replace(&mut self.state, State::Failed) {
            State::Encoding(enc) => enc,
            State::Finished(w) => {
                self.state = State::Finished(w);
                return Err(CountdownError::encoding("gif sink is already finalized"));
            }
            State::Ready(w) => {
                self.state = State::Ready(w);
                return Err(CountdownError::encoding("gif sink not started"));
            }
            State::Failed => return Err(CountdownError::encoding("gif sink failed earlier")),
        };

        let mut writer = encoder
            .into_inner()
            .map_err(|e| CountdownError::encoding(format!("failed to write gif trailer: {e}")))?;
        writer
            .flush()
            .map_err(|e| CountdownError::encoding(format!("failed to flush gif trailer: {e}")))?;
        self.state = State::Finished(writer);
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
