use crate::foundation::core::Canvas;
use crate::foundation::error::{CountdownError, CountdownResult};

/// A composed frame as straight-alpha RGBA8 pixels.
///
/// Frames live for one encode step: the composer hands one to the sink, the sink quantizes it and
/// it is dropped before the next frame is composed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, straight alpha.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Wrap raw bytes, checking that the length matches `canvas`.
    pub fn from_rgba8(canvas: Canvas, data: Vec<u8>) -> CountdownResult<Self> {
        if data.len() != canvas.rgba8_len() {
            return Err(CountdownError::rendering(format!(
                "frame byte len {} does not match {}x{} rgba8",
                data.len(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    /// A frame filled with one RGBA8 value.
    pub fn solid(canvas: Canvas, rgba: [u8; 4]) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: rgba.repeat(canvas.rgba8_len() / 4),
        }
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// RGBA8 value at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4)?.try_into().ok()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
