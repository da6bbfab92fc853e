use std::io::{self, Write};

use axum::body::Bytes;
use futures_util::Stream;
use tokio::sync::mpsc;

use crate::fonts::registry::FontRegistry;
use crate::session::render_session::CountdownSession;

/// Chunks buffered between the renderer and the socket before the renderer blocks.
pub(crate) const CHANNEL_CAPACITY: usize = 8;

/// Writes above this size are forwarded without waiting for a flush.
const CHUNK_SOFT_LIMIT: usize = 64 * 1024;

pub(crate) type Chunk = Result<Bytes, io::Error>;

/// Blocking `io::Write` that forwards bytes into a bounded channel.
///
/// Must only be used off the async runtime: a full channel blocks the calling thread. A closed
/// channel (client gone) surfaces as `BrokenPipe`, which aborts the encoder.
pub(crate) struct ChannelWriter {
    tx: mpsc::Sender<Chunk>,
    buf: Vec<u8>,
}

impl ChannelWriter {
    pub(crate) fn new(tx: mpsc::Sender<Chunk>) -> Self {
        Self {
            tx,
            buf: Vec::new(),
        }
    }

    fn send_buffered(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let chunk = Bytes::from(std::mem::take(&mut self.buf));
        self.tx
            .blocking_send(Ok(chunk))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response receiver dropped"))
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        if self.buf.len() >= CHUNK_SOFT_LIMIT {
            self.send_buffered()?;
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.send_buffered()
    }
}

/// Render `session` on the blocking pool, returning the receiving end of its byte stream.
///
/// The stream ends after the trailer on success. On failure an error item is sent instead.
pub(crate) fn spawn_render(
    session: CountdownSession,
    fonts: FontRegistry,
) -> mpsc::Receiver<Chunk> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        match session.render_gif(&fonts, ChannelWriter::new(tx.clone())) {
            Ok((stats, _writer)) => tracing::info!(
                frames = stats.frames_rendered,
                initial_secs = stats.initial_secs,
                "countdown streamed"
            ),
            Err(_) if tx.is_closed() => {
                tracing::debug!("client went away before the countdown finished");
            }
            Err(err) => {
                tracing::error!(error = %err, "countdown render failed");
                let _ = tx.blocking_send(Err(io::Error::other(err.to_string())));
            }
        }
    });
    rx
}

/// Response body stream: `first`, then whatever the renderer sends until it hangs up.
pub(crate) fn body_stream(
    first: Bytes,
    rx: mpsc::Receiver<Chunk>,
) -> impl Stream<Item = Chunk> + Send + 'static {
    futures_util::stream::unfold((Some(first), rx), |(first, mut rx)| async move {
        if let Some(chunk) = first {
            return Some((Ok(chunk), (None, rx)));
        }
        rx.recv().await.map(|item| (item, (None, rx)))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/server/stream.rs"]
mod tests;
