use super::*;
use crate::encode::sink::FRAME_DELAY_MS;
use crate::foundation::core::Canvas;

const CANVAS: Canvas = Canvas::new(8, 4);

fn cfg(frame_count: u32, looping: bool) -> SinkConfig {
    SinkConfig {
        canvas: CANVAS,
        frame_count,
        frame_delay_ms: FRAME_DELAY_MS,
        looping,
    }
}

struct Decoded {
    frames: Vec<(u16, u16, u16, Vec<u8>)>,
    repeat: gif::Repeat,
}

fn decode(bytes: &[u8]) -> Decoded {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(bytes).unwrap();
    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        frames.push((frame.width, frame.height, frame.delay, frame.buffer.to_vec()));
    }
    Decoded {
        frames,
        repeat: decoder.repeat(),
    }
}

/// Byte sink that records how many bytes had arrived at each flush.
#[derive(Default)]
struct FlushLog {
    bytes: Vec<u8>,
    flushed_at: Vec<usize>,
}

impl Write for FlushLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushed_at.push(self.bytes.len());
        Ok(())
    }
}

#[test]
fn writes_a_looping_gif89a_with_one_second_frames() {
    let mut sink = GifSink::new(Vec::new(), GifSinkOpts::default());
    sink.begin(cfg(3, true)).unwrap();
    for (i, rgba) in [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]]
        .into_iter()
        .enumerate()
    {
        sink.push_frame(FrameIndex(i as u64), &FrameRGBA::solid(CANVAS, rgba))
            .unwrap();
    }
    sink.end().unwrap();
    let bytes = sink.into_inner().unwrap();

    assert!(bytes.starts_with(b"GIF89a"));
    assert_eq!(bytes.last(), Some(&0x3B));

    let decoded = decode(&bytes);
    assert_eq!(decoded.repeat, gif::Repeat::Infinite);
    assert_eq!(decoded.frames.len(), 3);
    for (w, h, delay, _) in &decoded.frames {
        assert_eq!((*w, *h), (8, 4));
        assert_eq!(*delay, 100);
    }
    assert_eq!(&decoded.frames[0].3[..4], &[255, 0, 0, 255]);
    assert_eq!(&decoded.frames[2].3[..4], &[0, 0, 255, 255]);
}

#[test]
fn non_looping_stream_has_no_loop_extension() {
    let mut sink = GifSink::new(Vec::new(), GifSinkOpts::default());
    sink.begin(cfg(1, false)).unwrap();
    sink.push_frame(FrameIndex(0), &FrameRGBA::solid(CANVAS, [9, 9, 9, 255]))
        .unwrap();
    sink.end().unwrap();
    let bytes = sink.into_inner().unwrap();

    assert!(!bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));
    let decoded = decode(&bytes);
    assert_eq!(decoded.frames.len(), 1);
    assert_eq!(decoded.repeat, gif::Repeat::Finite(0));
}

#[test]
fn bytes_are_flushed_before_the_stream_ends() {
    let mut sink = GifSink::new(FlushLog::default(), GifSinkOpts::default());
    sink.begin(cfg(2, true)).unwrap();
    sink.push_frame(FrameIndex(0), &FrameRGBA::solid(CANVAS, [1, 2, 3, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &FrameRGBA::solid(CANVAS, [4, 5, 6, 255]))
        .unwrap();
    sink.end().unwrap();
    let log = sink.into_inner().unwrap();

    // At least one flush per frame plus the final one.
    assert!(log.flushed_at.len() >= 3);
    let header_len = 13;
    assert!(
        log.flushed_at
            .iter()
            .any(|&n| n > header_len && n < log.bytes.len()),
        "frame data reached the writer before the trailer"
    );
    assert_eq!(log.flushed_at.last(), Some(&log.bytes.len()));
}

#[test]
fn transparent_pixels_survive_encoding() {
    let mut sink = GifSink::new(Vec::new(), GifSinkOpts::default());
    sink.begin(cfg(1, true)).unwrap();
    sink.push_frame(FrameIndex(0), &FrameRGBA::solid(CANVAS, [0, 0, 0, 0]))
        .unwrap();
    sink.end().unwrap();
    let decoded = decode(&sink.into_inner().unwrap());
    assert!(decoded.frames[0].3.chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn rejects_misuse() {
    let mut sink = GifSink::new(Vec::new(), GifSinkOpts::default());
    let frame = FrameRGBA::solid(CANVAS, [0, 0, 0, 255]);

    assert!(sink.push_frame(FrameIndex(0), &frame).is_err(), "push before begin");
    assert!(sink.end().is_err(), "end before begin");

    sink.begin(cfg(2, true)).unwrap();
    assert!(sink.begin(cfg(2, true)).is_err(), "double begin");

    let wrong = FrameRGBA::solid(Canvas::new(4, 4), [0, 0, 0, 255]);
    assert!(sink.push_frame(FrameIndex(0), &wrong).is_err(), "size mismatch");

    sink.push_frame(FrameIndex(1), &frame).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &frame).is_err(), "repeated index");
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err(), "out of order");

    sink.end().unwrap();
    let err = sink.push_frame(FrameIndex(2), &frame).unwrap_err();
    assert!(err.to_string().contains("finalized"));
    assert!(sink.end().is_err(), "double end");
    assert!(sink.into_inner().is_some());
}

#[test]
fn rejects_degenerate_configs() {
    let mut sink = GifSink::new(Vec::new(), GifSinkOpts::default());
    let mut bad = cfg(1, true);
    bad.canvas = Canvas::new(0, 4);
    assert!(sink.begin(bad).is_err());

    let mut sink = GifSink::new(Vec::new(), GifSinkOpts::default());
    assert!(sink.begin(cfg(0, true)).is_err());

    let mut sink = GifSink::new(Vec::new(), GifSinkOpts::default());
    let mut huge = cfg(1, true);
    huge.canvas = Canvas::new(70_000, 4);
    assert!(sink.begin(huge).is_err());
}
