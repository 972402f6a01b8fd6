use super::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: rgba.repeat((w * h) as usize),
        premultiplied: false,
    }
}

#[test]
fn writes_looping_gif_with_all_frames() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("anim/out.gif");
    let mut sink = GifSink::new(GifSinkOpts::new(&out, 10));
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        frame_delay_ms: 40,
        frame_count: 3,
    })
    .unwrap();
    sink.push_frame(0, &solid(4, 4, [255, 0, 0, 255])).unwrap();
    sink.push_frame(1, &solid(4, 4, [0, 255, 0, 255])).unwrap();
    sink.push_frame(2, &solid(4, 4, [0, 0, 255, 255])).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames_written(), 3);

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    // NETSCAPE2.0 application extension carries the loop count.
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    let decoder = image::codecs::gif::GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = image::AnimationDecoder::into_frames(decoder)
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 3);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 40);
}

#[test]
fn end_without_frames_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(GifSinkOpts::new(dir.path().join("empty.gif"), 10));
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        frame_delay_ms: 33,
        frame_count: 0,
    })
    .unwrap();
    assert!(sink.end().is_err());
}

#[test]
fn speed_is_clamped() {
    assert_eq!(GifSinkOpts::new("a.gif", 0).quantizer_speed, 1);
    assert_eq!(GifSinkOpts::new("a.gif", 99).quantizer_speed, 30);
}
