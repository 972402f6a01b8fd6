use super::*;

fn frame(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: vec![0; (w * h * 4) as usize],
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        frame_delay_ms: 40,
        frame_count: 3,
    }
}

#[test]
fn in_memory_sink_collects_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    for i in 0..3 {
        sink.push_frame(i, &frame(2, 2)).unwrap();
    }
    sink.end().unwrap();
    assert!(sink.is_finished());
    let idx: Vec<u32> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1, 2]);
    assert_eq!(sink.config(), Some(cfg()));
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(1, &frame(2, 2)).unwrap();
    assert!(sink.push_frame(1, &frame(2, 2)).is_err());
    assert!(sink.push_frame(0, &frame(2, 2)).is_err());
}

#[test]
fn mismatched_frame_size_is_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    assert!(sink.push_frame(0, &frame(3, 2)).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(0, &frame(2, 2)).is_err());
}
