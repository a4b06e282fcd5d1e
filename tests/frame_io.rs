use gesture_calc::frame::{
    AcquisitionError, ChannelSink, FrameSink, FrameSource, HandDetector, ImageSequenceSource,
    NoHandDetector, PngSequenceSink, PointerDetector, PointerHandle, PointerState, ScriptedDetector,
};
use gesture_calc::geometry::Point;
use gesture_calc::render::{Rgba, RgbaBuffer};
use std::fs;
use std::sync::mpsc;
use tempfile::tempdir;

fn write_png(path: &std::path::Path, color: Rgba) {
    RgbaBuffer::new(4, 3, color)
        .to_image()
        .unwrap()
        .save(path)
        .unwrap();
}

#[test]
fn image_sequence_reads_pngs_in_name_order() {
    let dir = tempdir().unwrap();
    write_png(&dir.path().join("b.png"), Rgba::GREEN);
    write_png(&dir.path().join("a.png"), Rgba::RED);
    fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

    let mut source = ImageSequenceSource::from_dir(dir.path(), false).unwrap();
    assert_eq!(source.len(), 2);

    let first = source.next_frame().unwrap();
    assert_eq!((first.width, first.height), (4, 3));
    assert_eq!(first.pixel(0, 0), Rgba::RED);
    assert_eq!(source.next_frame().unwrap().pixel(3, 2), Rgba::GREEN);
    assert_eq!(source.next_frame().unwrap_err(), AcquisitionError::Exhausted);
}

#[test]
fn looping_sequence_starts_over() {
    let dir = tempdir().unwrap();
    write_png(&dir.path().join("only.png"), Rgba::YELLOW);
    let mut source = ImageSequenceSource::from_dir(dir.path(), true).unwrap();
    for _ in 0..3 {
        assert_eq!(source.next_frame().unwrap().pixel(1, 1), Rgba::YELLOW);
    }
}

#[test]
fn directory_without_frames_is_unavailable() {
    let dir = tempdir().unwrap();
    let err = ImageSequenceSource::from_dir(dir.path(), true).unwrap_err();
    assert!(matches!(err, AcquisitionError::Unavailable(_)));

    let missing = ImageSequenceSource::from_dir(dir.path().join("missing"), true).unwrap_err();
    assert!(matches!(missing, AcquisitionError::Io { .. }));
}

#[test]
fn corrupt_png_is_a_decode_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.png"), b"definitely not png").unwrap();
    let mut source = ImageSequenceSource::from_dir(dir.path(), false).unwrap();
    assert!(matches!(
        source.next_frame(),
        Err(AcquisitionError::Decode { .. })
    ));
}

#[test]
fn png_sink_numbers_its_frames() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let mut sink = PngSequenceSink::new(&out).unwrap();
    sink.present(RgbaBuffer::new(2, 2, Rgba::WHITE));
    sink.present(RgbaBuffer::new(2, 2, Rgba::BLACK));

    assert_eq!(sink.written(), 2);
    assert!(out.join("frame_00000.png").exists());
    let second = ImageSequenceSource::new(vec![out.join("frame_00001.png")], false)
        .next_frame()
        .unwrap();
    assert_eq!(second.pixel(1, 1), Rgba::BLACK);
}

#[test]
fn channel_sink_forwards_and_tolerates_a_closed_receiver() {
    let (tx, rx) = mpsc::sync_channel(1);
    let mut sink = ChannelSink::new(tx);
    sink.present(RgbaBuffer::new(1, 1, Rgba::RED));
    assert_eq!(rx.recv().unwrap().pixel(0, 0), Rgba::RED);
    drop(rx);
    sink.present(RgbaBuffer::new(1, 1, Rgba::RED));
    assert_eq!(sink.dropped(), 1);
}

#[test]
fn undrained_channel_sink_keeps_only_one_frame() {
    let (tx, rx) = mpsc::sync_channel(1);
    let mut sink = ChannelSink::new(tx);
    for _ in 0..10 {
        sink.present(RgbaBuffer::new(320, 240, Rgba::GREEN));
    }
    assert_eq!(sink.dropped(), 9);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn scripted_detector_replays_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let hand: Vec<[i32; 2]> = (0..21).map(|i| [i * 10, 100]).collect();
    let content = format!("null\n\n{}\n", serde_json::to_string(&hand).unwrap());
    fs::write(&path, content).unwrap();

    let mut detector = ScriptedDetector::from_path(&path).unwrap();
    assert_eq!(detector.remaining(), 2);
    let frame = RgbaBuffer::new(1, 1, Rgba::BLACK);
    assert_eq!(detector.detect(&frame).unwrap(), None);
    let detected = detector.detect(&frame).unwrap().unwrap();
    assert_eq!(detected.index_tip(), Point::new(80, 100));
    assert_eq!(detector.detect(&frame).unwrap(), None);
}

#[test]
fn scripted_detector_rejects_short_hands() {
    let err = ScriptedDetector::parse("[[1, 2], [3, 4]]").unwrap_err();
    assert!(format!("{err:#}").contains("line 1"));
}

#[test]
fn pointer_detector_follows_the_handle() {
    let handle = PointerHandle::default();
    let mut detector = PointerDetector::new(handle.clone());
    let frame = RgbaBuffer::new(1, 1, Rgba::BLACK);
    assert_eq!(detector.detect(&frame).unwrap(), None);

    handle.set(PointerState {
        position: Some(Point::new(90, 190)),
        pressed: false,
    });
    let open = detector.detect(&frame).unwrap().unwrap();
    assert!(open.thumb_tip().distance(open.index_tip()) >= 40.0);

    handle.set(PointerState {
        position: Some(Point::new(90, 190)),
        pressed: true,
    });
    let pinched = detector.detect(&frame).unwrap().unwrap();
    assert!(pinched.thumb_tip().distance(pinched.index_tip()) < 40.0);
    assert_eq!(pinched.index_tip(), Point::new(90, 190));

    assert_eq!(NoHandDetector.detect(&frame).unwrap(), None);
}
