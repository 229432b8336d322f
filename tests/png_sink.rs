mod common;

use std::path::PathBuf;

use common::{ListCatalog, RecordingScene, test_config, test_stage};
use turnshot::{
    CaptureSession, FrameSize, PngRecorderFactory, PngSink, RecordSink, SessionOpts,
};

fn temp_out_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("turnshot_it_{}_{}", tag, std::process::id()))
}

#[test]
fn writes_every_submitted_frame_and_stops_on_sentinel() {
    let out_dir = temp_out_dir("sentinel");
    let frame = FrameSize::new(4, 4).unwrap();
    let mut sink: Box<dyn RecordSink> = Box::new(PngSink::new(frame, &out_dir, "shot").unwrap());

    for value in [0u8, 128, 255] {
        let pixels = vec![value; frame.rgba8_len()];
        sink.submit(&pixels, f64::from(value)).unwrap();
    }
    let output = sink.finish().unwrap().join().unwrap();

    assert_eq!(output.path, out_dir);
    assert_eq!(output.frames_written, 3);

    // Same shot name: the three writes land on one file, last frame wins.
    let file = out_dir.join("shot.png");
    assert!(file.is_file());
    let image = image::open(&file).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (4, 4));
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);

    let _ = std::fs::remove_dir_all(&out_dir);
}

#[test]
fn stills_batch_writes_one_png_per_shot() {
    let out_dir = temp_out_dir("stills");
    let cfg = test_config();
    let (stage, _log) = test_stage(RecordingScene::new(), &cfg);
    let factory = PngRecorderFactory::new(cfg.frame, &out_dir);

    let session = CaptureSession::stills_batch(
        stage,
        &ListCatalog::of(&["box.prefab"]),
        Box::new(factory),
        cfg,
        SessionOpts {
            max_ticks: Some(10_000),
        },
    )
    .unwrap();
    let stats = session.run().unwrap();
    assert_eq!(stats.shots, 4);

    for suffix in ["_Front", "_Side", "_Left", "_Back"] {
        let file = out_dir.join(format!("box{suffix}.png"));
        assert!(file.is_file(), "missing {}", file.display());
    }

    let _ = std::fs::remove_dir_all(&out_dir);
}
