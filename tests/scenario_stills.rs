mod common;

use common::{BrokenCatalog, ListCatalog, RecordingScene, test_config, test_stage};
use turnshot::{CaptureSession, CaptureStats, InMemoryRecorderFactory, SessionOpts};

fn opts() -> SessionOpts {
    SessionOpts {
        max_ticks: Some(10_000),
    }
}

#[test]
fn one_asset_produces_four_named_shots_in_order() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let cfg = test_config();
    let (stage, log) = test_stage(RecordingScene::new(), &cfg);
    let factory = InMemoryRecorderFactory::new();
    let records = factory.records();

    let session = CaptureSession::stills_batch(
        stage,
        &ListCatalog::of(&["box.prefab"]),
        Box::new(factory),
        cfg,
        opts(),
    )
    .unwrap();
    let stats = session.run().unwrap();

    assert_eq!(
        stats,
        CaptureStats {
            shots: 4,
            frames_written: 4,
        }
    );

    let records = records.borrow();
    let names: Vec<String> = records.iter().map(|r| r.borrow().name.clone()).collect();
    assert_eq!(names, vec!["box_Front", "box_Side", "box_Left", "box_Back"]);
    for record in records.iter() {
        let record = record.borrow();
        assert_eq!(
            record.timestamps.len(),
            1,
            "burst decimation keeps one still per shot"
        );
        assert!(record.finished);
    }

    let log = log.borrow();
    assert_eq!(log.instantiated, vec!["box"]);
    assert!(log.destroyed.is_empty());
    assert_eq!(log.yaws, vec![45.0, 90.0, 180.0]);
    assert_eq!(log.focused, 4);
}

#[test]
fn second_asset_wraps_and_reinstantiates() {
    let cfg = test_config();
    let (stage, log) = test_stage(RecordingScene::new(), &cfg);
    let factory = InMemoryRecorderFactory::new();
    let records = factory.records();

    let session = CaptureSession::stills_batch(
        stage,
        &ListCatalog::of(&["alpha.prefab", "beta.prefab"]),
        Box::new(factory),
        cfg,
        opts(),
    )
    .unwrap();
    let stats = session.run().unwrap();

    assert_eq!(stats.shots, 8);
    assert_eq!(records.borrow().len(), 8);

    let log = log.borrow();
    assert_eq!(log.instantiated, vec!["alpha", "beta"]);
    assert_eq!(log.destroyed.len(), 1, "wrap-around destroys the prior target");
    assert_eq!(log.yaws, vec![45.0, 90.0, 180.0, 45.0, 90.0, 180.0]);
    assert_eq!(log.focused, 8);
}

#[test]
fn empty_catalog_finishes_immediately() {
    let cfg = test_config();
    let (stage, log) = test_stage(RecordingScene::new(), &cfg);

    let session = CaptureSession::stills_batch(
        stage,
        &ListCatalog::of(&[]),
        Box::new(InMemoryRecorderFactory::new()),
        cfg,
        opts(),
    )
    .unwrap();
    let stats = session.run().unwrap();

    assert_eq!(stats, CaptureStats::default());
    assert!(log.borrow().instantiated.is_empty());
}

#[test]
fn broken_catalog_fails_at_build_time() {
    let cfg = test_config();
    let (stage, _log) = test_stage(RecordingScene::new(), &cfg);

    let err = CaptureSession::stills_batch(
        stage,
        &BrokenCatalog,
        Box::new(InMemoryRecorderFactory::new()),
        cfg,
        opts(),
    )
    .map(|_| ())
    .unwrap_err();
    assert!(err.to_string().contains("validation error"));
}
