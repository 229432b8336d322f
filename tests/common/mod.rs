//! Shared host-collaborator fakes for integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use turnshot::{
    AssetCatalog, AssetId, CaptureConfig, Clock, FixedStepTicker, FrameSize, FrameSource,
    InstanceId, SceneHost, Stage, TurnshotError, TurnshotResult,
};

/// What a [`RecordingScene`] saw.
#[derive(Default)]
pub struct SceneLog {
    pub instantiated: Vec<String>,
    pub destroyed: Vec<InstanceId>,
    pub yaws: Vec<f32>,
    pub focused: u32,
}

/// Scene host that records every call.
#[derive(Default)]
pub struct RecordingScene {
    pub log: Rc<RefCell<SceneLog>>,
    /// Per-asset clip duration overrides, by asset name.
    pub clip_overrides: Vec<(String, f64)>,
    next_id: u64,
    live: Vec<(InstanceId, String)>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneHost for RecordingScene {
    fn instantiate(&mut self, asset: &AssetId) -> TurnshotResult<InstanceId> {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.log.borrow_mut().instantiated.push(asset.name().into());
        self.live.push((id, asset.name().into()));
        Ok(id)
    }

    fn destroy(&mut self, instance: InstanceId) {
        self.log.borrow_mut().destroyed.push(instance);
        self.live.retain(|(id, _)| *id != instance);
    }

    fn set_yaw_degrees(&mut self, _instance: InstanceId, degrees: f32) {
        self.log.borrow_mut().yaws.push(degrees);
    }

    fn declared_clip_secs(&self, instance: InstanceId) -> Option<f64> {
        let (_, name) = self.live.iter().find(|(id, _)| *id == instance)?;
        self.clip_overrides
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, secs)| *secs)
    }

    fn focus_camera(&mut self, _instance: InstanceId) -> TurnshotResult<()> {
        self.log.borrow_mut().focused += 1;
        Ok(())
    }
}

/// Frame source producing a constant solid frame.
pub struct SolidCamera {
    frame: FrameSize,
    pixels: Vec<u8>,
}

impl SolidCamera {
    pub fn new(frame: FrameSize) -> Self {
        Self {
            pixels: vec![0x7F; frame.rgba8_len()],
            frame,
        }
    }
}

impl FrameSource for SolidCamera {
    fn frame_size(&self) -> FrameSize {
        self.frame
    }

    fn capture(&mut self) -> TurnshotResult<&[u8]> {
        Ok(&self.pixels)
    }
}

/// Clock pinned to a constant; timestamps are carried, not sequenced on.
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_secs(&self) -> f64 {
        self.0
    }
}

/// Catalog over a fixed asset list.
pub struct ListCatalog(pub Vec<AssetId>);

impl ListCatalog {
    pub fn of(names: &[&str]) -> Self {
        Self(names.iter().map(AssetId::new).collect())
    }
}

impl AssetCatalog for ListCatalog {
    fn enumerate(&self) -> TurnshotResult<Vec<AssetId>> {
        Ok(self.0.clone())
    }
}

/// Catalog that always fails enumeration.
pub struct BrokenCatalog;

impl AssetCatalog for BrokenCatalog {
    fn enumerate(&self) -> TurnshotResult<Vec<AssetId>> {
        Err(TurnshotError::validation("asset directory is not set"))
    }
}

/// Config tuned for exact tick arithmetic: tick rate 8 (dt = 0.125 s) and
/// durations in multiples of 0.125 s.
pub fn test_config() -> CaptureConfig {
    CaptureConfig {
        frame: FrameSize {
            width: 2,
            height: 2,
        },
        frame_duration_secs: 0.25,
        frame_skip: 4,
        auto_focus_secs: 0.25,
        clip_secs: 1.0,
        ticks_per_second: 8,
    }
}

/// Stage over a recording scene; returns the shared scene log.
pub fn test_stage(scene: RecordingScene, cfg: &CaptureConfig) -> (Stage, Rc<RefCell<SceneLog>>) {
    let log = scene.log.clone();
    let stage = Stage {
        scene: Box::new(scene),
        camera: Box::new(SolidCamera::new(cfg.frame)),
        clock: Rc::new(FixedClock(0.0)),
        ticker: Box::new(FixedStepTicker::new(cfg.ticks_per_second).unwrap()),
    };
    (stage, log)
}
