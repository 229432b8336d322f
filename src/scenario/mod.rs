//! Composed capture pipelines.
//!
//! Each scenario builds a [`crate::sched::TaskQueue`] over a shared
//! [`ScenarioCtx`]; the session layer drives the queue one tick per
//! rendered frame and pumps the active recording after each tick.

pub(crate) mod clip;
pub(crate) mod stills;

use std::rc::Rc;

use tracing::{error, info};

use crate::capture::CameraInput;
use crate::config::CaptureConfig;
use crate::encode::sink::{RecorderFactory, SinkHandle};
use crate::foundation::error::TurnshotResult;
use crate::scene::{AssetId, Clock, FrameSource, InstanceId, SceneHost};

/// Mutable state shared by every task of one capture batch.
pub(crate) struct ScenarioCtx {
    pub(crate) scene: Box<dyn SceneHost>,
    pub(crate) camera: Box<dyn FrameSource>,
    pub(crate) clock: Rc<dyn Clock>,
    pub(crate) recorders: Box<dyn RecorderFactory>,
    pub(crate) cfg: CaptureConfig,
    /// The instance currently posed in front of the camera.
    pub(crate) target: Option<InstanceId>,
    /// The recording session currently receiving frames.
    pub(crate) active: Option<CameraInput>,
    /// Re-entrancy guard for still bursts.
    pub(crate) is_photo: bool,
    /// Rolling shot counter; wraps every four shots in the stills cycle.
    pub(crate) shot_index: u32,
    /// Writer handles accumulated across the batch, joined at the end.
    pub(crate) handles: Vec<SinkHandle>,
}

impl ScenarioCtx {
    pub(crate) fn new(
        scene: Box<dyn SceneHost>,
        camera: Box<dyn FrameSource>,
        clock: Rc<dyn Clock>,
        recorders: Box<dyn RecorderFactory>,
        cfg: CaptureConfig,
    ) -> Self {
        Self {
            scene,
            camera,
            clock,
            recorders,
            cfg,
            target: None,
            active: None,
            is_photo: false,
            shot_index: 0,
            handles: Vec::new(),
        }
    }

    /// Replace the current target with a fresh instance of `asset`.
    pub(crate) fn respawn_target(&mut self, asset: &AssetId) -> TurnshotResult<InstanceId> {
        if let Some(prev) = self.target.take() {
            self.scene.destroy(prev);
        }
        let instance = self.scene.instantiate(asset)?;
        self.target = Some(instance);
        Ok(instance)
    }

    /// Open a recorder for `shot` and start forwarding frames to it.
    pub(crate) fn start_recording(&mut self, shot: &str, frame_skip: u32) -> TurnshotResult<()> {
        let sink = self.recorders.open(shot)?;
        let input = CameraInput::new(sink, self.clock.clone(), frame_skip)?;
        self.active = Some(input);
        info!(shot, frame_skip, "recording started");
        Ok(())
    }

    /// Stop the active recording, keeping the writer handle for the final
    /// join. No-op when nothing is recording.
    pub(crate) fn stop_recording(&mut self) {
        let Some(mut input) = self.active.take() else {
            return;
        };
        input.dispose();
        match input.finish() {
            Ok(handle) => self.handles.push(handle),
            Err(e) => error!(error = %e, "failed to finish recording"),
        }
        info!("recording stopped");
    }

    /// Forward one render-frame signal to the active recording, if any.
    pub(crate) fn pump(&mut self) -> TurnshotResult<()> {
        let Some(input) = self.active.as_mut() else {
            return Ok(());
        };
        input.on_frame(self.camera.as_mut())
    }
}
