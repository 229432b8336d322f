use tracing::{error, info};

use crate::foundation::error::TurnshotResult;
use crate::scenario::ScenarioCtx;
use crate::sched::{Sequence, TaskQueue, Wait};
use crate::scene::AssetId;

/// Build the single-capture batch: one continuous timed recording per
/// asset, run strictly in catalog order.
pub(crate) fn build_queue(assets: &[AssetId]) -> TaskQueue<ScenarioCtx> {
    let mut queue = TaskQueue::new();
    for asset in assets {
        queue = queue.then_seq(ClipCapture {
            asset: asset.clone(),
            stage: ClipStage::Begin,
        });
    }
    queue.on_complete(|_ctx: &mut ScenarioCtx| info!("clip batch complete"))
}

/// One asset's capture: spawn, focus, record for the clip duration, stop.
struct ClipCapture {
    asset: AssetId,
    stage: ClipStage,
}

enum ClipStage {
    Begin,
    Stop,
    Done,
}

impl ClipCapture {
    fn begin(&self, ctx: &mut ScenarioCtx) -> TurnshotResult<f64> {
        let instance = ctx.respawn_target(&self.asset)?;
        let secs = ctx
            .scene
            .declared_clip_secs(instance)
            .unwrap_or(ctx.cfg.clip_secs);
        ctx.scene.focus_camera(instance)?;
        ctx.start_recording(self.asset.name(), ctx.cfg.frame_skip)?;
        Ok(secs)
    }
}

impl Sequence<ScenarioCtx> for ClipCapture {
    fn resume(&mut self, ctx: &mut ScenarioCtx) -> Option<Wait<ScenarioCtx>> {
        match self.stage {
            ClipStage::Begin => {
                self.stage = ClipStage::Stop;
                info!(asset = self.asset.name(), "clip capture started");
                match self.begin(ctx) {
                    Ok(secs) => Some(Wait::Secs(secs)),
                    Err(e) => {
                        error!(asset = self.asset.name(), error = %e, "clip capture aborted");
                        self.stage = ClipStage::Done;
                        None
                    }
                }
            }
            ClipStage::Stop => {
                self.stage = ClipStage::Done;
                ctx.stop_recording();
                info!(asset = self.asset.name(), "clip capture finished");
                None
            }
            ClipStage::Done => None,
        }
    }
}
