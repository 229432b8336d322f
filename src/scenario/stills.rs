use tracing::{error, info, warn};

use crate::foundation::error::{TurnshotError, TurnshotResult};
use crate::scenario::ScenarioCtx;
use crate::sched::{Sequence, TaskQueue, Wait};
use crate::scene::AssetId;

/// Yaw angle and shot-name suffix for each of the four turntable views.
const SHOT_ANGLES: [(f32, &str); 4] = [
    (0.0, "_Front"),
    (45.0, "_Side"),
    (90.0, "_Left"),
    (180.0, "_Back"),
];

/// Bursts are open for a fraction of a second; decimating hard keeps them
/// at a single still per shot.
const BURST_FRAME_SKIP: u32 = 40;

/// Build the multi-angle batch: per asset, four {focus, burst} pairs.
pub(crate) fn build_queue(assets: &[AssetId]) -> TaskQueue<ScenarioCtx> {
    let mut queue = TaskQueue::new();
    for asset in assets {
        for (_, suffix) in SHOT_ANGLES {
            queue = queue
                .then_seq(FocusStep {
                    asset: asset.clone(),
                    stage: 0,
                })
                .then_seq(BurstStep {
                    shot: format!("{}{}", asset.name(), suffix),
                    stage: 0,
                });
        }
    }
    queue.on_complete(|_ctx: &mut ScenarioCtx| info!("stills batch complete"))
}

/// Rotate to the next view (re-instantiating on wrap-around), refocus the
/// camera, and let the pose settle.
struct FocusStep {
    asset: AssetId,
    stage: u8,
}

impl FocusStep {
    fn apply_view(&self, ctx: &mut ScenarioCtx) -> TurnshotResult<()> {
        let view = (ctx.shot_index as usize) % SHOT_ANGLES.len();
        if view == 0 {
            // Wrap-around: fresh instance at its natural orientation.
            ctx.shot_index = 0;
            ctx.respawn_target(&self.asset)?;
        } else {
            let (angle, _) = SHOT_ANGLES[view];
            let target = ctx
                .target
                .ok_or_else(|| TurnshotError::scene("no target instance to rotate"))?;
            ctx.scene.set_yaw_degrees(target, angle);
        }
        let target = ctx
            .target
            .ok_or_else(|| TurnshotError::scene("no target instance to focus"))?;
        ctx.scene.focus_camera(target)
    }
}

impl Sequence<ScenarioCtx> for FocusStep {
    fn resume(&mut self, ctx: &mut ScenarioCtx) -> Option<Wait<ScenarioCtx>> {
        match self.stage {
            0 => {
                self.stage = 1;
                info!(asset = self.asset.name(), "auto focus started");
                match self.apply_view(ctx) {
                    Ok(()) => Some(Wait::Secs(ctx.cfg.auto_focus_secs)),
                    Err(e) => {
                        error!(asset = self.asset.name(), error = %e, "auto focus failed");
                        self.stage = 2;
                        None
                    }
                }
            }
            1 => {
                self.stage = 2;
                info!(asset = self.asset.name(), "auto focus finished");
                ctx.shot_index += 1;
                None
            }
            _ => None,
        }
    }
}

/// Open a short recording session for one named shot, then close it.
///
/// Starting a burst while one is still finishing is a logic error; the
/// `is_photo` guard turns it into a logged no-op.
struct BurstStep {
    shot: String,
    stage: u8,
}

impl Sequence<ScenarioCtx> for BurstStep {
    fn resume(&mut self, ctx: &mut ScenarioCtx) -> Option<Wait<ScenarioCtx>> {
        match self.stage {
            0 => {
                if ctx.is_photo {
                    warn!(shot = %self.shot, "still capture already in progress; skipping burst");
                    self.stage = 2;
                    return None;
                }
                self.stage = 1;
                ctx.is_photo = true;
                info!(shot = %self.shot, "still recording started");
                if let Err(e) = ctx.start_recording(&self.shot, BURST_FRAME_SKIP) {
                    error!(shot = %self.shot, error = %e, "still recording failed to start");
                    ctx.is_photo = false;
                    self.stage = 2;
                    return None;
                }
                Some(Wait::Secs(ctx.cfg.frame_duration_secs))
            }
            1 => {
                self.stage = 2;
                ctx.is_photo = false;
                ctx.stop_recording();
                info!(shot = %self.shot, "still recording finished");
                None
            }
            _ => None,
        }
    }
}
