//! Session-oriented batch capture driver.

use std::rc::Rc;

use tracing::info;

use crate::config::CaptureConfig;
use crate::encode::sink::RecorderFactory;
use crate::foundation::error::{TurnshotError, TurnshotResult};
use crate::scenario::{self, ScenarioCtx};
use crate::sched::{QueueRun, QueueStatus, TaskQueue};
use crate::scene::{AssetCatalog, AssetId, Clock, FrameSource, SceneHost, Ticker};

/// The injected host services a capture batch runs against.
pub struct Stage {
    /// Scene instantiation and manipulation.
    pub scene: Box<dyn SceneHost>,
    /// Camera/surface pixel readback.
    pub camera: Box<dyn FrameSource>,
    /// Timestamp source for submitted frames.
    pub clock: Rc<dyn Clock>,
    /// The scheduling substrate: one tick per rendered frame.
    pub ticker: Box<dyn Ticker>,
}

/// Options controlling a capture run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionOpts {
    /// Abort with an error if the run exceeds this many ticks.
    ///
    /// `None` preserves the underlying queue behavior: a task whose
    /// completion condition never holds stalls the run forever.
    pub max_ticks: Option<u64>,
}

/// Totals from one completed capture run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Recording sessions finished (one per shot).
    pub shots: u64,
    /// Frames written across all shots.
    pub frames_written: u64,
}

/// Progress report from [`CaptureSession::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// Work remains; keep ticking.
    Running,
    /// Every task has completed.
    Finished,
}

/// A batch capture, driven over the cooperative substrate one tick per
/// rendered frame.
///
/// Built from a scenario; enumeration and configuration errors surface at
/// build time, before any scene work happens.
pub struct CaptureSession {
    ctx: ScenarioCtx,
    ticker: Box<dyn Ticker>,
    run: QueueRun<ScenarioCtx>,
    opts: SessionOpts,
    ticks: u64,
}

impl CaptureSession {
    /// Single continuous capture of a timed animation per asset.
    pub fn clip_batch(
        stage: Stage,
        catalog: &dyn AssetCatalog,
        recorders: Box<dyn RecorderFactory>,
        cfg: CaptureConfig,
        opts: SessionOpts,
    ) -> TurnshotResult<Self> {
        Self::build(stage, catalog, recorders, cfg, opts, scenario::clip::build_queue)
    }

    /// Four-angle rotate/refocus/burst cycle per asset.
    pub fn stills_batch(
        stage: Stage,
        catalog: &dyn AssetCatalog,
        recorders: Box<dyn RecorderFactory>,
        cfg: CaptureConfig,
        opts: SessionOpts,
    ) -> TurnshotResult<Self> {
        Self::build(
            stage,
            catalog,
            recorders,
            cfg,
            opts,
            scenario::stills::build_queue,
        )
    }

    fn build(
        stage: Stage,
        catalog: &dyn AssetCatalog,
        recorders: Box<dyn RecorderFactory>,
        cfg: CaptureConfig,
        opts: SessionOpts,
        make_queue: fn(&[AssetId]) -> TaskQueue<ScenarioCtx>,
    ) -> TurnshotResult<Self> {
        cfg.validate()?;
        let camera_frame = stage.camera.frame_size();
        if camera_frame != cfg.frame {
            return Err(TurnshotError::validation(format!(
                "camera frame size {}x{} does not match configured {}x{}",
                camera_frame.width, camera_frame.height, cfg.frame.width, cfg.frame.height
            )));
        }
        let assets = catalog.enumerate()?;
        info!(assets = assets.len(), "capture batch starting");

        let mut ctx = ScenarioCtx::new(stage.scene, stage.camera, stage.clock, recorders, cfg);
        let run = make_queue(&assets).start(&mut ctx);
        Ok(Self {
            ctx,
            ticker: stage.ticker,
            run,
            opts,
            ticks: 0,
        })
    }

    /// Advance the batch by one rendered frame: tick the queue, then pump
    /// the frame signal into the active recording.
    pub fn tick(&mut self) -> TurnshotResult<SessionStatus> {
        let tick = self.ticker.advance();
        let status = self.run.tick(&mut self.ctx, tick);
        self.ctx.pump()?;
        self.ticks += 1;
        Ok(match status {
            QueueStatus::Running => SessionStatus::Running,
            QueueStatus::Finished => SessionStatus::Finished,
        })
    }

    /// Drive the batch to completion, join every writer, and return totals.
    ///
    /// Output files are durable once this returns.
    #[tracing::instrument(skip(self))]
    pub fn run(mut self) -> TurnshotResult<CaptureStats> {
        while !self.run.is_finished() {
            if let Some(max) = self.opts.max_ticks
                && self.ticks >= max
            {
                return Err(TurnshotError::validation(format!(
                    "capture batch did not complete within {max} ticks"
                )));
            }
            self.tick()?;
        }

        let mut stats = CaptureStats::default();
        for handle in self.ctx.handles.drain(..) {
            let output = handle.join()?;
            stats.shots += 1;
            stats.frames_written += output.frames_written;
        }
        info!(
            shots = stats.shots,
            frames = stats.frames_written,
            "capture batch complete"
        );
        Ok(stats)
    }
}
