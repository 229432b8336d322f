use std::rc::Rc;

use crate::encode::sink::{RecordSink, SinkHandle};
use crate::foundation::error::{TurnshotError, TurnshotResult};
use crate::scene::{Clock, FrameSource};

/// Decimating bridge from the per-frame render signal to a [`RecordSink`].
///
/// Bound to one sink for the lifetime of a recording session. Of every N
/// available frames (N = `frame_skip`), only indices 0, N, 2N, ... are read
/// back and submitted.
pub struct CameraInput {
    sink: Option<Box<dyn RecordSink>>,
    clock: Rc<dyn Clock>,
    frame_skip: u32,
    frames_seen: u64,
    disposed: bool,
}

impl CameraInput {
    /// Bind a sink, a timestamp clock, and a decimation factor (>= 1).
    pub fn new(
        sink: Box<dyn RecordSink>,
        clock: Rc<dyn Clock>,
        frame_skip: u32,
    ) -> TurnshotResult<Self> {
        if frame_skip == 0 {
            return Err(TurnshotError::validation("frame_skip must be >= 1"));
        }
        Ok(Self {
            sink: Some(sink),
            clock,
            frame_skip,
            frames_seen: 0,
            disposed: false,
        })
    }

    /// Handle one "frame available" signal from the render loop.
    ///
    /// Skipped frames are counted but not read back.
    pub fn on_frame(&mut self, camera: &mut dyn FrameSource) -> TurnshotResult<()> {
        if self.disposed {
            return Ok(());
        }
        let index = self.frames_seen;
        self.frames_seen += 1;
        if index % u64::from(self.frame_skip) != 0 {
            return Ok(());
        }
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        let timestamp = self.clock.now_secs();
        let pixels = camera.capture()?;
        sink.submit(pixels, timestamp)
    }

    /// Detach from the frame signal. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    /// Dispose and finish the bound sink, returning the writer handle.
    pub fn finish(mut self) -> TurnshotResult<SinkHandle> {
        self.dispose();
        match self.sink.take() {
            Some(sink) => sink.finish(),
            None => Err(TurnshotError::encode("camera input has no sink to finish")),
        }
    }
}
