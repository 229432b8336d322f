use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::encode::sink::{RecordSink, RecorderFactory, ShotOutput, SinkHandle};
use crate::foundation::core::FrameSize;
use crate::foundation::error::{TurnshotError, TurnshotResult};

/// Frame payloads pending write. `None` is the end-of-stream sentinel; it is
/// always the last entry and the writer exits only after dequeuing it.
struct FrameQueue {
    jobs: Mutex<VecDeque<Option<Vec<u8>>>>,
    ready: Condvar,
}

impl FrameQueue {
    fn push(&self, job: Option<Vec<u8>>) -> TurnshotResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| TurnshotError::encode("frame queue lock poisoned"))?;
        jobs.push_back(job);
        self.ready.notify_one();
        Ok(())
    }

    fn pop_blocking(&self) -> TurnshotResult<Option<Vec<u8>>> {
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| TurnshotError::encode("frame queue lock poisoned"))?;
        loop {
            if let Some(job) = jobs.pop_front() {
                return Ok(job);
            }
            jobs = self
                .ready
                .wait(jobs)
                .map_err(|_| TurnshotError::encode("frame queue lock poisoned"))?;
        }
    }
}

/// PNG image sink with a background writer thread.
///
/// `submit` encodes on the caller's thread and enqueues the payload; the
/// writer thread (spawned in the constructor) drains the queue and writes
/// each payload to `<out_dir>/<shot>.png`. Repeated submissions overwrite
/// the prior file: last frame wins per shot name. A write failure stops the
/// writer and surfaces when the [`SinkHandle`] is joined; there is no retry.
pub struct PngSink {
    frame: FrameSize,
    queue: Arc<FrameQueue>,
    worker: Option<JoinHandle<TurnshotResult<ShotOutput>>>,
}

impl PngSink {
    /// Create the sink and start its writer thread.
    ///
    /// The output directory is created if missing.
    pub fn new(
        frame: FrameSize,
        out_dir: impl Into<PathBuf>,
        shot: &str,
    ) -> TurnshotResult<Self> {
        if shot.is_empty() {
            return Err(TurnshotError::validation("shot name must be non-empty"));
        }
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir).with_context(|| {
            format!("failed to create output directory '{}'", out_dir.display())
        })?;

        let queue = Arc::new(FrameQueue {
            jobs: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
        });

        let worker = std::thread::spawn({
            let queue = queue.clone();
            let file_path = out_dir.join(format!("{shot}.png"));
            move || write_loop(&queue, &file_path, out_dir)
        });

        Ok(Self {
            frame,
            queue,
            worker: Some(worker),
        })
    }
}

fn write_loop(
    queue: &FrameQueue,
    file_path: &Path,
    out_dir: PathBuf,
) -> TurnshotResult<ShotOutput> {
    tracing::debug!(path = %file_path.display(), "frame writer started");
    let mut frames_written = 0u64;
    while let Some(bytes) = queue.pop_blocking()? {
        std::fs::write(file_path, &bytes)
            .with_context(|| format!("failed to write frame '{}'", file_path.display()))?;
        frames_written += 1;
    }
    tracing::debug!(frames_written, "frame writer finished");
    Ok(ShotOutput {
        path: out_dir,
        frames_written,
    })
}

impl RecordSink for PngSink {
    fn submit(&mut self, pixels: &[u8], _timestamp_secs: f64) -> TurnshotResult<()> {
        if pixels.len() != self.frame.rgba8_len() {
            return Err(TurnshotError::validation(format!(
                "frame buffer size mismatch: got {} bytes, expected {} ({}x{} rgba8)",
                pixels.len(),
                self.frame.rgba8_len(),
                self.frame.width,
                self.frame.height
            )));
        }

        let mut encoded = Vec::new();
        image::codecs::png::PngEncoder::new(&mut encoded)
            .write_image(
                pixels,
                self.frame.width,
                self.frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| TurnshotError::encode(format!("png encode failed: {e}")))?;

        self.queue.push(Some(encoded))
    }

    fn finish(mut self: Box<Self>) -> TurnshotResult<SinkHandle> {
        self.queue.push(None)?;
        let worker = self
            .worker
            .take()
            .ok_or_else(|| TurnshotError::encode("png sink writer already detached"))?;
        Ok(SinkHandle::worker(worker))
    }
}

impl Drop for PngSink {
    fn drop(&mut self) {
        // An abandoned sink must still let the writer observe end-of-stream,
        // otherwise the thread blocks on the queue forever.
        if self.worker.take().is_some() {
            let _ = self.queue.push(None);
        }
    }
}

/// Factory producing one [`PngSink`] per shot in a fixed output directory.
pub struct PngRecorderFactory {
    frame: FrameSize,
    out_dir: PathBuf,
}

impl PngRecorderFactory {
    /// Create a factory writing shots of the given size into `out_dir`.
    pub fn new(frame: FrameSize, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            frame,
            out_dir: out_dir.into(),
        }
    }
}

impl RecorderFactory for PngRecorderFactory {
    fn open(&mut self, shot: &str) -> TurnshotResult<Box<dyn RecordSink>> {
        Ok(Box::new(PngSink::new(
            self.frame,
            self.out_dir.clone(),
            shot,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_out_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("turnshot_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn rejects_empty_shot_name() {
        let frame = FrameSize::new(4, 4).unwrap();
        assert!(PngSink::new(frame, temp_out_dir("empty_shot"), "").is_err());
    }

    #[test]
    fn rejects_mismatched_buffer_length() {
        let out_dir = temp_out_dir("mismatch");
        let frame = FrameSize::new(4, 4).unwrap();
        let mut sink: Box<dyn RecordSink> =
            Box::new(PngSink::new(frame, &out_dir, "shot").unwrap());

        let err = sink.submit(&[0u8; 3], 0.0).unwrap_err();
        assert!(err.to_string().contains("size mismatch"));

        let output = sink.finish().unwrap().join().unwrap();
        assert_eq!(output.frames_written, 0);
        let _ = std::fs::remove_dir_all(&out_dir);
    }
}
