use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::thread::JoinHandle;

use crate::foundation::error::{TurnshotError, TurnshotResult};

/// Result of one finished recording session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShotOutput {
    /// Directory the session wrote into.
    pub path: PathBuf,
    /// Number of frames written before the end-of-stream sentinel.
    pub frames_written: u64,
}

/// Handle representing the eventual completion of a sink's writer.
///
/// Output is durable only after [`SinkHandle::join`] returns.
pub struct SinkHandle {
    inner: HandleInner,
}

enum HandleInner {
    Worker(JoinHandle<TurnshotResult<ShotOutput>>),
    Ready(ShotOutput),
}

impl SinkHandle {
    pub(crate) fn worker(handle: JoinHandle<TurnshotResult<ShotOutput>>) -> Self {
        Self {
            inner: HandleInner::Worker(handle),
        }
    }

    pub(crate) fn ready(output: ShotOutput) -> Self {
        Self {
            inner: HandleInner::Ready(output),
        }
    }

    /// Block until the writer has drained its queue and exited.
    ///
    /// Surfaces a write failure (or a writer panic) as an error.
    pub fn join(self) -> TurnshotResult<ShotOutput> {
        match self.inner {
            HandleInner::Worker(handle) => handle
                .join()
                .map_err(|_| TurnshotError::encode("frame writer thread panicked"))?,
            HandleInner::Ready(output) => Ok(output),
        }
    }
}

/// Sink contract for one recording session.
///
/// `submit` pays the encode cost on the caller's thread; disk I/O (if any)
/// happens behind the returned [`SinkHandle`]. `finish` consumes the sink,
/// so the end-of-stream sentinel is enqueued at most once and nothing can
/// be submitted after it.
pub trait RecordSink {
    /// Submit one RGBA8 frame.
    ///
    /// `timestamp_secs` is carried along but not used for sequencing:
    /// frames are named by the session's shot name, not by time.
    fn submit(&mut self, pixels: &[u8], timestamp_secs: f64) -> TurnshotResult<()>;

    /// Signal end-of-stream and hand back the writer's completion handle.
    fn finish(self: Box<Self>) -> TurnshotResult<SinkHandle>;
}

/// Opens one [`RecordSink`] per shot name.
pub trait RecorderFactory {
    /// Open a sink for the given shot.
    fn open(&mut self, shot: &str) -> TurnshotResult<Box<dyn RecordSink>>;
}

/// Record of one in-memory recording session, for assertions in tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShotRecord {
    /// Shot name the sink was opened with.
    pub name: String,
    /// Timestamps passed to `submit`, in submission order.
    pub timestamps: Vec<f64>,
    /// True once `finish` ran.
    pub finished: bool,
}

/// In-memory sink for tests and debugging.
pub struct InMemorySink {
    record: Rc<RefCell<ShotRecord>>,
}

impl InMemorySink {
    /// Create a sink along with the shared record observing it.
    pub fn new(name: impl Into<String>) -> (Self, Rc<RefCell<ShotRecord>>) {
        let record = Rc::new(RefCell::new(ShotRecord {
            name: name.into(),
            ..ShotRecord::default()
        }));
        (
            Self {
                record: record.clone(),
            },
            record,
        )
    }
}

impl RecordSink for InMemorySink {
    fn submit(&mut self, _pixels: &[u8], timestamp_secs: f64) -> TurnshotResult<()> {
        self.record.borrow_mut().timestamps.push(timestamp_secs);
        Ok(())
    }

    fn finish(self: Box<Self>) -> TurnshotResult<SinkHandle> {
        let mut record = self.record.borrow_mut();
        record.finished = true;
        Ok(SinkHandle::ready(ShotOutput {
            path: PathBuf::from(&record.name),
            frames_written: record.timestamps.len() as u64,
        }))
    }
}

/// Factory handing out [`InMemorySink`]s and retaining their records.
#[derive(Default)]
pub struct InMemoryRecorderFactory {
    records: Rc<RefCell<Vec<Rc<RefCell<ShotRecord>>>>>,
}

impl InMemoryRecorderFactory {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of every record opened so far, in open order.
    pub fn records(&self) -> Rc<RefCell<Vec<Rc<RefCell<ShotRecord>>>>> {
        self.records.clone()
    }
}

impl RecorderFactory for InMemoryRecorderFactory {
    fn open(&mut self, shot: &str) -> TurnshotResult<Box<dyn RecordSink>> {
        let (sink, record) = InMemorySink::new(shot);
        self.records.borrow_mut().push(record);
        Ok(Box::new(sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_sink_counts_submissions() {
        let mut factory = InMemoryRecorderFactory::new();
        let records = factory.records();

        let mut sink = factory.open("box_Front").unwrap();
        sink.submit(&[0u8; 4], 0.0).unwrap();
        sink.submit(&[0u8; 4], 0.5).unwrap();
        let output = sink.finish().unwrap().join().unwrap();

        assert_eq!(output.frames_written, 2);
        let records = records.borrow();
        assert_eq!(records.len(), 1);
        let record = records[0].borrow();
        assert_eq!(record.name, "box_Front");
        assert_eq!(record.timestamps, vec![0.0, 0.5]);
        assert!(record.finished);
    }
}
