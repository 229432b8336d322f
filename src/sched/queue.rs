use std::collections::VecDeque;

use crate::foundation::core::Tick;
use crate::sched::task::{Body, SeqState, Sequence, Task};

/// Builder for an ordered sequence of tasks.
///
/// Tasks run strictly one after another: at most one task is active at any
/// time, and tasks complete in append order. The builder is sealed by
/// [`TaskQueue::start`], which consumes it — appending to a started queue is
/// statically impossible.
pub struct TaskQueue<C> {
    tasks: VecDeque<Task<C>>,
    on_complete: Vec<Box<dyn FnOnce(&mut C)>>,
}

impl<C> Default for TaskQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TaskQueue<C> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
            on_complete: Vec::new(),
        }
    }

    /// Append a task with a start action and a polled completion predicate.
    ///
    /// The start action fires once when the task becomes head of queue; the
    /// predicate is then evaluated once per tick until it reports true.
    pub fn then(
        mut self,
        start: impl FnOnce(&mut C) + 'static,
        done: impl FnMut(&mut C) -> bool + 'static,
    ) -> Self {
        self.tasks.push_back(Task {
            start: Some(Box::new(start)),
            body: Body::Predicate(Box::new(done)),
        });
        self
    }

    /// Append a task with no start action that waits for a condition.
    pub fn then_until(mut self, done: impl FnMut(&mut C) -> bool + 'static) -> Self {
        self.tasks.push_back(Task {
            start: None,
            body: Body::Predicate(Box::new(done)),
        });
        self
    }

    /// Append a resumable step sequence.
    ///
    /// An empty or already-exhausted sequence is treated as instantly
    /// complete.
    pub fn then_seq(mut self, seq: impl Sequence<C> + 'static) -> Self {
        self.tasks.push_back(Task {
            start: None,
            body: Body::Sequence {
                seq: Box::new(seq),
                state: SeqState::NotStarted,
            },
        });
        self
    }

    /// Append a one-shot action that is instantly complete.
    pub fn then_run(mut self, action: impl FnOnce(&mut C) + 'static) -> Self {
        self.tasks.push_back(Task {
            start: Some(Box::new(action)),
            body: Body::Immediate,
        });
        self
    }

    /// Register a completion callback.
    ///
    /// Multiple registrations accumulate; all fire exactly once, in
    /// registration order, after the last task completes.
    pub fn on_complete(mut self, callback: impl FnOnce(&mut C) + 'static) -> Self {
        self.on_complete.push(Box::new(callback));
        self
    }

    /// Number of appended tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Return true when no tasks have been appended.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Seal the queue and begin the run.
    ///
    /// Fires the head task's start action (if any) and returns the running
    /// queue; the call itself never blocks. An empty queue completes
    /// immediately: callbacks fire here and the returned run is already
    /// finished.
    pub fn start(mut self, ctx: &mut C) -> QueueRun<C> {
        if self.tasks.is_empty() {
            for callback in self.on_complete.drain(..) {
                callback(ctx);
            }
            return QueueRun {
                tasks: VecDeque::new(),
                on_complete: Vec::new(),
                finished: true,
            };
        }

        if let Some(head) = self.tasks.front_mut()
            && let Some(start) = head.start.take()
        {
            start(ctx);
        }
        QueueRun {
            tasks: self.tasks,
            on_complete: self.on_complete,
            finished: false,
        }
    }
}

/// Progress report from [`QueueRun::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueStatus {
    /// Tasks remain; keep ticking.
    Running,
    /// All tasks completed and callbacks have fired.
    Finished,
}

/// A started [`TaskQueue`], driven by the caller one tick at a time.
///
/// The caller owns the run and discards it after completion; there is no
/// self-destruction.
pub struct QueueRun<C> {
    tasks: VecDeque<Task<C>>,
    on_complete: Vec<Box<dyn FnOnce(&mut C)>>,
    finished: bool,
}

impl<C> QueueRun<C> {
    /// Return true once every task has completed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the run by one scheduler tick.
    ///
    /// Polls the head task's body once. When the head completes it is
    /// removed and the next head's start action fires; the new head's body
    /// is first polled on the following tick, giving its side effects one
    /// tick to settle. When the last task completes, the registered
    /// callbacks fire and the run reports [`QueueStatus::Finished`].
    pub fn tick(&mut self, ctx: &mut C, tick: Tick) -> QueueStatus {
        if self.finished {
            return QueueStatus::Finished;
        }

        let Some(head) = self.tasks.front_mut() else {
            // start() only leaves an empty run in the finished state.
            self.finished = true;
            return QueueStatus::Finished;
        };

        if !head.body.poll(ctx, tick) {
            return QueueStatus::Running;
        }

        self.tasks.pop_front();
        if let Some(next) = self.tasks.front_mut() {
            if let Some(start) = next.start.take() {
                start(ctx);
            }
            return QueueStatus::Running;
        }

        self.finished = true;
        for callback in self.on_complete.drain(..) {
            callback(ctx);
        }
        QueueStatus::Finished
    }
}
