use crate::foundation::core::Tick;

/// A suspension point yielded by a [`Sequence`].
///
/// Waits are descriptors, not blocking calls: the queue runner re-examines
/// them once per scheduler tick.
pub enum Wait<C> {
    /// Resume at the next scheduler tick.
    NextTick,
    /// Resume once the given number of scheduler seconds has elapsed.
    Secs(f64),
    /// Resume once the condition reports true (polled once per tick).
    Until(Box<dyn FnMut(&mut C) -> bool>),
}

impl<C> std::fmt::Debug for Wait<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Wait::NextTick => write!(f, "Wait::NextTick"),
            Wait::Secs(s) => write!(f, "Wait::Secs({s})"),
            Wait::Until(_) => write!(f, "Wait::Until(..)"),
        }
    }
}

/// A resumable multi-step procedure.
///
/// `resume` runs the procedure up to its next suspension point and returns
/// the wait descriptor for it, or `None` when the procedure is exhausted.
/// Implementations are explicit state machines; closures of type
/// `FnMut(&mut C) -> Option<Wait<C>>` implement the trait directly.
pub trait Sequence<C> {
    /// Advance to the next suspension point. `None` means exhausted.
    fn resume(&mut self, ctx: &mut C) -> Option<Wait<C>>;
}

impl<C, F> Sequence<C> for F
where
    F: FnMut(&mut C) -> Option<Wait<C>>,
{
    fn resume(&mut self, ctx: &mut C) -> Option<Wait<C>> {
        self(ctx)
    }
}

/// One unit of deferred work: an optional one-shot start action plus a body
/// that drives completion.
pub(crate) struct Task<C> {
    pub(crate) start: Option<Box<dyn FnOnce(&mut C)>>,
    pub(crate) body: Body<C>,
}

pub(crate) enum Body<C> {
    /// Complete on first poll.
    Immediate,
    /// Complete once the predicate reports true.
    Predicate(Box<dyn FnMut(&mut C) -> bool>),
    /// Complete once the sequence is exhausted.
    Sequence {
        seq: Box<dyn Sequence<C>>,
        state: SeqState<C>,
    },
}

pub(crate) enum SeqState<C> {
    NotStarted,
    Waiting(Pending<C>),
}

/// An armed suspension point.
pub(crate) enum Pending<C> {
    Tick,
    Deadline(f64),
    Until(Box<dyn FnMut(&mut C) -> bool>),
}

impl<C> Pending<C> {
    fn arm(wait: Wait<C>, tick: Tick) -> Self {
        match wait {
            Wait::NextTick => Pending::Tick,
            Wait::Secs(secs) => Pending::Deadline(tick.now_secs + secs),
            Wait::Until(pred) => Pending::Until(pred),
        }
    }
}

impl<C> Body<C> {
    /// Poll the body once. Returns true when the task has completed.
    ///
    /// A satisfied suspension point resumes the sequence on the same tick;
    /// at most one `resume` call happens per poll.
    pub(crate) fn poll(&mut self, ctx: &mut C, tick: Tick) -> bool {
        match self {
            Body::Immediate => true,
            Body::Predicate(done) => done(ctx),
            Body::Sequence { seq, state } => {
                if let SeqState::Waiting(pending) = state {
                    let ready = match pending {
                        Pending::Tick => true,
                        Pending::Deadline(deadline) => tick.now_secs >= *deadline,
                        Pending::Until(pred) => pred(ctx),
                    };
                    if !ready {
                        return false;
                    }
                }
                match seq.resume(ctx) {
                    None => true,
                    Some(wait) => {
                        *state = SeqState::Waiting(Pending::arm(wait, tick));
                        false
                    }
                }
            }
        }
    }
}
