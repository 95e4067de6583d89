//! Cooperative, tick-based event scheduler.
//!
//! Reactions are posted with a delay and run once, earliest deadline first,
//! from a fixed pool of slots. There is no periodic primitive: a reaction
//! that wants to run again posts itself from its own body.

use crate::errors_mgt::ErrorsManager;
use crate::ident::K_MAX_REACTIONS;
use crate::time::TimeSource;
use crate::{KernelError, KernelResult, Tick, Ticks};

/// Opaque value handed back to a reaction when it runs.
pub type Cookie = u32;

/// Type alias `ReactionFn` represents a schedulable function.
///
/// # Parameters
/// - `&mut W`: the application world, owned by the caller of the dispatch loop.
/// - `&mut dyn Post<W>`: the scheduler, to post follow-up reactions.
/// - [`Cookie`]: the value given at post time, unchanged.
///
/// # Returns
/// - `Ok(())` on success. Errors are handed to the scheduler's [`ErrorsManager`];
///   they never stop the dispatch loop unless fatal.
pub type ReactionFn<W> = fn(&mut W, &mut dyn Post<W>, Cookie) -> KernelResult<()>;

/// A pending reaction, stored in a scheduler slot.
struct Reaction<W> {
    react: ReactionFn<W>,
    cookie: Cookie,
    eta: Tick,
    /// Post order, breaks ties between equal deadlines.
    seq: u64,
}

impl<W> Reaction<W> {
    fn key(&self) -> (Tick, u64) {
        (self.eta, self.seq)
    }
}

/// Posting interface given to running reactions.
pub trait Post<W> {
    /// Schedules `p_react` to run `p_delay` ticks from now.
    ///
    /// # Errors
    /// - [`KernelError::SchedulerFull`] if every slot is taken. The request is dropped.
    fn post(&mut self, p_react: ReactionFn<W>, p_cookie: Cookie, p_delay: Ticks)
    -> KernelResult<()>;

    /// Current time of the scheduler clock.
    fn now(&mut self) -> Tick;
}

/// What the dispatch loop does when nothing is ready.
pub trait Idle {
    /// Waits for time to pass. `p_next_eta` is the earliest pending deadline, if any.
    fn idle(&mut self, p_next_eta: Option<Tick>);
}

/// Outcome of one dispatch iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// A reaction ran; carries its deadline.
    Ran(Tick),
    /// Nothing was ready; carries the next deadline, `None` if no reaction is pending.
    Idle(Option<Tick>),
}

/// Event scheduler with `K` reaction slots.
///
/// # Type parameters
/// - `W`: the world passed to every reaction.
/// - `T`: the [`TimeSource`] deadlines are measured against.
/// - `K`: number of slots. The pool never grows.
pub struct Scheduler<W, T, const K: usize = K_MAX_REACTIONS> {
    slots: [Option<Reaction<W>>; K],
    pending: usize,
    next_seq: u64,
    clock: T,
    errors: ErrorsManager,
}

impl<W, T: TimeSource, const K: usize> Scheduler<W, T, K> {
    /// Creates a scheduler with every slot free.
    pub fn new(p_clock: T) -> Self {
        Scheduler {
            slots: [const { None }; K],
            pending: 0,
            next_seq: 0,
            clock: p_clock,
            errors: ErrorsManager::new(),
        }
    }

    /// Frees every slot and resets the post sequence.
    ///
    /// Pending reactions are dropped without running. The clock and the
    /// error records are kept.
    pub fn init(&mut self) {
        self.slots.iter_mut().for_each(|l_slot| *l_slot = None);
        self.pending = 0;
        self.next_seq = 0;
    }

    /// Reads the clock. With a [`LogicalClock`](crate::LogicalClock) this advances time.
    pub fn now(&mut self) -> Tick {
        self.clock.now()
    }

    /// Schedules `p_react` to run `p_delay` ticks from now, in the first free slot.
    ///
    /// # Parameters
    /// - `p_react`: the reaction.
    /// - `p_cookie`: handed back to `p_react` when it runs.
    /// - `p_delay`: delay from the current time. Zero means "as soon as possible".
    ///
    /// # Errors
    /// - [`KernelError::SchedulerFull`] if no slot is free. The request is dropped,
    ///   pending reactions are untouched and the error is recorded in [`Scheduler::errors`].
    pub fn post(
        &mut self,
        p_react: ReactionFn<W>,
        p_cookie: Cookie,
        p_delay: Ticks,
    ) -> KernelResult<()> {
        let l_eta = self.clock.now().after(p_delay);

        let Some(l_slot) = self.slots.iter_mut().find(|l_slot| l_slot.is_none()) else {
            self.errors.error_handler(&KernelError::SchedulerFull);
            return Err(KernelError::SchedulerFull);
        };

        *l_slot = Some(Reaction {
            react: p_react,
            cookie: p_cookie,
            eta: l_eta,
            seq: self.next_seq,
        });
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending += 1;

        Ok(())
    }

    /// Runs one dispatch iteration.
    ///
    /// Reads the clock once, then runs the pending reaction with the smallest
    /// deadline if that deadline has been reached. Equal deadlines run in post
    /// order. The slot is freed before the reaction runs, so the reaction can
    /// reuse it.
    ///
    /// # Returns
    /// - [`Step::Ran`] with the deadline of the reaction that ran.
    /// - [`Step::Idle`] with the next deadline if nothing was ready.
    pub fn step(&mut self, p_world: &mut W) -> Step {
        let l_now = self.clock.now();

        let Some(l_index) = self.earliest() else {
            return Step::Idle(None);
        };

        let l_eta = match &self.slots[l_index] {
            Some(l_reaction) if l_reaction.eta <= l_now => l_reaction.eta,
            Some(l_reaction) => return Step::Idle(Some(l_reaction.eta)),
            None => return Step::Idle(None),
        };

        if let Some(l_reaction) = self.slots[l_index].take() {
            self.pending -= 1;
            if let Err(l_err) = (l_reaction.react)(p_world, self, l_reaction.cookie) {
                self.errors.error_handler(&l_err);
            }
        }

        Step::Ran(l_eta)
    }

    /// Dispatch loop. Never returns.
    ///
    /// Runs ready reactions one at a time and calls `p_idle` whenever nothing is ready.
    pub fn run_forever(&mut self, p_world: &mut W, p_idle: &mut impl Idle) -> ! {
        loop {
            if let Step::Idle(l_next) = self.step(p_world) {
                p_idle.idle(l_next);
            }
        }
    }

    /// Number of reactions waiting to run.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn capacity(&self) -> usize {
        K
    }

    /// Deadline of the reaction that will run next, if any.
    pub fn next_eta(&self) -> Option<Tick> {
        self.earliest()
            .and_then(|l_index| self.slots[l_index].as_ref())
            .map(|l_reaction| l_reaction.eta)
    }

    pub fn errors(&self) -> &ErrorsManager {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorsManager {
        &mut self.errors
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut T {
        &mut self.clock
    }

    /// Index of the occupied slot with the smallest `(eta, seq)`.
    fn earliest(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(l_index, l_slot)| l_slot.as_ref().map(|l_r| (l_index, l_r.key())))
            .min_by_key(|(_, l_key)| *l_key)
            .map(|(l_index, _)| l_index)
    }
}

impl<W, T: TimeSource, const K: usize> Post<W> for Scheduler<W, T, K> {
    fn post(
        &mut self,
        p_react: ReactionFn<W>,
        p_cookie: Cookie,
        p_delay: Ticks,
    ) -> KernelResult<()> {
        Scheduler::post(self, p_react, p_cookie, p_delay)
    }

    fn now(&mut self) -> Tick {
        Scheduler::now(self)
    }
}
