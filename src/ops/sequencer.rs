//! Deferred deletion: a delete request first puts the task into an exit
//! phase (rendered differently), and the task is only removed from the list
//! once a fixed delay has passed.
//!
//! The visual position is resolved to a task id when the delete is requested,
//! not when it fires. If the task is gone by then (list reloaded from disk,
//! removed some other way) the removal is skipped.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::model::task::TaskId;

use super::filter::VisibleTask;
use super::projector;

/// Default length of the exit phase
pub const DEFAULT_DELETE_DELAY: Duration = Duration::from_millis(300);

/// Source of the current time for the sequencer
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Handle for one delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeleteTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteState {
    /// Exit phase running, task still in the list
    Pending,
    /// Task removed from the list
    Removed,
    /// Timer fired but the task no longer existed
    Skipped,
}

#[derive(Debug, Clone)]
struct PendingDelete {
    ticket: DeleteTicket,
    id: TaskId,
    /// Store index at request time
    store_index: usize,
    deadline: Instant,
}

/// A delete whose timer has fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub ticket: DeleteTicket,
    pub id: TaskId,
    pub store_index: usize,
    pub state: DeleteState,
}

pub struct DeleteSequencer {
    delay: Duration,
    clock: Box<dyn Clock>,
    pending: Vec<PendingDelete>,
    /// Outcome of every ticket that has fired
    outcomes: HashMap<DeleteTicket, DeleteState>,
    next_ticket: u64,
}

impl DeleteSequencer {
    pub fn new(delay: Duration) -> Self {
        DeleteSequencer::with_clock(delay, Box::new(SystemClock))
    }

    pub fn with_clock(delay: Duration, clock: Box<dyn Clock>) -> Self {
        DeleteSequencer {
            delay,
            clock,
            pending: Vec::new(),
            outcomes: HashMap::new(),
            next_ticket: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start the exit phase for the task at `visual_position`.
    ///
    /// Returns None if the position is out of range. Requesting a task that
    /// is already pending returns the existing ticket and keeps its deadline.
    pub fn request(
        &mut self,
        visual_position: usize,
        visible: &[VisibleTask<'_>],
    ) -> Option<DeleteTicket> {
        let id = projector::id_at(visual_position, visible)?;
        let store_index = projector::store_index_of(visual_position, visible)?;

        if let Some(existing) = self.pending.iter().find(|p| p.id == id) {
            return Some(existing.ticket);
        }

        let ticket = DeleteTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.push(PendingDelete {
            ticket,
            id,
            store_index,
            deadline: self.clock.now() + self.delay,
        });
        Some(ticket)
    }

    /// Drop a pending delete before it fires. Returns false if the ticket
    /// is not pending.
    pub fn cancel(&mut self, ticket: DeleteTicket) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.ticket != ticket);
        self.pending.len() != before
    }

    /// Drop every pending delete. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// `Pending` while the ticket waits, then `Removed` or `Skipped` once it
    /// has fired. None for cancelled or unknown tickets.
    pub fn state(&self, ticket: DeleteTicket) -> Option<DeleteState> {
        if self.pending.iter().any(|p| p.ticket == ticket) {
            return Some(DeleteState::Pending);
        }
        self.outcomes.get(&ticket).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest deadline among pending deletes
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Time until the next deadline (zero if already due)
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Run the removal for every delete whose deadline has passed, in
    /// request order.
    ///
    /// `remove` is called with the captured id and reports whether a task was
    /// actually removed. An error stops processing; deletes not yet attempted
    /// stay pending.
    pub fn fire_due<E>(
        &mut self,
        remove: impl FnMut(TaskId) -> Result<bool, E>,
    ) -> Result<Vec<Settled>, E> {
        let now = self.clock.now();
        self.settle(Some(now), remove)
    }

    /// Run every pending removal now, regardless of deadline (used on exit).
    pub fn fire_all<E>(
        &mut self,
        remove: impl FnMut(TaskId) -> Result<bool, E>,
    ) -> Result<Vec<Settled>, E> {
        self.settle(None, remove)
    }

    fn settle<E>(
        &mut self,
        cutoff: Option<Instant>,
        mut remove: impl FnMut(TaskId) -> Result<bool, E>,
    ) -> Result<Vec<Settled>, E> {
        let mut settled = Vec::new();
        while let Some(pos) = self
            .pending
            .iter()
            .position(|p| cutoff.is_none_or(|now| p.deadline <= now))
        {
            let entry = self.pending.remove(pos);
            let state = if remove(entry.id)? {
                DeleteState::Removed
            } else {
                DeleteState::Skipped
            };
            self.outcomes.insert(entry.ticket, state);
            settled.push(Settled {
                ticket: entry.ticket,
                id: entry.id,
                store_index: entry.store_index,
                state,
            });
        }
        Ok(settled)
    }
}
