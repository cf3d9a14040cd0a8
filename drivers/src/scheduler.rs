//! Cooperative task scheduler.
//!
//! A small run-to-completion scheduler in the style of the ESP8266 SDK's
//! `system_os_task`/`system_os_post`: one task per priority, each with a
//! bounded event queue. Posting is lock-free and safe from an interrupt
//! handler; events are delivered from the main loop by [`run_once`] or
//! [`run_pending`], highest priority first and FIFO within a priority.
//!
//! Each queue accepts one producer at a time. A post that preempts another
//! post to the same priority is refused with [`SchedulerError::Busy`]
//! instead of waiting, so an interrupt handler never spins on task code.
//!
//! [`run_once`]: CooperativeScheduler::run_once
//! [`run_pending`]: CooperativeScheduler::run_pending

use crate::hal::task::{OsEvent, TaskHandler, TaskPriority, TaskScheduler};
use common::sync::SpscQueue;
use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use spin::Once;

/// Number of task priorities.
pub const TASK_PRIORITIES: usize = 3;

/// Scheduler errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Priority outside `0..TASK_PRIORITIES`.
    InvalidPriority,
    /// Zero capacity, or more than the scheduler's queue depth.
    InvalidCapacity,
    /// A task already owns this priority.
    AlreadyRegistered,
    /// Posting to a priority without a task.
    NotRegistered,
    /// The task's queue holds `capacity` events already.
    QueueFull,
    /// Another post to the same priority was interrupted midway.
    Busy,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SchedulerError::InvalidPriority => "invalid task priority",
            SchedulerError::InvalidCapacity => "invalid queue capacity",
            SchedulerError::AlreadyRegistered => "task already registered",
            SchedulerError::NotRegistered => "no task registered",
            SchedulerError::QueueFull => "task queue full",
            SchedulerError::Busy => "task queue busy",
        };
        f.write_str(msg)
    }
}

struct TaskSlot<P: Copy, const N: usize> {
    handler: Once<TaskHandler<P>>,
    capacity: AtomicUsize,
    /// Held by the context currently pushing to `queue`.
    posting: AtomicBool,
    queue: SpscQueue<OsEvent<P>, N>,
}

impl<P: Copy, const N: usize> TaskSlot<P, N> {
    const fn new() -> Self {
        Self {
            handler: Once::new(),
            capacity: AtomicUsize::new(0),
            posting: AtomicBool::new(false),
            queue: SpscQueue::new(),
        }
    }
}

/// Run-to-completion scheduler with `TASK_PRIORITIES` tasks, each queue
/// holding at most `N` events.
pub struct CooperativeScheduler<P: Copy, const N: usize> {
    tasks: [TaskSlot<P, N>; TASK_PRIORITIES],
}

impl<P: Copy, const N: usize> CooperativeScheduler<P, N> {
    pub const fn new() -> Self {
        Self {
            tasks: [const { TaskSlot::new() }; TASK_PRIORITIES],
        }
    }

    fn slot(&self, priority: TaskPriority) -> Result<&TaskSlot<P, N>, SchedulerError> {
        self.tasks
            .get(priority as usize)
            .ok_or(SchedulerError::InvalidPriority)
    }

    /// Number of events waiting for the task at `priority`.
    pub fn pending(&self, priority: TaskPriority) -> usize {
        self.slot(priority).map_or(0, |slot| slot.queue.len())
    }

    /// Deliver one event to its task.
    ///
    /// Returns `false` if every queue was empty.
    pub fn run_once(&self) -> bool {
        for slot in self.tasks.iter().rev() {
            if let Some(handler) = slot.handler.get() {
                if let Some(event) = slot.queue.pop() {
                    handler(event);
                    return true;
                }
            }
        }
        false
    }

    /// Deliver events until every queue is empty; returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while self.run_once() {
            ran += 1;
        }
        ran
    }
}

impl<P: Copy, const N: usize> Default for CooperativeScheduler<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy, const N: usize> TaskScheduler<P> for CooperativeScheduler<P, N> {
    type Error = SchedulerError;

    fn register(
        &self,
        priority: TaskPriority,
        handler: TaskHandler<P>,
        capacity: usize,
    ) -> Result<(), SchedulerError> {
        let slot = self.slot(priority)?;
        if capacity == 0 || capacity > N {
            return Err(SchedulerError::InvalidCapacity);
        }
        if slot.handler.is_completed() {
            return Err(SchedulerError::AlreadyRegistered);
        }

        slot.capacity.store(capacity, Ordering::Release);
        slot.handler.call_once(|| handler);
        log::debug!("scheduler: task registered at priority {priority}, capacity {capacity}");
        Ok(())
    }

    fn post(&self, priority: TaskPriority, event: OsEvent<P>) -> Result<(), SchedulerError> {
        let slot = self.slot(priority)?;
        if !slot.handler.is_completed() {
            return Err(SchedulerError::NotRegistered);
        }
        if slot.posting.swap(true, Ordering::Acquire) {
            return Err(SchedulerError::Busy);
        }

        let result = if slot.queue.len() >= slot.capacity.load(Ordering::Acquire) {
            Err(SchedulerError::QueueFull)
        } else {
            slot.queue.push(event).map_err(|_| SchedulerError::QueueFull)
        };
        slot.posting.store(false, Ordering::Release);
        result
    }
}
