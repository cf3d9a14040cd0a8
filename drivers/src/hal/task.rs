//! Cooperative Task Scheduler Abstraction.
//!
//! Interrupt handlers hand work to normal context by posting small events
//! to a task registered at a priority. The scheduler later runs the task
//! once per event, in post order.

use core::fmt;

/// Task priority. Higher values run first.
pub type TaskPriority = u8;

/// A message delivered to a registered task.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OsEvent<P> {
    /// Event word, interpreted by the task.
    pub sig: u32,
    /// Parameter carried alongside the word.
    pub par: P,
}

/// Task entry point, called once per posted event.
pub type TaskHandler<P> = fn(OsEvent<P>);

/// Scheduler that owns task queues.
pub trait TaskScheduler<P: Copy> {
    /// Error type for registration and posting.
    type Error: fmt::Debug;

    /// Register `handler` at `priority` with room for `capacity` events.
    fn register(
        &self,
        priority: TaskPriority,
        handler: TaskHandler<P>,
        capacity: usize,
    ) -> Result<(), Self::Error>;

    /// Queue `event` for the task at `priority`.
    ///
    /// Must never block; it is called from interrupt context.
    fn post(&self, priority: TaskPriority, event: OsEvent<P>) -> Result<(), Self::Error>;
}

impl<P: Copy, T: TaskScheduler<P> + ?Sized> TaskScheduler<P> for &T {
    type Error = T::Error;

    fn register(
        &self,
        priority: TaskPriority,
        handler: TaskHandler<P>,
        capacity: usize,
    ) -> Result<(), Self::Error> {
        (**self).register(priority, handler, capacity)
    }

    fn post(&self, priority: TaskPriority, event: OsEvent<P>) -> Result<(), Self::Error> {
        (**self).post(priority, event)
    }
}
