use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicUsize, Ordering};

/// A fixed-capacity, lock-free single-producer/single-consumer ring.
///
/// The producer side ([`SpscQueue::push`]) never blocks and never allocates,
/// which makes it usable from an interrupt handler. The consumer side
/// ([`SpscQueue::pop`]) is meant to be driven from normal code.
///
/// `head` and `tail` are free-running counters; the slot index is the
/// counter modulo `N`, so all `N` slots are usable.
///
/// At most one context may push and at most one context may pop at any
/// time. On a single core this holds when the producer is an interrupt
/// handler that cannot re-enter itself and the consumer is the task loop.
pub struct SpscQueue<T: Copy, const N: usize> {
    head: AtomicUsize,
    tail: AtomicUsize,
    slots: UnsafeCell<[MaybeUninit<T>; N]>,
}

// SAFETY: a slot is only read after the producer published it through
// `tail` and only overwritten after the consumer released it through `head`.
unsafe impl<T: Copy + Send, const N: usize> Sync for SpscQueue<T, N> {}
unsafe impl<T: Copy + Send, const N: usize> Send for SpscQueue<T, N> {}

impl<T: Copy, const N: usize> SpscQueue<T, N> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            slots: UnsafeCell::new([const { MaybeUninit::uninit() }; N]),
        }
    }

    /// Number of slots in the ring.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        tail.wrapping_sub(head)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= N
    }

    /// Appends `value` at the tail.
    ///
    /// Returns the value back if the ring is full.
    pub fn push(&self, value: T) -> Result<(), T> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if tail.wrapping_sub(head) >= N {
            return Err(value);
        }

        // SAFETY: the slot at `tail` is not visible to the consumer until
        // `tail` is advanced below.
        unsafe {
            (*self.slots.get())[tail % N] = MaybeUninit::new(value);
        }
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    /// Removes the element at the head, if any.
    pub fn pop(&self) -> Option<T> {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head == tail {
            return None;
        }

        // SAFETY: the producer initialized this slot before publishing `tail`.
        let value = unsafe { (*self.slots.get())[head % N].assume_init() };
        self.head.store(head.wrapping_add(1), Ordering::Release);
        Some(value)
    }
}

impl<T: Copy, const N: usize> Default for SpscQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
