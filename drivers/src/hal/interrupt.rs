//! Interrupt Line Hardware Abstraction Layer.
//!
//! This module defines the platform-independent view of a single
//! maskable interrupt source, such as the chip-wide GPIO interrupt.

use core::ffi::c_void;

/// Interrupt service routine entry point.
///
/// `arg` is the opaque context given to [`InterruptLine::attach`].
pub type IsrHandler = unsafe extern "C" fn(arg: *mut c_void);

/// A single interrupt line that can be masked and bound to a handler.
pub trait InterruptLine {
    /// Stop delivering this interrupt.
    fn mask(&self);

    /// Resume delivering this interrupt.
    fn unmask(&self);

    /// Bind `handler` to this line, to be called with `arg`.
    ///
    /// # Safety
    ///
    /// `arg` must stay valid for as long as the line can fire, and the
    /// handler must be able to interpret it.
    unsafe fn attach(&self, handler: IsrHandler, arg: *mut c_void);

    /// Mask the line until the returned guard is dropped.
    fn masked(&self) -> MaskGuard<'_, Self>
    where
        Self: Sized,
    {
        self.mask();
        MaskGuard { line: self }
    }
}

impl<T: InterruptLine + ?Sized> InterruptLine for &T {
    fn mask(&self) {
        (**self).mask()
    }

    fn unmask(&self) {
        (**self).unmask()
    }

    unsafe fn attach(&self, handler: IsrHandler, arg: *mut c_void) {
        // SAFETY: forwarded contract.
        unsafe { (**self).attach(handler, arg) }
    }
}

/// Guard returned by [`InterruptLine::masked`].
///
/// Unmasks the line on drop, whatever state it was in before.
pub struct MaskGuard<'a, L: InterruptLine> {
    line: &'a L,
}

impl<L: InterruptLine> Drop for MaskGuard<'_, L> {
    fn drop(&mut self) {
        self.line.unmask();
    }
}
