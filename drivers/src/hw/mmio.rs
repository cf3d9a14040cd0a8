use core::ptr::{read_volatile, write_volatile};

/// Word-wide access to memory-mapped peripheral registers.
///
/// Drivers go through this trait instead of dereferencing addresses
/// directly, so a register file can be substituted when there is no
/// hardware behind the addresses.
pub trait RegisterBus {
    /// Read the 32-bit register at `addr`.
    fn read(&self, addr: u32) -> u32;

    /// Write `value` to the 32-bit register at `addr`.
    fn write(&self, addr: u32, value: u32);

    /// Read-modify-write: clear `clear`, then set `set`.
    #[inline]
    fn modify(&self, addr: u32, clear: u32, set: u32) {
        let value = self.read(addr);
        self.write(addr, (value & !clear) | set);
    }

    #[inline]
    fn set_bits(&self, addr: u32, mask: u32) {
        self.modify(addr, 0, mask);
    }

    #[inline]
    fn clear_bits(&self, addr: u32, mask: u32) {
        self.modify(addr, mask, 0);
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &T {
    fn read(&self, addr: u32) -> u32 {
        (**self).read(addr)
    }

    fn write(&self, addr: u32, value: u32) {
        (**self).write(addr, value)
    }
}

/// Volatile access to the physical address space.
#[derive(Debug, Copy, Clone)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create a bus over raw physical addresses.
    ///
    /// # Safety
    ///
    /// Every address later passed to [`RegisterBus::read`] or
    /// [`RegisterBus::write`] must be a valid, aligned device register.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read(&self, addr: u32) -> u32 {
        // SAFETY: guaranteed by the contract of `Mmio::new`.
        unsafe { read_volatile(addr as usize as *const u32) }
    }

    #[inline(always)]
    fn write(&self, addr: u32, value: u32) {
        // SAFETY: guaranteed by the contract of `Mmio::new`.
        unsafe { write_volatile(addr as usize as *mut u32, value) }
    }
}
