use core::ptr::read_volatile;
use core::ptr::write_volatile;

/// Raw 32-bit register access at an absolute address.
///
/// Implementations are expected to complete synchronously. Failures are the
/// implementation's business (fatal or ignored); nothing is propagated to
/// the caller.
pub trait RegisterBus {
    fn read32(&self, address: usize) -> u32;
    fn write32(&self, address: usize, value: u32);
}

impl<B: RegisterBus + ?Sized> RegisterBus for &B {
    #[inline]
    fn read32(&self, address: usize) -> u32 {
        (**self).read32(address)
    }

    #[inline]
    fn write32(&self, address: usize, value: u32) {
        (**self).write32(address, value)
    }
}

/// Memory-mapped bus using volatile loads and stores.
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    /// Every address later passed to [`RegisterBus::read32`] or
    /// [`RegisterBus::write32`] on this bus must be a 4-byte aligned device
    /// register that stays mapped for the lifetime of the bus.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline]
    fn read32(&self, address: usize) -> u32 {
        // Safety: guaranteed by the contract of `Mmio::new`.
        unsafe { read_volatile(address as *const u32) }
    }

    #[inline]
    fn write32(&self, address: usize, value: u32) {
        // Safety: guaranteed by the contract of `Mmio::new`.
        unsafe { write_volatile(address as *mut u32, value) }
    }
}
