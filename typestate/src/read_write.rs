use core::marker::PhantomData;

use crate::RawReg;
use crate::RegisterBus;

/// Readable register (no write API exposed).
///
/// Depending on the hardware, reading may have side effects (e.g.,
/// clear-on-read fields).
#[derive(Debug, Clone, Copy)]
pub struct ReadOnly;

/// Readable register **without side effects** (safe to poll).
#[derive(Debug, Clone, Copy)]
pub struct ReadPure;

/// Write-only register (no read API exposed).
#[derive(Debug, Clone, Copy)]
pub struct WriteOnly;

/// Read/write register.
#[derive(Debug, Clone, Copy)]
pub struct ReadWrite;

/// Marker for access typestates that expose [`Readable`].
pub trait ReadAccess {}

/// Marker for access typestates that expose [`Writable`].
pub trait WriteAccess {}

impl ReadAccess for ReadOnly {}
impl ReadAccess for ReadPure {}
impl ReadAccess for ReadWrite {}
impl WriteAccess for WriteOnly {}
impl WriteAccess for ReadWrite {}

/// A 32-bit register at an absolute bus address.
///
/// `A` is the access typestate and `T` the value type stored in the
/// register.
pub struct Register<'a, B: RegisterBus, A, T: RawReg = u32> {
    bus: &'a B,
    address: usize,
    _access: PhantomData<(A, T)>,
}

impl<'a, B: RegisterBus, A, T: RawReg> Register<'a, B, A, T> {
    #[inline]
    pub const fn new(bus: &'a B, address: usize) -> Self {
        Self {
            bus,
            address,
            _access: PhantomData,
        }
    }

    #[inline]
    pub const fn address(&self) -> usize {
        self.address
    }
}

/// Bus-readable capability.
pub trait Readable {
    type T: RawReg;

    /// Performs a single bus read and returns the raw word.
    fn read_raw(&self) -> u32;

    /// Performs a single bus read and decodes it, `None` if the word has no
    /// defined value.
    #[inline]
    fn read(&self) -> Option<Self::T> {
        <Self::T as RawReg>::try_from_raw(self.read_raw())
    }
}

/// Bus-writable capability.
pub trait Writable {
    type T: RawReg;

    /// Performs a single bus write of a raw word.
    fn write_raw(&self, raw: u32);

    /// Performs a single bus write of an encoded value.
    #[inline]
    fn write(&self, val: Self::T) {
        self.write_raw(val.to_raw())
    }
}

impl<B: RegisterBus, A: ReadAccess, T: RawReg> Readable for Register<'_, B, A, T> {
    type T = T;

    #[inline]
    fn read_raw(&self) -> u32 {
        self.bus.read32(self.address)
    }
}

impl<B: RegisterBus, A: WriteAccess, T: RawReg> Writable for Register<'_, B, A, T> {
    type T = T;

    #[inline]
    fn write_raw(&self, raw: u32) {
        self.bus.write32(self.address, raw)
    }
}
