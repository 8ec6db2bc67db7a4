#![cfg_attr(not(test), no_std)]
//! Bus-addressed register typestates.
//!
//! This crate provides small handle types around 32-bit device registers that
//! encode readable / writable capabilities at the type level (typestate).
//! Every access goes through a [`RegisterBus`], the only primitive a driver
//! needs from the platform: a 32-bit read and a 32-bit write at an absolute
//! address.
//!
//! # Typestates
//! - [`ReadOnly`]: readable, no write API is exposed. Reads **may** have side effects.
//! - [`ReadPure`]: readable **without side effects** (safe to poll).
//! - [`WriteOnly`]: writable, no read API is exposed.
//! - [`ReadWrite`]: both readable and writable.
//!
//! # Safety
//! Handles do not validate that an address actually maps to device registers.
//! [`Mmio`] is the only bus that touches memory, and constructing it is
//! `unsafe` for that reason.

// Lets `#[derive(RawReg)]` expand to `::typestate::RawReg` inside this crate too.
extern crate self as typestate;

pub mod bus;
pub mod fake;
pub mod pair;
pub mod read_write;

pub use bus::Mmio;
pub use bus::RegisterBus;
pub use pair::RegisterPair;
pub use pair::join_u64;
pub use pair::split_u64;
pub use read_write::ReadOnly;
pub use read_write::ReadPure;
pub use read_write::ReadWrite;
pub use read_write::Readable;
pub use read_write::Register;
pub use read_write::Writable;
pub use read_write::WriteOnly;

/// A value that can be stored in a 32-bit register.
///
/// Hardware enumerations implement this with `#[derive(RawReg)]`, which
/// generates the fixed value associations from explicit discriminants.
pub trait RawReg: Copy {
    /// Encodes the value as the raw register word.
    fn to_raw(self) -> u32;

    /// Decodes a raw register word, `None` if no value has that encoding.
    fn try_from_raw(raw: u32) -> Option<Self>;
}

impl RawReg for u32 {
    #[inline]
    fn to_raw(self) -> u32 {
        self
    }

    #[inline]
    fn try_from_raw(raw: u32) -> Option<Self> {
        Some(raw)
    }
}
