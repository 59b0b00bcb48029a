//! # Memory Bus
//!
//! The bus mediates every memory access the CPU makes. It is the single
//! validation gate for the RAM window: both reads and writes check
//! `MEMORY_BASE <= addr <= MEMORY_END` before touching storage, and an access
//! outside the window fails with [`BusError::OutOfRange`] instead of
//! performing a partial or garbage access.
//!
//! The CPU is generic over the [`MemoryBus`] trait rather than the concrete
//! [`Bus`] so that address-space policy can evolve (memory-mapped I/O,
//! ROM/RAM splits, banked memory) without touching the execution engine.

use thiserror::Error;

use crate::memory::{AddressableMemory, MEMORY_BASE, MEMORY_END};

/// Error returned by bus accesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// The address lies outside the RAM window [0x2000, 0x27FF].
    #[error("address {addr:#06X} is outside the RAM window [0x2000, 0x27FF]")]
    OutOfRange {
        /// The offending address.
        addr: u16,
    },
}

/// Byte-level memory access as seen by the CPU.
///
/// Implementations decide which addresses are valid; the CPU makes no
/// assumption beyond "a failed access is fatal to the current run".
///
/// # Examples
///
/// ```
/// use lib8085::{Bus, BusError, MemoryBus, MEMORY_BASE};
///
/// let mut bus = Bus::new();
/// bus.write(MEMORY_BASE, 0x42)?;
/// assert_eq!(bus.read(MEMORY_BASE)?, 0x42);
///
/// // One past the end of the window is rejected.
/// assert_eq!(bus.read(0x2800), Err(BusError::OutOfRange { addr: 0x2800 }));
/// # Ok::<(), BusError>(())
/// ```
pub trait MemoryBus {
    /// Reads the byte at the given address.
    fn read(&self, addr: u16) -> Result<u8, BusError>;

    /// Writes a byte to the given address.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError>;
}

/// Bus over a single flat [`AddressableMemory`] window.
///
/// Owns the only byte storage in the system; no other component reads or
/// writes memory directly.
pub struct Bus {
    memory: AddressableMemory,
}

impl Bus {
    /// Creates a bus over a freshly zeroed RAM window.
    pub fn new() -> Self {
        Self {
            memory: AddressableMemory::new(),
        }
    }

    /// Places a program image into memory starting at `origin`.
    ///
    /// Every byte goes through the validated write path, so an image that
    /// would run past the end of the window is rejected and memory is left
    /// with the bytes written so far.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8085::{Bus, MemoryBus, MEMORY_BASE};
    ///
    /// let mut bus = Bus::new();
    /// bus.load(MEMORY_BASE, &[0x06, 0x42, 0x76]).unwrap();
    /// assert_eq!(bus.read(0x2001).unwrap(), 0x42);
    /// ```
    pub fn load(&mut self, origin: u16, program: &[u8]) -> Result<(), BusError> {
        for (offset, &byte) in program.iter().enumerate() {
            let addr = origin
                .checked_add(offset as u16)
                .ok_or(BusError::OutOfRange { addr: u16::MAX })?;
            self.write(addr, byte)?;
        }
        Ok(())
    }

    fn check(addr: u16) -> Result<(), BusError> {
        if (MEMORY_BASE..=MEMORY_END).contains(&addr) {
            Ok(())
        } else {
            Err(BusError::OutOfRange { addr })
        }
    }
}

impl MemoryBus for Bus {
    fn read(&self, addr: u16) -> Result<u8, BusError> {
        Self::check(addr)?;
        Ok(self.memory.read(addr))
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        Self::check(addr)?;
        self.memory.write(addr, value);
        Ok(())
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
