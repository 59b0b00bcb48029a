//! # Addressable Memory
//!
//! Fixed-capacity byte storage backing the emulator's RAM window. The 8085
//! system modeled here exposes 2KB of RAM occupying the logical address range
//! 0x2000-0x27FF. Addresses are re-based to zero-based indices by subtracting
//! [`MEMORY_BASE`].
//!
//! This type performs no range validation of its own. The [`Bus`] is the
//! single authority for the address-window invariant, so the check happens
//! exactly once per access; handing this store an address outside the window
//! is a caller bug.
//!
//! [`Bus`]: crate::Bus

/// First valid address of the RAM window.
pub const MEMORY_BASE: u16 = 0x2000;

/// Size of the RAM window in bytes.
pub const MEMORY_SIZE: usize = 2048;

/// Last valid address of the RAM window (inclusive).
pub const MEMORY_END: u16 = MEMORY_BASE + MEMORY_SIZE as u16 - 1;

/// Fixed 2KB byte store for the logical window [0x2000, 0x27FF].
///
/// Allocated once and never resized; [`Cpu::reset`] overwrites it with zeros
/// rather than reallocating.
///
/// [`Cpu::reset`]: crate::Cpu::reset
pub struct AddressableMemory {
    data: Box<[u8; MEMORY_SIZE]>,
}

impl AddressableMemory {
    /// Creates a memory window with every byte initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Returns the byte stored at the given address.
    ///
    /// The address must already be validated by the bus.
    #[inline(always)]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[(addr - MEMORY_BASE) as usize]
    }

    /// Stores a byte at the given address.
    ///
    /// The address must already be validated by the bus.
    #[inline(always)]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[(addr - MEMORY_BASE) as usize] = value;
    }
}

impl Default for AddressableMemory {
    fn default() -> Self {
        Self::new()
    }
}
