//! Flat byte-addressable memory.
//!
//! The whole address space `0..size` is backed by one buffer. Out-of-range
//! accesses never fail: reads return 0, writes are dropped, and both log a
//! warning through `tracing`.

use std::fmt::Display;

use rv32i_common::constants::{MEMORY_ALIGNMENT, MEMORY_FILL_PATTERN};
use rv32i_common::error::MemoryError;
use rv32i_common::memory::MemoryProvider;
use tracing::warn;

#[derive(Clone, PartialEq, Eq)]
pub struct FlatMemory {
    bytes: Vec<u8>,
}

impl FlatMemory {
    /// Create a memory of at least `size` bytes, rounded up to a multiple of
    /// 16, with every byte set to `0xa5`.
    ///
    /// Aborts if the buffer cannot be allocated; see [`FlatMemory::try_new`].
    pub fn new(size: u32) -> Self {
        Self {
            bytes: vec![MEMORY_FILL_PATTERN; aligned_size(size) as usize],
        }
    }

    /// Like [`FlatMemory::new`], but reports a failed allocation as
    /// [`MemoryError::AllocationFailed`].
    pub fn try_new(size: u32) -> Result<Self, MemoryError> {
        let size = aligned_size(size);
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size as usize)
            .map_err(|_| MemoryError::AllocationFailed(size))?;
        bytes.resize(size as usize, MEMORY_FILL_PATTERN);
        Ok(Self { bytes })
    }

    /// Create a memory and copy `image` to address 0.
    pub fn from_image(size: u32, image: &[u8]) -> Result<Self, MemoryError> {
        let mut memory = Self::try_new(size)?;
        memory.load(image)?;
        Ok(memory)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// Round up to the alignment, saturating just below 4 GiB.
fn aligned_size(size: u32) -> u32 {
    size.checked_next_multiple_of(MEMORY_ALIGNMENT)
        .unwrap_or(u32::MAX - (MEMORY_ALIGNMENT - 1))
}

impl MemoryProvider for FlatMemory {
    fn size(&self) -> u32 {
        self.bytes.len() as u32
    }

    fn get8(&self, address: u32) -> u8 {
        match self.bytes.get(address as usize) {
            Some(byte) => *byte,
            None => {
                warn!("{}", MemoryError::AddressOutOfRange(address));
                0
            }
        }
    }

    fn set8(&mut self, address: u32, value: u8) {
        match self.bytes.get_mut(address as usize) {
            Some(byte) => *byte = value,
            None => warn!(
                "{}, dropping write of 0x{:02x}",
                MemoryError::AddressOutOfRange(address),
                value
            ),
        }
    }

    fn load(&mut self, image: &[u8]) -> Result<(), MemoryError> {
        let (len, size) = (image.len(), self.size());
        let dest = self
            .bytes
            .get_mut(..len)
            .ok_or(MemoryError::ImageTooLarge { len, size })?;
        dest.copy_from_slice(image);
        Ok(())
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Hex dump, 16 bytes per row with a printable-ASCII gutter:
///
/// ```text
/// 00000000: 93 00 50 00 13 01 70 00  b3 81 20 00 73 00 10 00 *..P...p... .s...*
/// ```
impl Display for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.bytes.chunks(16).enumerate() {
            write!(f, "{:08x}:", row * 16)?;
            for (i, byte) in chunk.iter().enumerate() {
                if i == 8 {
                    write!(f, " ")?;
                }
                write!(f, " {:02x}", byte)?;
            }
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            writeln!(f, " *{ascii}*")?;
        }
        Ok(())
    }
}
