use crate::error::MemoryError;

/// Represents the size of memory access operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemAccessSize {
    Byte = 1,
    HalfWord = 2,
    Word = 4,
}

impl MemAccessSize {
    /// Number of bytes moved by an access of this size.
    pub fn bytes(&self) -> u32 {
        *self as u32
    }

    /// The width in bits, as used by trace annotations (`m8`, `m16`, `m32`).
    pub fn bits(&self) -> u32 {
        self.bytes() * 8
    }
}

/// A byte-addressable memory the executor can drive.
///
/// Implementors only have to provide the byte accessors; the wider accessors
/// compose them in little-endian order. None of the accessors fail: an
/// out-of-range read yields 0 and an out-of-range write is dropped, each
/// implementation deciding how to report the diagnostic.
pub trait MemoryProvider {
    /// Size of the address space in bytes. Valid addresses are `0..size()`.
    fn size(&self) -> u32;

    /// Reads one byte.
    fn get8(&self, address: u32) -> u8;

    /// Writes one byte.
    fn set8(&mut self, address: u32, value: u8);

    /// Returns true if `address` lies inside the memory.
    fn check_address(&self, address: u32) -> bool {
        address < self.size()
    }

    fn get16(&self, address: u32) -> u16 {
        u16::from_le_bytes([self.get8(address), self.get8(address.wrapping_add(1))])
    }

    fn get32(&self, address: u32) -> u32 {
        u32::from_le_bytes([
            self.get8(address),
            self.get8(address.wrapping_add(1)),
            self.get8(address.wrapping_add(2)),
            self.get8(address.wrapping_add(3)),
        ])
    }

    fn set16(&mut self, address: u32, value: u16) {
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.set8(address.wrapping_add(i as u32), byte);
        }
    }

    fn set32(&mut self, address: u32, value: u32) {
        for (i, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.set8(address.wrapping_add(i as u32), byte);
        }
    }

    /// Reads a zero-extended value of the given size.
    fn read(&self, address: u32, size: MemAccessSize) -> u32 {
        match size {
            MemAccessSize::Byte => self.get8(address) as u32,
            MemAccessSize::HalfWord => self.get16(address) as u32,
            MemAccessSize::Word => self.get32(address),
        }
    }

    /// Writes the low `size` bytes of `value`.
    fn write(&mut self, address: u32, size: MemAccessSize, value: u32) {
        match size {
            MemAccessSize::Byte => self.set8(address, value as u8),
            MemAccessSize::HalfWord => self.set16(address, value as u16),
            MemAccessSize::Word => self.set32(address, value),
        }
    }

    /// Copies a flat binary image to address 0.
    ///
    /// An image that does not fit is rejected before any byte is written.
    fn load(&mut self, image: &[u8]) -> Result<(), MemoryError> {
        if image.len() > self.size() as usize {
            return Err(MemoryError::ImageTooLarge {
                len: image.len(),
                size: self.size(),
            });
        }
        for (address, byte) in image.iter().enumerate() {
            self.set8(address as u32, *byte);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Eight bytes, no diagnostics; enough to exercise the default methods.
    struct Tiny([u8; 8]);

    impl MemoryProvider for Tiny {
        fn size(&self) -> u32 {
            8
        }

        fn get8(&self, address: u32) -> u8 {
            self.0.get(address as usize).copied().unwrap_or(0)
        }

        fn set8(&mut self, address: u32, value: u8) {
            if let Some(cell) = self.0.get_mut(address as usize) {
                *cell = value;
            }
        }
    }

    #[test]
    fn test_little_endian_composition() {
        let mut mem = Tiny([0; 8]);
        mem.set32(0, 0x1234_5678);
        assert_eq!(mem.0[..4], [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(mem.get16(0), 0x5678);
        assert_eq!(mem.get16(2), 0x1234);
        assert_eq!(mem.read(1, MemAccessSize::Byte), 0x56);

        mem.write(4, MemAccessSize::HalfWord, 0xdead_beef);
        assert_eq!(mem.get32(4), 0x0000_beef);
    }

    #[test]
    fn test_partial_word_past_the_end() {
        let mut mem = Tiny([0xff; 8]);
        mem.set32(6, 0x0403_0201);
        assert_eq!(mem.0[6..], [0x01, 0x02]);
        assert_eq!(mem.get32(6), 0x0000_0201);
        assert!(mem.check_address(7));
        assert!(!mem.check_address(8));
    }

    #[test]
    fn test_load_rejects_oversized_image() {
        let mut mem = Tiny([0; 8]);
        assert_eq!(
            mem.load(&[1; 9]),
            Err(MemoryError::ImageTooLarge { len: 9, size: 8 })
        );
        assert_eq!(mem.0, [0; 8]);

        mem.load(&[7, 8, 9]).unwrap();
        assert_eq!(mem.get32(0), 0x0009_0807);
    }
}
