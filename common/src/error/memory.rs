use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MemoryError {
    // Address at or beyond the end of memory
    #[error("Address out of range: 0x{0:08x}")]
    AddressOutOfRange(u32),

    // Binary image does not fit into memory
    #[error("Program too big: image is {len} bytes, memory is {size} bytes")]
    ImageTooLarge { len: usize, size: u32 },

    #[error("Cannot allocate {0} bytes of memory")]
    AllocationFailed(u32),
}
