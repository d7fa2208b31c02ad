pub const NUM_REGISTERS: usize = 32;
pub const WORD_SIZE: usize = 4;

/// Memory size used when neither the command line nor the environment sets one.
pub const DEFAULT_MEMORY_SIZE: u32 = 0x10000;
/// Memory sizes are rounded up to a multiple of this many bytes.
pub const MEMORY_ALIGNMENT: u32 = 16;
/// Byte value every memory cell holds before the image is loaded.
pub const MEMORY_FILL_PATTERN: u8 = 0xa5;
/// Value of registers x1-x31 after a reset.
pub const REGISTER_RESET_PATTERN: u32 = 0xf0f0_f0f0;

/// Column width of the mnemonic in rendered instructions.
pub const MNEMONIC_WIDTH: usize = 8;
/// Column width of a rendered instruction in trace output, before the annotation.
pub const INSTRUCTION_WIDTH: usize = 35;
