mod flat;

pub use flat::FlatMemory;
pub use rv32i_common::memory::{MemAccessSize, MemoryProvider};

use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Read a flat binary image from `path` into a new memory of `size` bytes.
pub fn load_image(path: impl AsRef<Path>, size: u32) -> Result<FlatMemory> {
    let path = path.as_ref();
    let image = std::fs::read(path)?;
    let memory = FlatMemory::from_image(size, &image)?;
    debug!(
        path = %path.display(),
        bytes = image.len(),
        size = memory.size(),
        "loaded image"
    );
    Ok(memory)
}
