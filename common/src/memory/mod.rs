mod traits;

pub use traits::{MemAccessSize, MemoryProvider};
