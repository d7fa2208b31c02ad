use serde::Deserialize;

use rv32i_common::constants::DEFAULT_MEMORY_SIZE;

use super::Config;

/// Simulator settings. Field names carry no underscores because `_`
/// separates the components of the environment variable names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Memory size in bytes, rounded up to a multiple of 16 by the simulator.
    pub memorysize: u32,
    /// Instruction limit; 0 runs until the program halts.
    pub limit: u64,
    pub showinstructions: bool,
    pub showregisters: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            memorysize: DEFAULT_MEMORY_SIZE,
            limit: 0,
            showinstructions: false,
            showregisters: false,
        }
    }
}

impl Config for SimConfig {
    const PREFIX: &'static str = "SIM";
}
