use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

mod error;

pub mod sim;

pub use error::Error;
pub use sim::SimConfig;

const CARGO_MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");
const CONFIG_ENV_PREFIX: &str = "RV32I";

pub trait Config: DeserializeOwned {
    const PREFIX: &'static str;

    /// Read `RV32I_<PREFIX>_*` variables, after loading defaults from the
    /// `.config.env` file next to this crate if it exists.
    fn from_env() -> Result<Self, Error> {
        let prefix = format!("{}_{}", CONFIG_ENV_PREFIX, Self::PREFIX);
        if let Err(err) = dotenvy::from_path(config_env_path()) {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        Ok(config::Config::builder()
            .add_source(config::Environment::with_prefix(&prefix).separator("_"))
            .build()?
            .try_deserialize()?)
    }
}

#[doc(hidden)]
pub fn config_env_path() -> PathBuf {
    Path::new(CARGO_MANIFEST_DIR).join(".config.env")
}
