use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to load .config.env: {0}")]
    DotEnv(#[from] dotenvy::Error),
}
