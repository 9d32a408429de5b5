use game_world::WorldError;
use thiserror::Error;

/// Errors from loading or saving the automation config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by event dispatch.
///
/// Rules never fail on missing context; these only come from the host
/// refusing a mutation.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("World error: {0}")]
    World(#[from] WorldError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
