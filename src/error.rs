use crate::assets::AssetError;
use crate::config::ConfigError;

/// Anything that stops the game from starting or from driving the
/// terminal.  Quitting and game over are not errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
