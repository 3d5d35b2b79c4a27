//! Game configuration.
//!
//! The configuration lives in a single TOML file that is read once per
//! process.  `load()` caches it behind a `OnceLock`; everything downstream
//! receives a plain `&Config` and never touches the file again.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "THUNDER_CONFIG";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or is missing required fields
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file parsed but holds values the game cannot run with
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub frame: FrameConfig,
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FrameConfig {
    /// Seconds slept between two ticks.
    pub delay: f64,
    /// Seconds between the player going down and the session ending.
    #[serde(default = "default_game_over_delay")]
    pub game_over_delay: f64,
}

/// Play-field size in terminal cells.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct ScreenConfig {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Cells per tick.
    pub speed: f32,
    /// Cells per tick, upward.
    pub bullet_speed: f32,
    /// Ticks of held fire between two shots.
    pub attack_interval: u32,
    /// Ticks of immunity after taking a hit.
    pub invincible_time: u32,
    #[serde(default = "default_player_life")]
    pub life: i32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EnemyConfig {
    /// Cells per tick, downward.
    pub speed: f32,
    /// Cells per tick, downward.
    pub bullet_speed: f32,
    /// Ticks between two enemy shots.
    pub attack_interval: u32,
    /// Ticks between two spawns, minus one.
    pub born_interval: u32,
    /// Whether enemy bullets damage the player.  Off by default: enemy
    /// fire is a visual threat only.
    #[serde(default)]
    pub bullet_collides: bool,
}

fn default_game_over_delay() -> f64 {
    1.0
}

fn default_player_life() -> i32 {
    3
}

// ── Loading ──────────────────────────────────────────────────────────────────

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, Path::new("<inline>"))
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )))
            }
        };

        non_negative("frame.delay", self.frame.delay)?;
        non_negative("frame.game_over_delay", self.frame.game_over_delay)?;
        non_negative("player.speed", f64::from(self.player.speed))?;
        non_negative("player.bullet_speed", f64::from(self.player.bullet_speed))?;
        non_negative("enemy.speed", f64::from(self.enemy.speed))?;
        non_negative("enemy.bullet_speed", f64::from(self.enemy.bullet_speed))?;

        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen must be at least 1x1 (got {}x{})",
                self.screen.width, self.screen.height
            )));
        }
        if self.player.life < 1 {
            return Err(ConfigError::Invalid(format!(
                "player.life must be at least 1 (got {})",
                self.player.life
            )));
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs_f64(self.frame.delay)
    }

    pub fn game_over_delay(&self) -> Duration {
        Duration::from_secs_f64(self.frame.game_over_delay)
    }
}

/// `$THUNDER_CONFIG`, or `config.toml` at the crate root.
pub fn default_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml"))
}

/// The process-wide configuration, read from `default_path()` on first use.
pub fn load() -> Result<&'static Config, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::from_file(default_path())?;
    log::debug!("configuration loaded: {:?}", config);
    Ok(CONFIG.get_or_init(|| config))
}
