//! Asset provider.
//!
//! Sprites live as text files under an asset root.  A logical name such as
//! `player/left1` resolves to `<root>/player/left1` or
//! `<root>/player/left1.txt`; a name that is a directory (`bomb`) resolves
//! to every file inside it, ordered by file name.
//!
//! File format: one line per row, spaces are transparent.  An optional
//! first line `#!color <name>` picks the foreground colour.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::sprite::{parse_color, Sprite};

/// Environment variable that overrides the asset root.
pub const ASSETS_ENV: &str = "THUNDER_ASSETS";

const COLOR_DIRECTIVE: &str = "#!color";

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("cannot read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed asset {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// A required asset does not resolve, or resolves to the wrong shape.
    #[error("required asset `{0}` not found")]
    Missing(String),

    /// A required sequence resolved to an empty directory.
    #[error("asset sequence `{0}` is empty")]
    Empty(String),
}

/// What a logical name resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum Asset {
    Image(Sprite),
    Sequence(Vec<Sprite>),
}

#[derive(Clone, Debug)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Assets { root: root.into() }
    }

    /// `$THUNDER_ASSETS`, or `assets/` at the crate root.
    pub fn default_root() -> PathBuf {
        std::env::var_os(ASSETS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name`.  Absence is `Ok(None)`, never an error.
    pub fn load(&self, name: &str) -> Result<Option<Asset>, AssetError> {
        let path = self.root.join(name);
        if path.is_dir() {
            let mut files = Vec::new();
            let entries = fs::read_dir(&path).map_err(|source| AssetError::Io {
                path: path.clone(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| AssetError::Io {
                    path: path.clone(),
                    source,
                })?;
                if entry.path().is_file() {
                    files.push(entry.path());
                }
            }
            files.sort();
            let frames = files
                .iter()
                .map(|f| read_sprite(f))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Some(Asset::Sequence(frames)));
        }

        let with_ext = self.root.join(format!("{name}.txt"));
        for candidate in [path, with_ext] {
            if candidate.is_file() {
                return read_sprite(&candidate).map(|s| Some(Asset::Image(s)));
            }
        }
        Ok(None)
    }

    /// Resolve `name` to a single image, treating absence as fatal.
    pub fn require_image(&self, name: &str) -> Result<Sprite, AssetError> {
        match self.load(name)? {
            Some(Asset::Image(sprite)) => Ok(sprite),
            _ => Err(AssetError::Missing(name.to_string())),
        }
    }

    /// Resolve `name` to a non-empty sequence, treating absence as fatal.
    pub fn require_sequence(&self, name: &str) -> Result<Vec<Sprite>, AssetError> {
        match self.load(name)? {
            Some(Asset::Sequence(frames)) if frames.is_empty() => {
                Err(AssetError::Empty(name.to_string()))
            }
            Some(Asset::Sequence(frames)) => Ok(frames),
            _ => Err(AssetError::Missing(name.to_string())),
        }
    }
}

/// Parse sprite text.  `origin` only labels errors.
pub fn parse_sprite(text: &str, origin: &Path) -> Result<Sprite, AssetError> {
    let mut lines: Vec<&str> = text.lines().collect();
    let mut color = None;

    if let Some(first) = lines.first() {
        if let Some(name) = first.strip_prefix(COLOR_DIRECTIVE) {
            color = Some(parse_color(name).ok_or_else(|| AssetError::Malformed {
                path: origin.to_path_buf(),
                reason: format!("unknown colour `{}`", name.trim()),
            })?);
            lines.remove(0);
        }
    }
    while matches!(lines.last(), Some(l) if l.trim().is_empty()) {
        lines.pop();
    }

    let sprite = Sprite::from_rows(&lines);
    Ok(match color {
        Some(c) => sprite.with_color(c),
        None => sprite,
    })
}

fn read_sprite(path: &Path) -> Result<Sprite, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sprite(&text, path)
}

// ── Sprite sheet ─────────────────────────────────────────────────────────────

/// Every image the game draws, resolved once before the first tick and
/// shared read-only by all entities.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    pub background: Rc<Sprite>,
    pub game_over: Rc<Sprite>,
    pub life: Rc<Sprite>,
    pub explosion: Rc<[Sprite]>,
    pub player: Rc<Sprite>,
    pub turn_left: [Rc<Sprite>; 2],
    pub turn_right: [Rc<Sprite>; 2],
    pub tail_flame: Rc<Sprite>,
    pub player_bullet: Rc<Sprite>,
    pub enemies: [Rc<Sprite>; 5],
    pub enemy_bullet: Rc<Sprite>,
}

impl SpriteSheet {
    pub fn load(assets: &Assets) -> Result<Self, AssetError> {
        let image = |name: &str| assets.require_image(name).map(Rc::new);

        let sheet = SpriteSheet {
            background: image("background")?,
            game_over: image("gameover")?,
            life: image("life")?,
            explosion: Rc::from(assets.require_sequence("bomb")?),
            player: image("player/player")?,
            turn_left: [image("player/left1")?, image("player/left2")?],
            turn_right: [image("player/right1")?, image("player/right2")?],
            tail_flame: image("player/tail_flame")?,
            player_bullet: image("player/bullet")?,
            enemies: [
                image("enemy/1")?,
                image("enemy/2")?,
                image("enemy/3")?,
                image("enemy/4")?,
                image("enemy/5")?,
            ],
            enemy_bullet: image("enemy/bullet")?,
        };
        log::debug!(
            "sprite sheet loaded from {} ({} explosion frames)",
            assets.root().display(),
            sheet.explosion.len()
        );
        Ok(sheet)
    }
}
