#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use thunder::assets::{Assets, SpriteSheet};
use thunder::config::Config;
use thunder::entities::{Enemy, Player, Rank};
use thunder::game::Game;
use thunder::input::{FrameInput, InputEvent, Key, KeyState};

/// 40x30 field, instant frames, nothing spawns or fires on its own.
pub const TEST_CONFIG: &str = r#"
[frame]
delay = 0.0
game_over_delay = 1.0

[screen]
width = 40
height = 30

[player]
speed = 1.0
bullet_speed = 2.0
attack_interval = 2
invincible_time = 5

[enemy]
speed = 1.0
bullet_speed = 1.0
attack_interval = 1000
born_interval = 1000
"#;

pub fn config() -> Config {
    Config::from_toml_str(TEST_CONFIG).expect("test config parses")
}

/// The sprites shipped in `assets/`.
pub fn sheet() -> SpriteSheet {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    SpriteSheet::load(&Assets::new(root)).expect("shipped assets load")
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn player() -> Player {
    Player::new(&config(), &sheet())
}

pub fn enemy(rank: u8, x: f32, y: f32) -> Enemy {
    let mut enemy = Enemy::new(Rank::new(rank).expect("valid rank"), 0.0, &config(), &sheet());
    enemy.plane.rect.x = x;
    enemy.plane.rect.y = y;
    enemy
}

pub fn game() -> Game {
    Game::new(config(), sheet())
}

pub fn idle() -> FrameInput {
    FrameInput::default()
}

pub fn holding(key: Key) -> FrameInput {
    FrameInput::new(KeyState::default().with(key), Vec::new())
}

pub fn quit() -> FrameInput {
    FrameInput::new(KeyState::default(), vec![InputEvent::Quit])
}
