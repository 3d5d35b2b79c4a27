//! One game session and its per-frame tick.
//!
//! `Game` owns the scene, the spawn counter and the game-over timer.  It
//! never sleeps or touches the terminal: the scheduler feeds it polled
//! input, a timestamp and an RNG, and presents the canvas it draws into.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::assets::SpriteSheet;
use crate::canvas::Canvas;
use crate::combat::PlayerContact;
use crate::config::Config;
use crate::entities::{Enemy, Player};
use crate::input::FrameInput;
use crate::scene::{FrameContext, SceneRegistry, UpdateReport};
use crate::sprite::{Rect, Sprite};

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// A quit request arrived; nothing was updated or drawn.
    Shutdown,
}

/// One-shot deadline.  Arming it a second time is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShutdownTimer {
    deadline: Option<Instant>,
}

impl ShutdownTimer {
    /// Returns `true` only for the call that actually armed the timer.
    pub fn arm(&mut self, now: Instant, delay: Duration) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now + delay);
        true
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}

pub struct Game {
    config: Config,
    sprites: SpriteSheet,
    registry: SceneRegistry,
    born_counter: u32,
    frame: u64,
    spawned: u64,
    game_over: ShutdownTimer,
    shutting_down: bool,
}

impl Game {
    /// A new session with the player centred on the bottom edge.
    pub fn new(config: Config, sprites: SpriteSheet) -> Self {
        let mut registry = SceneRegistry::new();
        registry.add_player(Player::new(&config, &sprites));
        log::info!(
            "session started on a {}x{} field",
            config.screen.width,
            config.screen.height
        );
        Game {
            config,
            sprites,
            registry,
            born_counter: 0,
            frame: 0,
            spawned: 0,
            game_over: ShutdownTimer::default(),
            shutting_down: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SceneRegistry {
        &mut self.registry
    }

    /// Ticks that ran to completion.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Enemies spawned so far.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn is_game_over(&self) -> bool {
        !self.registry.player_alive()
    }

    pub fn game_over_timer(&self) -> &ShutdownTimer {
        &self.game_over
    }

    /// True once the post-game-over delay has run out.
    pub fn shutdown_due(&self, now: Instant) -> bool {
        self.game_over.is_due(now)
    }

    /// A blank canvas sized to the play field.
    pub fn new_canvas(&self) -> Canvas {
        Canvas::new(self.config.screen.width, self.config.screen.height)
    }

    /// Run one frame and draw it into `canvas`.
    pub fn tick(
        &mut self,
        input: &FrameInput,
        now: Instant,
        rng: &mut impl Rng,
        canvas: &mut Canvas,
    ) -> Tick {
        if self.shutting_down {
            return Tick::Shutdown;
        }
        if input.quit_requested() {
            log::info!("quit requested at frame {}", self.frame);
            self.shutting_down = true;
            return Tick::Shutdown;
        }
        self.frame += 1;

        let (width, height) = (
            f32::from(self.config.screen.width),
            f32::from(self.config.screen.height),
        );

        canvas.clear();
        let mut bg = Rect::of(&self.sprites.background);
        bg.set_centerx(width / 2.0);
        blit_at(canvas, &self.sprites.background, &bg);

        if !self.registry.player_alive() {
            let mut over = Rect::of(&self.sprites.game_over);
            over.set_centerx(width / 2.0);
            over.set_centery(height / 3.0);
            blit_at(canvas, &self.sprites.game_over, &over);

            let delay = self.config.game_over_delay();
            if self.game_over.arm(now, delay) {
                log::info!("game over at frame {}, closing in {:?}", self.frame, delay);
            }
        }

        self.born_counter += 1;
        if self.born_counter > self.config.enemy.born_interval {
            let enemy = Enemy::spawn(rng, &self.config, &self.sprites);
            log::debug!(
                "frame {}: rank {} enemy at x={:.1}",
                self.frame,
                enemy.rank().get(),
                enemy.plane.rect.centerx()
            );
            self.registry.add_enemy(enemy);
            self.spawned += 1;
            self.born_counter = 0;
        }

        let report = self.registry.update_all(&FrameContext {
            input,
            config: &self.config,
        });
        self.log_report(&report);
        self.registry.draw_all(canvas);

        Tick::Continue
    }

    fn log_report(&self, report: &UpdateReport) {
        if let PlayerContact::Hit {
            rams,
            shots,
            player_downed,
            ..
        } = report.contact
        {
            if player_downed {
                log::info!("frame {}: player down", self.frame);
            } else {
                let life = self.registry.player().map_or(0, |p| p.plane.life());
                log::info!(
                    "frame {}: player hit ({} rams, {} shots), {} lives left",
                    self.frame,
                    rams,
                    shots,
                    life
                );
            }
        }
        if report.enemies_downed > 0 {
            log::debug!("frame {}: {} enemies shot down", self.frame, report.enemies_downed);
        }
    }
}

fn blit_at(canvas: &mut Canvas, sprite: &Sprite, rect: &Rect) {
    canvas.blit(sprite, rect.cell_x(), rect.cell_y());
}
