//! The scene registry: the collections that own every live entity.
//!
//! An entity exists exactly as long as one of these collections holds it.
//! Entities never point back into the registry; they report their own
//! state (`Removed`, off-screen) and the registry drops them during
//! `update_all`.

use crate::canvas::Canvas;
use crate::combat::{self, PlayerContact};
use crate::config::{Config, ScreenConfig};
use crate::entities::{Bullet, BulletOwner, Enemy, Player};
use crate::input::FrameInput;

/// A member of the enemy group.  Enemy bullets share the group with the
/// planes that fired them and are updated and drawn in the same pass.
#[derive(Clone, Debug)]
pub enum Hostile {
    Enemy(Enemy),
    Bullet(Bullet),
}

impl Hostile {
    fn is_gone(&self, screen: ScreenConfig) -> bool {
        match self {
            Hostile::Enemy(enemy) => enemy.plane.is_removed(),
            Hostile::Bullet(bullet) => bullet.has_exited(screen),
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        match self {
            Hostile::Enemy(enemy) => enemy.plane.draw(canvas),
            Hostile::Bullet(bullet) => bullet.draw(canvas),
        }
    }
}

/// The four logical collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    Player,
    PlayerBullets,
    Enemies,
    EnemyBullets,
}

/// What an update pass needs from the outside world.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub input: &'a FrameInput,
    pub config: &'a Config,
}

/// What happened during one update pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateReport {
    pub contact: PlayerContact,
    /// Enemies shot down by player bullets.
    pub enemies_downed: u32,
}

impl Default for UpdateReport {
    fn default() -> Self {
        UpdateReport {
            contact: PlayerContact::Clear,
            enemies_downed: 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneRegistry {
    players: Vec<Player>,
    player_bullets: Vec<Bullet>,
    hostiles: Vec<Hostile>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Membership ───────────────────────────────────────────────────────────

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.hostiles.push(Hostile::Enemy(enemy));
    }

    /// Player bullets get their own group; enemy bullets join the enemy
    /// group.
    pub fn add_bullet(&mut self, bullet: Bullet) {
        match bullet.owner() {
            BulletOwner::Player => self.player_bullets.push(bullet),
            BulletOwner::Enemy => self.hostiles.push(Hostile::Bullet(bullet)),
        }
    }

    pub fn player(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.players.first_mut()
    }

    /// False once the player is exploding or gone.
    pub fn player_alive(&self) -> bool {
        self.player().map_or(false, |p| p.plane.is_active())
    }

    pub fn player_bullets(&self) -> &[Bullet] {
        &self.player_bullets
    }

    pub fn hostiles(&self) -> &[Hostile] {
        &self.hostiles
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.hostiles.iter().filter_map(|h| match h {
            Hostile::Enemy(enemy) => Some(enemy),
            Hostile::Bullet(_) => None,
        })
    }

    pub fn enemies_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.hostiles.iter_mut().filter_map(|h| match h {
            Hostile::Enemy(enemy) => Some(enemy),
            Hostile::Bullet(_) => None,
        })
    }

    pub fn enemy_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.hostiles.iter().filter_map(|h| match h {
            Hostile::Bullet(bullet) => Some(bullet),
            Hostile::Enemy(_) => None,
        })
    }

    pub fn len(&self, group: Group) -> usize {
        match group {
            Group::Player => self.players.len(),
            Group::PlayerBullets => self.player_bullets.len(),
            Group::Enemies => self.enemies().count(),
            Group::EnemyBullets => self.enemy_bullets().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.player_bullets.is_empty() && self.hostiles.is_empty()
    }

    // ── Per-frame passes ─────────────────────────────────────────────────────

    /// Advance every entity by one tick.
    ///
    /// Explosions already in progress step first, so a plane downed during
    /// this pass shows its first explosion image before it starts counting,
    /// whichever collision downed it.  Then, in order: the player (move,
    /// fire, collide), player bullets, and the enemy group in insertion
    /// order.  Bullets fired by enemies during the pass join the group at
    /// its end and first move next tick.
    pub fn update_all(&mut self, ctx: &FrameContext<'_>) -> UpdateReport {
        let config = ctx.config;
        let screen = config.screen;
        let keys = &ctx.input.keys;
        let mut report = UpdateReport::default();

        let SceneRegistry {
            players,
            player_bullets,
            hostiles,
        } = self;

        for player in players.iter_mut() {
            player.plane.advance_explosion();
        }
        for enemy in hostiles.iter_mut().filter_map(|h| match h {
            Hostile::Enemy(enemy) => Some(enemy),
            Hostile::Bullet(_) => None,
        }) {
            enemy.plane.advance_explosion();
        }

        // Player group
        for player in players.iter_mut() {
            if player.plane.is_active() {
                player.steer(keys, screen);
                if let Some(bullet) =
                    player.attack(keys, config.player.attack_interval, config.player.bullet_speed)
                {
                    player_bullets.push(bullet);
                }
                report.contact = combat::check_player_attacked(
                    player,
                    hostiles,
                    config.player.invincible_time,
                    config.enemy.bullet_collides,
                );
            }
            player.handle_edges(&ctx.input.events);
        }
        players.retain(|p| !p.plane.is_removed());

        // Player bullets
        for bullet in player_bullets.iter_mut() {
            bullet.advance();
        }
        player_bullets.retain(|b| !b.has_exited(screen));

        // Enemy group
        let mut fired = Vec::new();
        for hostile in hostiles.iter_mut() {
            match hostile {
                Hostile::Enemy(enemy) if enemy.plane.is_active() => {
                    enemy.advance(screen);
                    if !enemy.plane.is_active() {
                        continue;
                    }
                    if let Some(bullet) =
                        enemy.attack(config.enemy.attack_interval, config.enemy.bullet_speed)
                    {
                        fired.push(Hostile::Bullet(bullet));
                    }
                    combat::check_enemy_attacked(enemy, player_bullets);
                    if !enemy.plane.is_active() {
                        report.enemies_downed += 1;
                    }
                }
                Hostile::Enemy(_) => {}
                Hostile::Bullet(bullet) => bullet.advance(),
            }
        }
        hostiles.retain(|h| !h.is_gone(screen));
        hostiles.extend(fired);

        report
    }

    /// Draw every collection: the life HUD first, then the player group,
    /// player bullets and the enemy group, each in membership order.
    pub fn draw_all(&self, canvas: &mut Canvas) {
        for player in &self.players {
            player.draw_lives(canvas);
        }
        for player in &self.players {
            player.draw(canvas);
        }
        for bullet in &self.player_bullets {
            bullet.draw(canvas);
        }
        for hostile in &self.hostiles {
            hostile.draw(canvas);
        }
    }
}
