//! Game entities: planes and the bullets they fire.
//!
//! `Player` and `Enemy` both embed a `Plane`, which owns the shared life
//! counter and the `Active → Exploding → Removed` lifecycle.  Behaviour that
//! differs (how a plane moves, when it fires) lives on the two variants.

use std::rc::Rc;

use rand::Rng;

use crate::assets::SpriteSheet;
use crate::canvas::Canvas;
use crate::config::{Config, ScreenConfig};
use crate::input::{InputEvent, Key, KeyState};
use crate::sprite::{collide_mask, Rect, Sprite};

/// Ticks each explosion image stays on screen.
pub const EXPLOSION_HOLD: u32 = 6;

/// Tilt magnitude at which the player switches to the hard-bank image.
pub const TILT_THRESHOLD: i32 = 300;

// ── Plane lifecycle ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneState {
    /// Flying, collidable, controllable.
    Active,
    /// Playing the explosion; `tick` counts updates since the killing blow.
    Exploding { tick: u32 },
    /// Explosion finished.  The registry drops the plane on its next pass.
    Removed,
}

#[derive(Clone, Debug)]
pub struct Plane {
    pub rect: Rect,
    speed: f32,
    life: i32,
    state: PlaneState,
    image: Rc<Sprite>,
    explosion: Rc<[Sprite]>,
}

impl Plane {
    pub fn new(speed: f32, life: i32, image: Rc<Sprite>, explosion: Rc<[Sprite]>) -> Self {
        Plane {
            rect: Rect::of(&image),
            speed,
            life,
            state: PlaneState::Active,
            image,
            explosion,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn life(&self) -> i32 {
        self.life
    }

    pub fn state(&self) -> PlaneState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == PlaneState::Active
    }

    pub fn is_removed(&self) -> bool {
        self.state == PlaneState::Removed
    }

    pub fn image(&self) -> &Sprite {
        &self.image
    }

    /// Swap the visible image.  The rect keeps its size and position.
    pub fn set_image(&mut self, image: Rc<Sprite>) {
        self.image = image;
    }

    /// Take one point of damage.  Returns `true` when this blow starts the
    /// explosion.  Planes that are already going down ignore further hits.
    pub fn kill(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.life -= 1;
        if self.life < 1 {
            self.state = PlaneState::Exploding { tick: 0 };
            true
        } else {
            false
        }
    }

    /// Total updates an explosion lasts, identical for every plane.
    pub fn explosion_ticks(&self) -> u32 {
        self.explosion.len() as u32 * EXPLOSION_HOLD
    }

    pub fn advance_explosion(&mut self) {
        if let PlaneState::Exploding { tick } = self.state {
            let tick = tick + 1;
            self.state = if tick >= self.explosion_ticks() {
                PlaneState::Removed
            } else {
                PlaneState::Exploding { tick }
            };
        }
    }

    /// The explosion image for the current tick, while exploding.
    pub fn explosion_frame(&self) -> Option<&Sprite> {
        match self.state {
            PlaneState::Exploding { tick } => self.explosion.get((tick / EXPLOSION_HOLD) as usize),
            _ => None,
        }
    }

    /// Mask overlap against another sprite.  Only active planes collide.
    pub fn collides_with(&self, rect: &Rect, sprite: &Sprite) -> bool {
        self.is_active() && collide_mask(&self.rect, &self.image, rect, sprite)
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        if self.is_removed() {
            return;
        }
        canvas.blit(&self.image, self.rect.cell_x(), self.rect.cell_y());
        if let Some(frame) = self.explosion_frame() {
            let mut r = Rect::of(frame);
            r.set_centerx(self.rect.centerx());
            r.set_centery(self.rect.centery());
            canvas.blit(frame, r.cell_x(), r.cell_y());
        }
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// The exhaust drawn under the player while climbing.
#[derive(Clone, Debug)]
pub struct TailFlame {
    pub rect: Rect,
    pub shown: bool,
    image: Rc<Sprite>,
}

impl TailFlame {
    fn new(image: Rc<Sprite>) -> Self {
        TailFlame {
            rect: Rect::of(&image),
            shown: false,
            image,
        }
    }

    /// Park the flame just below `plane`.
    fn follow(&mut self, plane: &Rect) {
        self.rect.set_centerx(plane.centerx());
        self.rect.set_top(plane.bottom());
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.blit(&self.image, self.rect.cell_x(), self.rect.cell_y());
    }
}

#[derive(Clone, Debug)]
struct PlayerLooks {
    level: Rc<Sprite>,
    left: [Rc<Sprite>; 2],
    right: [Rc<Sprite>; 2],
    life_icon: Rc<Sprite>,
    bullet: Rc<Sprite>,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub plane: Plane,
    pub tail_flame: TailFlame,
    attack_cooldown: u32,
    invincible: u32,
    tilt: i32,
    looks: PlayerLooks,
}

impl Player {
    /// A fresh player, centred at the bottom of the screen.
    pub fn new(config: &Config, sheet: &SpriteSheet) -> Self {
        let mut plane = Plane::new(
            config.player.speed,
            config.player.life,
            sheet.player.clone(),
            sheet.explosion.clone(),
        );
        plane.rect.set_bottom(f32::from(config.screen.height));
        plane.rect.set_centerx(f32::from(config.screen.width) / 2.0);

        let mut tail_flame = TailFlame::new(sheet.tail_flame.clone());
        tail_flame.follow(&plane.rect);

        Player {
            plane,
            tail_flame,
            attack_cooldown: 0,
            invincible: 0,
            tilt: 0,
            looks: PlayerLooks {
                level: sheet.player.clone(),
                left: sheet.turn_left.clone(),
                right: sheet.turn_right.clone(),
                life_icon: sheet.life.clone(),
                bullet: sheet.player_bullet.clone(),
            },
        }
    }

    pub fn tilt(&self) -> i32 {
        self.tilt
    }

    pub fn invincible(&self) -> u32 {
        self.invincible
    }

    pub fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    /// Apply the held direction keys.  A released turn key lets the tilt
    /// drift one step back toward level; the bank image stays until the
    /// tilt gets there.
    pub fn steer(&mut self, keys: &KeyState, screen: ScreenConfig) {
        if keys.is_pressed(Key::Up) {
            self.move_up();
        }
        if keys.is_pressed(Key::Down) {
            self.move_down(screen);
        }
        if keys.is_pressed(Key::Left) {
            self.move_left();
        } else if self.tilt < 0 {
            self.tilt += 1;
        }
        if keys.is_pressed(Key::Right) {
            self.move_right(screen);
        } else if self.tilt > 0 {
            self.tilt -= 1;
        }
        if self.tilt == 0 {
            self.plane.set_image(self.looks.level.clone());
        }
    }

    fn move_left(&mut self) {
        self.tilt -= 1;
        if self.tilt < 0 {
            let hard = usize::from(self.tilt <= -TILT_THRESHOLD);
            self.plane.set_image(self.looks.left[hard].clone());
        }
        let x = self.plane.rect.centerx() - self.plane.speed();
        self.plane.rect.set_centerx(x.max(0.0));
    }

    fn move_right(&mut self, screen: ScreenConfig) {
        self.tilt += 1;
        if self.tilt > 0 {
            let hard = usize::from(self.tilt >= TILT_THRESHOLD);
            self.plane.set_image(self.looks.right[hard].clone());
        }
        let x = self.plane.rect.centerx() + self.plane.speed();
        self.plane.rect.set_centerx(x.min(f32::from(screen.width)));
    }

    fn move_up(&mut self) {
        self.tail_flame.follow(&self.plane.rect);
        let y = self.plane.rect.centery() - self.plane.speed();
        self.plane.rect.set_centery(y.max(0.0));
    }

    fn move_down(&mut self, screen: ScreenConfig) {
        let y = self.plane.rect.centery() + self.plane.speed();
        self.plane.rect.set_centery(y.min(f32::from(screen.height)));
    }

    /// Count held-fire ticks and release a bullet from the nose once the
    /// count passes `attack_interval`.
    pub fn attack(&mut self, keys: &KeyState, attack_interval: u32, bullet_speed: f32) -> Option<Bullet> {
        if !keys.is_pressed(Key::Fire) {
            return None;
        }
        self.attack_cooldown += 1;
        if self.attack_cooldown <= attack_interval {
            return None;
        }
        self.attack_cooldown = 0;
        let origin = (self.plane.rect.centerx(), self.plane.rect.top());
        Some(Bullet::player(origin, bullet_speed, self.looks.bullet.clone()))
    }

    /// Burn one tick of invincibility.  Returns `true` if the player was
    /// invincible for this tick.
    pub fn tick_invincibility(&mut self) -> bool {
        if self.invincible > 0 {
            self.invincible -= 1;
            true
        } else {
            false
        }
    }

    /// One point of damage followed by `invincible_time` ticks of immunity.
    /// Returns `true` if the hit brought the player down.
    pub fn take_hit(&mut self, invincible_time: u32) -> bool {
        let downed = self.plane.kill();
        self.invincible = invincible_time;
        downed
    }

    /// Show the tail flame on an Up press, hide it on release.
    pub fn handle_edges(&mut self, events: &[InputEvent]) {
        for event in events {
            match event {
                InputEvent::KeyDown(Key::Up) => self.tail_flame.shown = true,
                InputEvent::KeyUp(Key::Up) => self.tail_flame.shown = false,
                _ => {}
            }
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        if self.plane.is_removed() {
            return;
        }
        self.plane.draw(canvas);
        if self.tail_flame.shown {
            self.tail_flame.draw(canvas);
        }
    }

    /// Remaining lives as icons in the bottom-right corner.
    pub fn draw_lives(&self, canvas: &mut Canvas) {
        if !self.plane.is_active() {
            return;
        }
        let icon = &self.looks.life_icon;
        let (w, h) = (icon.width() as i32, icon.height() as i32);
        let y = i32::from(canvas.height()) - h;
        for i in 1..=self.plane.life() {
            canvas.blit(icon, i32::from(canvas.width()) - i * w, y);
        }
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

/// Enemy tier, 1 through 5.  Sets both starting life and appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(rank: u8) -> Option<Rank> {
        (Self::MIN..=Self::MAX).contains(&rank).then_some(Rank(rank))
    }

    /// Uniform over every rank.
    pub fn random(rng: &mut impl Rng) -> Rank {
        Rank(rng.gen_range(Self::MIN..=Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub plane: Plane,
    rank: Rank,
    attack_cooldown: u32,
    bullet: Rc<Sprite>,
}

impl Enemy {
    /// An enemy of `rank` sitting just above the top edge at `centerx`.
    pub fn new(rank: Rank, centerx: f32, config: &Config, sheet: &SpriteSheet) -> Self {
        let mut plane = Plane::new(
            config.enemy.speed,
            i32::from(rank.get()),
            sheet.enemies[rank.index()].clone(),
            sheet.explosion.clone(),
        );
        plane.rect.set_centerx(centerx);
        plane.rect.set_bottom(0.0);
        Enemy {
            plane,
            rank,
            attack_cooldown: 0,
            bullet: sheet.enemy_bullet.clone(),
        }
    }

    /// Random rank, random column.
    pub fn spawn(rng: &mut impl Rng, config: &Config, sheet: &SpriteSheet) -> Self {
        let rank = Rank::random(rng);
        let centerx = rng.gen_range(0..=config.screen.width);
        Enemy::new(rank, f32::from(centerx), config, sheet)
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Fly down; an enemy below the screen takes a point of damage every
    /// tick until it goes down.
    pub fn advance(&mut self, screen: ScreenConfig) {
        self.plane.rect.y += self.plane.speed();
        if self.plane.rect.top() > f32::from(screen.height) {
            self.plane.kill();
        }
    }

    pub fn attack(&mut self, attack_interval: u32, bullet_speed: f32) -> Option<Bullet> {
        self.attack_cooldown += 1;
        if self.attack_cooldown <= attack_interval {
            return None;
        }
        self.attack_cooldown = 0;
        let origin = (self.plane.rect.centerx(), self.plane.rect.bottom());
        Some(Bullet::enemy(origin, bullet_speed, self.bullet.clone()))
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    /// Positive travels up the screen, negative down.
    speed: f32,
    owner: BulletOwner,
    image: Rc<Sprite>,
}

impl Bullet {
    /// A bullet whose top edge is centred on `origin`.
    pub fn new(owner: BulletOwner, speed: f32, origin: (f32, f32), image: Rc<Sprite>) -> Self {
        let mut rect = Rect::of(&image);
        rect.set_centerx(origin.0);
        rect.set_top(origin.1);
        Bullet {
            rect,
            speed,
            owner,
            image,
        }
    }

    pub fn player(origin: (f32, f32), speed: f32, image: Rc<Sprite>) -> Self {
        Bullet::new(BulletOwner::Player, speed, origin, image)
    }

    pub fn enemy(origin: (f32, f32), speed: f32, image: Rc<Sprite>) -> Self {
        Bullet::new(BulletOwner::Enemy, -speed, origin, image)
    }

    pub fn owner(&self) -> BulletOwner {
        self.owner
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn image(&self) -> &Sprite {
        &self.image
    }

    pub fn advance(&mut self) {
        self.rect.y -= self.speed;
    }

    /// Player bullets leave through the top, enemy bullets through the
    /// bottom.
    pub fn has_exited(&self, screen: ScreenConfig) -> bool {
        match self.owner {
            BulletOwner::Player => self.rect.bottom() < 0.0,
            BulletOwner::Enemy => self.rect.top() > f32::from(screen.height),
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.blit(&self.image, self.rect.cell_x(), self.rect.cell_y());
    }
}
