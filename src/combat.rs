//! Collision-driven combat.
//!
//! Both checks run inside the registry's update pass and borrow the
//! collections only for the duration of the call.

use crate::entities::{Bullet, Enemy, Player};
use crate::scene::Hostile;
use crate::sprite::collide_mask;

/// What the player ran into this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerContact {
    /// Still inside the post-hit grace period; nothing was tested.
    Invincible,
    Clear,
    /// Every overlap costs the player one point and the enemy plane one
    /// point.  `shots` counts enemy bullets, which only land when enemy
    /// fire is lethal.
    Hit {
        rams: u32,
        shots: u32,
        enemies_downed: u32,
        player_downed: bool,
    },
}

/// Test the player against the whole enemy group.
///
/// Invincibility is checked once per tick.  Past that, every active enemy
/// whose mask overlaps the player's takes one point and deals one; lethal
/// enemy bullets that overlap are spent and deal one point each.
pub fn check_player_attacked(
    player: &mut Player,
    hostiles: &mut Vec<Hostile>,
    invincible_time: u32,
    bullets_collide: bool,
) -> PlayerContact {
    if player.tick_invincibility() {
        return PlayerContact::Invincible;
    }
    if !player.plane.is_active() {
        return PlayerContact::Clear;
    }

    let (rect, sprite) = (&player.plane.rect, player.plane.image());
    let (mut rams, mut shots, mut enemies_downed) = (0, 0, 0);
    hostiles.retain_mut(|hostile| match hostile {
        Hostile::Enemy(enemy) => {
            if enemy.plane.collides_with(rect, sprite) {
                rams += 1;
                if enemy.plane.kill() {
                    enemies_downed += 1;
                }
            }
            true
        }
        Hostile::Bullet(bullet) => {
            let hit = bullets_collide && collide_mask(&bullet.rect, bullet.image(), rect, sprite);
            if hit {
                shots += 1;
            }
            !hit
        }
    });
    if rams + shots == 0 {
        return PlayerContact::Clear;
    }

    let mut player_downed = false;
    for _ in 0..rams + shots {
        player_downed |= player.take_hit(invincible_time);
    }
    PlayerContact::Hit {
        rams,
        shots,
        enemies_downed,
        player_downed,
    }
}

/// Test one enemy against every player bullet.  Each overlapping bullet is
/// destroyed on the spot and deals one point; testing stops once the enemy
/// goes down.  Returns the number of hits.
pub fn check_enemy_attacked(enemy: &mut Enemy, player_bullets: &mut Vec<Bullet>) -> u32 {
    let mut hits = 0;
    let mut i = 0;
    while i < player_bullets.len() && enemy.plane.is_active() {
        let bullet = &player_bullets[i];
        if enemy.plane.collides_with(&bullet.rect, bullet.image()) {
            player_bullets.remove(i);
            enemy.plane.kill();
            hits += 1;
        } else {
            i += 1;
        }
    }
    hits
}
