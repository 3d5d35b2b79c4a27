mod common;

use thunder::combat::{check_enemy_attacked, check_player_attacked, PlayerContact};
use thunder::entities::{Bullet, PlaneState};
use thunder::scene::Hostile;

use common::{enemy, player, sheet};

// The test player sits with its top-left cell at (18, 27):
//
//     "  A  "   row 27
//     " /#\ "   row 28
//     "/###\"   row 29

const INVINCIBLE: u32 = 5;

/// A rank-5 enemy whose top row covers the player's nose.
fn rammer() -> Hostile {
    Hostile::Enemy(enemy(5, 16.0, 27.0))
}

fn enemy_bullet_at(x: f32, y: f32) -> Hostile {
    Hostile::Bullet(Bullet::enemy((x + 0.5, y), 1.0, sheet().enemy_bullet))
}

// ── Player vs enemies ─────────────────────────────────────────────────────────

#[test]
fn ramming_costs_both_sides_one_point() {
    let mut p = player();
    let mut hostiles = vec![rammer()];

    let contact = check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false);
    assert_eq!(
        contact,
        PlayerContact::Hit {
            rams: 1,
            shots: 0,
            enemies_downed: 0,
            player_downed: false
        }
    );
    assert_eq!(p.plane.life(), 2);
    assert_eq!(p.invincible(), INVINCIBLE);
    let Hostile::Enemy(e) = &hostiles[0] else {
        panic!("enemy vanished");
    };
    assert_eq!(e.plane.life(), 4);
}

#[test]
fn every_overlapping_enemy_trades_a_point() {
    let mut p = player();
    let mut hostiles = vec![rammer(), Hostile::Enemy(enemy(5, 0.0, 0.0)), rammer()];

    let contact = check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false);
    assert!(matches!(contact, PlayerContact::Hit { rams: 2, .. }));
    assert_eq!(p.plane.life(), 1);
    let lives: Vec<i32> = hostiles
        .iter()
        .map(|h| match h {
            Hostile::Enemy(e) => e.plane.life(),
            Hostile::Bullet(_) => unreachable!(),
        })
        .collect();
    assert_eq!(lives, vec![4, 5, 4]);
}

#[test]
fn pile_up_can_down_the_player_in_one_tick() {
    let mut p = player();
    let mut hostiles = vec![rammer(), rammer(), rammer(), rammer()];

    let contact = check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false);
    assert_eq!(
        contact,
        PlayerContact::Hit {
            rams: 4,
            shots: 0,
            enemies_downed: 0,
            player_downed: true
        }
    );
    assert_eq!(p.plane.state(), PlaneState::Exploding { tick: 0 });
    // Every enemy still pays for the collision.
    assert!(hostiles.iter().all(|h| matches!(h, Hostile::Enemy(e) if e.plane.life() == 4)));
}

#[test]
fn invincibility_window_blocks_every_check_then_expires() {
    let mut p = player();
    let mut hostiles = vec![rammer()];

    check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false);
    for left in (0..INVINCIBLE).rev() {
        let contact = check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false);
        assert_eq!(contact, PlayerContact::Invincible);
        assert_eq!(p.invincible(), left);
        assert_eq!(p.plane.life(), 2);
    }
    let contact = check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false);
    assert!(matches!(contact, PlayerContact::Hit { rams: 1, .. }));
    assert_eq!(p.plane.life(), 1);
}

#[test]
fn third_unblocked_ram_brings_the_player_down() {
    let mut p = player();
    let mut hostiles = vec![rammer()];
    let mut hits = 0;

    while p.plane.is_active() {
        match check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false) {
            PlayerContact::Hit { player_downed, .. } => {
                hits += 1;
                assert_eq!(player_downed, hits == 3);
            }
            PlayerContact::Invincible => {}
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(hits, 3);
    assert_eq!(p.plane.state(), PlaneState::Exploding { tick: 0 });
}

#[test]
fn transparent_overlap_is_not_a_hit() {
    let mut p = player();
    // Boxes overlap at (18, 27), a blank corner of the player sprite.
    let mut hostiles = vec![Hostile::Enemy(enemy(1, 16.0, 27.0))];
    let contact = check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false);
    assert_eq!(contact, PlayerContact::Clear);
    assert_eq!(p.plane.life(), 3);
}

#[test]
fn exploding_enemies_are_harmless() {
    let mut p = player();
    let mut e = enemy(1, 19.0, 28.0);
    e.plane.kill();
    let mut hostiles = vec![Hostile::Enemy(e)];
    assert_eq!(
        check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false),
        PlayerContact::Clear
    );
}

#[test]
fn ram_kills_a_rank_one_enemy() {
    let mut p = player();
    let mut hostiles = vec![Hostile::Enemy(enemy(1, 19.0, 28.0))];
    let contact = check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false);
    assert_eq!(
        contact,
        PlayerContact::Hit {
            rams: 1,
            shots: 0,
            enemies_downed: 1,
            player_downed: false
        }
    );
}

// ── Player vs enemy bullets ───────────────────────────────────────────────────

#[test]
fn enemy_bullets_pass_through_by_default() {
    let mut p = player();
    let mut hostiles = vec![enemy_bullet_at(20.0, 27.0)];
    assert_eq!(
        check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, false),
        PlayerContact::Clear
    );
    assert_eq!(hostiles.len(), 1);
    assert_eq!(p.plane.life(), 3);
}

#[test]
fn lethal_enemy_bullets_are_spent_on_impact() {
    let mut p = player();
    let mut hostiles = vec![enemy_bullet_at(20.0, 27.0)];
    assert_eq!(
        check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, true),
        PlayerContact::Hit {
            rams: 0,
            shots: 1,
            enemies_downed: 0,
            player_downed: false
        }
    );
    assert!(hostiles.is_empty());
    assert_eq!(p.plane.life(), 2);
    assert_eq!(p.invincible(), INVINCIBLE);
}

#[test]
fn lethal_fire_and_a_ram_land_together() {
    let mut p = player();
    let mut hostiles = vec![
        enemy_bullet_at(20.0, 27.0),
        rammer(),
        enemy_bullet_at(0.0, 0.0),
        enemy_bullet_at(19.0, 28.0),
    ];
    let contact = check_player_attacked(&mut p, &mut hostiles, INVINCIBLE, true);
    assert_eq!(
        contact,
        PlayerContact::Hit {
            rams: 1,
            shots: 2,
            enemies_downed: 0,
            player_downed: true
        }
    );
    // The stray bullet far from the player survives.
    assert_eq!(hostiles.len(), 2);
    assert!(matches!(hostiles[1], Hostile::Bullet(_)));
}

// ── Player bullets vs enemy ───────────────────────────────────────────────────

fn player_bullet_at(x: f32, y: f32) -> Bullet {
    Bullet::player((x + 0.5, y), 2.0, sheet().player_bullet)
}

#[test]
fn bullet_hit_destroys_bullet_and_damages_enemy() {
    let mut e = enemy(3, 10.0, 10.0);
    let mut bullets = vec![player_bullet_at(0.0, 0.0), player_bullet_at(12.0, 10.0)];

    assert_eq!(check_enemy_attacked(&mut e, &mut bullets), 1);
    assert_eq!(e.plane.life(), 2);
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].rect.x, 0.0);
}

#[test]
fn every_overlapping_bullet_counts() {
    let mut e = enemy(3, 10.0, 10.0);
    let mut bullets = vec![player_bullet_at(10.0, 10.0), player_bullet_at(11.0, 10.0)];
    assert_eq!(check_enemy_attacked(&mut e, &mut bullets), 2);
    assert_eq!(e.plane.life(), 1);
    assert!(bullets.is_empty());
}

#[test]
fn bullets_stop_once_the_enemy_goes_down() {
    let mut e = enemy(1, 10.0, 10.0);
    let mut bullets = vec![player_bullet_at(10.0, 10.0), player_bullet_at(11.0, 10.0)];
    assert_eq!(check_enemy_attacked(&mut e, &mut bullets), 1);
    assert!(!e.plane.is_active());
    assert_eq!(bullets.len(), 1);
}
