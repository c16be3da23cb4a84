/// Per-tick collision resolution.
///
/// Passes run in a fixed order because later ones see the removals made by
/// earlier ones:
///
/// 1. beams against enemies (damage, kills, score, item drops)
/// 2. bullets against the player (impact blast, life loss, game over)
/// 3. point items against the player (pickup bonus)

use rand::Rng;
use tracing::{debug, info};

use crate::director::{GameState, Mode};
use crate::entities::{Appearance, Explosion, PointItem};

/// What one resolver pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Beam hits landed, one per beam.
    pub hits: u32,
    pub kills: u32,
    pub drops: u32,
    /// Bullets that struck the player.
    pub bullets_absorbed: u32,
    pub lives_lost: u32,
    pub items_collected: u32,
}

pub fn resolve(state: &mut GameState, rng: &mut impl Rng) -> CollisionReport {
    let mut report = CollisionReport::default();
    beams_vs_enemies(state, rng, &mut report);
    bullets_vs_player(state, &mut report);
    if state.mode == Mode::GameOver {
        return report;
    }
    items_vs_player(state, &mut report);
    report
}

fn beams_vs_enemies(state: &mut GameState, rng: &mut impl Rng, report: &mut CollisionReport) {
    let config = state.config;

    for enemy in state.enemies.iter_mut() {
        let beams = state.beams.drain_overlapping(&enemy.rect);
        if beams.is_empty() {
            continue;
        }
        for _ in &beams {
            state
                .explosions
                .add(Explosion::new(enemy.center(), config.kill_explosion_life));
            enemy.take_hit();
        }
        report.hits += beams.len() as u32;

        if enemy.is_destroyed() {
            report.kills += 1;
            state.player.change_appearance(Appearance::Cheer);
            state.score.add(config.kill_reward);
            debug!(boss = enemy.is_boss(), score = state.score.value, "enemy destroyed");
            if rng.gen_bool(config.point_item_chance) {
                report.drops += 1;
                state.points.add(PointItem::new(enemy.center()));
            }
        }
    }

    state.enemies.retain(|enemy| !enemy.is_destroyed());
}

/// One pass per bullet: the impact blast always plays, the life loss only
/// lands outside the invulnerability window.
fn bullets_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let struck = state.bullets.drain_overlapping(&state.player.rect);
    for bullet in &struck {
        state.explosions.add(Explosion::new(
            bullet.rect.center(),
            state.config.hit_explosion_life,
        ));
        state.player.change_appearance(Appearance::Hurt);
        if state.life.decrease() {
            report.lives_lost += 1;
            state.player.enter_hyper(state.config.invulnerable_ticks as i32);
            info!(lives = state.life.value, tick = state.tick, "player hit");
        }
    }
    report.bullets_absorbed += struck.len() as u32;

    if state.life.is_depleted() {
        info!(score = state.score.value, tick = state.tick, "game over");
        state.mode = Mode::GameOver;
    }
}

fn items_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let picked = state.points.drain_overlapping(&state.player.rect);
    if !picked.is_empty() {
        report.items_collected += picked.len() as u32;
        state.score.add(state.config.point_item_bonus);
    }
}
