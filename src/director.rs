/// Session state and the per-tick orchestration.
///
/// Every public function takes the current `GameState` by reference and
/// returns the next one. Randomness comes only through the injected RNG, so a
/// seeded RNG replays a session exactly.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::{self, CollisionReport};
use crate::config::GameConfig;
use crate::entities::{
    Beam, Bullet, Enemy, Explosion, Life, Player, PointItem, Score, PLAYER_START,
};
use crate::group::Group;
use crate::input::HeldKeys;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
    /// Terminal: no further tick changes anything.
    GameOver,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub beams: Group<Beam>,
    pub enemies: Group<Enemy>,
    pub bullets: Group<Bullet>,
    pub explosions: Group<Explosion>,
    pub points: Group<PointItem>,
    pub score: Score,
    pub life: Life,
    pub mode: Mode,
    /// Global tick counter. Counts playing ticks only.
    pub tick: u64,
    pub config: GameConfig,
}

/// Fresh session waiting on the start screen.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        player: Player::new(PLAYER_START, config.player_speed, config.boost_multiplier),
        beams: Group::new(),
        enemies: Group::new(),
        bullets: Group::new(),
        explosions: Group::new(),
        points: Group::new(),
        score: Score::default(),
        life: Life::new(config.initial_lives, config.invulnerable_ticks),
        mode: Mode::Menu,
        tick: 0,
        config,
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// The action key starts the game from the menu and fires while playing.
pub fn start_or_fire(state: &GameState) -> GameState {
    match state.mode {
        Mode::Menu => {
            info!("game started");
            GameState {
                mode: Mode::Playing,
                ..state.clone()
            }
        }
        Mode::Playing => player_fire(state),
        Mode::GameOver => state.clone(),
    }
}

/// Launch one beam along the player's heading.
pub fn player_fire(state: &GameState) -> GameState {
    let mut next = state.clone();
    let beam = Beam::new(&next.player, 0.0, next.config.beam_speed);
    next.beams.add(beam);
    next
}

// ── Per-tick simulation ──────────────────────────────────────────────────────

/// Advance one playing tick. Outside `Mode::Playing` the state is returned
/// unchanged.
pub fn tick(state: &GameState, held: &HeldKeys, rng: &mut impl Rng) -> GameState {
    tick_with_report(state, held, rng).0
}

/// Same as [`tick`], also returning what the collision pass did.
pub fn tick_with_report(
    state: &GameState,
    held: &HeldKeys,
    rng: &mut impl Rng,
) -> (GameState, CollisionReport) {
    if state.mode != Mode::Playing {
        return (state.clone(), CollisionReport::default());
    }
    let mut next = state.clone();

    // ── 1. Spawn timers ──────────────────────────────────────────────────────
    spawn_enemies(&mut next, rng);

    // ── 2. Stopped enemies fire on their cadence ─────────────────────────────
    enemies_fire(&mut next);

    // ── 3. Collisions ────────────────────────────────────────────────────────
    let report = collision::resolve(&mut next, rng);
    if next.mode == Mode::GameOver {
        return (next, report);
    }

    // ── 4. Movement and lifecycle ────────────────────────────────────────────
    next.player.update(held);
    next.beams.update();
    next.enemies.update();
    next.bullets.update();
    next.explosions.update();
    next.life.update();
    next.points.update();

    next.tick += 1;
    (next, report)
}

fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) {
    if state.tick % state.config.enemy_spawn_interval == 0 {
        let enemy = Enemy::grunt(rng);
        debug!(
            tick = state.tick,
            x = enemy.center().x,
            stop_at = enemy.stop_at,
            "grunt spawned"
        );
        state.enemies.add(enemy);
    }
    if state.tick == state.config.boss_spawn_tick {
        info!(tick = state.tick, "boss spawned");
        state.enemies.add(Enemy::boss());
    }
}

fn enemies_fire(state: &mut GameState) {
    let target = state.player.rect;
    let tick = state.tick;
    let volley: Vec<Bullet> = state
        .enemies
        .iter()
        .filter(|enemy| enemy.ready_to_fire(tick))
        .flat_map(|enemy| enemy.shoot(&target))
        .collect();
    state.bullets.extend(volley);
}
