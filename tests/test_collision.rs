use rand::rngs::StdRng;
use rand::SeedableRng;

use beam_barrage::collision::resolve;
use beam_barrage::config::GameConfig;
use beam_barrage::director::{init_state, GameState, Mode};
use beam_barrage::entities::*;
use beam_barrage::geometry::{Rect, Vec2};

fn playing_state(config: GameConfig) -> GameState {
    let mut s = init_state(config);
    s.mode = Mode::Playing;
    s
}

fn no_drops() -> GameConfig {
    GameConfig {
        point_item_chance: 0.0,
        ..GameConfig::default()
    }
}

fn beam_at(center: Vec2) -> Beam {
    Beam {
        rect: Rect::from_center(center, BEAM_SIZE),
        direction: Vec2::new(1.0, 0.0),
        angle: 0.0,
        speed: 10.0,
        alive: true,
    }
}

fn bullet_on_player(s: &GameState) -> Bullet {
    Bullet::new(Vec2::new(0.0, 1.0), s.player.rect.center(), 6.0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Beams vs enemies ──────────────────────────────────────────────────────────

#[test]
fn single_beam_destroys_grunt() {
    let mut s = playing_state(no_drops());
    let spot = Vec2::new(500.0, 200.0);
    s.enemies.add(Enemy::grunt_at(spot, 1, 300.0));
    s.beams.add(beam_at(spot));

    let report = resolve(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert!(s.beams.is_empty());
    assert_eq!(s.explosions.len(), 1);
    let blast = s.explosions.iter().next().unwrap();
    assert_eq!(blast.rect.center(), spot);
    assert_eq!(blast.life, 100);
    assert_eq!(s.score.value, 10);
    assert_eq!(s.player.appearance, Appearance::Cheer);
    assert!(s.points.is_empty());
    assert_eq!(report.hits, 1);
    assert_eq!(report.kills, 1);
}

#[test]
fn kill_drops_item_when_chance_is_certain() {
    let mut s = playing_state(GameConfig {
        point_item_chance: 1.0,
        ..GameConfig::default()
    });
    let spot = Vec2::new(500.0, 200.0);
    s.enemies.add(Enemy::grunt_at(spot, 1, 300.0));
    s.beams.add(beam_at(spot));

    let report = resolve(&mut s, &mut seeded_rng());

    assert_eq!(report.drops, 1);
    assert_eq!(s.points.len(), 1);
    assert_eq!(s.points.iter().next().unwrap().rect.center(), spot);
}

#[test]
fn each_beam_deals_its_own_hit() {
    let mut s = playing_state(no_drops());
    let boss = Enemy::boss();
    let spot = boss.center();
    s.enemies.add(boss);
    for dx in [-20.0, 0.0, 20.0] {
        s.beams.add(beam_at(spot + Vec2::new(dx, 0.0)));
    }

    let report = resolve(&mut s, &mut seeded_rng());

    assert_eq!(report.hits, 3);
    assert_eq!(report.kills, 0);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies.iter().next().unwrap().hp, 17);
    assert_eq!(s.explosions.len(), 3);
    assert!(s.beams.is_empty());
    assert_eq!(s.score.value, 0);
    assert_eq!(s.player.appearance, Appearance::Facing);
}

#[test]
fn boss_dies_on_its_twentieth_hit() {
    let mut s = playing_state(no_drops());
    let mut boss = Enemy::boss();
    boss.hp = 1;
    let spot = boss.center();
    s.enemies.add(boss);
    s.beams.add(beam_at(spot));
    s.beams.add(beam_at(spot));

    let report = resolve(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert_eq!(report.kills, 1);
    assert_eq!(s.explosions.len(), 2);
    assert_eq!(s.score.value, 10);
}

#[test]
fn one_beam_is_consumed_by_the_first_enemy_it_touches() {
    let mut s = playing_state(no_drops());
    let spot = Vec2::new(500.0, 200.0);
    s.enemies.add(Enemy::grunt_at(spot, 1, 300.0));
    s.enemies.add(Enemy::grunt_at(spot, 2, 300.0));
    s.beams.add(beam_at(spot));

    resolve(&mut s, &mut seeded_rng());

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies.iter().next().unwrap().kind, EnemyKind::Grunt(2));
    assert_eq!(s.score.value, 10);
}

#[test]
fn missed_beam_is_untouched() {
    let mut s = playing_state(no_drops());
    s.enemies.add(Enemy::grunt_at(Vec2::new(500.0, 200.0), 1, 300.0));
    s.beams.add(beam_at(Vec2::new(100.0, 500.0)));

    let report = resolve(&mut s, &mut seeded_rng());

    assert_eq!(report, Default::default());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.beams.len(), 1);
}

#[test]
fn drop_rate_converges_to_configured_chance() {
    let mut template = playing_state(GameConfig::default());
    let spot = Vec2::new(500.0, 200.0);
    template.enemies.add(Enemy::grunt_at(spot, 1, 300.0));
    template.beams.add(beam_at(spot));

    let mut rng = seeded_rng();
    let trials = 10_000;
    let mut drops = 0;
    for _ in 0..trials {
        let mut s = template.clone();
        drops += resolve(&mut s, &mut rng).drops;
    }
    let rate = drops as f64 / trials as f64;
    assert!((rate - 0.1).abs() < 0.015, "drop rate {rate}");
}

// ── Bullets vs player ─────────────────────────────────────────────────────────

#[test]
fn bullet_hit_costs_a_life_and_plays_blast() {
    let mut s = playing_state(GameConfig::default());
    let b = bullet_on_player(&s);
    s.bullets.add(b);

    let report = resolve(&mut s, &mut seeded_rng());

    assert!(s.bullets.is_empty());
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(s.explosions.iter().next().unwrap().life, 10);
    assert_eq!(s.life.value, 2);
    assert_eq!(s.life.invulnerable, 100);
    assert_eq!(s.player.appearance, Appearance::Hurt);
    assert!(s.player.is_hyper());
    assert_eq!(report.bullets_absorbed, 1);
    assert_eq!(report.lives_lost, 1);
    assert_eq!(s.mode, Mode::Playing);
}

#[test]
fn simultaneous_hits_cost_one_life() {
    let mut s = playing_state(GameConfig::default());
    let b = bullet_on_player(&s);
    s.bullets.add(b.clone());
    s.bullets.add(b);

    let report = resolve(&mut s, &mut seeded_rng());

    assert_eq!(s.life.value, 2);
    assert_eq!(s.explosions.len(), 2);
    assert_eq!(report.bullets_absorbed, 2);
    assert_eq!(report.lives_lost, 1);
}

#[test]
fn hit_while_invulnerable_still_blasts() {
    let mut s = playing_state(GameConfig::default());
    s.life.invulnerable = 40;
    let b = bullet_on_player(&s);
    s.bullets.add(b);

    let report = resolve(&mut s, &mut seeded_rng());

    assert_eq!(s.life.value, 3);
    assert_eq!(s.explosions.len(), 1);
    assert!(s.bullets.is_empty());
    assert_eq!(report.lives_lost, 0);
}

#[test]
fn last_life_ends_the_game_before_pickups() {
    let mut s = playing_state(GameConfig::default());
    s.life.value = 1;
    let b = bullet_on_player(&s);
    s.bullets.add(b);
    s.points.add(PointItem::new(s.player.rect.center()));

    let report = resolve(&mut s, &mut seeded_rng());

    assert_eq!(s.life.value, 0);
    assert_eq!(s.mode, Mode::GameOver);
    assert_eq!(s.points.len(), 1);
    assert_eq!(report.items_collected, 0);
}

// ── Items vs player ───────────────────────────────────────────────────────────

#[test]
fn pickups_grant_bonus_once_per_tick() {
    let mut s = playing_state(GameConfig::default());
    let c = s.player.rect.center();
    s.points.add(PointItem::new(c));
    s.points.add(PointItem::new(c + Vec2::new(5.0, 5.0)));
    s.points.add(PointItem::new(Vec2::new(100.0, 100.0)));

    let report = resolve(&mut s, &mut seeded_rng());

    assert_eq!(report.items_collected, 2);
    assert_eq!(s.points.len(), 1);
    assert_eq!(s.score.value, 50);
}
