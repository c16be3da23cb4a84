/// Game entities and their per-tick behaviour.
///
/// Each entity owns its rectangle and velocity. Self-removal is expressed
/// through [`Actor::is_alive`]; the owning [`crate::group::Group`] drops dead
/// members after every bulk update.

use rand::Rng;

use crate::geometry::{in_bounds, orientation, Rect, Vec2, WORLD_HEIGHT, WORLD_WIDTH};
use crate::group::{Actor, Body};
use crate::input::HeldKeys;

// ── Sizes and per-kind constants ─────────────────────────────────────────────

pub const PLAYER_SIZE: Vec2 = Vec2::new(64.0, 64.0);
pub const PLAYER_START: Vec2 = Vec2::new(900.0, 400.0);
pub const BEAM_SIZE: Vec2 = Vec2::new(48.0, 12.0);
pub const BULLET_SIZE: Vec2 = Vec2::new(20.0, 20.0);
pub const GRUNT_SIZE: Vec2 = Vec2::new(56.0, 48.0);
pub const BOSS_SIZE: Vec2 = Vec2::new(160.0, 160.0);
pub const EXPLOSION_SIZE: Vec2 = Vec2::new(64.0, 64.0);
pub const POINT_ITEM_SIZE: Vec2 = Vec2::new(24.0, 24.0);

const GRUNT_DESCENT: f32 = 6.0;
const GRUNT_FIRE_INTERVAL: u64 = 50;
const GRUNT_BULLET_SPEED: f32 = 6.0;
const GRUNT_HP: u32 = 1;
const GRUNT_STOP_MIN: i32 = 50;

const BOSS_SPAWN: Vec2 = Vec2::new(WORLD_WIDTH / 2.0, -200.0);
const BOSS_DESCENT: f32 = 3.0;
const BOSS_STOP_AT: f32 = WORLD_HEIGHT / 4.0;
const BOSS_FIRE_INTERVAL: u64 = 5;
const BOSS_BULLET_SPEED: f32 = 8.0;
const BOSS_HP: u32 = 20;
/// Angular offsets of the boss's three-way shot, in degrees.
const BOSS_SPREAD: [f32; 3] = [-20.0, 0.0, 20.0];

const POINT_ITEM_FALL: f32 = 2.0;

// ── Player ───────────────────────────────────────────────────────────────────

/// One of the eight directions the player can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Heading {
    /// `None` for the zero displacement.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Heading> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Heading::East),
            (1, -1) => Some(Heading::NorthEast),
            (0, -1) => Some(Heading::North),
            (-1, -1) => Some(Heading::NorthWest),
            (-1, 0) => Some(Heading::West),
            (-1, 1) => Some(Heading::SouthWest),
            (0, 1) => Some(Heading::South),
            (1, 1) => Some(Heading::SouthEast),
            _ => None,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::East => (1, 0),
            Heading::NorthEast => (1, -1),
            Heading::North => (0, -1),
            Heading::NorthWest => (-1, -1),
            Heading::West => (-1, 0),
            Heading::SouthWest => (-1, 1),
            Heading::South => (0, 1),
            Heading::SouthEast => (1, 1),
        }
    }

    /// Screen angle in degrees, east = 0, north = 90.
    pub fn angle_degrees(self) -> f32 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32).angle_degrees()
    }
}

/// Which player image is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appearance {
    /// Rotated to the current heading.
    Facing,
    /// Shown after destroying an enemy.
    Cheer,
    /// Shown after being struck by a bullet.
    Hurt,
}

/// Visual guard state. Hyper marks the invulnerability window on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Normal,
    Hyper { remaining: i32 },
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub heading: Heading,
    pub appearance: Appearance,
    pub guard: Guard,
    /// Speed used on the most recent move.
    pub speed: f32,
    pub base_speed: f32,
    pub boost_multiplier: f32,
}

impl Player {
    pub fn new(center: Vec2, base_speed: f32, boost_multiplier: f32) -> Self {
        Player {
            rect: Rect::from_center(center, PLAYER_SIZE),
            heading: Heading::East,
            appearance: Appearance::Facing,
            guard: Guard::Normal,
            speed: base_speed,
            base_speed,
            boost_multiplier,
        }
    }

    /// Apply the held movement keys. A move that would leave the screen is
    /// undone entirely rather than clamped to the edge.
    pub fn move_with(&mut self, held: &HeldKeys) {
        self.speed = if held.boost {
            self.base_speed * self.boost_multiplier
        } else {
            self.base_speed
        };

        let (dx, dy) = held.displacement();
        let before = self.rect;
        self.rect = self
            .rect
            .translated(Vec2::new(dx as f32, dy as f32) * self.speed);
        if !in_bounds(&self.rect) {
            self.rect = before;
        }

        if let Some(heading) = Heading::from_delta(dx, dy) {
            self.heading = heading;
            self.appearance = Appearance::Facing;
        }
    }

    pub fn enter_hyper(&mut self, duration: i32) {
        self.guard = Guard::Hyper {
            remaining: duration,
        };
    }

    pub fn is_hyper(&self) -> bool {
        matches!(self.guard, Guard::Hyper { .. })
    }

    fn tick_guard(&mut self) {
        if let Guard::Hyper { remaining } = self.guard {
            let remaining = remaining - 1;
            self.guard = if remaining < 0 {
                Guard::Normal
            } else {
                Guard::Hyper { remaining }
            };
        }
    }

    pub fn change_appearance(&mut self, appearance: Appearance) {
        self.appearance = appearance;
    }

    /// Per-tick update: movement, then the hyper countdown.
    pub fn update(&mut self, held: &HeldKeys) {
        self.move_with(held);
        self.tick_guard();
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Player projectile.
#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    /// Unit direction.
    pub direction: Vec2,
    /// Screen angle of `direction`, kept for sprite rotation.
    pub angle: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Beam {
    /// Fire from `player` along its heading rotated by `angle_offset` degrees.
    /// The beam appears one player-length ahead of the player's centre.
    pub fn new(player: &Player, angle_offset: f32, speed: f32) -> Self {
        let angle = player.heading.angle_degrees() + angle_offset;
        let direction = Vec2::from_angle(angle);
        let center = player.rect.center()
            + Vec2::new(player.rect.w * direction.x, player.rect.h * direction.y);
        Beam {
            rect: Rect::from_center(center, rotated_extent(BEAM_SIZE, angle)),
            direction,
            angle,
            speed,
            alive: true,
        }
    }
}

/// Axis-aligned extent of a `size` box rotated by `degrees`.
fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(
        size.x * cos.abs() + size.y * sin.abs(),
        size.x * sin.abs() + size.y * cos.abs(),
    )
}

impl Body for Beam {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Actor for Beam {
    fn update(&mut self) {
        self.rect = self.rect.translated(self.direction * self.speed);
        if !in_bounds(&self.rect) {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Enemy projectile.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    pub direction: Vec2,
    pub speed: f32,
    pub alive: bool,
}

impl Bullet {
    pub fn new(direction: Vec2, center: Vec2, speed: f32) -> Self {
        Bullet {
            rect: Rect::from_center(center, BULLET_SIZE),
            direction,
            speed,
            alive: true,
        }
    }
}

impl Body for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Actor for Bullet {
    fn update(&mut self) {
        self.rect = self.rect.translated(self.direction * self.speed);
        if !in_bounds(&self.rect) {
            self.alive = false;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Regular enemy; the variant (1..=3) only selects its image.
    Grunt(u8),
    Boss,
}

/// How an enemy's shot is laid out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotPattern {
    /// One bullet straight at the target.
    Aimed { speed: f32 },
    /// One bullet per offset, rotated from the line to the target.
    Spread { speed: f32, offsets: [f32; 3] },
}

impl EnemyKind {
    pub fn pattern(self) -> ShotPattern {
        match self {
            EnemyKind::Grunt(_) => ShotPattern::Aimed {
                speed: GRUNT_BULLET_SPEED,
            },
            EnemyKind::Boss => ShotPattern::Spread {
                speed: BOSS_BULLET_SPEED,
                offsets: BOSS_SPREAD,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Descending,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub velocity: Vec2,
    /// Centre y at which descent halts. Fixed at spawn.
    pub stop_at: f32,
    pub state: EnemyState,
    pub hp: u32,
    /// Fires on ticks that are a multiple of this, once stopped.
    pub fire_interval: u64,
}

impl Enemy {
    /// Grunt with a random image, column and stop boundary.
    pub fn grunt(rng: &mut impl Rng) -> Self {
        let variant = rng.gen_range(1..=3);
        let x = rng.gen_range(0..=WORLD_WIDTH as i32) as f32;
        let stop_at = rng.gen_range(GRUNT_STOP_MIN..=(WORLD_HEIGHT / 2.0) as i32) as f32;
        Enemy::grunt_at(Vec2::new(x, 0.0), variant, stop_at)
    }

    pub fn grunt_at(center: Vec2, variant: u8, stop_at: f32) -> Self {
        Enemy {
            kind: EnemyKind::Grunt(variant),
            rect: Rect::from_center(center, GRUNT_SIZE),
            velocity: Vec2::new(0.0, GRUNT_DESCENT),
            stop_at,
            state: EnemyState::Descending,
            hp: GRUNT_HP,
            fire_interval: GRUNT_FIRE_INTERVAL,
        }
    }

    /// The boss enters centred, above the top edge.
    pub fn boss() -> Self {
        Enemy {
            kind: EnemyKind::Boss,
            rect: Rect::from_center(BOSS_SPAWN, BOSS_SIZE),
            velocity: Vec2::new(0.0, BOSS_DESCENT),
            stop_at: BOSS_STOP_AT,
            state: EnemyState::Descending,
            hp: BOSS_HP,
            fire_interval: BOSS_FIRE_INTERVAL,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn take_hit(&mut self) {
        self.hp = self.hp.saturating_sub(1);
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }

    /// Fire cadence follows the global tick, not the enemy's own age.
    pub fn ready_to_fire(&self, tick: u64) -> bool {
        self.state == EnemyState::Stopped && tick % self.fire_interval == 0
    }

    /// Bullets aimed at `target`, leaving from this enemy's centre.
    pub fn shoot(&self, target: &Rect) -> Vec<Bullet> {
        let aim = orientation(&self.rect, target);
        let center = self.center();
        match self.kind.pattern() {
            ShotPattern::Aimed { speed } => vec![Bullet::new(aim, center, speed)],
            ShotPattern::Spread { speed, offsets } => {
                let base = aim.angle_degrees();
                offsets
                    .iter()
                    .map(|offset| Bullet::new(Vec2::from_angle(base + offset), center, speed))
                    .collect()
            }
        }
    }
}

impl Body for Enemy {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Actor for Enemy {
    fn update(&mut self) {
        if self.state == EnemyState::Descending {
            self.rect = self.rect.translated(self.velocity);
            if self.center().y >= self.stop_at {
                self.velocity.y = 0.0;
                self.state = EnemyState::Stopped;
            }
        }
    }

    fn is_alive(&self) -> bool {
        !self.is_destroyed()
    }
}

// ── Effects and pickups ──────────────────────────────────────────────────────

/// Short-lived blast left where something was hit.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    /// Remaining ticks; removed once negative.
    pub life: i32,
}

impl Explosion {
    pub fn new(center: Vec2, life: i32) -> Self {
        Explosion {
            rect: Rect::from_center(center, EXPLOSION_SIZE),
            life,
        }
    }

    /// Alternates between the two blast images every ten ticks.
    pub fn frame(&self) -> usize {
        self.life.div_euclid(10).rem_euclid(2) as usize
    }
}

impl Body for Explosion {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Actor for Explosion {
    fn update(&mut self) {
        self.life -= 1;
    }

    fn is_alive(&self) -> bool {
        self.life >= 0
    }
}

/// Bonus dropped by a destroyed enemy; falls until collected or off-screen.
#[derive(Clone, Debug)]
pub struct PointItem {
    pub rect: Rect,
    pub velocity: Vec2,
}

impl PointItem {
    pub fn new(center: Vec2) -> Self {
        PointItem {
            rect: Rect::from_center(center, POINT_ITEM_SIZE),
            velocity: Vec2::new(0.0, POINT_ITEM_FALL),
        }
    }
}

impl Body for PointItem {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Actor for PointItem {
    fn update(&mut self) {
        self.rect = self.rect.translated(self.velocity);
    }

    fn is_alive(&self) -> bool {
        self.rect.top() <= WORLD_HEIGHT
    }
}

// ── Counters ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub value: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }
}

/// Remaining lives plus the invulnerability countdown that gates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Life {
    pub value: u32,
    pub invulnerable: u32,
    pub window: u32,
}

impl Life {
    pub fn new(lives: u32, window: u32) -> Self {
        Life {
            value: lives,
            invulnerable: 0,
            window,
        }
    }

    /// Lose one life unless invulnerable or already out. A successful loss
    /// opens a new invulnerability window. Returns whether a life was lost.
    pub fn decrease(&mut self) -> bool {
        if self.invulnerable == 0 && self.value > 0 {
            self.value -= 1;
            self.invulnerable = self.window;
            return true;
        }
        false
    }

    pub fn is_depleted(&self) -> bool {
        self.value == 0
    }

    pub fn update(&mut self) {
        self.invulnerable = self.invulnerable.saturating_sub(1);
    }
}
