/// Drawing, decoupled from any output device.
///
/// The core only knows logical image handles ([`Sprite`]) and a draw
/// primitive ([`Canvas::blit`]); the front end owns the actual images.

use std::io;

use crate::director::GameState;
use crate::entities::{
    Appearance, Beam, Bullet, Enemy, EnemyKind, Explosion, Heading, PointItem,
};
use crate::geometry::{Rect, Vec2, WORLD_HEIGHT, WORLD_WIDTH};
use crate::group::{Body, Group};

/// Logical image handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sprite {
    /// One background tile; the scroll alternates plain and flipped copies.
    Background { flipped: bool },
    Player {
        heading: Heading,
        appearance: Appearance,
        /// Drawn distorted while hyper.
        distorted: bool,
    },
    /// Beam rotated to `angle` degrees.
    Beam { angle: f32 },
    Bullet,
    Alien(u8),
    Boss,
    Explosion { frame: usize },
    PointItem,
}

/// Text styles the core asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Title,
    Hint,
    Score,
    Life,
    Alert,
}

/// Draw target supplied by the front end.
pub trait Canvas {
    fn blit(&mut self, sprite: Sprite, rect: &Rect) -> io::Result<()>;
    /// Draw `text` centred on `at`.
    fn label(&mut self, text: &str, at: Vec2, tone: Tone) -> io::Result<()>;
}

/// Entities that know which image represents them.
pub trait Drawable: Body {
    fn sprite(&self) -> Sprite;
}

impl Drawable for Beam {
    fn sprite(&self) -> Sprite {
        Sprite::Beam { angle: self.angle }
    }
}

impl Drawable for Bullet {
    fn sprite(&self) -> Sprite {
        Sprite::Bullet
    }
}

impl Drawable for Enemy {
    fn sprite(&self) -> Sprite {
        match self.kind {
            EnemyKind::Grunt(variant) => Sprite::Alien(variant),
            EnemyKind::Boss => Sprite::Boss,
        }
    }
}

impl Drawable for Explosion {
    fn sprite(&self) -> Sprite {
        Sprite::Explosion {
            frame: self.frame(),
        }
    }
}

impl Drawable for PointItem {
    fn sprite(&self) -> Sprite {
        Sprite::PointItem
    }
}

pub const SCORE_ANCHOR: Vec2 = Vec2::new(100.0, WORLD_HEIGHT - 50.0);
pub const LIFE_ANCHOR: Vec2 = Vec2::new(900.0, 600.0);

pub fn draw_group<C: Canvas, T: Drawable>(canvas: &mut C, group: &Group<T>) -> io::Result<()> {
    for member in group {
        canvas.blit(member.sprite(), &member.rect())?;
    }
    Ok(())
}

/// Background tiles for the given tick: three stacked copies scrolled down
/// by `tick % (2 * HEIGHT)`.
pub fn background_tiles(tick: u64) -> [(Sprite, Rect); 3] {
    let offset = (tick % (WORLD_HEIGHT as u64 * 2)) as f32;
    let tile = |flipped: bool, y: f32| {
        (
            Sprite::Background { flipped },
            Rect {
                x: 0.0,
                y,
                w: WORLD_WIDTH,
                h: WORLD_HEIGHT,
            },
        )
    };
    [
        tile(false, offset),
        tile(true, offset - WORLD_HEIGHT),
        tile(false, offset - WORLD_HEIGHT * 2.0),
    ]
}

/// One playing frame, in the same order the tick updates things.
pub fn draw_frame<C: Canvas>(canvas: &mut C, state: &GameState) -> io::Result<()> {
    for (sprite, rect) in background_tiles(state.tick) {
        canvas.blit(sprite, &rect)?;
    }

    let player = &state.player;
    canvas.blit(
        Sprite::Player {
            heading: player.heading,
            appearance: player.appearance,
            distorted: player.is_hyper(),
        },
        &player.rect,
    )?;

    draw_group(canvas, &state.beams)?;
    draw_group(canvas, &state.enemies)?;
    draw_group(canvas, &state.bullets)?;
    draw_group(canvas, &state.explosions)?;
    canvas.label(
        &format!("Lives: {}", state.life.value),
        LIFE_ANCHOR,
        Tone::Life,
    )?;
    canvas.label(
        &format!("Score: {}", state.score.value),
        SCORE_ANCHOR,
        Tone::Score,
    )?;
    draw_group(canvas, &state.points)?;
    Ok(())
}

pub fn draw_menu<C: Canvas>(canvas: &mut C) -> io::Result<()> {
    let center = Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);
    canvas.label("BEAM BARRAGE", center - Vec2::new(0.0, 50.0), Tone::Title)?;
    canvas.label(
        "Press SPACE to start",
        center + Vec2::new(0.0, 100.0),
        Tone::Hint,
    )?;
    Ok(())
}

pub fn draw_game_over<C: Canvas>(canvas: &mut C) -> io::Result<()> {
    canvas.label(
        "GAME OVER",
        Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
        Tone::Alert,
    )
}
