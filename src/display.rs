/// Rendering layer. All terminal I/O lives here.
///
/// The simulation draws through [`Canvas`]; this module scales world
/// coordinates onto the terminal grid and looks each [`Sprite`] up in the
/// sprite sheet.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use beam_barrage::director::GameState;
use beam_barrage::entities::{Appearance, Heading};
use beam_barrage::geometry::{Rect, Vec2, WORLD_HEIGHT, WORLD_WIDTH};
use beam_barrage::render::{self, Canvas, Sprite, Tone};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STAR: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HYPER: Color = Color::Magenta;
const C_BEAM: Color = Color::Cyan;
const C_BULLET: Color = Color::Magenta;
const C_BOSS: Color = Color::Red;
const C_EXPLOSION: Color = Color::Yellow;
const C_POINT: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

const STAR_COUNT: u32 = 48;

// ── Sprite sheet ──────────────────────────────────────────────────────────────

/// Terminal artwork for one sprite: glyph rows drawn centred on its rect.
#[derive(Clone, Copy, Debug)]
pub struct Glyph {
    pub rows: &'static [&'static str],
    pub color: Color,
}

/// Artwork for every sprite handle, built once and shared by reference.
pub struct SpriteSheet {
    aliens: [Glyph; 3],
    boss: Glyph,
    explosion: [Glyph; 2],
}

impl SpriteSheet {
    pub fn new() -> Self {
        SpriteSheet {
            aliens: [
                Glyph {
                    rows: &["«▼»"],
                    color: Color::Green,
                },
                Glyph {
                    rows: &["(◎)"],
                    color: Color::Red,
                },
                Glyph {
                    rows: &["<Ô>"],
                    color: Color::Cyan,
                },
            ],
            boss: Glyph {
                rows: &["╔═▼═╗", "║◉ ◉║", "╚╦═╦╝"],
                color: C_BOSS,
            },
            explosion: [
                Glyph {
                    rows: &["✶"],
                    color: C_EXPLOSION,
                },
                Glyph {
                    rows: &["✺"],
                    color: Color::DarkYellow,
                },
            ],
        }
    }

    /// `None` for sprites drawn procedurally (the background).
    pub fn glyph(&self, sprite: Sprite) -> Option<Glyph> {
        let glyph = match sprite {
            Sprite::Background { .. } => return None,
            Sprite::Player {
                heading,
                appearance,
                distorted,
            } => {
                let color = if distorted { C_PLAYER_HYPER } else { C_PLAYER };
                let rows: &'static [&'static str] = match appearance {
                    Appearance::Cheer => &["☺"],
                    Appearance::Hurt => &["☹"],
                    Appearance::Facing => heading_arrow(heading),
                };
                Glyph { rows, color }
            }
            Sprite::Beam { angle } => Glyph {
                rows: beam_stroke(angle),
                color: C_BEAM,
            },
            Sprite::Bullet => Glyph {
                rows: &["•"],
                color: C_BULLET,
            },
            Sprite::Alien(variant) => {
                let index = (variant.clamp(1, 3) - 1) as usize;
                self.aliens[index]
            }
            Sprite::Boss => self.boss,
            Sprite::Explosion { frame } => self.explosion[frame % 2],
            Sprite::PointItem => Glyph {
                rows: &["◆"],
                color: C_POINT,
            },
        };
        Some(glyph)
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        SpriteSheet::new()
    }
}

fn heading_arrow(heading: Heading) -> &'static [&'static str] {
    match heading {
        Heading::East => &["→"],
        Heading::NorthEast => &["↗"],
        Heading::North => &["↑"],
        Heading::NorthWest => &["↖"],
        Heading::West => &["←"],
        Heading::SouthWest => &["↙"],
        Heading::South => &["↓"],
        Heading::SouthEast => &["↘"],
    }
}

fn beam_stroke(angle: f32) -> &'static [&'static str] {
    // Fold to [0, 180): a stroke looks the same in both directions.
    let folded = angle.rem_euclid(180.0);
    if !(22.5..157.5).contains(&folded) {
        &["─"]
    } else if folded < 67.5 {
        &["/"]
    } else if folded < 112.5 {
        &["│"]
    } else {
        &["\\"]
    }
}

// ── Terminal canvas ───────────────────────────────────────────────────────────

/// Maps world space onto the bordered play area of the terminal.
///
/// Layout: rows `0..rows-1` hold the bordered field, the last row holds the
/// controls hint.
pub struct TerminalCanvas<'a, W: Write> {
    out: &'a mut W,
    sheet: &'a SpriteSheet,
    cols: u16,
    rows: u16,
}

impl<'a, W: Write> TerminalCanvas<'a, W> {
    pub fn new(out: &'a mut W, sheet: &'a SpriteSheet, cols: u16, rows: u16) -> Self {
        TerminalCanvas {
            out,
            sheet,
            cols,
            rows,
        }
    }

    fn inner_cols(&self) -> i32 {
        self.cols as i32 - 2
    }

    fn inner_rows(&self) -> i32 {
        self.rows as i32 - 3
    }

    /// Terminal cell containing world point `p`.
    fn cell(&self, p: Vec2) -> (i32, i32) {
        let col = 1 + (p.x / WORLD_WIDTH * self.inner_cols() as f32).floor() as i32;
        let row = 1 + (p.y / WORLD_HEIGHT * self.inner_rows() as f32).floor() as i32;
        (col, row)
    }

    /// Print `text` at a cell, clipping whatever falls outside the field.
    fn put(&mut self, col: i32, row: i32, text: &str, color: Color) -> io::Result<()> {
        if row < 1 || row > self.inner_rows() {
            return Ok(());
        }
        let max_col = self.inner_cols();
        let visible: String = text
            .chars()
            .enumerate()
            .filter(|(i, _)| {
                let c = col + *i as i32;
                c >= 1 && c <= max_col
            })
            .map(|(_, ch)| ch)
            .collect();
        if visible.is_empty() {
            return Ok(());
        }
        let start = col.max(1);
        self.out.queue(cursor::MoveTo(start as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn put_centered(&mut self, center: Vec2, rows: &[&str], color: Color) -> io::Result<()> {
        let (col, row) = self.cell(center);
        let top = row - rows.len() as i32 / 2;
        for (i, line) in rows.iter().enumerate() {
            let left = col - line.chars().count() as i32 / 2;
            self.put(left, top + i as i32, line, color)?;
        }
        Ok(())
    }

    /// Deterministic star field for one background tile.
    fn draw_stars(&mut self, tile: &Rect, flipped: bool) -> io::Result<()> {
        for i in 0..STAR_COUNT {
            let x = (i * 7919 % WORLD_WIDTH as u32) as f32;
            let mut y = (i * 104_729 % WORLD_HEIGHT as u32) as f32;
            if flipped {
                y = WORLD_HEIGHT - y;
            }
            let world_y = tile.y + y;
            if (0.0..WORLD_HEIGHT).contains(&world_y) {
                let (col, row) = self.cell(Vec2::new(x, world_y));
                self.put(col, row, ".", C_STAR)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<'_, W> {
    fn blit(&mut self, sprite: Sprite, rect: &Rect) -> io::Result<()> {
        if let Sprite::Background { flipped } = sprite {
            return self.draw_stars(rect, flipped);
        }
        match self.sheet.glyph(sprite) {
            Some(glyph) => self.put_centered(rect.center(), glyph.rows, glyph.color),
            None => Ok(()),
        }
    }

    fn label(&mut self, text: &str, at: Vec2, tone: Tone) -> io::Result<()> {
        let color = match tone {
            Tone::Title => Color::Cyan,
            Tone::Hint => Color::White,
            Tone::Score => Color::Yellow,
            Tone::Life => Color::Red,
            Tone::Alert => Color::Red,
        };
        self.put_centered(at, &[text], color)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete playing frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, sheet: &SpriteSheet) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, cols, rows)?;
    render::draw_frame(&mut TerminalCanvas::new(out, sheet, cols, rows), state)?;
    draw_controls_hint(out, rows)?;
    finish(out, rows)
}

/// Render the start screen.
pub fn render_menu<W: Write>(out: &mut W, sheet: &SpriteSheet) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, cols, rows)?;
    render::draw_menu(&mut TerminalCanvas::new(out, sheet, cols, rows))?;
    draw_controls_hint(out, rows)?;
    finish(out, rows)
}

/// Overlay the game-over message on the frame already on screen.
pub fn render_game_over<W: Write>(out: &mut W, sheet: &SpriteSheet) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    render::draw_game_over(&mut TerminalCanvas::new(out, sheet, cols, rows))?;
    finish(out, rows)
}

fn finish<W: Write>(out: &mut W, rows: u16) -> io::Result<()> {
    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> io::Result<()> {
    let w = cols as usize;
    let bottom = rows.saturating_sub(2);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "↑↓←→ / WASD : Move   SHIFT : Boost   SPACE : Start / Fire   Q : Quit",
    ))?;
    Ok(())
}
