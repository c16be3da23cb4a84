/// Plane geometry for the play area.
///
/// World space is a fixed 1100 x 650 rectangle with the origin in the
/// top-left corner and y growing downward. The terminal front end scales it
/// onto whatever grid it has.

use std::ops::{Add, Mul, Sub};

pub const WORLD_WIDTH: f32 = 1100.0;
pub const WORLD_HEIGHT: f32 = 650.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector at `degrees` counter-clockwise from east, in screen space
    /// (positive angles point up the screen).
    pub fn from_angle(degrees: f32) -> Self {
        let rad = degrees.to_radians();
        Vec2::new(rad.cos(), -rad.sin())
    }

    /// Inverse of [`Vec2::from_angle`].
    pub fn angle_degrees(self) -> f32 {
        (-self.y).atan2(self.x).to_degrees()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, k: f32) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

/// Axis-aligned rectangle stored as top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Rect {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Interiors intersect. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// `(in_x, in_y)`: each flag is false once the rectangle has crossed the
/// matching pair of world edges. Non-finite coordinates count as outside.
pub fn check_bound(rect: &Rect) -> (bool, bool) {
    let in_x = rect.left() >= 0.0 && rect.right() <= WORLD_WIDTH;
    let in_y = rect.top() >= 0.0 && rect.bottom() <= WORLD_HEIGHT;
    (in_x, in_y)
}

/// True when [`check_bound`] reports the rectangle fully inside.
pub fn in_bounds(rect: &Rect) -> bool {
    check_bound(rect) == (true, true)
}

/// Unit vector from the centre of `origin` to the centre of `target`.
///
/// Coincident centres yield NaN components. This happens when the player
/// sits on a stopped grunt's centre; the bullet then spawns on the player
/// and is absorbed by the collision pass of the same tick.
pub fn orientation(origin: &Rect, target: &Rect) -> Vec2 {
    let diff = target.center() - origin.center();
    let norm = diff.length();
    Vec2::new(diff.x / norm, diff.y / norm)
}
