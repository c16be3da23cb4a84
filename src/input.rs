/// Movement intents decoded from the keyboard.
///
/// Each held direction contributes one unit delta; opposite directions
/// cancel, so the summed displacement is always one of nine values.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
}

impl Intent {
    pub const ALL: [Intent; 4] = [Intent::Up, Intent::Down, Intent::Left, Intent::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Intent::Up => (0, -1),
            Intent::Down => (0, 1),
            Intent::Left => (-1, 0),
            Intent::Right => (1, 0),
        }
    }
}

/// Snapshot of the keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Speed modifier (Shift).
    pub boost: bool,
}

impl HeldKeys {
    pub fn holds(&self, intent: Intent) -> bool {
        match intent {
            Intent::Up => self.up,
            Intent::Down => self.down,
            Intent::Left => self.left,
            Intent::Right => self.right,
        }
    }

    /// Vector sum of the held intents.
    pub fn displacement(&self) -> (i32, i32) {
        Intent::ALL
            .iter()
            .filter(|intent| self.holds(**intent))
            .map(|intent| intent.delta())
            .fold((0, 0), |(x, y), (dx, dy)| (x + dx, y + dy))
    }
}
