//! Outward square spiral over the region grid.
//!
//! The walk starts at the origin and moves one cell south, then turns
//! west, north, east, south, ... with leg lengths `1, 1, 2, 2, 3, 3, ...`:
//!
//! ```text
//! (0,0) (0,1) (-1,1) (-1,0) (-1,-1) (0,-1) (1,-1) (1,0) (1,1) (1,2) ...
//! ```
//!
//! [`SpiralCursor`] keeps its place in the walk so the open/next pair is
//! maintained incrementally as regions are claimed, instead of
//! re-walking from the origin after every allocation.

use homestead_core::RegionCoords;

/// Heading of the current spiral leg. South is `+z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// `+z`.
    Down,
    /// `-x`.
    Left,
    /// `-z`.
    Up,
    /// `+x`.
    Right,
}

impl Direction {
    const TURN: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];
    const STEP: [(i32, i32); 4] = [(0, 1), (-1, 0), (0, -1), (1, 0)];

    /// Heading of the leg after this one.
    pub const fn turn(self) -> Direction {
        Self::TURN[self as usize]
    }

    /// `(dx, dz)` for one step along this heading.
    pub const fn step(self) -> (i32, i32) {
        Self::STEP[self as usize]
    }
}

/// The infinite spiral sequence of region coordinates.
///
/// Yields the origin first; every grid cell appears exactly once.
#[derive(Clone, Debug)]
pub struct SpiralWalk {
    cell: RegionCoords,
    heading: Direction,
    leg_len: u32,
    leg_progress: u32,
    legs_done: u32,
    started: bool,
}

impl SpiralWalk {
    /// A walk positioned before the origin.
    pub fn new() -> Self {
        Self {
            cell: RegionCoords::ORIGIN,
            heading: Direction::Down,
            leg_len: 1,
            leg_progress: 0,
            legs_done: 0,
            started: false,
        }
    }

    fn step(&mut self) {
        let (dx, dz) = self.heading.step();
        self.cell = RegionCoords::new(self.cell.x + dx, self.cell.z + dz);
        self.leg_progress += 1;
        if self.leg_progress == self.leg_len {
            self.heading = self.heading.turn();
            self.leg_progress = 0;
            self.legs_done += 1;
            if self.legs_done % 2 == 0 {
                self.leg_len += 1;
            }
        }
    }
}

impl Default for SpiralWalk {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SpiralWalk {
    type Item = RegionCoords;

    fn next(&mut self) -> Option<RegionCoords> {
        if self.started {
            self.step();
        } else {
            self.started = true;
        }
        Some(self.cell)
    }
}

/// Incremental position in the spiral: the open region and the next one.
///
/// `next` is the first unnamed cell along the walk and `open` is the cell
/// visited just before it. With nothing named, both are the origin.
#[derive(Clone, Debug)]
pub struct SpiralCursor {
    walk: SpiralWalk,
    open: RegionCoords,
    next: RegionCoords,
    steps: u64,
}

impl SpiralCursor {
    /// A cursor at the origin, with nothing walked yet.
    pub fn new() -> Self {
        let mut walk = SpiralWalk::new();
        let origin = walk.next().unwrap_or(RegionCoords::ORIGIN);
        Self {
            walk,
            open: origin,
            next: origin,
            steps: 0,
        }
    }

    /// Walk from the origin to the first cell `is_named` rejects.
    pub fn locate(is_named: impl Fn(RegionCoords) -> bool) -> Self {
        let mut cursor = Self::new();
        cursor.advance(is_named);
        cursor
    }

    /// Move forward past any cells that have been named since the last
    /// call. Cells behind the cursor are never revisited; if one of them
    /// loses its name, rebuild with [`locate`](Self::locate).
    pub fn advance(&mut self, is_named: impl Fn(RegionCoords) -> bool) {
        while is_named(self.next) {
            self.open = self.next;
            self.next = self.walk.next().unwrap_or(self.next);
            self.steps += 1;
        }
    }

    /// The region new arrivals are sent to.
    pub fn open(&self) -> RegionCoords {
        self.open
    }

    /// The region the next allocation will claim.
    pub fn next(&self) -> RegionCoords {
        self.next
    }

    /// How many cells the walk has stepped past.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Default for SpiralCursor {
    fn default() -> Self {
        Self::new()
    }
}
