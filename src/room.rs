use alloc::vec::Vec;

use crate::coord::Coord2;
use crate::neighborhood::Dir4;

/// Axis-aligned rectangle carved into the maze as an open chamber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Cell just outside one side that gives the room its own entrance.
    pub door: Option<Coord2>,
}

impl Room {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            door: None,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width as i32 - 1
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32 - 1
    }

    #[inline]
    pub fn center(&self) -> Coord2 {
        Coord2::new(self.x + self.width as i32 / 2, self.y + self.height as i32 / 2)
    }

    #[inline]
    pub fn contains(&self, c: Coord2) -> bool {
        c.x >= self.x && c.x <= self.right() && c.y >= self.y && c.y <= self.bottom()
    }

    /// Like [`Room::contains`] but with the rectangle grown by `buffer` cells.
    #[inline]
    pub fn contains_with_buffer(&self, c: Coord2, buffer: i32) -> bool {
        c.x >= self.x - buffer
            && c.x <= self.right() + buffer
            && c.y >= self.y - buffer
            && c.y <= self.bottom() + buffer
    }

    /// Overlap test with `buffer` cells of clearance required between the two.
    #[inline]
    pub fn intersects(&self, other: &Room, buffer: i32) -> bool {
        !(self.right() + buffer < other.x
            || self.x - buffer > other.right()
            || self.bottom() + buffer < other.y
            || self.y - buffer > other.bottom())
    }

    /// True when `c` is outside the room but shares an edge with an interior cell.
    pub fn touches(&self, c: Coord2) -> bool {
        !self.contains(c) && Dir4::ALL.iter().any(|d| self.contains(c + d.offset()))
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        (self.y..=self.bottom())
            .flat_map(move |y| (self.x..=self.right()).map(move |x| Coord2::new(x, y)))
    }

    /// Cells immediately outside `side`, excluding the corners.
    pub fn side_cells(&self, side: Dir4) -> Vec<Coord2> {
        match side {
            Dir4::North => (self.x..=self.right()).map(|x| Coord2::new(x, self.y - 1)).collect(),
            Dir4::South => (self.x..=self.right())
                .map(|x| Coord2::new(x, self.bottom() + 1))
                .collect(),
            Dir4::West => (self.y..=self.bottom()).map(|y| Coord2::new(self.x - 1, y)).collect(),
            Dir4::East => (self.y..=self.bottom())
                .map(|y| Coord2::new(self.right() + 1, y))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_bounds() {
        let r = Room::new(2, 3, 3, 2);
        assert_eq!(r.right(), 4);
        assert_eq!(r.bottom(), 4);
        assert_eq!(r.center(), Coord2::new(3, 4));
        assert_eq!(r.cells().count(), 6);
    }

    #[test]
    fn intersects_respects_buffer() {
        let a = Room::new(2, 2, 2, 2);
        let touching = Room::new(4, 2, 2, 2);
        let gapped = Room::new(5, 2, 2, 2);
        assert!(!a.intersects(&touching, 0));
        assert!(a.intersects(&touching, 1));
        assert!(!a.intersects(&gapped, 1));
        assert!(a.intersects(&a.clone(), 0));
    }

    #[test]
    fn side_cells_sit_outside() {
        let r = Room::new(4, 4, 3, 2);
        let east = r.side_cells(Dir4::East);
        assert_eq!(east, alloc::vec![Coord2::new(7, 4), Coord2::new(7, 5)]);
        for side in Dir4::ALL {
            for c in r.side_cells(side) {
                assert!(!r.contains(c));
                assert!(r.touches(c));
            }
        }
    }

    #[test]
    fn corners_do_not_touch() {
        let r = Room::new(4, 4, 2, 2);
        assert!(!r.touches(Coord2::new(3, 3)));
        assert!(r.contains_with_buffer(Coord2::new(3, 3), 1));
    }
}
