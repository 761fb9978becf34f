use crate::coord::Coord2;

/// 4-directional movement (Von Neumann neighborhood).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dir4 {
    North,
    East,
    South,
    West,
}

impl Dir4 {
    pub const ALL: [Dir4; 4] = [Dir4::North, Dir4::East, Dir4::South, Dir4::West];

    #[inline]
    pub const fn offset(self) -> Coord2 {
        match self {
            Dir4::North => Coord2::new(0, -1),
            Dir4::East => Coord2::new(1, 0),
            Dir4::South => Coord2::new(0, 1),
            Dir4::West => Coord2::new(-1, 0),
        }
    }

    /// Offset to the neighbouring skeleton cell, which sits two cells away.
    #[inline]
    pub fn skeleton_offset(self) -> Coord2 {
        self.offset() * 2
    }

    #[inline]
    pub const fn opposite(self) -> Dir4 {
        match self {
            Dir4::North => Dir4::South,
            Dir4::East => Dir4::West,
            Dir4::South => Dir4::North,
            Dir4::West => Dir4::East,
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Dir4::North | Dir4::South => Axis::Y,
            Dir4::East | Dir4::West => Axis::X,
        }
    }
}

/// Grid axis. Doubles as the wall face a ray crossed last.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub const fn perpendicular(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// The two directions lying along this axis.
    #[inline]
    pub const fn dirs(self) -> [Dir4; 2] {
        match self {
            Axis::X => [Dir4::West, Dir4::East],
            Axis::Y => [Dir4::North, Dir4::South],
        }
    }
}
