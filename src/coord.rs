use core::ops::{Add, Mul, Sub};

/// Integer grid position of a single maze cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord2 {
    pub x: i32,
    pub y: i32,
}

impl Coord2 {
    pub const ZERO: Coord2 = Coord2 { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell halfway between two skeleton cells two steps apart.
    #[inline]
    pub const fn midpoint(self, other: Coord2) -> Coord2 {
        Coord2::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    /// World-space point at the middle of this cell.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    #[inline]
    pub fn to_index(self, width: u32) -> Option<usize> {
        if width == 0 || self.x < 0 || self.y < 0 || self.x >= width as i32 {
            return None;
        }
        Some((self.y as usize) * (width as usize) + (self.x as usize))
    }

    #[inline]
    pub fn from_index(index: usize, width: u32) -> Self {
        if width == 0 {
            return Coord2::ZERO;
        }
        Self {
            x: (index % width as usize) as i32,
            y: (index / width as usize) as i32,
        }
    }
}

impl Add for Coord2 {
    type Output = Coord2;

    fn add(self, rhs: Self) -> Self::Output {
        Coord2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord2 {
    type Output = Coord2;

    fn sub(self, rhs: Self) -> Self::Output {
        Coord2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Coord2 {
    type Output = Coord2;

    fn mul(self, rhs: i32) -> Self::Output {
        Coord2::new(self.x * rhs, self.y * rhs)
    }
}

/// Continuous position or direction in cell units. One cell spans `1.0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` radians (0 = east, π/2 = south).
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(libm::cosf(angle), libm::sinf(angle))
    }

    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Grid cell containing this point.
    #[inline]
    pub fn cell(self) -> Coord2 {
        Coord2::new(libm::floorf(self.x) as i32, libm::floorf(self.y) as i32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}
