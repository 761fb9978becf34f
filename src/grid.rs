use alloc::vec::Vec;

use crate::coord::Coord2;
use crate::grid_trait::Occupancy;

/// Occupancy state of one maze cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

impl Tile {
    #[inline]
    pub const fn is_floor(self) -> bool {
        matches!(self, Tile::Floor)
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }
}

/// 2D rectangular grid backed by a flat Vec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: u32,
    height: u32,
}

impl<T: Clone> Grid<T> {
    pub fn new_filled(width: u32, height: u32, fill: T) -> Self {
        let len = width as usize * height as usize;
        Self {
            cells: alloc::vec![fill; len],
            width,
            height,
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(i32, i32) -> T) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(f(x, y));
            }
        }
        Self {
            cells,
            width,
            height,
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord2) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width as i32 && coord.y < self.height as i32
    }

    fn index_of(&self, coord: Coord2) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    pub fn get(&self, coord: Coord2) -> Option<&T> {
        self.index_of(coord).and_then(|i| self.cells.get(i))
    }

    /// Writes are silently dropped outside the grid.
    pub fn set(&mut self, coord: Coord2, value: T) {
        if let Some(index) = self.index_of(coord) {
            self.cells[index] = value;
        }
    }

    pub fn row(&self, y: u32) -> &[T] {
        assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = (Coord2, &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Coord2::from_index(index, self.width), cell))
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl Grid<Tile> {
    /// Parses rows of `#` (wall) and `.` (floor). Short rows are padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        Grid::from_fn(width, height, |x, y| {
            match rows[y as usize].as_bytes().get(x as usize) {
                Some(b'.') => Tile::Floor,
                _ => Tile::Wall,
            }
        })
    }

    /// Tile at `coord`; everything outside the grid is a wall.
    #[inline]
    pub fn tile(&self, coord: Coord2) -> Tile {
        self.get(coord).copied().unwrap_or(Tile::Wall)
    }

    #[inline]
    pub fn is_floor(&self, coord: Coord2) -> bool {
        self.tile(coord).is_floor()
    }

    #[inline]
    pub fn carve(&mut self, coord: Coord2) {
        self.set(coord, Tile::Floor);
    }

    /// True when `coord` is one step inside the outer border.
    #[inline]
    pub fn is_interior(&self, coord: Coord2) -> bool {
        coord.x >= 1
            && coord.y >= 1
            && coord.x < self.width as i32 - 1
            && coord.y < self.height as i32 - 1
    }

    /// Forces the outer ring of cells back to walls.
    pub fn stamp_border(&mut self) {
        let w = self.width as i32;
        let h = self.height as i32;
        for x in 0..w {
            self.set(Coord2::new(x, 0), Tile::Wall);
            self.set(Coord2::new(x, h - 1), Tile::Wall);
        }
        for y in 0..h {
            self.set(Coord2::new(0, y), Tile::Wall);
            self.set(Coord2::new(w - 1, y), Tile::Wall);
        }
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|t| t.is_floor()).count()
    }

    pub fn floor_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords()
            .filter(|(_, t)| t.is_floor())
            .map(|(c, _)| c)
    }
}

impl Occupancy for Grid<Tile> {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_open(&self, coord: Coord2) -> bool {
        self.is_floor(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_filled() {
        let g = Grid::new_filled(3, 2, 9u8);
        assert_eq!(g.cells(), &[9, 9, 9, 9, 9, 9]);
    }

    #[test]
    fn grid_from_fn() {
        let g = Grid::from_fn(3, 2, |x, y| x + y * 10);
        assert_eq!(g.get(Coord2::new(2, 1)), Some(&12));
        assert_eq!(g.row(1), &[10, 11, 12]);
    }

    #[test]
    fn grid_out_of_bounds_reads_wall() {
        let g = Grid::new_filled(2, 2, Tile::Floor);
        assert_eq!(g.get(Coord2::new(2, 0)), None);
        assert_eq!(g.tile(Coord2::new(2, 0)), Tile::Wall);
        assert_eq!(g.tile(Coord2::new(-1, -1)), Tile::Wall);
        assert_eq!(g.tile(Coord2::new(1, 1)), Tile::Floor);
    }

    #[test]
    fn grid_set_outside_is_ignored() {
        let mut g = Grid::new_filled(2, 2, Tile::Wall);
        g.set(Coord2::new(5, 5), Tile::Floor);
        assert_eq!(g.floor_count(), 0);
    }

    #[test]
    fn from_rows_parses_tiles() {
        let g = Grid::from_rows(&["###", "#.#", "##"]);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert!(g.is_floor(Coord2::new(1, 1)));
        assert!(!g.is_floor(Coord2::new(2, 2)));
        assert_eq!(g.floor_cells().collect::<Vec<_>>(), alloc::vec![Coord2::new(1, 1)]);
    }

    #[test]
    fn stamp_border_restores_walls() {
        let mut g = Grid::new_filled(4, 3, Tile::Floor);
        g.stamp_border();
        assert_eq!(g.floor_count(), 2);
        assert!(g.is_interior(Coord2::new(1, 1)));
        assert!(!g.is_interior(Coord2::new(3, 1)));
    }
}
