use alloc::vec::Vec;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_core::RngCore;

use crate::coord::Coord2;
use crate::error::{MazeError, Result};
use crate::grid::{Grid, Tile};
use crate::neighborhood::{Axis, Dir4};
use crate::observer::{GenerationObserver, NoOpGenerationObserver};
use crate::reach::path_exists;
use crate::room::Room;

/// Smallest side length that still leaves a border plus two distinct endpoints.
pub const MIN_DIMENSION: u32 = 5;
pub const MAX_DIMENSION: u32 = 4096;

/// Clearance between rooms, and the margin kept from the outer border.
const ROOM_BUFFER: i32 = 1;
const ROOM_MARGIN: i32 = 2;
const ROOM_MIN_SIZE: u32 = 2;
const ROOM_MAX_SIZE: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub cols: u32,
    pub rows: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self { cols: 20, rows: 20 }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cols < MIN_DIMENSION || self.rows < MIN_DIMENSION {
            return Err(MazeError::InvalidConfig(
                "maze needs at least 5 columns and 5 rows",
            ));
        }
        if self.cols > MAX_DIMENSION || self.rows > MAX_DIMENSION {
            return Err(MazeError::InvalidConfig("maze dimensions exceed 4096"));
        }
        Ok(())
    }

    #[inline]
    pub fn cycle_budget(&self) -> usize {
        (self.cols as usize * self.rows as usize) / 20
    }

    /// Room placement attempts; rejected candidates still count.
    #[inline]
    pub fn room_attempts(&self) -> usize {
        (self.cols as usize * self.rows as usize) / 100 + 2
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid<Tile>,
    start: Coord2,
    end: Coord2,
    rooms: Vec<Room>,
    cycle_cells: Vec<Coord2>,
}

impl Maze {
    /// Wraps a hand-authored grid. The border is forced to wall and the two
    /// endpoints must be joined by open floor.
    pub fn from_grid(mut grid: Grid<Tile>, start: Coord2, end: Coord2) -> Result<Maze> {
        if grid.width() < 3 || grid.height() < 3 {
            return Err(MazeError::InvalidConfig("grid too small for a border"));
        }
        grid.stamp_border();
        if start == end || !grid.is_floor(start) || !path_exists(&grid, start, end, &[]) {
            return Err(MazeError::Unsolvable { start, end });
        }
        Ok(Maze {
            grid,
            start,
            end,
            rooms: Vec::new(),
            cycle_cells: Vec::new(),
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Coord2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Coord2 {
        self.end
    }

    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[inline]
    pub fn cycle_cells(&self) -> &[Coord2] {
        &self.cycle_cells
    }

    pub fn room_doors(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.rooms.iter().filter_map(|r| r.door)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.grid.height()
    }
}

pub fn generate(config: &MazeConfig, rng: &mut impl RngCore) -> Result<Maze> {
    generate_with_observer(config, rng, &mut NoOpGenerationObserver)
}

pub fn generate_with_observer(
    config: &MazeConfig,
    rng: &mut impl RngCore,
    observer: &mut impl GenerationObserver,
) -> Result<Maze> {
    config.validate()?;

    let mut grid = Grid::new_filled(config.cols, config.rows, Tile::Wall);
    let start = Coord2::new(1, 1);

    carve_spanning_tree(&mut grid, start, rng, observer);
    let cycle_cells = inject_cycles(&mut grid, config.cycle_budget(), rng, observer);
    let rooms = carve_rooms(&mut grid, config.room_attempts(), rng, observer);
    grid.stamp_border();

    let end = select_end(&mut grid, start, observer);
    if !path_exists(&grid, start, end, &[]) {
        return Err(MazeError::Unsolvable { start, end });
    }

    debug!(
        "generated {}x{} maze: {} floor cells, {} loops, {} rooms, end at {:?}",
        config.cols,
        config.rows,
        grid.floor_count(),
        cycle_cells.len(),
        rooms.len(),
        end
    );

    Ok(Maze {
        grid,
        start,
        end,
        rooms,
        cycle_cells,
    })
}

// Explicit stack, no recursion.
fn carve_spanning_tree(
    grid: &mut Grid<Tile>,
    start: Coord2,
    rng: &mut impl RngCore,
    observer: &mut impl GenerationObserver,
) {
    let mut visited = Grid::new_filled(grid.width(), grid.height(), false);
    let mut stack = alloc::vec![start];
    let mut options: Vec<Coord2> = Vec::with_capacity(4);

    visited.set(start, true);
    grid.carve(start);

    while let Some(&current) = stack.last() {
        options.clear();
        for dir in Dir4::ALL {
            let next = current + dir.skeleton_offset();
            if grid.is_interior(next) && !visited.get(next).copied().unwrap_or(true) {
                options.push(next);
            }
        }

        if options.is_empty() {
            stack.pop();
            continue;
        }

        let next = options[rng.gen_range(0..options.len())];
        grid.carve(current.midpoint(next));
        grid.carve(next);
        visited.set(next, true);
        observer.on_passage_carved(current, next);
        stack.push(next);
    }
}

/// A wall with open cells on both sides along one axis and walls on both
/// sides along the other. Opening it joins two corridors without leaving a
/// 2×2 open block.
fn is_straight_wall(grid: &Grid<Tile>, c: Coord2) -> bool {
    if !grid.tile(c).is_wall() {
        return false;
    }
    [Axis::X, Axis::Y].into_iter().any(|axis| {
        let open = axis.dirs().iter().all(|d| grid.is_floor(c + d.offset()));
        let closed = axis
            .perpendicular()
            .dirs()
            .iter()
            .all(|d| !grid.is_floor(c + d.offset()));
        open && closed
    })
}

fn inject_cycles(
    grid: &mut Grid<Tile>,
    budget: usize,
    rng: &mut impl RngCore,
    observer: &mut impl GenerationObserver,
) -> Vec<Coord2> {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let mut opened = Vec::new();

    for _ in 0..budget {
        let c = Coord2::new(rng.gen_range(1..w - 1), rng.gen_range(1..h - 1));
        if is_straight_wall(grid, c) {
            grid.carve(c);
            observer.on_cycle_opened(c);
            opened.push(c);
        }
    }

    opened
}

fn carve_rooms(
    grid: &mut Grid<Tile>,
    attempts: usize,
    rng: &mut impl RngCore,
    observer: &mut impl GenerationObserver,
) -> Vec<Room> {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..attempts {
        let room_w = rng.gen_range(ROOM_MIN_SIZE..=ROOM_MAX_SIZE);
        let room_h = rng.gen_range(ROOM_MIN_SIZE..=ROOM_MAX_SIZE);
        let max_x = w - ROOM_MARGIN - room_w as i32;
        let max_y = h - ROOM_MARGIN - room_h as i32;
        if max_x < ROOM_MARGIN || max_y < ROOM_MARGIN {
            continue;
        }

        let mut room = Room::new(
            rng.gen_range(ROOM_MARGIN..=max_x),
            rng.gen_range(ROOM_MARGIN..=max_y),
            room_w,
            room_h,
        );

        let clashes = rooms.iter().any(|other| {
            other.intersects(&room, ROOM_BUFFER)
                || other
                    .door
                    .is_some_and(|d| room.contains_with_buffer(d, ROOM_BUFFER))
        });
        if clashes {
            continue;
        }

        for c in room.cells() {
            grid.carve(c);
        }

        room.door = pick_room_door(grid, &room, &rooms, rng);
        if let Some(door) = room.door {
            grid.carve(door);
        }

        observer.on_room_placed(&room);
        rooms.push(room);
    }

    rooms
}

/// Uniformly random side, then a random cell along it that opens onto
/// corridor floor and touches no other room. Falls through to the remaining
/// sides when a side has no usable cell.
fn pick_room_door(
    grid: &Grid<Tile>,
    room: &Room,
    others: &[Room],
    rng: &mut impl RngCore,
) -> Option<Coord2> {
    let mut sides = Dir4::ALL;
    sides.shuffle(rng);

    for side in sides {
        let mut cells: Vec<Coord2> = room
            .side_cells(side)
            .into_iter()
            .filter(|&c| grid.is_interior(c))
            .filter(|&c| {
                let beyond = c + side.offset();
                grid.is_interior(beyond) && grid.is_floor(beyond)
            })
            .filter(|&c| !others.iter().any(|o| o.contains(c) || o.touches(c)))
            .collect();
        cells.shuffle(rng);
        if let Some(&door) = cells.first() {
            return Some(door);
        }
    }
    None
}

fn ring(center: Coord2, radius: i32) -> impl Iterator<Item = Coord2> {
    (-radius..=radius).flat_map(move |dy| {
        (-radius..=radius)
            .filter(move |dx| dx.abs() == radius || dy.abs() == radius)
            .map(move |dx| Coord2::new(center.x + dx, center.y + dy))
    })
}

fn select_end(
    grid: &mut Grid<Tile>,
    start: Coord2,
    observer: &mut impl GenerationObserver,
) -> Coord2 {
    let corner = Coord2::new(grid.width() as i32 - 2, grid.height() as i32 - 2);
    let bound = (grid.width().min(grid.height()) / 2) as i32;

    for radius in 0..=bound {
        let found = ring(corner, radius)
            .find(|&c| c != start && grid.is_interior(c) && grid.is_floor(c));
        if let Some(end) = found {
            return end;
        }
    }

    warn!("no floor near {:?}; forcing the exit open", corner);
    grid.carve(corner);
    grid.carve(corner + Dir4::West.offset());
    observer.on_endpoint_forced(corner);
    corner
}
