use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::coord::Coord2;
use crate::grid::Grid;
use crate::grid_trait::Occupancy;
use crate::neighborhood::Dir4;

/// Cells reachable from an origin, in BFS discovery order.
#[derive(Clone, Debug)]
pub struct Reach {
    pub cells: Vec<Coord2>,
    pub visited: Grid<bool>,
}

impl Reach {
    #[inline]
    pub fn contains(&self, coord: Coord2) -> bool {
        self.visited.get(coord).copied().unwrap_or(false)
    }
}

#[inline]
fn passable<G: Occupancy + ?Sized>(grid: &G, coord: Coord2, blocked: &[Coord2]) -> bool {
    grid.in_bounds(coord) && grid.is_open(coord) && !blocked.contains(&coord)
}

/// Walks the region around `from`, stopping early once `stop` returns true.
fn bfs<G, F>(grid: &G, from: Coord2, blocked: &[Coord2], mut stop: F) -> Reach
where
    G: Occupancy + ?Sized,
    F: FnMut(Coord2) -> bool,
{
    let mut visited = Grid::new_filled(grid.width(), grid.height(), false);
    let mut cells = Vec::new();

    if !passable(grid, from, blocked) {
        return Reach { cells, visited };
    }

    let mut queue = VecDeque::new();
    queue.push_back(from);
    visited.set(from, true);

    while let Some(current) = queue.pop_front() {
        cells.push(current);
        if stop(current) {
            break;
        }
        for dir in Dir4::ALL {
            let next = current + dir.offset();
            if visited.get(next).copied().unwrap_or(true) {
                continue;
            }
            if !passable(grid, next, blocked) {
                continue;
            }
            visited.set(next, true);
            queue.push_back(next);
        }
    }

    Reach { cells, visited }
}

/// Full reachable set from `from`, with `blocked` cells impassable.
pub fn reachable<G: Occupancy + ?Sized>(grid: &G, from: Coord2, blocked: &[Coord2]) -> Reach {
    bfs(grid, from, blocked, |_| false)
}

pub fn reachable_set<G: Occupancy + ?Sized>(
    grid: &G,
    from: Coord2,
    blocked: &[Coord2],
) -> Vec<Coord2> {
    reachable(grid, from, blocked).cells
}

/// True when `to` can be reached from `from` over open cells without
/// stepping on any `blocked` cell.
pub fn path_exists<G: Occupancy + ?Sized>(
    grid: &G,
    from: Coord2,
    to: Coord2,
    blocked: &[Coord2],
) -> bool {
    if !passable(grid, to, blocked) {
        return false;
    }
    let mut found = false;
    bfs(grid, from, blocked, |c| {
        found = c == to;
        found
    });
    found
}

/// True when every open cell belongs to a single 4-connected region.
pub fn is_connected<G: Occupancy + ?Sized>(grid: &G) -> bool {
    let mut first = None;
    let mut open_total = 0usize;

    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let c = Coord2::new(x, y);
            if grid.is_open(c) {
                open_total += 1;
                if first.is_none() {
                    first = Some(c);
                }
            }
        }
    }

    let start = match first {
        Some(c) if open_total > 1 => c,
        _ => return true,
    };
    reachable(grid, start, &[]).cells.len() == open_total
}
