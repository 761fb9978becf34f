use alloc::vec::Vec;
use core::fmt;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand_core::RngCore;

use crate::coord::Coord2;
use crate::grid_trait::Occupancy;
use crate::maze::Maze;
use crate::reach::{path_exists, reachable_set};

pub const MAX_LOCK_PAIRS: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LockColor {
    Red,
    Green,
    Blue,
}

impl LockColor {
    pub const ALL: [LockColor; MAX_LOCK_PAIRS] = [LockColor::Red, LockColor::Green, LockColor::Blue];

    pub const fn name(self) -> &'static str {
        match self {
            LockColor::Red => "red",
            LockColor::Green => "green",
            LockColor::Blue => "blue",
        }
    }
}

impl fmt::Display for LockColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Door {
    pub position: Coord2,
    pub color: LockColor,
    pub is_open: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub position: Coord2,
    pub color: LockColor,
    pub collected: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    keys: Vec<LockColor>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, color: LockColor) {
        self.keys.push(color);
    }

    pub fn contains(&self, color: LockColor) -> bool {
        self.keys.contains(&color)
    }

    pub fn count(&self, color: LockColor) -> usize {
        self.keys.iter().filter(|&&k| k == color).count()
    }

    /// Removes one instance of `color`, the earliest picked up.
    pub fn take(&mut self, color: LockColor) -> bool {
        match self.keys.iter().position(|&k| k == color) {
            Some(i) => {
                self.keys.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = LockColor> + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockLayout {
    pub doors: Vec<Door>,
    pub keys: Vec<Key>,
}

impl LockLayout {
    pub fn door_at(&self, c: Coord2) -> Option<&Door> {
        self.doors.iter().find(|d| d.position == c)
    }

    fn door_cells(&self) -> Vec<Coord2> {
        self.doors.iter().map(|d| d.position).collect()
    }

    fn is_occupied(&self, c: Coord2) -> bool {
        self.doors.iter().any(|d| d.position == c) || self.keys.iter().any(|k| k.position == c)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Traverse {
    Blocked,
    Opened,
    Clear,
}

/// Number of lock pairs for a level: one more every two levels, capped.
pub fn pair_count(level: u32, max_pairs: usize) -> usize {
    let wanted = (level / 2) as usize + 1;
    wanted.min(max_pairs).min(MAX_LOCK_PAIRS)
}

fn door_site_is_safe<G: Occupancy + ?Sized>(
    grid: &G,
    start: Coord2,
    end: Coord2,
    candidate: Coord2,
    placed: &LockLayout,
) -> bool {
    let mut blocked = placed.door_cells();
    blocked.push(candidate);
    path_exists(grid, start, end, &blocked)
        && placed
            .keys
            .iter()
            .all(|k| path_exists(grid, start, k.position, &blocked))
}

/// Cells in `preferred` are tried before any other corridor cell.
pub fn find_door_site<G: Occupancy + ?Sized>(
    grid: &G,
    start: Coord2,
    end: Coord2,
    preferred: &[Coord2],
    placed: &LockLayout,
    rng: &mut impl RngCore,
) -> Option<Coord2> {
    let eligible = |c: Coord2| {
        c != start
            && c != end
            && c.x >= 1
            && c.y >= 1
            && c.x < grid.width() as i32 - 1
            && c.y < grid.height() as i32 - 1
            && grid.is_open(c)
            && !placed.is_occupied(c)
    };

    let mut first: Vec<Coord2> = preferred.iter().copied().filter(|&c| eligible(c)).collect();
    first.sort_unstable();
    first.dedup();
    first.shuffle(rng);

    let mut rest: Vec<Coord2> = (0..grid.height() as i32)
        .flat_map(|y| (0..grid.width() as i32).map(move |x| Coord2::new(x, y)))
        .filter(|&c| eligible(c) && !first.contains(&c))
        .collect();
    rest.shuffle(rng);

    first
        .into_iter()
        .chain(rest)
        .find(|&c| door_site_is_safe(grid, start, end, c, placed))
}

/// Picks a key cell reachable from `start` with `door` and every placed door
/// closed, so the key never sits behind its own lock.
pub fn find_key_site<G: Occupancy + ?Sized>(
    grid: &G,
    start: Coord2,
    end: Coord2,
    door: Coord2,
    placed: &LockLayout,
    rng: &mut impl RngCore,
) -> Option<Coord2> {
    let mut blocked = placed.door_cells();
    blocked.push(door);

    let mut cells = reachable_set(grid, start, &blocked);
    cells.shuffle(rng);
    cells
        .into_iter()
        .find(|&c| c != start && c != end && !placed.is_occupied(c))
}

/// Places up to [`pair_count`] door/key pairs in palette order. A color with
/// no valid door or key site is skipped rather than failing the level.
pub fn place_lock_pairs(
    maze: &Maze,
    level: u32,
    max_pairs: usize,
    rng: &mut impl RngCore,
) -> LockLayout {
    let grid = maze.grid();
    let (start, end) = (maze.start(), maze.end());
    let preferred: Vec<Coord2> = maze.room_doors().collect();
    let mut layout = LockLayout::default();

    for color in LockColor::ALL.into_iter().take(pair_count(level, max_pairs)) {
        let door = match find_door_site(grid, start, end, &preferred, &layout, rng) {
            Some(c) => c,
            None => {
                info!("no safe door site for {} lock; skipping pair", color);
                continue;
            }
        };
        let key = match find_key_site(grid, start, end, door, &layout, rng) {
            Some(c) => c,
            None => {
                info!("no reachable key site for {} door at {:?}; skipping pair", color, door);
                continue;
            }
        };

        layout.doors.push(Door {
            position: door,
            color,
            is_open: false,
        });
        layout.keys.push(Key {
            position: key,
            color,
            collected: false,
        });
    }

    debug!(
        "level {}: placed {} lock pairs (room door sites available: {})",
        level,
        layout.doors.len(),
        preferred.len()
    );
    layout
}

/// Resolves an attempt to enter `target`. A closed door opens only when the
/// inventory holds its color, consuming exactly one key.
pub fn try_traverse(doors: &mut [Door], inventory: &mut Inventory, target: Coord2) -> Traverse {
    let door = match doors.iter_mut().find(|d| d.position == target) {
        Some(d) => d,
        None => return Traverse::Clear,
    };
    if door.is_open {
        return Traverse::Clear;
    }
    if inventory.take(door.color) {
        door.is_open = true;
        Traverse::Opened
    } else {
        Traverse::Blocked
    }
}

pub fn collect_key(keys: &mut [Key], inventory: &mut Inventory, cell: Coord2) -> Option<LockColor> {
    let key = keys
        .iter_mut()
        .find(|k| k.position == cell && !k.collected)?;
    key.collected = true;
    inventory.push(key.color);
    Some(key.color)
}

/// Occupancy view in which closed doors count as walls.
#[derive(Debug)]
pub struct DoorView<'a, G: ?Sized> {
    grid: &'a G,
    doors: &'a [Door],
}

impl<G: ?Sized> Clone for DoorView<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for DoorView<'_, G> {}

impl<'a, G: Occupancy + ?Sized> DoorView<'a, G> {
    pub fn new(grid: &'a G, doors: &'a [Door]) -> Self {
        Self { grid, doors }
    }

    pub fn closed_door_at(&self, c: Coord2) -> Option<&'a Door> {
        self.doors.iter().find(|d| d.position == c && !d.is_open)
    }
}

impl<G: Occupancy + ?Sized> Occupancy for DoorView<'_, G> {
    #[inline]
    fn width(&self) -> u32 {
        self.grid.width()
    }

    #[inline]
    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn is_open(&self, coord: Coord2) -> bool {
        self.grid.is_open(coord) && self.closed_door_at(coord).is_none()
    }
}
