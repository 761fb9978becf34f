use alloc::vec::Vec;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::coord::Coord2;
use crate::error::Result;
use crate::grid::{Grid, Tile};
use crate::locks::{
    collect_key, place_lock_pairs, try_traverse, Door, DoorView, Inventory, Key, LockColor,
    LockLayout, Traverse,
};
use crate::maze::{generate, Maze};
use crate::player::{can_move_to, MoveIntent, Player};
use crate::raycast::{project, RayHit};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepEvents {
    pub opened: Option<LockColor>,
    /// Color of a closed door the player bumped without its key.
    pub blocked_by: Option<LockColor>,
    pub collected: Option<LockColor>,
    pub reached_exit: bool,
}

#[derive(Clone, Debug)]
pub struct Level {
    number: u32,
    config: GameConfig,
    maze: Maze,
    locks: LockLayout,
    inventory: Inventory,
    player: Player,
    finished: bool,
}

impl Level {
    /// Builds level `number` deterministically from `seed`.
    pub fn new(config: &GameConfig, number: u32, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let maze = generate(&config.maze, &mut rng)?;
        let locks = place_lock_pairs(&maze, number, config.lock_pair_max_count, &mut rng);
        info!(
            "level {} ready: {}x{}, {} rooms, {} lock pairs, seed {}",
            number,
            maze.width(),
            maze.height(),
            maze.rooms().len(),
            locks.doors.len(),
            seed
        );
        Ok(Self::from_parts(config.clone(), number, maze, locks))
    }

    pub fn from_parts(config: GameConfig, number: u32, maze: Maze, locks: LockLayout) -> Self {
        let player = Player::spawn(maze.start());
        Self {
            number,
            config,
            maze,
            locks,
            inventory: Inventory::new(),
            player,
            finished: false,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn doors(&self) -> &[Door] {
        &self.locks.doors
    }

    pub fn keys(&self) -> &[Key] {
        &self.locks.keys
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn view(&self) -> DoorView<'_, Grid<Tile>> {
        DoorView::new(self.maze.grid(), &self.locks.doors)
    }

    /// Advances one frame. Once the exit is reached further steps are ignored.
    pub fn step(&mut self, intent: &MoveIntent) -> StepEvents {
        let mut events = StepEvents::default();
        if self.finished {
            events.reached_exit = true;
            return events;
        }

        let movement = &self.config.movement;
        let margin = movement.collision_margin;
        self.player.turn(intent, movement.rotate_speed);
        let delta = self.player.displacement(intent, movement.move_speed);

        let here = self.player.cell();
        for probe in self.player.probe_cells(delta, margin).into_iter().flatten() {
            if probe != here {
                self.touch_door(probe, &mut events);
            }
        }

        let view = DoorView::new(self.maze.grid(), &self.locks.doors);
        self.player.slide(delta, |p| can_move_to(&view, p, margin));

        if intent.interact {
            let ahead = self.player.facing_cell();
            self.touch_door(ahead, &mut events);
        }

        let cell = self.player.cell();
        if let Some(color) = collect_key(&mut self.locks.keys, &mut self.inventory, cell) {
            debug!("picked up {} key at {:?}", color, cell);
            events.collected = Some(color);
        }

        if cell == self.maze.end() {
            info!("level {} complete", self.number);
            self.finished = true;
            events.reached_exit = true;
        }
        events
    }

    fn touch_door(&mut self, cell: Coord2, events: &mut StepEvents) {
        let color = match self.locks.door_at(cell) {
            Some(door) if !door.is_open => door.color,
            _ => return,
        };
        match try_traverse(&mut self.locks.doors, &mut self.inventory, cell) {
            Traverse::Opened => {
                debug!("opened {} door at {:?}", color, cell);
                events.opened = Some(color);
            }
            Traverse::Blocked => events.blocked_by = Some(color),
            Traverse::Clear => {}
        }
    }

    pub fn render(&self, viewport_width: u32) -> Vec<RayHit> {
        project(
            &self.view(),
            viewport_width,
            self.config.view.fov_radians,
            self.player.facing,
            self.player.position,
        )
    }
}
