use crate::coord::Vec2;
use crate::error::{MazeError, Result};
use crate::locks::MAX_LOCK_PAIRS;
use crate::maze::MazeConfig;
use crate::player::MovementConfig;
use crate::raycast::ViewConfig;

/// Everything a level needs, grouped by the stage that consumes it.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub maze: MazeConfig,
    /// Pixel size of one cell on an overhead map.
    pub cell_size: u32,
    pub view: ViewConfig,
    pub movement: MovementConfig,
    pub lock_pair_max_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            cell_size: 32,
            view: ViewConfig::default(),
            movement: MovementConfig::default(),
            lock_pair_max_count: MAX_LOCK_PAIRS,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        self.maze.validate()?;
        if self.cell_size == 0 {
            return Err(MazeError::InvalidConfig("cell size must be positive"));
        }
        let fov = self.view.fov_radians;
        if !(fov > 0.0 && fov < core::f32::consts::PI) {
            return Err(MazeError::InvalidConfig("field of view must be in (0, π)"));
        }
        if !(self.view.view_distance > 0.0) {
            return Err(MazeError::InvalidConfig("view distance must be positive"));
        }
        let m = &self.movement;
        if !(m.move_speed > 0.0) || !(m.rotate_speed > 0.0) {
            return Err(MazeError::InvalidConfig("movement speeds must be positive"));
        }
        if !(m.collision_margin >= 0.0 && m.collision_margin < 0.5) {
            return Err(MazeError::InvalidConfig("collision margin must be in [0, 0.5)"));
        }
        if self.lock_pair_max_count > MAX_LOCK_PAIRS {
            return Err(MazeError::InvalidConfig("at most 3 lock pairs per level"));
        }
        Ok(())
    }

    /// Maps a world position onto overhead-map pixels.
    #[inline]
    pub fn to_map_pixels(&self, p: Vec2) -> Vec2 {
        p * self.cell_size as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = GameConfig::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.maze.cols, 20);
        assert_eq!(c.lock_pair_max_count, 3);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut c = GameConfig::default();
        c.maze.rows = 4;
        assert!(c.validate().is_err());

        let mut c = GameConfig::default();
        c.view.fov_radians = 0.0;
        assert!(c.validate().is_err());

        let mut c = GameConfig::default();
        c.movement.move_speed = f32::NAN;
        assert!(c.validate().is_err());

        let mut c = GameConfig::default();
        c.lock_pair_max_count = 4;
        assert_eq!(
            c.validate(),
            Err(MazeError::InvalidConfig("at most 3 lock pairs per level"))
        );

        let mut c = GameConfig::default();
        c.lock_pair_max_count = 0;
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn map_pixels_scale_by_cell_size() {
        let c = GameConfig::default();
        assert_eq!(c.to_map_pixels(Vec2::new(1.5, 2.0)), Vec2::new(48.0, 64.0));
    }
}
