use core::f32::consts::{FRAC_PI_2, TAU};

use crate::coord::{Coord2, Vec2};
use crate::grid_trait::Occupancy;

#[derive(Clone, Debug, PartialEq)]
pub struct MovementConfig {
    pub move_speed: f32,
    pub rotate_speed: f32,
    /// Minimum gap kept between the player and any opaque cell.
    pub collision_margin: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.05,
            rotate_speed: 0.03,
            collision_margin: 0.1,
        }
    }
}

/// Per-frame input, already decoded from whatever device the caller polls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub move_forward: bool,
    pub move_back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub interact: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Radians in `[0, 2π)`; 0 faces east, π/2 faces south.
    pub facing: f32,
}

impl Player {
    pub fn spawn(cell: Coord2) -> Self {
        Self {
            position: cell.center(),
            facing: 0.0,
        }
    }

    #[inline]
    pub fn cell(&self) -> Coord2 {
        self.position.cell()
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.facing)
    }

    pub fn facing_cell(&self) -> Coord2 {
        (self.position + self.direction()).cell()
    }

    pub fn turn(&mut self, intent: &MoveIntent, rotate_speed: f32) {
        if intent.turn_left {
            self.facing -= rotate_speed;
        }
        if intent.turn_right {
            self.facing += rotate_speed;
        }
        self.facing = normalize_angle(self.facing);
    }

    pub fn displacement(&self, intent: &MoveIntent, move_speed: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if intent.move_forward != intent.move_back {
            let sign = if intent.move_forward { 1.0 } else { -1.0 };
            delta = delta + self.direction() * (move_speed * sign);
        }
        if intent.strafe_left != intent.strafe_right {
            let side = if intent.strafe_right { FRAC_PI_2 } else { -FRAC_PI_2 };
            delta = delta + Vec2::from_angle(self.facing + side) * move_speed;
        }
        delta
    }

    /// Cells the leading edge of the player would touch when moving by
    /// `delta`, one per axis of motion.
    pub fn probe_cells(&self, delta: Vec2, margin: f32) -> [Option<Coord2>; 2] {
        let lead = |d: f32| if d > 0.0 { d + margin } else { d - margin };
        let p = self.position;
        [
            (delta.x != 0.0).then(|| Vec2::new(p.x + lead(delta.x), p.y).cell()),
            (delta.y != 0.0).then(|| Vec2::new(p.x, p.y + lead(delta.y)).cell()),
        ]
    }

    /// Applies `delta` one axis at a time so the player slides along walls.
    pub fn slide(&mut self, delta: Vec2, mut can_stand: impl FnMut(Vec2) -> bool) {
        let x_step = Vec2::new(self.position.x + delta.x, self.position.y);
        if delta.x != 0.0 && can_stand(x_step) {
            self.position = x_step;
        }
        let y_step = Vec2::new(self.position.x, self.position.y + delta.y);
        if delta.y != 0.0 && can_stand(y_step) {
            self.position = y_step;
        }
    }
}

fn normalize_angle(mut angle: f32) -> f32 {
    while angle < 0.0 {
        angle += TAU;
    }
    while angle >= TAU {
        angle -= TAU;
    }
    angle
}

/// True when a player at `pos` sits on an open cell and keeps at least
/// `margin` from every opaque orthogonal neighbour.
pub fn can_move_to<G: Occupancy + ?Sized>(grid: &G, pos: Vec2, margin: f32) -> bool {
    let cell = pos.cell();
    if grid.is_opaque(cell) {
        return false;
    }
    let fx = pos.x - cell.x as f32;
    let fy = pos.y - cell.y as f32;

    if fx < margin && grid.is_opaque(Coord2::new(cell.x - 1, cell.y)) {
        return false;
    }
    if 1.0 - fx < margin && grid.is_opaque(Coord2::new(cell.x + 1, cell.y)) {
        return false;
    }
    if fy < margin && grid.is_opaque(Coord2::new(cell.x, cell.y - 1)) {
        return false;
    }
    if 1.0 - fy < margin && grid.is_opaque(Coord2::new(cell.x, cell.y + 1)) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Tile};

    fn close(a: f32, b: f32) -> bool {
        libm::fabsf(a - b) < 1e-4
    }

    fn hall() -> Grid<Tile> {
        Grid::from_rows(&["#####", "#...#", "#####"])
    }

    #[test]
    fn turning_wraps_into_range() {
        let mut p = Player::spawn(Coord2::new(1, 1));
        let left = MoveIntent {
            turn_left: true,
            ..Default::default()
        };
        p.turn(&left, 0.5);
        assert!(close(p.facing, TAU - 0.5));
        let right = MoveIntent {
            turn_right: true,
            ..Default::default()
        };
        p.turn(&right, 1.0);
        assert!(close(p.facing, 0.5));
    }

    #[test]
    fn forward_and_back_cancel() {
        let p = Player::spawn(Coord2::new(1, 1));
        let both = MoveIntent {
            move_forward: true,
            move_back: true,
            ..Default::default()
        };
        assert_eq!(p.displacement(&both, 0.1), Vec2::ZERO);
    }

    #[test]
    fn strafe_right_is_south_when_facing_east() {
        let p = Player::spawn(Coord2::new(1, 1));
        let intent = MoveIntent {
            strafe_right: true,
            ..Default::default()
        };
        let d = p.displacement(&intent, 0.1);
        assert!(close(d.x, 0.0));
        assert!(close(d.y, 0.1));
    }

    #[test]
    fn margin_keeps_player_off_walls() {
        let g = hall();
        assert!(can_move_to(&g, Vec2::new(1.5, 1.5), 0.1));
        assert!(!can_move_to(&g, Vec2::new(1.05, 1.5), 0.1));
        assert!(!can_move_to(&g, Vec2::new(1.5, 1.95), 0.1));
        assert!(can_move_to(&g, Vec2::new(1.95, 1.5), 0.1));
        assert!(!can_move_to(&g, Vec2::new(0.5, 1.5), 0.1));
    }

    #[test]
    fn slide_keeps_free_axis() {
        let g = hall();
        let mut p = Player::spawn(Coord2::new(2, 1));
        p.slide(Vec2::new(0.2, 0.45), |pos| can_move_to(&g, pos, 0.1));
        assert!(close(p.position.x, 2.7));
        assert!(close(p.position.y, 1.5));
    }

    #[test]
    fn probe_cells_lead_by_margin() {
        let p = Player {
            position: Vec2::new(1.85, 1.5),
            facing: 0.0,
        };
        let probes = p.probe_cells(Vec2::new(0.06, 0.0), 0.1);
        assert_eq!(probes, [Some(Coord2::new(2, 1)), None]);
        assert_eq!(p.facing_cell(), Coord2::new(2, 1));
    }
}
