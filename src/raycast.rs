use alloc::vec::Vec;

use crate::coord::{Coord2, Vec2};
use crate::grid_trait::Occupancy;
use crate::neighborhood::Axis;

/// Shortest distance used when converting a hit into a wall height.
const MIN_WALL_DISTANCE: f32 = 1e-3;
const MIN_BRIGHTNESS: f32 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
    pub fov_radians: f32,
    pub view_distance: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov_radians: core::f32::consts::FRAC_PI_3,
            view_distance: 14.0,
        }
    }
}

/// Result of one ray. Misses carry an infinite distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub hit: bool,
    pub perpendicular_distance: f32,
    /// Axis of the last grid line crossed: `X` for east/west faces.
    pub side: Axis,
    /// Fractional offset along the struck face, in `[0, 1)`.
    pub texture_u: f32,
    /// The wall cell that was struck, or the first cell outside the grid.
    pub cell: Coord2,
}

impl RayHit {
    fn miss(side: Axis, cell: Coord2) -> Self {
        Self {
            hit: false,
            perpendicular_distance: f32::INFINITY,
            side,
            texture_u: 0.0,
            cell,
        }
    }

    pub fn visible_distance(&self, view_distance: f32) -> f32 {
        self.perpendicular_distance.min(view_distance)
    }

    /// Projected wall height in pixels; zero for a miss.
    pub fn wall_height(&self, screen_height: f32) -> f32 {
        if !self.hit {
            return 0.0;
        }
        screen_height / self.perpendicular_distance.max(MIN_WALL_DISTANCE)
    }

    /// Inverse-distance shade in `[0.2, 1.0]`.
    pub fn brightness(&self, view_distance: f32) -> f32 {
        let fall = (self.perpendicular_distance / view_distance).min(1.0 - MIN_BRIGHTNESS);
        1.0 - fall
    }

    pub fn texture_column(&self, width: u32) -> u32 {
        if width == 0 {
            return 0;
        }
        ((self.texture_u * width as f32) as u32).min(width - 1)
    }
}

#[inline]
fn inverse_abs(component: f32) -> f32 {
    if component == 0.0 {
        f32::INFINITY
    } else {
        libm::fabsf(1.0 / component)
    }
}

/// Walks the grid from `origin` along `dir` until an opaque cell is entered
/// or the ray leaves the grid. The distance is measured along `dir`, in units
/// of its length. A zero vector never hits anything.
pub fn cast_ray<G: Occupancy + ?Sized>(grid: &G, origin: Vec2, dir: Vec2) -> RayHit {
    let mut map = origin.cell();
    if (dir.x == 0.0 && dir.y == 0.0) || !grid.in_bounds(map) {
        return RayHit::miss(Axis::X, map);
    }

    let delta_x = inverse_abs(dir.x);
    let delta_y = inverse_abs(dir.y);

    let (step_x, mut side_x) = if dir.x < 0.0 {
        (-1, (origin.x - map.x as f32) * delta_x)
    } else {
        (1, (map.x as f32 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if dir.y < 0.0 {
        (-1, (origin.y - map.y as f32) * delta_y)
    } else {
        (1, (map.y as f32 + 1.0 - origin.y) * delta_y)
    };

    let mut side;
    loop {
        if side_x < side_y {
            side_x += delta_x;
            map.x += step_x;
            side = Axis::X;
        } else {
            side_y += delta_y;
            map.y += step_y;
            side = Axis::Y;
        }

        if !grid.in_bounds(map) {
            return RayHit::miss(side, map);
        }
        if grid.is_opaque(map) {
            break;
        }
    }

    let (distance, along) = match side {
        Axis::X => {
            let d = (map.x as f32 - origin.x + (1 - step_x) as f32 / 2.0) / dir.x;
            (d, origin.y + d * dir.y)
        }
        Axis::Y => {
            let d = (map.y as f32 - origin.y + (1 - step_y) as f32 / 2.0) / dir.y;
            (d, origin.x + d * dir.x)
        }
    };

    RayHit {
        hit: true,
        perpendicular_distance: distance,
        side,
        texture_u: along - libm::floorf(along),
        cell: map,
    }
}

/// Casts along `facing + column_angle_offset` (radians, 0 = east) and
/// reports the distance projected onto the facing direction.
pub fn cast_column<G: Occupancy + ?Sized>(
    grid: &G,
    position: Vec2,
    facing: f32,
    column_angle_offset: f32,
) -> RayHit {
    let mut hit = cast_ray(grid, position, Vec2::from_angle(facing + column_angle_offset));
    if hit.hit {
        hit.perpendicular_distance *= libm::cosf(column_angle_offset);
    }
    hit
}

pub fn project<G: Occupancy + ?Sized>(
    grid: &G,
    viewport_width: u32,
    fov: f32,
    facing: f32,
    position: Vec2,
) -> Vec<RayHit> {
    let width = viewport_width as f32;
    (0..viewport_width)
        .map(|i| {
            let offset = -fov / 2.0 + (i as f32 / width) * fov;
            cast_column(grid, position, facing, offset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Tile};

    const EPS: f32 = 1e-4;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        libm::fabsf(a - b) < eps
    }

    fn single_cell() -> Grid<Tile> {
        Grid::from_rows(&["###", "#.#", "###"])
    }

    fn hall() -> Grid<Tile> {
        Grid::from_rows(&[
            "#######", //
            "#.....#",
            "#.....#",
            "#.....#",
            "#######",
        ])
    }

    #[test]
    fn straight_ahead_hits_east_wall() {
        let g = single_cell();
        for frac in [0.1f32, 0.3, 0.5, 0.9] {
            let hit = cast_column(&g, Vec2::new(1.0 + frac, 1.5), 0.0, 0.0);
            assert!(hit.hit);
            assert_eq!(hit.side, Axis::X);
            assert_eq!(hit.cell, Coord2::new(2, 1));
            assert!(close(hit.perpendicular_distance, 1.0 - frac, EPS));
            assert!(close(hit.texture_u, 0.5, EPS));
        }
    }

    #[test]
    fn zero_x_component_steps_only_y() {
        let g = hall();
        let hit = cast_ray(&g, Vec2::new(2.5, 1.25), Vec2::new(0.0, 1.0));
        assert!(hit.hit);
        assert_eq!(hit.side, Axis::Y);
        assert_eq!(hit.cell, Coord2::new(2, 4));
        assert!(close(hit.perpendicular_distance, 2.75, EPS));
        assert!(!hit.perpendicular_distance.is_nan());
        assert!(close(hit.texture_u, 0.5, EPS));
    }

    #[test]
    fn negative_directions() {
        let g = hall();
        let west = cast_ray(&g, Vec2::new(3.25, 2.5), Vec2::new(-1.0, 0.0));
        assert_eq!(west.cell, Coord2::new(0, 2));
        assert!(close(west.perpendicular_distance, 2.25, EPS));

        let north = cast_ray(&g, Vec2::new(3.5, 3.75), Vec2::new(0.0, -1.0));
        assert_eq!(north.cell, Coord2::new(3, 0));
        assert!(close(north.perpendicular_distance, 2.75, EPS));
    }

    #[test]
    fn open_grid_reports_miss() {
        let g = Grid::new_filled(4, 4, Tile::Floor);
        let hit = cast_ray(&g, Vec2::new(1.5, 1.5), Vec2::new(0.0, 1.0));
        assert!(!hit.hit);
        assert!(hit.perpendicular_distance.is_infinite());
        assert_eq!(hit.cell, Coord2::new(1, 4));
        assert_eq!(hit.visible_distance(14.0), 14.0);
        assert_eq!(hit.wall_height(480.0), 0.0);
    }

    #[test]
    fn zero_vector_and_outside_origin_miss() {
        let g = hall();
        assert!(!cast_ray(&g, Vec2::new(2.5, 2.5), Vec2::ZERO).hit);
        assert!(!cast_ray(&g, Vec2::new(-3.0, 2.5), Vec2::new(1.0, 0.0)).hit);
    }

    #[test]
    fn perpendicular_distance_is_fisheye_free() {
        // Every column that lands on the far east wall reports the same depth.
        let g = hall();
        let pos = Vec2::new(1.5, 2.5);
        let hits = project(&g, 32, core::f32::consts::FRAC_PI_3, 0.0, pos);
        assert_eq!(hits.len(), 32);
        for h in &hits {
            assert!(h.hit);
            if h.side == Axis::X {
                assert!(close(h.perpendicular_distance, 4.5, EPS));
            }
        }
    }

    #[test]
    fn angled_column_reports_depth_not_ray_length() {
        let g = hall();
        let pos = Vec2::new(1.5, 2.5);
        let hit = cast_column(&g, pos, 0.0, 0.3);
        assert!(hit.hit);
        assert_eq!(hit.side, Axis::X);
        assert!(close(hit.perpendicular_distance, 4.5, 1e-3));

        // Texture offset still follows the true hit point on the wall.
        let raw = cast_ray(&g, pos, Vec2::from_angle(0.3));
        let y = pos.y + raw.perpendicular_distance * libm::sinf(0.3);
        assert!(close(hit.texture_u, y - libm::floorf(y), EPS));
        assert!(raw.perpendicular_distance > hit.perpendicular_distance);
    }

    #[test]
    fn project_sweeps_left_to_right() {
        let g = hall();
        let hits = project(&g, 4, core::f32::consts::FRAC_PI_2, 0.0, Vec2::new(2.2, 2.5));
        // First column looks up-left of east, hitting the north wall.
        assert_eq!(hits[0].side, Axis::Y);
        assert_eq!(hits[0].cell.y, 0);
        // Column at the middle looks due east.
        assert_eq!(hits[2].cell, Coord2::new(6, 2));
    }

    #[test]
    fn shading_helpers() {
        let g = single_cell();
        let hit = cast_column(&g, Vec2::new(1.5, 1.5), 0.0, 0.0);
        assert!(close(hit.wall_height(480.0), 960.0, 0.1));
        assert!(close(hit.brightness(10.0), 0.95, EPS));
        let far = RayHit::miss(Axis::Y, Coord2::ZERO);
        assert!(close(far.brightness(10.0), MIN_BRIGHTNESS, EPS));
        assert_eq!(hit.texture_column(64), 32);
        assert_eq!(hit.texture_column(0), 0);
    }
}
