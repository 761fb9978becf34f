use crate::coord::Coord2;

/// Read-only walkability view shared by the solver, the raycaster and player
/// collision. Anything outside `width × height` must report closed.
pub trait Occupancy {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn is_open(&self, coord: Coord2) -> bool;

    #[inline]
    fn is_opaque(&self, coord: Coord2) -> bool {
        !self.is_open(coord)
    }

    #[inline]
    fn in_bounds(&self, coord: Coord2) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width() as i32
            && coord.y < self.height() as i32
    }
}
