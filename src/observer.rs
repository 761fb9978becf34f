use crate::coord::Coord2;
use crate::room::Room;

/// Hooks into maze generation, for debugging views and tests.
pub trait GenerationObserver {
    fn on_passage_carved(&mut self, _from: Coord2, _to: Coord2) {}
    fn on_cycle_opened(&mut self, _wall: Coord2) {}
    fn on_room_placed(&mut self, _room: &Room) {}
    fn on_endpoint_forced(&mut self, _end: Coord2) {}
}

pub struct NoOpGenerationObserver;
impl GenerationObserver for NoOpGenerationObserver {}
