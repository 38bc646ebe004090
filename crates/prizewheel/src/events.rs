use arcpaint::Point;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One pointer sample from the host. Timestamps come from the host's event
/// stream rather than a clock read, so gesture handling stays replayable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    pub timestamp: Duration,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Point, timestamp: Duration) -> Self {
        Self {
            phase,
            position,
            timestamp,
        }
    }

    pub fn down(position: Point, timestamp: Duration) -> Self {
        Self::new(PointerPhase::Down, position, timestamp)
    }

    pub fn moved(position: Point, timestamp: Duration) -> Self {
        Self::new(PointerPhase::Move, position, timestamp)
    }

    pub fn up(position: Point, timestamp: Duration) -> Self {
        Self::new(PointerPhase::Up, position, timestamp)
    }
}
