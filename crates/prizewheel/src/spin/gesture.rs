use crate::events::{PointerEvent, PointerPhase};
use crate::spin::geometry::{Quadrant, QuadrantSet, angle_from_center};
use crate::spin::{
    FLING_DAMPENING, FLING_STOP_THRESHOLD, FLING_TICK_DIVISOR, INITIAL_FLING_DAMPENING,
    MAX_FLING_VELOCITY, MIN_FLING_VELOCITY, VELOCITY_SAMPLES, VELOCITY_WINDOW_MS,
};
use arcpaint::Point;
use std::time::Duration;

/// What the wheel should do for the current animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// No fling in progress.
    Idle,
    /// Turn the wheel by this many degrees.
    Rotate(f64),
    /// The fling ran out of velocity; the wheel is at rest.
    Settle,
    /// A new touch cut the fling short; no resting section is reported.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Flinging,
}

/// Velocity estimate over the most recent pointer samples.
///
/// Keeps up to [`VELOCITY_SAMPLES`] positions and measures from the oldest
/// sample still inside the [`VELOCITY_WINDOW_MS`] window, so a slow wind-up
/// drag still flings when the hand speeds up at the end.
#[derive(Debug, Default)]
pub struct FlingDetector {
    samples: Vec<(Point, Duration)>,
}

impl FlingDetector {
    pub fn begin(&mut self, position: Point, timestamp: Duration) {
        self.samples.clear();
        self.samples.push((position, timestamp));
    }

    pub fn push(&mut self, position: Point, timestamp: Duration) {
        if self.samples.len() == VELOCITY_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push((position, timestamp));
    }

    /// Classifies a release. Returns the anchor sample and the clamped
    /// velocity in px/s, or `None` when the release is too slow to fling.
    pub fn velocity_at(&self, position: Point, timestamp: Duration) -> Option<(Point, (f64, f64))> {
        let window = Duration::from_millis(VELOCITY_WINDOW_MS);
        let (anchor, anchor_ts) = self
            .samples
            .iter()
            .find(|(_, ts)| timestamp.saturating_sub(*ts) <= window)
            .copied()?;

        let dt = timestamp.saturating_sub(anchor_ts).as_secs_f64();
        if dt == 0.0 {
            return None;
        }
        let vx = ((position.x - anchor.x) / dt).clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY);
        let vy = ((position.y - anchor.y) / dt).clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY);
        if vx.hypot(vy) < MIN_FLING_VELOCITY {
            return None;
        }
        Some((anchor, (vx, vy)))
    }
}

/// Drag and fling state machine for the wheel.
///
/// The host feeds pointer events in and pumps [`GestureEngine::tick`] once
/// per frame while a fling runs. Everything is plain `&mut self` state; a
/// touch landing mid-fling flips `rotation_allowed` and the next tick aborts.
#[derive(Debug)]
pub struct GestureEngine {
    width: f64,
    height: f64,
    start_angle: f64,
    dragging: bool,
    rotation_allowed: bool,
    quadrants: QuadrantSet,
    fling: Option<f64>,
    detector: FlingDetector,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            start_angle: 0.0,
            dragging: false,
            rotation_allowed: true,
            quadrants: QuadrantSet::default(),
            fling: None,
            detector: FlingDetector::default(),
        }
    }

    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn phase(&self) -> GesturePhase {
        if self.fling.is_some() {
            GesturePhase::Flinging
        } else if self.dragging {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.fling.is_some()
    }

    /// Feeds one pointer sample through the state machine. A `Move` yields
    /// the drag delta in degrees for the caller to apply to the rotation.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<f64> {
        let quadrant = Quadrant::of_position(event.position, self.width, self.height);
        let delta = match event.phase {
            PointerPhase::Down => {
                self.rotation_allowed = false;
                self.dragging = true;
                self.quadrants.clear();
                self.start_angle = angle_from_center(event.position, self.width, self.height);
                self.detector.begin(event.position, event.timestamp);
                None
            }
            PointerPhase::Move => {
                let current = angle_from_center(event.position, self.width, self.height);
                let delta = self.start_angle - current;
                self.start_angle = current;
                self.detector.push(event.position, event.timestamp);
                Some(delta)
            }
            PointerPhase::Up => {
                self.rotation_allowed = true;
                self.dragging = false;
                if let Some((anchor, (vx, vy))) =
                    self.detector.velocity_at(event.position, event.timestamp)
                {
                    self.begin_fling(anchor, event.position, vx, vy);
                }
                None
            }
        };
        // every phase leaves a quadrant behind for the fling correction
        self.quadrants.insert(quadrant);
        delta
    }

    /// Starts decelerating from a recognized fling. Public so a host with its
    /// own recognizer can drive the wheel directly.
    pub fn begin_fling(&mut self, start: Point, end: Point, velocity_x: f64, velocity_y: f64) {
        let from = Quadrant::of_position(start, self.width, self.height);
        let to = Quadrant::of_position(end, self.width, self.height);

        let sum = velocity_x + velocity_y;
        let signed = if self.reverses_direction(from, to, velocity_x, velocity_y) {
            -sum
        } else {
            sum
        };

        log::debug!(
            "fling {:?} to {:?} at ({}, {}) px/s",
            from, to, velocity_x, velocity_y
        );
        self.fling = Some(signed / INITIAL_FLING_DAMPENING);
        self.rotation_allowed = true;
        self.dragging = false;
    }

    /// Swipes on the lower half of the wheel move it against the raw velocity
    /// sum. The table is asymmetric: first-to-third reverses while
    /// third-to-first does not, and second-to-fourth only reverses when the
    /// gesture passed through the third quadrant.
    fn reverses_direction(&self, from: Quadrant, to: Quadrant, vx: f64, vy: f64) -> bool {
        use Quadrant::*;

        match (from, to) {
            (Second, Second) => vx.abs() < vy.abs(),
            (Fourth, Fourth) => vx.abs() > vy.abs(),
            (Third, Third) | (First, Third) => true,
            (Second, Third) | (Third, Second) => true,
            (Third, Fourth) | (Fourth, Third) => true,
            (Second, Fourth) | (Fourth, Second) => self.quadrants.contains(Third),
            _ => false,
        }
    }

    /// Advances the fling by one frame.
    pub fn tick(&mut self) -> Tick {
        let Some(velocity) = self.fling else {
            return Tick::Idle;
        };
        if !self.rotation_allowed {
            self.fling = None;
            return Tick::Abort;
        }
        if velocity.abs() > FLING_STOP_THRESHOLD {
            self.fling = Some(velocity / FLING_DAMPENING);
            Tick::Rotate(velocity / FLING_TICK_DIVISOR)
        } else {
            self.fling = None;
            Tick::Settle
        }
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}
