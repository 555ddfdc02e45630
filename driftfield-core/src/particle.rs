//! The particle state machine: `Standing --move_to--> Moving --arrival--> Standing`.

use std::fmt;

use crate::error::ParticleError;
use crate::position::Position;

/// Speed used when `move_to` is not given a usable one.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Radius of a particle, either known up front or produced on demand.
///
/// A generator is called exactly once, when the particle is constructed.
pub enum Radius<'a> {
    Fixed(f64),
    Generated(Box<dyn FnOnce() -> f64 + 'a>),
}

impl<'a> Radius<'a> {
    pub fn generated(generator: impl FnOnce() -> f64 + 'a) -> Self {
        Radius::Generated(Box::new(generator))
    }

    fn resolve(self) -> f64 {
        match self {
            Radius::Fixed(radius) => radius,
            Radius::Generated(generator) => generator(),
        }
    }
}

impl From<f64> for Radius<'_> {
    fn from(radius: f64) -> Self {
        Radius::Fixed(radius)
    }
}

impl fmt::Debug for Radius<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radius::Fixed(radius) => f.debug_tuple("Fixed").field(radius).finish(),
            Radius::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Standing,
    Moving,
}

/// Where a particle is heading.
///
/// While standing this is the particle's own position with zero distance.
/// While moving `sin`/`cos` are the components of the unit vector from the
/// start point towards `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
    pub distance: f64,
    pub sin: f64,
    pub cos: f64,
}

impl Direction {
    pub fn at(position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
            distance: 0.0,
            sin: 0.0,
            cos: 0.0,
        }
    }

    pub fn towards(from: Position, to: Position) -> Self {
        let delta_x = to.x - from.x;
        let delta_y = to.y - from.y;
        let distance = (delta_x * delta_x + delta_y * delta_y).sqrt();

        Self {
            x: to.x,
            y: to.y,
            distance,
            sin: delta_y / distance,
            cos: delta_x / distance,
        }
    }

    pub fn destination(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    position: Position,
    radius: f64,
    status: Status,
    direction: Direction,
    start_point: Position,
    speed: f64,
    // Seconds-domain timestamp of the first tick observed after `move_to`
    motion_start: Option<f64>,
}

impl Particle {
    /// Creates a standing particle at `(x, y)`.
    ///
    /// `NaN` coordinates and a `NaN` radius fall back to zero.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::InvalidRadius`] if the resolved radius is negative.
    pub fn new<'a>(x: f64, y: f64, radius: impl Into<Radius<'a>>) -> Result<Self, ParticleError> {
        Self::at(Position::new(x, y), radius)
    }

    /// Same as [`Particle::new`] with the location given as a point.
    pub fn at<'a>(position: Position, radius: impl Into<Radius<'a>>) -> Result<Self, ParticleError> {
        let radius = or_zero(radius.into().resolve());
        if radius < 0.0 {
            return Err(ParticleError::InvalidRadius { radius });
        }

        let position = Position::new(or_zero(position.x), or_zero(position.y));
        Ok(Self {
            position,
            radius,
            status: Status::Standing,
            direction: Direction::at(position),
            start_point: position,
            speed: DEFAULT_SPEED,
            motion_start: None,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_moving(&self) -> bool {
        self.status == Status::Moving
    }

    pub fn direction(&self) -> &Direction {
        &self.direction
    }

    pub fn start_point(&self) -> Position {
        self.start_point
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn motion_start(&self) -> Option<f64> {
        self.motion_start
    }

    pub fn stop(&mut self) {
        self.status = Status::Standing;
        self.motion_start = None;
        self.direction = Direction::at(self.position);
    }

    /// Relocates the particle and leaves it standing there.
    pub fn stop_at(&mut self, position: Position) {
        self.position = position;
        self.stop();
    }

    /// Starts moving towards `(x, y)` at `speed` units per second.
    ///
    /// `None`, zero and `NaN` speeds fall back to [`DEFAULT_SPEED`]. A move onto
    /// the current position arrives immediately and leaves the particle standing.
    pub fn move_to(&mut self, x: f64, y: f64, speed: Option<f64>) {
        self.speed = speed
            .filter(|speed| *speed != 0.0 && !speed.is_nan())
            .unwrap_or(DEFAULT_SPEED);

        let direction = Direction::towards(self.position, Position::new(x, y));
        if !(direction.distance > 0.0) {
            self.stop();
            return;
        }

        self.status = Status::Moving;
        self.motion_start = None;
        self.direction = direction;
        self.start_point = self.position;
    }

    /// Advances the particle to the given tick and returns where it now is.
    ///
    /// Returns `None` while the particle is standing, which is the signal that
    /// it needs a new destination. The first tick after [`Particle::move_to`]
    /// only anchors the motion clock and reports the unchanged position.
    pub fn get_position(&mut self, tick_timestamp_ms: f64) -> Option<Position> {
        if self.status == Status::Standing {
            return None;
        }

        let time = tick_timestamp_ms / 1000.0;
        let Some(motion_start) = self.motion_start else {
            self.motion_start = Some(time);
            return Some(self.position);
        };

        let traveled = (time - motion_start) * self.speed;
        self.position = Position::new(
            self.start_point.x + self.direction.cos * traveled,
            self.start_point.y + self.direction.sin * traveled,
        );

        if traveled >= self.direction.distance {
            // Arrived or overshot: snap exactly onto the destination
            self.stop_at(self.direction.destination());
        }

        Some(self.position)
    }
}

fn or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_particle_is_standing_at_its_position() {
        let particle = Particle::new(3.0, 4.0, 2.0).unwrap();
        assert_eq!(particle.position(), Position::new(3.0, 4.0));
        assert_eq!(particle.radius(), 2.0);
        assert_eq!(particle.status(), Status::Standing);
        assert_eq!(particle.direction().destination(), particle.position());
        assert_eq!(particle.speed(), DEFAULT_SPEED);
        assert_eq!(particle.motion_start(), None);
    }

    #[test]
    fn negative_radius_fails_construction() {
        let result = Particle::new(0.0, 0.0, -1.0);
        assert_eq!(result, Err(ParticleError::InvalidRadius { radius: -1.0 }));
    }

    #[test]
    fn generated_radius_is_resolved_once() {
        let mut calls = 0;
        let particle = Particle::new(0.0, 0.0, Radius::generated(|| {
            calls += 1;
            7.5
        }))
        .unwrap();
        assert_eq!(particle.radius(), 7.5);
        assert_eq!(calls, 1);
    }

    #[test]
    fn negative_generated_radius_fails_construction() {
        let result = Particle::new(0.0, 0.0, Radius::generated(|| -0.5));
        assert!(matches!(result, Err(ParticleError::InvalidRadius { .. })));
    }

    #[test]
    fn nan_inputs_default_to_zero() {
        let particle = Particle::new(f64::NAN, 5.0, f64::NAN).unwrap();
        assert_eq!(particle.position(), Position::new(0.0, 5.0));
        assert_eq!(particle.radius(), 0.0);
    }

    #[test]
    fn standing_particle_reports_no_movement() {
        let mut particle = Particle::new(1.0, 1.0, 1.0).unwrap();
        assert_eq!(particle.get_position(1000.0), None);
        assert_eq!(particle.position(), Position::new(1.0, 1.0));
        assert_eq!(particle.motion_start(), None);
    }

    #[test]
    fn move_to_sets_up_direction_and_start_point() {
        let mut particle = Particle::new(1.0, 2.0, 1.0).unwrap();
        particle.move_to(4.0, 6.0, Some(3.0));

        assert_eq!(particle.status(), Status::Moving);
        assert_eq!(particle.start_point(), Position::new(1.0, 2.0));
        assert_eq!(particle.speed(), 3.0);
        let direction = particle.direction();
        assert_eq!(direction.destination(), Position::new(4.0, 6.0));
        assert_eq!(direction.distance, 5.0);
        assert!((direction.cos - 0.6).abs() < 1e-12);
        assert!((direction.sin - 0.8).abs() < 1e-12);
    }

    #[test]
    fn missing_or_zero_speed_defaults_to_one() {
        let mut particle = Particle::new(0.0, 0.0, 1.0).unwrap();
        particle.move_to(10.0, 0.0, None);
        assert_eq!(particle.speed(), 1.0);
        particle.move_to(10.0, 0.0, Some(0.0));
        assert_eq!(particle.speed(), 1.0);
        particle.move_to(10.0, 0.0, Some(f64::NAN));
        assert_eq!(particle.speed(), 1.0);
    }

    #[test]
    fn walks_to_target_and_stands() {
        let mut particle = Particle::new(0.0, 0.0, 1.0).unwrap();
        particle.move_to(10.0, 0.0, Some(5.0));

        assert_eq!(particle.get_position(1000.0), Some(Position::new(0.0, 0.0)));
        assert_eq!(particle.status(), Status::Moving);
        assert_eq!(particle.motion_start(), Some(1.0));

        assert_eq!(particle.get_position(2000.0), Some(Position::new(5.0, 0.0)));
        assert_eq!(particle.status(), Status::Moving);

        assert_eq!(particle.get_position(3000.0), Some(Position::new(10.0, 0.0)));
        assert_eq!(particle.status(), Status::Standing);
        assert_eq!(particle.motion_start(), None);

        assert_eq!(particle.get_position(4000.0), None);
        assert_eq!(particle.position(), Position::new(10.0, 0.0));
    }

    #[test]
    fn overshoot_snaps_to_destination() {
        let mut particle = Particle::new(0.0, 0.0, 1.0).unwrap();
        particle.move_to(3.0, 4.0, Some(100.0));
        particle.get_position(0.0);
        assert_eq!(particle.get_position(1000.0), Some(Position::new(3.0, 4.0)));
        assert_eq!(particle.status(), Status::Standing);
    }

    #[test]
    fn anchoring_at_timestamp_zero_counts() {
        let mut particle = Particle::new(0.0, 0.0, 1.0).unwrap();
        particle.move_to(0.0, 10.0, Some(2.0));
        particle.get_position(0.0);
        assert_eq!(particle.motion_start(), Some(0.0));
        assert_eq!(particle.get_position(1000.0), Some(Position::new(0.0, 2.0)));
    }

    #[test]
    fn new_move_restarts_from_current_position() {
        let mut particle = Particle::new(0.0, 0.0, 1.0).unwrap();
        particle.move_to(10.0, 0.0, Some(5.0));
        particle.get_position(0.0);
        particle.get_position(1000.0);

        particle.move_to(5.0, 10.0, Some(5.0));
        assert_eq!(particle.start_point(), Position::new(5.0, 0.0));
        assert_eq!(particle.motion_start(), None);
        assert_eq!(particle.get_position(5000.0), Some(Position::new(5.0, 0.0)));
        assert_eq!(particle.get_position(6000.0), Some(Position::new(5.0, 5.0)));
    }

    #[test]
    fn zero_distance_move_arrives_immediately() {
        let mut particle = Particle::new(2.0, 2.0, 1.0).unwrap();
        particle.move_to(2.0, 2.0, Some(4.0));
        assert_eq!(particle.status(), Status::Standing);
        assert_eq!(particle.direction(), &Direction::at(Position::new(2.0, 2.0)));
        assert_eq!(particle.get_position(1000.0), None);
    }

    #[test]
    fn stop_resets_direction_from_any_state() {
        let mut particle = Particle::new(0.0, 0.0, 1.0).unwrap();
        particle.move_to(10.0, 10.0, Some(3.0));
        particle.get_position(0.0);
        particle.get_position(1000.0);
        particle.stop();

        assert_eq!(particle.status(), Status::Standing);
        assert_eq!(particle.motion_start(), None);
        assert_eq!(particle.direction().destination(), particle.position());

        particle.stop();
        assert_eq!(particle.direction().destination(), particle.position());
    }

    #[test]
    fn stop_at_relocates_and_stands() {
        let mut particle = Particle::new(500.0, 20.0, 1.0).unwrap();
        particle.move_to(600.0, 20.0, Some(1.0));
        particle.stop_at(Position::new(300.0, 20.0));

        assert_eq!(particle.status(), Status::Standing);
        assert_eq!(particle.position(), Position::new(300.0, 20.0));
        assert_eq!(particle.direction().destination(), Position::new(300.0, 20.0));
    }

    proptest! {
        #[test]
        fn any_negative_radius_is_rejected(radius in -1.0e6f64..0.0) {
            let result = Particle::new(0.0, 0.0, radius);
            prop_assert_eq!(result, Err(ParticleError::InvalidRadius { radius }));
        }

        #[test]
        fn any_non_negative_radius_is_kept(radius in 0.0f64..1.0e6) {
            let particle = Particle::new(0.0, 0.0, radius).unwrap();
            prop_assert_eq!(particle.radius(), radius);
        }

        #[test]
        fn position_stays_on_the_segment(
            start in (-1000.0f64..1000.0, -1000.0f64..1000.0),
            offset in (1.0f64..500.0, 1.0f64..500.0),
            speed in 1.0f64..200.0,
            anchor_ms in 0.0f64..1.0e6,
            elapsed_ms in 1.0f64..10_000.0,
        ) {
            let start = Position::from(start);
            let target = Position::new(start.x + offset.0, start.y - offset.1);
            let distance = start.distance_to(target);

            let mut particle = Particle::at(start, 1.0).unwrap();
            particle.move_to(target.x, target.y, Some(speed));
            prop_assert_eq!(particle.get_position(anchor_ms), Some(start));
            prop_assert!(particle.is_moving());

            let position = particle.get_position(anchor_ms + elapsed_ms).unwrap();
            let traveled = elapsed_ms / 1000.0 * speed;
            let tolerance = 1e-6 * distance.max(1.0);

            prop_assert!((start.distance_to(position) - traveled.min(distance)).abs() < tolerance);
            prop_assert!((position.distance_to(target) - (distance - traveled).max(0.0)).abs() < tolerance);
        }

        #[test]
        fn arrival_is_exact_and_final(
            target in (1.0f64..1000.0, 1.0f64..1000.0),
            speed in 1.0f64..200.0,
        ) {
            let mut particle = Particle::new(0.0, 0.0, 1.0).unwrap();
            particle.move_to(target.0, target.1, Some(speed));
            particle.get_position(0.0);

            let distance = Position::default().distance_to(Position::from(target));
            let arrival_ms = (distance / speed) * 1000.0 + 1.0;
            prop_assert_eq!(particle.get_position(arrival_ms), Some(Position::from(target)));
            prop_assert_eq!(particle.status(), Status::Standing);
            prop_assert_eq!(particle.get_position(arrival_ms + 16.0), None);
        }
    }
}
