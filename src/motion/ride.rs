use crate::math::{wrap_periodic, Matrix4, Point3};

use super::roller_coaster::RollerCoaster;

/// Distance state of a train, advanced once per rendered frame.
///
/// The frame driver owns the clock; `Ride` only integrates
/// `s += speed(s) * dt * playback_speed` and keeps `s` within one lap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ride {
    distance: f64,
    playback_speed: f64,
    playing: bool,
}

impl Default for Ride {
    fn default() -> Self {
        Self {
            distance: 0.0,
            playback_speed: 1.0,
            playing: true,
        }
    }
}

impl Ride {
    #[must_use]
    pub fn new(playback_speed: f64) -> Self {
        Self {
            playback_speed,
            ..Self::default()
        }
    }

    /// Arc length of the lead position, in `[0, total_length)`.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[must_use]
    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }

    pub fn set_playback_speed(&mut self, playback_speed: f64) {
        self.playback_speed = playback_speed;
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Moves back to the start of the lap.
    pub fn reset(&mut self) {
        self.distance = 0.0;
    }

    /// Advances by one frame of `dt` seconds and returns the new distance.
    ///
    /// Does nothing while paused.
    pub fn advance(&mut self, coaster: &RollerCoaster, dt: f64) -> f64 {
        if self.playing {
            let step = coaster.speed_at(self.distance) * dt * self.playback_speed;
            self.distance = wrap_periodic(self.distance + step, coaster.total_length());
        }
        self.distance
    }

    /// Transforms for a train of `cart_count` carts, `cart_length` apart,
    /// centred on the current distance.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cart_transforms(
        &self,
        coaster: &RollerCoaster,
        cart_count: usize,
        cart_length: f64,
    ) -> Vec<Matrix4> {
        let half_train = cart_length * 0.5 * cart_count.saturating_sub(1) as f64;
        (0..cart_count)
            .map(|i| coaster.transform_at(self.distance + cart_length * i as f64 - half_train))
            .collect()
    }

    /// Point a following camera should track.
    #[must_use]
    pub fn camera_target(&self, coaster: &RollerCoaster) -> Point3 {
        coaster.position_at(self.distance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CoasterConfig;
    use crate::test_curves::hill;
    use approx::assert_relative_eq;

    fn coaster() -> RollerCoaster {
        RollerCoaster::new(hill(), &CoasterConfig::default()).unwrap()
    }

    #[test]
    fn advance_uses_speed_and_playback() {
        let c = coaster();
        let mut ride = Ride::new(2.0);
        // Start of the lap is on the lift at min speed
        let s = ride.advance(&c, 0.1);
        assert_relative_eq!(s, 5.0 * 0.1 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn paused_ride_stays_put() {
        let c = coaster();
        let mut ride = Ride::default();
        ride.set_playing(false);
        assert_relative_eq!(ride.advance(&c, 1.0), 0.0);
    }

    #[test]
    fn distance_wraps_after_a_lap() {
        let c = coaster();
        let mut ride = Ride::default();
        let mut laps_time = 0.0;
        for _ in 0..100_000 {
            let before = ride.distance();
            let after = ride.advance(&c, 1.0 / 60.0);
            laps_time += 1.0 / 60.0;
            assert!(after < c.total_length());
            if after < before {
                break;
            }
        }
        assert!(laps_time > 1.0);
        assert!(ride.distance() < 1.0);
    }

    #[test]
    fn train_is_centred() {
        let c = coaster();
        let mut ride = Ride::default();
        ride.advance(&c, 2.0);
        let carts = ride.cart_transforms(&c, 3, 1.6);
        assert_eq!(carts.len(), 3);
        let middle = carts[1].transform_point(&Point3::origin());
        assert_relative_eq!(middle, ride.camera_target(&c), epsilon = 1e-9);
        let first = carts[0].transform_point(&Point3::origin());
        assert_relative_eq!(first, c.position_at(ride.distance() - 1.6), epsilon = 1e-9);
    }

    #[test]
    fn reset_returns_to_start() {
        let c = coaster();
        let mut ride = Ride::default();
        ride.advance(&c, 1.0);
        ride.reset();
        assert_relative_eq!(ride.distance(), 0.0);
    }

    #[test]
    fn no_carts() {
        let c = coaster();
        assert!(Ride::default().cart_transforms(&c, 0, 1.6).is_empty());
    }
}
