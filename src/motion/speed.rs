use crate::config::MotionParams;
use crate::math::{wrap_periodic, G};
use crate::parameterize::ArcLengthTable;

/// Which part of the speed model applies at a given distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedRegion {
    /// Chain lift up to the highest point: constant minimum speed.
    Lift,
    /// Unpowered run: speed from conservation of energy.
    Cruise,
    /// Final stretch: linear braking down to the minimum speed.
    Braking,
}

/// Speed as a function of arc length, derived once per parameter update.
///
/// The lap splits into three regions. Before `freefall_start` (the highest
/// point) the cart is hauled at `min_speed`. From there to `decel_start`
/// it coasts, with `v = sqrt(2 g (H - y) + min_speed^2)`. After
/// `decel_start` speed falls linearly to `min_speed` at the end of the lap.
/// Braking takes precedence when the highest point lies past `decel_start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedProfile {
    min_speed: f64,
    max_height: f64,
    freefall_start: f64,
    decel_start: f64,
    decel_speed: f64,
    total_length: f64,
}

impl SpeedProfile {
    /// Derives the profile for `table` and `params`.
    ///
    /// `height_at` returns the curve height at an arc length; it is called
    /// at most once, at the start of braking.
    ///
    /// Braking starts from whatever speed the lift or cruise region gives
    /// just before `decel_start`, so speed stays continuous there even when
    /// braking begins before the highest point.
    #[must_use]
    pub fn new(
        params: &MotionParams,
        table: &ArcLengthTable,
        height_at: impl Fn(f64) -> f64,
    ) -> Self {
        let total_length = table.total_length();
        let max_height = table.max_height();
        let freefall_start = table.max_height_position();
        let decel_start = total_length * params.decel_fraction;
        let decel_speed = if decel_start < freefall_start {
            params.min_speed
        } else {
            energy_speed(max_height, height_at(decel_start), params.min_speed)
        };
        Self {
            min_speed: params.min_speed,
            max_height,
            freefall_start,
            decel_start,
            decel_speed,
            total_length,
        }
    }

    /// Speed on the lift and the floor everywhere else.
    #[must_use]
    pub fn min_speed(&self) -> f64 {
        self.min_speed
    }

    /// Global maximum height `H` used as the energy reference.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Arc length of the highest point, where the lift ends.
    #[must_use]
    pub fn freefall_start(&self) -> f64 {
        self.freefall_start
    }

    /// Arc length where braking begins.
    #[must_use]
    pub fn decel_start(&self) -> f64 {
        self.decel_start
    }

    /// Speed at the start of braking.
    #[must_use]
    pub fn decel_speed(&self) -> f64 {
        self.decel_speed
    }

    /// Lap length the profile was derived for.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Region of the model that applies at arc length `s` (wrapped).
    #[must_use]
    pub fn region(&self, s: f64) -> SpeedRegion {
        let s = wrap_periodic(s, self.total_length);
        if s > self.decel_start {
            SpeedRegion::Braking
        } else if s < self.freefall_start {
            SpeedRegion::Lift
        } else {
            SpeedRegion::Cruise
        }
    }

    /// Speed at arc length `s`, given the curve height there.
    ///
    /// Never below `min_speed`.
    #[must_use]
    pub fn speed_at(&self, s: f64, height: f64) -> f64 {
        let s = wrap_periodic(s, self.total_length);
        match self.region(s) {
            SpeedRegion::Braking => {
                let span = self.total_length - self.decel_start;
                let progress = (s - self.decel_start) / span;
                let v = self.decel_speed + progress * (self.min_speed - self.decel_speed);
                v.max(self.min_speed)
            }
            SpeedRegion::Lift => self.min_speed,
            SpeedRegion::Cruise => energy_speed(self.max_height, height, self.min_speed),
        }
    }
}

/// Speed after dropping from `max_height` to `height`, having crossed the
/// top at `min_speed`. Floored at `min_speed`.
#[must_use]
pub fn energy_speed(max_height: f64, height: f64, min_speed: f64) -> f64 {
    let radicand = (2.0 * G * (max_height - height) + min_speed * min_speed).max(0.0);
    radicand.sqrt().max(min_speed)
}
