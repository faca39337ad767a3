//! Cart kinematics along an arc-length parameterized track.
//!
//! - [`SpeedProfile`]: speed from a lift / coast / brake energy model
//! - [`estimate_frame`]: banked orientation from three track samples
//! - [`Track`]: curve + table + profile, queried by arc length
//! - [`RollerCoaster`]: owns a track and its layouts, rebuilt on update
//! - [`Ride`]: per-frame distance state driven by the caller's clock

mod frame;
mod ride;
mod roller_coaster;
mod speed;
mod track;

pub use frame::{estimate_frame, CartFrame, FrameEstimate};
pub use ride::Ride;
pub use roller_coaster::RollerCoaster;
pub use speed::{energy_speed, SpeedProfile, SpeedRegion};
pub use track::Track;
