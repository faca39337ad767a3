//! Headless ride: drives a coaster the way a render loop would.
//!
//! Usage:
//! ```text
//! cargo run --example ride                 # 20 s at 60 fps
//! RUST_LOG=coaster=debug cargo run --example ride
//! ```

use coaster::math::Point3;
use coaster::{CoasterConfig, HermiteCurve, Result, Ride, RollerCoaster, TangentRule};

const CART_COUNT: usize = 3;
const CART_LENGTH: f64 = 1.6;
const FRAME_DT: f64 = 1.0 / 60.0;
const FRAMES: usize = 20 * 60;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for coaster.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("ride=info".parse().unwrap_or_default())
        .add_directive("coaster=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let control_points = [
        Point3::new(0.0, 0.0, 10.0),
        Point3::new(10.0, 8.0, 0.0),
        Point3::new(0.0, 15.0, -10.0),
        Point3::new(-10.0, 6.0, 0.0),
        Point3::new(-6.0, 1.0, 8.0),
    ];
    let curve = HermiteCurve::new(&control_points, TangentRule::CatmullRom)?;
    let coaster = RollerCoaster::new(curve, &CoasterConfig::default())?;
    tracing::info!(
        pieces = coaster.pieces().len(),
        supports = coaster.supports().len(),
        props = coaster.props().len(),
        "layouts ready"
    );

    let mut ride = Ride::default();
    for frame in 0..FRAMES {
        let s = ride.advance(&coaster, FRAME_DT);
        let carts = ride.cart_transforms(&coaster, CART_COUNT, CART_LENGTH);
        if frame % 60 == 0 {
            let lead = coaster.frame_at(s);
            tracing::info!(
                t = frame / 60,
                s = %format!("{s:.2}"),
                speed = %format!("{:.2}", coaster.speed_at(s)),
                height = %format!("{:.2}", lead.position.y),
                bank = %format!("{:.3}", lead.up.y),
                carts = carts.len(),
                "tick"
            );
        }
    }
    Ok(())
}
