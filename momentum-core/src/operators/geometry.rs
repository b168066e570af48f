//! Distances and coordinate conversions.

use crate::observable::Observable;
use crate::types::{Arithmetic, Point2D, PolarCoords};

impl<T: Arithmetic> Observable<T> {
    /// Emit how far each value is from `origin`.
    pub fn distance_from(&self, origin: T) -> Observable<f64> {
        self.map(move |value| value.distance(&origin))
    }
}

impl Observable<Point2D> {
    /// Convert each point to a distance from the origin and an angle in
    /// radians.
    pub fn to_polar(&self) -> Observable<PolarCoords> {
        self.map(|Point2D { x, y }| PolarCoords {
            distance: x.hypot(y),
            angle: y.atan2(x),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn distance_from_point_and_scalar() {
        let points = Observable::of(Point2D::new(3.0, 4.0)).distance_from(Point2D::default());
        assert_eq!(points.read(), Ok(5.0));

        let scalars = Observable::of(-2.0_f64).distance_from(3.0);
        assert_eq!(scalars.read(), Ok(5.0));
    }

    #[test]
    fn polar_angle_is_measured_from_x_axis() {
        let polar = Observable::of(Point2D::new(0.0, 2.0)).to_polar().read().unwrap();

        assert_eq!(polar.distance, 2.0);
        assert!((polar.angle - FRAC_PI_2).abs() < 1e-12);
    }
}
