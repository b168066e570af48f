//! Velocity Estimation
//!
//! Estimates how fast a stream of positions is moving, in units per
//! millisecond.
//!
//! # Algorithm
//!
//! The estimator keeps the last `MAXIMUM_INCOMING_DISPATCHES` samples, each
//! stamped with the time it arrived. On every pulse it:
//!
//! 1. Discards samples at least `MAXIMUM_AGE` milliseconds older than the
//!    pulse.
//! 2. Walks backward from the newest sample while consecutive segments keep
//!    moving in the same direction, and takes the slope from the oldest such
//!    sample to the newest. A single anomalous sample therefore cannot flip
//!    the result.
//! 3. Clamps the magnitude to `maximum_velocity`. With fewer than three
//!    samples the data is too sparse to trust, so an overly fast estimate
//!    becomes `default_velocity` instead.
//!
//! Points are estimated one axis at a time.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::observable::{Observable, Observer, Subscription};
use crate::scheduler::Clock;
use crate::types::{Point2D, Timestamped};

/// Samples older than this, in milliseconds, are ignored.
pub const MAXIMUM_AGE: f64 = 250.0;

/// Number of recent samples considered.
pub const MAXIMUM_INCOMING_DISPATCHES: usize = 5;

/// Default cap on the estimate's magnitude, in units per millisecond.
pub const MAXIMUM_VELOCITY: f64 = 5.0;

/// Magnitude used when a sparse window produces an estimate above the cap.
pub const DEFAULT_VELOCITY: f64 = 1.0;

/// Tuning for the velocity estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityOptions {
    pub maximum_velocity: f64,
    pub default_velocity: f64,
}

impl Default for VelocityOptions {
    fn default() -> Self {
        Self {
            maximum_velocity: MAXIMUM_VELOCITY,
            default_velocity: DEFAULT_VELOCITY,
        }
    }
}

type Window<T> = SmallVec<[Timestamped<T>; MAXIMUM_INCOMING_DISPATCHES]>;

/// Values whose rate of change can be estimated.
pub trait Kinematic: Clone + 'static {
    /// Estimate velocity from samples ordered oldest first.
    fn estimate_velocity(samples: &[Timestamped<Self>], options: &VelocityOptions) -> Self;
}

impl Kinematic for f64 {
    fn estimate_velocity(samples: &[Timestamped<Self>], options: &VelocityOptions) -> Self {
        let axis: SmallVec<[(f64, f64); MAXIMUM_INCOMING_DISPATCHES]> =
            samples.iter().map(|sample| (sample.value, sample.timestamp)).collect();

        estimate_axis(&axis, options)
    }
}

impl Kinematic for Point2D {
    fn estimate_velocity(samples: &[Timestamped<Self>], options: &VelocityOptions) -> Self {
        let x: SmallVec<[(f64, f64); MAXIMUM_INCOMING_DISPATCHES]> =
            samples.iter().map(|sample| (sample.value.x, sample.timestamp)).collect();
        let y: SmallVec<[(f64, f64); MAXIMUM_INCOMING_DISPATCHES]> =
            samples.iter().map(|sample| (sample.value.y, sample.timestamp)).collect();

        Point2D {
            x: estimate_axis(&x, options),
            y: estimate_axis(&y, options),
        }
    }
}

/// Change in value over change in time; 0 when no time has passed.
fn slope(delta_value: f64, delta_time: f64) -> f64 {
    if delta_time == 0.0 {
        0.0
    } else {
        delta_value / delta_time
    }
}

/// Estimate one axis from `(value, timestamp)` pairs, oldest first.
fn estimate_axis(samples: &[(f64, f64)], options: &VelocityOptions) -> f64 {
    let Some(&(last_value, last_time)) = samples.last() else {
        return 0.0;
    };
    if samples.len() < 2 {
        return 0.0;
    }

    let mut velocity = 0.0;
    let (mut next_value, mut next_time) = (last_value, last_time);

    for &(value, time) in samples[..samples.len() - 1].iter().rev() {
        let average = slope(last_value - value, last_time - time);
        let pairwise = slope(next_value - value, next_time - time);

        if velocity != 0.0 && (pairwise > 0.0) != (velocity > 0.0) {
            break;
        }
        velocity = average;

        next_value = value;
        next_time = time;
    }

    if velocity.abs() > options.maximum_velocity {
        let direction = velocity.signum();

        velocity = if samples.len() < 3 {
            direction * options.default_velocity
        } else {
            direction * options.maximum_velocity
        };
    }

    velocity
}

/// Estimate the velocity of `value` every time `pulse` emits.
///
/// Samples and pulses are timestamped with `clock`. A pulse that arrives
/// before any value, or with only one recent sample, produces zero.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use momentum_core::{get_velocity, ManualClock, MemorylessSubject, VelocityOptions};
///
/// let clock = ManualClock::new();
/// let position = MemorylessSubject::new();
/// let pulse = MemorylessSubject::new();
///
/// let velocity = get_velocity(
///     &position.observable(),
///     &pulse.observable(),
///     Rc::new(clock.clone()),
///     VelocityOptions::default(),
/// );
/// velocity.subscribe_fn(|v: f64| println!("{v} px/ms")).unwrap();
///
/// position.next(0.0);
/// clock.advance(10.0);
/// position.next(5.0);
/// pulse.next(());
/// ```
pub fn get_velocity<T, P>(
    value: &Observable<T>,
    pulse: &Observable<P>,
    clock: Rc<dyn Clock>,
    options: VelocityOptions,
) -> Observable<T>
where
    T: Kinematic,
    P: 'static,
{
    let samples = value.timestamp(Rc::clone(&clock)).sliding_window(MAXIMUM_INCOMING_DISPATCHES);
    let pulses = pulse.timestamp(clock);

    Observable::new(move |observer: Observer<T>| {
        let latest: Rc<RefCell<Vec<Timestamped<T>>>> = Rc::new(RefCell::new(Vec::new()));

        let trailing = {
            let latest = Rc::clone(&latest);
            samples.subscribe_fn(move |window| *latest.borrow_mut() = window)?
        };

        let estimates = {
            let latest = Rc::clone(&latest);
            pulses.subscribe_fn(move |Timestamped { timestamp: now, .. }| {
                let recent: Window<T> = latest
                    .borrow()
                    .iter()
                    .filter(|sample| now - sample.timestamp < MAXIMUM_AGE)
                    .cloned()
                    .collect();

                observer.next(T::estimate_velocity(&recent, &options));
            })
        };

        let estimates = match estimates {
            Ok(estimates) => estimates,
            Err(error) => {
                trailing.unsubscribe();
                return Err(error);
            }
        };

        Ok(Subscription::new(move || {
            trailing.unsubscribe();
            estimates.unsubscribe();
        }))
    })
}

impl<T: Kinematic> Observable<T> {
    /// Estimate this stream's velocity each time `pulse` emits.
    ///
    /// See `get_velocity`.
    pub fn velocity<P: 'static>(&self, pulse: &Observable<P>, clock: Rc<dyn Clock>) -> Observable<T> {
        get_velocity(self, pulse, clock, VelocityOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(f64, f64)]) -> Vec<Timestamped<f64>> {
        points
            .iter()
            .map(|&(value, timestamp)| Timestamped { value, timestamp })
            .collect()
    }

    fn estimate(points: &[(f64, f64)]) -> f64 {
        f64::estimate_velocity(&samples(points), &VelocityOptions::default())
    }

    #[test]
    fn steady_motion() {
        assert_eq!(estimate(&[(1.0, 0.0), (7.0, 5.0), (11.0, 10.0)]), 1.0);
        assert_eq!(estimate(&[(11.0, 0.0), (7.0, 5.0), (1.0, 10.0)]), -1.0);
    }

    #[test]
    fn too_few_samples() {
        assert_eq!(estimate(&[]), 0.0);
        assert_eq!(estimate(&[(3.0, 10.0)]), 0.0);
    }

    #[test]
    fn stops_at_direction_change() {
        // The dip from 7 to 1 disagrees with the later rise, so only the
        // last segment counts.
        assert_eq!(estimate(&[(7.0, 0.0), (1.0, 10.0), (11.0, 20.0)]), 1.0);
    }

    #[test]
    fn sparse_fast_motion_uses_default_velocity() {
        let options = VelocityOptions {
            maximum_velocity: 7.0,
            default_velocity: 3.0,
        };
        let fast = samples(&[(7.0, 0.0), (1000.0, 20.0)]);

        assert_eq!(f64::estimate_velocity(&fast, &options), 3.0);
    }

    #[test]
    fn dense_fast_motion_is_capped() {
        let options = VelocityOptions {
            maximum_velocity: 7.0,
            default_velocity: 3.0,
        };
        let fast = samples(&[(1.0, 0.0), (3.0, 1.0), (6.0, 2.0), (9.0, 3.0), (100.0, 4.0)]);

        assert_eq!(f64::estimate_velocity(&fast, &options), 7.0);
    }

    #[test]
    fn identical_timestamps_do_not_produce_nan() {
        let velocity = estimate(&[(1.0, 5.0), (4.0, 5.0), (9.0, 5.0)]);
        assert!(velocity.is_finite());
    }

    #[test]
    fn points_are_estimated_per_axis() {
        let points = vec![
            Timestamped { value: Point2D::new(0.0, 0.0), timestamp: 0.0 },
            Timestamped { value: Point2D::new(10.0, 20.0), timestamp: 16.0 },
            Timestamped { value: Point2D::new(32.0, 64.0), timestamp: 32.0 },
        ];

        assert_eq!(
            Point2D::estimate_velocity(&points, &VelocityOptions::default()),
            Point2D::new(1.0, 2.0)
        );
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: VelocityOptions = serde_json::from_str(r#"{ "maximum_velocity": 2.5 }"#).unwrap();
        assert_eq!(options.maximum_velocity, 2.5);
        assert_eq!(options.default_velocity, DEFAULT_VELOCITY);
    }
}
