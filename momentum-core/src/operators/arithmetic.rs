//! Component-wise arithmetic on scalars, points, and sizes.

use crate::observable::{MaybeReactive, Observable};
use crate::operators::ReactiveMapOptions;
use crate::types::Arithmetic;

/// A binary operation applied to each component.
pub type MathOperation = fn(f64, f64) -> f64;

impl<T: Arithmetic> Observable<T> {
    /// Apply `operation` between each upstream value and `operand`.
    ///
    /// Points and sizes are combined one component at a time. A reactive
    /// operand recomputes the result whenever it changes.
    pub fn math_operator(&self, operand: impl Into<MaybeReactive<T>>, operation: MathOperation) -> Observable<T> {
        self.math_operator_with(operand, ReactiveMapOptions::default(), operation)
    }

    /// `math_operator`, with control over which changes trigger a recompute.
    pub fn math_operator_with(
        &self,
        operand: impl Into<MaybeReactive<T>>,
        options: ReactiveMapOptions,
        operation: MathOperation,
    ) -> Observable<T> {
        self.reactive_map_with(operand, options, move |value, operand| {
            value.combine(&operand, operation)
        })
    }

    pub fn added_by(&self, amount: impl Into<MaybeReactive<T>>) -> Observable<T> {
        self.math_operator(amount, |value, amount| value + amount)
    }

    pub fn subtracted_by(&self, amount: impl Into<MaybeReactive<T>>) -> Observable<T> {
        self.math_operator(amount, |value, amount| value - amount)
    }

    pub fn multiplied_by(&self, factor: impl Into<MaybeReactive<T>>) -> Observable<T> {
        self.math_operator(factor, |value, factor| value * factor)
    }

    pub fn divided_by(&self, divisor: impl Into<MaybeReactive<T>>) -> Observable<T> {
        self.math_operator(divisor, |value, divisor| value / divisor)
    }

    /// Raise every value to at least `limit`.
    pub fn lower_bound(&self, limit: impl Into<MaybeReactive<T>>) -> Observable<T> {
        self.math_operator(limit, f64::max)
    }

    /// Cap every value at `limit`.
    pub fn upper_bound(&self, limit: impl Into<MaybeReactive<T>>) -> Observable<T> {
        self.math_operator(limit, f64::min)
    }

    /// Keep every value between `min` and `max`. A missing bound is open.
    pub fn clamp_to(&self, min: Option<MaybeReactive<T>>, max: Option<MaybeReactive<T>>) -> Observable<T> {
        let bounded = match min {
            Some(min) => self.lower_bound(min),
            None => self.clone(),
        };

        match max {
            Some(max) => bounded.upper_bound(max),
            None => bounded,
        }
    }
}
