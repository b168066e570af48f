//! Arguments that may be either constants or streams.

use crate::types::{Dimensions, Point2D};

use super::Observable;

/// An operator argument: a fixed value, or a stream of values.
///
/// Reactive arguments cause the consuming operator to recompute whenever
/// they emit. Constants count as having already emitted.
pub enum MaybeReactive<T> {
    /// A value that never changes.
    Constant(T),
    /// A stream whose latest value is used.
    Reactive(Observable<T>),
}

impl<T: Clone + 'static> MaybeReactive<T> {
    /// Wrap a constant.
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Whether this argument is backed by a stream.
    pub fn is_reactive(&self) -> bool {
        matches!(self, Self::Reactive(_))
    }

    /// View the argument as a stream; constants emit once on subscribe.
    pub fn into_observable(self) -> Observable<T> {
        match self {
            Self::Constant(value) => Observable::of(value),
            Self::Reactive(stream) => stream,
        }
    }
}

impl<T: Clone> Clone for MaybeReactive<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(value) => Self::Constant(value.clone()),
            Self::Reactive(stream) => Self::Reactive(stream.clone()),
        }
    }
}

impl<T> From<Observable<T>> for MaybeReactive<T> {
    fn from(stream: Observable<T>) -> Self {
        Self::Reactive(stream)
    }
}

impl<T> From<&Observable<T>> for MaybeReactive<T> {
    fn from(stream: &Observable<T>) -> Self {
        Self::Reactive(stream.clone())
    }
}

macro_rules! constant_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for MaybeReactive<$ty> {
                fn from(value: $ty) -> Self {
                    Self::Constant(value)
                }
            }
        )*
    };
}

constant_from!(f64, bool, i32, i64, u32, usize, String, Point2D, Dimensions);

impl From<&str> for MaybeReactive<String> {
    fn from(value: &str) -> Self {
        Self::Constant(value.to_owned())
    }
}
