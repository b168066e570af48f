//! Reaching into structured values.

use serde_json::Value;

use crate::observable::Observable;

/// A compiled dotted path such as `"translate.x"` or `"items.0.name"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plucker {
    segments: Vec<String>,
}

impl Plucker {
    /// Parse a dotted path such as `"touches.0.x"`.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_owned).collect(),
        }
    }

    /// The value at this path, or `Value::Null` if any segment is missing.
    ///
    /// Numeric segments index into arrays.
    pub fn pluck(&self, value: &Value) -> Value {
        let mut current = value;

        for segment in &self.segments {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
                _ => None,
            };

            match next {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }

        current.clone()
    }
}

impl Observable<Value> {
    /// Emit the value at `path` within each upstream value.
    ///
    /// `"translate.x"` is equivalent to
    /// `map(|transform| transform["translate"]["x"].clone())`.
    pub fn pluck(&self, path: &str) -> Observable<Value> {
        let plucker = Plucker::new(path);
        self.map(move |value| plucker.pluck(&value))
    }
}
