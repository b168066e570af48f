//! Logging and string conversion.

use std::fmt::{Debug, Display};

use serde_json::Value;
use tracing::info;

use crate::observable::Observable;

use super::pluck::Plucker;

impl<T: 'static> Observable<T> {
    /// Log every value at `info` level and pass it through unchanged.
    pub fn log(&self, label: &str) -> Observable<T>
    where
        T: Debug,
    {
        let label = label.to_owned();
        self.tap(move |value| info!(label = %label, value = ?value, "stream value"))
    }

    /// Convert each value to a string with `unit` appended, e.g. `"12px"`.
    pub fn append_unit(&self, unit: &str) -> Observable<String>
    where
        T: Display,
    {
        let unit = unit.to_owned();
        self.map(move |value| format!("{value}{unit}"))
    }
}

impl Observable<Value> {
    /// `log`, recording only the part of each value at `path`.
    pub fn log_path(&self, label: &str, path: &str) -> Observable<Value> {
        let label = label.to_owned();
        let plucker = Plucker::new(path);
        self.tap(move |value| info!(label = %label, value = %plucker.pluck(value), "stream value"))
    }
}
