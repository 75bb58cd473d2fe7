//! Clamped numeric settings.
//!
//! A [`BoundedProperty`] stores a single `f64` that is clamped into
//! `[min, max]` on every assignment. Either bound may be a constant or a
//! closure that is re-evaluated on each assignment, so the valid range can
//! move at runtime (e.g. a maximum that shrinks as the screen does) without
//! invalidating the value already stored.
//!
//! [`PropertySet`] groups named properties built from configuration.

#[cfg(test)]
#[path = "bounded_test.rs"]
mod bounded_test;

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// One end of a property's valid range.
#[derive(Clone)]
pub enum Bound {
    /// A constant limit.
    Fixed(f64),
    /// A limit recomputed every time it is read.
    Dynamic(Rc<dyn Fn() -> f64>),
}

impl Bound {
    /// Wrap a closure as a dynamic bound.
    pub fn dynamic(f: impl Fn() -> f64 + 'static) -> Self {
        Self::Dynamic(Rc::new(f))
    }

    /// Current value of the bound.
    #[must_use]
    pub fn resolve(&self) -> f64 {
        match self {
            Self::Fixed(v) => *v,
            Self::Dynamic(f) => f(),
        }
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Self::Fixed(value)
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// A scalar setting clamped to a possibly dynamic range.
#[derive(Debug, Clone)]
pub struct BoundedProperty {
    value: f64,
    min: Bound,
    max: Bound,
}

impl BoundedProperty {
    /// Create a property. The initial value is clamped like any assignment.
    pub fn new(value: f64, min: impl Into<Bound>, max: impl Into<Bound>) -> Self {
        let mut prop = Self { value, min: min.into(), max: max.into() };
        prop.set(value);
        prop
    }

    /// Build a property from its configuration form.
    #[must_use]
    pub fn from_config(config: &BoundedPropertyConfig) -> Self {
        let (value, min, max) = config.parts();
        Self::new(value, min, max)
    }

    /// The stored value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.value
    }

    /// Store `value` clamped into the current bounds and return what was stored.
    ///
    /// With inverted bounds (`min > max`) the value is pinned to `max`.
    pub fn set(&mut self, value: f64) -> f64 {
        self.value = value.max(self.min.resolve()).min(self.max.resolve());
        self.value
    }

    /// Current lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min.resolve()
    }

    /// Current upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max.resolve()
    }

    /// Replace the lower bound. The stored value is left alone until the next `set`.
    pub fn set_min(&mut self, min: impl Into<Bound>) {
        self.min = min.into();
    }

    /// Replace the upper bound. The stored value is left alone until the next `set`.
    pub fn set_max(&mut self, max: impl Into<Bound>) {
        self.max = max.into();
    }
}

/// Serialized form of a bounded property.
///
/// Accepts either `{ "value": 1, "min": 0, "max": 2 }` or `[1, 0, 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundedPropertyConfig {
    /// Named fields.
    Fields { value: f64, min: f64, max: f64 },
    /// `[value, min, max]`.
    Tuple(f64, f64, f64),
}

impl BoundedPropertyConfig {
    /// A property fixed at `value` with no room to move.
    #[must_use]
    pub fn fixed(value: f64) -> Self {
        Self::Fields { value, min: value, max: value }
    }

    /// `(value, min, max)` regardless of form.
    #[must_use]
    pub fn parts(&self) -> (f64, f64, f64) {
        match *self {
            Self::Fields { value, min, max } | Self::Tuple(value, min, max) => (value, min, max),
        }
    }

    /// The configured value clamped the way [`BoundedProperty::new`] would store it.
    #[must_use]
    pub fn clamped_value(&self) -> f64 {
        BoundedProperty::from_config(self).get()
    }
}

/// A named collection of bounded properties.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    props: BTreeMap<String, BoundedProperty>,
}

impl PropertySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one property per configuration entry.
    #[must_use]
    pub fn from_configs(configs: &BTreeMap<String, BoundedPropertyConfig>) -> Self {
        let props = configs
            .iter()
            .map(|(name, cfg)| (name.clone(), BoundedProperty::from_config(cfg)))
            .collect();
        Self { props }
    }

    /// Insert or replace a property.
    pub fn insert(&mut self, name: impl Into<String>, prop: BoundedProperty) {
        self.props.insert(name.into(), prop);
    }

    /// Value of the named property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.props.get(name).map(BoundedProperty::get)
    }

    /// Assign the named property. Returns the clamped value, or `None` if absent.
    pub fn set(&mut self, name: &str, value: f64) -> Option<f64> {
        self.props.get_mut(name).map(|p| p.set(value))
    }

    /// Borrow the named property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&BoundedProperty> {
        self.props.get(name)
    }

    /// Property names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Returns `true` if the set holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}
