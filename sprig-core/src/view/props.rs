//! Element props.

use std::fmt;

use indexmap::IndexMap;

use crate::dom::{listener, Event, Listener, Value};

/// A single prop value: plain data or an event listener.
#[derive(Clone)]
pub enum PropValue {
    Value(Value),
    Listener(Listener),
}

impl PropValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PropValue::Value(value) => Some(value),
            PropValue::Listener(_) => None,
        }
    }

    pub fn is_listener(&self) -> bool {
        matches!(self, PropValue::Listener(_))
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            PropValue::Listener(_) => f.write_str("Listener(..)"),
        }
    }
}

impl From<Listener> for PropValue {
    fn from(listener: Listener) -> Self {
        PropValue::Listener(listener)
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::Value(value)
    }
}

macro_rules! prop_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PropValue {
                fn from(value: $ty) -> Self {
                    PropValue::Value(Value::from(value))
                }
            }
        )*
    };
}

prop_from_value!(&str, String, bool, f64, f32, i32, i64, u32, u64, usize);

/// Ordered prop map passed to [`Runtime::h`](crate::Runtime::h).
///
/// Props apply in insertion order. Setting a key twice keeps its first
/// position and the last value.
#[derive(Clone, Default)]
pub struct Props {
    entries: IndexMap<String, PropValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Props::insert`].
    pub fn set(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Attach a listener for `event` under the `on<event>` key.
    ///
    /// ```rust
    /// use sprig_core::Props;
    ///
    /// let props = Props::new().on("click", |_| {});
    /// assert!(props.get("onclick").is_some());
    /// ```
    pub fn on<F>(mut self, event: &str, f: F) -> Self
    where
        F: Fn(&Event) + 'static,
    {
        self.insert(format!("on{event}"), listener(f));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = indexmap::map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<String>,
    V: Into<PropValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}
