//! The closed set of values the encoder understands.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A key inside a [`Map`].
///
/// Index keys and name keys never compare equal, even when the name spells
/// out the index (`Key::Name("0") != Key::Index(0)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i as i64)
    }
}

impl TryFrom<usize> for Key {
    type Error = crate::Error;

    fn try_from(i: usize) -> crate::Result<Self> {
        i64::try_from(i).map(Key::Index).map_err(|_| {
            crate::Error::UnsupportedValue(format!("index {} does not fit in i64", i))
        })
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

/// Insertion-ordered map with unique keys.
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: IndexMap<Key, Value>,
    // One past the largest index key ever inserted.
    next_index: i64,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { entries: IndexMap::with_capacity(cap), next_index: 0 }
    }

    /// Inserts `value` under `key`.
    ///
    /// An existing key keeps its position and has its value replaced; the
    /// previous value is returned.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if let Key::Index(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        self.entries.insert(key, value.into())
    }

    /// Appends `value` under the next free index key: one past the largest
    /// index key inserted so far, or `0`.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.insert(Key::Index(self.next_index), value);
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }
}

// Order is part of the output, so equality is order-sensitive.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A reference-counted handle to a value.
///
/// This is the only way for a value graph to alias itself. Two handles are
/// the same node when they point at the same allocation.
#[derive(Debug, Clone)]
pub struct Shared(Rc<RefCell<Value>>);

impl Shared {
    pub fn new(value: impl Into<Value>) -> Self {
        Shared(Rc::new(RefCell::new(value.into())))
    }

    /// Replaces the referenced value, e.g. to close a cycle after
    /// construction.
    pub fn set(&self, value: impl Into<Value>) {
        *self.0.borrow_mut() = value.into();
    }

    pub fn borrow(&self) -> std::cell::Ref<'_, Value> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, Value> {
        self.0.borrow_mut()
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Shared) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Identity comparison; structural comparison could recurse forever on cycles.
impl PartialEq for Shared {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Map),
    Record(Vec<(String, Value)>),
    Shared(Shared),
}

impl Value {
    /// Builds a [`Value::Record`] from named fields.
    pub fn record<K, V, I>(fields: I) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Record(fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Builds a [`Value::Mapping`] from key/value pairs.
    pub fn mapping<K, V, I>(pairs: I) -> Value
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Mapping(pairs.into_iter().collect())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_)
        )
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Int(i as i64)
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Self {
        o.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Mapping(m)
    }
}

impl From<Shared> for Value {
    fn from(s: Shared) -> Self {
        Value::Shared(s)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().map(Into::into).collect())
    }
}

/// Adapts parsed JSON. Objects become records, so `{}` stays `{}`.
///
/// Integers above `i64::MAX` are rejected with
/// [`Error::UnsupportedValue`](crate::Error::UnsupportedValue) rather than
/// rounded through `f64`.
#[cfg(feature = "json")]
impl TryFrom<serde_json::Value> for Value {
    type Error = crate::Error;

    fn try_from(v: serde_json::Value) -> crate::Result<Self> {
        Ok(match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    return Err(crate::Error::UnsupportedValue(format!(
                        "integer {} does not fit in i64",
                        u
                    )));
                } else {
                    let f = n.as_f64().ok_or_else(|| {
                        crate::Error::UnsupportedValue(format!("number {} has no f64 form", n))
                    })?;
                    Value::Float(f)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Sequence(
                items.into_iter().map(Value::try_from).collect::<crate::Result<_>>()?,
            ),
            serde_json::Value::Object(obj) => Value::Record(
                obj.into_iter()
                    .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                    .collect::<crate::Result<_>>()?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut m = Map::new();
        m.insert("a", 1);
        m.insert("b", 2);
        assert_eq!(m.insert("a", 3), Some(Value::Int(1)));
        let keys: Vec<String> = m.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(m.get(&Key::from("a")), Some(&Value::Int(3)));
    }

    #[test]
    fn push_uses_next_index() {
        let mut m = Map::new();
        m.push("x");
        m.insert(5, "y");
        m.push("z");
        let keys: Vec<&Key> = m.keys().collect();
        assert_eq!(keys, [&Key::Index(0), &Key::Index(5), &Key::Index(6)]);
    }

    #[test]
    fn remove_keeps_order_and_push_does_not_reuse_indices() {
        let mut m: Map = [(0, "a"), (1, "b"), (2, "c")].into_iter().collect();
        assert_eq!(m.remove(&Key::Index(1)), Some(Value::from("b")));
        m.push("d");
        let keys: Vec<&Key> = m.keys().collect();
        assert_eq!(keys, [&Key::Index(0), &Key::Index(2), &Key::Index(3)]);
    }

    #[test]
    fn equality_follows_order() {
        let a: Map = [("x", 1), ("y", 2)].into_iter().collect();
        let b: Map = [("y", 2), ("x", 1)].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn large_maps_build_in_linear_time() {
        let m: Map = (0..50_000i64).map(|i| (i, i)).collect();
        assert_eq!(m.len(), 50_000);
        assert_eq!(m.get(&Key::Index(49_999)), Some(&Value::Int(49_999)));
    }

    #[test]
    fn index_and_name_keys_are_distinct() {
        let mut m = Map::new();
        m.insert(0, "int");
        m.insert("0", "name");
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn usize_keys_are_range_checked() {
        assert_eq!(Key::try_from(7usize).unwrap(), Key::Index(7));
        assert!(Key::try_from(usize::MAX).is_err());
    }

    #[test]
    fn shared_equality_is_identity() {
        let a = Shared::new(1);
        let b = Shared::new(1);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
