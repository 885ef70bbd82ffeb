//! Helpers shared by the comparators: path formatting, element
//! classification, unique-key discovery and id indexes.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::{Number, Value};

use super::errors::{CompareError, CompareResult};

/// Hashable projection of a primitive JSON value.
///
/// Numbers are normalized so that `1`, `1.0` and `-0.0 == 0.0` hash alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleKey {
    Null,
    Bool(bool),
    Int(i128),
    Float(u64),
    String(String),
}

impl SimpleKey {
    /// `None` for objects and arrays.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(SimpleKey::Null),
            Value::Bool(b) => Some(SimpleKey::Bool(*b)),
            Value::Number(n) => Some(Self::from_number(n)),
            Value::String(s) => Some(SimpleKey::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return SimpleKey::Int(i as i128);
        }
        if let Some(u) = n.as_u64() {
            return SimpleKey::Int(u as i128);
        }
        let f = n.as_f64().unwrap_or(0.0);
        if f.fract() == 0.0 && f.abs() < 1e38 {
            SimpleKey::Int(f as i128)
        } else {
            SimpleKey::Float(f.to_bits())
        }
    }
}

impl fmt::Display for SimpleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleKey::Null => f.write_str("null"),
            SimpleKey::Bool(b) => write!(f, "{}", b),
            SimpleKey::Int(i) => write!(f, "{}", i),
            SimpleKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            SimpleKey::String(s) => f.write_str(s),
        }
    }
}

/// Closed classification of an array's elements, computed once per array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    Empty,
    /// Only primitives
    Simple,
    /// Only objects
    Objects,
    /// Anything else, including nested arrays
    Mixed,
}

pub fn classify(values: &[Value]) -> ElementShape {
    if values.is_empty() {
        ElementShape::Empty
    } else if all_simple_values(values) {
        ElementShape::Simple
    } else if all_objects(values) {
        ElementShape::Objects
    } else {
        ElementShape::Mixed
    }
}

/// `key` at the root, `prefix.key` below it.
pub fn qualify(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// `prefix[key=value]`, strings without quotes.
pub fn format_unique_key(prefix: &str, key: &str, value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!("{}[{}={}]", prefix, key, rendered)
}

pub fn is_simple_value(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

pub fn all_simple_values(values: &[Value]) -> bool {
    values.iter().all(is_simple_value)
}

pub fn all_objects(values: &[Value]) -> bool {
    values.iter().all(Value::is_object)
}

pub fn all_arrays(values: &[Value]) -> bool {
    values.iter().all(Value::is_array)
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The id of `value` under `key`, if `value` is an object holding a simple
/// value there.
pub fn id_of(value: &Value, key: &str) -> Option<SimpleKey> {
    value.as_object()?.get(key).and_then(SimpleKey::from_value)
}

/// True when every element is an object with a simple value under
/// `candidate`, and those values are pairwise distinct.
pub fn is_usable_as_unique_key(candidate: &str, values: &[Value]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    for value in values {
        match id_of(value, candidate) {
            Some(id) => {
                if !seen.insert(id) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Finds a field usable as a unique key, trying the first element's fields
/// in map order.
pub fn find_unique_key(values: &[Value]) -> Option<String> {
    let first = values.first()?.as_object()?;
    first
        .keys()
        .find(|candidate| is_usable_as_unique_key(candidate, values))
        .cloned()
}

/// Elements of an object array indexed by a unique key, in array order.
#[derive(Debug, Clone)]
pub struct IdIndex<'a> {
    order: Vec<SimpleKey>,
    by_id: HashMap<SimpleKey, &'a Value>,
}

impl<'a> IdIndex<'a> {
    pub fn get(&self, id: &SimpleKey) -> Option<&'a Value> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &SimpleKey) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(id, element)` pairs in array order.
    pub fn iter(&self) -> impl Iterator<Item = (&SimpleKey, &'a Value)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.by_id.get(id).map(|v| (id, *v)))
    }

    /// Keeps only the elements whose id satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&SimpleKey) -> bool) {
        self.order.retain(|id| keep(id));
        let kept: HashSet<&SimpleKey> = self.order.iter().collect();
        self.by_id.retain(|id, _| kept.contains(id));
    }
}

/// Indexes an array of objects by `key`.
///
/// Every element must be an object holding a simple value under `key`;
/// anything else is a contract violation reported as
/// [`CompareError::Malformed`]. A repeated id keeps its first element.
pub fn array_of_objects_to_map<'a>(
    prefix: &str,
    values: &'a [Value],
    key: &str,
) -> CompareResult<IdIndex<'a>> {
    let mut order = Vec::with_capacity(values.len());
    let mut by_id = HashMap::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        let Some(obj) = value.as_object() else {
            return Err(CompareError::malformed(
                format!("{}[{}]", prefix, i),
                format!("expected an object, found {}", json_type_name(value)),
            ));
        };
        let Some(id) = obj.get(key).and_then(SimpleKey::from_value) else {
            return Err(CompareError::malformed(
                format!("{}[{}]", prefix, i),
                format!("no simple value under key '{}'", key),
            ));
        };
        if !by_id.contains_key(&id) {
            order.push(id.clone());
            by_id.insert(id, value);
        }
    }
    Ok(IdIndex { order, by_id })
}

/// Occurrence counts of primitives, in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct Cardinality<'a> {
    order: Vec<SimpleKey>,
    counts: HashMap<SimpleKey, (&'a Value, usize)>,
}

impl<'a> Cardinality<'a> {
    /// Non-primitive elements are skipped.
    pub fn of(values: &'a [Value]) -> Self {
        let mut card = Cardinality::default();
        for value in values {
            if let Some(key) = SimpleKey::from_value(value) {
                match card.counts.get_mut(&key) {
                    Some((_, n)) => *n += 1,
                    None => {
                        card.order.push(key.clone());
                        card.counts.insert(key, (value, 1));
                    }
                }
            }
        }
        card
    }

    pub fn count(&self, key: &SimpleKey) -> usize {
        self.counts.get(key).map(|(_, n)| *n).unwrap_or(0)
    }

    /// `(value, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&SimpleKey, &'a Value, usize)> + '_ {
        self.order.iter().filter_map(move |key| {
            self.counts.get(key).map(|(value, n)| (key, *value, *n))
        })
    }
}
