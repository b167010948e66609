//! Decides whether a composite is written as an array or as an object.

use crate::value::{Key, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sequence,
    Mapping,
}

/// Returns the output shape of a composite value, or `None` for scalars.
///
/// A [`Value::Mapping`] is a sequence only when its keys are exactly
/// `Key::Index(0), Key::Index(1), ...` in iteration order. Records never are.
pub fn classify(value: &Value) -> Option<Shape> {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => None,
        Value::Sequence(_) => Some(Shape::Sequence),
        Value::Record(_) => Some(Shape::Mapping),
        Value::Mapping(map) => Some(classify_map(map)),
        Value::Shared(handle) => {
            // Follow handle chains; a chain that loops back has no shape.
            let mut seen = vec![handle.id()];
            let mut current = handle.clone();
            loop {
                let next = match &*current.borrow() {
                    Value::Shared(inner) => inner.clone(),
                    target => return classify(target),
                };
                if seen.contains(&next.id()) {
                    return None;
                }
                seen.push(next.id());
                current = next;
            }
        }
    }
}

pub(crate) fn classify_map(map: &Map) -> Shape {
    let mut expected: i64 = 0;
    for key in map.keys() {
        if *key != Key::Index(expected) {
            return Shape::Mapping;
        }
        expected += 1;
    }
    Shape::Sequence
}
