#![no_main]
use arbitrary::Arbitrary;
use jsonstream::{Error, Map, Shape, Shared, Value, classify, encode_to_string};
use libfuzzer_sys::{arbitrary, fuzz_target};

const MAX_DEPTH: usize = 8;
const MAX_ARRAY_SIZE: usize = 20;
const MAX_OBJECT_SIZE: usize = 20;

#[derive(Arbitrary, Debug)]
struct FuzzValue {
    choice: u8,
}

impl FuzzValue {
    fn to_value(&self, u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<Value> {
        if depth >= MAX_DEPTH {
            return Ok(Value::Null);
        }

        Ok(match self.choice % 11 {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::Int(u.arbitrary()?),
            3 => Value::Float(u.arbitrary()?),
            4 => Value::String(u.arbitrary()?),
            5 | 6 => {
                let size = u.int_in_range(0..=MAX_ARRAY_SIZE)?;
                let mut items = Vec::with_capacity(size);
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    items.push(fv.to_value(u, depth + 1)?);
                }
                Value::Sequence(items)
            }
            7 | 8 => {
                let size = u.int_in_range(0..=MAX_OBJECT_SIZE)?;
                let mut map = Map::new();
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    let value = fv.to_value(u, depth + 1)?;
                    if u.arbitrary()? {
                        map.insert(u.int_in_range(-2i64..=MAX_OBJECT_SIZE as i64)?, value);
                    } else {
                        map.insert(u.arbitrary::<String>()?, value);
                    }
                }
                Value::Mapping(map)
            }
            9 => {
                let size = u.int_in_range(0..=MAX_OBJECT_SIZE)?;
                let mut fields = Vec::with_capacity(size);
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    fields.push((u.arbitrary::<String>()?, fv.to_value(u, depth + 1)?));
                }
                Value::Record(fields)
            }
            _ => {
                let fv: FuzzValue = u.arbitrary()?;
                Value::Shared(Shared::new(fv.to_value(u, depth + 1)?))
            }
        })
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);

    if let Ok(fv) = u.arbitrary::<FuzzValue>() {
        if let Ok(value) = fv.to_value(&mut u, 0) {
            match encode_to_string(&value) {
                Ok(out) => {
                    match classify(&value) {
                        Some(Shape::Sequence) => assert!(out.starts_with('[') && out.ends_with(']')),
                        Some(Shape::Mapping) => assert!(out.starts_with('{') && out.ends_with('}')),
                        None => {}
                    }
                    if !out.bytes().any(|b| b < 0x20) {
                        if let Err(e) = serde_json::from_str::<serde_json::Value>(&out) {
                            panic!("encoder produced invalid JSON: {}\nValue: {:?}\nOutput: {}", e, value, out);
                        }
                    }
                }
                // NaN and the infinities have no textual form
                Err(Error::UnsupportedValue(_)) => {}
                Err(e) => panic!("unexpected error: {}\nValue: {:?}", e, value),
            }
        }
    }
});
