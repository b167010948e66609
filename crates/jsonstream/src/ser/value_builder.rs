use serde::Serialize;
use serde::ser::*;

use crate::error::Error;
use crate::value::{Key, Map, Value};

type Result<T> = core::result::Result<T, Error>;

/// Converts `value` into the encoder's value model.
///
/// Fails with [`Error::UnsupportedValue`] for data the model cannot hold:
/// integers outside `i64`, non-finite floats, and map keys that are not
/// strings, integers, booleans or chars.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

fn unsupported(what: impl core::fmt::Display) -> Error {
    Error::UnsupportedValue(what.to_string())
}

struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = TaggedSeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = TaggedRecordBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }
    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }
    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }
    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }
    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }
    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }
    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }
    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }
    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| unsupported(format_args!("integer {} does not fit in i64", v)))
    }
    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(v as f64)
    }
    fn serialize_f64(self, v: f64) -> Result<Value> {
        if v.is_finite() {
            Ok(Value::Float(v))
        } else {
            Err(unsupported(format_args!("non-finite float {}", v)))
        }
    }
    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }
    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_owned()))
    }
    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Sequence(v.iter().map(|b| Value::Int(*b as i64)).collect()))
    }
    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_owned()))
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value> {
        Ok(Value::Record(vec![(variant.to_owned(), to_value(value)?)]))
    }
    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder> {
        Ok(SeqBuilder { items: Vec::with_capacity(len.unwrap_or(0)) })
    }
    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder> {
        self.serialize_seq(Some(len))
    }
    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqBuilder> {
        self.serialize_seq(Some(len))
    }
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TaggedSeqBuilder> {
        Ok(TaggedSeqBuilder {
            tag: variant,
            items: Vec::with_capacity(len),
        })
    }
    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder> {
        Ok(MapBuilder {
            map: Map::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }
    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<RecordBuilder> {
        Ok(RecordBuilder { fields: Vec::with_capacity(len) })
    }
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TaggedRecordBuilder> {
        Ok(TaggedRecordBuilder {
            tag: variant,
            fields: Vec::with_capacity(len),
        })
    }
}

struct SeqBuilder {
    items: Vec<Value>,
}

impl SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.items))
    }
}

impl SerializeTuple for SeqBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        SerializeSeq::serialize_element(self, value)
    }
    fn end(self) -> Result<Value> {
        SerializeSeq::end(self)
    }
}

impl SerializeTupleStruct for SeqBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        SerializeSeq::serialize_element(self, value)
    }
    fn end(self) -> Result<Value> {
        SerializeSeq::end(self)
    }
}

struct TaggedSeqBuilder {
    tag: &'static str,
    items: Vec<Value>,
}

impl SerializeTupleVariant for TaggedSeqBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(vec![(self.tag.to_owned(), Value::Sequence(self.items))]))
    }
}

struct MapBuilder {
    map: Map,
    next_key: Option<Key>,
}

impl SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.next_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| unsupported("map value serialized before its key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

struct RecordBuilder {
    fields: Vec<(String, Value)>,
}

impl SerializeStruct for RecordBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.fields.push((key.to_owned(), to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.fields))
    }
}

struct TaggedRecordBuilder {
    tag: &'static str,
    fields: Vec<(String, Value)>,
}

impl SerializeStructVariant for TaggedRecordBuilder {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.fields.push((key.to_owned(), to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(vec![(self.tag.to_owned(), Value::Record(self.fields))]))
    }
}

/// Turns a map key into a [`Key`]. Integers stay indices; everything else
/// that has a plain string form becomes a name.
struct KeySerializer;

impl Serializer for KeySerializer {
    type Ok = Key;
    type Error = Error;
    type SerializeSeq = Impossible<Key, Error>;
    type SerializeTuple = Impossible<Key, Error>;
    type SerializeTupleStruct = Impossible<Key, Error>;
    type SerializeTupleVariant = Impossible<Key, Error>;
    type SerializeMap = Impossible<Key, Error>;
    type SerializeStruct = Impossible<Key, Error>;
    type SerializeStructVariant = Impossible<Key, Error>;

    fn serialize_bool(self, v: bool) -> Result<Key> {
        Ok(Key::Name(v.to_string()))
    }
    fn serialize_i8(self, v: i8) -> Result<Key> {
        Ok(Key::Index(v as i64))
    }
    fn serialize_i16(self, v: i16) -> Result<Key> {
        Ok(Key::Index(v as i64))
    }
    fn serialize_i32(self, v: i32) -> Result<Key> {
        Ok(Key::Index(v as i64))
    }
    fn serialize_i64(self, v: i64) -> Result<Key> {
        Ok(Key::Index(v))
    }
    fn serialize_u8(self, v: u8) -> Result<Key> {
        Ok(Key::Index(v as i64))
    }
    fn serialize_u16(self, v: u16) -> Result<Key> {
        Ok(Key::Index(v as i64))
    }
    fn serialize_u32(self, v: u32) -> Result<Key> {
        Ok(Key::Index(v as i64))
    }
    fn serialize_u64(self, v: u64) -> Result<Key> {
        i64::try_from(v)
            .map(Key::Index)
            .map_err(|_| unsupported(format_args!("map key {} does not fit in i64", v)))
    }
    fn serialize_f32(self, _v: f32) -> Result<Key> {
        Err(unsupported("float map key"))
    }
    fn serialize_f64(self, _v: f64) -> Result<Key> {
        Err(unsupported("float map key"))
    }
    fn serialize_char(self, v: char) -> Result<Key> {
        Ok(Key::Name(v.to_string()))
    }
    fn serialize_str(self, v: &str) -> Result<Key> {
        Ok(Key::Name(v.to_owned()))
    }
    fn serialize_bytes(self, _v: &[u8]) -> Result<Key> {
        Err(unsupported("byte map key"))
    }
    fn serialize_none(self) -> Result<Key> {
        Err(unsupported("null map key"))
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Key> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<Key> {
        Err(unsupported("unit map key"))
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Key> {
        Err(unsupported("unit map key"))
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Key> {
        Ok(Key::Name(variant.to_owned()))
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Key> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Key> {
        Err(unsupported("composite map key"))
    }
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported("composite map key"))
    }
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported("composite map key"))
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported("composite map key"))
    }
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported("composite map key"))
    }
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(unsupported("composite map key"))
    }
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(unsupported("composite map key"))
    }
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported("composite map key"))
    }
}
