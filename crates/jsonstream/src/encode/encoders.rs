use crate::{
    Result,
    encode::{
        primitives,
        shape::{self, Shape},
        writer::Sink,
    },
    error::Error,
    value::{Map, Shared, Value},
};

/// Streams values into a [`Sink`], one token per write.
///
/// The encoder keeps no state between calls: each [`encode`](Self::encode)
/// writes one complete document, and the same encoder can be reused for the
/// next one.
#[derive(Debug)]
pub struct Encoder<S> {
    sink: S,
}

impl<S: Sink> Encoder<S> {
    /// Binds an encoder to `sink`, rejecting destinations that refuse writes.
    pub fn new(mut sink: S) -> Result<Self> {
        sink.check_writable().map_err(Error::InvalidSink)?;
        Ok(Self { sink })
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Returns the sink without closing or flushing it.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Writes `value` as one JSON document.
    ///
    /// On error the sink keeps whatever was written before the failure.
    pub fn encode(&mut self, value: &Value) -> Result<()> {
        let mut path = Vec::new();
        self.encode_value(value, &mut path)
    }

    fn write(&mut self, token: &str) -> Result<()> {
        self.sink.write(token).map_err(Error::UnwritableSink)
    }

    // `path` holds the identities of the shared handles currently being
    // encoded, outermost first.
    fn encode_value(&mut self, value: &Value, path: &mut Vec<usize>) -> Result<()> {
        match value {
            Value::Null => self.write(primitives::format_null()),
            Value::Bool(b) => self.write(primitives::format_bool(*b)),
            Value::Int(i) => self.write(&primitives::format_int(*i)),
            Value::Float(f) => {
                let token = primitives::format_float(*f)?;
                self.write(&token)
            }
            Value::String(s) => self.write(&primitives::escape_and_quote(s)),
            Value::Sequence(items) => self.encode_list(items.iter(), path),
            Value::Record(fields) => self.encode_object(
                fields.iter().map(|(k, v)| (primitives::escape_and_quote(k), v)),
                path,
            ),
            Value::Mapping(map) => self.encode_map(map, path),
            Value::Shared(handle) => self.encode_shared(handle, path),
        }
    }

    fn encode_map(&mut self, map: &Map, path: &mut Vec<usize>) -> Result<()> {
        match shape::classify_map(map) {
            Shape::Sequence => self.encode_list(map.values(), path),
            Shape::Mapping => self.encode_object(
                map.iter().map(|(k, v)| (primitives::format_key(k), v)),
                path,
            ),
        }
    }

    fn encode_shared(&mut self, handle: &Shared, path: &mut Vec<usize>) -> Result<()> {
        let id = handle.id();
        if path.contains(&id) {
            return Err(Error::CyclicValue);
        }
        path.push(id);
        let res = self.encode_value(&handle.borrow(), path);
        path.pop();
        res
    }

    fn encode_list<'v>(
        &mut self,
        items: impl Iterator<Item = &'v Value>,
        path: &mut Vec<usize>,
    ) -> Result<()> {
        self.write("[")?;
        for (i, item) in items.enumerate() {
            if i > 0 {
                self.write(",")?;
            }
            self.encode_value(item, path)?;
        }
        self.write("]")
    }

    // Keys arrive already quoted and escaped.
    fn encode_object<'v>(
        &mut self,
        pairs: impl Iterator<Item = (String, &'v Value)>,
        path: &mut Vec<usize>,
    ) -> Result<()> {
        self.write("{")?;
        for (i, (key, value)) in pairs.enumerate() {
            if i > 0 {
                self.write(",")?;
            }
            self.write(&key)?;
            self.write(":")?;
            self.encode_value(value, path)?;
        }
        self.write("}")
    }
}
