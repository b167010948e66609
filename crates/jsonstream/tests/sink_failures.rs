use std::io;

use jsonstream::{Encoder, Error, HandleSink, Sink, Value};

/// Accepts `budget` writes, then reports a broken pipe.
#[derive(Debug)]
struct FailingSink {
    written: Vec<String>,
    budget: usize,
}

impl Sink for FailingSink {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        if self.written.len() == self.budget {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.written.push(chunk.to_owned());
        Ok(())
    }
}

#[derive(Debug)]
struct RejectingSink;

impl Sink for RejectingSink {
    fn write(&mut self, _chunk: &str) -> io::Result<()> {
        Ok(())
    }

    fn check_writable(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[test]
fn second_write_failure_leaves_a_prefix() {
    let mut enc = Encoder::new(FailingSink { written: Vec::new(), budget: 1 }).unwrap();
    let v = Value::from(vec![1, 2, 3]);
    let err = enc.encode(&v).unwrap_err();
    match err {
        Error::UnwritableSink(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(enc.get_ref().written, ["["]);
}

#[test]
fn every_token_is_one_write() -> Result<(), Box<dyn std::error::Error>> {
    let mut enc = Encoder::new(FailingSink { written: Vec::new(), budget: usize::MAX })?;
    enc.encode(&Value::record([("k", Value::from(vec!["a", "b"]))]))?;
    assert_eq!(
        enc.into_inner().written,
        ["{", "\"k\"", ":", "[", "\"a\"", ",", "\"b\"", "]", "}"]
    );
    Ok(())
}

#[test]
fn failed_writable_check_is_invalid_sink() {
    let err = Encoder::new(RejectingSink).unwrap_err();
    assert!(matches!(err, Error::InvalidSink(_)));
}

#[test]
fn read_only_file_is_invalid_sink() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::NamedTempFile::new()?;
    let ro = std::fs::File::open(tmp.path())?;
    let err = Encoder::new(HandleSink::new(ro)).unwrap_err();
    assert!(matches!(err, Error::InvalidSink(_)));
    Ok(())
}

#[test]
fn encoder_is_reusable() -> Result<(), Box<dyn std::error::Error>> {
    let mut enc = Encoder::new(HandleSink::new(Vec::new()))?;
    enc.encode(&Value::Int(1))?;
    enc.encode(&Value::from(vec![true]))?;
    assert_eq!(enc.into_inner().into_inner(), b"1[true]");
    Ok(())
}

#[test]
fn writes_through_a_borrowed_sink() -> Result<(), Box<dyn std::error::Error>> {
    let mut out = String::new();
    {
        let mut enc = Encoder::new(&mut out)?;
        enc.encode(&Value::from("x"))?;
    }
    assert_eq!(out, "\"x\"");
    Ok(())
}

#[test]
fn writes_into_a_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::NamedTempFile::new()?;
    jsonstream::encode_to_writer(tmp.reopen()?, &Value::record([("ok", true)]))?;
    assert_eq!(std::fs::read_to_string(tmp.path())?, r#"{"ok":true}"#);
    Ok(())
}
