use std::io::{self, Write};

/// Destination for encoded text.
///
/// Chunks must land in call order. Flushing and closing stay with whoever
/// owns the underlying resource.
pub trait Sink {
    fn write(&mut self, chunk: &str) -> io::Result<()>;

    /// Checks that the destination accepts writes at all. Called once when an
    /// [`Encoder`](crate::Encoder) is built.
    fn check_writable(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        (**self).write(chunk)
    }

    fn check_writable(&mut self) -> io::Result<()> {
        (**self).check_writable()
    }
}

impl Sink for String {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        self.push_str(chunk);
        Ok(())
    }
}

/// Writes every chunk straight into an [`io::Write`] handle.
#[derive(Debug)]
pub struct HandleSink<W> {
    inner: W,
}

impl<W: Write> HandleSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for HandleSink<W> {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        self.inner.write_all(chunk.as_bytes())
    }

    // A zero-length write still goes through the descriptor's access check,
    // so a file opened read-only fails here instead of on the first token.
    fn check_writable(&mut self) -> io::Result<()> {
        self.inner.write(&[]).map(|_| ())
    }
}

/// Writes every chunk to the process's standard output as it is produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoSink;

impl EchoSink {
    pub fn new() -> Self {
        EchoSink
    }
}

impl Sink for EchoSink {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        echo(&mut io::stdout().lock(), chunk)
    }
}

// Stdout is line-buffered; without the flush a failed write would only show
// up when the buffer is dropped, where the error is discarded.
fn echo<W: Write>(out: &mut W, chunk: &str) -> io::Result<()> {
    out.write_all(chunk.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{Encoder, Error, Value};

    // Every write fails, so a buffered wrapper only reports it on flush.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Echo<W>(W);

    impl<W: Write> Sink for Echo<W> {
        fn write(&mut self, chunk: &str) -> io::Result<()> {
            echo(&mut self.0, chunk)
        }
    }

    #[test]
    fn echo_surfaces_buffered_write_failures() {
        let out = io::LineWriter::new(ClosedPipe);
        let mut enc = Encoder::new(Echo(out)).unwrap();
        let err = enc.encode(&Value::from(vec![1, 2])).unwrap_err();
        match err {
            Error::UnwritableSink(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn echo_passes_each_chunk_through() -> io::Result<()> {
        let mut out = io::BufWriter::new(Vec::new());
        echo(&mut out, "[")?;
        assert_eq!(out.get_ref(), b"[");
        echo(&mut out, "]")?;
        assert_eq!(out.get_ref(), b"[]");
        Ok(())
    }

    #[test]
    fn handle_sink_keeps_order() -> io::Result<()> {
        let mut sink = HandleSink::new(Vec::new());
        sink.write("[")?;
        sink.write("1")?;
        sink.write("]")?;
        assert_eq!(sink.into_inner(), b"[1]");
        Ok(())
    }

    #[test]
    fn read_only_file_is_not_writable() -> io::Result<()> {
        let tmp = tempfile::NamedTempFile::new()?;
        let file = std::fs::File::open(tmp.path())?;
        let mut sink = HandleSink::new(file);
        assert!(sink.check_writable().is_err());
        Ok(())
    }

    #[test]
    fn writable_file_is_writable() -> io::Result<()> {
        let file = tempfile::tempfile()?;
        let mut sink = HandleSink::new(file);
        sink.check_writable()
    }
}
