use std::fs::File;
use std::io::{BufWriter, Read, Write, stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jsonstream::{EchoSink, Encoder, HandleSink, Sink, Value};

#[derive(Parser, Debug)]
#[command(
    name = "jsonstream-cli",
    about = "Re-encode JSON through the streaming jsonstream encoder",
    version
)]
struct Args {
    /// Write to this file instead of stdout
    #[arg(short, long, conflicts_with = "echo")]
    output: Option<PathBuf>,

    /// Emit each token straight to stdout as it is produced (no buffering)
    #[arg(long, default_value_t = false)]
    echo: bool,

    /// Append a newline after the document
    #[arg(long, default_value_t = false)]
    newline: bool,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn encode_into<S: Sink>(sink: S, value: &Value, newline: bool) -> Result<S> {
    let mut enc = Encoder::new(sink).context("opening output")?;
    enc.encode(value).context("encoding document")?;
    let mut sink = enc.into_inner();
    if newline {
        sink.write("\n").context("writing trailing newline")?;
    }
    Ok(sink)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("reading {}", path.display()))?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }

    let json: serde_json::Value = serde_json::from_str(&buf).context("parsing JSON input")?;
    let value = Value::try_from(json).context("converting JSON input")?;

    if args.echo {
        encode_into(EchoSink::new(), &value, args.newline)?;
        stdout().flush()?;
    } else if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let sink = encode_into(HandleSink::new(BufWriter::new(file)), &value, args.newline)?;
        sink.into_inner().flush()?;
    } else {
        let sink = encode_into(HandleSink::new(stdout().lock()), &value, args.newline)?;
        sink.into_inner().flush()?;
    }

    Ok(())
}
