use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One canonical path per line.
    #[default]
    Plain,
    /// One JSON object per line.
    Json,
}

/// Result of cleaning one input.
#[derive(Debug, Clone)]
pub struct Record {
    pub input: String,
    pub output: Option<String>,
    pub rewritten: bool,
    pub error: Option<String>,
}

/// Serialized form of a record line.
#[derive(Serialize)]
struct RecordLine<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a str>,
    rewritten: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Writes records to `out` in the chosen format.
///
/// In plain mode failures go to `err` as `<input>: <error>` so they stay
/// visible whatever the log level; json mode keeps them in the record line.
pub struct Reporter<W: Write, E: Write> {
    out: W,
    err: E,
    format: OutputFormat,
}

impl<W: Write, E: Write> Reporter<W, E> {
    pub fn new(out: W, err: E, format: OutputFormat) -> Self {
        Self { out, err, format }
    }

    pub fn write(&mut self, rec: &Record) -> io::Result<()> {
        match self.format {
            OutputFormat::Plain => match (&rec.output, &rec.error) {
                (Some(output), _) => {
                    self.out.write_all(output.as_bytes())?;
                    self.out.write_all(b"\n")?;
                }
                (None, Some(error)) => {
                    writeln!(self.err, "{}: {}", rec.input, error)?;
                }
                (None, None) => {}
            },
            OutputFormat::Json => {
                let line = RecordLine {
                    input: &rec.input,
                    output: rec.output.as_deref(),
                    rewritten: rec.rewritten,
                    error: rec.error.as_deref(),
                };
                serde_json::to_writer(&mut self.out, &line)?;
                self.out.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}
