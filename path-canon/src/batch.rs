use std::io::{self, BufRead, Write};

use crate::normalizer::normalize;
use crate::report::{Record, Reporter};
use crate::request::normalize_target_bytes;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub rewritten: usize,
    pub failed: usize,
}

/// Cleans inputs one by one and hands the results to a [`Reporter`].
pub struct Batch<W: Write, E: Write> {
    reporter: Reporter<W, E>,
    uri: bool,
    check: bool,
    stats: Stats,
}

impl<W: Write, E: Write> Batch<W, E> {
    /// With `check` set only non-canonical inputs and failures are reported.
    pub fn new(reporter: Reporter<W, E>, uri: bool, check: bool) -> Self {
        Self {
            reporter,
            uri,
            check,
            stats: Stats::default(),
        }
    }

    pub fn process(&mut self, raw: &[u8]) -> io::Result<()> {
        self.stats.total += 1;
        let input = String::from_utf8_lossy(raw).into_owned();

        let rec = if self.uri {
            match normalize_target_bytes(raw) {
                Ok(rp) => Record {
                    input,
                    output: Some(rp.to_target()),
                    rewritten: rp.rewritten,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(input = %input, error = %e, "Skipping request target.");
                    Record {
                        input,
                        output: None,
                        rewritten: false,
                        error: Some(e.to_string()),
                    }
                }
            }
        } else {
            let clean = normalize(raw);
            Record {
                rewritten: *clean != *raw,
                output: Some(String::from_utf8_lossy(&clean).into_owned()),
                input,
                error: None,
            }
        };

        if rec.error.is_some() {
            self.stats.failed += 1;
        } else if rec.rewritten {
            self.stats.rewritten += 1;
            tracing::debug!(input = %rec.input, output = ?rec.output, "Rewritten.");
        }

        if self.check && rec.error.is_none() && !rec.rewritten {
            return Ok(());
        }
        self.reporter.write(&rec)
    }

    /// One input per line. `\n` and `\r\n` endings are stripped.
    pub fn process_lines<R: BufRead>(&mut self, mut reader: R) -> io::Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let mut end = line.len();
            if line[..end].ends_with(b"\n") {
                end -= 1;
            }
            if line[..end].ends_with(b"\r") {
                end -= 1;
            }
            self.process(&line[..end])?;
        }
        Ok(())
    }

    /// Whether the run should end with a failing exit status.
    pub fn failed(&self) -> bool {
        self.stats.failed > 0 || (self.check && self.stats.rewritten > 0)
    }

    pub fn finish(mut self) -> io::Result<(Stats, W, E)> {
        self.reporter.flush()?;
        let (out, err) = self.reporter.into_inner();
        Ok((self.stats, out, err))
    }
}
