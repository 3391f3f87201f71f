use core::fmt;
use core::time::Duration;
use std::io::{self, Write};

use serde::Serialize;

use crate::cli::Report;

pub(crate) struct Output<O> {
    out: O,
    kind: OutputKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputKind {
    Json,
    Normal,
}

impl<O> Output<O>
where
    O: Write,
{
    pub(crate) fn new(out: O, kind: OutputKind) -> Self {
        Self { out, kind }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> O {
        self.out
    }

    pub(crate) fn info(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Info, m)
    }

    pub(crate) fn error(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Error, m)
    }

    /// Write the answers to both parts of a puzzle.
    pub(crate) fn answer<A, B>(
        &mut self,
        part1: &A,
        part2: &B,
        elapsed: Option<Duration>,
    ) -> io::Result<()>
    where
        A: fmt::Display + Serialize,
        B: fmt::Display + Serialize,
    {
        let elapsed_us = elapsed.map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

        match &self.kind {
            OutputKind::Json => {
                self.json(&Line {
                    ty: LineType::Answer,
                    data: Answer {
                        part1,
                        part2,
                        elapsed_us,
                    },
                })?;
            }
            OutputKind::Normal => {
                write!(self.out, "({part1}, {part2})")?;

                if let Some(us) = elapsed_us {
                    write!(self.out, " time: {us}µs")?;
                }

                writeln!(self.out)?;
            }
        }

        Ok(())
    }

    pub(crate) fn report(&mut self, report: &Report) -> io::Result<()> {
        match &self.kind {
            OutputKind::Json => {
                self.json(&Line {
                    ty: LineType::Report,
                    data: report,
                })?;
            }
            OutputKind::Normal => {
                writeln!(self.out, "{report}")?;
            }
        }

        Ok(())
    }

    pub(crate) fn usage(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "usage: {name} [options] <path>")?;
        writeln!(self.out)?;
        writeln!(self.out, "options:")?;
        writeln!(self.out, "  --time               print elapsed time")?;
        writeln!(self.out, "  --json               output JSON records")?;
        writeln!(self.out, "  --verbose            enable debug logging")?;
        writeln!(self.out, "  --bench              run as benchmark")?;
        writeln!(self.out, "  --warmup <ms>        benchmark warmup period")?;
        writeln!(self.out, "  --time-limit <ms>    benchmark period")?;
        writeln!(self.out, "  --count <n>          number of benchmark samples")?;
        Ok(())
    }

    fn message(&mut self, kind: MessageKind, m: impl fmt::Display) -> io::Result<()> {
        match &self.kind {
            OutputKind::Json => {
                self.json(&Line {
                    ty: LineType::Message,
                    data: Message { output: m, kind },
                })?;
            }
            OutputKind::Normal => {
                writeln!(self.out, "{kind}: {m}")?;
            }
        }

        Ok(())
    }

    fn json<T>(&mut self, m: &T) -> io::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer(&mut self.out, m)?;
        writeln!(self.out)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct Line<T> {
    #[serde(rename = "type")]
    ty: LineType,
    data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
enum LineType {
    Answer,
    Message,
    Report,
}

#[derive(Serialize)]
struct Answer<'a, A, B> {
    part1: &'a A,
    part2: &'a B,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_us: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
enum MessageKind {
    Info,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Info => write!(f, "info"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

struct Message<T> {
    output: T,
    kind: MessageKind,
}

impl<T> Serialize for Message<T>
where
    T: fmt::Display,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", &self.kind)?;
        map.serialize_entry("output", &DisplayString(&self.output))?;
        map.end()
    }
}

struct DisplayString<T>(T);

impl<T> Serialize for DisplayString<T>
where
    T: fmt::Display,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}
