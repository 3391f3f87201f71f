//! CLI helpers.

mod bencher;
pub(crate) mod error;
mod output;
mod stderr_logger;
#[cfg(test)]
mod tests;

use core::fmt;
use core::time::Duration;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use crate::input::Input;

pub(crate) use self::bencher::Bencher;
pub use self::error::error_context;
pub(crate) use self::output::{Output, OutputKind};

static STDERR_LOGGER: stderr_logger::StderrLogger = stderr_logger::StderrLogger;

/// Run mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Default run mode.
    #[default]
    Default,
    /// Run as benchmark.
    Bench,
}

/// Input options.
#[derive(Debug, Default)]
pub struct Opts {
    /// How to run.
    pub mode: Mode,
    /// Print usage and exit.
    help: bool,
    /// Path to the input file.
    path: Option<PathBuf>,
    /// Report elapsed time.
    time: bool,
    /// Run in verbose mode.
    verbose: bool,
    /// Output JSON records.
    json: bool,
    /// Warmup period.
    warmup: Option<u64>,
    /// Bench period.
    time_limit: Option<u64>,
    /// Number of times to run benches.
    count: Option<usize>,
}

impl Opts {
    /// Parse CLI options from the process arguments and install the logger.
    pub fn parse() -> Result<Self> {
        let opts = Self::parse_from(std::env::args_os().skip(1))?;

        if !opts.json {
            log::set_max_level(if opts.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            });

            log::set_logger(&STDERR_LOGGER)
                .map_err(|error| anyhow!("failed to set log: {error}"))?;
        }

        Ok(opts)
    }

    /// Parse CLI options from the given arguments.
    pub fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut opts = Self::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            let Some(string) = arg.to_str() else {
                opts.set_path(arg)?;
                continue;
            };

            match string {
                "--bench" => {
                    if !matches!(opts.mode, Mode::Default) {
                        bail!("duplicate `--bench` arguments");
                    }

                    opts.mode = Mode::Bench;
                }
                "-h" | "--help" => {
                    opts.help = true;
                }
                "--time" => {
                    opts.time = true;
                }
                "--verbose" => {
                    opts.verbose = true;
                }
                "--warmup" => {
                    let warmup = it.next().context("missing argument to `--warmup`")?;
                    let warmup = warmup
                        .to_str()
                        .context("missing string argument to `--warmup`")?;
                    opts.warmup = Some(warmup.parse().context("bad argument to `--warmup`")?);
                }
                "--time-limit" => {
                    let time_limit = it.next().context("missing argument to `--time-limit`")?;
                    let time_limit = time_limit
                        .to_str()
                        .context("missing string argument to `--time-limit`")?;
                    opts.time_limit = Some(
                        time_limit
                            .parse()
                            .context("bad argument to `--time-limit`")?,
                    );
                }
                "--count" => {
                    let count = it.next().context("missing argument to `--count`")?;
                    let count = count
                        .to_str()
                        .context("missing string argument to `--count`")?;
                    opts.count = Some(count.parse().context("bad argument to `--count`")?);
                }
                "--json" => {
                    opts.json = true;
                }
                "--" => {
                    break;
                }
                other if other.len() > 1 && other.starts_with('-') => {
                    bail!("unsupported argument: {other}");
                }
                _ => {
                    opts.set_path(arg)?;
                }
            }
        }

        for arg in it {
            opts.set_path(arg)?;
        }

        Ok(opts)
    }

    /// The input path, which is required unless printing usage.
    pub fn path(&self) -> Result<&Path> {
        self.path.as_deref().context("missing input path")
    }

    fn set_path(&mut self, arg: OsString) -> Result<()> {
        if self.path.is_some() {
            bail!("unexpected argument: {}", arg.to_string_lossy());
        }

        self.path = Some(PathBuf::from(arg));
        Ok(())
    }

    fn output_kind(&self) -> OutputKind {
        if self.json {
            OutputKind::Json
        } else {
            OutputKind::Normal
        }
    }
}

/// Describes a puzzle entry point.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    name: &'static str,
    timed: bool,
}

impl Entry {
    /// Construct a new entry with the given binary name.
    pub const fn new(name: &'static str) -> Self {
        Self { name, timed: false }
    }

    /// Always report elapsed time, not only with `--time`.
    pub const fn timed(self) -> Self {
        Self {
            timed: true,
            ..self
        }
    }
}

/// Run a puzzle entry point.
///
/// Parses options, reads the input file and hands it to `solve`, reporting
/// both answers on stdout. Errors are returned for `main` to report.
pub fn run<T, A, B>(entry: Entry, solve: T) -> Result<()>
where
    T: FnMut(Input<'_>) -> Result<(A, B)>,
    A: fmt::Debug + fmt::Display + Serialize + PartialEq,
    B: fmt::Debug + fmt::Display + Serialize + PartialEq,
{
    let stdout = std::io::stdout();

    let opts = match Opts::parse() {
        Ok(opts) => opts,
        Err(e) => {
            if json_requested(std::env::args_os().skip(1)) {
                let mut o = Output::new(stdout.lock(), OutputKind::Json);
                o.error(format_args!("{e:#}"))?;
            }

            return Err(e);
        }
    };

    let mut o = Output::new(stdout.lock(), opts.output_kind());

    if let Err(e) = run_with(&mut o, &opts, entry, solve) {
        if opts.json {
            o.error(format_args!("{e:#}"))?;
        }

        return Err(e);
    }

    Ok(())
}

/// Test if `--json` was passed, for reporting errors raised while the rest of
/// the arguments are being parsed.
fn json_requested<I>(args: I) -> bool
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .take_while(|arg| arg != "--")
        .any(|arg| arg == "--json")
}

/// Run with already parsed options, writing to the given output.
pub(crate) fn run_with<T, A, B>(
    o: &mut Output<impl Write>,
    opts: &Opts,
    entry: Entry,
    mut solve: T,
) -> Result<()>
where
    T: FnMut(Input<'_>) -> Result<(A, B)>,
    A: fmt::Debug + fmt::Display + Serialize + PartialEq,
    B: fmt::Debug + fmt::Display + Serialize + PartialEq,
{
    if opts.help {
        o.usage(entry.name)?;
        return Ok(());
    }

    match opts.mode {
        Mode::Default => {
            let path = opts.path()?;
            let start = Instant::now();
            let data = read(entry, path)?;
            let (part1, part2) =
                solve(Input::new(&data)).map_err(|e| error_context(path, &data, e))?;
            let elapsed = start.elapsed();

            let elapsed = (entry.timed || opts.time).then_some(elapsed);
            o.answer(&part1, &part2, elapsed)?;
        }
        Mode::Bench => {
            let path = opts.path()?;
            let data = read(entry, path)?;
            let mut bencher = Bencher::new(opts);

            let report = bencher.iter(o, || {
                solve(Input::new(&data)).map_err(|e| error_context(path, &data, e))
            })?;

            o.report(&report)?;
        }
    }

    Ok(())
}

fn read(entry: Entry, path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path).with_context(|| anyhow!("{}", path.display()))?;

    log::debug!(
        "{name}: read {path} ({len} bytes)",
        name = entry.name,
        path = path.display(),
        len = data.len()
    );

    Ok(data)
}

/// Timing report produced by [Bencher].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Report {
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl Report {
    /// Build a report out of timing samples.
    pub fn from_samples(samples: &mut [Duration]) -> Self {
        samples.sort();

        let count = samples.len();
        let sum: Duration = samples.iter().sum();

        let avg = if count == 0 {
            Duration::default()
        } else {
            Duration::from_nanos(
                u64::try_from(sum.as_nanos() / (count as u128)).unwrap_or_default(),
            )
        };

        Self {
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
            p50: percentile(samples, 5000),
            p95: percentile(samples, 9500),
            p99: percentile(samples, 9900),
        }
    }
}

/// Pick a percentile, expressed in basis points, out of sorted samples.
fn percentile(samples: &[Duration], bp: usize) -> Duration {
    let Some(last) = samples.len().checked_sub(1) else {
        return Duration::default();
    };

    let index = (samples.len() * bp / 10000).min(last);
    samples.get(index).copied().unwrap_or_default()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            count,
            min,
            max,
            avg,
            p50,
            p95,
            p99,
        } = self;

        write!(f, "count: {count}, min: {min:?}, max: {max:?}, avg: {avg:?}, 50th: {p50:?}, 95th: {p95:?}, 99th: {p99:?}")
    }
}
