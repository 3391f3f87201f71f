use core::fmt;
use std::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::cli::{Opts, Output, Report};

/// Default warmup period in milliseconds.
const DEFAULT_WARMUP: u64 = 100;

/// Default time in milliseconds.
const DEFAULT_TIME_LIMIT: u64 = 400;

pub(crate) struct Bencher {
    warmup: Duration,
    time_limit: Duration,
    count: Option<usize>,
}

impl Bencher {
    /// Construct a new bencher.
    #[inline]
    pub(crate) fn new(opts: &Opts) -> Self {
        Self {
            warmup: Duration::from_millis(opts.warmup.unwrap_or(DEFAULT_WARMUP)),
            time_limit: Duration::from_millis(opts.time_limit.unwrap_or(DEFAULT_TIME_LIMIT)),
            count: opts.count,
        }
    }

    /// Bench the given fn.
    ///
    /// Every iteration has to produce the same value as the first one.
    pub(crate) fn iter<T, O>(&mut self, o: &mut Output<impl Write>, mut iter: T) -> Result<Report>
    where
        T: FnMut() -> Result<O>,
        O: fmt::Debug + PartialEq,
    {
        let expected = iter()?;

        if !self.warmup.is_zero() {
            let warmup = self.warmup;
            o.info(format_args!("warming up ({warmup:?})..."))?;

            let s = Instant::now();

            loop {
                let value = iter()?;
                let after = Instant::now();
                check(&value, &expected)?;
                let _ = black_box(value);

                if after.duration_since(s) >= warmup {
                    break;
                }
            }
        }

        let mut samples = Vec::new();

        if let Some(count) = self.count {
            let count = count.max(1);
            o.info(format_args!("running benches {count} time(s)..."))?;

            for _ in 0..count {
                let before = Instant::now();
                let value = iter()?;
                let after = Instant::now();
                check(&value, &expected)?;
                let _ = black_box(value);
                samples.push(after.duration_since(before));
            }
        } else {
            let time_limit = self.time_limit;
            o.info(format_args!("running benches ({time_limit:?})..."))?;

            let start = Instant::now();

            loop {
                let before = Instant::now();
                let value = iter()?;
                let after = Instant::now();
                check(&value, &expected)?;
                let _ = black_box(value);
                samples.push(after.duration_since(before));

                if after.duration_since(start) >= time_limit {
                    break;
                }
            }
        }

        log::debug!("collected {} samples", samples.len());
        Ok(Report::from_samples(&mut samples))
    }
}

fn check<O>(value: &O, expected: &O) -> Result<()>
where
    O: fmt::Debug + PartialEq,
{
    if value != expected {
        bail!("{value:?} (value) != {expected:?} (expected)");
    }

    Ok(())
}
