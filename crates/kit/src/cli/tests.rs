use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use tempfile::NamedTempFile;

use super::{json_requested, run_with, Entry, Mode, Opts, Output, OutputKind, Report};
use crate::input::Input;

fn opts(args: &[&str]) -> Result<Opts> {
    Opts::parse_from(args.iter().map(OsString::from))
}

fn temp_input(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
}

fn sum_lines(input: Input<'_>) -> Result<(u64, u64)> {
    let mut sum = 0;
    let mut count = 0;

    for mut line in input.lines() {
        sum += line.next::<u64>()?;
        line.finish()?;
        count += 1;
    }

    Ok((sum, count))
}

fn run_to_string(opts: &Opts, entry: Entry) -> Result<String> {
    let mut o = Output::new(Vec::new(), opts.output_kind());
    run_with(&mut o, opts, entry, sum_lines)?;
    Ok(String::from_utf8(o.into_inner())?)
}

#[test]
fn test_parse_path() {
    let opts = opts(&["inputs/d01.txt"]).unwrap();
    assert_eq!(opts.mode, Mode::Default);
    assert_eq!(opts.path().unwrap(), Path::new("inputs/d01.txt"));
    assert!(!opts.time && !opts.json && !opts.verbose);
}

#[test]
fn test_parse_flags() {
    let opts = opts(&[
        "--bench",
        "--warmup",
        "0",
        "--count",
        "3",
        "--time-limit",
        "10",
        "--json",
        "--verbose",
        "in.txt",
    ])
    .unwrap();

    assert_eq!(opts.mode, Mode::Bench);
    assert_eq!(opts.warmup, Some(0));
    assert_eq!(opts.count, Some(3));
    assert_eq!(opts.time_limit, Some(10));
    assert!(opts.json && opts.verbose);
}

#[test]
fn test_parse_after_separator() {
    let parsed = opts(&["--time", "--", "--weird-name"]).unwrap();
    assert!(parsed.time);
    assert_eq!(parsed.path().unwrap(), Path::new("--weird-name"));

    let parsed = opts(&["-"]).unwrap();
    assert_eq!(parsed.path().unwrap(), Path::new("-"));
}

#[test]
fn test_parse_errors() {
    let error = opts(&["--frobnicate"]).unwrap_err();
    assert_eq!(error.to_string(), "unsupported argument: --frobnicate");

    let error = opts(&["a.txt", "b.txt"]).unwrap_err();
    assert_eq!(error.to_string(), "unexpected argument: b.txt");

    let error = opts(&["--bench", "--bench"]).unwrap_err();
    assert_eq!(error.to_string(), "duplicate `--bench` arguments");

    let error = opts(&["--count"]).unwrap_err();
    assert_eq!(error.to_string(), "missing argument to `--count`");

    let error = opts(&["--warmup", "soon"]).unwrap_err();
    assert_eq!(error.to_string(), "bad argument to `--warmup`");

    let error = opts(&[]).unwrap().path().unwrap_err();
    assert_eq!(error.to_string(), "missing input path");
}

#[test]
fn test_run_default() {
    let file = temp_input(b"1\n2\n3\n");
    let path = file.path().to_str().unwrap();

    let out = run_to_string(&opts(&[path]).unwrap(), Entry::new("t")).unwrap();
    assert_eq!(out, "(6, 3)\n");

    let out = run_to_string(&opts(&[path]).unwrap(), Entry::new("t").timed()).unwrap();
    assert!(out.starts_with("(6, 3) time: "), "{out}");
    assert!(out.ends_with("µs\n"), "{out}");

    let out = run_to_string(&opts(&["--time", path]).unwrap(), Entry::new("t")).unwrap();
    assert!(out.starts_with("(6, 3) time: "), "{out}");
}

#[test]
fn test_run_json() {
    let file = temp_input(b"10\n20\n");
    let path = file.path().to_str().unwrap();

    let out = run_to_string(&opts(&["--json", path]).unwrap(), Entry::new("t")).unwrap();
    assert_eq!(out, "{\"type\":\"answer\",\"data\":{\"part1\":30,\"part2\":2}}\n");
}

#[test]
fn test_run_reports_position() {
    let file = temp_input(b"1\n2 x\n");
    let opts = opts(&[file.path().to_str().unwrap()]).unwrap();

    let error = run_to_string(&opts, Entry::new("t")).unwrap_err();
    let expected = format!("{}:2:3: trailing input `x`", file.path().display());
    assert_eq!(format!("{error:#}"), expected);
}

#[test]
fn test_run_missing_file() {
    let opts = opts(&["/this/path/does/not/exist.txt"]).unwrap();
    let error = run_to_string(&opts, Entry::new("t")).unwrap_err();
    assert_eq!(error.to_string(), "/this/path/does/not/exist.txt");
    assert!(error.chain().count() >= 2);
}

#[test]
fn test_run_bench() {
    let file = temp_input(b"5\n");
    let opts = opts(&["--bench", "--warmup", "0", "--count", "4", file.path().to_str().unwrap()]).unwrap();

    let out = run_to_string(&opts, Entry::new("t")).unwrap();
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("info: running benches 4 time(s)..."));
    assert!(lines.next().unwrap().starts_with("count: 4, "));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_bench_rejects_unstable_answers() {
    let file = temp_input(b"5\n");
    let opts = opts(&["--bench", "--warmup", "0", "--count", "2", file.path().to_str().unwrap()]).unwrap();

    let mut n = 0u64;
    let mut o = Output::new(Vec::new(), OutputKind::Normal);

    let error = run_with(&mut o, &opts, Entry::new("t"), |_| {
        n += 1;
        Ok((n, 0u64))
    })
    .unwrap_err();

    assert_eq!(error.to_string(), "(2, 0) (value) != (1, 0) (expected)");
}

#[test]
fn test_run_help() {
    let opts = opts(&["--help"]).unwrap();
    let mut o = Output::new(Vec::new(), OutputKind::Normal);

    run_with(&mut o, &opts, Entry::new("d01"), |_| -> Result<(u64, u64)> {
        bail!("not called")
    })
    .unwrap();

    let out = String::from_utf8(o.into_inner()).unwrap();
    assert!(out.starts_with("usage: d01 [options] <path>\n"));
}

#[test]
fn test_report() {
    let mut samples = (1..=100).rev().map(Duration::from_micros).collect::<Vec<_>>();
    let report = Report::from_samples(&mut samples);

    assert_eq!(report.count, 100);
    assert_eq!(report.min, Duration::from_micros(1));
    assert_eq!(report.max, Duration::from_micros(100));
    assert_eq!(report.avg, Duration::from_nanos(50500));
    assert_eq!(report.p50, Duration::from_micros(51));
    assert_eq!(report.p95, Duration::from_micros(96));
    assert_eq!(report.p99, Duration::from_micros(100));

    assert_eq!(Report::from_samples(&mut []), Report::default());
}

#[test]
fn test_json_requested_on_bad_arguments() {
    let args = |args: &[&str]| args.iter().map(OsString::from).collect::<Vec<_>>();

    assert!(opts(&["--json", "--nope"]).is_err());
    assert!(json_requested(args(&["--json", "--nope"])));
    assert!(json_requested(args(&["--nope", "--json"])));
    assert!(!json_requested(args(&["--nope", "in.txt"])));
    assert!(!json_requested(args(&["--", "--json"])));
}
