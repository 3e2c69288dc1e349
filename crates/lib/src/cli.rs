//! CLI helpers.

mod bencher;
pub(crate) mod error;
mod output;
mod stdout_logger;

use core::fmt;
use core::ops::AddAssign;
use core::time::Duration;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::input::Input;

pub(crate) use self::bencher::Bencher;
pub use self::error::CliError;
pub(crate) use self::output::{Output, OutputKind};

static STDOUT_LOGGER: stdout_logger::StdoutLogger = stdout_logger::StdoutLogger;

/// Default numeric log level, the same as `INFO`.
const DEFAULT_LOG_LEVEL: u32 = 20;

/// Run mode.
#[derive(Default)]
pub enum Mode {
    /// Default run mode.
    #[default]
    Default,
    /// Run as benchmark.
    Bench,
}

/// Input options.
pub struct Opts {
    /// Run as a benchmark.
    pub mode: Mode,
    /// Input files to process, in order.
    input_files: Vec<PathBuf>,
    /// Maximum log level.
    level: LevelFilter,
    /// Output JSON report.
    json: bool,
    /// Warmup period.
    warmup: Option<u64>,
    /// Bench period.
    time_limit: Option<u64>,
    /// Number of times to run benches.
    count: Option<usize>,
    /// Arguments which were not understood.
    ignored: Vec<String>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            mode: Mode::Default,
            input_files: Vec::new(),
            level: level_from_numeric(DEFAULT_LOG_LEVEL),
            json: false,
            warmup: None,
            time_limit: None,
            count: None,
            ignored: Vec::new(),
        }
    }
}

impl Opts {
    /// Parse CLI options and set up logging.
    pub fn parse() -> Result<Self> {
        let opts = Self::parse_from(std::env::args_os().skip(1))?;

        if !opts.json {
            log::set_max_level(opts.level);
            log::set_logger(&STDOUT_LOGGER)
                .map_err(|error| anyhow!("failed to set log: {error}"))?;
        }

        Ok(opts)
    }

    /// Parse options from the given arguments, not including the program
    /// name.
    pub fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut opts = Self::default();
        let mut it = args.into_iter().peekable();

        while let Some(arg) = it.next() {
            let Some(arg) = arg.to_str() else {
                bail!("non-utf8 argument");
            };

            match arg {
                "--input-files" => {
                    let before = opts.input_files.len();

                    while let Some(path) = it.next_if(|arg| !is_flag(arg)) {
                        opts.input_files.push(PathBuf::from(path));
                    }

                    if opts.input_files.len() == before {
                        bail!("missing argument to `--input-files`");
                    }
                }
                "--log-level" => {
                    let level = it.next().context("missing argument to `--log-level`")?;
                    let level = level
                        .to_str()
                        .context("missing string argument to `--log-level`")?;
                    opts.level =
                        level_from_numeric(level.parse().context("bad argument to `--log-level`")?);
                }
                "--verbose" => {
                    opts.level = LevelFilter::Debug;
                }
                "--bench" => {
                    if !matches!(opts.mode, Mode::Default) {
                        bail!("duplicate `--bench` arguments");
                    }

                    opts.mode = Mode::Bench;
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
                    opts.input_files.extend(it.by_ref().map(PathBuf::from));
                    break;
                }
                other => {
                    opts.ignored.push(other.to_owned());
                }
            }
        }

        Ok(opts)
    }

    /// Input files to process, in order.
    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    /// The configured maximum log level.
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Test if output is emitted as JSON lines.
    pub fn is_json(&self) -> bool {
        self.json
    }

    fn output_kind(&self) -> OutputKind {
        if self.json {
            OutputKind::Json
        } else {
            OutputKind::Normal
        }
    }
}

fn is_flag(arg: &OsString) -> bool {
    arg.to_str().is_some_and(|arg| arg.starts_with("--"))
}

/// Convert a numeric verbosity in the style of Python's `logging` module into
/// a level filter.
///
/// # Examples
///
/// ```
/// use lib::cli::level_from_numeric;
/// use log::LevelFilter;
///
/// assert_eq!(level_from_numeric(10), LevelFilter::Debug);
/// assert_eq!(level_from_numeric(20), LevelFilter::Info);
/// assert_eq!(level_from_numeric(60), LevelFilter::Off);
/// ```
pub fn level_from_numeric(level: u32) -> LevelFilter {
    match level {
        0..=9 => LevelFilter::Trace,
        10..=19 => LevelFilter::Debug,
        20..=29 => LevelFilter::Info,
        30..=39 => LevelFilter::Warn,
        40..=50 => LevelFilter::Error,
        _ => LevelFilter::Off,
    }
}

/// Run the given solver over every input file named on the command line.
///
/// Uses `default_input` when no input files are given. A failing file is
/// reported and processing continues with the next one, but the returned
/// result is an error if any file failed.
pub fn entry<T, A, B>(default_input: &str, solve: T) -> Result<()>
where
    T: Fn(&Input) -> Result<(A, B)>,
    A: fmt::Display,
    B: fmt::Display,
{
    let opts = Opts::parse()?;
    let stdout = std::io::stdout();
    let mut o = Output::new(stdout.lock(), opts.output_kind());
    run(&mut o, &opts, Path::new(default_input), solve)
}

pub(crate) fn run<W, T, A, B>(
    o: &mut Output<W>,
    opts: &Opts,
    default_input: &Path,
    solve: T,
) -> Result<()>
where
    W: Write,
    T: Fn(&Input) -> Result<(A, B)>,
    A: fmt::Display,
    B: fmt::Display,
{
    for arg in &opts.ignored {
        log::warn!("ignoring unsupported argument: {arg}");
    }

    let default = [default_input.to_path_buf()];

    let files = if opts.input_files.is_empty() {
        &default[..]
    } else {
        &opts.input_files[..]
    };

    let mut failed = 0;

    for path in files {
        o.info("#################")?;
        o.info(format_args!("using {} as input", path.display()))?;

        if let Err(error) = run_file(o, opts, path, &solve) {
            failed += 1;
            o.error(format_args!("{error:#}"))?;
        }
    }

    if failed > 0 {
        return Err(CliError::Failed {
            failed,
            total: files.len(),
        }
        .into());
    }

    Ok(())
}

fn run_file<W, T, A, B>(o: &mut Output<W>, opts: &Opts, path: &Path, solve: &T) -> Result<()>
where
    W: Write,
    T: Fn(&Input) -> Result<(A, B)>,
    A: fmt::Display,
    B: fmt::Display,
{
    let input = Input::open(path)?;

    match opts.mode {
        Mode::Default => {
            let (output, elapsed) = crate::timeit!(solve(&input));
            let (part1, part2) = output.with_context(|| anyhow!("{}", path.display()))?;
            o.info(format_args!("solution found in {elapsed:?}"))?;

            o.answer(&Answer {
                input: path.display().to_string(),
                part1: part1.to_string(),
                part2: part2.to_string(),
                elapsed,
            })?;
        }
        Mode::Bench => {
            let report = Bencher::new().iter(o, opts, || solve(&input))?;
            o.report(&report)?;
        }
    }

    Ok(())
}

/// The answers computed for one input file.
#[derive(Debug, Deserialize, Serialize)]
pub struct Answer {
    pub input: String,
    pub part1: String,
    pub part2: String,
    pub elapsed: Duration,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Report {
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
}

impl Report {
    /// Build a report out of a collection of samples.
    pub(crate) fn from_samples(mut samples: Vec<Duration>) -> Self {
        samples.sort();

        let count = samples.len();
        let sum: Duration = samples.iter().copied().sum();

        let avg = if count == 0 {
            Duration::default()
        } else {
            Duration::from_nanos(
                u64::try_from(sum.as_nanos() / (count as u128)).unwrap_or_default(),
            )
        };

        Self {
            p50: percentile(&samples, 5000),
            p95: percentile(&samples, 9500),
            p99: percentile(&samples, 9900),
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
        }
    }
}

/// Pick the given percentile out of sorted samples, expressed in hundredths of
/// a percent.
fn percentile(samples: &[Duration], n: usize) -> Duration {
    let at = (samples.len() * n / 10000).min(samples.len().saturating_sub(1));
    samples.get(at).copied().unwrap_or_default()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            p50,
            p95,
            p99,
            count,
            min,
            max,
            avg,
        } = self;

        write!(f, "count: {count}, min: {min:?}, max: {max:?}, avg: {avg:?}, 50th: {p50:?}, 95th: {p95:?}, 99th: {p99:?}")
    }
}

impl AddAssign<&Report> for Report {
    fn add_assign(&mut self, rhs: &Report) {
        self.p50 += rhs.p50;
        self.p95 += rhs.p95;
        self.p99 += rhs.p99;
        self.count += rhs.count;
        self.min += rhs.min;
        self.max += rhs.max;
        self.avg += rhs.avg;
    }
}
