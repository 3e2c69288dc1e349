use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use lib::cli::{Answer, Report};
use serde::{de::IntoDeserializer, Deserialize};

#[derive(Debug, Deserialize)]
struct Target {
    name: String,
    kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    target: Target,
    executable: Option<PathBuf>,
}

struct Executable {
    name: String,
    path: PathBuf,
}

#[derive(Default)]
struct Opts {
    quiet: bool,
    verbose: bool,
    args: Vec<OsString>,
}

impl Opts {
    /// Parse CLI options.
    pub fn parse() -> Result<Self> {
        let mut opts = Self::default();
        let mut it = std::env::args_os().skip(1);

        for arg in it.by_ref() {
            let Some(arg) = arg.to_str() else {
                bail!("non-utf8 argument");
            };

            match arg {
                "-q" | "--quiet" => {
                    opts.quiet = true;
                }
                "-V" | "--verbose" => {
                    opts.verbose = true;
                }
                "--" => {
                    break;
                }
                other => {
                    bail!("unsupported argument: {other}");
                }
            }
        }

        opts.args.extend(it);
        Ok(opts)
    }

    /// Test if options are verbose.
    fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse()?;

    let mut cmd = Command::new("cargo");
    cmd.stdout(Stdio::piped());
    cmd.arg("build");
    cmd.arg("--release");
    cmd.args(["-p", "y2022"]);
    cmd.args(["--message-format", "json"]);

    let mut child = cmd.spawn()?;

    let output = child.stdout.take().context("missing stdout")?;
    let output = serde_json::Deserializer::from_reader(output).into_iter();

    let mut executables = Vec::new();

    for value in output {
        let value: serde_json::Value = value?;

        if !matches!(
            value.get("reason").and_then(|d| d.as_str()),
            Some("compiler-artifact")
        ) {
            continue;
        }

        let artifact: Artifact = Artifact::deserialize(value.into_deserializer())?;

        let [kind] = &artifact.target.kind[..] else {
            continue;
        };

        if kind != "bin" {
            continue;
        }

        let path = artifact.executable.context("missing executable")?;

        executables.push(Executable {
            name: artifact.target.name,
            path,
        });
    }

    let status = child.wait()?;

    if !status.success() {
        bail!("cargo build failed: {status}");
    }

    executables.sort_by(|a, b| a.name.cmp(&b.name));

    let mut total = Report::default();
    let mut failed = 0;

    for e in executables {
        let mut cmd = Command::new(e.path);
        cmd.stdout(Stdio::piped());
        cmd.args(solution_args(&opts.args));

        let mut child = cmd.spawn()?;
        let output = child.stdout.take().context("missing stdout")?;
        let output = serde_json::Deserializer::from_reader(output).into_iter();

        for value in output {
            let value: serde_json::Value = value?;

            match value.get("type").and_then(|d| d.as_str()) {
                Some("answer") => {
                    let answer = Data::<Answer>::deserialize(value.into_deserializer())?.data;

                    println!(
                        "{name}: {input}: part 1: {part1}, part 2: {part2} ({elapsed:?})",
                        name = e.name,
                        input = answer.input,
                        part1 = answer.part1,
                        part2 = answer.part2,
                        elapsed = answer.elapsed,
                    );
                }
                Some("report") => {
                    let report = Data::<Report>::deserialize(value.into_deserializer())?.data;

                    if !opts.quiet {
                        println!("{name}: {report}", name = e.name);
                    }

                    total += &report;
                }
                Some("message") => {
                    let message = Data::<Message>::deserialize(value.into_deserializer())?.data;

                    if opts.is_verbose() || message.is_important() {
                        println!(
                            "{name}: {kind}: {output}",
                            name = e.name,
                            kind = message.kind,
                            output = message.output
                        );
                    }
                }
                _ => {}
            }
        }

        let status = child.wait()?;

        if !status.success() {
            failed += 1;
        }

        if opts.is_verbose() {
            println!("{name}: {status}", name = e.name);
        }
    }

    println!("total: {total}");

    if failed > 0 {
        bail!("{failed} solution(s) failed");
    }

    Ok(())
}

/// Arguments passed to each solution binary.
///
/// Forwarded arguments may end with `--` followed by input paths, so `--json`
/// has to come first.
fn solution_args(forwarded: &[OsString]) -> Vec<OsString> {
    let mut args = vec![OsString::from("--json")];
    args.extend(forwarded.iter().cloned());
    args
}

#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Deserialize)]
struct Message {
    kind: String,
    output: String,
}

impl Message {
    fn is_important(&self) -> bool {
        matches!(self.kind.as_str(), "error")
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::PathBuf;

    use super::solution_args;

    #[test]
    fn test_json_survives_path_separator() {
        let forwarded = ["--", "a.txt", "b.txt"].map(OsString::from);
        let opts = lib::cli::Opts::parse_from(solution_args(&forwarded)).unwrap();

        assert!(opts.is_json());
        assert_eq!(
            opts.input_files(),
            [PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
    }
}
