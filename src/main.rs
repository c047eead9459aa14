use std::{
    error::Error,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use kireorder::{
    hook::{
        Config, PluginRegistry, Session, default_prefix_reordering_hook, default_reordering_hook,
        register,
    },
    options::{ReorderArgs, ReorderOption},
};
use tracing_subscriber::EnvFilter;

/// Reorder collected test identifiers into priority buckets.
///
/// Identifiers are taken from the arguments, or from stdin one per line, and
/// printed in their new order.
#[derive(Debug, Parser)]
#[command(name = "kireorder", version)]
struct Cli {
    /// Test identifiers in discovery order, read from stdin if omitted.
    #[arg(value_name = "TEST_ID")]
    tests: Vec<String>,

    /// Always apply a default ordering before the `--reorder` option.
    #[arg(long, value_enum, value_name = "MODE")]
    auto: Option<AutoMode>,

    #[command(flatten)]
    reorder: ReorderArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AutoMode {
    Prefix,
    Regex,
}

fn read_tests(stdin: impl BufRead) -> io::Result<Vec<String>> {
    stdin
        .lines()
        .filter(|line| !matches!(line, Ok(line) if line.trim().is_empty()))
        .collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut tests = match cli.tests.is_empty() {
        true => match read_tests(io::stdin().lock()) {
            Ok(tests) => tests,
            Err(err) => {
                eprintln!("error: could not read test identifiers: {err}");
                return ExitCode::FAILURE;
            }
        },
        false => cli.tests,
    };

    let mut registry = PluginRegistry::new();
    match cli.auto {
        Some(AutoMode::Prefix) => {
            registry.register("default_prefix_reordering", default_prefix_reordering_hook());
        }
        Some(AutoMode::Regex) => {
            registry.register("default_reordering", default_reordering_hook());
        }
        None => {}
    }
    register(&mut registry);
    tracing::debug!(hooks = registry.len(), tests = tests.len(), "collected tests");

    let session = Session::new("kireorder");
    let config = Config::new().with_reorder(ReorderOption::from(cli.reorder));
    if let Err(err) = registry.collection_modify_items(&session, &config, &mut tests) {
        eprintln!("error[{}]: {err}", err.kind_name());
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        return ExitCode::FAILURE;
    }

    let mut stdout = io::stdout().lock();
    for test in &tests {
        if writeln!(stdout, "{test}").is_err() {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
