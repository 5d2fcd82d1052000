#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the hostlist tool.
//!
//! This module is excluded from mutation testing because testing process entry/exit behavior
//! is impractical - it requires spawning subprocesses and checking exit codes.

use std::num::NonZero;
use std::process::ExitCode;

use argh::FromArgs;
use hostlist_cli::{RunInput, RunOutcome, run, select_operation, select_output_mode};
use tracing_subscriber::EnvFilter;

/// Expand, collect, count and combine hostlists such as 'node[1-2,17]'.
///
/// Several expressions are combined with a union unless another operation is selected.
#[derive(FromArgs)]
struct Args {
    /// print every host name (default)
    #[argh(switch, short = 'e')]
    expand: bool,

    /// print the collected hostlist
    #[argh(switch, short = 'c')]
    collapse: bool,

    /// print the number of host names
    #[argh(switch, short = 'n')]
    count: bool,

    /// separator between expanded host names (default: newline)
    #[argh(option, short = 'd')]
    delimiter: Option<String>,

    /// host names present in any expression (default)
    #[argh(switch, short = 'u')]
    union: bool,

    /// host names present in every expression; exits with 1 if there are none
    #[argh(switch, short = 'i')]
    intersection: bool,

    /// host names of the first expression that are in none of the others
    #[argh(switch, short = 'm')]
    difference: bool,

    /// host names present in exactly one of each pair of combined expressions
    #[argh(switch, short = 'x')]
    symmetric_difference: bool,

    /// sort host names numerically
    #[argh(switch, short = 's')]
    sort: bool,

    /// keep repeated host names
    #[argh(switch)]
    allow_duplicates: bool,

    /// limit on the host names a single range or bracket token may expand into
    #[argh(option)]
    max_size: Option<NonZero<usize>>,

    /// repeat each host name by its task count from a Slurm task list such as '2(x3),1'
    #[argh(option)]
    repeat_slurm_tasks: Option<String>,

    /// hostlist expressions
    #[argh(positional)]
    expressions: Vec<String>,
}

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout carries only results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Args = argh::from_env();

    let operation = match select_operation(
        args.union,
        args.intersection,
        args.difference,
        args.symmetric_difference,
    ) {
        Ok(operation) => operation,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let output = match select_output_mode(args.expand, args.collapse, args.count) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let input = RunInput {
        expressions: args.expressions,
        operation,
        output,
        delimiter: args.delimiter.unwrap_or_else(|| "\n".to_string()),
        sort: args.sort,
        allow_duplicates: args.allow_duplicates,
        max_size: args.max_size,
        repeat_slurm_tasks: args.repeat_slurm_tasks,
    };

    match run(&input) {
        Ok(RunOutcome::Printed { output }) => {
            if !output.is_empty() {
                println!("{output}");
            }

            ExitCode::SUCCESS
        }
        Ok(RunOutcome::EmptyIntersection { output }) => {
            if !output.is_empty() {
                println!("{output}");
            }

            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
