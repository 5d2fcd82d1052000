#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Command line tool to expand, collect, count and combine hostlists such as `node[1-2,17]`.
//!
//! This crate provides the logic of the `hostlist` binary, exposed via the [`run`] function.
//! The binary entry point is in `main.rs`.

use std::num::NonZero;

use hostlist::{CollectOptions, ExpandOptions};
pub use hostlist::SetOperation;
use thiserror::Error;
use tracing::debug;

/// What the tool prints for the combined host names.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum OutputMode {
    /// Every host name, separated by the delimiter.
    #[default]
    Expand,

    /// The collected hostlist.
    Collapse,

    /// The number of host names.
    Count,
}

/// Input parameters for the `run` function.
///
/// This is the parsed and validated input that the core logic operates on.
#[doc(hidden)]
#[derive(Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "This is a hidden struct for internal/test use only"
)]
pub struct RunInput {
    /// Hostlist expressions to combine, in command line order.
    pub expressions: Vec<String>,
    /// How several expressions are combined.
    pub operation: SetOperation,
    /// What to print.
    pub output: OutputMode,
    /// Separator between host names in [`OutputMode::Expand`].
    pub delimiter: String,
    /// Sort host names numerically.
    pub sort: bool,
    /// Keep repeated host names.
    pub allow_duplicates: bool,
    /// Overrides the expansion size limit.
    pub max_size: Option<NonZero<usize>>,
    /// Slurm task list; each host name is repeated by its task count.
    pub repeat_slurm_tasks: Option<String>,
}

/// The result of a successful `run`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(
    clippy::exhaustive_enums,
    reason = "This is a hidden enum for internal/test use only"
)]
pub enum RunOutcome {
    /// The result to print on standard output.
    Printed {
        /// The text to print, without a trailing newline.
        output: String,
    },

    /// An intersection was requested and no host name is present in every expression.
    EmptyIntersection {
        /// The text to print, without a trailing newline. Empty unless counting.
        output: String,
    },
}

/// Errors that can occur while running the tool.
#[doc(hidden)]
#[derive(Debug, Error)]
#[allow(
    clippy::exhaustive_enums,
    reason = "This is a hidden enum for internal/test use only"
)]
pub enum RunError {
    /// A hostlist expression or a host name could not be processed.
    #[error(transparent)]
    Hostlist(#[from] hostlist::Error),

    /// No hostlist expression was given.
    #[error("no hostlist expressions given")]
    NoExpressions,

    /// More than one of a mutually exclusive group of options was given.
    #[error("options {0} cannot be combined")]
    ConflictingOptions(String),

    /// The Slurm task list does not have one entry per host name.
    #[error("task list has {tasks} entries but there are {hosts} host names")]
    TaskCountMismatch {
        /// Number of host names after combining the expressions.
        hosts: usize,
        /// Number of entries in the expanded task list.
        tasks: usize,
    },

    /// Repeating the host names by their task counts would exceed the size limit.
    #[error("repeating host names by task count exceeds the limit of {max_size} host names")]
    TooManyTasks {
        /// The size limit in effect.
        max_size: usize,
    },
}

/// Picks the set operation from the mutually exclusive operation flags.
///
/// Union is used when no flag is set.
#[doc(hidden)]
pub fn select_operation(
    union: bool,
    intersection: bool,
    difference: bool,
    symmetric_difference: bool,
) -> Result<SetOperation, RunError> {
    let selected = [
        (union, SetOperation::Union),
        (intersection, SetOperation::Intersection),
        (difference, SetOperation::Difference),
        (symmetric_difference, SetOperation::SymmetricDifference),
    ]
    .into_iter()
    .filter_map(|(set, operation)| set.then_some(operation))
    .collect::<Vec<_>>();

    match selected.as_slice() {
        [] => Ok(SetOperation::Union),
        [operation] => Ok(*operation),
        _ => Err(RunError::ConflictingOptions(
            "--union, --intersection, --difference and --symmetric-difference".to_string(),
        )),
    }
}

/// Picks the output mode from the mutually exclusive output flags.
///
/// Expansion is used when no flag is set.
#[doc(hidden)]
pub fn select_output_mode(
    expand: bool,
    collapse: bool,
    count: bool,
) -> Result<OutputMode, RunError> {
    match (expand, collapse, count) {
        (_, false, false) => Ok(OutputMode::Expand),
        (false, true, false) => Ok(OutputMode::Collapse),
        (false, false, true) => Ok(OutputMode::Count),
        _ => Err(RunError::ConflictingOptions(
            "--expand, --collapse and --count".to_string(),
        )),
    }
}

/// Core logic of the tool, extracted for testability.
///
/// This function contains all the business logic without any process-global dependencies
/// like `std::env::args()` or standard output, making it suitable for direct testing.
#[doc(hidden)]
pub fn run(input: &RunInput) -> Result<RunOutcome, RunError> {
    if input.expressions.is_empty() {
        return Err(RunError::NoExpressions);
    }

    let mut options = ExpandOptions::new()
        .allow_duplicates(input.allow_duplicates)
        .sort(input.sort);

    if let Some(max_size) = input.max_size {
        options = options.max_size(max_size);
    }

    let mut hosts = hostlist::combine(
        input.operation,
        input.expressions.iter().map(String::as_str),
        &options,
    )?;

    debug!(
        operation = ?input.operation,
        expressions = input.expressions.len(),
        hosts = hosts.len(),
        "combined expressions"
    );

    if let Some(tasks) = &input.repeat_slurm_tasks {
        hosts = repeat_by_tasks(hosts, tasks, options.size_limit())?;
    }

    let output = match input.output {
        OutputMode::Expand => hosts.join(&input.delimiter),
        OutputMode::Collapse => hostlist::collect_with(&hosts, &CollectOptions::new())?,
        OutputMode::Count => hosts.len().to_string(),
    };

    if input.operation == SetOperation::Intersection && hosts.is_empty() {
        return Ok(RunOutcome::EmptyIntersection { output });
    }

    Ok(RunOutcome::Printed { output })
}

fn repeat_by_tasks(
    hosts: Vec<String>,
    tasks: &str,
    max_size: NonZero<usize>,
) -> Result<Vec<String>, RunError> {
    let tasks = hostlist::parse_slurm_tasks_per_node(tasks)?;

    if tasks.len() != hosts.len() {
        return Err(RunError::TaskCountMismatch {
            hosts: hosts.len(),
            tasks: tasks.len(),
        });
    }

    let too_many = || RunError::TooManyTasks {
        max_size: max_size.get(),
    };

    let mut total: usize = 0;
    let mut counts = Vec::with_capacity(tasks.len());

    for count in tasks {
        let count = usize::try_from(count).map_err(|_overflow| too_many())?;

        total = total
            .checked_add(count)
            .filter(|total| *total <= max_size.get())
            .ok_or_else(too_many)?;

        counts.push(count);
    }

    let mut repeated = Vec::with_capacity(total);

    for (host, count) in hosts.into_iter().zip(counts) {
        repeated.extend(std::iter::repeat_n(host, count));
    }

    Ok(repeated)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn operation_flags() {
        assert_eq!(
            select_operation(false, false, false, false).unwrap(),
            SetOperation::Union
        );
        assert_eq!(
            select_operation(false, true, false, false).unwrap(),
            SetOperation::Intersection
        );
        assert_eq!(
            select_operation(false, false, false, true).unwrap(),
            SetOperation::SymmetricDifference
        );
        assert!(matches!(
            select_operation(true, true, false, false),
            Err(RunError::ConflictingOptions(_))
        ));
    }

    #[test]
    fn output_flags() {
        assert_eq!(
            select_output_mode(false, false, false).unwrap(),
            OutputMode::Expand
        );
        assert_eq!(
            select_output_mode(true, false, false).unwrap(),
            OutputMode::Expand
        );
        assert_eq!(
            select_output_mode(false, false, true).unwrap(),
            OutputMode::Count
        );
        select_output_mode(true, true, false).unwrap_err();
        select_output_mode(false, true, true).unwrap_err();
    }

    #[test]
    fn repeat_by_tasks_expands_counts() {
        let hosts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            repeat_by_tasks(hosts, "2,1", hostlist::DEFAULT_MAX_SIZE).unwrap(),
            vec!["a", "a", "b"]
        );

        let hosts = vec!["a".to_string()];
        assert!(matches!(
            repeat_by_tasks(hosts, "1(x2)", hostlist::DEFAULT_MAX_SIZE),
            Err(RunError::TaskCountMismatch { hosts: 1, tasks: 2 })
        ));
    }

    #[test]
    fn repeat_by_tasks_is_limited() {
        let limit = NonZero::new(3).unwrap();

        let hosts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            repeat_by_tasks(hosts, "2,1", limit).unwrap(),
            vec!["a", "a", "b"]
        );

        let hosts = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(
            repeat_by_tasks(hosts, "2,2", limit),
            Err(RunError::TooManyTasks { max_size: 3 })
        ));

        let hosts = vec!["a".to_string()];
        assert!(matches!(
            repeat_by_tasks(hosts, "3000000000", hostlist::DEFAULT_MAX_SIZE),
            Err(RunError::TooManyTasks { max_size: 100_000 })
        ));

        let hosts = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(
            repeat_by_tasks(hosts, "18446744073709551615,1", hostlist::DEFAULT_MAX_SIZE),
            Err(RunError::TooManyTasks { .. })
        ));
    }
}
