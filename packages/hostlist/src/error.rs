use thiserror::Error;

/// Errors that can occur when expanding or collecting hostlists.
///
/// Every variant carries the piece of input that caused the problem. Operations are
/// all-or-nothing: when an error is returned, no partial result was produced.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A `[` was found while already inside a bracket group.
    #[error("nested brackets in hostlist '{expression}'")]
    NestedBrackets {
        /// The hostlist expression that contained the nested bracket.
        expression: String,
    },

    /// A `]` was found without a matching `[`, or a `[` was never closed.
    #[error("unbalanced brackets in hostlist '{expression}'")]
    UnbalancedBrackets {
        /// The hostlist expression with the unbalanced bracket.
        expression: String,
    },

    /// A range inside a bracket group is neither `DIGITS` nor `DIGITS-DIGITS`.
    #[error("bad range '{range}'")]
    BadRange {
        /// The text of the offending range.
        range: String,
    },

    /// A range has an upper bound that is smaller than its lower bound.
    #[error("start > stop in range '{range}'")]
    StartAfterStop {
        /// The text of the offending range.
        range: String,
    },

    /// A single range would enumerate more than `max_size` values.
    #[error("range '{range}' too large, limit is {max_size} values")]
    RangeTooLarge {
        /// The text of the offending range.
        range: String,

        /// The limit that was exceeded.
        max_size: usize,
    },

    /// Combining the bracket groups of one token would yield more than `max_size` host names.
    #[error("results of '{token}' too large, limit is {max_size} host names")]
    ResultsTooLarge {
        /// The token (or token remainder) whose expansion was rejected.
        token: String,

        /// The limit that was exceeded.
        max_size: usize,
    },

    /// A host name given for collection contains `,`, `[` or `]`.
    #[error("forbidden character in host name '{host}'")]
    ForbiddenCharacter {
        /// The offending host name, with surrounding whitespace removed.
        host: String,
    },

    /// An item of a Slurm task list is neither `N` nor `N(xR)`.
    #[error("bad task list syntax in '{part}'")]
    BadTaskList {
        /// The offending task list item.
        part: String,
    },

    /// An item of a Slurm task list repeats more than `max_size` times.
    #[error("task list repetitions in '{part}' too large, limit is {max_size}")]
    TaskRepetitionsTooLarge {
        /// The offending task list item.
        part: String,

        /// The limit that was exceeded.
        max_size: usize,
    },
}

/// A specialized `Result` type for hostlist operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug, Clone);

    #[test]
    fn messages_name_offending_text() {
        let error = Error::BadRange {
            range: "x".to_string(),
        };
        assert_eq!(error.to_string(), "bad range 'x'");

        let error = Error::RangeTooLarge {
            range: "1-1000000".to_string(),
            max_size: 100_000,
        };
        assert_eq!(
            error.to_string(),
            "range '1-1000000' too large, limit is 100000 values"
        );

        let error = Error::ForbiddenCharacter {
            host: "a,b".to_string(),
        };
        assert!(error.to_string().contains("'a,b'"));
    }
}
