use foldhash::HashSet;
use tracing::debug;

use crate::{ExpandOptions, collect, expand, expand_with, numerically_sorted};

/// How host names from several hostlist expressions are combined by [`combine()`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SetOperation {
    /// Host names present in any operand, in first-seen order. When duplicates are allowed,
    /// the operands are concatenated as they are.
    Union,

    /// Host names present in every operand, in the order of the first operand.
    Intersection,

    /// Host names of the first operand that are in none of the others, in the order of the
    /// first operand.
    Difference,

    /// Host names present in exactly one of the two operands being combined. The survivors of
    /// the left operand come first, then those of the right operand.
    SymmetricDifference,
}

impl SetOperation {
    /// Repeated host names in `left` are kept by every operation; `allow_duplicates` only decides
    /// whether a union also keeps the repeats contributed by `right`.
    fn apply(self, left: Vec<String>, right: Vec<String>, allow_duplicates: bool) -> Vec<String> {
        match self {
            Self::Union if allow_duplicates => {
                let mut combined = left;
                combined.extend(right);
                combined
            }
            Self::Union => {
                let mut seen: HashSet<String> = left.iter().cloned().collect();
                let mut combined = left;

                for host in right {
                    if seen.insert(host.clone()) {
                        combined.push(host);
                    }
                }

                combined
            }
            Self::Intersection => {
                let right: HashSet<String> = right.into_iter().collect();
                left.into_iter().filter(|host| right.contains(host)).collect()
            }
            Self::Difference => {
                let right: HashSet<String> = right.into_iter().collect();
                left.into_iter().filter(|host| !right.contains(host)).collect()
            }
            Self::SymmetricDifference => {
                let left_set: HashSet<&str> = left.iter().map(String::as_str).collect();
                let right_set: HashSet<&str> = right.iter().map(String::as_str).collect();

                let left_only = left
                    .iter()
                    .filter(|host| !right_set.contains(host.as_str()));
                let right_only = right
                    .iter()
                    .filter(|host| !left_set.contains(host.as_str()));

                left_only.chain(right_only).cloned().collect()
            }
        }
    }
}

/// Expands every expression and folds them together, left to right, with `operation`.
///
/// Returns the expanded host names of the result. No expressions at all yield an empty result.
/// If `options` requests sorting, the final result is sorted numerically. If `options` allows
/// duplicates, a union keeps every repeated host name of every operand, while the other
/// operations keep the repeats of the first operand that survive.
///
/// # Errors
///
/// Returns the first error produced by expanding any of the expressions.
///
/// # Example
///
/// ```
/// use hostlist::{ExpandOptions, SetOperation};
///
/// let hosts = hostlist::combine(
///     SetOperation::Difference,
///     ["n[1-10]", "n[2-9]"],
///     &ExpandOptions::new(),
/// )
/// .unwrap();
///
/// assert_eq!(hosts, vec!["n1", "n10"]);
/// ```
pub fn combine<'a, I>(
    operation: SetOperation,
    expressions: I,
    options: &ExpandOptions,
) -> crate::Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut expressions = expressions.into_iter();

    let Some(first) = expressions.next() else {
        return Ok(Vec::new());
    };

    let mut hosts = expand_with(first, options)?;

    for expression in expressions {
        let other = expand_with(expression, options)?;
        hosts = operation.apply(hosts, other, options.allows_duplicates());
    }

    if options.sorts() {
        hosts = numerically_sorted(hosts);
    }

    debug!(?operation, hosts = hosts.len(), "combined hostlists");

    Ok(hosts)
}

fn combine_pair(operation: SetOperation, a: &str, b: &str) -> crate::Result<String> {
    let hosts = operation.apply(expand(a)?, expand(b)?, false);
    collect(hosts)
}

/// Returns the collected hostlist of the host names present in both expressions.
///
/// # Errors
///
/// Returns an error if either expression fails to expand.
///
/// # Example
///
/// ```
/// assert_eq!(hostlist::intersect("n[1-10]", "n[5-20]").unwrap(), "n[5-10]");
/// assert_eq!(hostlist::intersect("n[1-2]", "m[1-2]").unwrap(), "");
/// ```
pub fn intersect(a: &str, b: &str) -> crate::Result<String> {
    combine_pair(SetOperation::Intersection, a, b)
}

/// Returns the collected hostlist of the host names present in either expression.
///
/// # Errors
///
/// Returns an error if either expression fails to expand.
pub fn union(a: &str, b: &str) -> crate::Result<String> {
    combine_pair(SetOperation::Union, a, b)
}

/// Returns the collected hostlist of the host names of `a` that are not in `b`.
///
/// # Errors
///
/// Returns an error if either expression fails to expand.
pub fn difference(a: &str, b: &str) -> crate::Result<String> {
    combine_pair(SetOperation::Difference, a, b)
}

/// Returns the collected hostlist of the host names present in exactly one of the expressions.
///
/// # Errors
///
/// Returns an error if either expression fails to expand.
pub fn symmetric_difference(a: &str, b: &str) -> crate::Result<String> {
    combine_pair(SetOperation::SymmetricDifference, a, b)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn apply_union_keeps_first_seen_order() {
        assert_eq!(
            SetOperation::Union.apply(hosts(&["b", "a"]), hosts(&["c", "a", "d"]), false),
            hosts(&["b", "a", "c", "d"])
        );
    }

    #[test]
    fn apply_intersection_keeps_left_order() {
        assert_eq!(
            SetOperation::Intersection.apply(hosts(&["c", "b", "a"]), hosts(&["a", "c"]), false),
            hosts(&["c", "a"])
        );
    }

    #[test]
    fn apply_difference() {
        assert_eq!(
            SetOperation::Difference.apply(hosts(&["a", "b", "c"]), hosts(&["b"]), false),
            hosts(&["a", "c"])
        );
    }

    #[test]
    fn apply_symmetric_difference() {
        assert_eq!(
            SetOperation::SymmetricDifference
                .apply(hosts(&["a", "b", "c"]), hosts(&["d", "b"]), false),
            hosts(&["a", "c", "d"])
        );
    }

    #[test]
    fn pairwise_operations() {
        assert_eq!(intersect("n[1-10]", "n[5-20]").unwrap(), "n[5-10]");
        assert_eq!(union("n[1-3]", "n[3-5]").unwrap(), "n[1-5]");
        assert_eq!(difference("n[1-5]", "n3").unwrap(), "n[1-2,4-5]");
        assert_eq!(
            symmetric_difference("n[1-5]", "n[4-8]").unwrap(),
            "n[1-3,6-8]"
        );
    }

    #[test]
    fn empty_intersection() {
        assert_eq!(intersect("a[1-3]", "b[1-3]").unwrap(), "");
        assert_eq!(intersect("", "b[1-3]").unwrap(), "");
    }

    #[test]
    fn errors_propagate() {
        intersect("n[1-", "n1").unwrap_err();
        union("n1", "n[3-1]").unwrap_err();
    }

    #[test]
    fn combine_many() {
        let options = ExpandOptions::new();

        assert_eq!(
            combine(
                SetOperation::Intersection,
                ["n[1-10]", "n[3-8]", "n[5-20]"],
                &options
            )
            .unwrap(),
            hosts(&["n5", "n6", "n7", "n8"])
        );

        assert!(
            combine(SetOperation::Union, Vec::<&str>::new(), &options)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn combine_sorts_final_result() {
        let options = ExpandOptions::new().sort(true);

        assert_eq!(
            combine(SetOperation::Union, ["n10", "n2,n1"], &options).unwrap(),
            hosts(&["n1", "n2", "n10"])
        );
    }

    #[test]
    fn union_with_duplicates_treats_operands_alike() {
        assert_eq!(
            SetOperation::Union.apply(hosts(&["a", "a", "b"]), hosts(&["b", "c", "c"]), true),
            hosts(&["a", "a", "b", "b", "c", "c"])
        );

        let options = ExpandOptions::new().allow_duplicates(true);

        assert_eq!(
            combine(SetOperation::Union, ["n1,n1", "n1,n2,n2"], &options).unwrap(),
            hosts(&["n1", "n1", "n1", "n2", "n2"])
        );
    }
}
