use std::num::NonZero;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{Error, ExpandOptions, numerically_sorted, parse_range};

/// Expands a [hostlist][crate] expression into the host names it denotes, using the default
/// [`ExpandOptions`].
///
/// Host names are returned in the textual order of the expression with later duplicates removed.
/// An empty expression expands to an empty list.
///
/// # Errors
///
/// Returns an error if the brackets are nested or unbalanced, if a range is malformed or
/// reversed, or if a range or a token would expand to more than
/// [`DEFAULT_MAX_SIZE`][crate::DEFAULT_MAX_SIZE] host names.
///
/// # Example
///
/// ```
/// let hosts = hostlist::expand("n[1-2][4-5]m").unwrap();
///
/// assert_eq!(hosts, vec!["n14m", "n15m", "n24m", "n25m"]);
/// ```
pub fn expand(expression: &str) -> crate::Result<Vec<String>> {
    expand_with(expression, &ExpandOptions::new())
}

/// Expands a [hostlist][crate] expression into the host names it denotes.
///
/// See [`expand()`] for the default behavior; `options` controls duplicate removal, sorting and
/// the size limit.
///
/// # Errors
///
/// See [`expand()`]. The size limit is taken from `options`.
pub fn expand_with(expression: &str, options: &ExpandOptions) -> crate::Result<Vec<String>> {
    check_brackets(expression)?;

    let max_size = options.size_limit();

    let mut hosts = Vec::new();

    for token in split_tokens(expression) {
        let expanded = expand_token(token, max_size)?;
        trace!(token, hosts = expanded.len(), "expanded token");

        hosts.extend(expanded);
    }

    if !options.allows_duplicates() {
        hosts = hosts.into_iter().unique().collect();
    }

    if options.sorts() {
        hosts = numerically_sorted(hosts);
    }

    debug!(expression, hosts = hosts.len(), "expanded hostlist");

    Ok(hosts)
}

/// Verifies that every `[` is closed by a `]` before the next `[`.
fn check_brackets(expression: &str) -> crate::Result<()> {
    let mut inside_brackets = false;

    for c in expression.chars() {
        match c {
            '[' if inside_brackets => {
                return Err(Error::NestedBrackets {
                    expression: expression.to_string(),
                });
            }
            ']' if !inside_brackets => {
                return Err(Error::UnbalancedBrackets {
                    expression: expression.to_string(),
                });
            }
            '[' => inside_brackets = true,
            ']' => inside_brackets = false,
            _ => {}
        }
    }

    if inside_brackets {
        return Err(Error::UnbalancedBrackets {
            expression: expression.to_string(),
        });
    }

    Ok(())
}

/// Splits a bracket-checked expression at the commas outside of brackets, skipping empty tokens.
fn split_tokens(expression: &str) -> impl Iterator<Item = &str> {
    let mut inside_brackets = false;

    expression
        .split(move |c: char| match c {
            '[' => {
                inside_brackets = true;
                false
            }
            ']' => {
                inside_brackets = false;
                false
            }
            ',' => !inside_brackets,
            _ => false,
        })
        .filter(|token| !token.is_empty())
}

/// One comma-separated unit of a hostlist, split at its first bracket group.
#[derive(Debug, Eq, PartialEq)]
struct Token<'a> {
    prefix: &'a str,

    /// The raw text between `[` and `]`, if the token has a bracket group.
    body: Option<&'a str>,

    /// Everything after the bracket group, itself a token.
    rest: &'a str,
}

impl<'a> Token<'a> {
    fn parse(text: &'a str) -> crate::Result<Self> {
        let Some((prefix, after_open)) = text.split_once('[') else {
            return Ok(Self {
                prefix: text,
                body: None,
                rest: "",
            });
        };

        let Some((body, rest)) = after_open.split_once(']') else {
            return Err(Error::UnbalancedBrackets {
                expression: text.to_string(),
            });
        };

        Ok(Self {
            prefix,
            body: Some(body),
            rest,
        })
    }
}

fn expand_token(text: &str, max_size: NonZero<usize>) -> crate::Result<Vec<String>> {
    if text.is_empty() {
        return Ok(vec![String::new()]);
    }

    let token = Token::parse(text)?;

    let rest_expanded = expand_token(token.rest, max_size)?;

    let own_expanded = match token.body {
        None => vec![token.prefix.to_string()],
        Some(body) => expand_range_list(text, token.prefix, body, max_size)?,
    };

    let product = own_expanded
        .len()
        .checked_mul(rest_expanded.len())
        .filter(|count| *count <= max_size.get());

    let Some(product) = product else {
        return Err(results_too_large(text, max_size));
    };

    let mut results = Vec::with_capacity(product);
    results.extend(
        own_expanded
            .iter()
            .cartesian_product(&rest_expanded)
            .map(|(own, rest)| format!("{own}{rest}")),
    );

    Ok(results)
}

/// Enumerates every range of a bracket group, rejecting the group as soon as the ranges seen
/// so far would exceed `max_size` host names.
fn expand_range_list(
    token: &str,
    prefix: &str,
    range_list: &str,
    max_size: NonZero<usize>,
) -> crate::Result<Vec<String>> {
    let mut results = Vec::new();

    for range in range_list.split(',') {
        let range = parse_range(range)?;

        let fits = range
            .len()
            .and_then(|len| usize::try_from(len).ok())
            .and_then(|len| results.len().checked_add(len))
            .is_some_and(|total| total <= max_size.get());

        // A lone oversized range is reported by `enumerate()` as `RangeTooLarge`.
        if !fits && !results.is_empty() {
            return Err(results_too_large(token, max_size));
        }

        results.extend(range.enumerate(prefix, max_size)?);
    }

    Ok(results)
}

fn results_too_large(token: &str, max_size: NonZero<usize>) -> Error {
    debug!(
        token,
        max_size = max_size.get(),
        "rejecting oversized token expansion"
    );

    Error::ResultsTooLarge {
        token: token.to_string(),
        max_size: max_size.get(),
    }
}
