use std::collections::BTreeMap;

use foldhash::{HashSet, HashSetExt};
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{CollectOptions, Error, RangeSpec};

/// Collects host names into the compact [hostlist][crate] notation, using the default
/// [`CollectOptions`].
///
/// Surrounding whitespace is removed from every host name and blank names are skipped.
/// Duplicates collapse into one entry. The output is ordered by the non-numeric parts of the
/// host names, not by input order, and re-collecting the expansion of the output yields the same
/// string.
///
/// # Errors
///
/// Returns [`Error::ForbiddenCharacter`] if a host name contains `,`, `[` or `]`.
///
/// # Example
///
/// ```
/// let collected = hostlist::collect(["x1y4", "x1y5", "x2y4", "x2y5"]).unwrap();
///
/// assert_eq!(collected, "x[1-2]y[4-5]");
/// ```
pub fn collect<I, S>(hosts: I) -> crate::Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    collect_with(hosts, &CollectOptions::new())
}

/// Collects host names into the compact [hostlist][crate] notation.
///
/// See [`collect()`] for the default behavior; `options` controls whether host names with
/// forbidden characters fail the collection or are dropped.
///
/// # Errors
///
/// Returns [`Error::ForbiddenCharacter`] if a host name contains `,`, `[` or `]`, unless
/// [`CollectOptions::silently_discard_bad()`] is set.
pub fn collect_with<I, S>(hosts: I, options: &CollectOptions) -> crate::Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pairs = Vec::new();

    for host in hosts {
        let host = host.as_ref().trim();

        if host.is_empty() {
            continue;
        }

        if host.contains([',', '[', ']']) {
            if options.discards_bad() {
                trace!(host, "discarding host name with forbidden character");
                continue;
            }

            return Err(Error::ForbiddenCharacter {
                host: host.to_string(),
            });
        }

        pairs.push(Pair {
            left: host.to_string(),
            right: String::new(),
        });
    }

    let mut pass = 0_usize;

    loop {
        pass = pass.saturating_add(1);

        let (next, needs_another_pass) = collect_pass(pairs);
        trace!(pass, pairs = next.len(), "finished collection pass");

        pairs = next;

        if !needs_another_pass {
            break;
        }
    }

    let collected = pairs.iter().map(Pair::joined).join(",");
    debug!(passes = pass, hostlist = %collected, "collected hostlist");

    Ok(collected)
}

/// A partially collected host name.
///
/// `right` is finalized text, possibly containing bracket groups. `left` still has to be scanned
/// for digit runs.
#[derive(Debug)]
struct Pair {
    left: String,
    right: String,
}

impl Pair {
    fn joined(&self) -> String {
        format!("{}{}", self.left, self.right)
    }
}

/// The non-numeric text around the rightmost digit run of a host name.
///
/// A missing suffix marks a host name that has no digits left to group on. Such names order
/// before every grouped name with the same prefix.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
struct GroupKey {
    prefix: String,
    suffix: Option<String>,
}

/// The rightmost digit run of a host name.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct Number {
    value: u64,
    width: usize,
}

/// Splits `left` into the text before its rightmost digit run, that run, and the text after it.
fn split_rightmost_number(left: &str) -> Option<(&str, &str, &str)> {
    let digits_end = left.rfind(|c: char| c.is_ascii_digit())?;

    // The digit is ASCII, so the byte after it is a char boundary.
    let (head, tail) = left.split_at(digits_end.checked_add(1)?);

    let digits_start = head
        .rfind(|c: char| !c.is_ascii_digit())
        .and_then(|index| index.checked_add(1))
        .unwrap_or(0);

    let (prefix, digits) = head.split_at(digits_start);

    Some((prefix, digits, tail))
}

fn format_padded(prefix: &str, value: u64, width: usize, suffix: &str) -> String {
    format!("{prefix}{value:0width$}{suffix}")
}

fn digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |log| {
        // ilog10 of a u64 is at most 19.
        usize::try_from(log).map_or(usize::MAX, |log| log.saturating_add(1))
    })
}

/// Performs one grouping pass over all pairs, extracting the rightmost digit run of each left
/// side and merging consecutive numbers that share a prefix and suffix.
///
/// Returns the new pairs and whether any left side may still contain digits.
fn collect_pass(pairs: Vec<Pair>) -> (Vec<Pair>, bool) {
    let mut remaining: HashSet<String> = HashSet::with_capacity(pairs.len());
    let mut groups: BTreeMap<GroupKey, Vec<Number>> = BTreeMap::new();

    for pair in &pairs {
        let host = pair.joined();

        let number = split_rightmost_number(&pair.left).and_then(|(prefix, digits, tail)| {
            // Digit runs too long for u64 stay verbatim in the output.
            let value = digits.parse::<u64>().ok()?;
            Some((prefix, digits.len(), value, tail))
        });

        match number {
            Some((prefix, width, value, tail)) => {
                let key = GroupKey {
                    prefix: prefix.to_string(),
                    suffix: Some(format!("{tail}{}", pair.right)),
                };

                groups.entry(key).or_default().push(Number { value, width });
            }
            None => {
                let key = GroupKey {
                    prefix: host.clone(),
                    suffix: None,
                };

                groups.entry(key).or_default();
            }
        }

        remaining.insert(host);
    }

    let mut results = Vec::with_capacity(groups.len());
    let mut needs_another_pass = false;

    for (key, mut numbers) in groups {
        let Some(suffix) = key.suffix else {
            remaining.remove(&key.prefix);

            results.push(Pair {
                left: String::new(),
                right: key.prefix,
            });
            continue;
        };

        numbers.sort_unstable();

        let ranges = merge_runs(&key.prefix, &suffix, &numbers, &mut remaining);

        results.push(render_group(key.prefix, &ranges, &suffix));
        needs_another_pass = true;
    }

    debug_assert!(remaining.is_empty(), "every host must be consumed by a group");

    (results, needs_another_pass)
}

/// Greedily merges the sorted numbers of one group into ranges.
///
/// A run continues only while the next value, padded to the width of the run's first member,
/// names a host that is still present. Hosts are removed from `remaining` as they are consumed.
fn merge_runs(
    prefix: &str,
    suffix: &str,
    numbers: &[Number],
    remaining: &mut HashSet<String>,
) -> Vec<RangeSpec> {
    let mut ranges = Vec::new();

    for number in numbers {
        if !remaining.contains(&format_padded(prefix, number.value, number.width, suffix)) {
            // Already consumed as part of an earlier run, or a duplicate.
            continue;
        }

        let zero_padded = digit_count(number.value) < number.width;

        let mut high = number.value;
        let mut next = Some(number.value);

        while let Some(value) = next {
            // Padded runs stop before outgrowing their width, so they expand back identically.
            if zero_padded && digit_count(value) > number.width {
                break;
            }

            if !remaining.remove(&format_padded(prefix, value, number.width, suffix)) {
                break;
            }

            high = value;
            next = value.checked_add(1);
        }

        ranges.push(RangeSpec::new(number.value, high, number.width, zero_padded));
    }

    ranges
}

fn render_group(prefix: String, ranges: &[RangeSpec], suffix: &str) -> Pair {
    let right = match ranges {
        [single] if single.low() == single.high() => {
            format_padded("", single.low(), single.width(), suffix)
        }
        _ => {
            let body = ranges
                .iter()
                .map(|range| crate::format_range(range.low(), range.high(), range.width()))
                .join(",");

            format!("[{body}]{suffix}")
        }
    };

    Pair {
        left: prefix,
        right,
    }
}
