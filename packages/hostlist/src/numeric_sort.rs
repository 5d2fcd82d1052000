use std::cmp::Ordering;

/// Numeric-aware ordering key for a host name, see [`sort_key()`].
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct SortKey<'a> {
    parts: Vec<SortKeyPart<'a>>,
}

/// One maximal run of digits or of non-digits within a host name.
///
/// Digit runs order before text runs at the same position.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum SortKeyPart<'a> {
    Number(Digits<'a>),
    Text(&'a str),
}

/// A run of ASCII digits compared by numeric value, with no upper bound on length.
#[derive(Clone, Copy, Debug)]
struct Digits<'a>(&'a str);

impl Digits<'_> {
    fn significant(&self) -> &str {
        self.0.trim_start_matches('0')
    }
}

impl Ord for Digits<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());

        // Without leading zeros, a longer run is a larger number.
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl PartialOrd for Digits<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Digits<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Digits<'_> {}

/// Splits a host name into alternating runs of digits and non-digits that order numerically.
///
/// Digit runs compare as integers and text runs compare as raw strings, element by element. A key
/// that runs out of elements first orders first. This gives `n1 < n2 < n10` rather than the
/// lexicographic `n1 < n10 < n2`.
///
/// # Example
///
/// ```
/// use hostlist::sort_key;
///
/// assert!(sort_key("n2") < sort_key("n10"));
/// assert!(sort_key("rack1-n10") < sort_key("rack2-n1"));
/// ```
#[must_use]
pub fn sort_key(host: &str) -> SortKey<'_> {
    let mut parts = Vec::new();
    let mut rest = host;

    while let Some(first) = rest.chars().next() {
        let is_digit = first.is_ascii_digit();
        let run_end = rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(rest.len());
        let (run, remainder) = rest.split_at(run_end);

        parts.push(if is_digit {
            SortKeyPart::Number(Digits(run))
        } else {
            SortKeyPart::Text(run)
        });

        rest = remainder;
    }

    SortKey { parts }
}

/// Returns the host names ordered by [`sort_key()`].
///
/// The sort is stable, so names with equal keys (such as `n7` and `n007`) keep their relative
/// order.
///
/// # Example
///
/// ```
/// let sorted = hostlist::numerically_sorted(["n1", "n10", "n9"]);
///
/// assert_eq!(sorted, vec!["n1", "n9", "n10"]);
/// ```
#[must_use]
pub fn numerically_sorted<I, S>(hosts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let hosts: Vec<S> = hosts.into_iter().collect();

    let mut keyed: Vec<(SortKey<'_>, &str)> = hosts
        .iter()
        .map(|host| (sort_key(host.as_ref()), host.as_ref()))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

    keyed
        .into_iter()
        .map(|(_, host)| host.to_string())
        .collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn numeric_order() {
        assert_eq!(
            numerically_sorted(["n1", "n10", "n9"]),
            vec!["n1", "n9", "n10"]
        );
    }

    #[test]
    fn multiple_runs() {
        assert_eq!(
            numerically_sorted(["r2n1", "r10n1", "r1n10", "r1n2"]),
            vec!["r1n2", "r1n10", "r2n1", "r10n1"]
        );
    }

    #[test]
    fn shorter_key_first() {
        assert!(sort_key("n") < sort_key("n1"));
        assert!(sort_key("n1") < sort_key("n1a"));
        assert!(sort_key("") < sort_key("a"));
    }

    #[test]
    fn numbers_before_text() {
        assert!(sort_key("1") < sort_key("a"));
        assert_eq!(numerically_sorted(["a", "5", "b1"]), vec!["5", "a", "b1"]);
    }

    #[test]
    fn leading_zeros_compare_equal_and_keep_order() {
        assert_eq!(sort_key("n007"), sort_key("n7"));
        assert_eq!(numerically_sorted(["n007", "n7"]), vec!["n007", "n7"]);
        assert_eq!(numerically_sorted(["n7", "n007"]), vec!["n7", "n007"]);
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        let big = "n123456789012345678901234567890";
        let bigger = "n923456789012345678901234567890";
        assert!(sort_key(big) < sort_key(bigger));
        assert!(sort_key("n99") < sort_key(big));
    }

    #[test]
    fn accepts_owned_and_borrowed_input() {
        let owned = vec!["x10".to_string(), "x9".to_string()];
        assert_eq!(numerically_sorted(&owned), vec!["x9", "x10"]);
        assert_eq!(numerically_sorted(owned), vec!["x9", "x10"]);
    }
}
