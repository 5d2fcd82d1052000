use std::fmt;
use std::num::NonZero;

use tracing::debug;

use crate::Error;

/// One numeric range from inside a bracket group, such as `9-11` or `009`.
///
/// A range remembers the digit width of its lower bound so that zero-padded ranges such as
/// `009-011` enumerate as `009`, `010`, `011`. Padding only applies when the lower bound has a
/// leading zero and both bounds are written with the same number of digits: `009-11` is not
/// padded and enumerates as `9`, `10`, `11`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RangeSpec {
    low: u64,
    high: u64,
    width: usize,
    zero_padded: bool,
}

impl RangeSpec {
    pub(crate) const fn new(low: u64, high: u64, width: usize, zero_padded: bool) -> Self {
        debug_assert!(low <= high);

        Self {
            low,
            high,
            width,
            zero_padded,
        }
    }

    /// The first value of the range.
    #[must_use]
    pub const fn low(&self) -> u64 {
        self.low
    }

    /// The last value of the range (inclusive).
    #[must_use]
    pub const fn high(&self) -> u64 {
        self.high
    }

    /// The number of digits in the textual lower bound.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether enumerated values are left-padded with zeros to [`width()`][Self::width] digits.
    #[must_use]
    pub const fn is_zero_padded(&self) -> bool {
        self.zero_padded
    }

    /// The number of values in the range, or `None` if that does not fit in `u64`.
    #[must_use]
    pub const fn len(&self) -> Option<u64> {
        // high >= low is a type invariant, so only the increment can overflow.
        #[expect(
            clippy::arithmetic_side_effects,
            reason = "high >= low is guaranteed by construction"
        )]
        let span = self.high - self.low;

        span.checked_add(1)
    }

    /// Always `false`, a range holds at least one value. Provided for API symmetry with
    /// [`len()`][Self::len].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    const fn render_width(&self) -> usize {
        if self.zero_padded { self.width } else { 0 }
    }

    /// Produces `prefix` followed by every value of the range, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeTooLarge`] without allocating if the range holds more than
    /// `max_size` values.
    pub fn enumerate(
        &self,
        prefix: &str,
        max_size: NonZero<usize>,
    ) -> crate::Result<Vec<String>> {
        let count = self
            .len()
            .and_then(|len| usize::try_from(len).ok())
            .filter(|len| *len <= max_size.get());

        let Some(count) = count else {
            debug!(range = %self, max_size = max_size.get(), "rejecting oversized range");

            return Err(Error::RangeTooLarge {
                range: self.to_string(),
                max_size: max_size.get(),
            });
        };

        let width = self.render_width();

        let mut results = Vec::with_capacity(count);
        results.extend((self.low..=self.high).map(|value| format!("{prefix}{value:0width$}")));

        Ok(results)
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_range(self.low, self.high, self.render_width()))
    }
}

/// Parses one range from inside a bracket group: either `DIGITS` or `DIGITS-DIGITS`.
///
/// # Errors
///
/// Returns [`Error::BadRange`] if the text has any other shape or a bound does not fit in
/// `u64`, and [`Error::StartAfterStop`] if the upper bound is smaller than the lower bound.
///
/// # Example
///
/// ```
/// let range = hostlist::parse_range("009-011").unwrap();
///
/// assert_eq!(range.low(), 9);
/// assert_eq!(range.high(), 11);
/// assert!(range.is_zero_padded());
/// assert_eq!(range.to_string(), "009-011");
/// ```
pub fn parse_range(text: &str) -> crate::Result<RangeSpec> {
    let (low_text, high_text) = text.split_once('-').unwrap_or((text, text));

    let low = parse_bound(low_text, text)?;
    let high = parse_bound(high_text, text)?;

    if high < low {
        return Err(Error::StartAfterStop {
            range: text.to_string(),
        });
    }

    let zero_padded = low_text.starts_with('0') && low_text.len() == high_text.len();

    Ok(RangeSpec::new(low, high, low_text.len(), zero_padded))
}

fn parse_bound(bound: &str, range: &str) -> crate::Result<u64> {
    // `u64::from_str` would also accept a leading `+`, which is not part of the grammar.
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::BadRange {
            range: range.to_string(),
        });
    }

    bound.parse::<u64>().map_err(|_overflow| Error::BadRange {
        range: range.to_string(),
    })
}

/// Formats a range for bracket notation, padding both bounds with zeros to `width` digits.
///
/// A range with `low == high` is rendered as a single number.
///
/// # Example
///
/// ```
/// assert_eq!(hostlist::format_range(9, 11, 2), "09-11");
/// assert_eq!(hostlist::format_range(7, 7, 3), "007");
/// assert_eq!(hostlist::format_range(1, 5, 1), "1-5");
/// ```
#[must_use]
pub fn format_range(low: u64, high: u64, width: usize) -> String {
    if low == high {
        format!("{low:0width$}")
    } else {
        format!("{low:0width$}-{high:0width$}")
    }
}
