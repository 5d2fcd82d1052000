use std::num::NonZero;

/// Default limit on the number of values a single range may enumerate and on the number of host
/// names a single token may expand into.
///
/// This bounds memory use against input such as `n[1-999999999]`.
pub const DEFAULT_MAX_SIZE: NonZero<usize> =
    NonZero::new(100_000).expect("the default limit is a non-zero literal");

/// Controls how [`expand_with()`][crate::expand_with] turns a hostlist into host names.
///
/// The default configuration removes duplicates, keeps the textual order of the expression and
/// applies [`DEFAULT_MAX_SIZE`].
///
/// # Example
///
/// ```
/// use hostlist::ExpandOptions;
///
/// let options = ExpandOptions::new().allow_duplicates(true).sort(true);
/// let hosts = hostlist::expand_with("n10,n9,n10", &options).unwrap();
///
/// assert_eq!(hosts, vec!["n9", "n10", "n10"]);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExpandOptions {
    allow_duplicates: bool,
    sort: bool,
    max_size: NonZero<usize>,
}

impl ExpandOptions {
    /// Creates the default expansion options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_duplicates: false,
            sort: false,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Keeps repeated host names instead of removing all but the first occurrence.
    #[must_use]
    pub const fn allow_duplicates(mut self, value: bool) -> Self {
        self.allow_duplicates = value;
        self
    }

    /// Orders the result with the numeric-aware [`sort_key()`][crate::sort_key] instead of
    /// keeping the textual order of the expression.
    #[must_use]
    pub const fn sort(mut self, value: bool) -> Self {
        self.sort = value;
        self
    }

    /// Overrides the limit applied to every range enumeration and bracket cross product.
    #[must_use]
    pub const fn max_size(mut self, value: NonZero<usize>) -> Self {
        self.max_size = value;
        self
    }

    /// Whether repeated host names are kept.
    #[must_use]
    pub const fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Whether the result is numerically sorted.
    #[must_use]
    pub const fn sorts(&self) -> bool {
        self.sort
    }

    /// The limit applied to every range enumeration and bracket cross product.
    #[must_use]
    pub const fn size_limit(&self) -> NonZero<usize> {
        self.max_size
    }
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Controls how [`collect_with()`][crate::collect_with] treats its input.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CollectOptions {
    silently_discard_bad: bool,
}

impl CollectOptions {
    /// Creates the default collection options, which reject host names with forbidden
    /// characters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            silently_discard_bad: false,
        }
    }

    /// Drops host names containing `,`, `[` or `]` instead of failing the whole collection.
    #[must_use]
    pub const fn silently_discard_bad(mut self, value: bool) -> Self {
        self.silently_discard_bad = value;
        self
    }

    /// Whether host names with forbidden characters are dropped.
    #[must_use]
    pub const fn discards_bad(&self) -> bool {
        self.silently_discard_bad
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(ExpandOptions: Send, Sync, Copy);
    assert_impl_all!(CollectOptions: Send, Sync, Copy);

    #[test]
    fn defaults() {
        let options = ExpandOptions::default();
        assert!(!options.allows_duplicates());
        assert!(!options.sorts());
        assert_eq!(options.size_limit().get(), 100_000);

        assert!(!CollectOptions::default().discards_bad());
    }

    #[test]
    fn builder_overrides() {
        let options = ExpandOptions::new()
            .allow_duplicates(true)
            .sort(true)
            .max_size(NonZero::new(5).unwrap());

        assert!(options.allows_duplicates());
        assert!(options.sorts());
        assert_eq!(options.size_limit().get(), 5);

        assert!(CollectOptions::new().silently_discard_bad(true).discards_bad());
    }
}
