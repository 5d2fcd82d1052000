#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Utilities for expanding and collecting the bracketed `hostlist` notation that cluster tooling
//! uses to address large numbers of machines compactly.
//!
//! Example hostlist string: `node[1-2,17],login01`
//!
//! # Format
//!
//! The value is a comma-separated list of zero or more tokens. Each token is a host name fragment
//! that may contain any number of bracket groups, and every bracket group holds a
//! comma-separated list of ranges, where each range is either:
//!
//! * a single integer (e.g. `7` or `007`)
//! * an inclusive range of integers (e.g. `9-11`)
//!
//! Multiple bracket groups in one token expand as a cross product: `n[1-2][4-5]` stands for
//! `n14,n15,n24,n25`. Brackets may not nest.
//!
//! A range whose lower bound has a leading zero and is written with as many digits as the upper
//! bound is zero-padded: `n[09-11]` stands for `n09,n10,n11`.
//!
//! # Example
//!
//! Conversion in both directions:
//!
//! ```
//! let hosts = hostlist::expand("node[1-2,17]").unwrap();
//! assert_eq!(hosts, vec!["node1", "node2", "node17"]);
//!
//! let collected = hostlist::collect(&hosts).unwrap();
//! assert_eq!(collected, "node[1-2,17]");
//! ```
//!
//! Set operations on expressions:
//!
//! ```
//! assert_eq!(hostlist::intersect("n[1-10]", "n[8-12]").unwrap(), "n[8-10]");
//! ```
//!
//! # Limits
//!
//! Expansion refuses to produce more than [`DEFAULT_MAX_SIZE`] host names from a single range or a
//! single token, so input such as `n[1-999999999]` fails quickly with an error instead of
//! exhausting memory. The limit can be changed through [`ExpandOptions::max_size()`].

mod bracket_range;
mod collection;
mod config;
mod error;
mod expansion;
mod numeric_sort;
mod set_ops;
mod tasks;

pub use bracket_range::*;
pub use collection::*;
pub use config::*;
pub use error::*;
pub use expansion::*;
pub use numeric_sort::*;
pub use set_ops::*;
pub use tasks::*;
