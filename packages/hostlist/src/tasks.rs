use crate::{DEFAULT_MAX_SIZE, Error};

/// Parses the compressed task count list that Slurm publishes in `SLURM_TASKS_PER_NODE`.
///
/// Each comma-separated item is either a task count `N` or a repeated task count `N(xR)`, which
/// stands for `R` consecutive nodes with `N` tasks each. The result holds one task count per
/// node.
///
/// # Errors
///
/// Returns [`Error::BadTaskList`] if an item has any other shape, and
/// [`Error::TaskRepetitionsTooLarge`] if an item repeats more than
/// [`DEFAULT_MAX_SIZE`] times.
///
/// # Example
///
/// ```
/// let tasks = hostlist::parse_slurm_tasks_per_node("2(x3),1").unwrap();
///
/// assert_eq!(tasks, vec![2, 2, 2, 1]);
/// ```
pub fn parse_slurm_tasks_per_node(text: &str) -> crate::Result<Vec<u64>> {
    let mut tasks = Vec::new();

    for part in text.split(',') {
        let (count, repetitions) = parse_part(part)?;

        if repetitions > DEFAULT_MAX_SIZE.get() {
            return Err(Error::TaskRepetitionsTooLarge {
                part: part.to_string(),
                max_size: DEFAULT_MAX_SIZE.get(),
            });
        }

        tasks.extend(std::iter::repeat_n(count, repetitions));
    }

    Ok(tasks)
}

fn parse_part(part: &str) -> crate::Result<(u64, usize)> {
    let bad_part = || Error::BadTaskList {
        part: part.to_string(),
    };

    let (count, repetitions) = match part.split_once('(') {
        None => (part, "1"),
        Some((count, repeat)) => (
            count,
            repeat
                .strip_prefix('x')
                .and_then(|repeat| repeat.strip_suffix(')'))
                .ok_or_else(bad_part)?,
        ),
    };

    if !is_digits(count) || !is_digits(repetitions) {
        return Err(bad_part());
    }

    let count = count.parse::<u64>().map_err(|_overflow| bad_part())?;

    // A repetition count too long for usize is well-formed, just too large.
    let repetitions = repetitions.parse::<usize>().unwrap_or(usize::MAX);

    Ok((count, repetitions))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parse_smoke_test() {
        assert_eq!(parse_slurm_tasks_per_node("1").unwrap(), vec![1]);
        assert_eq!(parse_slurm_tasks_per_node("4,2").unwrap(), vec![4, 2]);
        assert_eq!(
            parse_slurm_tasks_per_node("2(x3),1").unwrap(),
            vec![2, 2, 2, 1]
        );
        assert_eq!(
            parse_slurm_tasks_per_node("1,16(x2)").unwrap(),
            vec![1, 16, 16]
        );
        assert!(parse_slurm_tasks_per_node("3(x0)").unwrap().is_empty());
    }

    #[test]
    fn garbage_is_error() {
        for text in ["", "x", "2(3)", "2(x3", "2x3", "(x3)", "2(x)", "2(xa)", "-1", "1,,2"] {
            assert!(
                matches!(
                    parse_slurm_tasks_per_node(text),
                    Err(Error::BadTaskList { .. })
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn too_many_repetitions() {
        assert!(matches!(
            parse_slurm_tasks_per_node("1(x100001)"),
            Err(Error::TaskRepetitionsTooLarge { .. })
        ));
        assert!(matches!(
            parse_slurm_tasks_per_node("1(x99999999999999999999999)"),
            Err(Error::TaskRepetitionsTooLarge { .. })
        ));
        assert_eq!(
            parse_slurm_tasks_per_node("1(x100000)").unwrap().len(),
            100_000
        );
    }
}
