//! Rank-weighted split of the 100-point daily budget.
//!
//! Every structural change to a task list (insert, delete, reorder) reruns
//! [`allocate`] for the whole list. The list is capped at
//! [`MAX_TASKS_PER_LIST`](crate::task_rules::MAX_TASKS_PER_LIST) entries, so
//! there is no incremental variant.

/// Total budget distributed across one list.
pub const TOTAL_BUDGET: f64 = 100.0;

/// Fraction of the baseline share used as the spread between the first and
/// the last rank.
pub const SPREAD_FACTOR: f64 = 0.8;

/// Budget expressed in hundredths, the unit percentages are rounded to.
const TOTAL_CENTS: i64 = 10_000;

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the percentage for each rank of a list holding `task_count` tasks.
///
/// Index 0 is the highest-priority task. The result:
/// - is empty for `0`, `[100.0]` for `1`;
/// - decreases strictly from the first rank to the last for `>= 2`;
/// - sums to exactly 100 at two-decimal precision.
///
/// Each rank starts from `base + decrement * (n - 1 - i)` where
/// `base = 100 / n` and `decrement = base * 0.8 / (n - 1)`. The rounded values
/// are shifted uniformly by `(100 - sum) / n` and rounded again. Whatever
/// drift survives the second rounding (at most a few hundredths) is folded
/// into the first rank, whose lead over the second is always larger than the
/// correction.
pub fn allocate(task_count: usize) -> Vec<f64> {
    match task_count {
        0 => return Vec::new(),
        1 => return vec![TOTAL_BUDGET],
        _ => {}
    }

    let n = task_count as f64;
    let base = TOTAL_BUDGET / n;
    let decrement = (base * SPREAD_FACTOR) / (n - 1.0);

    let first_pass: Vec<f64> = (0..task_count)
        .map(|i| round2(base + decrement * (task_count - 1 - i) as f64))
        .collect();

    let sum: f64 = first_pass.iter().sum();
    let adjustment = (TOTAL_BUDGET - sum) / n;

    let mut cents: Vec<i64> = first_pass
        .iter()
        .map(|p| ((p + adjustment) * 100.0).round() as i64)
        .collect();

    let drift = TOTAL_CENTS - cents.iter().sum::<i64>();
    if drift != 0 {
        cents[0] += drift;
    }

    cents.into_iter().map(|c| c as f64 / 100.0).collect()
}

/// Pair each item, already sorted by position, with its allocated percentage.
pub fn assign<T>(ordered: impl IntoIterator<Item = T>) -> Vec<(T, f64)>
where
    T: Copy,
{
    let items: Vec<T> = ordered.into_iter().collect();
    let shares = allocate(items.len());
    items.into_iter().zip(shares).collect()
}
