//! Point-in-time lookups on a timeline.

use crate::timestamp::Timestamp;
use crate::transition::Transition;

/// Returns the transition active at `at`.
///
/// That is the last transition dated strictly before `at`, or at or before
/// `at` when `inclusive` is set. Queries that predate the whole timeline are
/// clamped to the first transition. Returns `None` only for an empty slice.
pub fn find_at<'a, T>(
    timeline: &'a [Transition<T>],
    at: &Timestamp,
    inclusive: bool,
) -> Option<&'a Transition<T>> {
    let active = timeline.partition_point(|t| t.date < *at || (inclusive && t.date == *at));
    match active {
        0 => timeline.first(),
        n => timeline.get(n - 1),
    }
}
