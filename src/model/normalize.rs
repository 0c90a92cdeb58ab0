use crate::diagnostics;
use crate::results::{Dataset, Observation};

/// Shift window ids so that every (query_baseline, process count) series starts at 0.
///
/// Every pair of the cross-product of distinct labels and process counts is
/// visited; pairs that were never run are reported and skipped. Returns the
/// number of series that were shifted. A series whose id span does not fit
/// in an `i64` is left as is.
pub fn normalize_windows(ds: &mut Dataset) -> usize {
    let baselines = ds.baselines();
    let processes = ds.parallelisms();
    let mut normalized = 0;

    for qb in &baselines {
        for &nproc in &processes {
            let in_series = |o: &Observation| o.query_baseline == *qb && o.parallelism == nproc;

            let ids = ds.iter().filter(|o| in_series(*o)).map(|o| o.window_id);
            let Some((min, max)) = ids.fold(None, |acc, w| match acc {
                None => Some((w, w)),
                Some((lo, hi)) => Some((w.min(lo), w.max(hi))),
            }) else {
                diagnostics::warn(format!(
                    "unable to find series {} with {} processes",
                    qb, nproc
                ));
                continue;
            };

            // Every shifted id lies in 0..=max-min.
            if max.checked_sub(min).is_none() {
                diagnostics::warn(format!(
                    "window ids of series {} with {} processes span more than i64, not shifted",
                    qb, nproc
                ));
                continue;
            }

            for row in ds.rows.iter_mut() {
                if in_series(&*row) {
                    row.window_id -= min;
                }
            }
            normalized += 1;
        }
    }

    normalized
}
