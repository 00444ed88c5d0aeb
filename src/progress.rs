//! Progress reporting for long-running scans
//!
//! Listing a large bucket can take minutes, so the lister and reporter emit
//! incremental counts through [`ProgressObserver`]. Observers are strictly
//! informational: they never influence control flow or results.

use std::io::Write;

/// Observer for incremental progress during listing and reporting
///
/// All methods default to no-ops, so implementations override only the
/// stages they care about.
pub trait ProgressObserver {
    /// Called after each listing page with the cumulative key count
    fn objects_fetched(&self, _total: usize) {}

    /// Called while grouping keys by filename
    fn keys_grouped(&self, _done: usize, _total: usize) {}

    /// Called while writing report rows
    fn rows_written(&self, _done: usize, _total: usize) {}
}

/// Observer that discards all progress events
///
/// Useful for tests and for `--quiet` runs.
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Observer that prints counters to stderr
///
/// Counts go to stderr so the report path printed on stdout stays clean for
/// shell pipelines. Grouping and writing ticks are throttled to avoid
/// flooding the terminal on large buckets.
pub struct ConsoleProgress;

impl ConsoleProgress {
    const TICK_EVERY: usize = 1000;

    fn line(message: &str) {
        eprint!("\r{message}");
        let _ = std::io::stderr().flush();
    }

    fn finish(message: &str) {
        eprintln!("\r{message}");
    }
}

impl ProgressObserver for ConsoleProgress {
    fn objects_fetched(&self, total: usize) {
        Self::line(&format!("📥 Fetching objects... {total}"));
    }

    fn keys_grouped(&self, done: usize, total: usize) {
        if done == total {
            Self::finish(&format!("🗂️  Grouped {total} keys by filename"));
        } else if done % Self::TICK_EVERY == 0 {
            Self::line(&format!("🗂️  Grouping filenames... {done}/{total}"));
        }
    }

    fn rows_written(&self, done: usize, total: usize) {
        if done == total {
            Self::finish(&format!("📝 Wrote {total} report rows"));
        } else if done % Self::TICK_EVERY == 0 {
            Self::line(&format!("📝 Writing rows... {done}/{total}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_methods_are_noops() {
        // NoProgress must accept every event without side effects.
        NoProgress.objects_fetched(10);
        NoProgress.keys_grouped(5, 10);
        NoProgress.rows_written(10, 10);
    }
}
