// file: src/pipeline/progress.rs
// description: progress bars and run statistics for multi-file generation and uploads
// reference: uses indicatif for progress bars and tracks per-file outcomes

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub files_completed: usize,
    pub files_failed: usize,
    pub total_bytes: u64,
    pub duration_secs: f64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_files(&self) -> usize {
        self.files_completed + self.files_failed
    }

    pub fn files_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.files_completed as f64 / self.duration_secs
    }

    pub fn total_mb(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total_files();
        if total == 0 {
            return 0.0;
        }
        (self.files_completed as f64 / total as f64) * 100.0
    }
}

/// Two-line progress display: a bar over all files and a status line.
pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_completed: Arc<AtomicUsize>,
    files_failed: Arc<AtomicUsize>,
    bytes: Arc<AtomicU64>,
    start_time: Instant,
    verb: &'static str,
}

impl ProgressTracker {
    pub fn new(total_files: usize, verb: &'static str) -> Self {
        Self::with_color(total_files, verb, true)
    }

    pub fn with_color(total_files: usize, verb: &'static str, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_files as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            files_completed: Arc::new(AtomicUsize::new(0)),
            files_failed: Arc::new(AtomicUsize::new(0)),
            bytes: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
            verb,
        }
    }

    /// A tracker that draws nothing, for dry runs and tests.
    pub fn hidden(total_files: usize, verb: &'static str) -> Self {
        let tracker = Self::with_color(total_files, verb, false);
        tracker
            .main_bar
            .set_draw_target(indicatif::ProgressDrawTarget::hidden());
        tracker
            .detail_bar
            .set_draw_target(indicatif::ProgressDrawTarget::hidden());
        tracker
    }

    pub fn start_file(&self, name: &str) {
        self.main_bar.set_message(format!("{} {}", self.verb, name));
    }

    pub fn file_completed(&self, bytes: u64) {
        self.files_completed.fetch_add(1, Ordering::SeqCst);
        self.bytes.fetch_add(bytes, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn file_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    /// Print a line above the bars without tearing them.
    pub fn println(&self, line: impl AsRef<str>) {
        if self.main_bar.is_hidden() {
            println!("{}", line.as_ref());
        } else {
            self.main_bar.println(line.as_ref());
        }
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("done");
        self.detail_bar.finish_and_clear();
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            files_completed: self.files_completed.load(Ordering::SeqCst),
            files_failed: self.files_failed.load(Ordering::SeqCst),
            total_bytes: self.bytes.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }

    fn update_detail_bar(&self) {
        let completed = self.files_completed.load(Ordering::SeqCst);
        let failed = self.files_failed.load(Ordering::SeqCst);
        let mb = self.bytes.load(Ordering::SeqCst) as f64 / (1024.0 * 1024.0);

        self.detail_bar.set_message(format!(
            "Succeeded: {} | Failed: {} | {:.2} MB",
            completed, failed, mb
        ));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let (template, chars) = if colored {
        (
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            "█▓▒░",
        )
    } else {
        ("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}", "=>-")
    };
    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(chars);
    bar.set_style(style);
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_calculations() {
        let stats = RunStats {
            files_completed: 18,
            files_failed: 2,
            total_bytes: 3 * 1024 * 1024,
            duration_secs: 2.0,
        };

        assert_eq!(stats.total_files(), 20);
        assert_eq!(stats.files_per_second(), 9.0);
        assert_eq!(stats.total_mb(), 3.0);
        assert_eq!(stats.success_rate(), 90.0);
    }

    #[test]
    fn test_run_stats_empty() {
        let stats = RunStats::new();
        assert_eq!(stats.files_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_tracker_counts_outcomes() {
        let tracker = ProgressTracker::hidden(3, "Uploading");

        tracker.start_file("invoice_en_001.pdf");
        tracker.file_completed(2048);
        tracker.file_failed();
        tracker.file_completed(1024);

        let stats = tracker.stats();
        assert_eq!(stats.files_completed, 2);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.total_bytes, 3072);
    }
}
