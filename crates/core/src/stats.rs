//! Hit/miss statistics.
//!
//! The cache only counts; rates are derived here, by the caller side, with the
//! zero-access case made explicit through `Option`.

use serde::Serialize;

/// Snapshot of a cache's hit and miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their tag.
    pub hits: u64,
    /// Accesses that had to place their tag.
    pub misses: u64,
}

impl CacheStats {
    /// Creates a snapshot from raw counts.
    pub const fn new(hits: u64, misses: u64) -> Self {
        Self { hits, misses }
    }

    /// Total accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or `None` before the first access.
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.accesses();
        (total > 0).then(|| self.hits as f64 / total as f64)
    }

    /// Fraction of accesses that missed, or `None` before the first access.
    pub fn miss_rate(&self) -> Option<f64> {
        let total = self.accesses();
        (total > 0).then(|| self.misses as f64 / total as f64)
    }

    /// Hit rate as a percentage.
    pub fn hit_percent(&self) -> Option<f64> {
        self.hit_rate().map(|r| r * 100.0)
    }

    /// Miss rate as a percentage.
    pub fn miss_percent(&self) -> Option<f64> {
        self.miss_rate().map(|r| r * 100.0)
    }

    /// Formats the statistics block printed after a run.
    ///
    /// # Arguments
    ///
    /// * `label` - Name of the run, typically the trace path.
    pub fn render(&self, label: &str) -> String {
        let pct = |p: Option<f64>| p.map_or_else(|| "n/a".to_string(), |p| format!("{p:.6}%"));
        let rule = "=".repeat(58);
        let thin = "-".repeat(58);
        format!(
            "{rule}\n{label}\n{thin}\n\
             accesses                 {}\n\
             hits                     {}\n\
             misses                   {}\n\
             hit_rate                 {}\n\
             miss_rate                {}\n\
             {rule}",
            self.accesses(),
            self.hits,
            self.misses,
            pct(self.hit_percent()),
            pct(self.miss_percent()),
        )
    }

    /// Prints the statistics block to stdout.
    pub fn print(&self, label: &str) {
        println!("{}", self.render(label));
    }
}
