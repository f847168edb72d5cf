use std::sync::atomic::{AtomicU64, Ordering};

/// Store-wide statistics
///
/// Thread-safe counters for writes and queries.
/// Uses atomic counters for lock-free updates.
#[derive(Debug, Default)]
pub struct Statistics {
    // Write path
    pub num_inserts: AtomicU64,
    pub num_records_written: AtomicU64,
    pub num_cells_written: AtomicU64,
    pub num_rejected_writes: AtomicU64,

    // Projection
    pub num_projections: AtomicU64,
    pub num_empty_projections: AtomicU64,
    pub rows_scanned: AtomicU64,
    pub cells_read: AtomicU64,
    pub cells_skipped: AtomicU64,
    pub projection_time_micros: AtomicU64,

    // Aggregation
    pub num_aggregations: AtomicU64,
    pub num_unavailable_aggregations: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    #[inline]
    pub fn record_insert(&self, records: u64, cells: u64) {
        self.num_inserts.fetch_add(1, Ordering::Relaxed);
        self.num_records_written
            .fetch_add(records, Ordering::Relaxed);
        self.num_cells_written.fetch_add(cells, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejected_write(&self) {
        self.num_rejected_writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_projection(&self, rows: u64, cells_read: u64, cells_skipped: u64, micros: u64) {
        self.num_projections.fetch_add(1, Ordering::Relaxed);
        self.rows_scanned.fetch_add(rows, Ordering::Relaxed);
        self.cells_read.fetch_add(cells_read, Ordering::Relaxed);
        self.cells_skipped
            .fetch_add(cells_skipped, Ordering::Relaxed);
        self.projection_time_micros
            .fetch_add(micros, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_empty_projection(&self) {
        self.num_projections.fetch_add(1, Ordering::Relaxed);
        self.num_empty_projections.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_aggregation(&self, available: bool) {
        self.num_aggregations.fetch_add(1, Ordering::Relaxed);
        if !available {
            self.num_unavailable_aggregations
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    // Getters (snapshot values)
    pub fn num_inserts(&self) -> u64 {
        self.num_inserts.load(Ordering::Relaxed)
    }

    pub fn num_records_written(&self) -> u64 {
        self.num_records_written.load(Ordering::Relaxed)
    }

    pub fn num_rejected_writes(&self) -> u64 {
        self.num_rejected_writes.load(Ordering::Relaxed)
    }

    pub fn num_projections(&self) -> u64 {
        self.num_projections.load(Ordering::Relaxed)
    }

    pub fn cells_read(&self) -> u64 {
        self.cells_read.load(Ordering::Relaxed)
    }

    pub fn cells_skipped(&self) -> u64 {
        self.cells_skipped.load(Ordering::Relaxed)
    }

    pub fn num_aggregations(&self) -> u64 {
        self.num_aggregations.load(Ordering::Relaxed)
    }

    /// Share of cells a column-pruned read did not have to touch
    pub fn cells_skipped_ratio(&self) -> f64 {
        let skipped = self.cells_skipped() as f64;
        let total = skipped + self.cells_read() as f64;
        if total > 0.0 { skipped / total } else { 0.0 }
    }

    pub fn avg_projection_time_us(&self) -> f64 {
        let total_time = self.projection_time_micros.load(Ordering::Relaxed) as f64;
        let runs = self
            .num_projections()
            .saturating_sub(self.num_empty_projections.load(Ordering::Relaxed))
            as f64;
        if runs > 0.0 { total_time / runs } else { 0.0 }
    }

    /// Reset all statistics to zero
    pub fn reset(&self) {
        self.num_inserts.store(0, Ordering::Relaxed);
        self.num_records_written.store(0, Ordering::Relaxed);
        self.num_cells_written.store(0, Ordering::Relaxed);
        self.num_rejected_writes.store(0, Ordering::Relaxed);
        self.num_projections.store(0, Ordering::Relaxed);
        self.num_empty_projections.store(0, Ordering::Relaxed);
        self.rows_scanned.store(0, Ordering::Relaxed);
        self.cells_read.store(0, Ordering::Relaxed);
        self.cells_skipped.store(0, Ordering::Relaxed);
        self.projection_time_micros.store(0, Ordering::Relaxed);
        self.num_aggregations.store(0, Ordering::Relaxed);
        self.num_unavailable_aggregations.store(0, Ordering::Relaxed);
    }

    /// Get a formatted statistics report
    pub fn report(&self) -> String {
        format!(
            "Store Statistics:\n\
            \n\
            Writes:\n\
            - Inserts:       {}\n\
            - Records:       {}\n\
            - Cells:         {}\n\
            - Rejected:      {}\n\
            \n\
            Projections:\n\
            - Runs:          {}\n\
            - Empty:         {}\n\
            - Rows scanned:  {}\n\
            - Cells read:    {}\n\
            - Cells skipped: {}\n\
            - Skip ratio:    {:.2}%\n\
            - Avg time:      {:.2} us\n\
            \n\
            Aggregations:\n\
            - Runs:          {}\n\
            - Unavailable:   {}",
            self.num_inserts(),
            self.num_records_written(),
            self.num_cells_written.load(Ordering::Relaxed),
            self.num_rejected_writes(),
            self.num_projections(),
            self.num_empty_projections.load(Ordering::Relaxed),
            self.rows_scanned.load(Ordering::Relaxed),
            self.cells_read(),
            self.cells_skipped(),
            self.cells_skipped_ratio() * 100.0,
            self.avg_projection_time_us(),
            self.num_aggregations(),
            self.num_unavailable_aggregations.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_basic() {
        let stats = Statistics::new();

        stats.record_insert(3, 6);
        stats.record_insert(2, 3);
        stats.record_rejected_write();

        assert_eq!(stats.num_inserts(), 2);
        assert_eq!(stats.num_records_written(), 5);
        assert_eq!(stats.num_cells_written.load(Ordering::Relaxed), 9);
        assert_eq!(stats.num_rejected_writes(), 1);
    }

    #[test]
    fn test_cells_skipped_ratio() {
        let stats = Statistics::new();
        assert_eq!(stats.cells_skipped_ratio(), 0.0);

        stats.record_projection(2, 1, 3, 10);
        assert_eq!(stats.cells_skipped_ratio(), 0.75);
    }

    #[test]
    fn test_avg_projection_time_ignores_empty_runs() {
        let stats = Statistics::new();

        stats.record_projection(1, 1, 0, 100);
        stats.record_projection(1, 1, 0, 300);
        stats.record_empty_projection();

        assert_eq!(stats.num_projections(), 3);
        assert_eq!(stats.avg_projection_time_us(), 200.0);
    }

    #[test]
    fn test_aggregation_counts() {
        let stats = Statistics::new();

        stats.record_aggregation(true);
        stats.record_aggregation(false);

        assert_eq!(stats.num_aggregations(), 2);
        assert_eq!(stats.num_unavailable_aggregations.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_statistics_reset() {
        let stats = Statistics::new();

        stats.record_insert(1, 1);
        stats.record_projection(1, 1, 1, 1);
        stats.record_aggregation(false);

        stats.reset();

        assert_eq!(stats.num_inserts(), 0);
        assert_eq!(stats.num_projections(), 0);
        assert_eq!(stats.cells_read(), 0);
        assert_eq!(stats.num_aggregations(), 0);
    }

    #[test]
    fn test_statistics_report() {
        let stats = Statistics::new();

        stats.record_insert(3, 7);
        stats.record_projection(4, 4, 4, 8);

        let report = stats.report();
        assert!(report.contains("Inserts:       1"));
        assert!(report.contains("Cells skipped: 4"));
        assert!(report.contains("Skip ratio:    50.00%"));
    }
}
