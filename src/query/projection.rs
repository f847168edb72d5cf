use std::time::{Duration, Instant};

use indexmap::IndexSet;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{
    store::ColumnFamilyStore,
    types::{Fields, Record},
    util::Result,
};

/// One row of a projection: the key and the requested columns it has
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRow {
    pub key: String,
    pub fields: Fields,
}

/// Cost accounting for one projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionMetrics {
    /// Time spent filtering rows, excluding lock and setup
    pub elapsed: Duration,
    /// Columns of the family that a column store would not read at all
    pub ignored_column_count: usize,
    pub rows_scanned: usize,
    /// Cells copied into the result
    pub cells_read: usize,
    /// Cells present in the scanned rows but left out
    pub cells_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// Union of the family's columns, first-seen order
    pub available_columns: Vec<String>,
    /// Requested columns with duplicates removed, request order
    pub requested_columns: Vec<String>,
    pub rows: Vec<ProjectedRow>,
    pub metrics: ProjectionMetrics,
}

/// Outcome of [`ProjectionQuery::run`].
///
/// `Empty` means the family has no rows. It is a normal outcome, not an
/// error, and carries no metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProjectionResult {
    Empty,
    Rows(Projection),
}

impl ProjectionResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, ProjectionResult::Empty)
    }

    pub fn rows(&self) -> &[ProjectedRow] {
        match self {
            ProjectionResult::Empty => &[],
            ProjectionResult::Rows(p) => &p.rows,
        }
    }

    pub fn metrics(&self) -> Option<&ProjectionMetrics> {
        match self {
            ProjectionResult::Empty => None,
            ProjectionResult::Rows(p) => Some(&p.metrics),
        }
    }

    pub fn into_projection(self) -> Option<Projection> {
        match self {
            ProjectionResult::Empty => None,
            ProjectionResult::Rows(p) => Some(p),
        }
    }
}

/// Column-pruned read of one family.
///
/// Returns only the requested columns of every row and reports how much a
/// column-oriented layout would have saved.
pub struct ProjectionQuery<'a> {
    store: &'a ColumnFamilyStore,
}

impl<'a> ProjectionQuery<'a> {
    pub fn new(store: &'a ColumnFamilyStore) -> Self {
        ProjectionQuery { store }
    }

    /// Project `requested` columns out of every row of `family`.
    ///
    /// Rows keep only the requested columns they actually have; nothing is
    /// null-filled. An empty request is valid and yields rows with no fields.
    pub fn run<S: AsRef<str>>(&self, family: &str, requested: &[S]) -> Result<ProjectionResult> {
        let cf = self.store.family(family)?;
        let statistics = self.store.options().collect_statistics.then(|| self.store.statistics());

        if cf.is_empty() {
            if let Some(stats) = statistics {
                stats.record_empty_projection();
            }
            debug!(family, "projection over empty family");
            return Ok(ProjectionResult::Empty);
        }

        let available_columns = cf.columns();
        let requested_columns: Vec<String> = requested
            .iter()
            .map(|c| c.as_ref())
            .collect::<IndexSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let entries: Vec<(&str, &Record)> = cf.all_records().collect();
        let parallel = entries.len() >= self.store.options().parallel_scan_threshold;

        let start = Instant::now();
        let rows: Vec<ProjectedRow> = if parallel {
            entries
                .par_iter()
                .map(|(key, record)| project_row(key, record, &requested_columns))
                .collect()
        } else {
            entries
                .iter()
                .map(|(key, record)| project_row(key, record, &requested_columns))
                .collect()
        };
        let elapsed = start.elapsed();

        let selected = requested_columns
            .iter()
            .filter(|c| available_columns.contains(c))
            .count();
        let ignored_column_count = available_columns.len() - selected;

        let cells_total: usize = entries.iter().map(|(_, r)| r.len()).sum();
        let cells_read: usize = rows.iter().map(|r| r.fields.len()).sum();
        let metrics = ProjectionMetrics {
            elapsed,
            ignored_column_count,
            rows_scanned: entries.len(),
            cells_read,
            cells_skipped: cells_total - cells_read,
        };
        drop(entries);
        drop(cf);

        if let Some(stats) = statistics {
            stats.record_projection(
                metrics.rows_scanned as u64,
                metrics.cells_read as u64,
                metrics.cells_skipped as u64,
                metrics.elapsed.as_micros() as u64,
            );
        }
        debug!(
            family,
            rows = metrics.rows_scanned,
            ignored = metrics.ignored_column_count,
            parallel,
            elapsed_us = metrics.elapsed.as_micros() as u64,
            "projection finished"
        );

        Ok(ProjectionResult::Rows(Projection {
            available_columns,
            requested_columns,
            rows,
            metrics,
        }))
    }
}

fn project_row(key: &str, record: &Record, columns: &[String]) -> ProjectedRow {
    ProjectedRow {
        key: key.to_string(),
        fields: record.project(columns),
    }
}
