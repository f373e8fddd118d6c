//! Deterministic ordering and pruning of canonical tables.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::Result;
use crate::input::{ReportTable, Value};
use crate::reporter::ChannelReporter;
use crate::schema::ChannelVocabulary;
use crate::taxonomy::Column;
use crate::taxonomy::order::try_sort_by;

impl<V: ChannelVocabulary> ChannelReporter<V> {
    /// Canonical column order of finalized reports: every column the channel
    /// offers and declares, in descending taxonomy order.
    pub fn finalized_columns(&self) -> Result<Vec<Column>> {
        let mut columns = self.filtered_map(None, None).columns();
        try_sort_by(&mut columns, |a, b| a.try_cmp(*b))?;
        columns.reverse();
        Ok(columns)
    }

    /// Order and prune a canonical table.
    ///
    /// Columns outside [`finalized_columns`](Self::finalized_columns) are
    /// dropped. See [`finalize_report`] for pruning and row order.
    pub fn finalize(&self, report: &ReportTable) -> Result<ReportTable> {
        let order: Vec<String> = self
            .finalized_columns()?
            .into_iter()
            .map(Column::name)
            .collect();
        let finalized = finalize_report(report, &order)?;
        debug!(
            rows = finalized.row_count(),
            columns = finalized.column_count(),
            "finalized report"
        );
        Ok(finalized)
    }
}

/// Select `order` columns, prune empty data and sort rows.
///
/// Columns empty in every row are dropped, then rows empty in every remaining
/// column. Rows are stably sorted ascending by the remaining columns compared
/// left to right. Empty cells are rendered as nulls.
pub fn finalize_report(report: &ReportTable, order: &[String]) -> Result<ReportTable> {
    let kept: Vec<(&str, &[Value])> = order
        .iter()
        .filter_map(|name| report.column(name).map(|values| (name.as_str(), values)))
        .filter(|(_, values)| !values.iter().all(Value::is_empty))
        .collect();

    if kept.is_empty() {
        return Ok(ReportTable::new());
    }

    let mut rows: Vec<usize> = (0..report.row_count())
        .filter(|&row| kept.iter().any(|(_, values)| !values[row].is_empty()))
        .collect();
    rows.sort_by(|&a, &b| {
        kept.iter()
            .map(|(_, values)| values[a].cmp(&values[b]))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    ReportTable::from_columns(kept.iter().map(|&(name, values)| {
        let column = rows
            .iter()
            .map(|&row| match &values[row] {
                v if v.is_empty() => Value::Null,
                v => v.clone(),
            })
            .collect::<Vec<_>>();
        (name, column)
    }))
}
