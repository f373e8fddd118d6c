//! Propagate coarser-granularity identifiers into canonical tables.

use tracing::{debug, warn};

use crate::error::{ChannelError, Result};
use crate::input::{ReportTable, Value};
use crate::reporter::ChannelReporter;
use crate::schema::ChannelVocabulary;
use crate::taxonomy::{Column, Granularity, TimeGranularity};

impl<V: ChannelVocabulary> ChannelReporter<V> {
    /// Fill `<ancestor>.<identifier>` columns for every requested granularity.
    ///
    /// For each ancestor, values come from truncating finer timestamps to
    /// their date (time granularities, `daily` ancestor only) or from the
    /// channel's native ancestor identifier column in `source`. Values are
    /// merged into any existing column: only empty cells are filled, so an
    /// ancestor shared by several requested granularities keeps what earlier
    /// passes wrote. Ancestors with no source stay as they are.
    pub fn fill_ancestor_identifiers(
        &self,
        source: &ReportTable,
        report: &mut ReportTable,
        granularities: &[Granularity],
    ) -> Result<()> {
        for &granularity in granularities {
            for ancestor in granularity.ancestors() {
                let target = Column::identifier(ancestor).name();
                match self.ancestor_identifiers(source, report, granularity, ancestor) {
                    Some(values) => {
                        debug!(%granularity, %ancestor, column = %target, "backfilling ancestor identifiers");
                        merge_missing(report, &target, values)?;
                    }
                    None => debug!(%granularity, %ancestor, "no ancestor identifier source"),
                }
            }
        }
        Ok(())
    }

    fn ancestor_identifiers(
        &self,
        source: &ReportTable,
        report: &ReportTable,
        granularity: Granularity,
        ancestor: Granularity,
    ) -> Option<Vec<Value>> {
        if granularity.is_time() && ancestor == Granularity::Time(TimeGranularity::Daily) {
            if let Some(times) = report.column(&Column::identifier(granularity).name()) {
                return Some(truncate_to_dates(times));
            }
        }

        let ancestor_column = Column::identifier(ancestor);
        let native = self.vocabulary().native_column(ancestor_column)?;
        let values = source.column(&native)?;
        Some(self.vocabulary().convert_column(ancestor_column, values))
    }
}

fn truncate_to_dates(times: &[Value]) -> Vec<Value> {
    let dates: Vec<Value> = times.iter().map(Value::truncate_to_date).collect();
    let unparsable = times
        .iter()
        .zip(&dates)
        .filter(|(time, date)| !time.is_empty() && date.is_empty())
        .count();
    if unparsable > 0 {
        warn!(unparsable, "timestamps could not be truncated to dates");
    }
    dates
}

/// Merge `incoming` into column `name`, filling only empty cells.
///
/// A missing column is created from `incoming` as is.
pub fn merge_missing(report: &mut ReportTable, name: &str, incoming: Vec<Value>) -> Result<()> {
    let Some(existing) = report.column_mut(name) else {
        return report.insert_column(name, incoming);
    };
    if existing.len() != incoming.len() {
        return Err(ChannelError::ShapeMismatch {
            column: name.to_string(),
            expected: existing.len(),
            found: incoming.len(),
        });
    }
    for (slot, value) in existing.iter_mut().zip(incoming) {
        if slot.is_empty() && !value.is_empty() {
            *slot = value;
        }
    }
    Ok(())
}
