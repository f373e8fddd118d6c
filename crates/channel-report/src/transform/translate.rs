//! Copy native source columns into canonical columns.

use tracing::{debug, warn};

use crate::error::Result;
use crate::input::ReportTable;
use crate::reporter::ChannelReporter;
use crate::schema::ChannelVocabulary;
use crate::taxonomy::Granularity;

impl<V: ChannelVocabulary> ChannelReporter<V> {
    /// Build a sparse canonical table from a native source table.
    ///
    /// One canonical column is produced per entry of the filtered map for
    /// `granularities` whose native column exists in `source`. Entries whose
    /// native column is missing are omitted rather than null-filled.
    pub fn translate(&self, source: &ReportTable, granularities: &[Granularity]) -> Result<ReportTable> {
        let map = self.filtered_map(Some(granularities), None);
        let mut report = ReportTable::new();

        for (column, native) in map.iter() {
            match source.column(native) {
                Some(values) => {
                    let converted = self.vocabulary().convert_column(column, values);
                    report.insert_column(column.name(), converted)?;
                }
                None => warn!(%column, native, "native column missing from source, omitted"),
            }
        }

        debug!(
            requested = granularities.len(),
            columns = report.column_count(),
            rows = report.row_count(),
            "translated source report"
        );
        Ok(report)
    }
}
