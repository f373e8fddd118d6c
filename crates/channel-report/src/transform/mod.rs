//! Report translation pipeline: translate, backfill ancestors, finalize.
//!
//! Each stage is a method on [`ChannelReporter`](crate::ChannelReporter):
//!
//! 1. [`translate`](crate::ChannelReporter::translate) copies native columns
//!    into a sparse canonical table.
//! 2. [`fill_ancestor_identifiers`](crate::ChannelReporter::fill_ancestor_identifiers)
//!    fills coarser identifier columns, merging into existing ones.
//! 3. [`finalize`](crate::ChannelReporter::finalize) prunes empty data and
//!    orders columns and rows deterministically.

mod backfill;
mod finalize;
mod translate;

pub use backfill::merge_missing;
pub use finalize::finalize_report;
