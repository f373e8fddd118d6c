//! Table-driven ordering across taxonomy categories.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{ChannelError, Result};

/// The five closed catalogs of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TimeGranularity,
    EntityGranularity,
    TimeMetric,
    EntityAttribute,
    EntityMetric,
}

/// Cross-category precedence: every member of the first category orders
/// before every member of the second.
const CATEGORY_PRECEDENCE: &[(Category, Category)] = &[
    (Category::TimeGranularity, Category::EntityGranularity),
    (Category::EntityAttribute, Category::EntityMetric),
];

/// An entry with a category and a declared index inside it.
pub trait Ranked: Copy {
    fn category(self) -> Category;

    /// Declared position inside the category, fixed at definition.
    fn index(self) -> usize;

    fn name(self) -> &'static str;

    /// Compare two entries, failing when their categories have no rule.
    fn try_cmp(self, other: Self) -> Result<Ordering> {
        let (left, right) = (self.category(), other.category());
        if left == right {
            return Ok(self.index().cmp(&other.index()));
        }
        category_ordering(left, right).ok_or_else(|| ChannelError::UndefinedOrdering {
            left: self.name().to_string(),
            right: other.name().to_string(),
        })
    }
}

/// Ordering between two distinct categories, if one is declared.
pub fn category_ordering(left: Category, right: Category) -> Option<Ordering> {
    CATEGORY_PRECEDENCE.iter().find_map(|&(lower, higher)| {
        if (left, right) == (lower, higher) {
            Some(Ordering::Less)
        } else if (left, right) == (higher, lower) {
            Some(Ordering::Greater)
        } else {
            None
        }
    })
}

/// Sort with a fallible comparator, returning the first undefined comparison.
///
/// Every pair is compared before sorting, so on error `items` is left as it
/// was and no ordering is ever invented for an undefined pair.
pub fn try_sort_by<T, F>(items: &mut [T], mut compare: F) -> Result<()>
where
    F: FnMut(&T, &T) -> Result<Ordering>,
{
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            compare(a, b)?;
        }
    }
    items.sort_by(|a, b| compare(a, b).unwrap_or(Ordering::Equal));
    Ok(())
}
