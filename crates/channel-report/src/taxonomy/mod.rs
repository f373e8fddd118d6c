//! Closed catalogs of granularities and properties with their ordering.
//!
//! Every catalog is a fixed list declared in order; the declaration order is
//! the base order inside a category. Comparisons across categories follow a
//! small precedence table (see [`order`]) and fail with
//! [`ChannelError::UndefinedOrdering`](crate::ChannelError::UndefinedOrdering)
//! when no rule applies.
//!
//! # Example
//!
//! ```
//! use channel_report::taxonomy::{EntityGranularity, Granularity};
//!
//! let ad = Granularity::Entity(EntityGranularity::Ad);
//! let ancestors: Vec<String> = ad.ancestors().iter().map(|g| g.to_string()).collect();
//! assert_eq!(ancestors, ["adgroup", "campaign", "account"]);
//! ```

/// Declares one closed catalog: variants in order, their canonical names,
/// the category they belong to, and the ranking/parsing impls.
macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident => $category:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident = $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant in declared order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl $crate::taxonomy::order::Ranked for $name {
            fn category(self) -> $crate::taxonomy::order::Category {
                $crate::taxonomy::order::Category::$category
            }

            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                self.as_str()
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ChannelError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| $crate::error::ChannelError::UnknownName {
                        kind: $kind,
                        name: s.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod column;
mod granularity;
pub mod order;
mod property;

pub use column::Column;
pub use granularity::{EntityGranularity, Granularity, TimeGranularity};
pub use order::{Category, Ranked};
pub use property::{EntityAttribute, EntityMetric, Property, PropertyCategory, TimeMetric};
