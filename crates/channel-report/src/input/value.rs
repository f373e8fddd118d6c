//! Cell values of report tables.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

/// Date-time layouts accepted when reading timestamps.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Layout used when rendering timestamps.
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single cell.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Time(NaiveDateTime),
    Text(String),
}

impl Value {
    /// Interpret raw text from a channel export.
    pub fn infer(raw: &str) -> Value {
        let trimmed = raw.trim();
        if is_null_token(trimmed) {
            return Value::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            // Leading zeros or signs would be lost, so those stay text.
            if i.to_string() == trimmed {
                return Value::Int(i);
            }
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() && !has_leading_zero(trimmed) {
                return Value::Float(f);
            }
        }
        if let Some(time) = parse_timestamp(trimmed) {
            return Value::Time(time);
        }
        match trimmed {
            "true" | "TRUE" | "True" => Value::Bool(true),
            "false" | "FALSE" | "False" => Value::Bool(false),
            _ => Value::Text(raw.to_string()),
        }
    }

    /// Null or whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Read the value as a timestamp, parsing text if needed.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Time(t) => Some(*t),
            Value::Text(s) => parse_timestamp(s.trim()),
            _ => None,
        }
    }

    /// Drop the time of day, keeping the calendar date.
    ///
    /// Empty cells stay empty; cells that are not timestamps become Null.
    pub fn truncate_to_date(&self) -> Value {
        if self.is_empty() {
            return Value::Null;
        }
        match self.as_timestamp() {
            Some(t) => Value::Time(t.date().and_time(NaiveTime::MIN)),
            None => Value::Null,
        }
    }

    /// Rank of the variant in the cross-kind sort order. Missing values last.
    fn kind_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Time(_) => 2,
            Value::Text(_) => 3,
            Value::Null => 4,
        }
    }
}

/// Parse ISO date or date-time text.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Identifier-like numerals such as `00042`.
fn has_leading_zero(trimmed: &str) -> bool {
    let mut digits = trimmed.trim_start_matches(['-', '+']).chars();
    matches!((digits.next(), digits.next()), (Some('0'), Some(c)) if c.is_ascii_digit())
}

/// Check if text represents a missing value.
fn is_null_token(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

impl Ord for Value {
    /// Numbers compare by exact value across `Int` and `Float`; an `Int`
    /// sorts before a `Float` of equal value, so only identical cells tie.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b).then(Ordering::Less),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).reverse().then(Ordering::Greater),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Null, Value::Null) => Ordering::Equal,
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

/// Exact numeric comparison of an integer with a float, without rounding
/// the integer through `f64`. NaN sorts by sign, as in `f64::total_cmp`.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float above every i64.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= BOUND {
        return Ordering::Less;
    }
    if float < -BOUND {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal if float > whole => Ordering::Less,
        Ordering::Equal if float < whole => Ordering::Greater,
        ordering => ordering,
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Time(t) => write!(f, "{}", t.format(OUTPUT_FORMAT)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Time(_) | Value::Text(_) => serializer.collect_str(self),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(t: NaiveDateTime) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer() {
        assert_eq!(Value::infer("42"), Value::Int(42));
        assert_eq!(Value::infer("10.5"), Value::Float(10.5));
        assert!(matches!(Value::infer("00123"), Value::Text(_)));
        assert!(matches!(Value::infer("007.5"), Value::Text(_)));
        assert_eq!(Value::infer("0.25"), Value::Float(0.25));
        assert!(matches!(Value::infer("NA"), Value::Null));
        assert!(matches!(Value::infer(""), Value::Null));
        assert!(matches!(Value::infer("inf"), Value::Text(_)));
        assert!(matches!(Value::infer("2024-03-01 13:45:00"), Value::Time(_)));
        assert!(matches!(Value::infer("Summer Sale"), Value::Text(_)));
    }

    #[test]
    fn test_truncate_to_date() {
        let value = Value::infer("2024-03-01T13:45:00");
        assert_eq!(value.truncate_to_date().to_string(), "2024-03-01T00:00:00");
        assert!(Value::Null.truncate_to_date().is_empty());
        assert!(Value::from("not a date").truncate_to_date().is_empty());
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let once = Value::infer("2024-03-01T23:59:59").truncate_to_date();
        assert_eq!(once.truncate_to_date(), once);
    }

    #[test]
    fn test_numeric_ordering_across_kinds() {
        assert!(Value::Int(9) < Value::Float(10.0));
        assert!(Value::Float(9.5) < Value::Int(10));
        assert!(Value::Int(-1) < Value::Float(-0.5));
        assert!(Value::Int(10) < Value::from("a"));
    }

    #[test]
    fn test_equal_numbers_of_different_kinds_do_not_tie() {
        assert_ne!(Value::Int(10), Value::Float(10.0));
        assert_eq!(Value::Int(10).cmp(&Value::Float(10.0)), Ordering::Less);
        assert_eq!(Value::Float(10.0).cmp(&Value::Int(10)), Ordering::Greater);
        assert_eq!(Value::Float(10.0), Value::Float(10.0));
    }

    #[test]
    fn test_large_integers_compare_exactly_against_floats() {
        let two_53 = 1i64 << 53;
        let below = Value::Int(two_53);
        let above = Value::Int(two_53 + 1);
        let float = Value::Float(two_53 as f64);

        assert!(below < float);
        assert!(float < above);
        assert!(below < above);
        assert!(Value::Int(i64::MAX) < Value::Float(9_223_372_036_854_775_808.0));
        assert!(Value::Int(i64::MIN) > Value::Float(-1e19));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::NAN));
    }

    #[test]
    fn test_null_sorts_last() {
        let mut values = vec![Value::Null, Value::from("b"), Value::Int(1)];
        values.sort();
        assert!(matches!(values[2], Value::Null));
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("  ").is_empty());
        assert!(!Value::Int(0).is_empty());
    }
}
