//! Oracle column type classification.
//!
//! Maps a raw Oracle type name plus optional precision/scale onto a
//! [`SemanticType`]. Classification is total: unknown type names fall back to
//! [`SemanticType::StringText`] and unconstrained `NUMBER` columns fall back
//! to [`SemanticType::Float64`]. Neither fallback is an error.

use tracing::{info, warn};

use crate::core::catalog::ColumnTypeInfo;
use crate::core::semantic::SemanticType;

use super::NumericPolicy;

/// log10(2): converts a binary digit count into a decimal digit count.
const LOG_2: f64 = 0.30103;

/// Widest `FLOAT` precision (in binary digits) that still fits a 32-bit float.
const FLOAT32_MAX_PRECISION: i32 = 22;

/// Widest `FLOAT` precision (in binary digits) kept as an exact decimal.
const FLOAT_DECIMAL_MAX_PRECISION: i32 = 10;

/// Precision assumed for `NUMBER(*, 0)`, where only the scale is recorded.
const NUMBER_MAX_PRECISION: i32 = 38;

/// Result of classifying one column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Semantic type tag.
    pub semantic_type: SemanticType,
    /// True when a date-only source type was widened to a timestamp.
    pub is_legacy_date: bool,
}

impl Classification {
    fn of(semantic_type: SemanticType) -> Self {
        Self {
            semantic_type,
            is_legacy_date: false,
        }
    }

    /// Decimal scale (0 for non-decimal types).
    pub fn scale(&self) -> u32 {
        self.semantic_type.scale()
    }
}

/// Classify an Oracle column type.
///
/// Pure function of (type name, precision, scale, presence of each) and the
/// numeric policy. Type names are matched case-insensitively.
pub fn classify(info: &ColumnTypeInfo<'_>, policy: NumericPolicy) -> Classification {
    let data_type = info.data_type.trim().to_uppercase();

    match data_type.as_str() {
        // Oracle DATE holds a time of day too, so it is carried as a timestamp
        "DATE" => Classification {
            semantic_type: SemanticType::Timestamp,
            is_legacy_date: true,
        },
        "FLOAT" => Classification::of(classify_float(info.precision)),
        "NUMBER" => Classification::of(classify_number(
            info.data_type,
            info.precision,
            info.scale,
            policy,
        )),
        "CHAR" | "NCHAR" | "VARCHAR2" | "NVARCHAR2" | "VARCHAR" | "NVARCHAR" | "CLOB"
        | "NCLOB" | "LONG" => Classification::of(SemanticType::StringText),
        "RAW" | "LONG RAW" | "BLOB" => Classification::of(SemanticType::BinaryBytes),
        t if is_timestamp(t) => Classification::of(SemanticType::Timestamp),
        _ => {
            info!(
                "Unsupported type {} mapped to {}",
                info.data_type,
                SemanticType::StringText
            );
            Classification::of(SemanticType::StringText)
        }
    }
}

/// `FLOAT(p)` where p is the precision in binary digits.
fn classify_float(precision: Option<i32>) -> SemanticType {
    match precision {
        Some(p) if p > 0 && p <= FLOAT_DECIMAL_MAX_PRECISION => SemanticType::Decimal {
            scale: (p as f64 * LOG_2).ceil() as u32,
        },
        Some(p) if p > FLOAT_DECIMAL_MAX_PRECISION && p <= FLOAT32_MAX_PRECISION => {
            SemanticType::Float32
        }
        _ => SemanticType::Float64,
    }
}

fn classify_number(
    data_type: &str,
    precision: Option<i32>,
    scale: Option<i32>,
    policy: NumericPolicy,
) -> SemanticType {
    let (precision, scale) = match (precision, scale) {
        (None, None) => {
            info!(
                "{} without precision and scale mapped to {}",
                data_type,
                SemanticType::Float64
            );
            return SemanticType::Float64;
        }
        (p, s) => (p, s.unwrap_or(0)),
    };

    if scale > 0 {
        return SemanticType::Decimal {
            scale: scale as u32,
        };
    }

    // Standalone reads a missing precision as 0, the same as an explicit 0
    if policy == NumericPolicy::Standalone && precision.unwrap_or(0) == 0 {
        info!(
            "{} with zero precision mapped to {}",
            data_type,
            SemanticType::Float64
        );
        return SemanticType::Float64;
    }

    let mut digits = precision.unwrap_or(NUMBER_MAX_PRECISION);
    if scale < 0 {
        // NUMBER(p, -s) rounds to 10^s and stores integers of up to p + s digits
        warn!(
            "{}({}, {}) has a negative scale, classifying as an integer of {} digits",
            data_type,
            digits,
            scale,
            digits.saturating_add(-scale)
        );
        digits = digits.saturating_add(-scale);
    }

    integer_for_precision(digits, policy)
}

fn integer_for_precision(precision: i32, policy: NumericPolicy) -> SemanticType {
    if precision < 3 {
        SemanticType::Int8
    } else if precision < 5 {
        SemanticType::Int16
    } else if precision < 10 {
        SemanticType::Int32
    } else {
        match policy {
            NumericPolicy::SchemaBuilder if precision >= 19 => SemanticType::Decimal { scale: 0 },
            NumericPolicy::SchemaBuilder | NumericPolicy::Standalone => SemanticType::Int64,
        }
    }
}

/// `TIMESTAMP` or `TIMESTAMP(n)`. Zoned variants are not part of the family.
fn is_timestamp(data_type: &str) -> bool {
    match data_type.strip_prefix("TIMESTAMP") {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(precision: Option<i32>, scale: Option<i32>) -> SemanticType {
        number_with(precision, scale, NumericPolicy::SchemaBuilder)
    }

    fn number_with(precision: Option<i32>, scale: Option<i32>, policy: NumericPolicy) -> SemanticType {
        classify(
            &ColumnTypeInfo::with_precision("NUMBER", precision, scale),
            policy,
        )
        .semantic_type
    }

    fn float(precision: Option<i32>) -> SemanticType {
        classify(
            &ColumnTypeInfo::with_precision("FLOAT", precision, None),
            NumericPolicy::SchemaBuilder,
        )
        .semantic_type
    }

    fn simple(data_type: &str) -> Classification {
        classify(&ColumnTypeInfo::new(data_type), NumericPolicy::SchemaBuilder)
    }

    #[test]
    fn test_number_integer_ranges() {
        for p in 1..=2 {
            assert_eq!(number(Some(p), Some(0)), SemanticType::Int8, "p={}", p);
        }
        for p in 3..=4 {
            assert_eq!(number(Some(p), Some(0)), SemanticType::Int16, "p={}", p);
        }
        for p in 5..=9 {
            assert_eq!(number(Some(p), Some(0)), SemanticType::Int32, "p={}", p);
        }
        for p in 10..=18 {
            assert_eq!(number(Some(p), Some(0)), SemanticType::Int64, "p={}", p);
        }
        for p in 19..=38 {
            assert_eq!(
                number(Some(p), Some(0)),
                SemanticType::Decimal { scale: 0 },
                "p={}",
                p
            );
        }
    }

    #[test]
    fn test_number_standalone_policy_has_no_decimal_cutover() {
        let policy = NumericPolicy::Standalone;
        assert_eq!(number_with(Some(2), Some(0), policy), SemanticType::Int8);
        assert_eq!(number_with(Some(9), Some(0), policy), SemanticType::Int32);
        assert_eq!(number_with(Some(10), Some(0), policy), SemanticType::Int64);
        assert_eq!(number_with(Some(19), Some(0), policy), SemanticType::Int64);
        assert_eq!(number_with(Some(38), Some(0), policy), SemanticType::Int64);
    }

    #[test]
    fn test_number_zero_precision_depends_on_policy() {
        assert_eq!(
            number_with(Some(0), Some(0), NumericPolicy::Standalone),
            SemanticType::Float64
        );
        assert_eq!(
            number_with(Some(0), Some(0), NumericPolicy::SchemaBuilder),
            SemanticType::Int8
        );
    }

    #[test]
    fn test_number_without_precision_and_scale_is_float64() {
        assert_eq!(number(None, None), SemanticType::Float64);
        assert_eq!(
            number_with(None, None, NumericPolicy::Standalone),
            SemanticType::Float64
        );
    }

    #[test]
    fn test_number_star_zero_depends_on_policy() {
        assert_eq!(number(None, Some(0)), SemanticType::Decimal { scale: 0 });
        // Standalone treats a missing precision like NUMBER(0, 0)
        assert_eq!(
            number_with(None, Some(0), NumericPolicy::Standalone),
            SemanticType::Float64
        );
        assert_eq!(
            number_with(None, Some(-2), NumericPolicy::Standalone),
            SemanticType::Float64
        );
    }

    #[test]
    fn test_number_with_scale_is_decimal() {
        assert_eq!(number(Some(10), Some(2)), SemanticType::Decimal { scale: 2 });
        assert_eq!(number(Some(38), Some(10)), SemanticType::Decimal { scale: 10 });
        assert_eq!(
            number_with(Some(5), Some(3), NumericPolicy::Standalone),
            SemanticType::Decimal { scale: 3 }
        );
    }

    #[test]
    fn test_number_negative_scale_is_integer() {
        // NUMBER(5,-2) holds up to 7 integer digits
        assert_eq!(number(Some(5), Some(-2)), SemanticType::Int32);
        assert_eq!(number(Some(8), Some(-2)), SemanticType::Int64);
    }

    #[test]
    fn test_float_precision_table() {
        assert_eq!(float(None), SemanticType::Float64);
        assert_eq!(float(Some(126)), SemanticType::Float64);
        assert_eq!(float(Some(24)), SemanticType::Float64);
        assert_eq!(float(Some(23)), SemanticType::Float64);
        assert_eq!(float(Some(22)), SemanticType::Float32);
        assert_eq!(float(Some(15)), SemanticType::Float32);
        assert_eq!(float(Some(11)), SemanticType::Float32);
        assert_eq!(float(Some(10)), SemanticType::Decimal { scale: 4 });
        assert_eq!(float(Some(5)), SemanticType::Decimal { scale: 2 });
        assert_eq!(float(Some(1)), SemanticType::Decimal { scale: 1 });
        assert_eq!(float(Some(0)), SemanticType::Float64);
    }

    #[test]
    fn test_date_is_legacy_timestamp() {
        let c = simple("DATE");
        assert_eq!(c.semantic_type, SemanticType::Timestamp);
        assert!(c.is_legacy_date);
        assert_eq!(c.scale(), 0);
    }

    #[test]
    fn test_timestamp_family() {
        for t in [
            "TIMESTAMP",
            "TIMESTAMP(0)",
            "TIMESTAMP(1)",
            "TIMESTAMP(3)",
            "TIMESTAMP(6)",
            "TIMESTAMP(9)",
        ] {
            let c = simple(t);
            assert_eq!(c.semantic_type, SemanticType::Timestamp, "{}", t);
            assert!(!c.is_legacy_date);
        }
        assert_eq!(
            simple("TIMESTAMP(6) WITH TIME ZONE").semantic_type,
            SemanticType::StringText
        );
        assert_eq!(simple("TIMESTAMP()").semantic_type, SemanticType::StringText);
    }

    #[test]
    fn test_character_and_binary_types() {
        for t in ["CHAR", "NCHAR", "VARCHAR2", "NVARCHAR2", "CLOB", "NCLOB"] {
            assert_eq!(simple(t).semantic_type, SemanticType::StringText, "{}", t);
        }
        for t in ["RAW", "BLOB", "LONG RAW"] {
            assert_eq!(simple(t).semantic_type, SemanticType::BinaryBytes, "{}", t);
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_string() {
        for t in ["XMLTYPE", "SDO_GEOMETRY", "ROWID", "", "INTERVAL DAY(2) TO SECOND(6)"] {
            assert_eq!(simple(t).semantic_type, SemanticType::StringText, "{:?}", t);
        }
    }

    #[test]
    fn test_type_names_are_case_insensitive() {
        assert_eq!(simple("varchar2").semantic_type, SemanticType::StringText);
        assert_eq!(simple(" blob ").semantic_type, SemanticType::BinaryBytes);
        assert!(simple("date").is_legacy_date);
        assert_eq!(simple("timestamp(6)").semantic_type, SemanticType::Timestamp);
    }
}
