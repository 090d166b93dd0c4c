//! Reverse classification: self-describing field schema back to a semantic type.
//!
//! Used on the consuming side, where the only type information available is
//! the field schema written by a producer. The logical tag disambiguates
//! physical kinds that carry more than one semantic type.

use tracing::info;

use crate::core::semantic::{LogicalType, PhysicalKind, SemanticType};
use crate::schema::FieldSchema;

/// Semantic type described by a field schema.
pub fn reverse_classify(schema: &FieldSchema) -> SemanticType {
    match (schema.kind, schema.logical) {
        (PhysicalKind::Int32, Some(LogicalType::Date)) => SemanticType::Date,
        (PhysicalKind::Int64, Some(LogicalType::Timestamp)) => SemanticType::Timestamp,
        (PhysicalKind::Bytes, Some(LogicalType::Decimal)) => SemanticType::Decimal {
            scale: schema.scale.unwrap_or(0),
        },
        (PhysicalKind::Int8, _) => SemanticType::Int8,
        (PhysicalKind::Int16, _) => SemanticType::Int16,
        (PhysicalKind::Int32, _) => SemanticType::Int32,
        (PhysicalKind::Int64, _) => SemanticType::Int64,
        (PhysicalKind::Float32, _) => SemanticType::Float32,
        (PhysicalKind::Float64, _) => SemanticType::Float64,
        (PhysicalKind::Boolean, _) => SemanticType::Boolean,
        (PhysicalKind::String, _) => SemanticType::StringText,
        (PhysicalKind::Bytes, _) => SemanticType::BinaryBytes,
        (
            kind @ (PhysicalKind::Array
            | PhysicalKind::Map
            | PhysicalKind::Struct
            | PhysicalKind::Unknown),
            _,
        ) => {
            info!(
                "Field {} has unsupported kind {}, mapped to {}",
                schema.field,
                kind,
                SemanticType::StringText
            );
            SemanticType::StringText
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::semantic::WireType;

    fn schema(kind: PhysicalKind, logical: Option<LogicalType>) -> FieldSchema {
        FieldSchema::new(
            "F",
            WireType {
                kind,
                optional: true,
                logical,
                scale: None,
            },
        )
    }

    #[test]
    fn test_int32_date_tag() {
        assert_eq!(
            reverse_classify(&schema(PhysicalKind::Int32, Some(LogicalType::Date))),
            SemanticType::Date
        );
        assert_eq!(
            reverse_classify(&schema(PhysicalKind::Int32, None)),
            SemanticType::Int32
        );
    }

    #[test]
    fn test_int64_timestamp_tag() {
        assert_eq!(
            reverse_classify(&schema(PhysicalKind::Int64, Some(LogicalType::Timestamp))),
            SemanticType::Timestamp
        );
        assert_eq!(
            reverse_classify(&schema(PhysicalKind::Int64, None)),
            SemanticType::Int64
        );
    }

    #[test]
    fn test_mismatched_tag_is_ignored() {
        // A date tag only means something on int32
        assert_eq!(
            reverse_classify(&schema(PhysicalKind::Int64, Some(LogicalType::Date))),
            SemanticType::Int64
        );
    }

    #[test]
    fn test_decimal_tag_keeps_scale() {
        let mut s = schema(PhysicalKind::Bytes, Some(LogicalType::Decimal));
        s.scale = Some(3);
        assert_eq!(reverse_classify(&s), SemanticType::Decimal { scale: 3 });
        assert_eq!(
            reverse_classify(&schema(PhysicalKind::Bytes, None)),
            SemanticType::BinaryBytes
        );
    }

    #[test]
    fn test_untagged_primitives() {
        let cases = [
            (PhysicalKind::Int8, SemanticType::Int8),
            (PhysicalKind::Int16, SemanticType::Int16),
            (PhysicalKind::Float32, SemanticType::Float32),
            (PhysicalKind::Float64, SemanticType::Float64),
            (PhysicalKind::Boolean, SemanticType::Boolean),
            (PhysicalKind::String, SemanticType::StringText),
        ];
        for (kind, expected) in cases {
            assert_eq!(reverse_classify(&schema(kind, None)), expected, "{}", kind);
        }
    }

    #[test]
    fn test_unsupported_kinds_fall_back_to_string() {
        for kind in [
            PhysicalKind::Array,
            PhysicalKind::Map,
            PhysicalKind::Struct,
            PhysicalKind::Unknown,
        ] {
            assert_eq!(
                reverse_classify(&schema(kind, None)),
                SemanticType::StringText
            );
        }
    }

    #[test]
    fn test_unrecognized_kind_in_json_maps_to_string() {
        let schema = FieldSchema::from_json(
            r#"{"type":"float","optional":true,"field":"RATE"}"#,
        )
        .unwrap();
        assert_eq!(reverse_classify(&schema), SemanticType::StringText);
    }
}
