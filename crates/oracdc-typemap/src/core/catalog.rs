//! Catalog metadata rows as produced by the source dictionary query.
//!
//! One [`CatalogColumn`] corresponds to one row of the metadata cursor. The
//! serde names match the cursor's column labels so a captured catalog can be
//! replayed from YAML or JSON.

use serde::{Deserialize, Serialize};

/// One column row from the metadata cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CatalogColumn {
    /// Column name.
    pub column_name: String,

    /// Primary key flag ("Y" when part of the primary key).
    #[serde(default)]
    pub pk: Option<String>,

    /// Nullable flag ("Y" when the column allows NULL).
    #[serde(default)]
    pub nullable: Option<String>,

    /// Raw source type name (e.g. "NUMBER", "VARCHAR2", "TIMESTAMP(6)").
    pub data_type: String,

    /// Numeric precision, absent for non-numeric and unconstrained columns.
    #[serde(default)]
    pub data_precision: Option<i32>,

    /// Numeric scale, absent for non-numeric and unconstrained columns.
    #[serde(default)]
    pub data_scale: Option<i32>,
}

impl CatalogColumn {
    /// Create a catalog row with no precision/scale.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: name.into(),
            pk: None,
            nullable: Some("Y".to_string()),
            data_type: data_type.into(),
            data_precision: None,
            data_scale: None,
        }
    }

    /// Set precision and scale.
    pub fn with_precision(mut self, precision: Option<i32>, scale: Option<i32>) -> Self {
        self.data_precision = precision;
        self.data_scale = scale;
        self
    }

    /// Mark the column as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = Some("N".to_string());
        self
    }

    /// Mark the column as a primary key member.
    pub fn primary_key(mut self) -> Self {
        self.pk = Some("Y".to_string());
        self
    }

    /// Whether the column is part of the primary key.
    pub fn is_pk(&self) -> bool {
        self.pk.as_deref() == Some("Y")
    }

    /// Whether the column allows NULL.
    pub fn is_nullable(&self) -> bool {
        self.nullable.as_deref() == Some("Y")
    }

    /// Type information fed to the classifier.
    pub fn type_info(&self) -> ColumnTypeInfo<'_> {
        ColumnTypeInfo {
            data_type: &self.data_type,
            precision: self.data_precision,
            scale: self.data_scale,
        }
    }
}

/// Classifier input: raw type name plus optional precision and scale.
///
/// `None` means the metadata field was absent, which is distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeInfo<'a> {
    pub data_type: &'a str,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
}

impl<'a> ColumnTypeInfo<'a> {
    /// Type with no precision or scale metadata.
    pub fn new(data_type: &'a str) -> Self {
        Self {
            data_type,
            precision: None,
            scale: None,
        }
    }

    /// Type with explicit precision and scale metadata.
    pub fn with_precision(data_type: &'a str, precision: Option<i32>, scale: Option<i32>) -> Self {
        Self {
            data_type,
            precision,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_only_accept_y() {
        let mut col = CatalogColumn::new("ID", "NUMBER");
        assert!(col.is_nullable());
        assert!(!col.is_pk());

        col.pk = Some("N".to_string());
        assert!(!col.is_pk());
        col.pk = Some("y".to_string());
        assert!(!col.is_pk());
        col.pk = Some("Y".to_string());
        assert!(col.is_pk());

        col.nullable = None;
        assert!(!col.is_nullable());
    }

    #[test]
    fn test_deserialize_cursor_labels() {
        let yaml = r#"
- COLUMN_NAME: DEPT_ID
  PK: "Y"
  NULLABLE: "N"
  DATA_TYPE: NUMBER
  DATA_PRECISION: 4
  DATA_SCALE: 0
- COLUMN_NAME: DNAME
  NULLABLE: "Y"
  DATA_TYPE: VARCHAR2
"#;
        let rows: Vec<CatalogColumn> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_pk());
        assert!(!rows[0].is_nullable());
        assert_eq!(rows[0].data_precision, Some(4));
        assert_eq!(rows[1].data_precision, None);
        assert_eq!(rows[1].data_scale, None);
    }

    #[test]
    fn test_type_info_preserves_absence() {
        let col = CatalogColumn::new("AMOUNT", "NUMBER").with_precision(Some(10), None);
        let info = col.type_info();
        assert_eq!(info.data_type, "NUMBER");
        assert_eq!(info.precision, Some(10));
        assert_eq!(info.scale, None);
    }
}
