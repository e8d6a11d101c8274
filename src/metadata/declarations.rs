//! Entity declarations - the registration surface of the metadata compiler.
//!
//! Hosts either call the `register_*` functions directly or ship a YAML
//! declarations file that deserializes into these same structs. Both roads
//! end in the global registry drained by `dynamic_schema`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::ForeignKeyAction;

/// Everything a declarations file can carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationSet {
    #[serde(default)]
    pub tables: Vec<TableDeclaration>,
    #[serde(default)]
    pub columns: Vec<ColumnDeclaration>,
    #[serde(default)]
    pub indexes: Vec<IndexDeclaration>,
    #[serde(default)]
    pub column_indexes: Vec<ColumnIndexDeclaration>,
    #[serde(default)]
    pub relations: Vec<RelationDeclaration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDeclaration {
    /// Entity (class) name the other declarations refer back to.
    pub entity: String,
    /// Explicit table name; defaults to the snake_cased entity name.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDeclaration {
    pub entity: String,
    pub field: String,
    /// Explicit column name; defaults to the field name as-is.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub column_type: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub default: Option<ColumnDefault>,
    /// Ordered enum labels; forces the column type to `enum`.
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default)]
    pub numeric_precision: Option<i32>,
    #[serde(default)]
    pub numeric_scale: Option<i32>,
}

/// Host-level default values, normalized into SQL expression text at
/// compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnDefault {
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
    /// An explicit null default; only reachable programmatically.
    Null,
}

pub enum NormalizedDefault {
    Value(String),
    /// A null default carries no DEFAULT clause and forces the column
    /// nullable.
    ForceNullable,
}

impl ColumnDefault {
    pub fn normalize(&self) -> NormalizedDefault {
        match self {
            Self::Bool(true) => NormalizedDefault::Value("TRUE".to_string()),
            Self::Bool(false) => NormalizedDefault::Value("FALSE".to_string()),
            Self::Int(value) => NormalizedDefault::Value(value.to_string()),
            Self::Float(value) => NormalizedDefault::Value(value.to_string()),
            Self::Timestamp(value) => NormalizedDefault::Value(value.to_rfc3339()),
            Self::Text(value) => NormalizedDefault::Value(value.clone()),
            Self::Null => NormalizedDefault::ForceNullable,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDeclaration {
    pub entity: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub column_names: Option<Vec<String>>,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub using: Option<String>,
    #[serde(default, rename = "where")]
    pub predicate: Option<String>,
    #[serde(default)]
    pub unique: bool,
}

/// Field-level index annotation; compiles to a single-column index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnIndexDeclaration {
    pub entity: String,
    pub field: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unique: bool,
}

/// A many-to-one relation from `entity.property` to the target entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDeclaration {
    pub entity: String,
    /// Property name; the join column is `{property}Id`.
    pub property: String,
    pub target: String,
    #[serde(default)]
    pub on_update: Option<ForeignKeyAction>,
    #[serde(default)]
    pub on_delete: Option<ForeignKeyAction>,
}
