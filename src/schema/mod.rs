//! Schema model - the value types shared by the introspector, the metadata
//! compiler, the diff engine and the DDL emitter.

use serde::{Deserialize, Serialize};

/// A single schema namespace and the tables it contains.
///
/// Tables are unique by name; insertion order is preserved so that generated
/// artifacts are stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// A copy of this schema keeping only tables that also exist in `other`.
    pub fn retain_tables_of(&self, other: &Schema) -> Schema {
        Schema {
            name: self.name.clone(),
            tables: self
                .tables
                .iter()
                .filter(|t| other.table(&t.name).is_some())
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Column order is preserved for CREATE TABLE emission.
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub constraints: Vec<Constraint>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns flagged as part of the primary key, in declaration order.
    pub fn primary_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.primary)
            .map(|c| c.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub table_name: String,
    pub name: String,
    /// Data type text (`character varying`, `uuid`, `enum`, ...). For array
    /// columns this is the element type and `is_array` is set.
    #[serde(rename = "type")]
    pub column_type: String,
    /// Ordered enum labels; present exactly when `column_type` is `enum`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    pub nullable: bool,
    pub is_array: bool,
    pub primary: bool,
    /// Verbatim SQL default expression, e.g. `uuid_generate_v4()` or `TRUE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_precision: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_scale: Option<i32>,
}

impl Column {
    pub fn new(table_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            name: name.into(),
            column_type: "character varying".to_string(),
            values: None,
            nullable: false,
            is_array: false,
            primary: false,
            default: None,
            numeric_precision: None,
            numeric_scale: None,
        }
    }
}

/// A secondary index. Exactly one of `column_names` and `expression` is set;
/// indexes backing PRIMARY KEY or UNIQUE constraints are not modeled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub name: String,
    pub table_name: String,
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Access method (`gin`, `gist`, ...) when it is not the default btree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using: Option<String>,
    /// Partial-index predicate.
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
}

/// Referential action for foreign keys, mapped from the single-character
/// `confupdtype`/`confdeltype` catalog codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForeignKeyAction {
    #[serde(rename = "NO ACTION")]
    NoAction,
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
}

impl ForeignKeyAction {
    /// Unknown codes fall back to NO ACTION, matching the catalog contract.
    pub fn from_code(code: &str) -> Self {
        match code {
            "c" => Self::Cascade,
            "r" => Self::Restrict,
            "n" => Self::SetNull,
            "d" => Self::SetDefault,
            _ => Self::NoAction,
        }
    }
}

impl std::fmt::Display for ForeignKeyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::NoAction => "NO ACTION",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        };
        write!(f, "{}", text)
    }
}

/// Table constraints, tagged the way they serialize into the diff artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Constraint {
    #[serde(rename = "PRIMARY_KEY", rename_all = "camelCase")]
    PrimaryKey {
        name: String,
        table_name: String,
        column_names: Vec<String>,
    },
    #[serde(rename = "FOREIGN_KEY", rename_all = "camelCase")]
    ForeignKey {
        name: String,
        table_name: String,
        column_names: Vec<String>,
        reference_table_name: String,
        reference_column_names: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_update: Option<ForeignKeyAction>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_delete: Option<ForeignKeyAction>,
    },
    #[serde(rename = "UNIQUE", rename_all = "camelCase")]
    Unique {
        name: String,
        table_name: String,
        column_names: Vec<String>,
    },
    #[serde(rename = "CHECK", rename_all = "camelCase")]
    Check {
        name: String,
        table_name: String,
        /// Predicate text without the leading CHECK keyword.
        expression: String,
    },
}

/// Discriminant used to partition constraints before diffing by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 4] = [
        ConstraintKind::PrimaryKey,
        ConstraintKind::ForeignKey,
        ConstraintKind::Unique,
        ConstraintKind::Check,
    ];
}

impl Constraint {
    pub fn name(&self) -> &str {
        match self {
            Self::PrimaryKey { name, .. }
            | Self::ForeignKey { name, .. }
            | Self::Unique { name, .. }
            | Self::Check { name, .. } => name,
        }
    }

    pub fn table_name(&self) -> &str {
        match self {
            Self::PrimaryKey { table_name, .. }
            | Self::ForeignKey { table_name, .. }
            | Self::Unique { table_name, .. }
            | Self::Check { table_name, .. } => table_name,
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::PrimaryKey { .. } => ConstraintKind::PrimaryKey,
            Self::ForeignKey { .. } => ConstraintKind::ForeignKey,
            Self::Unique { .. } => ConstraintKind::Unique,
            Self::Check { .. } => ConstraintKind::Check,
        }
    }
}
