//! The nine change operations a diff can produce, in the shape they
//! serialize into `schema-diff.json`.

use serde::{Deserialize, Serialize};

use crate::schema::{Column, Constraint, Index};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Change {
    #[serde(rename = "table.create", rename_all = "camelCase")]
    TableCreate {
        table_name: String,
        columns: Vec<Column>,
    },
    #[serde(rename = "table.delete", rename_all = "camelCase")]
    TableDelete { table_name: String },
    #[serde(rename = "column.create", rename_all = "camelCase")]
    ColumnCreate { column: Column },
    #[serde(rename = "column.update", rename_all = "camelCase")]
    ColumnUpdate { source: Column, target: Column },
    #[serde(rename = "column.delete", rename_all = "camelCase")]
    ColumnDelete {
        table_name: String,
        column_name: String,
    },
    #[serde(rename = "constraint.create", rename_all = "camelCase")]
    ConstraintCreate { constraint: Constraint },
    #[serde(rename = "constraint.delete", rename_all = "camelCase")]
    ConstraintDelete {
        table_name: String,
        constraint_name: String,
    },
    #[serde(rename = "index.create", rename_all = "camelCase")]
    IndexCreate { index: Index },
    #[serde(rename = "index.delete", rename_all = "camelCase")]
    IndexDelete { index_name: String },
}
