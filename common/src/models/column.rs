//! Column resource models.
//!
//! Columns are discovered from `information_schema.columns`; the list item
//! carries the raw catalog type plus the fixed display label.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};
use super::non_empty;

/// A column as reported by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnItem {
    /// Column name.
    pub column_name: String,
    /// Raw catalog type (e.g. `character varying`).
    pub data_type: String,
    /// Display label mapped from the catalog type.
    pub display_type: String,
}

/// Query string for listing columns.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnListQuery {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
}

impl ColumnListQuery {
    /// Returns `(database, table)` or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<(&str, &str)> {
        match (non_empty(&self.database_name), non_empty(&self.table_name)) {
            (Some(db), Some(table)) => Ok((db, table)),
            _ => Err(AppError::Validation(
                "Missing databaseName or tableName".into(),
            )),
        }
    }
}

/// Request body for adding a column.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddColumnRequest {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    pub column_type: Option<String>,
}

impl AddColumnRequest {
    /// Returns `(database, table, column, type)` or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<(&str, &str, &str, &str)> {
        match (
            non_empty(&self.database_name),
            non_empty(&self.table_name),
            non_empty(&self.column_name),
            non_empty(&self.column_type),
        ) {
            (Some(db), Some(table), Some(column), Some(ty)) => Ok((db, table, column, ty)),
            _ => Err(AppError::Validation(
                "Missing databaseName, tableName, columnName or columnType".into(),
            )),
        }
    }
}

/// Request body for renaming and/or retyping a column.
///
/// `newName` and `newType` are independently optional; a request with
/// neither is a no-op that still reports success.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumnRequest {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
    pub old_name: Option<String>,
    pub new_name: Option<String>,
    pub new_type: Option<String>,
}

impl UpdateColumnRequest {
    /// Returns `(database, table, old)` or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<(&str, &str, &str)> {
        match (
            non_empty(&self.database_name),
            non_empty(&self.table_name),
            non_empty(&self.old_name),
        ) {
            (Some(db), Some(table), Some(old)) => Ok((db, table, old)),
            _ => Err(AppError::Validation(
                "Missing databaseName, tableName or oldName".into(),
            )),
        }
    }

    /// Rename target, if any.
    pub fn new_name(&self) -> Option<&str> {
        non_empty(&self.new_name)
    }

    /// Retype target, if any.
    pub fn new_type(&self) -> Option<&str> {
        non_empty(&self.new_type)
    }
}

/// Request body for dropping a column.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteColumnRequest {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
    pub column_name: Option<String>,
}

impl DeleteColumnRequest {
    /// Returns `(database, table, column)` or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<(&str, &str, &str)> {
        match (
            non_empty(&self.database_name),
            non_empty(&self.table_name),
            non_empty(&self.column_name),
        ) {
            (Some(db), Some(table), Some(column)) => Ok((db, table, column)),
            _ => Err(AppError::Validation(
                "Missing databaseName, tableName or columnName".into(),
            )),
        }
    }
}
