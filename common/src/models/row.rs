//! Row resource models.
//!
//! Rows are free-form key/value maps matching a table's current columns.
//! The `where` and `data` maps are joined with equality and conjunction
//! only; no other operators are supported.

use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};
use super::non_empty;

/// A free-form row object keyed by column name.
pub type RowMap = Map<String, Value>;

/// Query string for listing rows.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowListQuery {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
}

impl RowListQuery {
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

/// Request body for inserting a row.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertRowRequest {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
    /// Column name → value map for the new row.
    #[schema(value_type = Object)]
    pub data: Option<RowMap>,
}

impl InsertRowRequest {
    /// Returns `(database, table, data)` or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<(&str, &str, &RowMap)> {
        match (
            non_empty(&self.database_name),
            non_empty(&self.table_name),
            self.data.as_ref(),
        ) {
            (Some(db), Some(table), Some(data)) => Ok((db, table, data)),
            _ => Err(AppError::Validation(
                "Missing databaseName, tableName or data".into(),
            )),
        }
    }
}

/// Request body for updating rows matching a filter.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRowRequest {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
    /// Column name → value map identifying the rows to update.
    #[serde(rename = "where")]
    #[schema(value_type = Object)]
    pub where_clause: Option<RowMap>,
    /// Column name → value map of the new values.
    #[schema(value_type = Object)]
    pub data: Option<RowMap>,
}

impl UpdateRowRequest {
    /// Returns `(database, table, where, data)` or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<(&str, &str, &RowMap, &RowMap)> {
        match (
            non_empty(&self.database_name),
            non_empty(&self.table_name),
            self.where_clause.as_ref(),
            self.data.as_ref(),
        ) {
            (Some(db), Some(table), Some(filter), Some(data)) => Ok((db, table, filter, data)),
            _ => Err(AppError::Validation(
                "Missing databaseName, tableName, where or data".into(),
            )),
        }
    }
}

/// Request body for deleting rows matching a filter.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRowRequest {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
    /// Column name → value map identifying the rows to delete.
    #[serde(rename = "where")]
    #[schema(value_type = Object)]
    pub where_clause: Option<RowMap>,
}

impl DeleteRowRequest {
    /// Returns `(database, table, where)` or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<(&str, &str, &RowMap)> {
        match (
            non_empty(&self.database_name),
            non_empty(&self.table_name),
            self.where_clause.as_ref(),
        ) {
            (Some(db), Some(table), Some(filter)) => Ok((db, table, filter)),
            _ => Err(AppError::Validation(
                "Missing databaseName, tableName or where".into(),
            )),
        }
    }
}
