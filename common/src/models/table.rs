//! Table resource models.
//!
//! Tables are owned by the Postgres catalog; these shapes only carry the
//! identifiers a statement needs. Required-field checks name every field
//! that could be missing, not just the absent one.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};
use super::non_empty;

/// Query string for listing tables.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableListQuery {
    /// Database to inspect.
    pub database_name: Option<String>,
}

impl TableListQuery {
    /// Returns the database name or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<&str> {
        non_empty(&self.database_name)
            .ok_or_else(|| AppError::Validation("Missing databaseName".into()))
    }
}

/// Request body for creating a table.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
}

impl CreateTableRequest {
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

/// Request body for renaming a table.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameTableRequest {
    pub database_name: Option<String>,
    pub old_name: Option<String>,
    pub new_name: Option<String>,
}

impl RenameTableRequest {
    /// Returns `(database, old, new)` or a validation error naming the missing fields.
    pub fn require(&self) -> AppResult<(&str, &str, &str)> {
        match (
            non_empty(&self.database_name),
            non_empty(&self.old_name),
            non_empty(&self.new_name),
        ) {
            (Some(db), Some(old), Some(new)) => Ok((db, old, new)),
            _ => Err(AppError::Validation(
                "Missing databaseName, oldName or newName".into(),
            )),
        }
    }
}

/// Request body for dropping a table.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTableRequest {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
}

impl DeleteTableRequest {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_names_both_fields_when_one_is_missing() {
        let req = CreateTableRequest {
            database_name: Some("demo".into()),
            table_name: None,
        };
        let err = req.require().unwrap_err();
        assert_eq!(err.to_string(), "Missing databaseName or tableName");
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let req = TableListQuery {
            database_name: Some(String::new()),
        };
        assert!(req.require().is_err());
    }

    #[test]
    fn rename_passes_with_all_fields() {
        let req = RenameTableRequest {
            database_name: Some("demo".into()),
            old_name: Some("users".into()),
            new_name: Some("accounts".into()),
        };
        assert_eq!(req.require().unwrap(), ("demo", "users", "accounts"));
    }
}
