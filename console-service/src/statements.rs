//! SQL statement construction.
//!
//! Pure builders returning statement text and bind parameters. Identifiers
//! are quoted (embedded `"` doubled), values are parameter-bound, and column
//! types must come from the fixed allow-list. The statement shapes match the
//! console's API surface: catalog discovery for tables/columns, `IF EXISTS`
//! drops, and equality-and-conjunction `where` maps.

use common::errors::{AppError, AppResult};
use common::models::row::RowMap;
use common::utils::pg_types::is_allowed_column_type;
use common::utils::sql_ident::ensure_ident;
use serde_json::Value;

/// Catalog query listing base tables in the public schema.
pub const LIST_TABLES: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_schema = 'public' AND table_type = 'BASE TABLE'";

/// Catalog query listing the columns of one table.
pub const LIST_COLUMNS: &str = "SELECT column_name, data_type FROM information_schema.columns \
     WHERE table_name = $1 AND table_schema = 'public'";

/// A bind parameter derived from a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl From<&Value> for SqlParam {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => SqlParam::Null,
            Value::Bool(b) => SqlParam::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlParam::Int(i),
                None => SqlParam::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => SqlParam::Text(s.clone()),
            // Arrays and objects bind as their JSON text rendering.
            other => SqlParam::Text(other.to_string()),
        }
    }
}

/// `CREATE TABLE` with the fixed `id` / `created_at` columns.
pub fn create_table(table: &str) -> AppResult<String> {
    let table = ensure_ident(table)?;
    Ok(format!(
        "CREATE TABLE {table} (id SERIAL PRIMARY KEY, created_at TIMESTAMP DEFAULT NOW())"
    ))
}

pub fn rename_table(old_name: &str, new_name: &str) -> AppResult<String> {
    let old_name = ensure_ident(old_name)?;
    let new_name = ensure_ident(new_name)?;
    Ok(format!("ALTER TABLE {old_name} RENAME TO {new_name}"))
}

/// `DROP TABLE IF EXISTS`; dropping a missing table is a success.
pub fn drop_table(table: &str) -> AppResult<String> {
    let table = ensure_ident(table)?;
    Ok(format!("DROP TABLE IF EXISTS {table}"))
}

pub fn add_column(table: &str, column: &str, column_type: &str) -> AppResult<String> {
    let column_type = ensure_column_type(column_type)?;
    let table = ensure_ident(table)?;
    let column = ensure_ident(column)?;
    Ok(format!("ALTER TABLE {table} ADD COLUMN {column} {column_type}"))
}

pub fn rename_column(table: &str, old_name: &str, new_name: &str) -> AppResult<String> {
    let table = ensure_ident(table)?;
    let old_name = ensure_ident(old_name)?;
    let new_name = ensure_ident(new_name)?;
    Ok(format!(
        "ALTER TABLE {table} RENAME COLUMN {old_name} TO {new_name}"
    ))
}

/// `ALTER COLUMN ... TYPE`. The `USING` cast is emitted only for INTEGER and
/// BIGINT targets; other retypes rely on Postgres's own coercion.
pub fn alter_column_type(table: &str, column: &str, new_type: &str) -> AppResult<String> {
    let new_type = ensure_column_type(new_type)?;
    let table = ensure_ident(table)?;
    let column = ensure_ident(column)?;
    let using = match new_type {
        "INTEGER" => format!(" USING {column}::integer"),
        "BIGINT" => format!(" USING {column}::bigint"),
        _ => String::new(),
    };
    Ok(format!(
        "ALTER TABLE {table} ALTER COLUMN {column} TYPE {new_type}{using}"
    ))
}

/// `DROP COLUMN IF EXISTS`; dropping a missing column is a success.
pub fn drop_column(table: &str, column: &str) -> AppResult<String> {
    let table = ensure_ident(table)?;
    let column = ensure_ident(column)?;
    Ok(format!("ALTER TABLE {table} DROP COLUMN IF EXISTS {column}"))
}

/// Unfiltered select of every row, one JSON document per row.
pub fn select_rows(table: &str) -> AppResult<String> {
    let table = ensure_ident(table)?;
    Ok(format!("SELECT row_to_json(t.*) FROM {table} t"))
}

pub fn insert_row(table: &str, data: &RowMap) -> AppResult<(String, Vec<SqlParam>)> {
    let table = ensure_ident(table)?;
    let mut columns = Vec::with_capacity(data.len());
    let mut placeholders = Vec::with_capacity(data.len());
    let mut params = Vec::with_capacity(data.len());
    for (index, (key, value)) in data.iter().enumerate() {
        columns.push(ensure_ident(key)?);
        placeholders.push(format!("${}", index + 1));
        params.push(SqlParam::from(value));
    }
    Ok((
        format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        ),
        params,
    ))
}

pub fn update_rows(
    table: &str,
    data: &RowMap,
    filter: &RowMap,
) -> AppResult<(String, Vec<SqlParam>)> {
    let table = ensure_ident(table)?;
    let mut params = Vec::with_capacity(data.len() + filter.len());
    let mut assignments = Vec::with_capacity(data.len());
    for (key, value) in data {
        params.push(SqlParam::from(value));
        assignments.push(format!("{} = ${}", ensure_ident(key)?, params.len()));
    }
    let mut conditions = Vec::with_capacity(filter.len());
    for (key, value) in filter {
        params.push(SqlParam::from(value));
        conditions.push(format!("{} = ${}", ensure_ident(key)?, params.len()));
    }
    Ok((
        format!(
            "UPDATE {table} SET {} WHERE {}",
            assignments.join(", "),
            conditions.join(" AND ")
        ),
        params,
    ))
}

pub fn delete_rows(table: &str, filter: &RowMap) -> AppResult<(String, Vec<SqlParam>)> {
    let table = ensure_ident(table)?;
    let mut params = Vec::with_capacity(filter.len());
    let mut conditions = Vec::with_capacity(filter.len());
    for (key, value) in filter {
        params.push(SqlParam::from(value));
        conditions.push(format!("{} = ${}", ensure_ident(key)?, params.len()));
    }
    Ok((
        format!("DELETE FROM {table} WHERE {}", conditions.join(" AND ")),
        params,
    ))
}

fn ensure_column_type(column_type: &str) -> AppResult<&str> {
    if is_allowed_column_type(column_type) {
        Ok(column_type)
    } else {
        Err(AppError::Validation(format!(
            "Unsupported column type: {column_type}"
        )))
    }
}
