//! SQL identifier quoting.
//!
//! Table and column names arrive from the client and are spliced into DDL
//! text (identifiers cannot be parameter-bound). Quoting doubles embedded
//! `"` characters; empty names are rejected before any statement is built.

use crate::errors::{AppError, AppResult};

/// Quotes an identifier for safe inclusion in statement text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Validates and quotes an identifier.
///
/// # Errors
/// Returns `AppError::Validation` for empty names and names containing a
/// NUL byte (Postgres rejects both; failing early keeps the message clear).
pub fn ensure_ident(name: &str) -> AppResult<String> {
    if name.is_empty() {
        return Err(AppError::Validation("Empty identifier".into()));
    }
    if name.contains('\0') {
        return Err(AppError::Validation(format!(
            "Invalid identifier: {name:?}"
        )));
    }
    Ok(quote_ident(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_identifier() {
        assert_eq!(quote_ident("users"), "\"users\"");
    }

    #[test]
    fn doubles_embedded_quotes() {
        assert_eq!(
            quote_ident("us\"; DROP TABLE x; --"),
            "\"us\"\"; DROP TABLE x; --\""
        );
    }

    #[test]
    fn rejects_empty_identifier() {
        assert!(ensure_ident("").is_err());
        assert!(ensure_ident("users").is_ok());
    }
}
