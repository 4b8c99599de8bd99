//! Postgres type display mapping.
//!
//! Fixed lookup from `information_schema` catalog type names to the labels
//! the console shows, plus the allow-list of types a column may be created
//! with or altered to.

/// Label shown for catalog types outside the fixed map.
pub const UNKNOWN_TYPE_LABEL: &str = "UNKNOWN";

/// Column types the console accepts in ADD COLUMN / ALTER COLUMN TYPE.
pub const ALLOWED_COLUMN_TYPES: [&str; 8] = [
    "TEXT",
    "VARCHAR(255)",
    "INTEGER",
    "BIGINT",
    "DECIMAL",
    "DATE",
    "TIMESTAMP",
    "JSONB",
];

/// Maps a catalog type name to its display label.
pub fn display_label(catalog_type: &str) -> &'static str {
    match catalog_type {
        "integer" => "INTEGER",
        "bigint" => "BIGINT",
        "numeric" => "DECIMAL",
        "text" => "TEXT",
        "character varying" => "VARCHAR(255)",
        "date" => "DATE",
        "timestamp without time zone" => "TIMESTAMP",
        "jsonb" => "JSONB",
        _ => UNKNOWN_TYPE_LABEL,
    }
}

/// Checks a requested column type against the allow-list.
pub fn is_allowed_column_type(column_type: &str) -> bool {
    ALLOWED_COLUMN_TYPES.contains(&column_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_all_known_catalog_types() {
        assert_eq!(display_label("integer"), "INTEGER");
        assert_eq!(display_label("bigint"), "BIGINT");
        assert_eq!(display_label("numeric"), "DECIMAL");
        assert_eq!(display_label("text"), "TEXT");
        assert_eq!(display_label("character varying"), "VARCHAR(255)");
        assert_eq!(display_label("date"), "DATE");
        assert_eq!(display_label("timestamp without time zone"), "TIMESTAMP");
        assert_eq!(display_label("jsonb"), "JSONB");
    }

    #[test]
    fn unmapped_type_falls_back_to_unknown() {
        assert_eq!(display_label("uuid"), UNKNOWN_TYPE_LABEL);
        assert_eq!(display_label("serial"), UNKNOWN_TYPE_LABEL);
    }

    #[test]
    fn allow_list_is_exact() {
        assert!(is_allowed_column_type("VARCHAR(255)"));
        assert!(!is_allowed_column_type("varchar(255)"));
        assert!(!is_allowed_column_type("TEXT; DROP TABLE users"));
    }
}
