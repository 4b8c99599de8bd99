//! Utility functions and helpers.

pub mod id_generator;
pub mod pg_types;
pub mod sql_ident;

// Re-export commonly used types
pub use id_generator::IdGenerator;
pub use pg_types::{display_label, is_allowed_column_type, UNKNOWN_TYPE_LABEL};
pub use sql_ident::quote_ident;
