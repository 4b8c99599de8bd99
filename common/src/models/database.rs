//! Database resource models.
//!
//! Request bodies for the provisioning-backed database endpoints. List and
//! mutation responses are forwarded from the provider untouched, so only the
//! inbound shapes are typed here.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a database.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDatabaseRequest {
    /// Name of the database to create. The owner is fixed by the service.
    #[validate(
        required(message = "Missing database name"),
        length(min = 1, message = "Missing database name")
    )]
    pub name: Option<String>,
}

/// Request body for renaming a database.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameDatabaseRequest {
    /// Current name of the database.
    #[validate(
        required(message = "Missing database oldName"),
        length(min = 1, message = "Missing database oldName")
    )]
    pub old_name: Option<String>,
    /// New name. Optional; the provider validates its absence.
    pub name: Option<String>,
}

/// Request body for deleting a database.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteDatabaseRequest {
    /// Name of the database to delete.
    #[validate(
        required(message = "Missing database name"),
        length(min = 1, message = "Missing database name")
    )]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_name_fails_validation() {
        let req = CreateDatabaseRequest { name: None };
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_name_fails_validation() {
        let req = CreateDatabaseRequest {
            name: Some(String::new()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn rename_requires_old_name_only() {
        let req = RenameDatabaseRequest {
            old_name: Some("neondb".into()),
            name: None,
        };
        assert!(req.validate().is_ok());
    }
}
