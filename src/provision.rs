//! Account provisioning against the target database.
//!
//! `create_users` issues one `createUser` command per fixed account, in
//! order, and stops at the first server error. There is no retry and no
//! idempotence: re-running against an already-provisioned database fails on
//! the duplicate-user condition, with any accounts created before the
//! failure left in place.

use mongodb::bson::{doc, Document};
use mongodb::Database;

use crate::models::UserSpec;
use crate::output;

/// The fixed accounts, in creation order.
///
/// The administrative account is always scoped to the `admin` database;
/// the application and read-only accounts are scoped to the target.
pub fn user_specs(target_db: &str) -> Vec<UserSpec> {
    vec![
        UserSpec {
            username: "admin_user",
            password: "admin_password",
            role: "root",
            role_db: "admin".to_string(),
        },
        UserSpec {
            username: "app_user",
            password: "app_password",
            role: "readWrite",
            role_db: target_db.to_string(),
        },
        UserSpec {
            username: "readonly_user",
            password: "readonly_password",
            role: "read",
            role_db: target_db.to_string(),
        },
    ]
}

/// Build the `createUser` command document for one account.
pub fn create_user_command(spec: &UserSpec) -> Document {
    doc! {
        "createUser": spec.username,
        "pwd": spec.password,
        "roles": [
            { "role": spec.role, "db": spec.role_db.as_str() }
        ],
    }
}

/// Create the fixed accounts sequentially, awaiting each acknowledgement
/// before issuing the next. Server errors propagate unchanged.
pub async fn create_users(db: &Database, specs: &[UserSpec]) -> mongodb::error::Result<()> {
    for spec in specs {
        tracing::info!(user = spec.username, role = spec.role, scope = %spec.role_db, "Creating database user");
        output::status(format!(
            "Creating user '{}' with role {}@{}...",
            spec.username, spec.role, spec.role_db
        ));
        db.run_command(create_user_command(spec)).await?;
    }
    Ok(())
}

/// One account from `usersInfo`, flattened for table display.
#[derive(Debug)]
pub struct UserListing {
    pub username: String,
    pub roles: Vec<String>,
}

/// Fetch the accounts defined on the target database via `usersInfo`.
/// Role bindings are rendered as `role@db`.
pub async fn list_users(db: &Database) -> mongodb::error::Result<Vec<UserListing>> {
    let reply = db.run_command(doc! { "usersInfo": 1 }).await?;
    let mut listings = Vec::new();
    if let Ok(users) = reply.get_array("users") {
        for user in users {
            let Some(user) = user.as_document() else {
                continue;
            };
            let username = user.get_str("user").unwrap_or_default().to_string();
            let mut roles = Vec::new();
            if let Ok(bindings) = user.get_array("roles") {
                for binding in bindings {
                    if let Some(binding) = binding.as_document() {
                        roles.push(format!(
                            "{}@{}",
                            binding.get_str("role").unwrap_or_default(),
                            binding.get_str("db").unwrap_or_default()
                        ));
                    }
                }
            }
            listings.push(UserListing { username, roles });
        }
    }
    Ok(listings)
}
