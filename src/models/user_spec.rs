/// A fixed database account provisioned by `init-users`.
///
/// Username, password and role name are compiled in; only the role scope
/// varies with the configured target database.
#[derive(Debug, Clone)]
pub struct UserSpec {
    pub username: &'static str,
    pub password: &'static str,
    pub role: &'static str,
    pub role_db: String,
}
