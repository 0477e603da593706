use crate::config::AdminConfig;

/// Verify a submitted username/password pair against the configured
/// admin identity. Exact string comparison only; there is a single
/// operator and no account system behind this.
pub fn verify(admin: &AdminConfig, username: &str, password: &str) -> bool {
    username == admin.username && password == admin.password
}
