use std::path::PathBuf;

use crate::auth::password::hash_password;

/// Credentials accepted by the admin bootstrap login.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory that holds uploaded photos.
    pub upload_dir: PathBuf,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
    /// Lifetime of a login session in days.
    pub session_expiry_days: i64,
    pub admin: AdminCredentials,
    /// OAuth client id Google ID tokens must be issued for. Empty disables
    /// Google login.
    pub google_client_id: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `UPLOAD_DIR`           | `storage/uploads`                |
    /// | `MAX_UPLOAD_BYTES`     | `16777216`                       |
    /// | `SESSION_EXPIRY_DAYS`  | `7`                              |
    /// | `ADMIN_EMAIL`          | `admin@euindicocabreuva.com.br`  |
    /// | `ADMIN_PASSWORD_HASH`  | unset                            |
    /// | `ADMIN_PASSWORD`       | `admin123` (used when no hash)   |
    /// | `GOOGLE_CLIENT_ID`     | empty                            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "storage/uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "16777216".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let session_expiry_days: i64 = std::env::var("SESSION_EXPIRY_DAYS")
            .unwrap_or_else(|_| "7".into())
            .parse()
            .expect("SESSION_EXPIRY_DAYS must be a valid i64");

        let admin_email = std::env::var("ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@euindicocabreuva.com.br".into());

        let admin_password_hash = match std::env::var("ADMIN_PASSWORD_HASH") {
            Ok(hash) if !hash.is_empty() => hash,
            _ => {
                let password =
                    std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
                hash_password(&password).expect("Failed to hash ADMIN_PASSWORD")
            }
        };

        let google_client_id = std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
            session_expiry_days,
            admin: AdminCredentials {
                email: admin_email,
                password_hash: admin_password_hash,
            },
            google_client_id,
        }
    }
}
