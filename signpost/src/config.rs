//! Configuration for Signpost.
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;

/// Signpost - content gateway for the UISN volunteer network site
#[derive(Parser, Debug, Clone)]
#[command(name = "signpost")]
#[command(about = "CMS content gateway and form sink for the volunteer network site")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "signpost")]
    pub mongodb_db: String,

    /// Admin username for the dashboard login
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Admin password in PHC (argon2) hash form. Preferred in production.
    #[arg(long, env = "ADMIN_PASSWORD_HASH")]
    pub admin_password_hash: Option<String>,

    /// Admin password in plaintext. Dev-mode convenience; ignored when a
    /// hash is configured.
    #[arg(long, env = "ADMIN_PASSWORD")]
    pub admin_password: Option<String>,

    /// Enable development mode (in-memory store fallback when MongoDB is
    /// unreachable, plaintext admin password allowed)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Skip seeding default content on startup
    #[arg(long, env = "SKIP_SEED", default_value = "false")]
    pub skip_seed: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration consistency.
    pub fn validate(&self) -> Result<(), String> {
        if self.admin_password_hash.is_none() && self.admin_password.is_none() {
            return Err(
                "No admin credential configured: set ADMIN_PASSWORD_HASH (or ADMIN_PASSWORD in dev)"
                    .to_string(),
            );
        }

        if !self.dev_mode && self.admin_password_hash.is_none() {
            return Err(
                "Plaintext ADMIN_PASSWORD is only allowed with --dev-mode; set ADMIN_PASSWORD_HASH"
                    .to_string(),
            );
        }

        if let Some(hash) = &self.admin_password_hash {
            if !hash.starts_with("$argon2") {
                return Err("ADMIN_PASSWORD_HASH is not an argon2 PHC string".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            listen: "127.0.0.1:8080".parse().unwrap(),
            mongodb_uri: "mongodb://localhost:27017".into(),
            mongodb_db: "signpost".into(),
            admin_username: "admin".into(),
            admin_password_hash: None,
            admin_password: None,
            dev_mode: false,
            skip_seed: false,
            log_level: "info".into(),
        }
    }

    #[test]
    fn missing_credential_is_rejected() {
        assert!(base_args().validate().is_err());
    }

    #[test]
    fn plaintext_password_requires_dev_mode() {
        let mut args = base_args();
        args.admin_password = Some("uisn2026".into());
        assert!(args.validate().is_err());

        args.dev_mode = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn hash_must_be_phc_format() {
        let mut args = base_args();
        args.admin_password_hash = Some("not-a-hash".into());
        assert!(args.validate().is_err());

        args.admin_password_hash =
            Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$AAAAAAAAAAA".into());
        assert!(args.validate().is_ok());
    }
}
