//! Auth Config

use clap::Args;
use storefront_app::auth::{DEFAULT_SESSION_TTL_HOURS, SessionSettings};

/// Login session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Hours a login session stays valid
    #[arg(
        long,
        env = "SESSION_TTL_HOURS",
        default_value_t = DEFAULT_SESSION_TTL_HOURS,
        value_parser = clap::value_parser!(u32).range(1..=8760)
    )]
    pub session_ttl_hours: u32,
}

impl AuthConfig {
    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            ttl_hours: self.session_ttl_hours,
        }
    }
}
