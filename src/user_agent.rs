//! User-Agent header generation.
//!
//! A consistent User-Agent across all SDK requests helps the backend team
//! attribute traffic and plan deprecations.

use std::sync::OnceLock;

/// SDK name used in the User-Agent string.
const SDK_NAME: &str = "eklesiakonecta-rust";

/// SDK version from Cargo.toml.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cached User-Agent string (computed once on first access).
static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string for SDK requests.
///
/// Format: `eklesiakonecta-rust/0.1.0 (rust/1.92; linux/x86_64)`
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} (rust/{}; {}/{})",
            SDK_NAME,
            SDK_VERSION,
            env!("CARGO_PKG_RUST_VERSION"),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

/// Returns a normalized OS name.
fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();
        assert!(ua.starts_with("eklesiakonecta-rust/"));
        assert!(ua.contains("rust/"));
        assert!(ua.contains(std::env::consts::ARCH));
    }

    #[test]
    fn test_user_agent_cached() {
        let ua1 = user_agent();
        let ua2 = user_agent();
        assert!(std::ptr::eq(ua1, ua2));
    }
}
