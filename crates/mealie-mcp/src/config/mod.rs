//! Configuration resolution: connection settings and tool profile.

/// Environment variable naming the Mealie instance URL.
pub const ENV_URL: &str = "MEALIE_URL";

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "MEALIE_API_TOKEN";

/// Environment variable selecting the tool profile.
pub const ENV_PROFILE: &str = "MEALIE_MCP_PROFILE";

const DEFAULT_URL: &str = "http://localhost:9000";

/// A named subset of the exposed tools.
///
/// `core` covers day-to-day recipe/shopping/ingredient workflows; `full`
/// additionally exposes label management and the category/tag helper
/// lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Profile {
    Core,
    #[default]
    Full,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Core => "core",
            Profile::Full => "full",
        }
    }

    /// Parse a profile name; anything unrecognized falls back to `full`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "core" => Profile::Core,
            "full" => Profile::Full,
            other => {
                if !other.is_empty() {
                    tracing::warn!("Unknown profile {other:?}, falling back to full");
                }
                Profile::Full
            }
        }
    }
}

/// Resolve the Mealie base URL: explicit flag, then environment, then the
/// local default.
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }
    std::env::var(ENV_URL).unwrap_or_else(|_| DEFAULT_URL.to_string())
}

/// Resolve the API token: explicit flag, then environment. The client
/// rejects an empty token at construction.
pub fn resolve_token(explicit: Option<&str>) -> String {
    if let Some(token) = explicit {
        return token.to_string();
    }
    std::env::var(ENV_TOKEN).unwrap_or_default()
}

/// Resolve the tool profile: explicit flag, then environment, then `full`.
pub fn resolve_profile(explicit: Option<Profile>) -> Profile {
    if let Some(profile) = explicit {
        return profile;
    }
    match std::env::var(ENV_PROFILE) {
        Ok(value) => Profile::parse_lenient(&value),
        Err(_) => Profile::Full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_profile_falls_back_to_full() {
        assert_eq!(Profile::parse_lenient("core"), Profile::Core);
        assert_eq!(Profile::parse_lenient("FULL"), Profile::Full);
        assert_eq!(Profile::parse_lenient("banana"), Profile::Full);
        assert_eq!(Profile::parse_lenient(""), Profile::Full);
    }

    #[test]
    fn explicit_url_wins() {
        assert_eq!(
            resolve_base_url(Some("http://mealie.internal")),
            "http://mealie.internal"
        );
    }
}
