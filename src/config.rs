use tracing::{debug, info};

pub const DEFAULT_TOOL_NAME: &str = "cd-info";
pub const DEFAULT_MUSICBRAINZ_URL: &str = "https://musicbrainz.org/ws/2/";

/// Application configuration
/// Loads a .env file when one exists, then reads the environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Program name cd-info prints in its CDDB match line
    pub tool_name: String,
    /// MusicBrainz web service root
    pub musicbrainz_url: String,
    /// User agent sent to MusicBrainz, which rejects anonymous clients
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            musicbrainz_url: DEFAULT_MUSICBRAINZ_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "disctag/{} ( https://github.com/disctag/disctag )",
        env!("CARGO_PKG_VERSION")
    )
}

impl Config {
    /// Load configuration from .env and the environment
    pub fn load() -> Self {
        if dotenvy::dotenv().is_ok() {
            info!("Config: loaded .env file");
        } else {
            debug!("Config: no .env file found, using environment");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup, ignoring blank values
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            tool_name: var("DISCTAG_TOOL_NAME").unwrap_or(defaults.tool_name),
            musicbrainz_url: var("DISCTAG_MUSICBRAINZ_URL").unwrap_or(defaults.musicbrainz_url),
            user_agent: var("DISCTAG_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}
