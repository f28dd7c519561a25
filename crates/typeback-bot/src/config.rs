use thiserror::Error;
use typeback_std::ReadEnv;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SLACK_API_KEY not found in environment")]
    MissingApiKey,
    #[error("Pass a username (or #channel) to annoy as first argument to program")]
    MissingTarget,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot token — used for Web API lookups and to open the RTM session.
    pub api_key: String,
    /// Raw target name. A `#` prefix marks a channel, otherwise a username.
    pub target: String,
    /// Web API base URL. Overridable via `SLACK_API_URL` for tests/proxies.
    pub api_base: String,
}

impl BotConfig {
    /// Load from the environment plus the positional program arguments
    /// (program name already stripped). Both fatal paths here happen before
    /// anything talks to the network.
    pub fn load<E: ReadEnv>(
        env: &E,
        mut args: impl Iterator<Item = String>,
    ) -> Result<Self, ConfigError> {
        let api_key = env
            .var("SLACK_API_KEY")
            .map_err(|_| ConfigError::MissingApiKey)?;
        let target = args
            .next()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingTarget)?;
        let api_base = env
            .var("SLACK_API_URL")
            .unwrap_or_else(|_| slack_rtm::api::DEFAULT_API_BASE.to_string());
        Ok(Self {
            api_key,
            target,
            api_base,
        })
    }
}
