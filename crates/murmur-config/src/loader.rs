use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

/// Prefix of identity public keys issued by the durable-execution runtime
pub const IDENTITY_KEY_PREFIX: &str = "publickeyv1_";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the provider or service sections are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_provider()?;
        self.validate_service()?;
        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        if self.provider.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("provider.api_key must not be empty");
        }

        if let Some(ref base_url) = self.provider.base_url {
            url::Url::parse(base_url).map_err(|e| anyhow::anyhow!("invalid provider.base_url '{base_url}': {e}"))?;
        }

        Ok(())
    }

    fn validate_service(&self) -> anyhow::Result<()> {
        if let (Some(inactivity), Some(abort)) = (self.service.inactivity_timeout, self.service.abort_timeout)
            && abort < inactivity
        {
            anyhow::bail!("service.abort_timeout must not be shorter than service.inactivity_timeout");
        }

        for key in &self.service.identity_keys {
            if !key.starts_with(IDENTITY_KEY_PREFIX) {
                anyhow::bail!("identity key '{key}' must start with '{IDENTITY_KEY_PREFIX}'");
            }
        }

        Ok(())
    }
}
