use super::{types::Config, ConfigError};
use crate::resolver::KEY_MODULUS;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Rebrickable API key is set and the timeout is not 0
/// - Default set id lies inside the identifier space
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Rebrickable validation
    if config.rebrickable.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "rebrickable.api_key is required".to_string(),
        ));
    }
    if config.rebrickable.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "rebrickable.timeout_secs cannot be 0".to_string(),
        ));
    }

    // Resolver validation
    let id = config.resolver.default_set_id;
    if id <= 0 || id >= KEY_MODULUS {
        return Err(ConfigError::ValidationError(format!(
            "resolver.default_set_id must be between 1 and {}, got {}",
            KEY_MODULUS - 1,
            id
        )));
    }

    Ok(())
}
