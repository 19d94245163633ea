use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Keys missing from the file keep their defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use mv_scout::config::load_config;
///
/// let config = load_config(Path::new("mv-scout.toml")).unwrap();
/// println!("Last page: {}", config.crawler.last_page);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Reads and parses a configuration file without validating it
///
/// Used when command-line overrides still have to be applied; the caller
/// runs `validate` on the final configuration.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    Ok(toml::from_str(&content)?)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two crawls can be matched to the configuration that
/// produced them.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Reads a configuration and returns both the config and its hash
///
/// The configuration is not validated, see `read_config`.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = read_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
base-url = "https://example.com/ranking?page="
first-page = 3
last-page = 7
max-concurrent-pages = 4
request-timeout-secs = 10
max-retries = 1
retry-delay-ms = 250

[user-agent]
value = "Mozilla/5.0 (X11; Linux x86_64)"

[output]
path = "./out/players.json"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.first_page, 3);
        assert_eq!(config.crawler.last_page, 7);
        assert_eq!(config.crawler.page_count(), 5);
        assert_eq!(config.crawler.max_concurrent_pages, 4);
        assert_eq!(config.crawler.retry_delay().as_millis(), 250);
        assert_eq!(config.user_agent.value, "Mozilla/5.0 (X11; Linux x86_64)");
        assert_eq!(config.output.path, "./out/players.json");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.first_page, 1);
        assert_eq!(config.crawler.last_page, 500);
        assert_eq!(config.crawler.max_concurrent_pages, 1);
        assert_eq!(config.output.path, "player_data.json");
        assert_eq!(config.layout.table, "#yw1 > table > tbody");
    }

    #[test]
    fn test_layout_override() {
        let config_content = r#"
[layout.age]
column = 3

[layout.nationalities]
column = 2
selector = "img.flag"
name-attribute = "alt"
flag-attribute = "data-src"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.layout.age.column, 3);
        assert_eq!(config.layout.nationalities.name_attribute, "alt");
        assert_eq!(config.layout.club.column, 4);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_unknown_key() {
        let file = create_temp_config("[crawler]\nmax-depth = 3\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
first-page = 10
last-page = 2
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_with_hash_defers_validation() {
        let file = create_temp_config("[crawler]\nfirst-page = 0\n");

        let (mut config, hash) = load_config_with_hash(file.path()).unwrap();
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());
        assert!(validate(&config).is_err());

        // An override applied after loading repairs the range
        config.crawler.first_page = 1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_load_config_with_hash_rejects_bad_toml() {
        let file = create_temp_config("[crawler\n");
        let result = load_config_with_hash(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let config_content = "test content";
        let file = create_temp_config(config_content);

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        // Same content should produce same hash
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 produces 64 hex characters
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
