// Configuration loading and parsing (advisor.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use pickwise_core::catalog::Role;
use pickwise_core::engine::{PhaseMode, Settings, Strictness};
use serde::Deserialize;
use thiserror::Error;

use crate::sources::catalog::CatalogSource;

/// File name of the advisor config under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "advisor.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
    /// Initial engine settings; the user can change them at runtime.
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub source: CatalogSource,
    /// Replacement curated table. `None` uses the embedded one.
    pub curated_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub enabled: bool,
    pub url: String,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

// ---------------------------------------------------------------------------
// advisor.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire advisor.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AdvisorFile {
    catalog: CatalogSection,
    session: SessionSection,
    advisor: AdvisorSection,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogSection {
    source: String,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    curated_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SessionSection {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    url: String,
    poll_interval_ms: u64,
    timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct AdvisorSection {
    #[serde(default = "default_strictness")]
    strictness: String,
    #[serde(default = "default_phase")]
    phase: String,
    #[serde(default = "default_role")]
    role: String,
}

fn default_strictness() -> String {
    "normal".into()
}

fn default_phase() -> String {
    "auto".into()
}

fn default_role() -> String {
    "any".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/advisor.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Parse and validate advisor.toml text. `path` is only used in errors.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: AdvisorFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(file)
}

/// Copy `defaults/advisor.toml` to `config/advisor.toml` unless the user
/// already has one. Returns the written path, or `None` when nothing was
/// copied.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {} or defaults/{} in {}",
                target.display(),
                CONFIG_FILE,
                base_dir.display()
            ),
        });
    }

    let copy_err = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", source.display()),
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(copy_err)?;
    }
    std::fs::copy(&source, &target).map_err(copy_err)?;
    Ok(Some(target))
}

/// Loads config relative to the current working directory, copying
/// defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(path) = ensure_config_file(&cwd)? {
        tracing::info!("Copied default config to {}", path.display());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(file: AdvisorFile) -> Result<Config, ConfigError> {
    // Catalog
    let source = match file.catalog.source.trim().to_ascii_lowercase().as_str() {
        "ddragon" => {
            let base_url = non_blank(file.catalog.base_url)
                .ok_or_else(|| invalid("catalog.base_url", "required when source = \"ddragon\""))?;
            CatalogSource::DataDragon {
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }
        "file" => {
            let path = non_blank(file.catalog.path)
                .ok_or_else(|| invalid("catalog.path", "required when source = \"file\""))?;
            CatalogSource::File {
                path: PathBuf::from(path),
            }
        }
        "curated" => CatalogSource::CuratedOnly,
        other => {
            return Err(invalid(
                "catalog.source",
                format!("expected \"ddragon\", \"file\" or \"curated\", got \"{other}\""),
            ))
        }
    };
    let curated_path = non_blank(file.catalog.curated_path).map(PathBuf::from);

    // Session
    let session = file.session;
    if session.poll_interval_ms == 0 {
        return Err(invalid("session.poll_interval_ms", "must be > 0"));
    }
    if session.timeout_ms == 0 {
        return Err(invalid("session.timeout_ms", "must be > 0"));
    }
    if session.enabled && session.url.trim().is_empty() {
        return Err(invalid("session.url", "required when session.enabled = true"));
    }

    // Advisor
    let advisor = file.advisor;
    let strictness = Strictness::parse(&advisor.strictness).ok_or_else(|| {
        invalid(
            "advisor.strictness",
            format!("expected strict, normal or loose, got \"{}\"", advisor.strictness),
        )
    })?;
    let phase = PhaseMode::parse(&advisor.phase).ok_or_else(|| {
        invalid(
            "advisor.phase",
            format!("expected auto, early, mid or last, got \"{}\"", advisor.phase),
        )
    })?;
    let role = Role::from_str_role(&advisor.role).ok_or_else(|| {
        invalid(
            "advisor.role",
            format!("unknown role \"{}\"", advisor.role),
        )
    })?;

    Ok(Config {
        catalog: CatalogConfig {
            source,
            curated_path,
        },
        session: SessionConfig {
            enabled: session.enabled,
            url: session.url.trim().to_string(),
            poll_interval: Duration::from_millis(session.poll_interval_ms),
            timeout: Duration::from_millis(session.timeout_ms),
        },
        settings: Settings {
            phase,
            strictness,
            role,
        },
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pickwise_core::engine::DraftPhase;
    use std::fs;

    /// Repository root holding `defaults/`, whether tests run from the crate
    /// directory or the workspace root.
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        cwd.ancestors()
            .find(|dir| dir.join("defaults").join(CONFIG_FILE).exists())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("Cannot locate defaults/ directory from CWD {:?}", cwd))
    }

    fn fresh_dir(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    const VALID: &str = r#"
[catalog]
source = "file"
path = "data/champion.json"

[session]
enabled = false
poll_interval_ms = 2000
timeout_ms = 500

[advisor]
strictness = "loose"
phase = "last"
role = "support"
"#;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        parse_config(text, Path::new("advisor.toml"))
    }

    fn expect_field(text: &str, field: &str) {
        match parse(text) {
            Err(ConfigError::ValidationError { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected validation error for {field}, got {other:?}"),
        }
    }

    #[test]
    fn load_shipped_defaults() {
        let root = project_root();
        let text = fs::read_to_string(root.join("defaults").join(CONFIG_FILE)).unwrap();
        let config = parse(&text).expect("shipped defaults should be valid");

        assert_eq!(
            config.catalog.source,
            CatalogSource::DataDragon {
                base_url: "https://ddragon.leagueoflegends.com".into()
            }
        );
        assert!(config.catalog.curated_path.is_none());
        assert!(config.session.enabled);
        assert_eq!(config.session.url, "http://127.0.0.1:5123/lobby/champ-select");
        assert_eq!(config.session.poll_interval, Duration::from_millis(1500));
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn parses_valid_file_source() {
        let config = parse(VALID).unwrap();
        assert_eq!(
            config.catalog.source,
            CatalogSource::File {
                path: PathBuf::from("data/champion.json")
            }
        );
        assert!(!config.session.enabled);
        assert_eq!(config.session.timeout, Duration::from_millis(500));
        assert_eq!(config.settings.strictness, Strictness::Loose);
        assert_eq!(config.settings.phase, PhaseMode::Fixed(DraftPhase::Last));
        assert_eq!(config.settings.role, Role::Support);
    }

    #[test]
    fn advisor_section_defaults() {
        let text = r#"
[catalog]
source = "curated"
[session]
poll_interval_ms = 1000
timeout_ms = 1000
[advisor]
"#;
        let config = parse(text).unwrap();
        assert_eq!(config.catalog.source, CatalogSource::CuratedOnly);
        assert!(!config.session.enabled);
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn rejects_unknown_source() {
        expect_field(&VALID.replace("\"file\"", "\"ftp\""), "catalog.source");
    }

    #[test]
    fn rejects_file_source_without_path() {
        expect_field(
            &VALID.replace("path = \"data/champion.json\"", ""),
            "catalog.path",
        );
    }

    #[test]
    fn rejects_zero_poll_interval() {
        expect_field(
            &VALID.replace("poll_interval_ms = 2000", "poll_interval_ms = 0"),
            "session.poll_interval_ms",
        );
    }

    #[test]
    fn rejects_enabled_session_without_url() {
        expect_field(
            &VALID.replace("enabled = false", "enabled = true"),
            "session.url",
        );
    }

    #[test]
    fn rejects_bad_advisor_values() {
        expect_field(&VALID.replace("\"loose\"", "\"lenient\""), "advisor.strictness");
        expect_field(&VALID.replace("\"last\"", "\"late\""), "advisor.phase");
        expect_field(&VALID.replace("\"support\"", "\"goalie\""), "advisor.role");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            parse("[catalog\nsource = "),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn missing_config_file_is_not_found() {
        let tmp = fresh_dir("pickwise_config_missing");
        assert!(matches!(
            load_config_from(&tmp),
            Err(ConfigError::FileNotFound { .. })
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_copies_without_overwriting() {
        let tmp = fresh_dir("pickwise_config_copy");
        let defaults = tmp.join("defaults");
        fs::create_dir_all(&defaults).unwrap();
        fs::write(defaults.join(CONFIG_FILE), VALID).unwrap();

        let copied = ensure_config_file(&tmp).unwrap();
        assert_eq!(copied, Some(tmp.join("config").join(CONFIG_FILE)));

        // A user edit survives a second run.
        let edited = VALID.replace("\"loose\"", "\"strict\"");
        fs::write(tmp.join("config").join(CONFIG_FILE), &edited).unwrap();
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.settings.strictness, Strictness::Strict);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_keeps_user_file_without_defaults() {
        let tmp = fresh_dir("pickwise_config_user_only");
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), VALID).unwrap();
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_without_any_dirs_fails() {
        let tmp = std::env::temp_dir().join("pickwise_config_nothing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        assert!(matches!(
            ensure_config_file(&tmp),
            Err(ConfigError::DefaultsCopyError { .. })
        ));
        let _ = fs::remove_dir_all(&tmp);
    }
}
