/// Configuration system for bugdash.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::BugdashConfig::default()`]
/// 2. **User global config**: `~/.bugdash/config.toml`
/// 3. **Project local config**: `.bugdash.toml` in the current working directory
/// 4. **Environment variables**: `BUGDASH_*` overrides (highest precedence)
///
/// Later layers override earlier ones at the key level. Keys a TOML file
/// does not mention keep the previous layer's value.
///
/// # Usage
///
/// ```rust,ignore
/// use bugdash::config;
///
/// let cfg = config::load();
/// let client = bugdash::api::BugClient::from_config(&cfg);
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::BugdashConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved bugdash configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> BugdashConfig {
    let mut config = load_files(&[global_config_path(), project_config_path()]);
    apply_env_overrides(&mut config);
    config
}

/// Merge the given TOML files over the built-in defaults.
///
/// Missing or malformed files are skipped; a bad project file never stops
/// the dashboard from starting.
fn load_files(paths: &[Option<PathBuf>]) -> BugdashConfig {
    let Ok(mut merged) = toml::Value::try_from(BugdashConfig::default()) else {
        return BugdashConfig::default();
    };

    for path in paths {
        if let Some(layer) = load_toml_value(path.as_ref()) {
            merge_values(&mut merged, layer);
        }
    }

    merged.try_into().unwrap_or_default()
}

/// Read a TOML file as an untyped value tree.
fn load_toml_value(path: Option<&PathBuf>) -> Option<toml::Value> {
    let content = fs::read_to_string(path?).ok()?;
    toml::from_str(&content).ok()
}

/// Overlay `layer` onto `base`: tables merge key by key, anything else
/// replaces the base value.
fn merge_values(base: &mut toml::Value, layer: toml::Value) {
    match (base, layer) {
        (toml::Value::Table(base_table), toml::Value::Table(layer_table)) => {
            for (key, value) in layer_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.bugdash/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bugdash").join("config.toml"))
}

/// Path to the project local config: `.bugdash.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".bugdash.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `BUGDASH_API_URL`: bug-service base URL
/// - `BUGDASH_AI_URL`: AI-service base URL (absolute, or a bare path)
/// - `BUGDASH_TIMEOUT_MS`: request timeout, `0` for none
/// - `BUGDASH_ADDR`: listen address for `bugdash serve`
/// - `BUGDASH_OPEN_BROWSER`: open the browser on start (`1`/`true`/`yes`/`on`)
/// - `BUGDASH_REQUEST_LOG`: enable the JSONL request log
fn apply_env_overrides(config: &mut BugdashConfig) {
    if let Ok(val) = std::env::var("BUGDASH_API_URL")
        && !val.is_empty()
    {
        config.service.api_url = val;
    }
    if let Ok(val) = std::env::var("BUGDASH_AI_URL")
        && !val.is_empty()
    {
        config.service.ai_url = val;
    }
    if let Ok(val) = std::env::var("BUGDASH_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.service.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("BUGDASH_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Ok(val) = std::env::var("BUGDASH_OPEN_BROWSER") {
        config.web.open_browser = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("BUGDASH_REQUEST_LOG") {
        config.logging.request_log = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.bugdash/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.bugdash/ directory")?;
    }

    fs::write(&path, BugdashConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Supports dotted keys like `service.api_url`. The value is parsed to the
/// type of the key's current (or default) value.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        toml::Value::try_from(BugdashConfig::default())
            .context("failed to serialize default config")?
    };

    // Keys missing from a hand-trimmed file still resolve against defaults.
    let mut full = toml::Value::try_from(BugdashConfig::default())
        .context("failed to serialize default config")?;
    merge_values(&mut full, root.clone());
    set_toml_value(&mut full, key, value)?;
    let typed = lookup(&full, key).cloned().context("config key vanished")?;
    insert_path(&mut root, key, typed)?;

    // Reject values that no longer deserialize into the schema.
    let _: BugdashConfig = full
        .try_into()
        .with_context(|| format!("invalid value for '{key}': {value}"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The key must already exist; its current type decides how `raw_value` is
/// parsed.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let (parents, leaf) = split_key(key)?;

    let mut current = root;
    for part in parents {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table above '{key}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("config key '{key}' is not a scalar"),
        None => anyhow::bail!("config key not found: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

fn split_key(key: &str) -> Result<(Vec<&str>, &str)> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts.pop().filter(|p| !p.is_empty());
    match leaf {
        Some(leaf) => Ok((parts, leaf)),
        None => anyhow::bail!("empty config key"),
    }
}

fn lookup<'a>(root: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.').try_fold(root, |node, part| node.get(part))
}

/// Insert `value` at a dotted key, creating intermediate tables.
fn insert_path(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = split_key(key)?;
    let mut current = root;
    for part in parents {
        let table = current
            .as_table_mut()
            .with_context(|| format!("expected table above '{key}'"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }
    current
        .as_table_mut()
        .with_context(|| format!("expected table above '{key}'"))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bugdash-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn is_truthy_accepts_variants() {
        for yes in ["1", "true", "TRUE", "yes", "On"] {
            assert!(is_truthy(yes), "{yes}");
        }
        for no in ["0", "false", "no", "off", ""] {
            assert!(!is_truthy(no), "{no}");
        }
    }

    #[test]
    fn later_files_override_earlier_ones_per_key() {
        let global = write_temp(
            "global.toml",
            r#"
[service]
api_url = "http://global:8080"
timeout_ms = 2500
"#,
        );
        let project = write_temp(
            "project.toml",
            r#"
[service]
api_url = "http://project:8080"
"#,
        );

        let config = load_files(&[Some(global), Some(project)]);
        assert_eq!(config.service.api_url, "http://project:8080");
        assert_eq!(config.service.timeout_ms, 2500);
        assert_eq!(config.service.ai_url, schema::DEFAULT_AI_URL);
    }

    #[test]
    fn malformed_and_missing_files_are_ignored() {
        let broken = write_temp("broken.toml", "[service\napi_url = ");
        let missing = PathBuf::from("/definitely/not/here.toml");
        let config = load_files(&[Some(broken), Some(missing), None]);
        assert_eq!(config, BugdashConfig::default());
    }

    #[test]
    fn set_toml_value_preserves_types() {
        let mut root = toml::Value::try_from(BugdashConfig::default()).unwrap();
        set_toml_value(&mut root, "service.timeout_ms", "1500").unwrap();
        set_toml_value(&mut root, "web.open_browser", "off").unwrap();
        set_toml_value(&mut root, "service.ai_url", "/ai").unwrap();

        let config: BugdashConfig = root.try_into().unwrap();
        assert_eq!(config.service.timeout_ms, 1500);
        assert!(!config.web.open_browser);
        assert_eq!(config.service.ai_url, "/ai");
    }

    #[test]
    fn set_toml_value_rejects_bad_input() {
        let mut root = toml::Value::try_from(BugdashConfig::default()).unwrap();
        assert!(set_toml_value(&mut root, "service.timeout_ms", "soon").is_err());
        assert!(set_toml_value(&mut root, "nonexistent.key", "value").is_err());
        assert!(set_toml_value(&mut root, "service.nope", "value").is_err());
        assert!(set_toml_value(&mut root, "", "value").is_err());
    }

    #[test]
    fn insert_path_creates_missing_sections() {
        let mut root = toml::Value::Table(toml::map::Map::new());
        insert_path(
            &mut root,
            "web.addr",
            toml::Value::String("0.0.0.0:80".into()),
        )
        .unwrap();
        assert_eq!(
            lookup(&root, "web.addr").and_then(|v| v.as_str()),
            Some("0.0.0.0:80")
        );
    }

    #[test]
    fn show_effective_config_round_trips() {
        let toml_str = show_effective_config().unwrap();
        let _: BugdashConfig = toml::from_str(&toml_str).unwrap();
    }
}
