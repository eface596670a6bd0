use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const LOCAL_CONFIG_FILE: &str = ".misspell.toml";

const CONFIG_HEADER: &str = "\
# Misspell settings.
#
# [typo] controls typographical misspelling, applied after phonological
# misspelling. Every value is a per-character probability between 0.0 and 1.0.
# delete_char, insert and replace are mutually exclusive and must not sum
# above 1.0. Inserted and replacement characters come from adjacent keys.
#
#   delete_space -- chance to delete any whitespace character
#   delete_char  -- chance to delete any non-whitespace character
#   insert       -- chance to insert an adjacent key before or after a character
#   replace      -- chance to mistype a character as an adjacent key
#   swap         -- chance to swap two compatible neighbouring characters
#
# [phono] controls phonological misspelling. delete, insert and replace are
# mutually exclusive and must not sum above 1.0. Vowels replace vowels,
# consonants replace consonants, and no edit may create a substring that the
# rule file forbids.
#
#   delete  -- chance to delete a letter or letter group
#   insert  -- chance to insert a letter or group before or after one
#   replace -- chance to replace a letter or group with another of its kind
#   group   -- chance to treat a recognised letter group (\"th\", \"qu\") as one unit
#
# blacklist lists words (case-insensitive) that must never appear in output.
# rules optionally points at a custom phonological rule file.

";

/// Typographical error probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypoConfig {
    pub delete_space: f64,
    pub delete_char: f64,
    pub insert: f64,
    pub replace: f64,
    pub swap: f64,
}

impl Default for TypoConfig {
    fn default() -> Self {
        Self {
            delete_space: 0.005,
            delete_char: 0.0075,
            insert: 0.001,
            replace: 0.0025,
            swap: 0.0075,
        }
    }
}

impl TypoConfig {
    /// All events disabled.
    pub fn disabled() -> Self {
        Self {
            delete_space: 0.0,
            delete_char: 0.0,
            insert: 0.0,
            replace: 0.0,
            swap: 0.0,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_probability("typo", "delete_space", self.delete_space)?;
        check_probability("typo", "delete_char", self.delete_char)?;
        check_probability("typo", "insert", self.insert)?;
        check_probability("typo", "replace", self.replace)?;
        check_probability("typo", "swap", self.swap)?;
        check_exclusive_sum("typo", self.delete_char + self.insert + self.replace)
    }
}

/// Phonological error probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhonoConfig {
    pub delete: f64,
    pub insert: f64,
    pub replace: f64,
    pub group: f64,
}

impl Default for PhonoConfig {
    fn default() -> Self {
        Self {
            delete: 0.0025,
            insert: 0.0025,
            replace: 0.005,
            group: 0.5,
        }
    }
}

impl PhonoConfig {
    /// All events disabled.
    pub fn disabled() -> Self {
        Self {
            delete: 0.0,
            insert: 0.0,
            replace: 0.0,
            group: 0.0,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_probability("phono", "delete", self.delete)?;
        check_probability("phono", "insert", self.insert)?;
        check_probability("phono", "replace", self.replace)?;
        check_probability("phono", "group", self.group)?;
        check_exclusive_sum("phono", self.delete + self.insert + self.replace)
    }
}

fn check_probability(
    section: &'static str,
    key: &'static str,
    value: f64,
) -> std::result::Result<(), ConfigError> {
    // NaN fails the range check too
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability {
            section,
            key,
            value,
        })
    }
}

fn check_exclusive_sum(section: &'static str, sum: f64) -> std::result::Result<(), ConfigError> {
    if sum <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::ExclusiveSumExceeded { section, sum })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub blacklist: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<PathBuf>,

    #[serde(default)]
    pub typo: TypoConfig,

    #[serde(default)]
    pub phono: PhonoConfig,
}

impl Config {
    /// Load configuration with priority: explicit path > local config > global config > defaults
    ///
    /// Missing, unreadable or invalid files never abort loading; they are
    /// reported and the defaults are kept in their place.
    pub fn load(explicit: Option<&Path>) -> Self {
        let mut layers = Vec::new();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                layers.push(global_path);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            layers.push(local_path);
        }

        if let Some(path) = explicit {
            if path.exists() {
                layers.push(path.to_path_buf());
            } else {
                warn!(
                    target: "misspell::config",
                    path = %path.display(),
                    "Config file not found, using defaults"
                );
            }
        }

        Self::from_layers(&layers)
    }

    /// Merge settings files key by key, later files winning.
    pub fn from_layers<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut merged = toml::Table::new();
        for path in paths {
            let path = path.as_ref();
            match read_layer(path) {
                Ok(layer) => {
                    debug!(
                        target: "misspell::config",
                        path = %path.display(),
                        "Loaded config file"
                    );
                    merge_tables(&mut merged, layer);
                }
                Err(e) => {
                    warn!(
                        target: "misspell::config",
                        path = %path.display(),
                        error = %format!("{:#}", e),
                        "Ignoring config file"
                    );
                }
            }
        }

        match toml::Value::Table(merged).try_into::<Self>() {
            Ok(config) => config.sanitized(),
            Err(e) => {
                warn!(target: "misspell::config", error = %e, "Using default config");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        toml::Value::Table(read_layer(path)?)
            .try_into()
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Revert every section that fails validation to its defaults.
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.typo.validate() {
            warn!(target: "misspell::config", error = %e, "Reverting [typo] to defaults");
            self.typo = TypoConfig::default();
        }
        if let Err(e) = self.phono.validate() {
            warn!(target: "misspell::config", error = %e, "Reverting [phono] to defaults");
            self.phono = PhonoConfig::default();
        }
        self.blacklist.retain(|word| !word.is_empty());
        self
    }

    /// Render this configuration as a commented TOML document.
    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string_pretty(self).context("Failed to serialize config")?;
        Ok(format!("{}{}", CONFIG_HEADER, body))
    }

    /// Write the default configuration to `path`, creating parent directories.
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        let contents = Self::default().to_toml()?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "misspell").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Read one settings file as a raw table, resolving a relative `rules` path
/// against the file's directory.
fn read_layer(path: &Path) -> Result<toml::Table> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut table: toml::Table = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    // Reject ill-typed files whole so they cannot poison the merge
    toml::Value::Table(table.clone())
        .try_into::<Config>()
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    if let (Some(toml::Value::String(rules)), Some(parent)) =
        (table.get_mut("rules"), path.parent())
    {
        if Path::new(rules.as_str()).is_relative() {
            let resolved = parent.join(rules.as_str()).to_string_lossy().into_owned();
            *rules = resolved;
        }
    }

    Ok(table)
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.typo.delete_space, 0.005);
        assert_eq!(config.phono.replace, 0.005);
        assert!(config.blacklist.is_empty());
        assert!(config.typo.validate().is_ok());
        assert!(config.phono.validate().is_ok());
    }

    #[test]
    fn test_layers_merge_key_by_key() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(
            &global,
            "blacklist = [\"heck\"]\n[typo]\nswap = 0.5\ndelete_char = 0.2\n",
        )
        .unwrap();
        fs::write(&local, "[typo]\ninsert = 0.01\n[phono]\nreplace = 0.2\n").unwrap();

        let config = Config::from_layers(&[&global, &local]);
        assert_eq!(config.typo.swap, 0.5);
        assert_eq!(config.typo.delete_char, 0.2);
        assert_eq!(config.typo.insert, 0.01);
        assert_eq!(config.typo.replace, TypoConfig::default().replace);
        assert_eq!(config.phono.replace, 0.2);
        assert_eq!(config.blacklist, vec!["heck"]);
    }

    #[test]
    fn test_default_valued_layer_resets_earlier_one() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&global, "blacklist = [\"heck\"]\n[typo]\nswap = 0.5\n").unwrap();
        Config::write_default(&explicit).unwrap();

        let config = Config::from_layers(&[&global, &explicit]);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_ill_typed_layer_is_skipped() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let broken = dir.path().join("broken.toml");
        fs::write(&global, "[typo]\nswap = 0.5\n").unwrap();
        fs::write(&broken, "[typo]\nswap = \"often\"\n").unwrap();

        let config = Config::from_layers(&[&global, &broken]);
        assert_eq!(config.typo.swap, 0.5);
    }

    #[test]
    fn test_rules_path_relative_to_settings_file() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("conf");
        fs::create_dir_all(&nested).unwrap();
        let path = nested.join("settings.toml");
        fs::write(&path, "rules = \"my_rules.toml\"\n").unwrap();

        let config = Config::from_layers(&[&path]);
        assert_eq!(config.rules, Some(nested.join("my_rules.toml")));

        let absolute = dir.path().join("elsewhere.toml");
        fs::write(&path, format!("rules = {:?}\n", absolute.display().to_string())).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().rules, Some(absolute));
    }

    #[test]
    fn test_out_of_range_probability() {
        let typo = TypoConfig {
            swap: 1.5,
            ..Default::default()
        };
        assert_eq!(
            typo.validate(),
            Err(ConfigError::InvalidProbability {
                section: "typo",
                key: "swap",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_exclusive_sum_reverts_to_defaults() {
        let config = Config {
            phono: PhonoConfig {
                delete: 0.5,
                insert: 0.4,
                replace: 0.3,
                group: 0.1,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.phono.validate(),
            Err(ConfigError::ExclusiveSumExceeded { section: "phono", .. })
        ));
        assert_eq!(config.sanitized().phono, PhonoConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "blacklist = [\"darn\"]\n[typo]\nswap = 0.25\n").unwrap();

        let config = Config::load(Some(&path));
        assert_eq!(config.typo.swap, 0.25);
        assert_eq!(config.typo.delete_char, TypoConfig::default().delete_char);
        assert_eq!(config.phono, PhonoConfig::default());
        assert_eq!(config.blacklist, vec!["darn"]);
    }

    #[test]
    fn test_unparsable_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[typo\nswap = ").unwrap();

        let config = Config::load(Some(&path));
        assert_eq!(config.typo, TypoConfig::default());
    }

    #[test]
    fn test_write_default_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        Config::write_default(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# Misspell settings."));
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }
}
