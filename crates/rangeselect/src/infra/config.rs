//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

/// Layered configuration loaded from built-in defaults, the user config
/// file, and environment overrides. Builder options win over all layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub keybindings: Keybindings,
    #[serde(default)]
    pub glyphs: Glyphs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "Defaults::default_page_size")]
    pub page_size: usize,
    #[serde(default = "Defaults::default_show_help")]
    pub show_help: bool,
}

impl Defaults {
    fn default_page_size() -> usize {
        10
    }

    fn default_show_help() -> bool {
        true
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            page_size: Self::default_page_size(),
            show_help: Self::default_show_help(),
        }
    }
}

/// Extra key characters accepted beside the hard-wired arrow keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybindings {
    #[serde(default = "Keybindings::default_up")]
    pub up: String,
    #[serde(default = "Keybindings::default_down")]
    pub down: String,
    #[serde(default = "Keybindings::default_select_all")]
    pub select_all: String,
}

impl Keybindings {
    fn default_up() -> String {
        "k".into()
    }

    fn default_down() -> String {
        "j".into()
    }

    fn default_select_all() -> String {
        "a".into()
    }
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: Self::default_up(),
            down: Self::default_down(),
            select_all: Self::default_select_all(),
        }
    }
}

/// Glyphs used by the renderer for the pointer and range brackets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    #[serde(default = "Glyphs::default_pointer")]
    pub pointer: String,
    #[serde(default = "Glyphs::default_bracket_single")]
    pub bracket_single: String,
    #[serde(default = "Glyphs::default_bracket_open")]
    pub bracket_open: String,
    #[serde(default = "Glyphs::default_bracket_mid")]
    pub bracket_mid: String,
    #[serde(default = "Glyphs::default_bracket_close")]
    pub bracket_close: String,
    #[serde(default = "Glyphs::default_disabled_marker")]
    pub disabled_marker: String,
}

impl Glyphs {
    fn default_pointer() -> String {
        "❯".into()
    }

    fn default_bracket_single() -> String {
        "[".into()
    }

    fn default_bracket_open() -> String {
        "⎡".into()
    }

    fn default_bracket_mid() -> String {
        "⎢".into()
    }

    fn default_bracket_close() -> String {
        "⎣".into()
    }

    fn default_disabled_marker() -> String {
        "-".into()
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            pointer: Self::default_pointer(),
            bracket_single: Self::default_bracket_single(),
            bracket_open: Self::default_bracket_open(),
            bracket_mid: Self::default_bracket_mid(),
            bracket_close: Self::default_bracket_close(),
            disabled_marker: Self::default_disabled_marker(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    page_size: Option<usize>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            page_size: env::var("RANGESELECT_PAGE_SIZE")
                .ok()
                .and_then(|raw| raw.parse().ok()),
        }
    }

    #[cfg(test)]
    fn for_tests(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
        }
    }
}

impl Config {
    /// Load configuration from built-in defaults, the user config file, and
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_with_layers(user_config_path(), EnvOverrides::from_env())
    }

    fn load_with_layers(user: Option<PathBuf>, env_overrides: EnvOverrides) -> Result<Self> {
        let mut config = Self::from_str(&DEFAULT_CONFIG)?;

        if let Some(user_path) = user.filter(|path| path.exists()) {
            config = config.merge(Self::from_file(&user_path)?);
        }

        Ok(apply_env_overrides(config, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, overlay: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, overlay.defaults),
            keybindings: merge_keybindings(self.keybindings, overlay.keybindings),
            glyphs: merge_glyphs(self.glyphs, overlay.glyphs),
        }
    }
}

fn merge_defaults(base: Defaults, overlay: Defaults) -> Defaults {
    Defaults {
        page_size: if overlay.page_size != Defaults::default_page_size() {
            overlay.page_size
        } else {
            base.page_size
        },
        show_help: if overlay.show_help != Defaults::default_show_help() {
            overlay.show_help
        } else {
            base.show_help
        },
    }
}

fn merge_keybindings(base: Keybindings, overlay: Keybindings) -> Keybindings {
    Keybindings {
        up: choose(base.up, overlay.up, Keybindings::default_up),
        down: choose(base.down, overlay.down, Keybindings::default_down),
        select_all: choose(
            base.select_all,
            overlay.select_all,
            Keybindings::default_select_all,
        ),
    }
}

fn merge_glyphs(base: Glyphs, overlay: Glyphs) -> Glyphs {
    Glyphs {
        pointer: choose(base.pointer, overlay.pointer, Glyphs::default_pointer),
        bracket_single: choose(
            base.bracket_single,
            overlay.bracket_single,
            Glyphs::default_bracket_single,
        ),
        bracket_open: choose(
            base.bracket_open,
            overlay.bracket_open,
            Glyphs::default_bracket_open,
        ),
        bracket_mid: choose(
            base.bracket_mid,
            overlay.bracket_mid,
            Glyphs::default_bracket_mid,
        ),
        bracket_close: choose(
            base.bracket_close,
            overlay.bracket_close,
            Glyphs::default_bracket_close,
        ),
        disabled_marker: choose(
            base.disabled_marker,
            overlay.disabled_marker,
            Glyphs::default_disabled_marker,
        ),
    }
}

fn choose(base: String, overlay: String, default_fn: fn() -> String) -> String {
    if overlay != default_fn() { overlay } else { base }
}

fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("rangeselect/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(page_size) = env.page_size {
        config.defaults.page_size = page_size;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.defaults.page_size, 10);
        assert_eq!(config.keybindings.select_all, "a");
        assert_eq!(config.glyphs.pointer, "❯");
    }

    #[test]
    fn user_file_overrides_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let user = temp.path().join("config.toml");
        fs::write(
            &user,
            r#"
[defaults]
page_size = 4
[keybindings]
select_all = "*"
[glyphs]
pointer = ">"
"#,
        )?;

        let config = Config::load_with_layers(Some(user), EnvOverrides::default())?;
        assert_eq!(config.defaults.page_size, 4);
        assert_eq!(config.keybindings.select_all, "*");
        assert_eq!(config.glyphs.pointer, ">");
        // Untouched sections keep their built-in values.
        assert_eq!(config.keybindings.up, "k");
        assert_eq!(config.glyphs.bracket_mid, "⎢");
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let config = Config::load_with_layers(None, EnvOverrides::for_tests(3))?;
        assert_eq!(config.defaults.page_size, 3);
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
