use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ratatui::style::Color;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::exchange::{DEFAULT_RATE, ExchangeRate};

/// 配置文件路径环境变量
pub const CONFIG_ENV: &str = "CAMBIO_CONFIG";

const MAX_DECIMALS: u32 = 8;

/// 状态栏样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarStyle {
    #[default]
    Default,
    Dark,
    Light,
}

impl StatusBarStyle {
    /// 循环切换到下一个样式
    pub fn next(self) -> Self {
        match self {
            StatusBarStyle::Default => StatusBarStyle::Dark,
            StatusBarStyle::Dark => StatusBarStyle::Light,
            StatusBarStyle::Light => StatusBarStyle::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusBarStyle::Default => "default",
            StatusBarStyle::Dark => "dark",
            StatusBarStyle::Light => "light",
        }
    }
}

/// TOML文件结构
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigData {
    pub exchange: ExchangeSection,
    pub display: DisplaySection,
    pub status_bar: StatusBarSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExchangeSection {
    pub rate: Decimal,
    pub source: String,
    pub target: String,
}

impl Default for ExchangeSection {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            source: "GTQ".to_string(),
            target: "USD".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    pub decimals: u32,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusBarSection {
    pub style: StatusBarStyle,
    pub visible: bool,
    pub background: Option<String>,
}

impl Default for StatusBarSection {
    fn default() -> Self {
        Self {
            style: StatusBarStyle::Default,
            visible: true,
            background: None,
        }
    }
}

/// 运行时状态栏配置
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBarConfig {
    pub style: StatusBarStyle,
    pub visible: bool,
    pub background: Option<Color>,
}

/// 校验后的运行时配置
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rate: ExchangeRate,
    pub source: String,
    pub target: String,
    pub decimals: u32,
    pub status_bar: StatusBarConfig,
}

impl Config {
    pub fn from_data(data: ConfigData) -> Result<Self, ConfigError> {
        let rate = ExchangeRate::new(data.exchange.rate)?;

        if data.display.decimals > MAX_DECIMALS {
            return Err(ConfigError::Decimals(data.display.decimals));
        }

        let background = data
            .status_bar
            .background
            .map(|name| Color::from_str(&name).map_err(|_| ConfigError::InvalidColor(name)))
            .transpose()?;

        Ok(Self {
            rate,
            source: data.exchange.source,
            target: data.exchange.target,
            decimals: data.display.decimals,
            status_bar: StatusBarConfig {
                style: data.status_bar.style,
                visible: data.status_bar.visible,
                background,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rate: ExchangeRate::default(),
            source: "GTQ".to_string(),
            target: "USD".to_string(),
            decimals: 2,
            status_bar: StatusBarConfig {
                style: StatusBarStyle::Default,
                visible: true,
                background: None,
            },
        }
    }
}

/// 配置文件路径：$CAMBIO_CONFIG 或 ~/.config/cambio/config.toml
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("cambio").join("config.toml"))
}

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let data: ConfigData = toml::from_str(&content)?;

    Config::from_data(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.rate.value(), dec!(8));
        assert_eq!(config.source, "GTQ");
        assert_eq!(config.target, "USD");
    }

    #[test]
    fn test_defaults_match_data_defaults() {
        let config = Config::from_data(ConfigData::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
[exchange]
rate = "7.75"
source = "MXN"
target = "EUR"

[display]
decimals = 4

[status_bar]
style = "dark"
visible = false
background = "blue"
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.rate.value(), dec!(7.75));
        assert_eq!(config.source, "MXN");
        assert_eq!(config.target, "EUR");
        assert_eq!(config.decimals, 4);
        assert_eq!(config.status_bar.style, StatusBarStyle::Dark);
        assert!(!config.status_bar.visible);
        assert_eq!(config.status_bar.background, Some(Color::Blue));
    }

    #[test]
    fn test_parse_config_data() {
        let data: ConfigData = toml::from_str("[status_bar]\nstyle = \"light\"\n").unwrap();
        assert_eq!(
            data,
            ConfigData {
                status_bar: StatusBarSection {
                    style: StatusBarStyle::Light,
                    ..Default::default()
                },
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let (_dir, path) = write_config("[exchange]\nrate = 10\n");

        let config = load_config(&path).unwrap();
        assert_eq!(config.rate.value(), dec!(10));
        assert_eq!(config.source, "GTQ");
        assert_eq!(config.decimals, 2);
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let (_dir, path) = write_config("[exchange]\nrate = 0\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Rate(_))));

        let (_dir, path) = write_config("[exchange]\nrate = \"-8\"\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Rate(_))));
    }

    #[test]
    fn test_rejects_bad_values() {
        let (_dir, path) = write_config("[display]\ndecimals = 12\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Decimals(12))));

        let (_dir, path) = write_config("[status_bar]\nbackground = \"not-a-color\"\n");
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::InvalidColor(_))
        ));

        let (_dir, path) = write_config("[exchange]\nfetch_live = true\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_style_cycle() {
        let style = StatusBarStyle::Default;
        assert_eq!(style.next(), StatusBarStyle::Dark);
        assert_eq!(style.next().next(), StatusBarStyle::Light);
        assert_eq!(style.next().next().next(), StatusBarStyle::Default);
    }
}
