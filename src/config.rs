use crate::error::{ReportError, Result};
use ramen_report_common::RamenVariant;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const OUTPUT_DIR_ENV: &str = "RAMEN_REPORT_OUTPUT_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 一括振り分けの既定種別（ラベル）
    pub default_variant: String,
    /// 日報テキストの保存先
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_variant: RamenVariant::Hana.label().into(),
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ramen-report").join("config.json"))
    }

    /// 一括振り分けの既定種別
    pub fn default_variant(&self) -> Result<RamenVariant> {
        RamenVariant::from_label(&self.default_variant).ok_or_else(|| {
            ReportError::Config(format!("不明な既定種別: {}", self.default_variant))
        })
    }

    pub fn set_default_variant(&mut self, label: &str) -> Result<()> {
        let variant: RamenVariant = label.parse()?;
        self.default_variant = variant.label().into();
        self.save()
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.output_dir = Some(dir);
        self.save()
    }

    /// 保存先（環境変数 > 設定ファイル > カレント）
    pub fn resolve_output_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }

        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_variant().unwrap(), RamenVariant::Hana);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"output_dir": "/tmp/reports"}"#).unwrap();
        assert_eq!(config.default_variant, "花");
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/reports")));
    }

    #[test]
    fn test_unknown_default_variant() {
        let config = Config {
            default_variant: "醤油".into(),
            output_dir: None,
        };
        assert!(matches!(config.default_variant(), Err(ReportError::Config(_))));
    }
}
