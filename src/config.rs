//! # 配置模块
//!
//! 从 YAML/JSON 文件加载通用键路径配置，并提取报告引擎唯一需要的
//! 选项：`output.include.electron_density_difference.mode`。
//!
//! ```yaml
//! output:
//!   include:
//!     electron_density_difference:
//!       mode: full   # text | clean | full
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `serde_yaml`, `serde_json`

use crate::error::{ReportError, Result};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// 报告模式的配置键
pub const MODE_KEY: &str = "output.include.electron_density_difference.mode";

/// 报告详细程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Tables only, no orbital figures
    Text,
    /// Standard report
    #[default]
    Clean,
    /// Everything available: CDFT indices, population analysis, all figures
    Full,
}

impl ReportMode {
    pub fn is_full(self) -> bool {
        self == ReportMode::Full
    }

    pub fn is_text(self) -> bool {
        self == ReportMode::Text
    }
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportMode::Text => write!(f, "text"),
            ReportMode::Clean => write!(f, "clean"),
            ReportMode::Full => write!(f, "full"),
        }
    }
}

impl std::str::FromStr for ReportMode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReportMode::Text),
            "clean" => Ok(ReportMode::Clean),
            "full" => Ok(ReportMode::Full),
            other => Err(ReportError::InvalidConfig {
                key: MODE_KEY.to_string(),
                reason: format!("unknown mode '{}', expected text, clean or full", other),
            }),
        }
    }
}

/// 键路径配置对象
#[derive(Debug, Clone, Default)]
pub struct Settings {
    root: serde_json::Map<String, Value>,
}

impl Settings {
    /// 从文件加载（.yaml/.yml/.json）
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let text = fs::read_to_string(path).map_err(|e| ReportError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let value: Value = match ext.as_str() {
            "yaml" | "yml" => {
                serde_yaml::from_str(&text).map_err(|e| ReportError::ParseError {
                    format: "YAML".to_string(),
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            "json" => serde_json::from_str(&text).map_err(|e| ReportError::ParseError {
                format: "JSON".to_string(),
                path: path.display().to_string(),
                reason: e.to_string(),
            })?,
            _ => {
                return Err(ReportError::UnsupportedFormat(format!(
                    "Config file must be .yaml, .yml or .json: {}",
                    path.display()
                )))
            }
        };

        Self::from_value(value).map_err(|_| ReportError::ParseError {
            format: ext.to_uppercase(),
            path: path.display().to_string(),
            reason: "configuration must contain a mapping at the top level".to_string(),
        })
    }

    /// 从已解析的值构造，顶层必须是映射
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Settings { root }),
            _ => Err(ReportError::InvalidConfig {
                key: "<root>".to_string(),
                reason: "expected a mapping".to_string(),
            }),
        }
    }

    /// 按点分路径查找
    pub fn get(&self, key_path: &str) -> Option<&Value> {
        let mut parts = key_path.split('.');
        let mut current = self.root.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

/// 报告引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub mode: ReportMode,
}

impl ReportConfig {
    #[cfg(test)]
    pub fn new(mode: ReportMode) -> Self {
        ReportConfig { mode }
    }

    /// 从配置对象提取；未设置模式时使用 `clean`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mode = match settings.get(MODE_KEY) {
            None | Some(Value::Null) => ReportMode::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(other) => {
                return Err(ReportError::InvalidConfig {
                    key: MODE_KEY.to_string(),
                    reason: format!("expected a string, found {}", other),
                })
            }
        };
        Ok(ReportConfig { mode })
    }

    /// 加载配置文件（可选）并应用命令行覆盖
    pub fn resolve(path: Option<&Path>, mode_override: Option<ReportMode>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_settings(&Settings::load(p)?)?,
            None => ReportConfig::default(),
        };
        if let Some(mode) = mode_override {
            config.mode = mode;
        }
        Ok(config)
    }
}
