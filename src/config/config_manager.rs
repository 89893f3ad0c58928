// ==========================================
// 肿瘤随访排程系统 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、计划文件路径解析
// 优先级: 默认值 → 配置文件 (JSON) → 环境变量 → 命令行参数
// ==========================================

use crate::domain::plan::DEFAULT_VISIT_TYPE;
use crate::domain::types::EmptyVisitPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path} ({message})")]
    FileReadError { path: String, message: String },

    #[error("配置文件格式错误: {path} ({message})")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ScheduleConfig - 排程配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// 随访计划文件路径
    pub plan_path: PathBuf,

    /// 空访视策略
    pub empty_visit_policy: EmptyVisitPolicy,

    /// 访视类型缺省标签
    pub default_visit_type: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            plan_path: PathBuf::from(DEFAULT_PLAN_FILE),
            empty_visit_policy: EmptyVisitPolicy::Retain,
            default_visit_type: DEFAULT_VISIT_TYPE.to_string(),
        }
    }
}

/// 默认计划文件名
pub const DEFAULT_PLAN_FILE: &str = "observation_plan.json";

/// 用户数据目录下的应用子目录
pub const APP_DATA_DIR: &str = "oncology-followup";

impl ScheduleConfig {
    /// 从 JSON 配置文件加载（缺失字段取默认值）
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// 应用覆写（lookup: 键 → 值,空白值忽略）
    pub fn apply_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(path) = read(config_keys::ENV_PLAN_PATH) {
            self.plan_path = PathBuf::from(path);
        }

        if let Some(value) = read(config_keys::ENV_EMPTY_VISITS) {
            self.empty_visit_policy =
                value
                    .parse::<EmptyVisitPolicy>()
                    .map_err(|message| ConfigError::InvalidValue {
                        key: config_keys::ENV_EMPTY_VISITS.to_string(),
                        value: value.clone(),
                        message,
                    })?;
        }

        if let Some(label) = read(config_keys::ENV_DEFAULT_VISIT_TYPE) {
            self.default_visit_type = label;
        }

        Ok(self)
    }

    /// 解析计划文件实际路径
    ///
    /// # 规则
    /// - 配置路径存在 → 直接使用
    /// - 相对路径且不存在 → 尝试 用户数据目录/oncology-followup/<路径>
    /// - 均不存在 → 返回配置路径（由仓储层报告 NotFound）
    pub fn resolve_plan_path(&self) -> PathBuf {
        if self.plan_path.exists() || self.plan_path.is_absolute() {
            return self.plan_path.clone();
        }

        if let Some(data_dir) = dirs::data_dir() {
            let candidate = data_dir.join(APP_DATA_DIR).join(&self.plan_path);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "使用用户数据目录中的随访计划");
                return candidate;
            }
        }

        self.plan_path.clone()
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 环境变量
    pub const ENV_PLAN_PATH: &str = "ONCOLOGY_FOLLOWUP_PLAN_PATH";
    pub const ENV_EMPTY_VISITS: &str = "ONCOLOGY_FOLLOWUP_EMPTY_VISITS";
    pub const ENV_DEFAULT_VISIT_TYPE: &str = "ONCOLOGY_FOLLOWUP_DEFAULT_VISIT_TYPE";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.plan_path, PathBuf::from("observation_plan.json"));
        assert_eq!(config.empty_visit_policy, EmptyVisitPolicy::Retain);
        assert_eq!(config.default_visit_type, "routine exam");
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"empty_visit_policy": "suppress"}}"#).unwrap();

        let config = ScheduleConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.empty_visit_policy, EmptyVisitPolicy::Suppress);
        assert_eq!(config.plan_path, PathBuf::from(DEFAULT_PLAN_FILE));
    }

    #[test]
    fn test_from_json_file_errors() {
        let missing = ScheduleConfig::from_json_file(Path::new("/nonexistent/followup.json"));
        assert!(matches!(missing, Err(ConfigError::FileReadError { .. })));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let invalid = ScheduleConfig::from_json_file(file.path());
        assert!(matches!(invalid, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (config_keys::ENV_PLAN_PATH, "/srv/plans/colorectal.json"),
            (config_keys::ENV_EMPTY_VISITS, "suppress"),
            (config_keys::ENV_DEFAULT_VISIT_TYPE, "   "),
        ]
        .into_iter()
        .collect();

        let config = ScheduleConfig::default()
            .apply_overrides_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.plan_path, PathBuf::from("/srv/plans/colorectal.json"));
        assert_eq!(config.empty_visit_policy, EmptyVisitPolicy::Suppress);
        // 空白值忽略
        assert_eq!(config.default_visit_type, "routine exam");
    }

    #[test]
    fn test_invalid_override() {
        let result = ScheduleConfig::default().apply_overrides_from(|k| {
            (k == config_keys::ENV_EMPTY_VISITS).then(|| "sometimes".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_resolve_existing_plan_path() {
        let file = NamedTempFile::new().unwrap();
        let config = ScheduleConfig {
            plan_path: file.path().to_path_buf(),
            ..ScheduleConfig::default()
        };
        assert_eq!(config.resolve_plan_path(), file.path().to_path_buf());
    }
}
