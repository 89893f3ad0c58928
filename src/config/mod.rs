// ==========================================
// 肿瘤随访排程系统 - 配置层
// ==========================================
// 职责: 排程配置加载,支持配置文件与环境变量覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigError, ScheduleConfig, APP_DATA_DIR, DEFAULT_PLAN_FILE};
