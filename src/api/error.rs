// ==========================================
// 肿瘤随访排程系统 - API层错误类型
// ==========================================
// 职责: 汇总仓储/引擎/配置错误,保留原始原因文本
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::CalculationError;
use crate::repository::error::PlanRepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Plan(#[from] PlanRepositoryError),

    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("内部错误: {0}")]
    InternalError(String),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
