// ==========================================
// 肿瘤随访排程系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 计划仓储错误类型
#[derive(Error, Debug)]
pub enum PlanRepositoryError {
    // ===== 来源错误 =====
    #[error("随访计划不存在或无法读取: {path} ({message})")]
    NotFound { path: String, message: String },

    // ===== 内容错误 =====
    #[error("随访计划格式错误 ({source_name}): {message}")]
    MalformedPlan {
        source_name: String,
        message: String,
    },
}

impl PlanRepositoryError {
    pub fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        PlanRepositoryError::MalformedPlan {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlanRepositoryError::NotFound { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, PlanRepositoryError::MalformedPlan { .. })
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, PlanRepositoryError>;
