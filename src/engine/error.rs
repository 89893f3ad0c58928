// ==========================================
// 肿瘤随访排程系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 计算失败整体返回错误,不返回部分结果
// ==========================================

use thiserror::Error;

/// 日期入参解析失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("日期格式错误 ({field}): 期望 dd.mm.yyyy，实际 '{value}' ({message})")]
pub struct InvalidDateError {
    pub field: String,
    pub value: String,
    pub message: String,
}

impl InvalidDateError {
    pub fn new(field: &str, value: &str, cause: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            message: cause.to_string(),
        }
    }
}

/// 排程计算错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("排程计算失败: {0}")]
    InvalidDate(#[from] InvalidDateError),

    #[error("排程计算失败: {0}")]
    InvalidStage(String),

    #[error("排程计算失败: 访视 {visit_number} 的推算日期超出日历范围 (months_after_treatment={months_after_treatment})")]
    DateOutOfRange {
        visit_number: u32,
        months_after_treatment: u32,
    },
}

/// Result 类型别名
pub type CalculationResult<T> = Result<T, CalculationError>;
