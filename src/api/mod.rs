// ==========================================
// 肿瘤随访排程系统 - API 层
// ==========================================
// 职责: 对展示层暴露计算入口与计划刷新
// ==========================================

pub mod error;
pub mod schedule_api;

pub use error::{ApiError, ApiResult};
pub use schedule_api::ScheduleApi;
