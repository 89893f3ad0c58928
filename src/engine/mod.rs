// ==========================================
// 肿瘤随访排程系统 - 引擎层
// ==========================================
// 职责: 准入判定、日期推算、排程编排
// 红线: 引擎不做文件 I/O,不读系统时钟
// ==========================================

pub mod date_projector;
pub mod eligibility_core;
pub mod error;
pub mod schedule;

// 重导出核心引擎
pub use date_projector::{DateProjector, ProjectedDate, DAYS_PER_MONTH};
pub use eligibility_core::EligibilityCore;
pub use error::{CalculationError, CalculationResult, InvalidDateError};
pub use schedule::{ScheduleEngine, ScheduleRequest};
