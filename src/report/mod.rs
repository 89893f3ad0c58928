// ==========================================
// 肿瘤随访排程系统 - 报表层
// ==========================================
// 职责: 排程结果的展示派生（年度分组、历史/未来拆分）与导出
// 红线: 只消费引擎输出,不重新计算
// ==========================================

pub mod export;
pub mod grouping;

pub use export::ScheduleReport;
pub use grouping::{group_by_observation_year, next_visit, split_past_future};
