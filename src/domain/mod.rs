// ==========================================
// 肿瘤随访排程系统 - 领域模型层
// ==========================================
// 职责: 定义随访计划模板、排程结果、领域类型
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod date_format;
pub mod plan;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use plan::{
    EligibilityContext, EligibilityRule, ExaminationTemplate, ObservationPlan, PlanDocument,
    VisitTemplate, DEFAULT_VISIT_TYPE,
};
pub use schedule::{ScheduledExamination, ScheduledVisit};
pub use types::{EmptyVisitPolicy, Stage};
