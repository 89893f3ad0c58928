// ==========================================
// 肿瘤随访排程系统 - 核心库
// ==========================================
// 输入: 随访计划文档 + 治疗日期 + 分期 + 参考日期
// 输出: 有序访视列表（检查项、排程日期、历史/未来标记）
// 系统定位: 计算核心,展示层与导出为外部协作方
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 计划模板与排程结果
pub mod domain;

// 数据仓储层 - 随访计划读取
pub mod repository;

// 引擎层 - 准入判定、日期推算、排程编排
pub mod engine;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 计算入口
pub mod api;

// 报表层 - 年度分组与导出
pub mod report;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    EligibilityRule, EmptyVisitPolicy, ExaminationTemplate, ObservationPlan, ScheduledExamination,
    ScheduledVisit, Stage, VisitTemplate,
};

// 仓储
pub use repository::{PlanRepository, PlanRepositoryError};

// 引擎
pub use engine::{
    CalculationError, DateProjector, EligibilityCore, InvalidDateError, ScheduleEngine,
    ScheduleRequest,
};

// 配置
pub use config::{ConfigError, ScheduleConfig};

// API
pub use api::{ApiError, ScheduleApi};

// 报表
pub use report::ScheduleReport;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "肿瘤随访排程系统";
