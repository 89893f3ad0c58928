// ==========================================
// 肿瘤随访排程系统 - 数据仓储层
// ==========================================
// 职责: 随访计划文档的读取与结构校验
// 红线: 只读,不缓存,不修改计划
// ==========================================

pub mod error;
pub mod plan_repo;

// 重导出
pub use error::{PlanRepositoryError, RepositoryResult};
pub use plan_repo::PlanRepository;
