// ==========================================
// 肿瘤随访排程系统 - 排程 API
// ==========================================
// 职责: 面向展示层/长驻服务的计算入口
// 计划快照: RwLock<Arc<ObservationPlan>>
//   - 计算时克隆 Arc,持有快照期间不受刷新影响
//   - reload_plan() 显式刷新,失败时保留旧计划
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ScheduleConfig;
use crate::domain::plan::ObservationPlan;
use crate::domain::schedule::ScheduledVisit;
use crate::engine::{ScheduleEngine, ScheduleRequest};
use crate::report::ScheduleReport;
use crate::repository::PlanRepository;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{info, instrument, warn};

// ==========================================
// ScheduleApi
// ==========================================
pub struct ScheduleApi {
    config: ScheduleConfig,
    plan_path: PathBuf,
    plan: RwLock<Arc<ObservationPlan>>,
}

impl ScheduleApi {
    /// 按配置加载计划并创建 API
    pub fn new(config: ScheduleConfig) -> ApiResult<Self> {
        let plan_path = config.resolve_plan_path();
        let plan = PlanRepository::load(&plan_path)?;

        Ok(Self {
            config,
            plan_path,
            plan: RwLock::new(Arc::new(plan)),
        })
    }

    /// 使用已加载的计划创建 API（不读文件,reload_plan 仍按配置路径读取）
    pub fn with_plan(config: ScheduleConfig, plan: ObservationPlan) -> Self {
        let plan_path = config.resolve_plan_path();
        Self {
            config,
            plan_path,
            plan: RwLock::new(Arc::new(plan)),
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn plan_path(&self) -> &PathBuf {
        &self.plan_path
    }

    /// 当前计划快照
    pub fn plan_snapshot(&self) -> ApiResult<Arc<ObservationPlan>> {
        let guard = self
            .plan
            .read()
            .map_err(|e| ApiError::InternalError(format!("计划锁获取失败: {}", e)))?;
        Ok(Arc::clone(&guard))
    }

    /// 重新读取计划文件并替换快照
    ///
    /// # 返回
    /// - Ok(usize): 新计划的访视数量
    /// - Err: 读取失败（旧计划保持不变）
    #[instrument(skip(self), fields(path = %self.plan_path.display()))]
    pub fn reload_plan(&self) -> ApiResult<usize> {
        let plan = match PlanRepository::load(&self.plan_path) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "随访计划刷新失败,保留当前计划");
                return Err(e.into());
            }
        };

        let visits = plan.len();
        let mut guard = self
            .plan
            .write()
            .map_err(|e| ApiError::InternalError(format!("计划锁获取失败: {}", e)))?;
        *guard = Arc::new(plan);

        info!(visits, "随访计划已刷新");
        Ok(visits)
    }

    /// 计算排程
    pub fn calculate(&self, request: &ScheduleRequest) -> ApiResult<Vec<ScheduledVisit>> {
        let engine = self.engine()?;
        Ok(engine.calculate(request)?)
    }

    /// 文本入参计算（日期: dd.mm.yyyy, 分期: I/II/III/IV）
    pub fn calculate_from_text(
        &self,
        treatment_date: &str,
        stage: &str,
        reference_date: &str,
    ) -> ApiResult<Vec<ScheduledVisit>> {
        let request = ScheduleRequest::from_text(treatment_date, stage, reference_date)?;
        self.calculate(&request)
    }

    /// 计算并组装导出报表
    pub fn build_report(&self, request: &ScheduleRequest) -> ApiResult<ScheduleReport> {
        let visits = self.calculate(request)?;
        Ok(ScheduleReport::new(request, visits))
    }

    fn engine(&self) -> ApiResult<ScheduleEngine> {
        Ok(ScheduleEngine::new(self.plan_snapshot()?)
            .with_empty_visit_policy(self.config.empty_visit_policy)
            .with_default_visit_type(self.config.default_visit_type.clone()))
    }
}
