// ==========================================
// 肿瘤随访排程系统 - 排程引擎
// ==========================================
// 输入: 随访计划 + 治疗日期 + 分期 + 参考日期
// 输出: 按 months_after_treatment 升序的访视列表
// ==========================================
// 流程 (每个访视模板,文档顺序):
//   1. 推算日期 (治疗日期 + 30 × 月数)
//   2. 晚于参考日期 → 顺延至工作日
//   3. is_past = scheduled_date < reference_date (严格小于)
//   4. 按分期过滤检查 (保持模板顺序)
//   5. 产出 ScheduledVisit
// 最后按 months_after_treatment 稳定排序
// ==========================================
// 红线: 不修改计划,不读系统时钟,同参数同结果
// ==========================================

use crate::domain::date_format::parse_date;
use crate::domain::plan::{ObservationPlan, VisitTemplate, DEFAULT_VISIT_TYPE};
use crate::domain::schedule::{ScheduledExamination, ScheduledVisit};
use crate::domain::types::{EmptyVisitPolicy, Stage};
use crate::engine::date_projector::DateProjector;
use crate::engine::eligibility_core::EligibilityCore;
use crate::engine::error::{CalculationError, CalculationResult, InvalidDateError};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// ScheduleRequest - 单次计算入参
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub treatment_date: NaiveDate,
    pub stage: Stage,
    pub reference_date: NaiveDate,
}

impl ScheduleRequest {
    pub fn new(treatment_date: NaiveDate, stage: Stage, reference_date: NaiveDate) -> Self {
        Self {
            treatment_date,
            stage,
            reference_date,
        }
    }

    /// 从文本入参构建（日期: dd.mm.yyyy, 分期: I/II/III/IV）
    pub fn from_text(
        treatment_date: &str,
        stage: &str,
        reference_date: &str,
    ) -> CalculationResult<Self> {
        let treatment = parse_date(treatment_date)
            .map_err(|e| InvalidDateError::new("treatment_date", treatment_date, e))?;
        let reference = parse_date(reference_date)
            .map_err(|e| InvalidDateError::new("reference_date", reference_date, e))?;
        let stage = stage.parse::<Stage>().map_err(CalculationError::InvalidStage)?;

        Ok(Self::new(treatment, stage, reference))
    }
}

// ==========================================
// ScheduleEngine - 排程引擎
// ==========================================
// 计划以 Arc 共享,引擎本身只读,可跨线程并发计算
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    plan: Arc<ObservationPlan>,
    empty_visit_policy: EmptyVisitPolicy,
    default_visit_type: String,
}

impl ScheduleEngine {
    /// 创建新的 ScheduleEngine 实例
    ///
    /// # 参数
    /// - plan: 已加载的随访计划
    pub fn new(plan: Arc<ObservationPlan>) -> Self {
        Self {
            plan,
            empty_visit_policy: EmptyVisitPolicy::default(),
            default_visit_type: DEFAULT_VISIT_TYPE.to_string(),
        }
    }

    pub fn with_empty_visit_policy(mut self, policy: EmptyVisitPolicy) -> Self {
        self.empty_visit_policy = policy;
        self
    }

    pub fn with_default_visit_type(mut self, label: impl Into<String>) -> Self {
        self.default_visit_type = label.into();
        self
    }

    /// 计算随访排程
    ///
    /// # 参数
    /// - treatment_date: 根治性治疗日期（锚点）
    /// - stage: 疾病分期
    /// - reference_date: 参考日期（区分历史/未来访视）
    ///
    /// # 返回
    /// - Vec<ScheduledVisit>: 按 months_after_treatment 升序（稳定）
    #[instrument(skip(self), fields(visits = self.plan.len()))]
    pub fn calculate_schedule(
        &self,
        treatment_date: NaiveDate,
        stage: Stage,
        reference_date: NaiveDate,
    ) -> CalculationResult<Vec<ScheduledVisit>> {
        let mut visits = Vec::with_capacity(self.plan.len());

        for template in &self.plan.visits {
            let visit = self.schedule_visit(template, treatment_date, stage, reference_date)?;

            if !visit.has_examinations() && self.empty_visit_policy == EmptyVisitPolicy::Suppress {
                debug!(visit_number = visit.visit_number, "空访视已剔除");
                continue;
            }

            visits.push(visit);
        }

        // 稳定排序: 同月数的访视保持文档顺序
        visits.sort_by_key(|v| v.months_after_treatment);

        debug!(
            total = visits.len(),
            past = visits.iter().filter(|v| v.is_past).count(),
            "排程计算完成"
        );

        Ok(visits)
    }

    /// 按请求计算
    pub fn calculate(&self, request: &ScheduleRequest) -> CalculationResult<Vec<ScheduledVisit>> {
        self.calculate_schedule(request.treatment_date, request.stage, request.reference_date)
    }

    /// 文本入参计算（日期: dd.mm.yyyy, 分期: I/II/III/IV）
    pub fn calculate_schedule_from_text(
        &self,
        treatment_date: &str,
        stage: &str,
        reference_date: &str,
    ) -> CalculationResult<Vec<ScheduledVisit>> {
        let request = ScheduleRequest::from_text(treatment_date, stage, reference_date)?;
        self.calculate(&request)
    }

    fn schedule_visit(
        &self,
        template: &VisitTemplate,
        treatment_date: NaiveDate,
        stage: Stage,
        reference_date: NaiveDate,
    ) -> CalculationResult<ScheduledVisit> {
        let projected = DateProjector::schedule(
            treatment_date,
            template.months_after_treatment,
            reference_date,
        )
        .ok_or(CalculationError::DateOutOfRange {
            visit_number: template.visit_number,
            months_after_treatment: template.months_after_treatment,
        })?;

        let examinations = EligibilityCore::filter_eligible(&template.examinations, stage)
            .map(ScheduledExamination::from)
            .collect();

        Ok(ScheduledVisit {
            visit_number: template.visit_number,
            months_after_treatment: template.months_after_treatment,
            visit_type: template.visit_type_or(&self.default_visit_type).to_string(),
            projected_date: projected.raw,
            scheduled_date: projected.scheduled,
            workday_adjusted: projected.adjusted,
            is_past: projected.scheduled < reference_date,
            examinations,
        })
    }
}
