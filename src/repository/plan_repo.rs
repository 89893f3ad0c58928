// ==========================================
// 肿瘤随访排程系统 - 随访计划仓储
// ==========================================
// 职责: 读取并校验随访计划文档 (JSON)
// 红线: 不缓存,由调用方决定计划的生命周期
// 红线: 任何格式错误都整体失败,不接受部分计划
// ==========================================

use crate::domain::plan::{ObservationPlan, PlanDocument};
use crate::repository::error::{PlanRepositoryError, RepositoryResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// ==========================================
// PlanRepository - 随访计划仓储
// ==========================================
pub struct PlanRepository;

impl PlanRepository {
    /// 从文件加载随访计划
    ///
    /// # 错误
    /// - NotFound: 文件不存在或无法打开
    /// - MalformedPlan: 内容不符合计划文档结构
    #[instrument]
    pub fn load(path: &Path) -> RepositoryResult<ObservationPlan> {
        let source_name = path.display().to_string();

        let file = File::open(path).map_err(|e| PlanRepositoryError::NotFound {
            path: source_name.clone(),
            message: e.to_string(),
        })?;

        let plan = Self::read_document(BufReader::new(file), &source_name)?;
        info!(source = %source_name, visits = plan.len(), "随访计划已加载");
        Ok(plan)
    }

    /// 从任意读取句柄加载随访计划
    pub fn from_reader<R: Read>(reader: R) -> RepositoryResult<ObservationPlan> {
        Self::read_document(reader, "<reader>")
    }

    /// 从文本加载随访计划
    pub fn parse(content: &str) -> RepositoryResult<ObservationPlan> {
        Self::read_document(content.as_bytes(), "<inline>")
    }

    fn read_document<R: Read>(reader: R, source_name: &str) -> RepositoryResult<ObservationPlan> {
        let document: PlanDocument = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                PlanRepositoryError::NotFound {
                    path: source_name.to_string(),
                    message: e.to_string(),
                }
            } else {
                PlanRepositoryError::malformed(source_name, e.to_string())
            }
        })?;

        let plan = document.observation_plan;
        Self::validate(&plan, source_name)?;
        debug!(source = %source_name, visits = plan.len(), "随访计划结构校验通过");
        Ok(plan)
    }

    /// 结构校验
    ///
    /// # 规则
    /// - visit_number 在计划内唯一（违反 → MalformedPlan）
    /// - 非必做且无 condition 的检查: 接受,记录告警（永远不会被开出）
    /// - 必做且带 condition 的检查: 接受,记录告警（condition 被忽略）
    fn validate(plan: &ObservationPlan, source_name: &str) -> RepositoryResult<()> {
        if plan.is_empty() {
            warn!(source = %source_name, "随访计划不包含任何访视");
        }

        let mut seen = HashSet::new();

        for visit in &plan.visits {
            if !seen.insert(visit.visit_number) {
                return Err(PlanRepositoryError::malformed(
                    source_name,
                    format!("visit_number 重复: {}", visit.visit_number),
                ));
            }

            for exam in &visit.examinations {
                match (exam.is_mandatory, &exam.condition) {
                    (false, None) => warn!(
                        visit_number = visit.visit_number,
                        code = %exam.code,
                        "非必做检查缺少 condition,该检查不会被开出"
                    ),
                    (true, Some(rule)) => warn!(
                        visit_number = visit.visit_number,
                        code = %exam.code,
                        rule = rule.kind(),
                        "必做检查带有 condition,条件将被忽略"
                    ),
                    _ => {}
                }
            }
        }

        Ok(())
    }
}
