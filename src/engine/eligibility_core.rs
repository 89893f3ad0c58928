// ==========================================
// 肿瘤随访排程系统 - Eligibility Core 纯函数库
// ==========================================
// 职责: 判定单项检查在给定分期下是否开出
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::plan::{EligibilityContext, ExaminationTemplate};
use crate::domain::types::Stage;

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 判定检查是否开出
    ///
    /// # 规则
    /// 1. is_mandatory=true → 开出
    /// 2. 存在 condition → 按规则评估 (stage_in: 分期 ∈ value)
    /// 3. 否则 → 不开出（计划文档不完整时的兜底）
    pub fn is_eligible(examination: &ExaminationTemplate, stage: Stage) -> bool {
        Self::is_eligible_in(examination, &EligibilityContext::new(stage))
    }

    /// 在完整上下文下判定（新规则类型可从上下文读取更多患者信息）
    pub fn is_eligible_in(examination: &ExaminationTemplate, ctx: &EligibilityContext) -> bool {
        if examination.is_mandatory {
            return true;
        }

        match &examination.condition {
            Some(rule) => rule.evaluate(ctx),
            None => false,
        }
    }

    /// 过滤出给定分期下开出的检查（保持模板顺序）
    pub fn filter_eligible<'a>(
        examinations: &'a [ExaminationTemplate],
        stage: Stage,
    ) -> impl Iterator<Item = &'a ExaminationTemplate> + 'a {
        let ctx = EligibilityContext::new(stage);
        examinations
            .iter()
            .filter(move |exam| Self::is_eligible_in(exam, &ctx))
    }
}
