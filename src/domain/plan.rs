// ==========================================
// 肿瘤随访排程系统 - 随访计划模板
// ==========================================
// 职责: 随访计划文档的内存结构（访视模板 + 检查模板 + 准入规则）
// 红线: 计划加载后只读,计算过程中不得修改
// ==========================================

use crate::domain::types::Stage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 访视类型缺省标签
pub const DEFAULT_VISIT_TYPE: &str = "routine exam";

// ==========================================
// PlanDocument - 计划文档根对象
// ==========================================
// 文档格式: { "observation_plan": { "visits": [...] } }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub observation_plan: ObservationPlan,
}

// ==========================================
// ObservationPlan - 随访计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObservationPlan {
    /// 访视模板（文档顺序）
    pub visits: Vec<VisitTemplate>,
}

impl ObservationPlan {
    pub fn new(visits: Vec<VisitTemplate>) -> Self {
        Self { visits }
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// 按访视编号查找模板
    pub fn find_visit(&self, visit_number: u32) -> Option<&VisitTemplate> {
        self.visits.iter().find(|v| v.visit_number == visit_number)
    }
}

// ==========================================
// VisitTemplate - 访视模板
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitTemplate {
    /// 访视编号（计划内唯一，展示用排序键）
    pub visit_number: u32,

    /// 距治疗日期的月数偏移
    pub months_after_treatment: u32,

    /// 访视类型（缺省时由引擎替换为默认标签）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_type: Option<String>,

    /// 检查模板（文档顺序）
    #[serde(default)]
    pub examinations: Vec<ExaminationTemplate>,
}

impl VisitTemplate {
    /// 访视类型标签,缺省时使用 fallback
    pub fn visit_type_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.visit_type.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => fallback,
        }
    }
}

// ==========================================
// ExaminationTemplate - 检查模板
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExaminationTemplate {
    /// 检查代码（收费/项目代码）
    pub code: String,

    /// 检查说明
    pub description: String,

    /// 是否必做（必做项不受分期影响）
    pub is_mandatory: bool,

    /// 准入规则（非必做项必填）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<EligibilityRule>,
}

// ==========================================
// EligibilityRule - 准入规则
// ==========================================
// 文档格式: { "type": "stage_in", "value": ["III", "IV"] }
// 新规则类型以新变体加入,调用方只依赖 evaluate()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EligibilityRule {
    /// 分期属于给定集合
    StageIn(BTreeSet<Stage>),
}

impl EligibilityRule {
    pub fn stage_in<I>(stages: I) -> Self
    where
        I: IntoIterator<Item = Stage>,
    {
        EligibilityRule::StageIn(stages.into_iter().collect())
    }

    /// 在给定上下文下评估规则
    pub fn evaluate(&self, ctx: &EligibilityContext) -> bool {
        match self {
            EligibilityRule::StageIn(stages) => stages.contains(&ctx.stage),
        }
    }

    /// 规则类型标签（与文档中的 type 字段一致）
    pub fn kind(&self) -> &'static str {
        match self {
            EligibilityRule::StageIn(_) => "stage_in",
        }
    }
}

/// 准入规则的评估上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityContext {
    pub stage: Stage,
}

impl EligibilityContext {
    pub fn new(stage: Stage) -> Self {
        Self { stage }
    }
}

impl From<Stage> for EligibilityContext {
    fn from(stage: Stage) -> Self {
        Self::new(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_document_format() {
        let rule: EligibilityRule =
            serde_json::from_str(r#"{"type": "stage_in", "value": ["IV", "III"]}"#).unwrap();
        assert_eq!(rule, EligibilityRule::stage_in([Stage::III, Stage::IV]));
        assert_eq!(rule.kind(), "stage_in");

        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"type":"stage_in","value":["III","IV"]}"#);
    }

    #[test]
    fn test_unknown_rule_type_rejected() {
        let result = serde_json::from_str::<EligibilityRule>(
            r#"{"type": "age_over", "value": 65}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_stage_in_evaluate() {
        let rule = EligibilityRule::stage_in([Stage::III, Stage::IV]);
        assert!(!rule.evaluate(&Stage::I.into()));
        assert!(!rule.evaluate(&Stage::II.into()));
        assert!(rule.evaluate(&Stage::III.into()));
        assert!(rule.evaluate(&Stage::IV.into()));
    }

    #[test]
    fn test_visit_type_fallback() {
        let mut visit = VisitTemplate {
            visit_number: 1,
            months_after_treatment: 0,
            visit_type: None,
            examinations: vec![],
        };
        assert_eq!(visit.visit_type_or(DEFAULT_VISIT_TYPE), "routine exam");

        visit.visit_type = Some("   ".to_string());
        assert_eq!(visit.visit_type_or(DEFAULT_VISIT_TYPE), "routine exam");

        visit.visit_type = Some("specialist review".to_string());
        assert_eq!(visit.visit_type_or(DEFAULT_VISIT_TYPE), "specialist review");
    }
}
