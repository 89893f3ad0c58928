// ==========================================
// 肿瘤随访排程系统 - 排程结果实体
// ==========================================
// 职责: 单次计算产出的访视（派生、临时、不持久化）
// ==========================================

use crate::domain::date_format;
use crate::domain::plan::{EligibilityRule, ExaminationTemplate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduledVisit - 已排程访视
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledVisit {
    pub visit_number: u32,
    pub months_after_treatment: u32,
    pub visit_type: String,

    /// 原始推算日期（治疗日期 + 30 × 月数）
    #[serde(with = "date_format")]
    pub projected_date: NaiveDate,

    /// 排程日期（未来访视已顺延至工作日）
    #[serde(with = "date_format")]
    pub scheduled_date: NaiveDate,

    /// 是否发生了工作日顺延
    pub workday_adjusted: bool,

    /// scheduled_date < reference_date
    pub is_past: bool,

    /// 通过准入判定的检查（模板顺序）
    pub examinations: Vec<ScheduledExamination>,
}

impl ScheduledVisit {
    /// 随访年度: months / 12 + 1
    pub fn observation_year(&self) -> u32 {
        self.months_after_treatment / 12 + 1
    }

    pub fn has_examinations(&self) -> bool {
        !self.examinations.is_empty()
    }

    pub fn is_future(&self) -> bool {
        !self.is_past
    }
}

// ==========================================
// ScheduledExamination - 已排程检查
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledExamination {
    pub code: String,
    pub description: String,
    pub is_mandatory: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<EligibilityRule>,
}

impl From<&ExaminationTemplate> for ScheduledExamination {
    fn from(exam: &ExaminationTemplate) -> Self {
        Self {
            code: exam.code.clone(),
            description: exam.description.clone(),
            is_mandatory: exam.is_mandatory,
            condition: exam.condition.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(months: u32) -> ScheduledVisit {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        ScheduledVisit {
            visit_number: 1,
            months_after_treatment: months,
            visit_type: "routine exam".to_string(),
            projected_date: date,
            scheduled_date: date,
            workday_adjusted: false,
            is_past: false,
            examinations: vec![],
        }
    }

    #[test]
    fn test_observation_year() {
        assert_eq!(visit(0).observation_year(), 1);
        assert_eq!(visit(11).observation_year(), 1);
        assert_eq!(visit(12).observation_year(), 2);
        assert_eq!(visit(18).observation_year(), 2);
        assert_eq!(visit(60).observation_year(), 6);
    }

    #[test]
    fn test_dates_serialized_as_day_month_year() {
        let json = serde_json::to_value(visit(3)).unwrap();
        assert_eq!(json["scheduled_date"], "15.01.2024");
        assert_eq!(json["projected_date"], "15.01.2024");
        assert_eq!(json["examinations"].as_array().unwrap().len(), 0);
    }
}
