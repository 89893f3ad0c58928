// ==========================================
// 肿瘤随访排程系统 - 随访报表导出
// ==========================================
// 输入: 排程结果 + 三个计算入参 (治疗日期、分期、参考日期)
// 输出: CSV (一行 = 访视 × 检查) / JSON / 纯文本
// 红线: 纯消费者,不参与计算
// ==========================================

use crate::domain::date_format::{self, format_date};
use crate::domain::schedule::ScheduledVisit;
use crate::domain::types::Stage;
use crate::engine::ScheduleRequest;
use crate::report::grouping::group_by_observation_year;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io;

// ==========================================
// ScheduleReport - 报表数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    #[serde(with = "date_format")]
    pub treatment_date: NaiveDate,
    pub stage: Stage,
    #[serde(with = "date_format")]
    pub reference_date: NaiveDate,
    pub visits: Vec<ScheduledVisit>,
}

/// CSV 行（访视 × 检查）
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    treatment_date: &'a str,
    stage: Stage,
    reference_date: &'a str,
    observation_year: u32,
    visit_number: u32,
    months_after_treatment: u32,
    visit_type: &'a str,
    scheduled_date: String,
    is_past: bool,
    workday_adjusted: bool,
    code: &'a str,
    description: &'a str,
    is_mandatory: Option<bool>,
}

impl ScheduleReport {
    pub fn new(request: &ScheduleRequest, visits: Vec<ScheduledVisit>) -> Self {
        Self {
            treatment_date: request.treatment_date,
            stage: request.stage,
            reference_date: request.reference_date,
            visits,
        }
    }

    /// 写出 CSV
    ///
    /// 无检查的访视输出一行,检查列留空
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let treatment_date = format_date(self.treatment_date);
        let reference_date = format_date(self.reference_date);

        for visit in &self.visits {
            if visit.examinations.is_empty() {
                wtr.serialize(self.csv_row(&treatment_date, &reference_date, visit, "", "", None))?;
                continue;
            }

            for exam in &visit.examinations {
                wtr.serialize(self.csv_row(
                    &treatment_date,
                    &reference_date,
                    visit,
                    &exam.code,
                    &exam.description,
                    Some(exam.is_mandatory),
                ))?;
            }
        }

        wtr.flush()?;
        Ok(())
    }

    fn csv_row<'a>(
        &self,
        treatment_date: &'a str,
        reference_date: &'a str,
        visit: &'a ScheduledVisit,
        code: &'a str,
        description: &'a str,
        is_mandatory: Option<bool>,
    ) -> CsvRow<'a> {
        CsvRow {
            treatment_date,
            stage: self.stage,
            reference_date,
            observation_year: visit.observation_year(),
            visit_number: visit.visit_number,
            months_after_treatment: visit.months_after_treatment,
            visit_type: &visit.visit_type,
            scheduled_date: format_date(visit.scheduled_date),
            is_past: visit.is_past,
            workday_adjusted: visit.workday_adjusted,
            code,
            description,
            is_mandatory,
        }
    }

    /// CSV 文本
    pub fn to_csv_string(&self) -> csv::Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// JSON 文本（缩进格式）
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// 纯文本（按随访年度分组）
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "随访计划  治疗日期: {}  分期: {}  参考日期: {}",
            format_date(self.treatment_date),
            self.stage,
            format_date(self.reference_date)
        );

        if self.visits.is_empty() {
            let _ = writeln!(out, "未找到任何访视。");
            return out;
        }

        for (year, visits) in group_by_observation_year(&self.visits) {
            let _ = writeln!(out);
            let _ = writeln!(out, "== 第 {} 年 ==", year);

            for visit in visits {
                let status = if visit.is_past { "已过" } else { "待完成" };
                let adjusted = if visit.workday_adjusted {
                    format!(" (由 {} 顺延)", format_date(visit.projected_date))
                } else {
                    String::new()
                };
                let _ = writeln!(
                    out,
                    "[{}] {}{}  访视 {} · {} · 第 {} 月",
                    status,
                    format_date(visit.scheduled_date),
                    adjusted,
                    visit.visit_number,
                    visit.visit_type,
                    visit.months_after_treatment
                );

                if visit.examinations.is_empty() {
                    let _ = writeln!(out, "    （该分期无适用检查）");
                }
                for exam in &visit.examinations {
                    let _ = writeln!(out, "    {} - {}", exam.code, exam.description);
                }
            }
        }

        out
    }
}
