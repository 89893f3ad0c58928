// ==========================================
// 排程 API 集成测试
// ==========================================
// 场景: 按配置加载、文本入参计算、显式刷新计划、报表导出
// ==========================================


use oncology_followup::engine::ScheduleRequest;
use oncology_followup::{
    ApiError, CalculationError, EmptyVisitPolicy, PlanRepositoryError, ScheduleApi,
    ScheduleConfig, Stage,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use test_helpers::*;

/// 将示例计划复制到临时目录,返回 (目录, 计划路径)
fn copy_sample_plan() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("observation_plan.json");
    fs::copy(sample_plan_path(), &path).unwrap();
    (dir, path)
}

fn config_for(path: PathBuf) -> ScheduleConfig {
    ScheduleConfig {
        plan_path: path,
        ..ScheduleConfig::default()
    }
}

const SINGLE_VISIT_PLAN: &str = r#"{"observation_plan": {"visits": [
    {"visit_number": 1, "months_after_treatment": 1, "examinations": [
        {"code": "B01.027.001", "description": "Oncologist consultation", "is_mandatory": true}
    ]}
]}}"#;

#[test]
fn test_calculate_from_text() {
    let (_dir, path) = copy_sample_plan();
    let api = ScheduleApi::new(config_for(path)).unwrap();

    let visits = api
        .calculate_from_text("01.09.2023", "III", "01.03.2025")
        .unwrap();
    assert_eq!(visits.len(), 10);
    assert_eq!(find_visit(&visits, 2).visit_type, "routine exam");
    assert_eq!(find_visit(&visits, 1).visit_type, "baseline");
}

#[test]
fn test_missing_plan_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ScheduleApi::new(config_for(dir.path().join("missing.json")));
    assert!(matches!(
        result,
        Err(ApiError::Plan(PlanRepositoryError::NotFound { .. }))
    ));
}

#[test]
fn test_calculation_error_passthrough() {
    let (_dir, path) = copy_sample_plan();
    let api = ScheduleApi::new(config_for(path)).unwrap();

    let err = api
        .calculate_from_text("31.02.2024", "I", "01.03.2025")
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Calculation(CalculationError::InvalidDate(_))
    ));
    assert!(err.to_string().contains("31.02.2024"));
}

#[test]
fn test_reload_plan_swaps_snapshot() {
    let (_dir, path) = copy_sample_plan();
    let api = ScheduleApi::new(config_for(path.clone())).unwrap();

    let before = api.plan_snapshot().unwrap();
    assert_eq!(before.len(), 10);

    fs::write(&path, SINGLE_VISIT_PLAN).unwrap();

    // 未显式刷新前继续使用旧计划
    let visits = api.calculate_from_text("15.01.2024", "I", "15.01.2024").unwrap();
    assert_eq!(visits.len(), 10);

    assert_eq!(api.reload_plan().unwrap(), 1);
    let visits = api.calculate_from_text("15.01.2024", "I", "15.01.2024").unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(format!("{}", visits[0].scheduled_date), "2024-02-14");

    // 已取出的旧快照不受刷新影响
    assert_eq!(before.len(), 10);
}

#[test]
fn test_failed_reload_keeps_previous_plan() {
    let (_dir, path) = copy_sample_plan();
    let api = ScheduleApi::new(config_for(path.clone())).unwrap();

    fs::write(&path, "{ not a plan").unwrap();
    let err = api.reload_plan().unwrap_err();
    assert!(matches!(
        err,
        ApiError::Plan(PlanRepositoryError::MalformedPlan { .. })
    ));

    assert_eq!(api.plan_snapshot().unwrap().len(), 10);
}

#[test]
fn test_with_plan_and_suppress_policy() {
    let config = ScheduleConfig {
        empty_visit_policy: EmptyVisitPolicy::Suppress,
        default_visit_type: "Плановый осмотр".to_string(),
        ..ScheduleConfig::default()
    };
    let api = ScheduleApi::with_plan(config, load_sample_plan());

    let visits = api.calculate_from_text("01.09.2023", "II", "01.03.2025").unwrap();
    assert!(visits.iter().all(|v| !v.examinations.is_empty()));
    assert_eq!(find_visit(&visits, 2).visit_type, "Плановый осмотр");
}

#[test]
fn test_build_report_exports() {
    let api = ScheduleApi::with_plan(ScheduleConfig::default(), load_sample_plan());
    let request = ScheduleRequest::new(d(2023, 9, 1), Stage::III, d(2025, 3, 1));

    let report = api.build_report(&request).unwrap();
    assert_eq!(report.stage, Stage::III);
    assert_eq!(report.visits.len(), 10);

    // 行数 = 表头 + Σ检查数 + 空访视数
    let exam_rows: usize = report
        .visits
        .iter()
        .map(|v| v.examinations.len().max(1))
        .sum();
    let csv = report.to_csv_string().unwrap();
    assert_eq!(csv.lines().count(), exam_rows + 1);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["treatment_date"], "01.09.2023");
    assert_eq!(json["reference_date"], "01.03.2025");
    assert_eq!(json["stage"], "III");
    assert_eq!(json["visits"][0]["scheduled_date"], "01.09.2023");

    let text = report.render_text();
    assert!(text.contains("== 第 6 年 =="));
}
