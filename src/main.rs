// ==========================================
// 肿瘤随访排程系统 - 命令行入口
// ==========================================
// 用法:
//   oncology-followup --treatment-date 01.09.2023 --stage III \
//       [--reference-date 01.03.2025] [--plan observation_plan.json] \
//       [--config followup.json] [--format text|json|csv] [--suppress-empty]
// ==========================================
// 参考日期缺省取本地系统日期（仅在此处读取时钟）
// ==========================================

use chrono::Local;
use clap::{Parser, ValueEnum};
use oncology_followup::domain::date_format::format_date;
use oncology_followup::{logging, EmptyVisitPolicy, ScheduleApi, ScheduleConfig, ScheduleRequest};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "oncology-followup")]
#[command(version, about = "根治性治疗后的肿瘤随访检查计划")]
struct Cli {
    /// 治疗日期 (dd.mm.yyyy)
    #[arg(long)]
    treatment_date: String,

    /// 疾病分期 (I/II/III/IV)
    #[arg(long)]
    stage: String,

    /// 参考日期 (dd.mm.yyyy)，缺省为今天
    #[arg(long)]
    reference_date: Option<String>,

    /// 随访计划文件
    #[arg(long)]
    plan: Option<PathBuf>,

    /// 配置文件 (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 输出格式
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// 剔除无适用检查的访视
    #[arg(long)]
    suppress_empty: bool,
}

fn main() -> ExitCode {
    logging::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;
    tracing::info!(
        plan = %config.plan_path.display(),
        policy = %config.empty_visit_policy,
        "{} v{}",
        oncology_followup::APP_NAME,
        oncology_followup::VERSION
    );

    let request = build_request(&cli)?;
    let api = ScheduleApi::new(config)?;
    let report = api.build_report(&request)?;

    let rendered = match cli.format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => report.to_json()?,
        OutputFormat::Csv => report.to_csv_string()?,
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}

/// 配置优先级: 默认值 → 配置文件 → 环境变量 → 命令行
fn build_config(cli: &Cli) -> anyhow::Result<ScheduleConfig> {
    let config = match &cli.config {
        Some(path) => ScheduleConfig::from_json_file(path)?,
        None => ScheduleConfig::default(),
    };
    let mut config = config.apply_env_overrides()?;

    if let Some(plan) = &cli.plan {
        config.plan_path = plan.clone();
    }
    if cli.suppress_empty {
        config.empty_visit_policy = EmptyVisitPolicy::Suppress;
    }
    Ok(config)
}

fn build_request(cli: &Cli) -> anyhow::Result<ScheduleRequest> {
    let today = format_date(Local::now().date_naive());
    let reference_date = cli.reference_date.as_deref().unwrap_or(&today);

    let request = ScheduleRequest::from_text(&cli.treatment_date, &cli.stage, reference_date)?;
    Ok(request)
}
