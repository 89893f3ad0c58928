// ==========================================
// 肿瘤随访排程系统 - 领域类型定义
// ==========================================
// 职责: 疾病分期、空访视策略等封闭枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 疾病分期 (Stage)
// ==========================================
// 封闭集合: I / II / III / IV
// 序列化格式: 罗马数字原文 (与随访计划文档一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    I,
    II,
    III,
    IV,
}

impl Stage {
    /// 全部分期（按严重程度升序）
    pub const ALL: [Stage; 4] = [Stage::I, Stage::II, Stage::III, Stage::IV];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::I => "I",
            Stage::II => "II",
            Stage::III => "III",
            Stage::IV => "IV",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    /// 解析分期标签
    ///
    /// 仅接受 I/II/III/IV 原样标签
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Stage::I),
            "II" => Ok(Stage::II),
            "III" => Ok(Stage::III),
            "IV" => Ok(Stage::IV),
            other => Err(format!("未知分期: {}（仅支持 I/II/III/IV）", other)),
        }
    }
}

// ==========================================
// 空访视策略 (Empty Visit Policy)
// ==========================================
// 当某次访视在给定分期下没有任何适用检查时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyVisitPolicy {
    /// 保留空访视（默认）
    #[default]
    Retain,
    /// 从结果中剔除空访视
    Suppress,
}

impl fmt::Display for EmptyVisitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyVisitPolicy::Retain => write!(f, "retain"),
            EmptyVisitPolicy::Suppress => write!(f, "suppress"),
        }
    }
}

impl FromStr for EmptyVisitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retain" | "keep" => Ok(EmptyVisitPolicy::Retain),
            "suppress" | "drop" => Ok(EmptyVisitPolicy::Suppress),
            other => Err(format!("未知空访视策略: {}（仅支持 retain/suppress）", other)),
        }
    }
}
