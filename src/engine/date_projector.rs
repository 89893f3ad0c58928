// ==========================================
// 肿瘤随访排程系统 - 访视日期推算
// ==========================================
// 规则: 访视日期 = 治疗日期 + 30 × 月数 (固定 30 天/月,不做自然月换算)
// 规则: 仅对晚于参考日期的访视顺延至工作日
//       周六 → +2 天, 周日 → +1 天, 其余不变
// 红线: 改为自然月算法属于行为变更,会整体平移所有访视日期
// ==========================================

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// 每"月"天数
pub const DAYS_PER_MONTH: u64 = 30;

/// 单次访视日期推算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedDate {
    /// 原始推算日期
    pub raw: NaiveDate,
    /// 排程日期（可能已顺延）
    pub scheduled: NaiveDate,
    /// 是否发生顺延
    pub adjusted: bool,
}

// ==========================================
// DateProjector - 纯函数工具类
// ==========================================
pub struct DateProjector;

impl DateProjector {
    /// 推算访视日期
    ///
    /// # 返回
    /// - Some(date): anchor + 30 × months 天
    /// - None: 超出日历范围
    pub fn project(anchor: NaiveDate, months_offset: u32) -> Option<NaiveDate> {
        anchor.checked_add_days(Days::new(DAYS_PER_MONTH * u64::from(months_offset)))
    }

    /// 顺延至工作日
    ///
    /// 对工作日幂等。NaiveDate::MAX 为周一,顺延不会越界。
    pub fn adjust_to_workday(date: NaiveDate) -> NaiveDate {
        let shift = match date.weekday() {
            Weekday::Sat => 2,
            Weekday::Sun => 1,
            _ => 0,
        };
        date.checked_add_days(Days::new(shift)).unwrap_or(date)
    }

    /// 推算 + 按参考日期决定是否顺延
    ///
    /// # 规则
    /// - raw > reference → 顺延至工作日
    /// - raw <= reference → 保持原始日期（历史访视按原计划日期呈现）
    pub fn schedule(
        anchor: NaiveDate,
        months_offset: u32,
        reference: NaiveDate,
    ) -> Option<ProjectedDate> {
        let raw = Self::project(anchor, months_offset)?;

        let scheduled = if raw > reference {
            Self::adjust_to_workday(raw)
        } else {
            raw
        };

        Some(ProjectedDate {
            raw,
            scheduled,
            adjusted: scheduled != raw,
        })
    }
}
