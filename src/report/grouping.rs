// ==========================================
// 肿瘤随访排程系统 - 展示层派生视图
// ==========================================
// 职责: 按随访年度分组、历史/未来拆分
// 红线: 只读消费排程结果,不重新调用引擎
// ==========================================

use crate::domain::schedule::ScheduledVisit;
use std::collections::BTreeMap;

/// 按随访年度分组（年度 = months / 12 + 1,组内保持原顺序）
pub fn group_by_observation_year(visits: &[ScheduledVisit]) -> BTreeMap<u32, Vec<&ScheduledVisit>> {
    let mut groups: BTreeMap<u32, Vec<&ScheduledVisit>> = BTreeMap::new();
    for visit in visits {
        groups.entry(visit.observation_year()).or_default().push(visit);
    }
    groups
}

/// 拆分为 (历史, 未来)
pub fn split_past_future(visits: &[ScheduledVisit]) -> (Vec<&ScheduledVisit>, Vec<&ScheduledVisit>) {
    visits.iter().partition(|v| v.is_past)
}

/// 下一次（首个非历史）访视
pub fn next_visit(visits: &[ScheduledVisit]) -> Option<&ScheduledVisit> {
    visits.iter().find(|v| !v.is_past)
}
