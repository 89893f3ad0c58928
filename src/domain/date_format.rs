// ==========================================
// 肿瘤随访排程系统 - 日期文本格式
// ==========================================
// 格式: 日.月.年 (dd.mm.yyyy)
// 用途: 入参解析 + 结果序列化
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

/// 日期文本格式（chrono 格式串）
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// 解析 dd.mm.yyyy 文本日期（忽略首尾空白）
pub fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
}

/// 格式化为 dd.mm.yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// serde 适配: `#[serde(with = "date_format")]`
pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_date(*date))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("01.09.2023").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 9, 1).unwrap());

        let date = parse_date(" 15.01.2024 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("2023-09-01").is_err());
        assert!(parse_date("31.02.2024").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn test_format_date_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        assert_eq!(format_date(date), "05.07.2024");
    }
}
