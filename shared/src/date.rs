//! 时间展示模块
//!
//! 后端把 `creado` 序列化为 ISO-8601 字符串（时区后缀在
//! `Z` / `+00:00` 之间摇摆）。这里集中做宽松解析和展示格式化，
//! 界面层不再各自 parse。

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// 宽松解析 ISO-8601 时间戳
///
/// 接受 RFC3339（带时区）和 naive（无时区，按原样处理）。
pub fn parse_iso(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// 订单列表 / 详情使用的展示格式：`dd/mm/yyyy HH:MM`
///
/// 解析失败时原样返回，宁可展示原始串也不丢信息。
pub fn format_fecha(raw: &str) -> String {
    match parse_iso(raw) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// 只带日期的短格式：`dd/mm/yyyy`
pub fn format_fecha_corta(raw: &str) -> String {
    match parse_iso(raw) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_z_and_offset() {
        assert_eq!(format_fecha("2025-03-01T12:30:00Z"), "01/03/2025 12:30");
        assert_eq!(
            format_fecha_corta("2025-03-01T12:30:00-03:00"),
            "01/03/2025"
        );
    }

    #[test]
    fn parses_naive_timestamp() {
        assert_eq!(
            format_fecha("2025-03-01T12:30:00.123456"),
            "01/03/2025 12:30"
        );
    }

    #[test]
    fn unparseable_input_passes_through() {
        assert_eq!(format_fecha("ayer"), "ayer");
        assert_eq!(format_fecha(""), "");
    }
}
