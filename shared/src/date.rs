//! 日期类型模块
//!
//! 提供问卷使用的日历日期类型：
//! - `IsoDate`: 不含时区的日历日，传输时统一为 ISO-8601 字符串
//! - `today()`: 当前日期（WASM 下来自浏览器时钟）

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 展示格式：日/月/年
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

// =========================================================
// IsoDate - 可传输的日期类型
// =========================================================

/// 日历日期
///
/// 序列化为 `YYYY-MM-DDT00:00:00.000Z`，与后端保存的格式一致；
/// 解析时同时接受完整的 RFC 3339 时间戳和纯日期 `YYYY-MM-DD`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 按年月日构造，非法日期返回 None
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// 从 ISO 8601 / RFC 3339 字符串解析
    ///
    /// 返回 None 如果解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc).date_naive()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Self)
    }

    #[inline]
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// 传输格式（ISO-8601，UTC 零点）
    pub fn to_iso_string(&self) -> String {
        format!("{}T00:00:00.000Z", self.0.format("%Y-%m-%d"))
    }

    /// `<input type="date">` 使用的格式
    pub fn to_input_value(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// 展示格式：`dd/mm/yyyy`
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    /// 长格式，如 `May 4, 2025`
    pub fn long_display(&self) -> String {
        format!("{} {}, {}", self.0.format("%B"), self.0.day(), self.0.year())
    }

    /// 与另一个日期相差的天数 (`self - earlier`)
    pub fn days_since(&self, earlier: IsoDate) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// 是否晚于给定日期
    #[inline]
    pub fn is_after(&self, other: IsoDate) -> bool {
        self.0 > other.0
    }
}

impl From<NaiveDate> for IsoDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for IsoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        IsoDate::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO date: {raw}")))
    }
}

/// 某一时刻在其所在时区的日历日
pub fn calendar_day<Tz: TimeZone>(now: &DateTime<Tz>) -> IsoDate {
    IsoDate(now.date_naive())
}

/// 获取用户本地的当前日期（WASM 下来自浏览器时钟与时区）
pub fn today() -> IsoDate {
    calendar_day(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_timestamp_and_plain_date() {
        let a = IsoDate::parse("2025-03-09T00:00:00.000Z").unwrap();
        let b = IsoDate::parse("2025-03-09").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.display(), "09/03/2025");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(IsoDate::parse("yesterday").is_none());
        assert!(IsoDate::parse("2025-02-30").is_none());
        assert!(IsoDate::parse("").is_none());
    }

    #[test]
    fn test_iso_string_is_utc_midnight() {
        let d = IsoDate::from_ymd(2024, 12, 1).unwrap();
        assert_eq!(d.to_iso_string(), "2024-12-01T00:00:00.000Z");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2024-12-01T00:00:00.000Z\"");
    }

    #[test]
    fn test_long_display() {
        let d = IsoDate::from_ymd(2025, 5, 4).unwrap();
        assert_eq!(d.long_display(), "May 4, 2025");
    }

    #[test]
    fn test_days_since() {
        let a = IsoDate::from_ymd(2025, 1, 1).unwrap();
        let b = IsoDate::from_ymd(2025, 1, 31).unwrap();
        assert_eq!(b.days_since(a), 30);
        assert_eq!(a.days_since(b), -30);
        assert!(b.is_after(a));
    }

    #[test]
    fn test_calendar_day_follows_local_offset() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 19, 11, 27, 0).unwrap();
        // UTC+14 已经是第二天
        let kiritimati = chrono::FixedOffset::east_opt(14 * 3600).unwrap();
        assert_eq!(
            calendar_day(&instant.with_timezone(&kiritimati)),
            IsoDate::from_ymd(2026, 10, 20).unwrap()
        );
        // UTC-10 仍是前一天晚上
        let late = Utc.with_ymd_and_hms(2026, 10, 20, 5, 0, 0).unwrap();
        let honolulu = chrono::FixedOffset::west_opt(10 * 3600).unwrap();
        assert_eq!(
            calendar_day(&late.with_timezone(&honolulu)),
            IsoDate::from_ymd(2026, 10, 19).unwrap()
        );
    }

    #[test]
    fn test_today_is_local_calendar_day() {
        // 在 TZ 非 UTC 的环境下同样成立
        let before = Local::now().date_naive();
        let day = today().naive();
        let after = Local::now().date_naive();
        assert!(day == before || day == after);
    }
}
