//! 用户与首页数据模型（后端 `/sections/home` 等接口返回）

use crate::cycle::{CyclePhase, Mood};
use crate::date::IsoDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 引导问卷中"上次经期开始日期"的 key
pub const LAST_PERIOD_KEY: &str = "lastPeriod";
/// 引导问卷中 BMI 的 key
pub const BMI_KEY: &str = "bmi";

/// 每日心情记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMood {
    /// ISO-8601 时间戳
    pub date: String,
    pub mood: String,
}

impl DailyMood {
    pub fn day(&self) -> Option<IsoDate> {
        IsoDate::parse(&self.date)
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub completed_onboarding: bool,
    #[serde(default)]
    pub onboarding_answers: Value,
    #[serde(default)]
    pub daily_mood: Vec<DailyMood>,
}

impl UserProfile {
    /// 名字的第一个词，用于问候语
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("")
    }

    /// 最近一条心情记录是否在 `today` 当天
    pub fn logged_mood_on(&self, today: IsoDate) -> bool {
        self.daily_mood
            .last()
            .and_then(DailyMood::day)
            .is_some_and(|day| day == today)
    }

    /// 是否填写过上次经期日期；没有时首页只提示补充
    pub fn tracks_cycle(&self) -> bool {
        self.onboarding_answers
            .get(LAST_PERIOD_KEY)
            .is_some_and(|v| !v.is_null() && v.as_str() != Some(""))
    }

    pub fn latest_mood(&self) -> Option<Mood> {
        self.daily_mood.last().and_then(DailyMood::mood)
    }
}

/// 后端计算的周期概况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub cycle_day: i64,
    #[serde(default)]
    pub cycle_phase: CyclePhase,
    /// -1 表示未知
    #[serde(default = "unknown_days")]
    pub next_phase_in: i64,
    #[serde(default)]
    pub cycle_percentage: f64,
    #[serde(default = "default_cycle_length")]
    pub cycle_length: i64,
}

fn unknown_days() -> i64 {
    -1
}

fn default_cycle_length() -> i64 {
    28
}

impl UserInfo {
    pub fn next_phase_in(&self) -> Option<i64> {
        (self.next_phase_in >= 0).then_some(self.next_phase_in)
    }
}

/// 激素水平条
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HormoneLevel {
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub notes: String,
}

impl HormoneLevel {
    /// 进度条宽度，限制在 0..=100
    pub fn width_percent(&self) -> f64 {
        if self.percentage.is_finite() {
            self.percentage.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// 当天所处阶段的说明
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseInsight {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub superpower: String,
    #[serde(default)]
    pub fact: String,
    #[serde(default)]
    pub estrogen: HormoneLevel,
    #[serde(default)]
    pub progesterone: HormoneLevel,
    #[serde(default)]
    pub testosterone: HormoneLevel,
}

/// `/sections/home` 的数据部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSection {
    pub user: UserProfile,
    pub user_info: Option<UserInfo>,
    pub cycle_info: Option<PhaseInsight>,
}

impl HomeSection {
    pub fn phase(&self) -> CyclePhase {
        self.user_info
            .as_ref()
            .map(|info| info.cycle_phase)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> IsoDate {
        IsoDate::from_ymd(y, m, d).unwrap()
    }

    fn user_with_moods(moods: Value) -> UserProfile {
        serde_json::from_value(json!({
            "_id": "u1",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "completedOnboarding": true,
            "dailyMood": moods
        }))
        .unwrap()
    }

    #[test]
    fn test_logged_mood_uses_latest_entry() {
        let user = user_with_moods(json!([
            {"date": "2025-06-09T08:00:00.000Z", "mood": "tired"},
            {"date": "2025-06-10T21:30:00.000Z", "mood": "energetic"}
        ]));
        assert!(user.logged_mood_on(date(2025, 6, 10)));
        assert!(!user.logged_mood_on(date(2025, 6, 11)));
        assert_eq!(user.latest_mood(), Some(Mood::Energetic));
        assert_eq!(user.first_name(), "Ada");
    }

    #[test]
    fn test_no_mood_history() {
        let user = user_with_moods(json!([]));
        assert!(!user.logged_mood_on(date(2025, 6, 10)));
        assert_eq!(user.latest_mood(), None);
    }

    #[test]
    fn test_home_section_tolerates_missing_parts() {
        let home: HomeSection = serde_json::from_value(json!({
            "user": {"_id": "u1", "fullName": "Ada", "completedOnboarding": true},
            "userInfo": {"cycleDay": 9, "cyclePhase": "Follicular"},
            "cycleInfo": {"description": "Rising energy",
                          "estrogen": {"percentage": 140, "notes": "High"}}
        }))
        .unwrap();
        assert_eq!(home.phase(), CyclePhase::Follicular);
        let info = home.user_info.as_ref().unwrap();
        assert_eq!(info.next_phase_in(), None);
        assert_eq!(info.cycle_length, 28);
        let insight = home.cycle_info.unwrap();
        assert_eq!(insight.estrogen.width_percent(), 100.0);
        assert_eq!(insight.testosterone, HormoneLevel::default());
    }

    #[test]
    fn test_tracks_cycle_needs_period_date() {
        let mut user = user_with_moods(json!([]));
        assert!(!user.tracks_cycle());
        user.onboarding_answers = json!({"lastPeriod": ""});
        assert!(!user.tracks_cycle());
        user.onboarding_answers = json!({"lastPeriod": "2025-06-01T00:00:00.000Z", "bmi": 22.1});
        assert!(user.tracks_cycle());
    }
}
