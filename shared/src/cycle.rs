//! 周期与健康派生值
//!
//! 周期天数和阶段按固定 28 天窗口计算，与用户实际周期长度无关；
//! BMI 分类使用固定阈值。

use crate::date::IsoDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 假定的周期长度（天）
pub const ASSUMED_CYCLE_LENGTH: i64 = 28;

// =========================================================
// BMI
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::NormalWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =========================================================
// 周期阶段
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstruation,
    Follicular,
    Ovulation,
    Luteal,
    #[default]
    Unknown,
}

impl CyclePhase {
    /// 固定窗口：1-5 月经期，6-13 卵泡期，14-16 排卵期，其余黄体期
    pub fn for_day(cycle_day: u32) -> Self {
        match cycle_day {
            0 => Self::Unknown,
            1..=5 => Self::Menstruation,
            6..=13 => Self::Follicular,
            14..=16 => Self::Ovulation,
            _ => Self::Luteal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Menstruation => "Menstruation",
            Self::Follicular => "Follicular",
            Self::Ovulation => "Ovulation",
            Self::Luteal => "Luteal",
            Self::Unknown => "Unknown",
        }
    }

    /// 训练建议
    pub fn workout_focus(&self) -> [&'static str; 3] {
        match self {
            Self::Menstruation => [
                "Gentle yoga or stretching",
                "Walking or light cardio",
                "Restorative exercises",
            ],
            Self::Follicular => [
                "High-intensity interval training",
                "Strength training",
                "Cardio classes",
            ],
            Self::Ovulation => [
                "Circuit training",
                "Endurance workouts",
                "Group fitness classes",
            ],
            Self::Luteal => [
                "Moderate strength training",
                "Pilates or barre",
                "Swimming or cycling",
            ],
            Self::Unknown => [
                "Balanced strength and cardio",
                "Flexibility exercises",
                "Rest and recovery as needed",
            ],
        }
    }

    /// 饮食建议
    pub fn nutrition_focus(&self) -> [&'static str; 3] {
        match self {
            Self::Menstruation => [
                "Iron-rich foods (leafy greens, lentils)",
                "Anti-inflammatory foods (berries, nuts)",
                "Stay hydrated with water and herbal teas",
            ],
            Self::Follicular => [
                "Complex carbs for energy (oats, brown rice)",
                "Lean proteins (chicken, fish, tofu)",
                "Vitamin B-rich foods (whole grains, eggs)",
            ],
            Self::Ovulation => [
                "Magnesium-rich foods (dark chocolate, avocados)",
                "Antioxidant-rich foods (colorful fruits and vegetables)",
                "Healthy fats (olive oil, nuts, seeds)",
            ],
            Self::Luteal => [
                "Calcium-rich foods (dairy or fortified plant milks)",
                "Fiber-rich foods to reduce bloating (beans, vegetables)",
                "Limit caffeine, salt, and sugar",
            ],
            Self::Unknown => [
                "Balanced meals with protein, healthy fats, and complex carbs",
                "Colorful fruits and vegetables",
                "Stay hydrated throughout the day",
            ],
        }
    }

    /// 训练卡片的说明文字
    pub fn workout_note(&self) -> &'static str {
        match self {
            Self::Menstruation => {
                "During Menstruation, your energy is lower. Gentle movement supports your body's natural recovery process."
            }
            Self::Follicular => {
                "The Follicular phase is a great time to build muscle as your energy increases. Your body naturally has more stamina now."
            }
            Self::Ovulation => {
                "During Ovulation, your energy is at its peak, making it ideal for high-intensity workouts and setting new personal records."
            }
            Self::Luteal => {
                "In the Luteal phase, your body is winding down. Focus on moderate activity and active recovery to support this transition."
            }
            Self::Unknown => {
                "Matching your workouts to your cycle phase can optimize results and make exercise feel more natural and enjoyable."
            }
        }
    }

    /// 饮食卡片的说明文字
    pub fn nutrition_note(&self) -> &'static str {
        match self {
            Self::Menstruation => {
                "During menstruation, your body needs extra iron and anti-inflammatory foods to replenish what's lost and reduce discomfort."
            }
            Self::Follicular => {
                "During your follicular phase, focus on foods that support rising estrogen levels. Your metabolism is increasing and your body needs more nutrients."
            }
            Self::Ovulation => {
                "During ovulation, your body benefits from antioxidant-rich foods that support hormone balance and cellular health."
            }
            Self::Luteal => {
                "In the luteal phase, your body needs foods that help balance mood and reduce bloating as progesterone rises."
            }
            Self::Unknown => {
                "Eating according to your cycle phase can help manage symptoms and provide your body with exactly what it needs when it needs it."
            }
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CyclePhase {
    type Err = std::convert::Infallible;

    /// 大小写不敏感；兼容 "menstrual" / "ovulatory" 等写法，未知值为 Unknown
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "menstruation" | "menstrual" => Self::Menstruation,
            "follicular" => Self::Follicular,
            "ovulation" | "ovulatory" => Self::Ovulation,
            "luteal" => Self::Luteal,
            _ => Self::Unknown,
        })
    }
}

impl<'de> Deserialize<'de> for CyclePhase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(|s| s.parse().unwrap_or_default())
            .unwrap_or_default())
    }
}

/// 由上次经期日期推算的周期信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSnapshot {
    pub cycle_day: u32,
    pub phase: CyclePhase,
}

impl CycleSnapshot {
    /// 没有日期时默认第 1 天、月经期
    pub fn from_last_period(last_period: Option<IsoDate>, today: IsoDate) -> Self {
        let cycle_day = match last_period {
            Some(start) => {
                let days = today.days_since(start);
                (days.rem_euclid(ASSUMED_CYCLE_LENGTH) + 1) as u32
            }
            None => 1,
        };
        Self {
            cycle_day,
            phase: CyclePhase::for_day(cycle_day),
        }
    }
}

// =========================================================
// 心情
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Energetic,
    Balanced,
    Tired,
    Stressed,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Energetic, Mood::Balanced, Mood::Tired, Mood::Stressed];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Energetic => "Energetic",
            Self::Balanced => "Balanced",
            Self::Tired => "Tired",
            Self::Stressed => "Stressed",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Energetic => "😄",
            Self::Balanced => "😊",
            Self::Tired => "😴",
            Self::Stressed => "😓",
        }
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mood `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> IsoDate {
        IsoDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_bmi_thresholds() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_phase_windows() {
        assert_eq!(CyclePhase::for_day(1), CyclePhase::Menstruation);
        assert_eq!(CyclePhase::for_day(5), CyclePhase::Menstruation);
        assert_eq!(CyclePhase::for_day(6), CyclePhase::Follicular);
        assert_eq!(CyclePhase::for_day(13), CyclePhase::Follicular);
        assert_eq!(CyclePhase::for_day(14), CyclePhase::Ovulation);
        assert_eq!(CyclePhase::for_day(16), CyclePhase::Ovulation);
        assert_eq!(CyclePhase::for_day(17), CyclePhase::Luteal);
        assert_eq!(CyclePhase::for_day(28), CyclePhase::Luteal);
    }

    #[test]
    fn test_snapshot_wraps_on_28_days() {
        let start = date(2025, 1, 1);
        let snap = CycleSnapshot::from_last_period(Some(start), date(2025, 1, 1));
        assert_eq!(snap.cycle_day, 1);
        let snap = CycleSnapshot::from_last_period(Some(start), date(2025, 1, 15));
        assert_eq!((snap.cycle_day, snap.phase), (15, CyclePhase::Ovulation));
        let snap = CycleSnapshot::from_last_period(Some(start), date(2025, 1, 29));
        assert_eq!(snap.cycle_day, 1);
    }

    #[test]
    fn test_snapshot_defaults_without_date() {
        let snap = CycleSnapshot::from_last_period(None, date(2025, 1, 1));
        assert_eq!((snap.cycle_day, snap.phase), (1, CyclePhase::Menstruation));
    }

    #[test]
    fn test_phase_parsing_is_lenient() {
        let phase: CyclePhase = serde_json::from_str("\"Follicular\"").unwrap();
        assert_eq!(phase, CyclePhase::Follicular);
        let phase: CyclePhase = serde_json::from_str("\"ovulatory\"").unwrap();
        assert_eq!(phase, CyclePhase::Ovulation);
        let phase: CyclePhase = serde_json::from_str("\"awaiting cycle start\"").unwrap();
        assert_eq!(phase, CyclePhase::Unknown);
        let phase: CyclePhase = serde_json::from_str("null").unwrap();
        assert_eq!(phase, CyclePhase::Unknown);
    }

    #[test]
    fn test_mood_wire_format() {
        assert_eq!(serde_json::to_string(&Mood::Tired).unwrap(), "\"tired\"");
    }
}
