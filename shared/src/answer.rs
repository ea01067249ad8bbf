//! 答案模型
//!
//! `AnswerValue` 是四种答案形态的和类型，每种题型只接受其中一种；
//! `AnswerMap` 是一次问卷会话中所有答案的集合。

use crate::date::IsoDate;
use crate::question::RenderType;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

// =========================================================
// AnswerValue
// =========================================================

/// 单个问题的答案
///
/// 数值总是有限的（NaN / 无穷在进入此类型之前就被归一化为"无答案"）。
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    /// `numberInput` 与 `bmi`
    Number(f64),
    /// `date`
    Date(IsoDate),
    /// `singleSelect`
    Choice(String),
    /// `multiSelect`
    Choices(Vec<String>),
}

impl AnswerValue {
    /// 构造数值答案，非有限值返回 None
    pub fn number(n: f64) -> Option<Self> {
        n.is_finite().then_some(Self::Number(n))
    }

    /// 该形态是否是给定题型的合法形态
    pub fn fits(&self, render_type: RenderType) -> bool {
        matches!(
            (self, render_type),
            (Self::Number(_), RenderType::NumberInput | RenderType::Bmi)
                | (Self::Date(_), RenderType::Date)
                | (Self::Choice(_), RenderType::SingleSelect)
                | (Self::Choices(_), RenderType::MultiSelect)
        )
    }

    /// 非空判定：空字符串、空列表、含空字符串的列表都视为未作答
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Number(n) => n.is_finite(),
            Self::Date(_) => true,
            Self::Choice(s) => !s.is_empty(),
            Self::Choices(list) => !list.is_empty() && list.iter().all(|s| !s.is_empty()),
        }
    }

    /// 按题型解码后端返回的原始答案
    ///
    /// 形态不匹配时返回 None，不做猜测。
    pub fn from_json(render_type: RenderType, raw: &Value) -> Option<Self> {
        match render_type {
            RenderType::NumberInput | RenderType::Bmi => raw.as_f64().and_then(Self::number),
            RenderType::Date => raw.as_str().and_then(IsoDate::parse).map(Self::Date),
            RenderType::SingleSelect => raw.as_str().map(|s| Self::Choice(s.to_string())),
            RenderType::MultiSelect => raw
                .as_array()?
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::Choices),
        }
    }

    /// 转换为传输用的 JSON 值
    pub fn to_json(&self) -> Value {
        match self {
            // is_finite 保证了 from_f64 成功；兜底为 null
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Date(d) => Value::String(d.to_iso_string()),
            Self::Choice(s) => Value::String(s.clone()),
            Self::Choices(list) => Value::Array(list.iter().cloned().map(Value::String).collect()),
        }
    }

    /// 答案中的所有字符串标记（单选为一个，多选为全部）
    pub fn tokens(&self) -> &[String] {
        match self {
            Self::Choice(s) => std::slice::from_ref(s),
            Self::Choices(list) => list,
            Self::Number(_) | Self::Date(_) => &[],
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<IsoDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl Serialize for AnswerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// 答案是否存在且非空
pub fn is_answered(answer: Option<&AnswerValue>) -> bool {
    answer.is_some_and(AnswerValue::is_filled)
}

// =========================================================
// AnswerMap
// =========================================================

/// 问题 key -> 答案
///
/// 内部有序存储，保证序列化输出稳定。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerMap(BTreeMap<String, AnswerValue>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.0.get(key)
    }

    /// 设置答案；`None` 表示移除
    pub fn set(&mut self, key: impl Into<String>, answer: Option<AnswerValue>) {
        let key = key.into();
        match answer {
            Some(value) => {
                self.0.insert(key, value);
            }
            None => {
                self.0.remove(&key);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<AnswerValue> {
        self.0.remove(key)
    }

    pub fn is_answered(&self, key: &str) -> bool {
        is_answered(self.get(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 转换为传输用的 JSON 对象
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for AnswerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filled_rules() {
        assert!(AnswerValue::Number(0.0).is_filled());
        assert!(!AnswerValue::Choice(String::new()).is_filled());
        assert!(AnswerValue::Choice("yes".into()).is_filled());
        assert!(!AnswerValue::Choices(vec![]).is_filled());
        assert!(!AnswerValue::Choices(vec!["a".into(), String::new()]).is_filled());
        assert!(AnswerValue::Choices(vec!["a".into()]).is_filled());
        assert!(!is_answered(None));
    }

    #[test]
    fn test_number_rejects_non_finite() {
        assert!(AnswerValue::number(f64::NAN).is_none());
        assert!(AnswerValue::number(f64::INFINITY).is_none());
        assert_eq!(AnswerValue::number(21.0), Some(AnswerValue::Number(21.0)));
    }

    #[test]
    fn test_from_json_rejects_mismatched_shapes() {
        assert_eq!(
            AnswerValue::from_json(RenderType::NumberInput, &json!(27)),
            Some(AnswerValue::Number(27.0))
        );
        assert_eq!(AnswerValue::from_json(RenderType::NumberInput, &json!("27")), None);
        assert_eq!(AnswerValue::from_json(RenderType::Date, &json!("not a date")), None);
        assert_eq!(AnswerValue::from_json(RenderType::SingleSelect, &json!(["a"])), None);
        assert_eq!(AnswerValue::from_json(RenderType::MultiSelect, &json!(["a", 1])), None);
        assert_eq!(
            AnswerValue::from_json(RenderType::MultiSelect, &json!(["a", "b"])),
            Some(AnswerValue::Choices(vec!["a".into(), "b".into()]))
        );
        assert_eq!(
            AnswerValue::from_json(RenderType::Date, &json!("2025-04-01T00:00:00.000Z")),
            IsoDate::from_ymd(2025, 4, 1).map(AnswerValue::Date)
        );
    }

    #[test]
    fn test_fits() {
        assert!(AnswerValue::Number(1.0).fits(RenderType::Bmi));
        assert!(!AnswerValue::Number(1.0).fits(RenderType::Date));
        assert!(!AnswerValue::Choice("x".into()).fits(RenderType::MultiSelect));
    }

    #[test]
    fn test_map_set_none_removes() {
        let mut map = AnswerMap::new();
        map.set("age", Some(AnswerValue::Number(30.0)));
        assert!(map.is_answered("age"));
        map.set("age", None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_map_serializes_as_plain_object() {
        let mut map = AnswerMap::new();
        map.set("age", Some(AnswerValue::Number(30.0)));
        map.set("goals", Some(AnswerValue::Choices(vec!["strength".into()])));
        map.set("lastPeriod", IsoDate::from_ymd(2025, 2, 3).map(AnswerValue::Date));
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(
            value,
            json!({
                "age": 30.0,
                "goals": ["strength"],
                "lastPeriod": "2025-02-03T00:00:00.000Z"
            })
        );
        assert_eq!(value, map.to_json());
    }
}
