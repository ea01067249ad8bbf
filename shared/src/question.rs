//! 问题目录模块
//!
//! - `QuestionDefinition`: 后端返回的原始问题（传输格式）
//! - `Question` / `QuestionKind`: 校验后的问题，按题型携带各自需要的字段
//! - `QuestionCatalog`: 按阶段分组、按优先级排序的只读目录

use crate::answer::AnswerValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// 多选中的"以上都不是"哨兵选项
pub const OPTION_NONE: &str = "none";
/// 多选中的"其他"哨兵选项，选中后显示自由文本输入
pub const OPTION_OTHER: &str = "other";

// =========================================================
// 传输模型
// =========================================================

/// 题型标签（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderType {
    NumberInput,
    Date,
    SingleSelect,
    MultiSelect,
    Bmi,
}

/// 选择题的选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// 机器可读的答案标记
    pub value: String,
    /// 显示标题
    pub title: String,
    /// 选中后显示的补充说明
    #[serde(default, rename = "text", skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            title: title.into(),
            help_text: None,
        }
    }
}

/// 后端返回的原始问题定义
///
/// `key` 与 `question` 带默认值，缺失时在校验阶段被拒绝，
/// 而不是让整个目录反序列化失败。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub stage: u32,
    #[serde(default)]
    pub priority: i32,
    #[serde(rename = "type")]
    pub render_type: RenderType,
    #[serde(default, rename = "question")]
    pub prompt: String,
    #[serde(default, rename = "text", skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    /// 已有答案（编辑资料时由后端填充）
    #[serde(default, rename = "answer", skip_serializing_if = "Option::is_none")]
    pub prior_answer: Option<Value>,
}

// =========================================================
// 校验后的模型
// =========================================================

/// 目录条目校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("question entry is not an object or has an unknown type: {0}")]
    Malformed(String),
    #[error("question is missing its key")]
    MissingKey,
    #[error("question `{0}` is missing its prompt")]
    MissingPrompt(String),
    #[error("select question `{0}` has no options")]
    MissingOptions(String),
}

/// 按题型区分的问题形态
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    NumberInput {
        placeholder: Option<String>,
        label: Option<String>,
    },
    Date {
        placeholder: Option<String>,
    },
    SingleSelect {
        options: Vec<QuestionOption>,
    },
    MultiSelect {
        options: Vec<QuestionOption>,
        placeholder: Option<String>,
    },
    /// 身高/体重两个子字段的标签取自 options[0] / options[1]
    Bmi {
        height: Option<QuestionOption>,
        weight: Option<QuestionOption>,
    },
}

impl QuestionKind {
    pub fn render_type(&self) -> RenderType {
        match self {
            Self::NumberInput { .. } => RenderType::NumberInput,
            Self::Date { .. } => RenderType::Date,
            Self::SingleSelect { .. } => RenderType::SingleSelect,
            Self::MultiSelect { .. } => RenderType::MultiSelect,
            Self::Bmi { .. } => RenderType::Bmi,
        }
    }

    /// 选择题的选项；其他题型返回 None
    pub fn options(&self) -> Option<&[QuestionOption]> {
        match self {
            Self::SingleSelect { options } | Self::MultiSelect { options, .. } => Some(options),
            _ => None,
        }
    }
}

/// 校验后的问题
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub key: String,
    pub stage: u32,
    pub priority: i32,
    pub prompt: String,
    pub help_text: Option<String>,
    pub kind: QuestionKind,
    /// 按题型解码后的已有答案；形态不匹配时为 None
    pub prior_answer: Option<AnswerValue>,
}

impl Question {
    pub fn render_type(&self) -> RenderType {
        self.kind.render_type()
    }

    pub fn options(&self) -> Option<&[QuestionOption]> {
        self.kind.options()
    }

    /// 按 value 查找选项标题
    pub fn option_title(&self, value: &str) -> Option<&str> {
        self.options()?
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.title.as_str())
    }
}

impl TryFrom<QuestionDefinition> for Question {
    type Error = CatalogError;

    fn try_from(def: QuestionDefinition) -> Result<Self, Self::Error> {
        if def.key.trim().is_empty() {
            return Err(CatalogError::MissingKey);
        }
        if def.prompt.trim().is_empty() {
            return Err(CatalogError::MissingPrompt(def.key));
        }

        let prior_answer = def
            .prior_answer
            .as_ref()
            .and_then(|raw| AnswerValue::from_json(def.render_type, raw));

        let kind = match def.render_type {
            RenderType::NumberInput => QuestionKind::NumberInput {
                placeholder: def.placeholder,
                label: def.label,
            },
            RenderType::Date => QuestionKind::Date {
                placeholder: def.placeholder,
            },
            RenderType::SingleSelect => QuestionKind::SingleSelect {
                options: def
                    .options
                    .ok_or_else(|| CatalogError::MissingOptions(def.key.clone()))?,
            },
            RenderType::MultiSelect => QuestionKind::MultiSelect {
                options: def
                    .options
                    .ok_or_else(|| CatalogError::MissingOptions(def.key.clone()))?,
                placeholder: def.placeholder,
            },
            RenderType::Bmi => {
                let mut options = def.options.unwrap_or_default().into_iter();
                QuestionKind::Bmi {
                    height: options.next(),
                    weight: options.next(),
                }
            }
        };

        Ok(Question {
            key: def.key,
            stage: def.stage,
            priority: def.priority,
            prompt: def.prompt,
            help_text: def.help_text,
            kind,
            prior_answer,
        })
    }
}

/// 解析单个原始条目
pub fn parse_entry(raw: Value) -> Result<Question, CatalogError> {
    let def: QuestionDefinition =
        serde_json::from_value(raw).map_err(|e| CatalogError::Malformed(e.to_string()))?;
    Question::try_from(def)
}

// =========================================================
// 目录
// =========================================================

/// 问题目录
///
/// 构造时完成分组：阶段升序，阶段内按 priority 稳定排序。
/// 一经构造不再修改，刷新时整体替换。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionCatalog {
    stages: BTreeMap<u32, Vec<Question>>,
}

impl QuestionCatalog {
    /// 从校验后的问题构造
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut stages: BTreeMap<u32, Vec<Question>> = BTreeMap::new();
        for q in questions {
            stages.entry(q.stage).or_default().push(q);
        }
        for group in stages.values_mut() {
            group.sort_by_key(|q| q.priority);
        }
        Self { stages }
    }

    /// 从原始 JSON 条目构造，逐条校验，非法条目被跳过
    pub fn from_raw(entries: impl IntoIterator<Item = Value>) -> Self {
        Self::new(entries.into_iter().filter_map(|raw| match parse_entry(raw) {
            Ok(q) => Some(q),
            Err(e) => {
                log::warn!("skipping catalog entry: {e}");
                None
            }
        }))
    }

    /// 从原始定义构造
    pub fn from_definitions(defs: impl IntoIterator<Item = QuestionDefinition>) -> Self {
        Self::new(defs.into_iter().filter_map(|def| {
            Question::try_from(def)
                .map_err(|e| log::warn!("skipping catalog entry: {e}"))
                .ok()
        }))
    }

    /// 阶段编号（升序）
    pub fn stage_numbers(&self) -> Vec<u32> {
        self.stages.keys().copied().collect()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// 某一阶段的问题（已排序）；不存在时为空
    pub fn stage(&self, stage: u32) -> &[Question] {
        self.stages.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 所有问题，按阶段和优先级排序
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.stages.values().flatten()
    }

    pub fn get(&self, key: &str) -> Option<&Question> {
        self.questions().find(|q| q.key == key)
    }

    pub fn len(&self) -> usize {
        self.stages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_catalog() -> Vec<Value> {
        vec![
            json!({"key": "goals", "stage": 2, "priority": 2, "type": "multiSelect",
                   "question": "Your goals?", "options": [{"value": "strength", "title": "Build strength"}]}),
            json!({"key": "age", "stage": 1, "priority": 1, "type": "numberInput",
                   "question": "How old are you?", "placeholder": "Age"}),
            json!({"key": "regular", "stage": 2, "priority": 1, "type": "singleSelect",
                   "question": "Regular periods?", "options": [{"value": "yes", "title": "Yes"}]}),
            // 非法：缺少 options
            json!({"key": "broken", "stage": 2, "priority": 0, "type": "singleSelect", "question": "?"}),
            // 非法：未知题型
            json!({"key": "slider", "stage": 1, "type": "slider", "question": "Slide"}),
            // 非法：缺少 key
            json!({"stage": 1, "type": "date", "question": "When?"}),
        ]
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let catalog = QuestionCatalog::from_raw(raw_catalog());
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("broken").is_none());
        assert!(catalog.get("slider").is_none());
    }

    #[test]
    fn test_stage_grouping_orders_by_priority() {
        let catalog = QuestionCatalog::from_raw(raw_catalog());
        assert_eq!(catalog.stage_numbers(), vec![1, 2]);
        let keys: Vec<_> = catalog.stage(2).iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["regular", "goals"]);
        assert!(catalog.stage(7).is_empty());
    }

    #[test]
    fn test_missing_prompt_is_rejected() {
        let err = parse_entry(json!({"key": "age", "stage": 1, "type": "numberInput"})).unwrap_err();
        assert_eq!(err, CatalogError::MissingPrompt("age".into()));
    }

    #[test]
    fn test_bmi_labels_come_from_options() {
        let q = parse_entry(json!({
            "key": "bmi", "stage": 3, "type": "bmi", "question": "Height and weight",
            "options": [
                {"value": "height", "title": "Height (cm)", "text": "e.g. 165"},
                {"value": "weight", "title": "Weight (kg)"}
            ]
        }))
        .unwrap();
        match q.kind {
            QuestionKind::Bmi { height, weight } => {
                assert_eq!(height.unwrap().help_text.as_deref(), Some("e.g. 165"));
                assert_eq!(weight.unwrap().title, "Weight (kg)");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_bmi_without_options_is_valid() {
        let q = parse_entry(json!({"key": "bmi", "stage": 3, "type": "bmi", "question": "BMI"})).unwrap();
        assert_eq!(
            q.kind,
            QuestionKind::Bmi {
                height: None,
                weight: None
            }
        );
    }

    #[test]
    fn test_prior_answer_is_decoded_per_type() {
        let q = parse_entry(json!({"key": "age", "stage": 1, "type": "numberInput",
                                   "question": "Age?", "answer": 31})).unwrap();
        assert_eq!(q.prior_answer, Some(AnswerValue::Number(31.0)));

        let q = parse_entry(json!({"key": "age", "stage": 1, "type": "numberInput",
                                   "question": "Age?", "answer": ["31"]})).unwrap();
        assert_eq!(q.prior_answer, None);
    }

    #[test]
    fn test_option_title_lookup() {
        let catalog = QuestionCatalog::from_raw(raw_catalog());
        let q = catalog.get("regular").unwrap();
        assert_eq!(q.option_title("yes"), Some("Yes"));
        assert_eq!(q.option_title("no"), None);
        assert_eq!(catalog.get("age").unwrap().option_title("yes"), None);
    }
}
