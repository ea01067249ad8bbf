//! 答案展示格式化
//!
//! 纯函数：把答案映射转换为编辑页使用的展示字符串，不修改任何输入。

use crate::answer::{AnswerMap, AnswerValue};
use crate::input::split_other_text;
use crate::question::{OPTION_OTHER, Question, QuestionCatalog, QuestionKind, QuestionOption};
use std::collections::BTreeMap;

/// 单个答案的展示字符串；答案形态与题型不符时为 None
pub fn format_answer(question: &Question, answer: &AnswerValue) -> Option<String> {
    match (&question.kind, answer) {
        (QuestionKind::Date { .. }, AnswerValue::Date(date)) => Some(date.display()),
        (QuestionKind::NumberInput { .. } | QuestionKind::Bmi { .. }, AnswerValue::Number(n)) => {
            Some(n.to_string())
        }
        (QuestionKind::SingleSelect { options }, AnswerValue::Choice(value)) => Some(
            find_option(options, value)
                .map(|o| o.title.clone())
                .unwrap_or_default(),
        ),
        (QuestionKind::MultiSelect { options, .. }, AnswerValue::Choices(values)) => Some(
            values
                .iter()
                .filter(|v| v.as_str() != OPTION_OTHER)
                // 自由文本不是选项，单独展示
                .filter_map(|v| find_option(options, v))
                .map(|o| o.title.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

/// 批量格式化；没有答案的 key 不出现在结果中
pub fn format_answers<'a>(
    questions: impl IntoIterator<Item = &'a Question>,
    answers: &AnswerMap,
) -> BTreeMap<String, String> {
    questions
        .into_iter()
        .filter_map(|q| {
            let answer = answers.get(&q.key)?;
            format_answer(q, answer).map(|text| (q.key.clone(), text))
        })
        .collect()
}

/// 格式化目录中随问题返回的已有答案
pub fn format_catalog_answers(catalog: &QuestionCatalog) -> BTreeMap<String, String> {
    catalog
        .questions()
        .filter_map(|q| {
            let answer = q.prior_answer.as_ref()?;
            format_answer(q, answer).map(|text| (q.key.clone(), text))
        })
        .collect()
}

/// 取回 "other" 对应的自由文本：答案中第一个不是已知选项值的标记；
/// 文本恰好等于某个选项值时，取 `"other"` 之后追加的最后一个标记
pub fn extract_free_text(options: Option<&[QuestionOption]>, answer: Option<&AnswerValue>) -> String {
    let (Some(options), Some(answer)) = (options, answer) else {
        return String::new();
    };
    split_other_text(answer.tokens(), |token| find_option(options, token).is_some())
        .1
        .unwrap_or_default()
}

fn find_option<'a>(options: &'a [QuestionOption], value: &str) -> Option<&'a QuestionOption> {
    options.iter().find(|o| o.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::parse_entry;
    use serde_json::json;

    fn opt(value: &str) -> QuestionOption {
        QuestionOption::new(value, value.to_uppercase())
    }

    fn choices(list: &[&str]) -> AnswerValue {
        AnswerValue::Choices(list.iter().map(|s| s.to_string()).collect())
    }

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::from_raw(vec![
            json!({"key": "age", "stage": 1, "type": "numberInput", "question": "Age?", "answer": 30}),
            json!({"key": "bmi", "stage": 3, "type": "bmi", "question": "BMI", "answer": 24.2}),
            json!({"key": "lastPeriod", "stage": 1, "type": "date", "question": "Last period?",
                   "answer": "2025-05-04T00:00:00.000Z"}),
            json!({"key": "regularPeriod", "stage": 2, "type": "singleSelect", "question": "Regular?",
                   "options": [{"value": "yes", "title": "Yes"}, {"value": "no", "title": "No"}],
                   "answer": "maybe"}),
            json!({"key": "healthGoals", "stage": 2, "type": "multiSelect", "question": "Goals?",
                   "options": [{"value": "strength", "title": "Build strength"},
                               {"value": "sleep", "title": "Sleep better"},
                               {"value": "other", "title": "Other"}],
                   "answer": ["strength", "sleep", "other", "dance more"]}),
            json!({"key": "symptoms", "stage": 2, "type": "multiSelect", "question": "Symptoms?",
                   "options": [{"value": "cramps", "title": "Cramps"}]}),
        ])
    }

    #[test]
    fn test_format_catalog_answers() {
        let display = format_catalog_answers(&catalog());
        assert_eq!(display.get("age").map(String::as_str), Some("30"));
        assert_eq!(display.get("bmi").map(String::as_str), Some("24.2"));
        assert_eq!(display.get("lastPeriod").map(String::as_str), Some("04/05/2025"));
        assert_eq!(
            display.get("healthGoals").map(String::as_str),
            Some("Build strength, Sleep better")
        );
        // 没有答案的问题不出现
        assert!(!display.contains_key("symptoms"));
    }

    #[test]
    fn test_unknown_single_select_value_is_empty_string() {
        let display = format_catalog_answers(&catalog());
        assert_eq!(display.get("regularPeriod").map(String::as_str), Some(""));
    }

    #[test]
    fn test_invalid_date_is_skipped() {
        let q = parse_entry(json!({"key": "lastPeriod", "stage": 1, "type": "date",
                                   "question": "Last period?", "answer": "yesterday"}))
        .unwrap();
        let catalog = QuestionCatalog::new([q]);
        assert!(format_catalog_answers(&catalog).is_empty());
    }

    #[test]
    fn test_format_answers_uses_live_map() {
        let catalog = catalog();
        let mut answers = AnswerMap::new();
        answers.set("regularPeriod", Some(AnswerValue::Choice("no".into())));
        answers.set("symptoms", Some(choices(&["cramps"])));
        let display = format_answers(catalog.questions(), &answers);
        assert_eq!(display.len(), 2);
        assert_eq!(display["regularPeriod"], "No");
        assert_eq!(display["symptoms"], "Cramps");
    }

    #[test]
    fn test_extract_free_text() {
        let options = vec![opt("a"), opt("other")];
        assert_eq!(
            extract_free_text(Some(options.as_slice()), Some(&choices(&["a", "custom text"]))),
            "custom text"
        );
        assert_eq!(extract_free_text(Some(options.as_slice()), Some(&choices(&["a"]))), "");
        assert_eq!(extract_free_text(None, Some(&choices(&["x"]))), "");
        assert_eq!(extract_free_text(Some(options.as_slice()), None), "");
    }

    #[test]
    fn test_extract_free_text_matching_option_value() {
        let options = vec![opt("a"), opt("yoga"), opt("other")];
        assert_eq!(
            extract_free_text(Some(options.as_slice()), Some(&choices(&["other", "yoga"]))),
            "yoga"
        );
        assert_eq!(
            extract_free_text(Some(options.as_slice()), Some(&choices(&["yoga", "other", "yoga"]))),
            "yoga"
        );
        // "other" 在最后，没有自由文本
        assert_eq!(
            extract_free_text(Some(options.as_slice()), Some(&choices(&["yoga", "other"]))),
            ""
        );
    }

    #[test]
    fn test_extract_free_text_from_scalar() {
        let options = vec![opt("yes")];
        assert_eq!(
            extract_free_text(Some(options.as_slice()), Some(&AnswerValue::Choice("free".into()))),
            "free"
        );
        assert_eq!(
            extract_free_text(Some(options.as_slice()), Some(&AnswerValue::Number(3.0))),
            ""
        );
    }
}
