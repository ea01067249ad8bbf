use super::*;
use crate::date::IsoDate;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

fn raw_entries() -> Vec<Value> {
    vec![
        json!({"key": "age", "stage": 1, "priority": 1, "type": "numberInput",
               "question": "How old are you?", "answer": 29}),
        json!({"key": "lastPeriod", "stage": 1, "priority": 2, "type": "date",
               "question": "When did your last period start?",
               "answer": "2025-03-02T00:00:00.000Z"}),
        json!({"key": "regularPeriod", "stage": 2, "priority": 1, "type": "singleSelect",
               "question": "Are your periods regular?",
               "options": [{"value": "yes", "title": "Yes"}, {"value": "no", "title": "No"}]}),
        json!({"key": "healthGoals", "stage": 2, "priority": 2, "type": "multiSelect",
               "question": "What are your goals?",
               "options": [{"value": "strength", "title": "Strength"},
                           {"value": "other", "title": "Other"}],
               "answer": ["strength"]}),
        json!({"key": "bmi", "stage": 3, "priority": 1, "type": "bmi",
               "question": "Height and weight"}),
    ]
}

fn definitions() -> Vec<QuestionDefinition> {
    raw_entries()
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
}

fn catalog() -> QuestionCatalog {
    QuestionCatalog::from_raw(raw_entries())
}

fn choices(list: &[&str]) -> AnswerValue {
    AnswerValue::Choices(list.iter().map(|s| s.to_string()).collect())
}

// =========================================================
// 完成度判定
// =========================================================

#[test]
fn test_stage_incomplete_for_each_empty_shape() {
    let defs = definitions();
    let mut answers = AnswerMap::new();
    answers.set("regularPeriod", Some(AnswerValue::Choice("yes".into())));
    assert!(!is_stage_complete(2, &answers, &defs));

    for empty in [choices(&[]), choices(&["strength", ""]), choices(&[""])] {
        answers.set("healthGoals", Some(empty));
        assert!(!is_stage_complete(2, &answers, &defs));
    }

    answers.set("healthGoals", Some(choices(&["strength"])));
    assert!(is_stage_complete(2, &answers, &defs));

    answers.set("regularPeriod", Some(AnswerValue::Choice(String::new())));
    assert!(!is_stage_complete(2, &answers, &defs));
}

#[test]
fn test_stage_without_questions_is_complete() {
    assert!(is_stage_complete(9, &AnswerMap::new(), &definitions()));
}

#[test]
fn test_malformed_definition_does_not_block_stage() {
    let mut defs = definitions();
    let mut broken = defs[2].clone();
    broken.key = "broken".into();
    broken.options = None;
    defs.push(broken);

    let mut answers = AnswerMap::new();
    answers.set("regularPeriod", Some(AnswerValue::Choice("no".into())));
    answers.set("healthGoals", Some(choices(&["strength"])));
    assert!(is_stage_complete(2, &answers, &defs));
}

#[test]
fn test_serialize_for_submission_is_identity() {
    let mut answers = AnswerMap::new();
    answers.set("age", Some(AnswerValue::Number(29.0)));
    answers.set("lastPeriod", IsoDate::from_ymd(2025, 3, 2).map(AnswerValue::Date));
    answers.set("healthGoals", Some(choices(&["strength", "other", "pilates"])));
    answers.set("bmi", Some(AnswerValue::Number(24.2)));

    assert_eq!(
        serialize_for_submission(&answers),
        json!({
            "age": 29.0,
            "lastPeriod": "2025-03-02T00:00:00.000Z",
            "healthGoals": ["strength", "other", "pilates"],
            "bmi": 24.2
        })
    );
    assert_eq!(serialize_for_submission(&AnswerMap::new()), json!({}));
}

// =========================================================
// 会话
// =========================================================

#[test]
fn test_new_session_starts_at_first_stage() {
    let session = QuestionnaireSession::new(catalog());
    assert_eq!(session.step(), 1);
    assert_eq!(session.total_steps(), 3);
    assert_eq!(session.current_stage(), Some(1));
    assert_eq!(session.completion_percentage(), 0);
    let keys: Vec<_> = session.current_questions().iter().map(|q| q.key.as_str()).collect();
    assert_eq!(keys, vec!["age", "lastPeriod"]);
    // 全新会话不预填已有答案
    assert!(session.answers().is_empty());
}

#[test]
fn test_advance_is_gated_by_completion() {
    let mut session = QuestionnaireSession::new(catalog());
    assert!(!session.can_advance());
    assert!(!session.advance());

    session.set_answer("age", Some(AnswerValue::Number(29.0))).unwrap();
    assert!(!session.can_advance());
    session
        .set_answer("lastPeriod", IsoDate::from_ymd(2025, 3, 2).map(AnswerValue::Date))
        .unwrap();
    assert!(session.advance());
    assert_eq!(session.step(), 2);
    assert_eq!(session.completion_percentage(), 33);
}

#[test]
fn test_clearing_answer_blocks_advance_again() {
    let mut session = QuestionnaireSession::new(catalog());
    session.set_answer("age", Some(AnswerValue::Number(29.0))).unwrap();
    session
        .set_answer("lastPeriod", IsoDate::from_ymd(2025, 3, 2).map(AnswerValue::Date))
        .unwrap();
    assert!(session.can_advance());
    session.set_answer("age", None).unwrap();
    assert!(!session.can_advance());
    assert!(session.answer("age").is_none());
}

#[test]
fn test_full_walkthrough_finishes() {
    let mut session = QuestionnaireSession::new(catalog());
    session.set_answer("age", Some(AnswerValue::Number(29.0))).unwrap();
    session
        .set_answer("lastPeriod", IsoDate::from_ymd(2025, 3, 2).map(AnswerValue::Date))
        .unwrap();
    assert!(session.advance());
    session
        .set_answer("regularPeriod", Some(AnswerValue::Choice("yes".into())))
        .unwrap();
    session
        .set_answer("healthGoals", Some(choices(&["strength"])))
        .unwrap();
    assert!(session.advance());
    session.set_answer("bmi", Some(AnswerValue::Number(22.5))).unwrap();
    assert!(session.advance());

    assert!(session.is_finished());
    assert_eq!(session.completion_percentage(), 100);
    assert!(session.current_questions().is_empty());
    assert!(!session.advance());
    assert_eq!(session.into_answers().len(), 5);
}

#[test]
fn test_set_answer_rejects_unknown_key_and_shape() {
    let mut session = QuestionnaireSession::new(catalog());
    assert_eq!(
        session.set_answer("nope", Some(AnswerValue::Number(1.0))),
        Err(AnswerError::UnknownQuestion("nope".into()))
    );
    assert_eq!(
        session.set_answer("age", Some(AnswerValue::Choice("29".into()))),
        Err(AnswerError::ShapeMismatch {
            key: "age".into(),
            expected: RenderType::NumberInput
        })
    );
    assert!(session.answers().is_empty());
}

#[test]
fn test_resume_prefills_and_jumps_to_completion() {
    let session = QuestionnaireSession::resume(catalog());
    assert!(session.is_finished());
    assert_eq!(session.step(), 4);
    assert_eq!(session.completion_percentage(), 100);
    assert_eq!(session.answer("age"), Some(&AnswerValue::Number(29.0)));
    assert_eq!(session.answer("healthGoals"), Some(&choices(&["strength"])));
    assert!(session.answer("bmi").is_none());
}

#[test]
fn test_empty_catalog_is_finished() {
    let session = QuestionnaireSession::new(QuestionCatalog::default());
    assert_eq!(session.total_steps(), 0);
    assert!(session.is_finished());
    assert_eq!(session.completion_percentage(), 100);
}
