use super::*;
use crate::protocol::{Envelope, HttpMethod};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;

// =========================================================
// MockClient
// =========================================================

/// 按路径返回预设信封，并记录发出的请求
pub struct MockClient {
    pub responses: RefCell<HashMap<&'static str, Envelope>>,
    pub sent: RefCell<Vec<(HttpMethod, String, Value)>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn respond(&self, path: &'static str, raw: Value) {
        let envelope = serde_json::from_value(raw).unwrap();
        self.responses.borrow_mut().insert(path, envelope);
    }
}

#[async_trait(?Send)]
impl ApiClient for MockClient {
    async fn send<R: ApiRequest + 'static>(&self, request: &R) -> Result<R::Response, ApiError> {
        let body = serde_json::to_value(request).unwrap();
        self.sent
            .borrow_mut()
            .push((R::METHOD, request.path().into_owned(), body));
        let envelope = self
            .responses
            .borrow()
            .get(R::PATH)
            .cloned()
            .ok_or_else(|| ApiError::Network("connection refused".into()))?;
        R::finish(envelope)
    }
}

fn catalog_response(completed: bool) -> Value {
    json!({
        "status": 200,
        "data": {
            "completedOnboarding": completed,
            "totalQuestions": 2,
            "questions": [
                {"key": "age", "stage": 1, "priority": 1, "type": "numberInput",
                 "question": "How old are you?", "answer": 34},
                {"key": "regularPeriod", "stage": 2, "priority": 1, "type": "singleSelect",
                 "question": "Are your periods regular?",
                 "options": [{"value": "yes", "title": "Yes"}, {"value": "no", "title": "No"}],
                 "answer": "no"},
                {"key": "broken", "stage": 2, "type": "multiSelect", "question": "No options"}
            ]
        }
    })
}

fn home_response(completed: bool, moods: Value) -> Value {
    json!({
        "status": 200,
        "data": {
            "user": {"_id": "u1", "fullName": "Grace Hopper", "email": "grace@example.com",
                     "completedOnboarding": completed, "dailyMood": moods},
            "userInfo": {"cycleDay": 3, "cyclePhase": "menstruation", "nextPhaseIn": 3},
            "cycleInfo": {"description": "Rest and restore"}
        }
    })
}

// =========================================================
// 引导问卷
// =========================================================

#[tokio::test]
async fn test_onboarding_fresh_load() {
    let client = MockClient::new();
    client.respond("/users/onboarding-questions", catalog_response(false));

    let load = OnboardingFlow::new(&client).load().await.unwrap();
    let session = match load {
        OnboardingLoad::Fresh(session) => session,
        other => panic!("unexpected load: {other:?}"),
    };
    assert_eq!(session.step(), 1);
    assert_eq!(session.total_steps(), 2);
    assert!(session.answers().is_empty());
    // 非法条目被跳过
    assert!(session.catalog().get("broken").is_none());
}

#[tokio::test]
async fn test_onboarding_completed_user_resumes() {
    let client = MockClient::new();
    client.respond("/users/onboarding-questions", catalog_response(true));

    let load = OnboardingFlow::new(&client).load().await.unwrap();
    assert!(matches!(load, OnboardingLoad::Completed(_)));
    let session = load.into_session();
    assert!(session.is_finished());
    assert_eq!(session.answer("age"), Some(&AnswerValue::Number(34.0)));
}

#[tokio::test]
async fn test_onboarding_submit_posts_answer_map() {
    let client = MockClient::new();
    client.respond("/users/onboarding-questions", catalog_response(false));
    client.respond("/users/onboarding-answers", json!({"status": 200, "data": {}}));

    let flow = OnboardingFlow::new(&client);
    let mut session = flow.load().await.unwrap().into_session();
    session.set_answer("age", Some(AnswerValue::Number(27.0))).unwrap();
    assert!(session.advance());
    session
        .set_answer("regularPeriod", Some(AnswerValue::Choice("yes".into())))
        .unwrap();
    assert!(session.advance());
    flow.submit(&session).await.unwrap();

    let sent = client.sent.borrow();
    let (method, path, body) = sent.last().unwrap();
    assert_eq!(*method, HttpMethod::Post);
    assert_eq!(path, "/users/onboarding-answers");
    assert_eq!(
        body,
        &json!({"onboardingAnswers": {"age": 27.0, "regularPeriod": "yes"}})
    );
}

#[tokio::test]
async fn test_rejected_catalog_load_requires_login() {
    let client = MockClient::new();
    client.respond(
        "/users/onboarding-questions",
        json!({"status": 400, "message": "Please log in"}),
    );
    let err = OnboardingFlow::new(&client).load().await.unwrap_err();
    assert!(err.requires_login());
}

#[tokio::test]
async fn test_network_failure_is_not_a_logout() {
    let client = MockClient::new();
    let err = OnboardingFlow::new(&client).load().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(!err.requires_login());
}

#[test]
fn test_completion_summary_from_answers() {
    let today = IsoDate::from_ymd(2025, 6, 20).unwrap();
    let mut answers = AnswerMap::new();
    answers.set(
        "lastPeriod",
        Some(AnswerValue::Date(IsoDate::from_ymd(2025, 6, 1).unwrap())),
    );
    answers.set("bmi", Some(AnswerValue::Number(26.4)));

    let summary = CompletionSummary::from_answers(&answers, today);
    assert_eq!(summary.cycle.cycle_day, 20);
    assert_eq!(summary.cycle.phase, crate::cycle::CyclePhase::Luteal);
    assert_eq!(summary.bmi, Some(26.4));
    assert_eq!(summary.bmi_category, Some(BmiCategory::Overweight));
}

#[test]
fn test_completion_summary_defaults() {
    let today = IsoDate::from_ymd(2025, 6, 20).unwrap();
    let summary = CompletionSummary::from_answers(&AnswerMap::new(), today);
    assert_eq!(summary.cycle.cycle_day, 1);
    assert_eq!(summary.cycle.phase, crate::cycle::CyclePhase::Menstruation);
    assert_eq!(summary.bmi, None);
    assert_eq!(summary.bmi_category, None);
}

// =========================================================
// 编辑资料
// =========================================================

#[tokio::test]
async fn test_profile_requires_onboarding() {
    let client = MockClient::new();
    client.respond("/users/onboarding-questions", catalog_response(false));
    let load = ProfileFlow::new(&client).load().await.unwrap();
    assert_eq!(load, ProfileLoad::NeedsOnboarding);
}

#[tokio::test]
async fn test_profile_edit_single_answer() {
    let client = MockClient::new();
    client.respond("/users/onboarding-questions", catalog_response(true));
    client.respond("/users/onboarding-answers", json!({"status": 200}));

    let flow = ProfileFlow::new(&client);
    let view = match flow.load().await.unwrap() {
        ProfileLoad::Ready(view) => view,
        other => panic!("unexpected load: {other:?}"),
    };
    assert_eq!(view.display["age"], "34");
    assert_eq!(view.display["regularPeriod"], "No");

    let mut editor = ProfileEditor::new(view.catalog.get("regularPeriod").unwrap().clone());
    assert!(editor.can_update());
    editor.set_answer(None).unwrap();
    assert!(!editor.can_update());
    assert!(editor.payload().is_none());
    assert!(editor.set_answer(Some(AnswerValue::Number(1.0))).is_err());

    editor
        .set_answer(Some(AnswerValue::Choice("yes".into())))
        .unwrap();
    let request = editor.payload().unwrap();
    flow.update(&request).await.unwrap();

    let sent = client.sent.borrow();
    let (method, _, body) = sent.last().unwrap();
    assert_eq!(*method, HttpMethod::Put);
    assert_eq!(body, &json!({"onboardingAnswers": {"regularPeriod": "yes"}}));
}

// =========================================================
// 首页
// =========================================================

#[tokio::test]
async fn test_home_redirects_to_onboarding() {
    let client = MockClient::new();
    client.respond("/sections/home", home_response(false, json!([])));
    let load = HomeFlow::new(&client).load().await.unwrap();
    assert_eq!(load, HomeLoad::NeedsOnboarding);
}

#[tokio::test]
async fn test_home_load_and_mood_prompt() {
    let client = MockClient::new();
    client.respond(
        "/sections/home",
        home_response(true, json!([{"date": "2025-06-09T10:00:00.000Z", "mood": "tired"}])),
    );
    let home = match HomeFlow::new(&client).load().await.unwrap() {
        HomeLoad::Ready(home) => home,
        other => panic!("unexpected load: {other:?}"),
    };
    assert_eq!(home.phase(), crate::cycle::CyclePhase::Menstruation);

    let next_day = IsoDate::from_ymd(2025, 6, 10).unwrap();
    assert!(wants_mood_prompt(&home, next_day));
    let same_day = IsoDate::from_ymd(2025, 6, 9).unwrap();
    assert!(!wants_mood_prompt(&home, same_day));
}

#[tokio::test]
async fn test_record_mood_returns_history() {
    let client = MockClient::new();
    client.respond(
        "/users/update-mood",
        json!({"status": 200, "data": [{"date": "2025-06-10T09:00:00.000Z", "mood": "balanced"}]}),
    );
    let history = HomeFlow::new(&client).record_mood(Mood::Balanced).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].mood(), Some(Mood::Balanced));

    let sent = client.sent.borrow();
    assert_eq!(sent[0].2, json!({"mood": "balanced"}));
}
