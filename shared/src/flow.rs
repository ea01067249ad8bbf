//! 页面流程逻辑
//!
//! 特点：
//! 1. 不依赖浏览器，只依赖 `ApiClient` 抽象。
//! 2. 页面组件只负责把结果接到信号和路由上。
//! 3. 易测试：注入 MockClient 即可覆盖加载、提交和跳转决策。

use crate::answer::{AnswerMap, AnswerValue, is_answered};
use crate::cycle::{BmiCategory, CycleSnapshot, Mood};
use crate::date::IsoDate;
use crate::engine::{AnswerError, QuestionnaireSession};
use crate::format::format_catalog_answers;
use crate::protocol::{
    ApiError, ApiRequest, HomeSectionRequest, OnboardingQuestionsRequest, SubmitOnboardingAnswers,
    UpdateMoodRequest, UpdateOnboardingAnswers,
};
use crate::question::{Question, QuestionCatalog};
use crate::user::{BMI_KEY, DailyMood, HomeSection, LAST_PERIOD_KEY};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 后端访问抽象
///
/// 浏览器中的 future 不是 `Send`，因此使用 `?Send`。
#[async_trait(?Send)]
pub trait ApiClient {
    async fn send<R: ApiRequest + 'static>(&self, request: &R) -> Result<R::Response, ApiError>;
}

async fn load_catalog<C: ApiClient>(client: &C) -> Result<(QuestionCatalog, bool), ApiError> {
    let data = client
        .send(&OnboardingQuestionsRequest)
        .await
        .map_err(ApiError::for_session)?;
    log::debug!(
        "loaded {} catalog entries (completed: {})",
        data.questions.len(),
        data.completed_onboarding
    );
    Ok((
        QuestionCatalog::from_raw(data.questions),
        data.completed_onboarding,
    ))
}

// =========================================================
// 引导问卷
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingLoad {
    /// 新用户，从第 1 步开始
    Fresh(QuestionnaireSession),
    /// 已完成引导，预填答案并停在完成页
    Completed(QuestionnaireSession),
}

impl OnboardingLoad {
    pub fn into_session(self) -> QuestionnaireSession {
        match self {
            Self::Fresh(session) | Self::Completed(session) => session,
        }
    }
}

pub struct OnboardingFlow<'a, C: ApiClient> {
    client: &'a C,
}

impl<'a, C: ApiClient> OnboardingFlow<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<OnboardingLoad, ApiError> {
        let (catalog, completed) = load_catalog(self.client).await?;
        Ok(if completed {
            OnboardingLoad::Completed(QuestionnaireSession::resume(catalog))
        } else {
            OnboardingLoad::Fresh(QuestionnaireSession::new(catalog))
        })
    }

    /// 提交全部答案
    pub async fn submit(&self, session: &QuestionnaireSession) -> Result<(), ApiError> {
        let request = SubmitOnboardingAnswers {
            onboarding_answers: session.answers().clone(),
        };
        self.client.send(&request).await?;
        log::debug!("submitted {} onboarding answers", session.answers().len());
        Ok(())
    }
}

/// 完成页展示的周期与 BMI 摘要
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionSummary {
    pub cycle: CycleSnapshot,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
}

impl CompletionSummary {
    pub fn from_answers(answers: &AnswerMap, today: IsoDate) -> Self {
        let last_period = answers.get(LAST_PERIOD_KEY).and_then(AnswerValue::as_date);
        let bmi = answers
            .get(BMI_KEY)
            .and_then(AnswerValue::as_number)
            .filter(|b| *b > 0.0);
        Self {
            cycle: CycleSnapshot::from_last_period(last_period, today),
            bmi,
            bmi_category: bmi.map(BmiCategory::from_bmi),
        }
    }
}

// =========================================================
// 编辑资料
// =========================================================

/// 编辑页所需数据
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub catalog: QuestionCatalog,
    /// key -> 展示字符串
    pub display: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLoad {
    NeedsOnboarding,
    Ready(ProfileView),
}

/// 原地编辑单个问题
///
/// 关闭编辑弹窗即丢弃，不做部分保存。
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEditor {
    question: Question,
    answer: Option<AnswerValue>,
}

impl ProfileEditor {
    pub fn new(question: Question) -> Self {
        let answer = question.prior_answer.clone();
        Self { question, answer }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn answer(&self) -> Option<&AnswerValue> {
        self.answer.as_ref()
    }

    pub fn set_answer(&mut self, answer: Option<AnswerValue>) -> Result<(), AnswerError> {
        if let Some(value) = &answer {
            if !value.fits(self.question.render_type()) {
                return Err(AnswerError::ShapeMismatch {
                    key: self.question.key.clone(),
                    expected: self.question.render_type(),
                });
            }
        }
        self.answer = answer;
        Ok(())
    }

    /// "更新"按钮是否可用
    pub fn can_update(&self) -> bool {
        is_answered(self.answer.as_ref())
    }

    /// `{ onboardingAnswers: { key: value } }`；答案不完整时为 None
    pub fn payload(&self) -> Option<UpdateOnboardingAnswers> {
        let answer = self.answer.as_ref().filter(|_| self.can_update())?;
        let mut map = Map::new();
        map.insert(self.question.key.clone(), answer.to_json());
        Some(UpdateOnboardingAnswers {
            onboarding_answers: Value::Object(map),
        })
    }
}

pub struct ProfileFlow<'a, C: ApiClient> {
    client: &'a C,
}

impl<'a, C: ApiClient> ProfileFlow<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<ProfileLoad, ApiError> {
        let (catalog, completed) = load_catalog(self.client).await?;
        if !completed {
            return Ok(ProfileLoad::NeedsOnboarding);
        }
        let display = format_catalog_answers(&catalog);
        Ok(ProfileLoad::Ready(ProfileView { catalog, display }))
    }

    pub async fn update(&self, request: &UpdateOnboardingAnswers) -> Result<(), ApiError> {
        self.client.send(request).await?;
        Ok(())
    }
}

// =========================================================
// 首页
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum HomeLoad {
    NeedsOnboarding,
    Ready(HomeSection),
}

pub struct HomeFlow<'a, C: ApiClient> {
    client: &'a C,
}

impl<'a, C: ApiClient> HomeFlow<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<HomeLoad, ApiError> {
        let home = self
            .client
            .send(&HomeSectionRequest)
            .await
            .map_err(ApiError::for_session)?;
        if !home.user.completed_onboarding {
            return Ok(HomeLoad::NeedsOnboarding);
        }
        Ok(HomeLoad::Ready(home))
    }

    /// 记录今日心情，返回更新后的历史
    pub async fn record_mood(&self, mood: Mood) -> Result<Vec<DailyMood>, ApiError> {
        let history = self.client.send(&UpdateMoodRequest { mood }).await?;
        log::debug!("mood recorded: {}", mood.label());
        Ok(history)
    }
}

/// 是否需要弹出每日心情询问
pub fn wants_mood_prompt(home: &HomeSection, today: IsoDate) -> bool {
    home.user.completed_onboarding && !home.user.logged_mood_on(today)
}

#[cfg(test)]
mod tests;
