use crate::answer::AnswerMap;
use crate::cycle::Mood;
use crate::user::{DailyMood, HomeSection};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

// =========================================================
// 响应信封 (Envelope)
// =========================================================

/// 字段级错误，`field` 为 `"general"` / `"all"` 时表示整体错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 后端所有 JSON 响应的外层结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// 业务状态码，成功为 200
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub errors: Vec<FieldError>,
    #[serde(default)]
    pub token: Option<String>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 成功时取出 data，否则转换为 `ApiError::Rejected`
    pub fn into_data(self) -> Result<Value, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                status: self.status,
                message: self.message.unwrap_or_default(),
                errors: self.errors,
            })
        }
    }
}

// =========================================================
// 错误 (ApiError)
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("not signed in")]
    Unauthorized,
    #[error("request rejected ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// 页面是否应当清除会话并跳转到登录页
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized | ApiError::Rejected { status: 401 | 403, .. }
        )
    }

    /// 需要登录的加载请求：任何业务拒绝都视为会话失效
    pub fn for_session(self) -> Self {
        match self {
            ApiError::Rejected { .. } => ApiError::Unauthorized,
            other => other,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }

    /// 展示给用户的错误列表；没有字段错误时退化为一条整体错误
    pub fn display_errors(&self) -> Vec<FieldError> {
        match self {
            ApiError::Rejected { errors, .. } if !errors.is_empty() => errors.clone(),
            ApiError::Rejected { message, .. } if !message.is_empty() => {
                vec![FieldError::new("general", message.clone())]
            }
            other => vec![FieldError::new("general", other.to_string())],
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path relative to the API base.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// 实际请求路径（需要查询参数的请求覆盖此方法）
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(Self::PATH)
    }

    /// 从响应信封中取出结果
    fn finish(envelope: Envelope) -> Result<Self::Response, ApiError> {
        decode(envelope.into_data()?)
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

// =========================================================
// 认证 (Auth)
// =========================================================

/// 登录类请求的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub token: Option<String>,
    pub completed_onboarding: bool,
}

impl AuthGrant {
    /// token 可能在信封顶层，也可能在 data 中
    fn from_envelope(envelope: Envelope) -> Result<Self, ApiError> {
        let top_level = envelope.token.clone();
        let data = envelope.into_data()?;
        let token = top_level.or_else(|| data.get("token").and_then(Value::as_str).map(str::to_string));
        let completed_onboarding = data
            .get("completedOnboarding")
            .or_else(|| data.get("user").and_then(|u| u.get("completedOnboarding")))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(Self {
            token,
            completed_onboarding,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthGrant;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn finish(envelope: Envelope) -> Result<Self::Response, ApiError> {
        AuthGrant::from_envelope(envelope)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl ApiRequest for SignupRequest {
    type Response = AuthGrant;
    const PATH: &'static str = "/auth/signup";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn finish(envelope: Envelope) -> Result<Self::Response, ApiError> {
        AuthGrant::from_envelope(envelope)
    }
}

/// 第三方登录：提交身份服务返回的 ID token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignInRequest {
    pub id_token: String,
}

impl ApiRequest for GoogleSignInRequest {
    type Response = AuthGrant;
    const PATH: &'static str = "/auth/sign-in-with-google";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn finish(envelope: Envelope) -> Result<Self::Response, ApiError> {
        AuthGrant::from_envelope(envelope)
    }
}

/// 重置密码页加载时校验 token
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResetTokenRequest {
    pub token: String,
}

impl ApiRequest for ValidateResetTokenRequest {
    type Response = ();
    const PATH: &'static str = "/auth/reset-password";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{}?token={}", Self::PATH, encode_query_value(&self.token)))
    }

    fn finish(envelope: Envelope) -> Result<Self::Response, ApiError> {
        envelope.into_data().map(drop)
    }
}

/// 最短密码长度
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordRequest {
    /// 本地校验，全部通过才发请求
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if self.password != self.confirm_password {
            errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl ApiRequest for ResetPasswordRequest {
    type Response = ();
    const PATH: &'static str = "/auth/reset-password";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn finish(envelope: Envelope) -> Result<Self::Response, ApiError> {
        envelope.into_data().map(drop)
    }
}

/// 查询参数转义：保留 RFC 3986 unreserved 字符，其余按字节百分号编码
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode_query_value(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_VALUE).to_string()
}

// =========================================================
// 引导问卷 (Onboarding)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct OnboardingQuestionsRequest;

/// 问卷目录；`questions` 保留原始 JSON，逐条校验
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingQuestionsData {
    #[serde(default)]
    pub questions: Vec<Value>,
    #[serde(default)]
    pub total_questions: usize,
    #[serde(default)]
    pub completed_onboarding: bool,
}

impl ApiRequest for OnboardingQuestionsRequest {
    type Response = OnboardingQuestionsData;
    const PATH: &'static str = "/users/onboarding-questions";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 首次提交全部答案
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOnboardingAnswers {
    pub onboarding_answers: AnswerMap,
}

impl ApiRequest for SubmitOnboardingAnswers {
    type Response = Value;
    const PATH: &'static str = "/users/onboarding-answers";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// 编辑资料：只提交被修改的那一项
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOnboardingAnswers {
    pub onboarding_answers: Value,
}

impl ApiRequest for UpdateOnboardingAnswers {
    type Response = Value;
    const PATH: &'static str = "/users/onboarding-answers";
    const METHOD: HttpMethod = HttpMethod::Put;
}

// =========================================================
// 首页 (Home)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMoodRequest {
    pub mood: Mood,
}

impl ApiRequest for UpdateMoodRequest {
    /// 更新后的心情历史
    type Response = Vec<DailyMood>;
    const PATH: &'static str = "/users/update-mood";
    const METHOD: HttpMethod = HttpMethod::Put;
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeSectionRequest;

impl ApiRequest for HomeSectionRequest {
    type Response = HomeSection;
    const PATH: &'static str = "/sections/home";
    const METHOD: HttpMethod = HttpMethod::Get;
}
