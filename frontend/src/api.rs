//! 后端 API 客户端
//!
//! 把 `ApiRequest` 描述的请求转换为 fetch 调用，并解析统一信封。

use crate::config;
use crate::web::{HttpClient, HttpError, HttpMethod};
use async_trait::async_trait;
use femfit_shared::flow::ApiClient;
use femfit_shared::protocol::{ApiError, ApiRequest, Envelope, HttpMethod as WireMethod};
use femfit_shared::HEADER_AUTHORIZATION;

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ResponseParseFailed(msg) => ApiError::Decode(msg),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FemFitApi {
    pub base_url: String,
    pub token: Option<String>,
}

impl FemFitApi {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    /// 使用构建时配置的后端地址
    pub fn from_config(token: Option<String>) -> Self {
        Self::new(config::api_base_url(), token)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait(?Send)]
impl ApiClient for FemFitApi {
    async fn send<R: ApiRequest + 'static>(&self, request: &R) -> Result<R::Response, ApiError> {
        let url = self.url(&request.path());
        log::debug!("{:?} {}", R::METHOD, url);

        let mut builder = HttpClient::request(R::METHOD.into(), &url);
        if let Some(token) = &self.token {
            builder = builder.header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        builder = match R::METHOD {
            WireMethod::Get => builder,
            WireMethod::Post | WireMethod::Put => {
                let body =
                    serde_json::to_string(request).map_err(|e| ApiError::Decode(e.to_string()))?;
                builder.json_body(body)
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        if status == 401 || status == 403 {
            log::info!("{} answered {}, session rejected", url, status);
            return Err(ApiError::Unauthorized);
        }

        let text = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&text).map_err(|e| {
            log::warn!("{} returned a malformed envelope (HTTP {}): {}", url, status, e);
            ApiError::Decode(e.to_string())
        })?;
        R::finish(envelope)
    }
}
