//! 认证模块
//!
//! 管理会话 token，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::api::FemFitApi;
use crate::web::LocalStorage;
use femfit_shared::STORAGE_TOKEN_KEY;
use femfit_shared::protocol::ApiError;
use leptos::prelude::*;

/// 认证状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// 会话 token；后端只依赖 cookie 时可能为空
    pub token: Option<String>,
    /// 是否已认证
    pub is_authenticated: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复上次的会话
    pub fn restore() -> Self {
        let token = LocalStorage::get(STORAGE_TOKEN_KEY);
        let is_authenticated = token.is_some();
        if is_authenticated {
            log::debug!("restored session from local storage");
        }
        let (state, set_state) = signal(AuthState {
            token,
            is_authenticated,
        });
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    /// 当前会话的 API 客户端
    pub fn api(&self) -> FemFitApi {
        FemFitApi::from_config(self.state.get_untracked().token)
    }

    /// 登录成功后保存 token
    ///
    /// 没有 token 时仍视为已登录（会话由 cookie 承载）。
    pub fn sign_in(&self, token: Option<String>) {
        match &token {
            Some(token) => {
                LocalStorage::set(STORAGE_TOKEN_KEY, token);
            }
            None => log::debug!("sign-in without a token, relying on cookies"),
        }
        self.set_state.set(AuthState {
            token,
            is_authenticated: true,
        });
    }

    /// 注销并清除状态
    ///
    /// 导航由路由服务的认证状态监听自动处理。
    pub fn sign_out(&self) {
        LocalStorage::remove(STORAGE_TOKEN_KEY);
        self.set_state.set(AuthState::default());
    }

    /// 请求失败时统一处理会话失效；返回 true 表示已注销
    pub fn handle_error(&self, err: &ApiError) -> bool {
        if err.requires_login() {
            log::info!("session expired: {err}");
            self.sign_out();
            true
        } else {
            false
        }
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
