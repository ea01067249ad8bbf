//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (`/` 与 `/home`)
    #[default]
    Home,
    /// 登录 / 注册
    Auth,
    /// 重置密码 (通过邮件链接进入)
    ResetPassword,
    Onboarding,
    /// 编辑资料
    UpdateProfile,
    Symptoms,
    Workout,
    Nutrition,
    InfoHub,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举（忽略查询串和末尾斜杠）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/home" => Self::Home,
            "/auth" => Self::Auth,
            "/reset-password" => Self::ResetPassword,
            "/onboarding" => Self::Onboarding,
            "/update" => Self::UpdateProfile,
            "/symptoms" => Self::Symptoms,
            "/workout" => Self::Workout,
            "/nutrition" => Self::Nutrition,
            "/info-hub" => Self::InfoHub,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/home",
            Self::Auth => "/auth",
            Self::ResetPassword => "/reset-password",
            Self::Onboarding => "/onboarding",
            Self::UpdateProfile => "/update",
            Self::Symptoms => "/symptoms",
            Self::Workout => "/workout",
            Self::Nutrition => "/nutrition",
            Self::InfoHub => "/info-hub",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Auth | Self::ResetPassword | Self::NotFound)
    }

    /// 已认证用户是否应该离开此路由（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth)
    }

    /// 是否显示页头和底部导航
    pub fn shows_chrome(&self) -> bool {
        !matches!(self, Self::Auth | Self::Onboarding | Self::ResetPassword)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Auth
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }

    /// 守卫：按认证状态给出实际落地的路由
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/home"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/home/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/reset-password?token=abc"), AppRoute::ResetPassword);
        assert_eq!(AppRoute::from_path("/info-hub"), AppRoute::InfoHub);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::NotFound);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Auth,
            AppRoute::ResetPassword,
            AppRoute::Onboarding,
            AppRoute::UpdateProfile,
            AppRoute::Symptoms,
            AppRoute::Workout,
            AppRoute::Nutrition,
            AppRoute::InfoHub,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn test_guards() {
        assert!(AppRoute::Home.requires_auth());
        assert!(AppRoute::UpdateProfile.requires_auth());
        assert!(AppRoute::InfoHub.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(!AppRoute::Auth.requires_auth());
        assert!(!AppRoute::ResetPassword.requires_auth());
        assert!(AppRoute::Auth.should_redirect_when_authenticated());
        assert!(!AppRoute::ResetPassword.should_redirect_when_authenticated());
    }

    #[test]
    fn test_guard_redirects() {
        assert_eq!(AppRoute::Home.guard(false), AppRoute::Auth);
        assert_eq!(AppRoute::Symptoms.guard(false), AppRoute::Auth);
        assert_eq!(AppRoute::Home.guard(true), AppRoute::Home);
        assert_eq!(AppRoute::Auth.guard(true), AppRoute::Home);
        assert_eq!(AppRoute::Auth.guard(false), AppRoute::Auth);
        // 重置密码链接无论是否登录都可打开
        assert_eq!(AppRoute::ResetPassword.guard(true), AppRoute::ResetPassword);
        assert_eq!(AppRoute::ResetPassword.guard(false), AppRoute::ResetPassword);
        assert_eq!(AppRoute::NotFound.guard(false), AppRoute::NotFound);
    }

    #[test]
    fn test_chrome_hidden_on_focus_pages() {
        assert!(!AppRoute::Auth.shows_chrome());
        assert!(!AppRoute::Onboarding.shows_chrome());
        assert!(!AppRoute::ResetPassword.shows_chrome());
        assert!(AppRoute::Home.shows_chrome());
        assert!(AppRoute::NotFound.shows_chrome());
    }
}
