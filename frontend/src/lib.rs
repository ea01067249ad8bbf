//! FemFit 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: 后端请求与信封解析
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod auth_page;
    pub mod chrome;
    pub mod content;
    mod google_sign_in;
    pub mod home;
    mod icons;
    pub mod onboarding;
    mod question_card;
    pub mod reset_password;
    pub mod update_profile;
}
mod config;

// 原生 Web API 封装模块
pub(crate) mod web;

use crate::auth::AuthContext;
use crate::components::auth_page::AuthPage;
use crate::components::chrome::{Footer, Header};
use crate::components::content::{
    InfoHubPage, NotFoundPage, NutritionPage, SymptomsPage, WorkoutPage,
};
use crate::components::home::HomePage;
use crate::components::onboarding::OnboardingPage;
use crate::components::reset_password::ResetPasswordPage;
use crate::components::update_profile::UpdateProfilePage;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, use_router};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Auth => view! { <AuthPage /> }.into_any(),
        AppRoute::ResetPassword => view! { <ResetPasswordPage /> }.into_any(),
        AppRoute::Onboarding => view! { <OnboardingPage /> }.into_any(),
        AppRoute::UpdateProfile => view! { <UpdateProfilePage /> }.into_any(),
        AppRoute::Symptoms => view! { <SymptomsPage /> }.into_any(),
        AppRoute::Workout => view! { <WorkoutPage /> }.into_any(),
        AppRoute::Nutrition => view! { <NutritionPage /> }.into_any(),
        AppRoute::InfoHub => view! { <InfoHubPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

/// 页面框架：按路由决定是否显示页头与底部导航
#[component]
fn Shell() -> impl IntoView {
    let router = use_router();
    let chrome = move || router.current_route().get().shows_chrome();

    view! {
        <div class="min-h-screen bg-gradient-to-b from-primary/20 to-base-200">
            <Show when=chrome>
                <Header />
            </Show>
            <RouterOutlet matcher=route_matcher />
            <Show when=chrome>
                <Footer />
            </Show>
        </div>
    }
}

/// 把 `log` 输出接到浏览器控制台；重复调用时保留第一次的设置
pub fn init_logging() {
    if console_log::init_with_level(config::log_level()).is_err() {
        log::debug!("console logger already installed");
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 从 LocalStorage 恢复会话并提供上下文
    let auth_ctx = AuthContext::restore();
    provide_context(auth_ctx);

    // 2. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 3. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <Shell />
        </Router>
    }
}
