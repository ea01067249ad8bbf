//! 路由服务
//!
//! 所有 `window.history` 操作集中在这里。导航、浏览器前进后退、
//! 认证状态变化三条入口都经过同一个守卫 [`AppRoute::guard`]。
//! 查询参数（如重置密码链接中的 token）也从这里读取。

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

use super::route::AppRoute;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 读取当前 URL 的查询参数
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(name)
        .filter(|value| !value.is_empty())
}

#[derive(Clone, Copy)]
enum HistoryEntry {
    Push,
    Replace,
}

fn write_history(path: &str, entry: HistoryEntry) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let written = match entry {
        HistoryEntry::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryEntry::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
    if let Err(err) = written {
        log::warn!("history update to {path} failed: {err:?}");
    }
}

/// 路由器服务
///
/// 当前路由保存在信号里驱动界面；认证状态由外部注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    route: RwSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        Self {
            route: RwSignal::new(AppRoute::from_path(&current_path())),
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.route.read_only()
    }

    /// 导航到站内路径，受守卫约束
    pub fn navigate(&self, path: &str) {
        self.land(AppRoute::from_path(path), HistoryEntry::Push);
    }

    fn land(&self, requested: AppRoute, entry: HistoryEntry) {
        let landed = requested.guard(self.is_authenticated.get_untracked());
        if landed != requested {
            log::info!("{requested} redirected to {landed}");
        }
        write_history(landed.to_path(), entry);
        self.route.set(landed);
    }

    /// 浏览器后退/前进：重新走一遍守卫，重定向时替换当前记录
    fn listen_popstate(self) {
        let handle = window_event_listener(ev::popstate, move |_| {
            self.land(AppRoute::from_path(&current_path()), HistoryEntry::Replace);
        });
        on_cleanup(move || handle.remove());
    }

    /// 登录或登出后，当前页面不再允许时跳走
    fn follow_auth(self) {
        Effect::new(move |_| {
            let is_auth = self.is_authenticated.get();
            let route = self.route.get_untracked();
            let landed = route.guard(is_auth);
            if landed != route {
                log::info!("session changed, leaving {route} for {landed}");
                write_history(landed.to_path(), HistoryEntry::Push);
                self.route.set(landed);
            }
        });
    }
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，提供路由上下文
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    let router = RouterService::new(is_authenticated);
    router.listen_popstate();
    router.follow_auth();
    provide_context(router);

    children()
}

/// 路由出口：按当前路由渲染页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let route = use_router().current_route();
    move || matcher(route.get())
}
