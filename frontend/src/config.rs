//! 构建期配置
//!
//! 通过环境变量在编译时注入，未设置时使用本地开发默认值：
//! - `FEMFIT_API_URL`: 后端 API 根地址
//! - `FEMFIT_GOOGLE_CLIENT_ID`: 第三方登录客户端 ID，未设置时不显示登录按钮
//! - `FEMFIT_UI_DELAY_MS`: 页面加载数据前的过渡延迟
//! - `FEMFIT_LOG_LEVEL`: 控制台日志级别（`error` .. `trace`）

use std::str::FromStr;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_UI_DELAY_MS: u64 = 300;

/// 每日心情弹窗的出现延迟
pub const MOOD_PROMPT_DELAY: Duration = Duration::from_secs(5);
/// 重置密码成功后跳转登录页前的停留时间
pub const RESET_REDIRECT_DELAY: Duration = Duration::from_secs(2);

pub fn api_base_url() -> &'static str {
    option_env!("FEMFIT_API_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

pub fn google_client_id() -> Option<&'static str> {
    option_env!("FEMFIT_GOOGLE_CLIENT_ID").filter(|id| !id.trim().is_empty())
}

pub fn ui_delay() -> Duration {
    let millis = option_env!("FEMFIT_UI_DELAY_MS")
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(DEFAULT_UI_DELAY_MS);
    Duration::from_millis(millis)
}

/// 控制台日志级别：优先使用 `FEMFIT_LOG_LEVEL`，否则 debug 构建为 Debug，release 为 Info
pub fn log_level() -> log::Level {
    resolve_log_level(option_env!("FEMFIT_LOG_LEVEL"), cfg!(debug_assertions))
}

fn resolve_log_level(raw: Option<&str>, debug_build: bool) -> log::Level {
    raw.and_then(|raw| log::Level::from_str(raw.trim()).ok())
        .unwrap_or(if debug_build {
            log::Level::Debug
        } else {
            log::Level::Info
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_defaults_by_build() {
        assert_eq!(resolve_log_level(None, true), log::Level::Debug);
        assert_eq!(resolve_log_level(None, false), log::Level::Info);
    }

    #[test]
    fn test_log_level_override() {
        assert_eq!(resolve_log_level(Some("warn"), true), log::Level::Warn);
        assert_eq!(resolve_log_level(Some(" TRACE "), false), log::Level::Trace);
        // 无法识别时回退到默认值
        assert_eq!(resolve_log_level(Some("loud"), false), log::Level::Info);
    }
}
