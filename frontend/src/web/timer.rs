//! 定时器封装模块
//!
//! 基于 leptos 的 `set_timeout_with_handle`，把定时器绑定到当前组件的生命周期。

use leptos::leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle};
use leptos::prelude::*;
use std::time::Duration;

/// 一次性定时器
///
/// 必须在组件构建期间调用：所在组件卸载时自动取消，回调不会在页面离开后触发。
/// 返回句柄以便提前取消；无法设置定时器时返回 None 并记录警告。
pub fn scoped_timeout(delay: Duration, callback: impl FnOnce() + 'static) -> Option<TimeoutHandle> {
    match set_timeout_with_handle(callback, delay) {
        Ok(handle) => {
            on_cleanup(move || handle.clear());
            Some(handle)
        }
        Err(err) => {
            log::warn!("could not schedule timer: {:?}", err);
            None
        }
    }
}
