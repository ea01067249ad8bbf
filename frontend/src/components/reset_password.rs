//! 重置密码页（邮件链接 `/reset-password?token=...`）

use crate::auth::use_auth;
use crate::config::RESET_REDIRECT_DELAY;
use crate::web::route::AppRoute;
use crate::web::router::{query_param, use_router};
use femfit_shared::flow::ApiClient;
use femfit_shared::protocol::{
    ApiError, FieldError, ResetPasswordRequest, ValidateResetTokenRequest,
};
use leptos::leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// token 校验与重置进度
#[derive(Clone, Debug, PartialEq)]
enum ResetState {
    Checking,
    Ready,
    Invalid(String),
    Done,
}

fn error_for(errors: &[FieldError], field: &str) -> Option<String> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.clone())
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let token = query_param("token");

    let state = RwSignal::new(ResetState::Checking);
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let submitting = RwSignal::new(false);

    // ========================================================================
    // 挂载时校验 token
    // ========================================================================

    match token.clone() {
        None => state.set(ResetState::Invalid("Invalid or missing reset token".into())),
        Some(token) => {
            let api = auth.api();
            spawn_local(async move {
                match api.send(&ValidateResetTokenRequest { token }).await {
                    Ok(()) => state.set(ResetState::Ready),
                    Err(err) => {
                        log::info!("reset token rejected: {err}");
                        let message = match err {
                            ApiError::Rejected { message, .. }
                                if !message.is_empty() =>
                            {
                                message
                            }
                            _ => "Invalid or expired reset token".to_string(),
                        };
                        state.set(ResetState::Invalid(message));
                    }
                }
            });
        }
    }

    // 成功后延迟跳转登录页；离开页面时取消
    let redirect_timer = StoredValue::new(None::<TimeoutHandle>);
    on_cleanup(move || {
        if let Some(Some(handle)) = redirect_timer.try_get_value() {
            handle.clear();
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let Some(token) = token.clone() else {
            return;
        };
        let request = ResetPasswordRequest {
            token,
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        if let Err(local) = request.validate() {
            errors.set(local);
            return;
        }

        errors.set(Vec::new());
        submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.send(&request).await {
                Ok(()) => {
                    state.set(ResetState::Done);
                    let handle = set_timeout_with_handle(
                        move || router.navigate(AppRoute::Auth.to_path()),
                        RESET_REDIRECT_DELAY,
                    );
                    match handle {
                        Ok(handle) => {
                            // 页面已卸载：不再跳转
                            if redirect_timer.try_set_value(Some(handle)).is_some() {
                                handle.clear();
                            }
                        }
                        Err(err) => log::warn!("could not schedule redirect: {:?}", err),
                    }
                }
                Err(err) => errors.set(err.display_errors()),
            }
            submitting.set(false);
        });
    };

    let field_error = move |field: &'static str| move || errors.with(|list| error_for(list, field));
    let general_error = move || {
        errors.with(|list| {
            list.iter()
                .filter(|e| e.field != "password" && e.field != "confirmPassword")
                .map(|e| e.message.clone())
                .next()
        })
    };

    view! {
        <div class="hero min-h-screen bg-gradient-to-br from-primary to-secondary">
            <div class="hero-content w-full max-w-md">
                {move || match state.get() {
                    ResetState::Checking => view! {
                        <div class="flex flex-col items-center gap-4 text-primary-content">
                            <span class="loading loading-spinner loading-lg"></span>
                            <p>"Validating reset token..."</p>
                        </div>
                    }
                    .into_any(),
                    ResetState::Invalid(message) => view! {
                        <div class="card w-full bg-base-100 shadow-2xl">
                            <div class="card-body items-center text-center">
                                <h2 class="card-title text-error">"Link not valid"</h2>
                                <p>{message}</p>
                                <button class="btn btn-primary mt-4" on:click=move |_| router.navigate(AppRoute::Auth.to_path())>
                                    "Back to login"
                                </button>
                            </div>
                        </div>
                    }
                    .into_any(),
                    ResetState::Done => view! {
                        <div role="alert" class="alert alert-success">
                            <span>"Password reset successful! Redirecting to login..."</span>
                        </div>
                    }
                    .into_any(),
                    ResetState::Ready => view! {
                        <form class="card w-full bg-base-100 shadow-2xl" on:submit=on_submit.clone()>
                            <div class="card-body">
                                <h2 class="card-title">"Choose a new password"</h2>
                                {move || general_error().map(|text| view! {
                                    <div role="alert" class="alert alert-error py-2 text-sm"><span>{text}</span></div>
                                })}
                                <label class="form-control">
                                    <div class="label"><span class="label-text">"New password"</span></div>
                                    <input type="password" class="input input-bordered"
                                        prop:value=password on:input=move |ev| password.set(event_target_value(&ev)) />
                                    {move || field_error("password")().map(|text| view! {
                                        <div class="label"><span class="label-text-alt text-error">{text}</span></div>
                                    })}
                                </label>
                                <label class="form-control">
                                    <div class="label"><span class="label-text">"Confirm password"</span></div>
                                    <input type="password" class="input input-bordered"
                                        prop:value=confirm_password on:input=move |ev| confirm_password.set(event_target_value(&ev)) />
                                    {move || field_error("confirmPassword")().map(|text| view! {
                                        <div class="label"><span class="label-text-alt text-error">{text}</span></div>
                                    })}
                                </label>
                                <button type="submit" class="btn btn-primary mt-4" disabled=move || submitting.get()>
                                    <Show when=move || submitting.get()>
                                        <span class="loading loading-spinner"></span>
                                    </Show>
                                    "Reset password"
                                </button>
                            </div>
                        </form>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
