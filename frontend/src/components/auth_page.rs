//! 登录 / 注册页

use crate::auth::{AuthContext, use_auth};
use crate::components::google_sign_in::GoogleSignInButton;
use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::{RouterService, use_router};
use femfit_shared::flow::ApiClient;
use femfit_shared::protocol::{
    ApiError, AuthGrant, FieldError, GoogleSignInRequest, LoginRequest, SignupRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Login,
    Signup,
}

/// 表单错误：字段错误显示在输入框下，其余显示在顶部
#[derive(Clone, Copy)]
struct FormErrors(RwSignal<Vec<FieldError>>);

impl FormErrors {
    fn new() -> Self {
        Self(RwSignal::new(Vec::new()))
    }

    fn clear(&self) {
        self.0.set(Vec::new());
    }

    fn show(&self, err: &ApiError) {
        self.0.set(err.display_errors());
    }

    fn field(&self, name: &'static str) -> impl Fn() -> Option<String> + Copy + Send + Sync + 'static + use<> {
        let errors = self.0;
        move || {
            errors.with(|list| {
                list.iter()
                    .find(|e| e.field == name)
                    .map(|e| e.message.clone())
            })
        }
    }

    /// 不属于任何输入框的错误
    fn general(&self, fields: &'static [&'static str]) -> impl Fn() -> Vec<String> + Copy + Send + Sync + 'static + use<> {
        let errors = self.0;
        move || {
            errors.with(|list| {
                list.iter()
                    .filter(|e| !fields.contains(&e.field.as_str()))
                    .map(|e| e.message.clone())
                    .collect()
            })
        }
    }
}

const LOGIN_FIELDS: &[&str] = &["email", "password"];
const SIGNUP_FIELDS: &[&str] = &["fullName", "email", "password", "confirmPassword"];

/// 登录成功：保存会话并按引导状态跳转
fn finish_sign_in(auth: AuthContext, router: RouterService, grant: AuthGrant) {
    auth.sign_in(grant.token);
    let target = if grant.completed_onboarding {
        AppRoute::Home
    } else {
        AppRoute::Onboarding
    };
    router.navigate(target.to_path());
}

#[component]
fn FieldHint(message: impl Fn() -> Option<String> + Send + Sync + 'static) -> impl IntoView {
    view! {
        {move || message().map(|text| view! {
            <div class="label"><span class="label-text-alt text-error">{text}</span></div>
        })}
    }
}

#[component]
fn GeneralErrors(messages: impl Fn() -> Vec<String> + Send + Sync + 'static) -> impl IntoView {
    view! {
        {move || {
            messages()
                .into_iter()
                .map(|text| view! {
                    <div role="alert" class="alert alert-error py-2 text-sm"><span>{text}</span></div>
                })
                .collect_view()
        }}
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (tab, set_tab) = signal(Tab::Login);
    let submitting = RwSignal::new(false);
    let errors = FormErrors::new();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let switch_tab = move |next: Tab| {
        errors.clear();
        set_tab.set(next);
    };

    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = LoginRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        submitting.set(true);
        errors.clear();
        spawn_local(async move {
            match auth.api().send(&request).await {
                Ok(grant) => finish_sign_in(auth, router, grant),
                Err(err) => {
                    log::info!("login rejected: {err}");
                    errors.show(&err);
                }
            }
            submitting.set(false);
        });
    };

    let on_signup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = SignupRequest {
            full_name: full_name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        submitting.set(true);
        errors.clear();
        spawn_local(async move {
            match auth.api().send(&request).await {
                Ok(grant) => finish_sign_in(auth, router, grant),
                Err(err) => {
                    log::info!("signup rejected: {err}");
                    errors.show(&err);
                }
            }
            submitting.set(false);
        });
    };

    let on_google = Callback::new(move |id_token: String| {
        errors.clear();
        submitting.set(true);
        spawn_local(async move {
            match auth.api().send(&GoogleSignInRequest { id_token }).await {
                Ok(grant) => finish_sign_in(auth, router, grant),
                Err(err) => {
                    log::info!("third-party sign-in rejected: {err}");
                    errors.show(&err);
                }
            }
            submitting.set(false);
        });
    });

    let tab_class = move |which: Tab| {
        move || {
            if tab.get() == which {
                "tab tab-active"
            } else {
                "tab"
            }
        }
    };

    view! {
        <div class="hero min-h-screen bg-gradient-to-br from-primary to-secondary">
            <div class="hero-content w-full max-w-md flex-col">
                <div class="mb-4 text-center text-primary-content">
                    <h1 class="text-4xl font-bold">"FemFit"</h1>
                    <p class="opacity-80">"Fitness that moves with your cycle"</p>
                </div>

                <div class="card w-full shrink-0 bg-base-100 shadow-2xl">
                    <div class="card-body">
                        <div role="tablist" class="tabs tabs-boxed mb-2">
                            <a role="tab" class=tab_class(Tab::Login) on:click=move |_| switch_tab(Tab::Login)>"Login"</a>
                            <a role="tab" class=tab_class(Tab::Signup) on:click=move |_| switch_tab(Tab::Signup)>"Sign Up"</a>
                        </div>

                        <Show
                            when=move || tab.get() == Tab::Login
                            fallback=move || view! {
                                <form class="flex flex-col gap-2" on:submit=on_signup>
                                    <GeneralErrors messages=errors.general(SIGNUP_FIELDS) />
                                    <label class="form-control">
                                        <div class="label"><span class="label-text">"Full name"</span></div>
                                        <input type="text" class="input input-bordered" placeholder="Jane Doe"
                                            prop:value=full_name on:input=move |ev| full_name.set(event_target_value(&ev)) />
                                        <FieldHint message=errors.field("fullName") />
                                    </label>
                                    <label class="form-control">
                                        <div class="label"><span class="label-text">"Email"</span></div>
                                        <input type="email" class="input input-bordered" placeholder="you@example.com"
                                            prop:value=email on:input=move |ev| email.set(event_target_value(&ev)) />
                                        <FieldHint message=errors.field("email") />
                                    </label>
                                    <label class="form-control">
                                        <div class="label"><span class="label-text">"Password"</span></div>
                                        <input type="password" class="input input-bordered"
                                            prop:value=password on:input=move |ev| password.set(event_target_value(&ev)) />
                                        <FieldHint message=errors.field("password") />
                                    </label>
                                    <label class="form-control">
                                        <div class="label"><span class="label-text">"Confirm password"</span></div>
                                        <input type="password" class="input input-bordered"
                                            prop:value=confirm_password on:input=move |ev| confirm_password.set(event_target_value(&ev)) />
                                        <FieldHint message=errors.field("confirmPassword") />
                                    </label>
                                    <button type="submit" class="btn btn-primary mt-4" disabled=move || submitting.get()>
                                        <Show when=move || submitting.get()>
                                            <span class="loading loading-spinner"></span>
                                        </Show>
                                        "Create account"
                                    </button>
                                </form>
                            }
                        >
                            <form class="flex flex-col gap-2" on:submit=on_login>
                                <GeneralErrors messages=errors.general(LOGIN_FIELDS) />
                                <label class="form-control">
                                    <div class="label"><span class="label-text">"Email"</span></div>
                                    <input type="email" class="input input-bordered" placeholder="you@example.com"
                                        prop:value=email on:input=move |ev| email.set(event_target_value(&ev)) />
                                    <FieldHint message=errors.field("email") />
                                </label>
                                <label class="form-control">
                                    <div class="label"><span class="label-text">"Password"</span></div>
                                    <input type="password" class="input input-bordered"
                                        prop:value=password on:input=move |ev| password.set(event_target_value(&ev)) />
                                    <FieldHint message=errors.field("password") />
                                </label>
                                <button type="submit" class="btn btn-primary mt-4" disabled=move || submitting.get()>
                                    <Show when=move || submitting.get()>
                                        <span class="loading loading-spinner"></span>
                                    </Show>
                                    "Login"
                                </button>
                            </form>
                        </Show>

                        {config::google_client_id().map(|client_id| view! {
                            <div class="divider">"or"</div>
                            <GoogleSignInButton client_id=client_id on_credential=on_google />
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}
