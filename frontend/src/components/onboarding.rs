//! 引导问卷页
//!
//! 逐阶段展示问题，当前阶段完整后才能继续；全部完成后显示周期与 BMI 摘要并提交。

use crate::auth::use_auth;
use crate::components::icons::{CheckCircle, Loader};
use crate::components::question_card::QuestionCard;
use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::scoped_timeout;
use femfit_shared::flow::{CompletionSummary, OnboardingFlow};
use femfit_shared::{AnswerValue, QuestionnaireSession, today};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let session = RwSignal::new(None::<QuestionnaireSession>);
    let load_error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);
    let submit_error = RwSignal::new(None::<String>);

    // ========================================================================
    // 加载问卷目录
    // ========================================================================

    scoped_timeout(config::ui_delay(), move || {
        let api = auth.api();
        spawn_local(async move {
            match OnboardingFlow::new(&api).load().await {
                Ok(load) => session.set(Some(load.into_session())),
                Err(err) => {
                    if !auth.handle_error(&err) {
                        load_error.set(Some(err.to_string()));
                    }
                }
            }
        });
    });

    // 只在步骤变化时重建题目卡片，答案变化不会打断输入
    let step = Memo::new(move |_| session.with(|s| s.as_ref().map(|s| (s.step(), s.is_finished()))));

    let progress = move || {
        session.with(|s| {
            s.as_ref()
                .map(|s| (s.step(), s.total_steps(), s.completion_percentage()))
        })
    };

    let can_continue = move || session.with(|s| s.as_ref().is_some_and(|s| s.can_advance()));

    let on_continue = move |_| {
        session.update(|s| {
            if let Some(s) = s {
                s.advance();
            }
        });
    };

    let on_submit = move |_| {
        let Some(current) = session.get_untracked() else {
            return;
        };
        submitting.set(true);
        submit_error.set(None);
        let api = auth.api();
        spawn_local(async move {
            match OnboardingFlow::new(&api).submit(&current).await {
                Ok(()) => router.navigate(AppRoute::Home.to_path()),
                Err(err) => {
                    if !auth.handle_error(&err) {
                        submit_error.set(Some(err.to_string()));
                    }
                }
            }
            submitting.set(false);
        });
    };

    let questions = move || {
        step.track();
        session.with_untracked(|s| {
            let Some(s) = s.as_ref() else {
                return Vec::new();
            };
            s.current_questions()
                .iter()
                .cloned()
                .map(|question| {
                    let key = question.key.clone();
                    let initial = s.answer(&key).cloned();
                    let on_change = Callback::new(move |answer: Option<AnswerValue>| {
                        session.update(|s| {
                            if let Some(s) = s {
                                if let Err(err) = s.set_answer(&key, answer) {
                                    log::warn!("{err}");
                                }
                            }
                        });
                    });
                    view! { <QuestionCard question=question initial=initial on_change=on_change /> }
                })
                .collect::<Vec<_>>()
        })
    };

    let summary = move || {
        session.with(|s| {
            s.as_ref()
                .map(|s| CompletionSummary::from_answers(s.answers(), today()))
        })
    };

    view! {
        <div class="min-h-screen bg-gradient-to-br from-primary to-secondary p-6">
            {move || match step.get() {
                None => match load_error.get() {
                    Some(message) => view! {
                        <div role="alert" class="alert alert-error mx-auto mt-24 max-w-md">
                            <span>{message}</span>
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <div class="flex min-h-screen items-center justify-center">
                            <Loader attr:class="h-8 w-8 animate-spin text-primary-content" />
                        </div>
                    }
                    .into_any(),
                },
                Some((_, false)) => view! {
                    <div class="mx-auto flex max-w-xl flex-col gap-6">
                        {move || progress().map(|(step, total, percent)| view! {
                            <div>
                                <div class="mb-2 font-medium text-primary-content">
                                    {format!("Step {step} of {total}")}
                                </div>
                                <progress class="progress progress-accent w-full" value=percent max="100"></progress>
                            </div>
                        })}
                        <div class="flex flex-col items-center gap-4">{questions}</div>
                        <button
                            class="btn btn-lg w-full border-2 border-white bg-primary text-primary-content"
                            disabled=move || !can_continue()
                            on:click=on_continue
                        >
                            "Continue"
                        </button>
                    </div>
                }
                .into_any(),
                Some((_, true)) => view! {
                    <div class="mx-auto flex max-w-md flex-col items-center gap-8 py-6">
                        <div class="rounded-full bg-base-100 p-6">
                            <CheckCircle attr:class="h-16 w-16 text-primary" />
                        </div>
                        <div class="text-center text-primary-content">
                            <h1 class="mb-3 text-3xl font-bold">"You're all set!"</h1>
                            <p class="opacity-80">
                                "We've personalized your fitness journey based on your information"
                            </p>
                        </div>
                        {move || summary().map(|summary| view! {
                            <div class="card w-full bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h2 class="card-title">"Your Cycle Information"</h2>
                                    <div class="flex justify-between border-b border-base-200 py-2">
                                        <span>"Current Cycle Day:"</span>
                                        <span class="font-semibold">{summary.cycle.cycle_day}</span>
                                    </div>
                                    <div class="flex justify-between py-2">
                                        <span>"Current Phase:"</span>
                                        <span class="font-semibold">{summary.cycle.phase.label()}</span>
                                    </div>
                                    <div class="flex justify-between py-2">
                                        <span>"BMI:"</span>
                                        <div class="flex flex-col items-end font-semibold">
                                            <p>{summary.bmi.map(|b| format!("{b:.1}")).unwrap_or_else(|| "Unknown".into())}</p>
                                            <p>{summary.bmi_category.map(|c| c.label()).unwrap_or("Unknown")}</p>
                                        </div>
                                    </div>
                                </div>
                            </div>
                        })}
                        <Show when=move || submit_error.get().is_some()>
                            <div role="alert" class="alert alert-error">
                                <span>{move || submit_error.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <button
                            class="btn btn-lg w-full bg-base-100 text-primary"
                            disabled=move || submitting.get()
                            on:click=on_submit
                        >
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Start Your Journey".into_any()
                            }}
                        </button>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
