//! 编辑资料页：列出已提交的引导答案，逐题修改

use crate::auth::use_auth;
use crate::components::icons::{ArrowLeft, ArrowRight, Loader, UserIcon};
use crate::components::question_card::QuestionCard;
use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::scoped_timeout;
use femfit_shared::flow::{ProfileEditor, ProfileFlow, ProfileLoad, ProfileView};
use femfit_shared::{AnswerValue, Question};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn UpdateProfilePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let profile = RwSignal::new(None::<ProfileView>);
    let load_error = RwSignal::new(None::<String>);
    let editor = RwSignal::new(None::<ProfileEditor>);
    let saving = RwSignal::new(false);
    let save_error = RwSignal::new(None::<String>);

    let load = move || {
        let api = auth.api();
        spawn_local(async move {
            match ProfileFlow::new(&api).load().await {
                Ok(ProfileLoad::Ready(view)) => profile.set(Some(view)),
                Ok(ProfileLoad::NeedsOnboarding) => router.navigate(AppRoute::Onboarding.to_path()),
                Err(err) => {
                    if !auth.handle_error(&err) {
                        load_error.set(Some(err.to_string()));
                    }
                }
            }
        });
    };

    scoped_timeout(config::ui_delay(), load);

    // Escape 关闭编辑弹窗（不保存）
    let keydown = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            editor.set(None);
        }
    });
    on_cleanup(move || keydown.remove());

    let open_editor = move |question: Question| {
        save_error.set(None);
        editor.set(Some(ProfileEditor::new(question)));
    };

    let close_editor = move || {
        editor.set(None);
        save_error.set(None);
    };

    let on_update = move |_| {
        let Some(request) = editor.with_untracked(|e| e.as_ref().and_then(ProfileEditor::payload)) else {
            return;
        };
        saving.set(true);
        let api = auth.api();
        spawn_local(async move {
            match ProfileFlow::new(&api).update(&request).await {
                Ok(()) => {
                    editor.set(None);
                    load();
                }
                Err(err) => {
                    log::warn!("profile update failed: {err}");
                    if !auth.handle_error(&err) {
                        save_error.set(Some(err.to_string()));
                    }
                }
            }
            saving.set(false);
        });
    };

    // 弹窗只在打开时按题目构建一次
    let editing_key = Memo::new(move |_| editor.with(|e| e.as_ref().map(|e| e.question().key.clone())));
    let modal = move || {
        editing_key.track();
        editor.with_untracked(|e| {
            e.as_ref().map(|e| {
                let question = e.question().clone();
                let initial = e.answer().cloned();
                let on_change = Callback::new(move |answer: Option<AnswerValue>| {
                    editor.update(|e| {
                        if let Some(e) = e {
                            if let Err(err) = e.set_answer(answer) {
                                log::warn!("{err}");
                            }
                        }
                    });
                });
                view! {
                    <div class="modal modal-open" on:click=move |_| close_editor()>
                        <div class="modal-box flex flex-col gap-5" on:click=|ev| ev.stop_propagation()>
                            <QuestionCard question=question initial=initial on_change=on_change />
                            <Show when=move || save_error.get().is_some()>
                                <div role="alert" class="alert alert-error py-2 text-sm">
                                    <span>{move || save_error.get().unwrap_or_default()}</span>
                                </div>
                            </Show>
                            <div class="modal-action justify-between">
                                <button class="btn btn-ghost" on:click=move |_| close_editor()>"Cancel"</button>
                                <button
                                    class="btn btn-primary"
                                    disabled=move || saving.get() || !editor.with(|e| e.as_ref().is_some_and(ProfileEditor::can_update))
                                    on:click=on_update
                                >
                                    "Update"
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
        })
    };

    let cards = move || {
        profile.with(|p| {
            p.as_ref().map(|p| {
                p.catalog
                    .questions()
                    .cloned()
                    .map(|question| {
                        let shown = p.display.get(&question.key).cloned();
                        let answered = shown.is_some();
                        let prompt = question.prompt.clone();
                        view! {
                            <div class="card bg-base-100 shadow-md">
                                <div class="card-body gap-2 p-4">
                                    <h3 class="font-semibold text-primary">{prompt}</h3>
                                    <div class="flex items-end justify-between">
                                        <p>{shown.unwrap_or_else(|| "Please provide your answer below.".into())}</p>
                                        <button class="btn btn-ghost btn-sm" on:click=move |_| open_editor(question.clone())>
                                            {if answered { "Update" } else { "Add Answer" }}
                                            <ArrowRight attr:class="h-3 w-3" />
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            })
        })
    };

    view! {
        <main class="container mx-auto min-h-screen px-4 pb-10 pt-24">
            {modal}
            <div class="mb-8 flex flex-col-reverse items-center justify-between gap-5 sm:flex-row">
                <div class="flex items-center gap-4">
                    <div class="flex h-12 w-12 items-center justify-center rounded-full bg-primary/20">
                        <UserIcon attr:class="h-6 w-6 text-primary" />
                    </div>
                    <div>
                        <h2 class="text-xl font-semibold">"Your profile"</h2>
                        <p class="text-base-content/70">"Update your profile and preferences here."</p>
                    </div>
                </div>
                <button class="btn btn-outline btn-primary" on:click=move |_| router.navigate(AppRoute::Home.to_path())>
                    <ArrowLeft attr:class="h-4 w-4" />
                    "Back to Home"
                </button>
            </div>
            {move || match (profile.with(Option::is_some), load_error.get()) {
                (false, Some(message)) => view! {
                    <div role="alert" class="alert alert-error"><span>{message}</span></div>
                }
                .into_any(),
                (false, None) => view! {
                    <div class="flex justify-center py-24">
                        <Loader attr:class="h-8 w-8 animate-spin text-primary" />
                    </div>
                }
                .into_any(),
                (true, _) => view! {
                    <div class="mb-14 grid grid-cols-1 gap-6 sm:grid-cols-2">{cards}</div>
                }
                .into_any(),
            }}
        </main>
    }
}
