//! 首页：周期概况、激素水平、训练与饮食建议、每日心情

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::config::{self, MOOD_PROMPT_DELAY};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::scoped_timeout;
use femfit_shared::flow::{HomeFlow, HomeLoad, wants_mood_prompt};
use femfit_shared::user::{HomeSection, HormoneLevel};
use femfit_shared::{CyclePhase, Mood, today};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn phase_color(phase: CyclePhase) -> &'static str {
    match phase {
        CyclePhase::Menstruation => "text-red-600",
        CyclePhase::Follicular => "text-green-600",
        CyclePhase::Ovulation => "text-yellow-600",
        CyclePhase::Luteal => "text-blue-600",
        CyclePhase::Unknown => "text-primary",
    }
}

#[component]
fn HormoneBar(name: &'static str, color: &'static str, level: HormoneLevel) -> impl IntoView {
    let width = format!("width: {}%", level.width_percent());
    view! {
        <div class="w-full">
            <span class=format!("text-sm font-medium {color}")>{name}</span>
            <div class="mt-1 h-2 w-full overflow-hidden rounded-full bg-base-200">
                <div class="h-full rounded-full bg-gradient-to-r from-primary/40 to-primary" style=width></div>
            </div>
            <p class="mt-1 text-xs text-base-content/60">{level.notes}</p>
        </div>
    }
}

#[component]
fn Recommendations(
    title: &'static str,
    note: &'static str,
    lead: String,
    items: [&'static str; 3],
    action: &'static str,
    target: AppRoute,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let list = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| view! {
            <li class="flex items-start gap-2">
                <span class="badge badge-primary badge-sm mt-0.5">{i + 1}</span>
                <span>{item}</span>
            </li>
        })
        .collect_view();

    view! {
        <section class="card bg-base-100 shadow-md">
            <div class="card-body gap-3">
                <h3 class="card-title text-base">{children()} {title}</h3>
                <p class="text-sm text-base-content/70">{note}</p>
                <p class="text-sm font-medium">{lead}</p>
                <ul class="space-y-2">{list}</ul>
                <button class="btn btn-primary mt-2" on:click=move |_| router.navigate(target.to_path())>
                    {action}
                </button>
            </div>
        </section>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let home = RwSignal::new(None::<HomeSection>);
    let load_error = RwSignal::new(None::<String>);
    let show_mood = RwSignal::new(false);
    let show_know_more = RwSignal::new(false);

    scoped_timeout(config::ui_delay(), move || {
        let api = auth.api();
        spawn_local(async move {
            match HomeFlow::new(&api).load().await {
                Ok(HomeLoad::Ready(section)) => home.set(Some(section)),
                Ok(HomeLoad::NeedsOnboarding) => router.navigate(AppRoute::Onboarding.to_path()),
                Err(err) => {
                    if !auth.handle_error(&err) {
                        load_error.set(Some(err.to_string()));
                    }
                }
            }
        });
    });

    // 今天还没记录心情时，延迟弹出询问；数据变化时重新判断
    Effect::new(move |_| {
        let wants = home.with(|h| h.as_ref().is_some_and(|h| wants_mood_prompt(h, today())));
        if wants {
            scoped_timeout(MOOD_PROMPT_DELAY, move || show_mood.set(true));
        }
    });

    let keydown = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            show_mood.set(false);
            show_know_more.set(false);
        }
    });
    on_cleanup(move || keydown.remove());

    let record_mood = move |mood: Mood| {
        show_mood.set(false);
        let api = auth.api();
        spawn_local(async move {
            match HomeFlow::new(&api).record_mood(mood).await {
                Ok(history) => home.update(|h| {
                    if let Some(h) = h {
                        h.user.daily_mood = history;
                    }
                }),
                Err(err) => {
                    log::warn!("could not record mood: {err}");
                    auth.handle_error(&err);
                }
            }
        });
    };

    let mood_popup = move || {
        show_mood.get().then(|| {
            let buttons = Mood::ALL
                .into_iter()
                .map(|mood| view! {
                    <button
                        class="btn btn-lg h-auto flex-col gap-3 py-6"
                        on:click=move |_| record_mood(mood)
                    >
                        <span class="text-4xl">{mood.emoji()}</span>
                        <span>{mood.label()}</span>
                    </button>
                })
                .collect_view();
            view! {
                <div class="modal modal-open">
                    <div class="modal-box flex flex-col gap-5">
                        <div class="flex items-start justify-between">
                            <h3 class="text-2xl font-semibold text-primary">"How are you feeling today?"</h3>
                            <button class="btn btn-ghost btn-sm btn-circle" on:click=move |_| show_mood.set(false)>
                                <XIcon attr:class="h-6 w-6" />
                            </button>
                        </div>
                        <div class="grid grid-cols-2 gap-4">{buttons}</div>
                        <p class="text-center text-primary">
                            "This helps us personalize your workout and nutrition recommendations based on how you feel."
                        </p>
                    </div>
                </div>
            }
        })
    };

    let know_more_popup = move || {
        if !show_know_more.get() {
            return None;
        }
        let insight = home.with(|h| h.as_ref().and_then(|h| h.cycle_info.clone()))?;
        Some(view! {
            <div class="modal modal-open" on:click=move |_| show_know_more.set(false)>
                <div class="modal-box flex flex-col gap-5" on:click=|ev| ev.stop_propagation()>
                    <div class="flex items-center justify-between">
                        <h2 class="text-2xl font-semibold text-primary">"Know more about your cycle"</h2>
                        <button class="btn btn-ghost btn-sm btn-circle" on:click=move |_| show_know_more.set(false)>
                            <XIcon attr:class="h-6 w-6" />
                        </button>
                    </div>
                    <div class="rounded-lg border-2 border-primary p-4">
                        <h3 class="text-xl font-semibold text-secondary">"Phase Superpowers"</h3>
                        <p class="text-sm text-base-content/70">{insight.superpower}</p>
                    </div>
                    <div class="rounded-lg border-2 border-primary p-4">
                        <h3 class="text-xl font-semibold text-secondary">"Fun Science Fact"</h3>
                        <p class="text-sm text-base-content/70">{insight.fact}</p>
                    </div>
                </div>
            </div>
        })
    };

    let content = move || {
        let section = home.get()?;
        let phase = section.phase();
        let color = phase_color(phase);
        let phase_word = match phase {
            CyclePhase::Unknown => "current".to_string(),
            other => other.label().to_lowercase(),
        };
        let insight = section.cycle_info.clone().unwrap_or_default();
        let cycle_day = section.user_info.as_ref().map(|info| info.cycle_day);

        let cycle_card = if section.user.tracks_cycle() {
            view! {
                <div class="flex flex-col gap-4 sm:flex-row sm:items-center sm:justify-between">
                    <div>
                        <span class="text-sm text-base-content/60">"Current phase"</span>
                        <div class=format!("flex items-center gap-2 text-lg font-medium {color}")>
                            <CalendarIcon attr:class="h-6 w-6" />
                            {phase.label()}
                        </div>
                        <p class="mt-1 max-w-xl text-sm text-base-content/70">{insight.description.clone()}</p>
                    </div>
                    <div class="order-first flex flex-col items-center sm:order-none">
                        <div class="flex h-20 w-20 items-center justify-center rounded-full border-4 border-primary/30 bg-primary/10">
                            <span class="text-4xl font-bold text-primary">{cycle_day}</span>
                        </div>
                        <span class="mt-2 text-xs text-base-content/60">"Day of cycle"</span>
                    </div>
                </div>
                <div class="mt-2">
                    <h4 class="mb-3 text-sm font-medium">"HORMONE LEVELS"</h4>
                    <div class="flex flex-col gap-6 sm:flex-row sm:gap-10">
                        <HormoneBar name="Estrogen" color="text-pink-500" level=insight.estrogen.clone() />
                        <HormoneBar name="Progesterone" color="text-blue-400" level=insight.progesterone.clone() />
                        <HormoneBar name="Testosterone" color="text-amber-500" level=insight.testosterone.clone() />
                    </div>
                </div>
                <button class="btn btn-primary mt-6 w-full uppercase" on:click=move |_| show_know_more.set(true)>
                    "Know more about your cycle"
                </button>
            }
            .into_any()
        } else {
            view! {
                <div class="py-2 text-center">
                    <p>"Track your cycle to get personalized recommendations"</p>
                    <button class="btn btn-outline btn-primary mt-2" on:click=move |_| router.navigate(AppRoute::UpdateProfile.to_path())>
                        "Add Period Date"
                    </button>
                </div>
            }
            .into_any()
        };

        Some(view! {
            <div class="mb-8 flex items-center gap-4">
                <div class="flex h-12 w-12 items-center justify-center rounded-full bg-primary/20">
                    <UserIcon attr:class="h-6 w-6 text-primary" />
                </div>
                <div>
                    <h2 class="text-xl font-semibold">{format!("Welcome, {}!", section.user.full_name)}</h2>
                    <p class="text-base-content/70">"Your personalized wellness journey is here."</p>
                </div>
            </div>

            <section class="card mb-8 bg-base-100 shadow-md">
                <div class="card-body">
                    <div class="mb-4 flex items-center justify-between">
                        <h3 class="card-title">
                            <CalendarIcon attr:class="h-5 w-5 text-primary" />
                            "Your Daily Insight"
                        </h3>
                        <button class="btn btn-primary btn-sm" on:click=move |_| router.navigate(AppRoute::UpdateProfile.to_path())>
                            "Update"
                            <ArrowRight attr:class="h-3 w-3" />
                        </button>
                    </div>
                    {cycle_card}
                </div>
            </section>

            <div class="mb-6 grid grid-cols-1 gap-6 md:grid-cols-2">
                <Recommendations
                    title="Workout Recommendations"
                    note=phase.workout_note()
                    lead=format!("Based on your {phase_word} phase, focus on:")
                    items=phase.workout_focus()
                    action="View Workouts"
                    target=AppRoute::Workout
                >
                    <Dumbbell attr:class="h-5 w-5 text-primary" />
                </Recommendations>
                <Recommendations
                    title="Nutrition Recommendations"
                    note=phase.nutrition_note()
                    lead=format!("Foods to focus on during your {phase_word} phase:")
                    items=phase.nutrition_focus()
                    action="View Recipes"
                    target=AppRoute::Nutrition
                >
                    <Heart attr:class="h-5 w-5 text-primary" />
                </Recommendations>
            </div>
        })
    };

    view! {
        <main class="container mx-auto min-h-screen px-4 pb-10 pt-24">
            {mood_popup}
            {know_more_popup}
            {move || match (home.with(Option::is_some), load_error.get()) {
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
                (true, _) => content.into_any(),
            }}
        </main>
    }
}
