//! 内容页：训练、饮食、症状记录、资料中心、404

use crate::components::icons::*;
use crate::config;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::scoped_timeout;
use leptos::leptos_dom::helpers::set_timeout;
use leptos::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

/// 选择症状后自动收起的延迟
const COLLAPSE_DELAY: Duration = Duration::from_millis(300);

// ============================================================================
// 即将上线
// ============================================================================

#[component]
fn ComingSoon(
    title: &'static str,
    subtitle: &'static str,
    message: &'static str,
    features: [&'static str; 3],
) -> impl IntoView {
    let list = features
        .into_iter()
        .map(|feature| view! {
            <li class="flex items-start gap-2">
                <CheckCircle attr:class="mt-0.5 h-5 w-5 shrink-0 text-primary" />
                <span>{feature}</span>
            </li>
        })
        .collect_view();

    view! {
        <div class="mx-auto flex max-w-2xl flex-col gap-6 px-4 pb-24 pt-20">
            <div>
                <h1 class="text-3xl font-bold text-primary">{title}</h1>
                <p class="text-base-content/70">{subtitle}</p>
            </div>
            <section class="card bg-base-100 shadow-lg">
                <div class="card-body gap-4">
                    <span class="badge badge-secondary">"Coming Soon"</span>
                    <p>{message}</p>
                    <ul class="space-y-3">{list}</ul>
                </div>
            </section>
        </div>
    }
}

#[component]
pub fn WorkoutPage() -> impl IntoView {
    view! {
        <ComingSoon
            title="Workouts"
            subtitle="Tailored to your cycle phase"
            message="Workout content will be available in the next update. When it launches you will be able to:"
            features=[
                "Access workouts specifically designed for each phase of your cycle",
                "Follow along with guided video routines led by women trainers",
                "Adjust intensity levels based on your energy and how you're feeling",
            ]
        />
    }
}

#[component]
pub fn NutritionPage() -> impl IntoView {
    view! {
        <ComingSoon
            title="Nutrition"
            subtitle="Food recommendations for your cycle"
            message="Nutrition features will be available in the next update. When they launch you will be able to:"
            features=[
                "Personalized meal plans tailored to each phase of your cycle",
                "Recipes rich in the nutrients your body needs right now",
                "Tips for easing cravings and bloating through food",
            ]
        />
    }
}

// ============================================================================
// 症状记录（仅本地保存）
// ============================================================================

struct SymptomOption {
    label: &'static str,
    emoji: &'static str,
}

struct SymptomQuestion {
    id: &'static str,
    question: &'static str,
    emoji: &'static str,
    options: [SymptomOption; 4],
}

const fn opt(label: &'static str, emoji: &'static str) -> SymptomOption {
    SymptomOption { label, emoji }
}

static SYMPTOM_QUESTIONS: [SymptomQuestion; 5] = [
    SymptomQuestion {
        id: "mood",
        question: "How's your mood today?",
        emoji: "😊",
        options: [opt("Energetic", "😄"), opt("Balanced", "😊"), opt("Tired", "😴"), opt("Stressed", "😓")],
    },
    SymptomQuestion {
        id: "energy",
        question: "What's your energy level?",
        emoji: "⚡",
        options: [opt("High", "⚡"), opt("Medium", "✨"), opt("Low", "🔋"), opt("Exhausted", "🛌")],
    },
    SymptomQuestion {
        id: "sleep",
        question: "How was your sleep last night?",
        emoji: "😴",
        options: [opt("Excellent", "💤"), opt("Good", "😴"), opt("Fair", "😐"), opt("Poor", "😫")],
    },
    SymptomQuestion {
        id: "pain",
        question: "Are you experiencing any pain?",
        emoji: "🩹",
        options: [opt("None", "👍"), opt("Mild", "🤏"), opt("Moderate", "😣"), opt("Severe", "😖")],
    },
    SymptomQuestion {
        id: "bloating",
        question: "How's your bloating today?",
        emoji: "🫃",
        options: [opt("None", "👌"), opt("Mild", "🤏"), opt("Moderate", "😔"), opt("Severe", "😩")],
    },
];

const OPTION_COLORS: [&str; 4] = ["bg-purple-100", "bg-blue-100", "bg-yellow-100", "bg-red-100"];

#[component]
pub fn SymptomsPage() -> impl IntoView {
    let answers = RwSignal::new(BTreeMap::<&'static str, &'static str>::new());
    let expanded = RwSignal::new(Vec::<&'static str>::new());
    let saved = RwSignal::new(false);

    let toggle = move |id: &'static str| {
        expanded.update(|open| {
            if let Some(pos) = open.iter().position(|q| *q == id) {
                open.remove(pos);
            } else {
                open.push(id);
            }
        });
    };

    let select = move |id: &'static str, label: &'static str| {
        answers.update(|map| {
            map.insert(id, label);
        });
        saved.set(false);
        // 页面离开后 signal 已释放，update 为空操作
        set_timeout(
            move || expanded.update(|open| open.retain(|q| *q != id)),
            COLLAPSE_DELAY,
        );
    };

    let cards = SYMPTOM_QUESTIONS
        .iter()
        .map(|q| {
            let id = q.id;
            let is_open = move || expanded.with(|open| open.contains(&id));
            let chosen = move || answers.with(|map| map.get(id).copied());
            let options = q
                .options
                .iter()
                .zip(OPTION_COLORS)
                .map(|(option, color)| {
                    let label = option.label;
                    let class = move || {
                        let ring = if chosen() == Some(label) { "ring-2 ring-primary" } else { "" };
                        format!("btn h-auto flex-col gap-1 py-3 {color} {ring}")
                    };
                    view! {
                        <button class=class on:click=move |_| select(id, label)>
                            <span class="text-2xl">{option.emoji}</span>
                            <span class="text-sm">{label}</span>
                        </button>
                    }
                })
                .collect_view();

            view! {
                <div class="rounded-lg border border-base-300">
                    <button class="flex w-full items-center justify-between p-4" on:click=move |_| toggle(id)>
                        <span class="flex items-center gap-2 font-medium">
                            <span class="text-xl">{q.emoji}</span>
                            {q.question}
                        </span>
                        <span class="badge badge-ghost">{move || chosen().unwrap_or("Not logged")}</span>
                    </button>
                    <div class="grid grid-cols-2 gap-3 px-4 pb-4 sm:grid-cols-4" class:hidden=move || !is_open()>
                        {options}
                    </div>
                </div>
            }
        })
        .collect_view();

    let on_save = move |_| {
        let logged = answers.with(|map| map.len());
        log::info!("symptom log kept locally ({logged} answers)");
        saved.set(true);
    };

    view! {
        <div class="mx-auto flex max-w-2xl flex-col gap-6 px-4 pb-24 pt-20">
            <section class="card overflow-hidden bg-base-100 shadow-lg">
                <div class="bg-primary/10 p-6">
                    <h2 class="text-2xl font-bold text-primary">"Symptom Tracker"</h2>
                    <p class="mt-2 text-primary/80">"Track how you feel throughout your cycle"</p>
                </div>
                <div class="card-body gap-3">
                    {cards}
                    <Show when=move || saved.get()>
                        <div class="alert alert-success">"Symptoms saved for today."</div>
                    </Show>
                    <div class="mt-4 flex justify-end gap-2">
                        <button
                            class="btn btn-outline"
                            on:click=move |_| {
                                answers.set(BTreeMap::new());
                                saved.set(false);
                            }
                        >
                            "Cancel"
                        </button>
                        <button class="btn btn-primary" on:click=on_save>"Save Symptoms"</button>
                    </div>
                </div>
            </section>
        </div>
    }
}

// ============================================================================
// 资料中心
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleCategory {
    All,
    Fitness,
    Nutrition,
    CycleInsights,
    Wellness,
}

impl ArticleCategory {
    pub const ALL: [ArticleCategory; 5] = [
        ArticleCategory::All,
        ArticleCategory::Fitness,
        ArticleCategory::Nutrition,
        ArticleCategory::CycleInsights,
        ArticleCategory::Wellness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ArticleCategory::All => "All",
            ArticleCategory::Fitness => "Fitness",
            ArticleCategory::Nutrition => "Nutrition",
            ArticleCategory::CycleInsights => "Cycle Insights",
            ArticleCategory::Wellness => "Wellness",
        }
    }
}

#[derive(Debug)]
pub struct Article {
    pub title: &'static str,
    pub description: &'static str,
    pub category: ArticleCategory,
    pub read_minutes: u8,
}

pub static ARTICLES: [Article; 6] = [
    Article {
        title: "How Workouts Affect Your Mood",
        description: "Discover the connection between exercise and emotional wellbeing throughout your cycle.",
        category: ArticleCategory::Fitness,
        read_minutes: 4,
    },
    Article {
        title: "Nutrition Guide: Eating for Your Cycle",
        description: "Learn which foods can help balance hormones and reduce symptoms during different phases.",
        category: ArticleCategory::Nutrition,
        read_minutes: 6,
    },
    Article {
        title: "Understanding Your Menstrual Cycle",
        description: "A comprehensive guide to the four phases and how they affect your body and mind.",
        category: ArticleCategory::CycleInsights,
        read_minutes: 7,
    },
    Article {
        title: "Meditation Techniques for PMS",
        description: "Simple meditation practices to reduce stress and anxiety before your period.",
        category: ArticleCategory::Wellness,
        read_minutes: 5,
    },
    Article {
        title: "Strength Training During Your Cycle",
        description: "How to adjust your strength workouts for optimal results throughout your cycle.",
        category: ArticleCategory::Fitness,
        read_minutes: 5,
    },
    Article {
        title: "Anti-Inflammatory Foods for Period Pain",
        description: "Dietary choices that can help reduce inflammation and ease menstrual cramps.",
        category: ArticleCategory::Nutrition,
        read_minutes: 4,
    },
];

/// 按分类筛选文章；`All` 返回全部
pub fn filter_articles(category: ArticleCategory) -> Vec<&'static Article> {
    ARTICLES
        .iter()
        .filter(|a| category == ArticleCategory::All || a.category == category)
        .collect()
}

#[component]
pub fn InfoHubPage() -> impl IntoView {
    let category = RwSignal::new(ArticleCategory::All);
    let loaded = RwSignal::new(false);

    scoped_timeout(config::ui_delay(), move || loaded.set(true));

    let tabs = move || {
        ArticleCategory::ALL
            .into_iter()
            .map(|c| view! {
            <a
                role="tab"
                class="tab whitespace-nowrap"
                class:tab-active=move || category.get() == c
                on:click=move |_| category.set(c)
            >
                {c.label()}
            </a>
            })
            .collect_view()
    };

    let articles = move || {
        filter_articles(category.get())
            .into_iter()
            .map(|article| view! {
                <article class="card bg-base-100 shadow-md">
                    <div class="card-body gap-2">
                        <span class="badge badge-outline badge-primary">{article.category.label()}</span>
                        <h3 class="card-title text-lg">{article.title}</h3>
                        <p class="text-sm text-base-content/70">{article.description}</p>
                        <div class="card-actions items-center justify-between">
                            <span class="text-xs text-base-content/60">
                                {format!("{} min read", article.read_minutes)}
                            </span>
                            <span class="flex items-center gap-1 text-sm text-primary">
                                "Read more" <ArrowRight attr:class="h-4 w-4" />
                            </span>
                        </div>
                    </div>
                </article>
            })
            .collect_view()
    };

    view! {
        <div class="mx-auto flex max-w-3xl flex-col gap-6 px-4 pb-24 pt-20">
            <div>
                <h1 class="flex items-center gap-2 text-3xl font-bold text-primary">
                    <BookOpen attr:class="h-7 w-7" /> "Info Hub"
                </h1>
                <p class="text-base-content/70">"Articles and resources for women's health"</p>
            </div>
            <Show
                when=move || loaded.get()
                fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <Loader attr:class="h-8 w-8 animate-spin text-primary" />
                    </div>
                }
            >
                <div role="tablist" class="tabs tabs-boxed overflow-x-auto">{tabs}</div>
                <div class="grid gap-4 sm:grid-cols-2">{articles}</div>
            </Show>
        </div>
    }
}

// ============================================================================
// 404
// ============================================================================

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let router = use_router();
    view! {
        <div class="flex min-h-screen items-center justify-center bg-base-200 px-4">
            <div class="flex flex-col items-center gap-4 text-center">
                <h1 class="text-7xl font-bold text-primary">"404"</h1>
                <h2 class="text-2xl font-semibold">"Page Not Found"</h2>
                <p class="text-base-content/70">"The page you are looking for doesn't exist or has been moved."</p>
                <button class="btn btn-primary" on:click=move |_| router.navigate(AppRoute::Home.to_path())>
                    <HomeIcon attr:class="h-5 w-5" /> "Back to Home"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_all_returns_every_article() {
        assert_eq!(filter_articles(ArticleCategory::All).len(), ARTICLES.len());
    }

    #[test]
    fn test_filter_by_category() {
        let fitness = filter_articles(ArticleCategory::Fitness);
        assert_eq!(fitness.len(), 2);
        assert!(fitness.iter().all(|a| a.category == ArticleCategory::Fitness));

        let insights = filter_articles(ArticleCategory::CycleInsights);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Understanding Your Menstrual Cycle");
    }

    #[test]
    fn test_every_category_has_articles() {
        for category in ArticleCategory::ALL {
            assert!(!filter_articles(category).is_empty(), "{:?}", category);
        }
    }
}
