//! 页头与底部导航

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use chrono::Datelike;
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    view! {
        <div class="navbar fixed top-0 z-30 bg-primary/80 text-primary-content backdrop-blur-sm">
            <div class="flex-1">
                <a
                    class="btn btn-ghost text-2xl font-bold"
                    on:click=move |_| router.navigate(AppRoute::Home.to_path())
                >
                    "FemFit"
                </a>
            </div>
            <div class="flex-none dropdown dropdown-end">
                <div tabindex="0" role="button" class="btn btn-ghost btn-circle">
                    <UserIcon attr:class="h-6 w-6" />
                </div>
                <ul tabindex="0" class="menu dropdown-content z-40 mt-3 w-48 rounded-box bg-base-100 p-2 text-base-content shadow">
                    <li>
                        <a on:click=move |_| router.navigate(AppRoute::UpdateProfile.to_path())>
                            <UserIcon attr:class="h-4 w-4" />
                            "Profile"
                        </a>
                    </li>
                    <li>
                        <a on:click=move |_| auth.sign_out()>
                            <LogOut attr:class="h-4 w-4" />
                            "Logout"
                        </a>
                    </li>
                </ul>
            </div>
        </div>
    }
}

/// 底部导航项
const NAV_ITEMS: [(AppRoute, &str); 5] = [
    (AppRoute::Home, "Home"),
    (AppRoute::Symptoms, "Log"),
    (AppRoute::Workout, "Workout"),
    (AppRoute::Nutrition, "Nutrition"),
    (AppRoute::InfoHub, "Info"),
];

#[component]
pub fn Footer() -> impl IntoView {
    let router = use_router();
    let current = router.current_route();

    let year = femfit_shared::today().naive().year();

    let items = NAV_ITEMS
        .into_iter()
        .map(|(route, label)| {
            let class = move || {
                if current.get() == route {
                    "active text-primary"
                } else {
                    "text-base-content/60"
                }
            };
            let icon = match route {
                AppRoute::Home => view! { <HomeIcon attr:class="h-6 w-6" /> }.into_any(),
                AppRoute::Symptoms => view! { <Heart attr:class="h-6 w-6" /> }.into_any(),
                AppRoute::Workout => view! { <Dumbbell attr:class="h-6 w-6" /> }.into_any(),
                AppRoute::Nutrition => view! { <ClipboardIcon attr:class="h-6 w-6" /> }.into_any(),
                _ => view! { <BookOpen attr:class="h-6 w-6" /> }.into_any(),
            };
            view! {
                <button class=class on:click=move |_| router.navigate(route.to_path())>
                    {icon}
                    <span class="btm-nav-label text-[10px]">{label}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <footer>
            <div class="pb-20 pt-6 text-center text-sm text-base-content/70">
                <p>"© " {year} " FemFit. All rights reserved."</p>
                <p class="mt-1">"Built by Women for Women"</p>
            </div>
            <div class="btm-nav z-30 border-t border-base-300 bg-base-100">{items}</div>
        </footer>
    }
}
