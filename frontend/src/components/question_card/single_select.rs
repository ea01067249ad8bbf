use femfit_shared::input::SingleSelectField;
use femfit_shared::{AnswerValue, QuestionOption};
use leptos::prelude::*;

/// 单选按钮组；再次点击已选项即取消选择
#[component]
pub fn SingleSelect(
    options: Vec<QuestionOption>,
    initial: Option<AnswerValue>,
    on_change: Callback<Option<AnswerValue>>,
) -> impl IntoView {
    let field = RwSignal::new(SingleSelectField::from_answer(initial.as_ref()));

    let buttons = options
        .into_iter()
        .map(|option| {
            let is_selected = {
                let value = option.value.clone();
                move || field.with(|f| f.is_selected(&value))
            };
            let button_class = {
                let is_selected = is_selected.clone();
                move || if is_selected() { "btn btn-primary w-full" } else { "btn btn-outline w-full" }
            };
            let title = option.title.clone();
            let help = option.help_text.clone();
            let on_click = move |_| {
                let answer = field.try_update(|f| f.toggle(&option)).flatten();
                on_change.run(answer);
            };

            view! {
                <div class="flex flex-col gap-1">
                    <button
                        type="button"
                        class=button_class
                        on:click=on_click
                    >
                        {title}
                    </button>
                    {help.map(|text| view! {
                        <Show when=is_selected>
                            <p class="text-xs text-base-content/70 px-2">{text.clone()}</p>
                        </Show>
                    })}
                </div>
            }
        })
        .collect_view();

    view! { <div class="grid gap-2">{buttons}</div> }
}
