use femfit_shared::input::MultiSelectField;
use femfit_shared::{AnswerValue, QuestionOption};
use leptos::prelude::*;

/// 多选复选框组，带"无"与"其他"选项
#[component]
pub fn MultiSelect(
    options: Vec<QuestionOption>,
    placeholder: Option<String>,
    initial: Option<AnswerValue>,
    on_change: Callback<Option<AnswerValue>>,
) -> impl IntoView {
    let field = RwSignal::new(MultiSelectField::from_answer(&options, initial.as_ref()));
    let initial_other = field.with_untracked(|f| f.other_text().unwrap_or_default().to_string());

    let checkboxes = options
        .into_iter()
        .map(|option| {
            let is_selected = {
                let value = option.value.clone();
                move || field.with(|f| f.is_selected(&value))
            };
            let title = option.title.clone();
            let on_toggle = move |_| {
                let answer = field.try_update(|f| f.toggle(&option)).flatten();
                on_change.run(answer);
            };

            view! {
                <label class="label cursor-pointer justify-start gap-3 rounded-lg border border-base-300 px-3">
                    <input
                        type="checkbox"
                        class="checkbox checkbox-primary"
                        prop:checked=is_selected
                        on:change=on_toggle
                    />
                    <span class="label-text">{title}</span>
                </label>
            }
        })
        .collect_view();

    let on_other_input = move |ev| {
        let raw = event_target_value(&ev);
        let answer = field.try_update(|f| f.set_other_text(&raw)).flatten();
        on_change.run(answer);
    };

    view! {
        <div class="flex flex-col gap-2">
            {checkboxes}
            <Show when=move || field.with(|f| f.shows_other_input())>
                <input
                    type="text"
                    class="input input-bordered w-full"
                    placeholder=placeholder.clone().unwrap_or_else(|| "Please specify".to_string())
                    prop:value=initial_other.clone()
                    on:input=on_other_input
                />
            </Show>
        </div>
    }
}
