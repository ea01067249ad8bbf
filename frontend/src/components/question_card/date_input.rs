use femfit_shared::input::DateField;
use femfit_shared::{AnswerValue, today};
use leptos::prelude::*;

/// 单日期选择；浏览器控件的 `max` 限制为今天，状态机再兜底一次
#[component]
pub fn DateInput(
    placeholder: Option<String>,
    initial: Option<AnswerValue>,
    on_change: Callback<Option<AnswerValue>>,
) -> impl IntoView {
    let field = RwSignal::new(DateField::from_answer(initial.as_ref()));
    let max = today().to_input_value();
    let initial_text =
        field.with_untracked(|f| f.selected().map(|d| d.to_input_value()).unwrap_or_default());

    let on_input = move |ev| {
        let raw = event_target_value(&ev);
        let answer = field.try_update(|f| f.input(&raw, today())).flatten();
        on_change.run(answer);
    };

    let picked = move || {
        field.with(|f| {
            f.selected()
                .map(|d| d.long_display())
                .or_else(|| placeholder.clone())
                .unwrap_or_else(|| "Pick a date".to_string())
        })
    };

    view! {
        <div class="flex flex-col gap-2">
            <input
                type="date"
                class="input input-bordered w-full"
                max=max
                prop:value=initial_text
                on:input=on_input
            />
            <p class="text-sm text-base-content/70">{picked}</p>
        </div>
    }
}
