use femfit_shared::AnswerValue;
use femfit_shared::input::NumberField;
use leptos::prelude::*;

#[component]
pub fn NumberInput(
    placeholder: Option<String>,
    label: Option<String>,
    initial: Option<AnswerValue>,
    on_change: Callback<Option<AnswerValue>>,
) -> impl IntoView {
    let field = RwSignal::new(NumberField::from_answer(initial.as_ref()));
    let initial_text = field.with_untracked(|f| f.value().map(|n| n.to_string()).unwrap_or_default());

    let on_input = move |ev| {
        let raw = event_target_value(&ev);
        let answer = field.try_update(|f| f.input(&raw)).flatten();
        on_change.run(answer);
    };

    view! {
        <label class="form-control w-full">
            <div class="join w-full">
                <input
                    type="number"
                    inputmode="decimal"
                    class="input input-bordered join-item w-full"
                    placeholder=placeholder.unwrap_or_default()
                    prop:value=initial_text
                    on:input=on_input
                />
                {label.map(|label| view! {
                    <span class="btn btn-ghost join-item no-animation">{label}</span>
                })}
            </div>
        </label>
    }
}
