use femfit_shared::input::BmiField;
use femfit_shared::{AnswerValue, QuestionOption};
use leptos::prelude::*;

/// 身高 + 体重两个子字段，派生 BMI 与分类
///
/// 已有答案只保存 BMI 数值，因此子字段总是从空白开始。
#[component]
pub fn BmiInput(
    height: Option<QuestionOption>,
    weight: Option<QuestionOption>,
    initial: Option<AnswerValue>,
    on_change: Callback<Option<AnswerValue>>,
) -> impl IntoView {
    let field = RwSignal::new(BmiField::default());
    let previous = initial.as_ref().and_then(AnswerValue::as_number);

    let height_label = height
        .map(|o| o.title)
        .unwrap_or_else(|| "Height (cm)".to_string());
    let weight_label = weight
        .map(|o| o.title)
        .unwrap_or_else(|| "Weight (kg)".to_string());

    let on_height = move |ev| {
        let raw = event_target_value(&ev);
        let answer = field.try_update(|f| f.input_height(&raw)).flatten();
        on_change.run(answer);
    };
    let on_weight = move |ev| {
        let raw = event_target_value(&ev);
        let answer = field.try_update(|f| f.input_weight(&raw)).flatten();
        on_change.run(answer);
    };

    let result = move || field.with(|f| f.bmi().zip(f.category()));

    view! {
        <div class="flex flex-col gap-3">
            <label class="form-control w-full">
                <div class="label"><span class="label-text">{height_label}</span></div>
                <input type="number" inputmode="decimal" class="input input-bordered w-full" on:input=on_height />
            </label>
            <label class="form-control w-full">
                <div class="label"><span class="label-text">{weight_label}</span></div>
                <input type="number" inputmode="decimal" class="input input-bordered w-full" on:input=on_weight />
            </label>
            {move || match result() {
                Some((bmi, category)) => view! {
                    <div class="alert">
                        <span>"Your BMI: " <strong>{format!("{bmi:.1}")}</strong></span>
                        <span class="badge badge-primary">{category.label()}</span>
                    </div>
                }
                .into_any(),
                None => previous
                    .map(|bmi| view! {
                        <p class="text-sm text-base-content/70">{format!("Current BMI: {bmi:.1}")}</p>
                    })
                    .into_any(),
            }}
        </div>
    }
}
