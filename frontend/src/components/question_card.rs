//! 问卷题目卡片
//!
//! 按 `QuestionKind` 分派到对应输入控件。控件内部持有自己的输入状态，
//! 每次变化通过 `on_change` 发出当前答案（`None` 表示无答案）。

mod bmi_input;
mod date_input;
mod multi_select;
mod number_input;
mod single_select;

use bmi_input::BmiInput;
use date_input::DateInput;
use femfit_shared::{AnswerValue, Question, QuestionKind};
use leptos::prelude::*;
use multi_select::MultiSelect;
use number_input::NumberInput;
use single_select::SingleSelect;

#[component]
pub fn QuestionCard(
    question: Question,
    /// 已有答案，用于回填控件
    initial: Option<AnswerValue>,
    on_change: Callback<Option<AnswerValue>>,
) -> impl IntoView {
    let Question {
        prompt,
        help_text,
        kind,
        ..
    } = question;

    let body = match kind {
        QuestionKind::NumberInput { placeholder, label } => view! {
            <NumberInput placeholder=placeholder label=label initial=initial on_change=on_change />
        }
        .into_any(),
        QuestionKind::Date { placeholder } => view! {
            <DateInput placeholder=placeholder initial=initial on_change=on_change />
        }
        .into_any(),
        QuestionKind::SingleSelect { options } => view! {
            <SingleSelect options=options initial=initial on_change=on_change />
        }
        .into_any(),
        QuestionKind::MultiSelect {
            options,
            placeholder,
        } => view! {
            <MultiSelect options=options placeholder=placeholder initial=initial on_change=on_change />
        }
        .into_any(),
        QuestionKind::Bmi { height, weight } => view! {
            <BmiInput height=height weight=weight initial=initial on_change=on_change />
        }
        .into_any(),
    };

    view! {
        <div class="card w-full max-w-xl bg-base-100 shadow-xl">
            <div class="card-body gap-4">
                <h2 class="card-title text-primary">{prompt}</h2>
                {help_text.map(|text| view! { <p class="text-sm text-base-content/70">{text}</p> })}
                {body}
            </div>
        </div>
    }
}
