//! 输入控件状态模块
//!
//! 每种题型一个纯状态机，UI 层只负责把事件转发进来、把 `answer()` 发出去。
//! 所有非法输入都归一化为"无答案"（`None`），不会抛错。

use crate::answer::AnswerValue;
use crate::cycle::BmiCategory;
use crate::date::IsoDate;
use crate::question::{OPTION_NONE, OPTION_OTHER, QuestionOption};

/// 解析数值输入；非数字、NaN、无穷都返回 None
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 四舍五入到一位小数
pub fn round1(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

// =========================================================
// numberInput
// =========================================================

/// 自由数值输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberField {
    value: Option<f64>,
}

impl NumberField {
    pub fn from_answer(answer: Option<&AnswerValue>) -> Self {
        Self {
            value: answer.and_then(AnswerValue::as_number),
        }
    }

    /// 输入变化；返回应发出的答案
    pub fn input(&mut self, raw: &str) -> Option<AnswerValue> {
        self.value = parse_number(raw);
        self.answer()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn answer(&self) -> Option<AnswerValue> {
        self.value.and_then(AnswerValue::number)
    }
}

// =========================================================
// date
// =========================================================

/// 单日期选择
///
/// 晚于"今天"的日期不可选。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateField {
    selected: Option<IsoDate>,
}

impl DateField {
    pub fn from_answer(answer: Option<&AnswerValue>) -> Self {
        Self {
            selected: answer.and_then(AnswerValue::as_date),
        }
    }

    /// 日期是否可选
    pub fn is_selectable(date: IsoDate, today: IsoDate) -> bool {
        !date.is_after(today)
    }

    /// 选择日期；未来日期被忽略，保留原选择
    pub fn pick(&mut self, date: IsoDate, today: IsoDate) -> Option<AnswerValue> {
        if Self::is_selectable(date, today) {
            self.selected = Some(date);
        }
        self.answer()
    }

    /// 来自 `<input type="date">` 的原始值；空串表示清除
    pub fn input(&mut self, raw: &str, today: IsoDate) -> Option<AnswerValue> {
        match IsoDate::parse(raw) {
            Some(date) => self.pick(date, today),
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) -> Option<AnswerValue> {
        self.selected = None;
        None
    }

    pub fn selected(&self) -> Option<IsoDate> {
        self.selected
    }

    pub fn answer(&self) -> Option<AnswerValue> {
        self.selected.map(AnswerValue::Date)
    }
}

// =========================================================
// singleSelect
// =========================================================

/// 单选（再次点击已选项即取消）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleSelectField {
    selected: Option<String>,
}

impl SingleSelectField {
    pub fn from_answer(answer: Option<&AnswerValue>) -> Self {
        let selected = match answer {
            Some(AnswerValue::Choice(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        };
        Self { selected }
    }

    /// 点击某个选项
    pub fn toggle(&mut self, option: &QuestionOption) -> Option<AnswerValue> {
        if option.value.is_empty() {
            // 目录数据有误：空 value 不能成为答案
            self.selected = None;
        } else if self.selected.as_deref() == Some(option.value.as_str()) {
            self.selected = None;
        } else {
            self.selected = Some(option.value.clone());
        }
        self.answer()
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.as_deref() == Some(value)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn answer(&self) -> Option<AnswerValue> {
        self.selected.clone().map(AnswerValue::Choice)
    }
}

// =========================================================
// multiSelect
// =========================================================

/// 把多选答案拆成已知选项和 "other" 自由文本
///
/// 自由文本总是追加在最后一个位置：优先取第一个未知标记；
/// 所有标记都是已知选项时（文本恰好等于某个选项值），
/// 只要 `"other"` 出现在最后一个标记之前，最后一个标记就是自由文本。
pub fn split_other_text(
    tokens: &[String],
    is_option: impl Fn(&str) -> bool,
) -> (Vec<String>, Option<String>) {
    let known = |list: &[String]| -> Vec<String> {
        list.iter().filter(|t| is_option(t.as_str())).cloned().collect()
    };
    if let Some(text) = tokens.iter().find(|t| !t.is_empty() && !is_option(t.as_str())) {
        return (known(tokens), Some(text.clone()));
    }
    match tokens.split_last() {
        Some((last, rest)) if rest.iter().any(|t| t == OPTION_OTHER) => {
            (known(rest), Some(last.clone()))
        }
        _ => (known(tokens), None),
    }
}

/// 多选，带 `"none"` / `"other"` 哨兵语义
///
/// - 选中 `"none"` 清空其他选项，结果恰为 `["none"]`
/// - `"none"` 生效时选中其他选项会移除 `"none"`
/// - 选中 `"other"` 显示自由文本，文本作为字面量追加到答案末尾
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiSelectField {
    selected: Vec<String>,
    other_text: Option<String>,
}

impl MultiSelectField {
    /// 从已有答案恢复：已知选项进入选择列表，自由文本见 [`split_other_text`]
    pub fn from_answer(options: &[QuestionOption], answer: Option<&AnswerValue>) -> Self {
        let tokens = answer.map(AnswerValue::tokens).unwrap_or(&[]);
        let is_option = |t: &str| options.iter().any(|o| !o.value.is_empty() && o.value == t);

        let (selected, other_text) = split_other_text(tokens, is_option);
        let other_text = other_text.filter(|_| selected.iter().any(|s| s == OPTION_OTHER));

        Self {
            selected,
            other_text,
        }
    }

    /// 点击某个选项
    pub fn toggle(&mut self, option: &QuestionOption) -> Option<AnswerValue> {
        let value = option.value.as_str();
        if value.is_empty() {
            return self.answer();
        }

        if value == OPTION_NONE {
            let was_active = self.is_selected(OPTION_NONE);
            self.selected.clear();
            self.other_text = None;
            if !was_active {
                self.selected.push(OPTION_NONE.to_string());
            }
            return self.answer();
        }

        self.selected.retain(|s| s != OPTION_NONE);
        if let Some(pos) = self.selected.iter().position(|s| s == value) {
            self.selected.remove(pos);
            if value == OPTION_OTHER {
                self.other_text = None;
            }
        } else {
            self.selected.push(value.to_string());
        }
        self.answer()
    }

    /// 编辑"其他"自由文本（替换之前的文本）
    pub fn set_other_text(&mut self, text: &str) -> Option<AnswerValue> {
        if self.shows_other_input() {
            self.other_text = Some(text.to_string()).filter(|t| !t.trim().is_empty());
        }
        self.answer()
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|s| s == value)
    }

    /// 是否显示自由文本输入框
    pub fn shows_other_input(&self) -> bool {
        self.is_selected(OPTION_OTHER)
    }

    pub fn other_text(&self) -> Option<&str> {
        self.other_text.as_deref()
    }

    /// 当前答案
    ///
    /// 选中了 `"other"` 但自由文本仍为空时返回 None，该阶段保持未完成。
    pub fn answer(&self) -> Option<AnswerValue> {
        if self.selected.is_empty() {
            return None;
        }
        let mut tokens = self.selected.clone();
        if self.shows_other_input() {
            tokens.push(self.other_text.clone()?);
        }
        Some(AnswerValue::Choices(tokens))
    }
}

// =========================================================
// bmi
// =========================================================

/// 身高 (cm) + 体重 (kg)，两者都有效时派生 BMI
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BmiField {
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
}

impl BmiField {
    pub fn new(height_cm: Option<f64>, weight_kg: Option<f64>) -> Self {
        Self {
            height_cm: height_cm.filter(|h| h.is_finite()),
            weight_kg: weight_kg.filter(|w| w.is_finite()),
        }
    }

    pub fn input_height(&mut self, raw: &str) -> Option<AnswerValue> {
        self.height_cm = parse_number(raw);
        self.answer()
    }

    pub fn input_weight(&mut self, raw: &str) -> Option<AnswerValue> {
        self.weight_kg = parse_number(raw);
        self.answer()
    }

    pub fn height_cm(&self) -> Option<f64> {
        self.height_cm
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    /// 未取整的 BMI；任一子字段缺失或非正时为 None
    fn raw_bmi(&self) -> Option<f64> {
        let height = self.height_cm.filter(|h| *h > 0.0)?;
        let weight = self.weight_kg.filter(|w| *w > 0.0)?;
        // weight / (height/100)^2，整数输入下保持精确
        Some(weight * 10_000.0 / (height * height)).filter(|b| b.is_finite())
    }

    /// 派生 BMI（一位小数）
    pub fn bmi(&self) -> Option<f64> {
        self.raw_bmi().map(round1)
    }

    /// 分类按未取整的值判定
    pub fn category(&self) -> Option<BmiCategory> {
        self.raw_bmi().map(BmiCategory::from_bmi)
    }

    pub fn answer(&self) -> Option<AnswerValue> {
        self.bmi().and_then(AnswerValue::number)
    }
}
