//! 问卷引擎
//!
//! `QuestionnaireSession` 独占一次问卷会话的 `AnswerMap`，
//! 负责阶段导航和完成度判定；提交时按值交还答案。

use crate::answer::{AnswerMap, AnswerValue, is_answered};
use crate::question::{Question, QuestionCatalog, QuestionDefinition, RenderType};
use serde_json::Value;
use thiserror::Error;

/// 写入答案时的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("no question with key `{0}` in the catalog")]
    UnknownQuestion(String),
    #[error("answer for `{key}` does not fit a {expected:?} question")]
    ShapeMismatch { key: String, expected: RenderType },
}

// =========================================================
// 完成度判定
// =========================================================

/// 一组问题是否都已作答；空集合视为完成
fn all_answered<'a>(questions: impl IntoIterator<Item = &'a Question>, answers: &AnswerMap) -> bool {
    questions
        .into_iter()
        .all(|q| is_answered(answers.get(&q.key)))
}

/// 基于原始定义的阶段完成判定
///
/// 校验不通过的定义不会被渲染，因此也不参与判定。
pub fn is_stage_complete(stage: u32, answers: &AnswerMap, defs: &[QuestionDefinition]) -> bool {
    defs.iter()
        .filter(|def| def.stage == stage)
        .filter_map(|def| Question::try_from(def.clone()).ok())
        .all(|q| is_answered(answers.get(&q.key)))
}

/// 提交用的传输格式
///
/// 恒等变换：日期为 ISO-8601 字符串，数值为 JSON 数字，多选为字符串数组。
pub fn serialize_for_submission(answers: &AnswerMap) -> Value {
    answers.to_json()
}

// =========================================================
// 会话
// =========================================================

/// 一次问卷会话
///
/// 步骤从 1 开始，对应目录中第 N 个阶段；`step == total_steps + 1` 表示已完成。
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionnaireSession {
    catalog: QuestionCatalog,
    stages: Vec<u32>,
    answers: AnswerMap,
    step: usize,
}

impl QuestionnaireSession {
    /// 全新会话，从第 1 步开始
    pub fn new(catalog: QuestionCatalog) -> Self {
        let stages = catalog.stage_numbers();
        Self {
            catalog,
            stages,
            answers: AnswerMap::new(),
            step: 1,
        }
    }

    /// 已完成引导的用户：预填已有答案并直接进入完成页
    pub fn resume(catalog: QuestionCatalog) -> Self {
        let answers = catalog
            .questions()
            .filter_map(|q| {
                q.prior_answer
                    .clone()
                    .filter(AnswerValue::is_filled)
                    .map(|a| (q.key.clone(), a))
            })
            .collect::<AnswerMap>();
        let mut session = Self::new(catalog);
        session.answers = answers;
        session.step = session.total_steps() + 1;
        session
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// 写入或清除一个答案
    pub fn set_answer(
        &mut self,
        key: &str,
        answer: Option<AnswerValue>,
    ) -> Result<(), AnswerError> {
        let question = self
            .catalog
            .get(key)
            .ok_or_else(|| AnswerError::UnknownQuestion(key.to_string()))?;

        if let Some(value) = &answer {
            if !value.fits(question.render_type()) {
                log::warn!("rejected answer for `{key}`: {value:?}");
                return Err(AnswerError::ShapeMismatch {
                    key: key.to_string(),
                    expected: question.render_type(),
                });
            }
        }

        self.answers.set(key, answer);
        Ok(())
    }

    pub fn answer(&self, key: &str) -> Option<&AnswerValue> {
        self.answers.get(key)
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerMap {
        self.answers
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.stages.len()
    }

    pub fn is_finished(&self) -> bool {
        self.step > self.total_steps()
    }

    /// 当前阶段编号；完成后为 None
    pub fn current_stage(&self) -> Option<u32> {
        self.stages.get(self.step.checked_sub(1)?).copied()
    }

    /// 当前阶段的问题（按优先级排序）
    pub fn current_questions(&self) -> &[Question] {
        match self.current_stage() {
            Some(stage) => self.catalog.stage(stage),
            None => &[],
        }
    }

    pub fn is_stage_complete(&self, stage: u32) -> bool {
        all_answered(self.catalog.stage(stage), &self.answers)
    }

    /// "继续"按钮是否可用
    pub fn can_advance(&self) -> bool {
        self.current_stage()
            .is_some_and(|stage| self.is_stage_complete(stage))
    }

    /// 进入下一步；当前阶段未完成时不动
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.step += 1;
        true
    }

    /// 进度百分比：min((step - 1) * 100 / total, 100)
    pub fn completion_percentage(&self) -> u32 {
        let total = self.total_steps();
        if total == 0 {
            return 100;
        }
        let done = self.step.saturating_sub(1) * 100 / total;
        done.min(100) as u32
    }
}

#[cfg(test)]
mod tests;
