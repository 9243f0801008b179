//! Assessment, question, and submission DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel answer recorded for unanswered multiple-choice questions
/// when the exam timer forces a submission.
pub const NO_ANSWER: &str = "-1";

/// Question kind within an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    MultipleChoice,
    Essay,
}

/// A single question. `options` is empty for essay questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
}

/// An assessment assigned to one or more users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: i64,
    pub template: String,
    pub deadline: DateTime<Utc>,
    /// Allotted working time in seconds; the server may omit it for
    /// untimed templates.
    pub duration_seconds: Option<u64>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub assigned_users: Vec<String>,
}

/// One answered question inside a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAnswer {
    pub question_id: i64,
    pub answer: String,
    /// Set by a reviewer for essay answers; absent until graded.
    pub essay_score: Option<f64>,
}

/// A graded (or partially graded) submission. All scores are computed
/// server-side and displayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: i64,
    pub assessment_id: i64,
    pub username: String,
    #[serde(default)]
    pub answers: Vec<SubmissionAnswer>,
    pub mc_score: Option<f64>,
    pub essay_score: Option<f64>,
    pub total_score: Option<f64>,
    #[serde(default)]
    pub essay_reviewed: bool,
}

/// Payload for submitting answers, manual or timer-forced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswers {
    pub assessment_id: i64,
    pub answers: Vec<AnswerPayload>,
}

/// One answer in a submit payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub question_id: i64,
    pub answer: String,
}

/// Payload for grading a single essay answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayGrade {
    pub submission_id: i64,
    pub question_id: i64,
    pub score: f64,
}
