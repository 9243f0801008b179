//! Assessment and submission endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::assessment::{Assessment, EssayGrade, Submission, SubmitAnswers};

/// List assessments assigned to one trainee.
pub async fn list_assigned(client: &ApiClient, username: &str) -> Result<Vec<Assessment>> {
    client.get(&format!("/api/trainee/{username}/assessments")).await
}

/// Fetch one assessment with its questions.
pub async fn detail(client: &ApiClient, id: i64) -> Result<Assessment> {
    client.get(&format!("/api/assessments/{id}")).await
}

/// Submit answers, manual or timer-forced. Scores come back computed
/// server-side.
pub async fn submit(client: &ApiClient, data: &SubmitAnswers) -> Result<Submission> {
    client.post("/api/trainee/submissions", data).await
}

/// Fetch the caller's submission for an assessment, if any.
pub async fn my_submission(client: &ApiClient, username: &str, assessment_id: i64) -> Result<Submission> {
    client
        .get(&format!("/api/trainee/{username}/submissions/{assessment_id}"))
        .await
}

/// List every submission for an assessment (grader view).
pub async fn submissions(client: &ApiClient, assessment_id: i64) -> Result<Vec<Submission>> {
    client.get(&format!("/api/assessments/{assessment_id}/submissions")).await
}

/// Post a grade for one essay answer.
pub async fn grade_essay(client: &ApiClient, grade: &EssayGrade) -> Result<()> {
    client.post_unit("/api/assessments/submissions/grade", grade).await
}
