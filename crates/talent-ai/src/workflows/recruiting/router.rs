use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::decision::DecisionOutcome;
use super::domain::{
    ApplicantId, AssessmentId, Candidate, CreateJobRequest, JobId, ResumeDocument, UserId,
};
use super::repository::{RecruitingRepository, RepositoryError};
use super::service::{RecruitingService, RecruitingServiceError};

type SharedService<R> = Arc<RecruitingService<R>>;

/// Router exposing jobs, decisions, assessments, and dashboards as JSON.
pub fn recruiting_router<R>(service: SharedService<R>) -> Router
where
    R: RecruitingRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            post(create_job_handler::<R>).get(list_jobs_handler::<R>),
        )
        .route("/api/v1/jobs/:job_id", delete(delete_job_handler::<R>))
        .route(
            "/api/v1/jobs/:job_id/applicants",
            get(ranked_applicants_handler::<R>),
        )
        .route("/api/v1/jobs/:job_id/skill-gap", get(skill_gap_handler::<R>))
        .route(
            "/api/v1/jobs/:job_id/applicants/:applicant_id/decision",
            post(decision_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/applicants/:applicant_id/unlock",
            post(unlock_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/assessments",
            post(open_assessment_handler::<R>),
        )
        .route("/api/v1/questions", post(questions_handler::<R>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(assessment_handler::<R>).delete(abandon_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/start",
            post(start_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/back",
            post(back_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/answers/:index",
            put(answer_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/submit",
            post(submit_handler::<R>),
        )
        .route(
            "/api/v1/analytics/recruiter",
            get(recruiter_dashboard_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:user_id/dashboard",
            get(candidate_dashboard_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateJobPayload {
    pub(crate) recruiter_id: UserId,
    #[serde(flatten)]
    pub(crate) job: CreateJobRequest,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionPayload {
    pub(crate) outcome: DecisionOutcome,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsPayload {
    pub(crate) description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAssessmentPayload {
    pub(crate) candidate: Candidate,
    pub(crate) resume: ResumeDocument,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerPayload {
    pub(crate) text: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JobFocus {
    pub(crate) job_id: Option<String>,
}

/// HTTP status reported for a failed recruiting operation.
pub fn error_status(error: &RecruitingServiceError) -> StatusCode {
    match error {
        RecruitingServiceError::Validation(_) | RecruitingServiceError::Scoring(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        RecruitingServiceError::Repository(RepositoryError::NotFound)
        | RecruitingServiceError::UnknownAssessment(_) => StatusCode::NOT_FOUND,
        RecruitingServiceError::Repository(RepositoryError::Conflict)
        | RecruitingServiceError::Assessment(_) => StatusCode::CONFLICT,
        RecruitingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        RecruitingServiceError::Analyzer(_) => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(error: RecruitingServiceError) -> Response {
    let status = error_status(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, RecruitingServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_job_handler<R>(
    State(service): State<SharedService<R>>,
    axum::Json(payload): axum::Json<CreateJobPayload>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    let result = service.create_job(&payload.recruiter_id, payload.job).await;
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn list_jobs_handler<R>(State(service): State<SharedService<R>>) -> Response
where
    R: RecruitingRepository + 'static,
{
    respond(StatusCode::OK, service.list_postings().await)
}

pub(crate) async fn delete_job_handler<R>(
    State(service): State<SharedService<R>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.delete_job(&JobId(job_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ranked_applicants_handler<R>(
    State(service): State<SharedService<R>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    respond(StatusCode::OK, service.ranked_applicants(&JobId(job_id)).await)
}

pub(crate) async fn skill_gap_handler<R>(
    State(service): State<SharedService<R>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    respond(StatusCode::OK, service.skill_gap(&JobId(job_id)).await)
}

pub(crate) async fn decision_handler<R>(
    State(service): State<SharedService<R>>,
    Path((job_id, applicant_id)): Path<(String, String)>,
    axum::Json(payload): axum::Json<DecisionPayload>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    let result = service
        .decide(
            &JobId(job_id),
            &ApplicantId(applicant_id),
            payload.outcome,
        )
        .await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn unlock_handler<R>(
    State(service): State<SharedService<R>>,
    Path((job_id, applicant_id)): Path<(String, String)>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    let result = service
        .unlock(&JobId(job_id), &ApplicantId(applicant_id))
        .await;
    respond(StatusCode::OK, result)
}

pub(crate) async fn questions_handler<R>(
    State(service): State<SharedService<R>>,
    axum::Json(payload): axum::Json<QuestionsPayload>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.generate_questions(&payload.description).await {
        Ok(questions) => {
            (StatusCode::OK, axum::Json(json!({ "questions": questions }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_assessment_handler<R>(
    State(service): State<SharedService<R>>,
    Path(job_id): Path<String>,
    axum::Json(payload): axum::Json<OpenAssessmentPayload>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    let result = service
        .open_assessment(&JobId(job_id), payload.candidate, payload.resume)
        .await;
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn assessment_handler<R>(
    State(service): State<SharedService<R>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.assessment(&AssessmentId(assessment_id)),
    )
}

pub(crate) async fn start_handler<R>(
    State(service): State<SharedService<R>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.start_assessment(&AssessmentId(assessment_id)),
    )
}

pub(crate) async fn back_handler<R>(
    State(service): State<SharedService<R>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    respond(StatusCode::OK, service.step_back(&AssessmentId(assessment_id)))
}

pub(crate) async fn answer_handler<R>(
    State(service): State<SharedService<R>>,
    Path((assessment_id, index)): Path<(String, usize)>,
    axum::Json(payload): axum::Json<AnswerPayload>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.answer(&AssessmentId(assessment_id), index, payload.text),
    )
}

pub(crate) async fn submit_handler<R>(
    State(service): State<SharedService<R>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    let result = service
        .submit_assessment(&AssessmentId(assessment_id))
        .await;
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn abandon_handler<R>(
    State(service): State<SharedService<R>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.abandon_assessment(&AssessmentId(assessment_id)) {
        Ok(abandoned) => {
            (StatusCode::OK, axum::Json(json!({ "abandoned": abandoned }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recruiter_dashboard_handler<R>(
    State(service): State<SharedService<R>>,
    Query(focus): Query<JobFocus>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    let focus = focus.job_id.map(JobId);
    respond(
        StatusCode::OK,
        service.recruiter_dashboard(focus.as_ref()).await,
    )
}

pub(crate) async fn candidate_dashboard_handler<R>(
    State(service): State<SharedService<R>>,
    Path(user_id): Path<String>,
    Query(focus): Query<JobFocus>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.candidate_dashboard(&UserId(user_id)).await {
        Ok(dashboard) => {
            let already_applied = focus
                .job_id
                .map(|job_id| dashboard.has_applied(&JobId(job_id)));
            let payload = json!({
                "dashboard": dashboard,
                "already_applied": already_applied,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
