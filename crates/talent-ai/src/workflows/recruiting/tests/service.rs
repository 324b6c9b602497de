use super::common::*;
use crate::workflows::recruiting::assessment::{AnswerEffect, AssessmentError, AssessmentState};
use crate::workflows::recruiting::decision::{DecisionConflict, DecisionEffect, DecisionOutcome};
use crate::workflows::recruiting::domain::{ApplicantStatus, AssessmentId, JobId, JobWeights};
use crate::workflows::recruiting::repository::{RecruitingRepository, RepositoryError};
use crate::workflows::recruiting::{
    ApplicationDraft, JobValidationError, RecruitingServiceError, ScoringError,
};
use std::time::Duration;

#[tokio::test]
async fn create_job_applies_default_weights_and_drops_blank_questions() {
    let harness = harness();
    let mut request = job_request();
    request.weights = None;
    request.questions = vec!["  ".to_string(), "Why this role?".to_string()];

    let job = harness
        .service
        .create_job(&recruiter(), request)
        .await
        .expect("job created");

    assert_eq!(job.weights, JobWeights::default());
    assert_eq!(job.questions, ["Why this role?"]);
    assert_eq!(job.created_by, recruiter());
    assert!(job.applicants.is_empty());
}

#[tokio::test]
async fn create_job_rejects_invalid_postings() {
    let harness = harness();

    let mut blank_title = job_request();
    blank_title.title = "   ".to_string();
    assert!(matches!(
        harness.service.create_job(&recruiter(), blank_title).await,
        Err(RecruitingServiceError::Validation(JobValidationError::BlankTitle))
    ));

    let mut too_many = job_request();
    too_many.questions = (0..4).map(|index| format!("Question {index}")).collect();
    assert!(matches!(
        harness.service.create_job(&recruiter(), too_many).await,
        Err(RecruitingServiceError::Validation(
            JobValidationError::TooManyQuestions { count: 4 }
        ))
    ));

    let mut zero_weights = job_request();
    zero_weights.weights = Some(JobWeights {
        resume: 0,
        behaviour: 0,
    });
    assert!(matches!(
        harness.service.create_job(&recruiter(), zero_weights).await,
        Err(RecruitingServiceError::Validation(JobValidationError::Weights(
            ScoringError::ZeroCombinedWeight
        )))
    ));

    assert!(harness
        .repository
        .list_jobs()
        .await
        .expect("list")
        .is_empty());
}

#[tokio::test]
async fn jobs_are_listed_newest_first_and_deletable() {
    let harness = harness();
    let first = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("first");
    let mut request = job_request();
    request.title = "Data Scientist".to_string();
    let second = harness
        .service
        .create_job(&recruiter(), request)
        .await
        .expect("second");

    let postings = harness.service.list_postings().await.expect("list");
    assert_eq!(postings[0].id, second.id);
    assert_eq!(postings[1].id, first.id);

    harness.service.delete_job(&first.id).await.expect("delete");
    assert_eq!(harness.service.list_jobs().await.expect("list").len(), 1);
    assert!(matches!(
        harness.service.delete_job(&first.id).await,
        Err(RecruitingServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[tokio::test]
async fn generate_questions_keeps_three_non_blank_prompts() {
    let harness = harness();
    let questions = harness
        .service
        .generate_questions("Build data pipelines")
        .await
        .expect("questions");
    assert_eq!(questions.len(), 3);
    assert!(questions.iter().all(|question| !question.trim().is_empty()));

    assert!(matches!(
        harness.service.generate_questions("  ").await,
        Err(RecruitingServiceError::Validation(
            JobValidationError::BlankDescription
        ))
    ));
}

#[tokio::test]
async fn submit_application_stores_fit_score_and_insights() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");

    let applicant = harness
        .service
        .submit_application(
            &job.id,
            ApplicationDraft {
                candidate: candidate("u1"),
                resume: resume("u1"),
                analysis: analysis(80),
                answers: vec!["answer one".to_string(), "answer two".to_string()],
            },
        )
        .await
        .expect("submitted");

    assert_eq!(applicant.fit_score, Some(74));
    assert_eq!(
        applicant.resume_insights,
        "Strong technical skills, Relevant project experience"
    );
    assert_eq!(applicant.status, ApplicantStatus::UnderReview);
    assert!(!applicant.locked);
    assert_eq!(applicant.personality_traits, Some(personality()));

    let stored = harness
        .repository
        .fetch_job(&job.id)
        .await
        .expect("fetch")
        .expect("job present");
    assert_eq!(stored.applicants, vec![applicant]);
}

#[tokio::test]
async fn submit_application_to_unknown_job_is_not_found() {
    let harness = harness();
    let result = harness
        .service
        .submit_application(
            &JobId("missing".to_string()),
            ApplicationDraft {
                candidate: candidate("u1"),
                resume: resume("u1"),
                analysis: analysis(80),
                answers: Vec::new(),
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(RecruitingServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[tokio::test]
async fn decide_unlock_and_redecide() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let applicant = harness
        .service
        .submit_application(
            &job.id,
            ApplicationDraft {
                candidate: candidate("u1"),
                resume: resume("u1"),
                analysis: analysis(90),
                answers: Vec::new(),
            },
        )
        .await
        .expect("submitted");

    let receipt = harness
        .service
        .decide(&job.id, &applicant.id, DecisionOutcome::Shortlisted)
        .await
        .expect("decide");
    assert!(receipt.effect.applied());

    let second = harness
        .service
        .decide(&job.id, &applicant.id, DecisionOutcome::Rejected)
        .await
        .expect("second decide");
    assert_eq!(
        second.effect,
        DecisionEffect::NoEffect(DecisionConflict::AlreadyLocked {
            status: ApplicantStatus::Shortlisted
        })
    );

    harness
        .service
        .unlock(&job.id, &applicant.id)
        .await
        .expect("unlock");
    let again = harness
        .service
        .unlock(&job.id, &applicant.id)
        .await
        .expect("second unlock");
    assert_eq!(again.effect, DecisionEffect::NoEffect(DecisionConflict::NotLocked));
    assert_eq!(again.applicant.status, ApplicantStatus::Shortlisted);

    let last = harness
        .service
        .decide(&job.id, &applicant.id, DecisionOutcome::Rejected)
        .await
        .expect("redecide");
    assert_eq!(last.applicant.status, ApplicantStatus::Rejected);
    assert!(last.applicant.locked);
}

#[tokio::test]
async fn decisions_propagate_repository_outages() {
    let harness = harness_with(UnavailableRepository);
    let result = harness
        .service
        .decide(
            &JobId("job-1".to_string()),
            &crate::workflows::recruiting::domain::ApplicantId("a".to_string()),
            DecisionOutcome::Shortlisted,
        )
        .await;
    assert!(matches!(
        result,
        Err(RecruitingServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[tokio::test(start_paused = true)]
async fn assessment_flow_submits_answers() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");

    let ticket = harness
        .service
        .open_assessment(&job.id, candidate("u7"), resume("u7"))
        .await
        .expect("opened");
    assert_eq!(ticket.questions.len(), 2);
    assert_eq!(ticket.assessment.state, AssessmentState::NotStarted);
    assert_eq!(ticket.assessment.remaining_secs, 180);

    let id = ticket.assessment_id;
    harness.service.start_assessment(&id).expect("start");
    tokio::time::sleep(Duration::from_millis(5_500)).await;

    let receipt = harness
        .service
        .answer(&id, 0, "Handled an outage calmly".to_string())
        .expect("answer");
    assert_eq!(receipt.effect, AnswerEffect::Recorded);
    assert_eq!(receipt.assessment.remaining_secs, 175);

    let applicant = harness.service.submit_assessment(&id).await.expect("submit");
    assert_eq!(
        applicant.behavioural_answers,
        ["Handled an outage calmly", ""]
    );
    assert_eq!(applicant.fit_score, Some(74));
    assert!(matches!(
        harness.service.assessment(&id),
        Err(RecruitingServiceError::UnknownAssessment(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn expired_assessment_freezes_answers_but_still_submits() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let id = harness
        .service
        .open_assessment(&job.id, candidate("u8"), resume("u8"))
        .await
        .expect("opened")
        .assessment_id;

    harness.service.start_assessment(&id).expect("start");
    harness
        .service
        .answer(&id, 1, "Early answer".to_string())
        .expect("answer");
    tokio::time::sleep(Duration::from_secs(181)).await;

    let receipt = harness
        .service
        .answer(&id, 1, "Late edit".to_string())
        .expect("answer call");
    assert_eq!(receipt.effect, AnswerEffect::Frozen);
    assert_eq!(receipt.assessment.state, AssessmentState::Expired);
    assert_eq!(receipt.assessment.remaining_secs, 0);

    let applicant = harness.service.submit_assessment(&id).await.expect("submit");
    assert_eq!(applicant.behavioural_answers[1], "Early answer");
}

#[tokio::test(start_paused = true)]
async fn failed_submission_returns_to_question_step_with_time_preserved() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let id = harness
        .service
        .open_assessment(&job.id, candidate("u9"), resume("u9"))
        .await
        .expect("opened")
        .assessment_id;
    harness.service.start_assessment(&id).expect("start");
    tokio::time::sleep(Duration::from_millis(10_500)).await;

    harness.behaviour.set_failing(true);
    let result = harness.service.submit_assessment(&id).await;
    assert!(matches!(result, Err(RecruitingServiceError::Analyzer(_))));

    let snapshot = harness.service.assessment(&id).expect("still open");
    assert_eq!(snapshot.state, AssessmentState::Running);
    assert_eq!(snapshot.remaining_secs, 170);

    harness.behaviour.set_failing(false);
    harness.service.submit_assessment(&id).await.expect("retry");
    let stored = harness
        .service
        .ranked_applicants(&job.id)
        .await
        .expect("ranked");
    assert_eq!(stored.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn persistence_failure_never_marks_assessment_submitted() {
    let harness = harness_with(ReadOnlyApplicants::default());
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let id = harness
        .service
        .open_assessment(&job.id, candidate("u2"), resume("u2"))
        .await
        .expect("opened")
        .assessment_id;
    harness.service.start_assessment(&id).expect("start");

    let result = harness.service.submit_assessment(&id).await;
    assert!(matches!(
        result,
        Err(RecruitingServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert_eq!(
        harness.service.assessment(&id).expect("open").state,
        AssessmentState::Running
    );
}

#[tokio::test(start_paused = true)]
async fn abandoned_assessment_cannot_be_submitted() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let id = harness
        .service
        .open_assessment(&job.id, candidate("u3"), resume("u3"))
        .await
        .expect("opened")
        .assessment_id;
    harness.service.start_assessment(&id).expect("start");

    assert!(harness.service.abandon_assessment(&id).expect("abandon"));
    assert!(matches!(
        harness.service.submit_assessment(&id).await,
        Err(RecruitingServiceError::UnknownAssessment(_))
    ));
    assert!(harness
        .service
        .ranked_applicants(&job.id)
        .await
        .expect("ranked")
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn abandon_is_refused_while_submission_is_in_flight() {
    let harness = harness_with(SlowAppends {
        inner: MemoryRepository::default(),
        delay: Duration::from_secs(1),
    });
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let id = harness
        .service
        .open_assessment(&job.id, candidate("u3"), resume("u3"))
        .await
        .expect("opened")
        .assessment_id;
    harness.service.start_assessment(&id).expect("start");
    harness
        .service
        .answer(&id, 0, "I rebuilt the release pipeline.".to_string())
        .expect("answer");

    let service = harness.service.clone();
    let submit_id = id.clone();
    let submission =
        tokio::spawn(async move { service.submit_assessment(&submit_id).await });
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(matches!(
        harness.service.abandon_assessment(&id),
        Err(RecruitingServiceError::Assessment(
            AssessmentError::InvalidTransition {
                action: "abandon",
                state: AssessmentState::Submitting,
            }
        ))
    ));
    assert_eq!(
        harness.service.assessment(&id).expect("still open").state,
        AssessmentState::Submitting
    );

    let applicant = submission
        .await
        .expect("submission task")
        .expect("submitted");
    assert_eq!(applicant.behavioural_answers[0], "I rebuilt the release pipeline.");

    let stored = harness
        .repository
        .fetch_job(&job.id)
        .await
        .expect("fetch")
        .expect("job present");
    assert_eq!(stored.applicants.len(), 1);
    assert!(matches!(
        harness.service.abandon_assessment(&id),
        Err(RecruitingServiceError::UnknownAssessment(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn idle_assessments_are_evicted_after_retention() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let idle = harness
        .service
        .open_assessment(&job.id, candidate("u8"), resume("u8"))
        .await
        .expect("opened")
        .assessment_id;

    tokio::time::sleep(Duration::from_secs(1_800)).await;
    let running = harness
        .service
        .open_assessment(&job.id, candidate("u9"), resume("u9"))
        .await
        .expect("opened")
        .assessment_id;
    assert!(matches!(
        harness.service.assessment(&idle),
        Err(RecruitingServiceError::UnknownAssessment(_))
    ));

    harness.service.start_assessment(&running).expect("start");
    tokio::time::sleep(Duration::from_secs(1_800)).await;
    let snapshot = harness.service.assessment(&running).expect("still open");
    assert_eq!(snapshot.state, AssessmentState::Expired);

    harness
        .service
        .open_assessment(&job.id, candidate("u10"), resume("u10"))
        .await
        .expect("opened");
    assert!(matches!(
        harness.service.assessment(&running),
        Err(RecruitingServiceError::UnknownAssessment(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn step_back_then_restart_resumes_remaining_time() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let id = harness
        .service
        .open_assessment(&job.id, candidate("u4"), resume("u4"))
        .await
        .expect("opened")
        .assessment_id;

    harness.service.start_assessment(&id).expect("start");
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    let snapshot = harness.service.step_back(&id).expect("back");
    assert_eq!(snapshot.state, AssessmentState::NotStarted);
    assert_eq!(snapshot.remaining_secs, 177);

    assert!(matches!(
        harness.service.step_back(&AssessmentId("nope".to_string())),
        Err(RecruitingServiceError::UnknownAssessment(_))
    ));

    let restarted = harness.service.start_assessment(&id).expect("restart");
    assert_eq!(restarted.remaining_secs, 177);
}

#[tokio::test]
async fn submitting_before_start_is_an_invalid_transition() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    let id = harness
        .service
        .open_assessment(&job.id, candidate("u5"), resume("u5"))
        .await
        .expect("opened")
        .assessment_id;

    assert!(matches!(
        harness.service.submit_assessment(&id).await,
        Err(RecruitingServiceError::Assessment(
            AssessmentError::InvalidTransition { .. }
        ))
    ));
}

#[tokio::test]
async fn dashboards_reflect_submissions_and_decisions() {
    let harness = harness();
    let job = harness
        .service
        .create_job(&recruiter(), job_request())
        .await
        .expect("job");
    for user in ["u1", "u2"] {
        harness
            .service
            .submit_application(
                &job.id,
                ApplicationDraft {
                    candidate: candidate(user),
                    resume: resume(user),
                    analysis: analysis(80),
                    answers: Vec::new(),
                },
            )
            .await
            .expect("submitted");
    }
    let ranked = harness.service.ranked_applicants(&job.id).await.expect("ranked");
    harness
        .service
        .decide(&job.id, &ranked[1].applicant.id, DecisionOutcome::Rejected)
        .await
        .expect("decide");

    let recruiter_view = harness
        .service
        .recruiter_dashboard(None)
        .await
        .expect("dashboard");
    assert_eq!(recruiter_view.funnel.total, 2);
    assert_eq!(recruiter_view.funnel.rejected, 1);
    assert_eq!(recruiter_view.average_fit_score, 74);
    let gap = recruiter_view.skill_gap.expect("first job");
    assert_eq!((gap.entries[0].available, gap.entries[0].gap), (100, 0));
    assert_eq!((gap.entries[1].available, gap.entries[1].gap), (0, 100));

    let candidate_view = harness
        .service
        .candidate_dashboard(&ranked[1].applicant.user_id)
        .await
        .expect("candidate dashboard");
    assert_eq!(candidate_view.stats.applied, 1);
    assert_eq!(candidate_view.stats.rejected, 1);
    assert!(candidate_view.has_applied(&job.id));
    assert_eq!(candidate_view.unique_skills.len(), 1);
}
