use crate::infra::{simulated_collaborators, InMemoryRecruitingRepository, Latency};
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use talent_ai::config::RecruitingConfig;
use talent_ai::error::AppError;
use talent_ai::workflows::recruiting::{
    Applicant, AssessmentId, Candidate, CandidateDashboard, CreateJobRequest, DecisionOutcome,
    JobId, JobPosting, RecruiterDashboard, RecruitingService, ResumeDocument, UserId,
};

type DemoService = RecruitingService<InMemoryRecruitingRepository>;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Wall-clock milliseconds per assessment second. Keeps the 3-minute timer short.
    #[arg(long, default_value_t = 10)]
    pub(crate) tick_millis: u64,
    /// Deadline for the posting created during the demo (YYYY-MM-DD). Defaults to 2026-04-15.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) deadline: Option<NaiveDate>,
    /// Keep the simulated backend delays.
    #[arg(long)]
    pub(crate) with_latency: bool,
    /// Print the dashboards as JSON instead of a text summary.
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        tick_millis,
        deadline,
        with_latency,
        json,
    } = args;

    let tick = Duration::from_millis(tick_millis.max(1));
    let latency = Latency::new(with_latency);
    let config = RecruitingConfig {
        tick_period: tick,
        simulated_latency: with_latency,
        ..RecruitingConfig::default()
    };
    let budget = config.assessment_budget_secs;
    let service = Arc::new(RecruitingService::new(
        Arc::new(InMemoryRecruitingRepository::seeded(latency)),
        simulated_collaborators(latency),
        config,
    ));

    println!("Recruiting demo");
    println!("Open postings:");
    for posting in service.list_postings().await? {
        print_posting(&posting);
    }

    let recruiter = UserId("recruiter-demo".to_string());
    let description = "Train, evaluate, and ship deep learning models for search ranking.";
    let questions = service.generate_questions(description).await?;
    let deadline = deadline
        .or_else(|| NaiveDate::from_ymd_opt(2026, 4, 15))
        .unwrap_or(NaiveDate::MIN);
    let job = service
        .create_job(
            &recruiter,
            CreateJobRequest {
                title: "Senior Machine Learning Engineer".to_string(),
                company: "TechCorp AI".to_string(),
                description: description.to_string(),
                deadline,
                questions,
                weights: None,
                required_skills: vec![
                    "Python".to_string(),
                    "TensorFlow".to_string(),
                    "Kubernetes".to_string(),
                ],
            },
        )
        .await?;
    println!("\nPosted {} ({})", job.title, job.id.0);
    for (index, question) in job.questions.iter().enumerate() {
        println!("  Q{}: {}", index + 1, question);
    }

    println!("\nCandidate Dana Lee completes the assessment");
    let dana = complete_assessment(&service, &job.id, tick).await?;
    print_applicant(&dana);

    println!("\nCandidate Evan Wright lets the clock run out");
    let evan = expire_assessment(&service, &job.id, tick, budget).await?;
    print_applicant(&evan);

    println!("\nRanking for {}", job.title);
    for ranked in service.ranked_applicants(&job.id).await? {
        println!(
            "  #{} {} fit {} ({}) status {}",
            ranked.rank,
            ranked.applicant.name,
            ranked.fit_score,
            ranked.band_label,
            ranked.status_label
        );
    }

    println!("\nDecisions");
    let receipt = service
        .decide(&job.id, &dana.id, DecisionOutcome::Shortlisted)
        .await?;
    println!("  Shortlist Dana -> {}", receipt.effect.label());
    let receipt = service
        .decide(&job.id, &evan.id, DecisionOutcome::Rejected)
        .await?;
    println!("  Reject Evan -> {}", receipt.effect.label());
    let receipt = service
        .decide(&job.id, &dana.id, DecisionOutcome::Rejected)
        .await?;
    println!(
        "  Reject Dana while locked -> {} (status stays {})",
        receipt.effect.label(),
        receipt.applicant.status.label()
    );
    let receipt = service.unlock(&job.id, &evan.id).await?;
    println!("  Unlock Evan -> {}", receipt.effect.label());
    let receipt = service
        .decide(&job.id, &evan.id, DecisionOutcome::Shortlisted)
        .await?;
    println!(
        "  Shortlist Evan after review -> {} (status {})",
        receipt.effect.label(),
        receipt.applicant.status.label()
    );

    let recruiter_view = service.recruiter_dashboard(Some(&job.id)).await?;
    let candidate_view = service.candidate_dashboard(&dana.user_id).await?;
    if json {
        print_json("Recruiter dashboard", &recruiter_view);
        print_json("Candidate dashboard (Dana Lee)", &candidate_view);
    } else {
        render_recruiter_dashboard(&recruiter_view);
        render_candidate_dashboard(&candidate_view, &job.id);
    }

    Ok(())
}

fn demo_candidate(user: &str, name: &str) -> (Candidate, ResumeDocument) {
    let file = name.to_ascii_lowercase().replace(' ', "_");
    (
        Candidate {
            user_id: UserId(user.to_string()),
            name: name.to_string(),
        },
        ResumeDocument {
            name: format!("{file}_resume.pdf"),
            url: format!("blob:{user}"),
        },
    )
}

async fn complete_assessment(
    service: &DemoService,
    job_id: &JobId,
    tick: Duration,
) -> Result<Applicant, AppError> {
    let (candidate, resume) = demo_candidate("u6", "Dana Lee");
    let ticket = service.open_assessment(job_id, candidate, resume).await?;
    println!(
        "  Resume match {} | {} questions | timer {}",
        ticket.analysis.match_score,
        ticket.questions.len(),
        ticket.assessment.countdown
    );

    let id = &ticket.assessment_id;
    service.start_assessment(id)?;
    for index in 0..ticket.questions.len() {
        service.answer(
            id,
            index,
            format!("Answer {} with a concrete example.", index + 1),
        )?;
    }
    tokio::time::sleep(tick * 40).await;
    report_clock(service, id, "after answering")?;

    let paused = service.step_back(id)?;
    println!("  Stepped back to review the resume at {}", paused.countdown);
    tokio::time::sleep(tick * 20).await;
    service.start_assessment(id)?;
    report_clock(service, id, "after resuming")?;

    Ok(service.submit_assessment(id).await?)
}

async fn expire_assessment(
    service: &DemoService,
    job_id: &JobId,
    tick: Duration,
    budget: u32,
) -> Result<Applicant, AppError> {
    let (candidate, resume) = demo_candidate("u7", "Evan Wright");
    let ticket = service.open_assessment(job_id, candidate, resume).await?;
    let id = &ticket.assessment_id;

    service.start_assessment(id)?;
    service.answer(id, 0, "I broke the work into daily goals.".to_string())?;
    tokio::time::sleep(tick * (budget + 5)).await;
    report_clock(service, id, "after the budget elapsed")?;

    let late = service.answer(id, 1, "Too late to count.".to_string())?;
    println!("  Late answer recorded: {}", late.effect.recorded());

    Ok(service.submit_assessment(id).await?)
}

fn report_clock(service: &DemoService, id: &AssessmentId, moment: &str) -> Result<(), AppError> {
    let snapshot = service.assessment(id)?;
    println!(
        "  Clock {moment}: {} ({})",
        snapshot.countdown,
        snapshot.state.label()
    );
    Ok(())
}

fn print_posting(posting: &JobPosting) {
    println!(
        "  - {} at {} | deadline {} | weights {}/{} | {} applicants",
        posting.title,
        posting.company,
        posting.deadline,
        posting.weights.resume,
        posting.weights.behaviour,
        posting.applicant_count
    );
}

fn print_applicant(applicant: &Applicant) {
    println!(
        "  Submitted {} | resume {} | behaviour {} | fit {}",
        applicant.id.0,
        applicant.resume_score,
        applicant.behaviour_score,
        applicant
            .fit_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );
    let answered = applicant
        .behavioural_answers
        .iter()
        .filter(|answer| !answer.is_empty())
        .count();
    println!(
        "  Answers kept: {answered}/{}",
        applicant.behavioural_answers.len()
    );
}

fn print_json<T: serde::Serialize>(title: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("\n{title}:\n{json}"),
        Err(err) => println!("\n{title} unavailable: {err}"),
    }
}

fn render_recruiter_dashboard(dashboard: &RecruiterDashboard) {
    println!("\nRecruiter dashboard");
    println!(
        "- {} jobs | {} applicants | average fit {}",
        dashboard.total_jobs, dashboard.funnel.total, dashboard.average_fit_score
    );
    println!("Funnel:");
    for stage in &dashboard.funnel_stages {
        println!("  - {}: {}", stage.stage_label, stage.count);
    }
    println!("Status distribution:");
    for bucket in &dashboard.status_distribution {
        println!("  - {}: {}", bucket.status_label, bucket.count);
    }
    println!("Applicants per job:");
    for entry in &dashboard.applicants_per_job {
        println!("  - {}: {}", entry.chart_label, entry.applicants);
    }
    if let Some(profile) = &dashboard.personality {
        let traits = profile.traits;
        println!(
            "Average personality: O {} C {} E {} A {} N {} (stability {})",
            traits.openness,
            traits.conscientiousness,
            traits.extraversion,
            traits.agreeableness,
            traits.neuroticism,
            profile.emotional_stability
        );
    }
    if let Some(report) = &dashboard.skill_gap {
        println!("Skill gap for {}:", report.job_title);
        for entry in &report.entries {
            println!(
                "  - {}: {}% available, gap {}",
                entry.skill, entry.available, entry.gap
            );
        }
    }
}

fn render_candidate_dashboard(dashboard: &CandidateDashboard, job_id: &JobId) {
    println!("\nCandidate dashboard");
    let stats = dashboard.stats;
    println!(
        "- applied {} | under review {} | shortlisted {} | rejected {}",
        stats.applied, stats.under_review, stats.shortlisted, stats.rejected
    );
    println!(
        "- already applied to {}: {}",
        job_id.0,
        dashboard.has_applied(job_id)
    );
    for application in &dashboard.applications {
        println!(
            "  {} at {} | fit {} ({}) | {}",
            application.job.title,
            application.job.company,
            application.fit_score,
            application.band_label,
            application.status_label
        );
        for step in &application.timeline {
            println!("    [{:?}] {}", step.status, step.label);
        }
    }
    let skills: Vec<&str> = dashboard
        .unique_skills
        .iter()
        .map(|skill| skill.name.as_str())
        .collect();
    println!("- skills on file: {}", skills.join(", "));
}
