use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use talent_ai::workflows::recruiting::decision;
use talent_ai::workflows::recruiting::{
    AiCollaborators, AnalyzerError, Applicant, ApplicantId, ApplicantStatus, BehaviouralAnalyzer,
    BehaviouralAssessment, CandidateApplication, DecisionEffect, DecisionOutcome,
    DecisionReceipt, ExtractedEducation, ExtractedExperience, ExtractedSkill, Job, JobId,
    JobWeights, PersonalityTraits, QuestionGenerator, RecruitingRepository, RepositoryError,
    ResumeAnalysis, ResumeAnalyzer, ResumeDocument, SkillCategory, UserId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Per-operation delays applied by the in-memory layer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Latency {
    enabled: bool,
}

impl Latency {
    pub(crate) fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    async fn pause(self, millis: u64) {
        if self.enabled {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

#[derive(Clone)]
pub(crate) struct InMemoryRecruitingRepository {
    jobs: Arc<Mutex<Vec<Job>>>,
    latency: Latency,
}

impl InMemoryRecruitingRepository {
    pub(crate) fn new(latency: Latency) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(Vec::new())),
            latency,
        }
    }

    /// Repository preloaded with the sample postings, newest first.
    pub(crate) fn seeded(latency: Latency) -> Self {
        let repository = Self::new(latency);
        *repository.lock() = seed_jobs();
        repository
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Job>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn edit_applicant(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        apply: impl FnOnce(&mut Applicant) -> DecisionEffect,
    ) -> Result<DecisionReceipt, RepositoryError> {
        let mut guard = self.lock();
        let applicant = guard
            .iter_mut()
            .find(|job| &job.id == job_id)
            .and_then(|job| job.applicant_mut(applicant_id))
            .ok_or(RepositoryError::NotFound)?;
        let effect = apply(applicant);
        Ok(DecisionReceipt {
            applicant: applicant.clone(),
            effect,
        })
    }
}

#[async_trait]
impl RecruitingRepository for InMemoryRecruitingRepository {
    async fn create_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.latency.pause(600).await;
        let mut guard = self.lock();
        if guard.iter().any(|existing| existing.id == job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(0, job.clone());
        Ok(job)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        self.latency.pause(500).await;
        Ok(self.lock().clone())
    }

    async fn fetch_job(&self, job_id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.latency.pause(300).await;
        Ok(self.lock().iter().find(|job| &job.id == job_id).cloned())
    }

    async fn delete_job(&self, job_id: &JobId) -> Result<(), RepositoryError> {
        self.latency.pause(400).await;
        let mut guard = self.lock();
        let before = guard.len();
        guard.retain(|job| &job.id != job_id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn append_applicant(
        &self,
        job_id: &JobId,
        applicant: Applicant,
    ) -> Result<Applicant, RepositoryError> {
        self.latency.pause(1000).await;
        let mut guard = self.lock();
        let job = guard
            .iter_mut()
            .find(|job| &job.id == job_id)
            .ok_or(RepositoryError::NotFound)?;
        if job.applicant(&applicant.id).is_some() {
            return Err(RepositoryError::Conflict);
        }
        job.applicants.push(applicant.clone());
        Ok(applicant)
    }

    async fn update_applicant_status(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
        outcome: DecisionOutcome,
    ) -> Result<DecisionReceipt, RepositoryError> {
        self.latency.pause(400).await;
        self.edit_applicant(job_id, applicant_id, |applicant| {
            decision::decide(applicant, outcome)
        })
    }

    async fn unlock_applicant(
        &self,
        job_id: &JobId,
        applicant_id: &ApplicantId,
    ) -> Result<DecisionReceipt, RepositoryError> {
        self.latency.pause(300).await;
        self.edit_applicant(job_id, applicant_id, decision::unlock)
    }

    async fn list_applications_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError> {
        self.latency.pause(400).await;
        Ok(self
            .lock()
            .iter()
            .filter_map(|job| {
                job.applicant_for_user(user_id)
                    .map(|applicant| CandidateApplication {
                        job: job.posting(),
                        applicant: applicant.clone(),
                    })
            })
            .collect())
    }
}

pub(crate) struct SimulatedResumeAnalyzer {
    latency: Latency,
}

#[async_trait]
impl ResumeAnalyzer for SimulatedResumeAnalyzer {
    async fn analyze(&self, resume: &ResumeDocument) -> Result<ResumeAnalysis, AnalyzerError> {
        self.latency.pause(1500).await;
        if resume.name.trim().is_empty() {
            return Err(AnalyzerError::Rejected("resume has no file name".to_string()));
        }

        let match_score = rand::rng().random_range(75..95);
        Ok(ResumeAnalysis {
            match_score,
            strengths: strings(&[
                "Strong technical skills in required technologies",
                "Relevant project experience",
                "Good educational background",
            ]),
            improvements: strings(&[
                "Add more quantifiable achievements",
                "Include deployment experience",
                "Highlight leadership roles",
            ]),
            extracted_skills: sample_skills(),
            extracted_experience: sample_experience(),
            extracted_education: sample_education(),
            match_explanation: "Your resume shows strong alignment with the technical requirements. \
                Key strengths include relevant programming skills and project experience."
                .to_string(),
        })
    }
}

pub(crate) struct SimulatedBehaviouralAnalyzer {
    latency: Latency,
}

#[async_trait]
impl BehaviouralAnalyzer for SimulatedBehaviouralAnalyzer {
    async fn score(&self, _answers: &[String]) -> Result<BehaviouralAssessment, AnalyzerError> {
        self.latency.pause(1000).await;
        let mut rng = rand::rng();
        Ok(BehaviouralAssessment {
            score: rng.random_range(75..90),
            insights: "Clear and structured responses, Shows problem-solving mindset, \
                Demonstrates teamwork abilities"
                .to_string(),
            personality: Some(random_traits(&mut rng)),
        })
    }
}

pub(crate) struct CannedQuestionGenerator {
    latency: Latency,
}

#[async_trait]
impl QuestionGenerator for CannedQuestionGenerator {
    async fn generate(&self, _job_description: &str) -> Result<Vec<String>, AnalyzerError> {
        self.latency.pause(1000).await;
        Ok(strings(&[
            "Tell us about a challenging situation you handled at work.",
            "How do you handle pressure and tight deadlines?",
            "Describe a failure and what you learned from it.",
        ]))
    }
}

pub(crate) fn simulated_collaborators(latency: Latency) -> AiCollaborators {
    AiCollaborators::new(
        Arc::new(SimulatedResumeAnalyzer { latency }),
        Arc::new(SimulatedBehaviouralAnalyzer { latency }),
        Arc::new(CannedQuestionGenerator { latency }),
    )
}

fn random_traits(rng: &mut impl Rng) -> PersonalityTraits {
    PersonalityTraits {
        openness: rng.random_range(60..90),
        conscientiousness: rng.random_range(60..90),
        extraversion: rng.random_range(50..90),
        agreeableness: rng.random_range(60..90),
        neuroticism: rng.random_range(20..60),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn skill(name: &str, relevance: u8, category: SkillCategory) -> ExtractedSkill {
    ExtractedSkill {
        name: name.to_string(),
        relevance,
        category,
    }
}

fn sample_skills() -> Vec<ExtractedSkill> {
    vec![
        skill("Python", 95, SkillCategory::Technical),
        skill("Machine Learning", 90, SkillCategory::Technical),
        skill("SQL", 85, SkillCategory::Technical),
        skill("TensorFlow", 80, SkillCategory::Technical),
        skill("Communication", 75, SkillCategory::Soft),
        skill("Problem Solving", 88, SkillCategory::Soft),
        skill("Data Analysis", 92, SkillCategory::Domain),
    ]
}

fn experience(company: &str, role: &str, duration: &str, highlights: &[&str]) -> ExtractedExperience {
    ExtractedExperience {
        company: company.to_string(),
        role: role.to_string(),
        duration: duration.to_string(),
        highlights: strings(highlights),
    }
}

fn sample_experience() -> Vec<ExtractedExperience> {
    vec![
        experience(
            "Tech Solutions Inc.",
            "ML Engineer",
            "2 years",
            &["Built recommendation engine", "Improved model accuracy by 25%"],
        ),
        experience(
            "DataCorp",
            "Data Analyst",
            "1.5 years",
            &["Analyzed customer behavior", "Created dashboards"],
        ),
    ]
}

fn education(institution: &str, degree: &str, field: &str, year: &str) -> ExtractedEducation {
    ExtractedEducation {
        institution: institution.to_string(),
        degree: degree.to_string(),
        field: field.to_string(),
        year: year.to_string(),
    }
}

fn sample_education() -> Vec<ExtractedEducation> {
    vec![
        education("Stanford University", "M.S.", "Computer Science", "2022"),
        education("UC Berkeley", "B.S.", "Data Science", "2020"),
    ]
}

struct SeedApplicant {
    id: &'static str,
    user_id: &'static str,
    name: &'static str,
    applied_at: (u32, u32, u32, u32),
    resume: &'static str,
    scores: (u8, u8, u8),
    insights: (&'static str, &'static str),
    decided: Option<ApplicantStatus>,
    traits: PersonalityTraits,
    skills: Vec<ExtractedSkill>,
    experience: Vec<ExtractedExperience>,
    education: Vec<ExtractedEducation>,
    explanation: &'static str,
}

impl SeedApplicant {
    fn into_applicant(self) -> Applicant {
        let (month, day, hour, minute) = self.applied_at;
        let applied_at = Utc
            .with_ymd_and_hms(2026, month, day, hour, minute, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let (resume_score, behaviour_score, fit_score) = self.scores;
        Applicant {
            id: ApplicantId(self.id.to_string()),
            user_id: UserId(self.user_id.to_string()),
            name: self.name.to_string(),
            applied_at,
            resume: ResumeDocument {
                name: self.resume.to_string(),
                url: "#".to_string(),
            },
            resume_score,
            behaviour_score,
            fit_score: Some(fit_score),
            resume_insights: self.insights.0.to_string(),
            behaviour_insights: self.insights.1.to_string(),
            status: self.decided.unwrap_or(ApplicantStatus::UnderReview),
            locked: self.decided.is_some(),
            behavioural_answers: Vec::new(),
            personality_traits: Some(self.traits),
            extracted_skills: self.skills,
            extracted_experience: self.experience,
            extracted_education: self.education,
            match_explanation: Some(self.explanation.to_string()),
        }
    }
}

struct SeedJob {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    description: &'static str,
    deadline: (i32, u32, u32),
    created_at: (i32, u32, u32),
    questions: [&'static str; 3],
    weights: (u32, u32),
    skills: &'static [&'static str],
    applicants: Vec<SeedApplicant>,
}

impl SeedJob {
    fn into_job(self) -> Job {
        Job {
            id: JobId(self.id.to_string()),
            title: self.title.to_string(),
            company: self.company.to_string(),
            description: self.description.to_string(),
            deadline: seed_date(self.deadline),
            questions: strings(&self.questions),
            weights: JobWeights {
                resume: self.weights.0,
                behaviour: self.weights.1,
            },
            required_skills: strings(self.skills),
            applicants: self
                .applicants
                .into_iter()
                .map(SeedApplicant::into_applicant)
                .collect(),
            created_at: seed_date(self.created_at),
            created_by: UserId("recruiter-demo".to_string()),
        }
    }
}

fn seed_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn traits(o: u8, c: u8, e: u8, a: u8, n: u8) -> PersonalityTraits {
    PersonalityTraits {
        openness: o,
        conscientiousness: c,
        extraversion: e,
        agreeableness: a,
        neuroticism: n,
    }
}

/// Sample postings used by the demo and a fresh server, newest first.
pub(crate) fn seed_jobs() -> Vec<Job> {
    let jobs = vec![
        SeedJob {
            id: "seed-job-3",
            title: "Data Scientist",
            company: "Analytics Pro",
            description: "Analyze large datasets to derive actionable insights. Build predictive \
                models and create data visualizations for stakeholders.",
            deadline: (2026, 5, 10),
            created_at: (2026, 1, 3),
            questions: [
                "Walk us through your data analysis workflow.",
                "How do you communicate complex findings to non-technical stakeholders?",
                "Describe a time when your analysis led to a significant business decision.",
            ],
            weights: (45, 25),
            skills: &["Python", "R", "SQL", "Tableau", "Statistics", "Machine Learning"],
            applicants: vec![SeedApplicant {
                id: "seed-applicant-3",
                user_id: "u5",
                name: "Charlie Davis",
                applied_at: (1, 4, 9, 0),
                resume: "charlie_resume.pdf",
                scores: (91, 85, 88),
                insights: (
                    "PhD in Statistics, extensive industry experience",
                    "Excellent presentation skills, strategic thinker",
                ),
                decided: Some(ApplicantStatus::Shortlisted),
                traits: traits(85, 90, 70, 80, 30),
                skills: vec![
                    skill("Python", 95, SkillCategory::Technical),
                    skill("R", 90, SkillCategory::Technical),
                    skill("Statistics", 95, SkillCategory::Domain),
                    skill("Tableau", 85, SkillCategory::Technical),
                ],
                experience: vec![experience(
                    "Big Data Inc.",
                    "Senior Data Scientist",
                    "4 years",
                    &["Led analytics team", "Reduced churn by 15%"],
                )],
                education: vec![education("Harvard", "Ph.D.", "Statistics", "2019")],
                explanation: "Exceptional match with PhD credentials and proven industry impact \
                    in data science.",
            }],
        },
        SeedJob {
            id: "seed-job-2",
            title: "Full Stack Developer",
            company: "StartupXYZ",
            description: "Build and maintain web applications using React, Node.js, and \
                PostgreSQL. Work in an agile environment with cross-functional teams.",
            deadline: (2026, 4, 28),
            created_at: (2026, 1, 2),
            questions: [
                "What is your approach to writing clean, maintainable code?",
                "Describe a time you had to learn a new technology quickly.",
                "How do you handle disagreements with team members?",
            ],
            weights: (40, 30),
            skills: &["React", "Node.js", "PostgreSQL", "TypeScript", "REST APIs"],
            applicants: Vec::new(),
        },
        SeedJob {
            id: "seed-job-1",
            title: "AI Engineer",
            company: "TechCorp AI",
            description: "Work on machine learning models, NLP pipelines, and AI-driven \
                applications. You will be responsible for developing cutting-edge AI solutions.",
            deadline: (2026, 4, 15),
            created_at: (2026, 1, 1),
            questions: [
                "Describe a challenging ML project you worked on.",
                "How do you evaluate model performance?",
                "How do you handle noisy or incomplete data?",
            ],
            weights: (50, 20),
            skills: &["Python", "Machine Learning", "TensorFlow", "NLP", "Deep Learning"],
            applicants: vec![
                SeedApplicant {
                    id: "seed-applicant-1",
                    user_id: "u3",
                    name: "Alice Johnson",
                    applied_at: (1, 2, 10, 30),
                    resume: "alice_resume.pdf",
                    scores: (88, 82, 85),
                    insights: (
                        "Strong ML background, excellent Python skills, published research",
                        "Shows leadership qualities, clear communication",
                    ),
                    decided: None,
                    traits: traits(82, 78, 64, 75, 34),
                    skills: sample_skills(),
                    experience: sample_experience(),
                    education: sample_education(),
                    explanation: "Strong match due to ML expertise and relevant project \
                        experience in NLP systems.",
                },
                SeedApplicant {
                    id: "seed-applicant-2",
                    user_id: "u4",
                    name: "Bob Smith",
                    applied_at: (1, 3, 14, 15),
                    resume: "bob_cv.docx",
                    scores: (72, 78, 75),
                    insights: (
                        "Good technical skills, needs more deployment experience",
                        "Team player, adaptable to change",
                    ),
                    decided: None,
                    traits: traits(70, 68, 72, 81, 41),
                    skills: vec![
                        skill("Python", 80, SkillCategory::Technical),
                        skill("Deep Learning", 70, SkillCategory::Technical),
                        skill("SQL", 65, SkillCategory::Technical),
                    ],
                    experience: vec![experience(
                        "StartupAI",
                        "Junior ML Developer",
                        "1 year",
                        &["Image classification"],
                    )],
                    education: vec![education("MIT", "B.S.", "Computer Science", "2023")],
                    explanation: "Good foundational skills but lacks production experience \
                        mentioned in job requirements.",
                },
            ],
        },
    ];

    jobs.into_iter().map(SeedJob::into_job).collect()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
