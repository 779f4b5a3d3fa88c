//! Mock data provider backing the dashboard until a real intake source exists.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::domain::{Candidate, CandidateId, PipelineStage};
use super::jobs::{EmploymentType, JobPosting, JobStatus};

struct SeedCandidate {
    id: &'static str,
    name: &'static str,
    email: Option<&'static str>,
    phone: Option<&'static str>,
    position: &'static str,
    days_ago: i64,
    stage: PipelineStage,
    score: Option<u8>,
    skills: &'static [&'static str],
}

const CANDIDATES: &[SeedCandidate] = &[
    SeedCandidate {
        id: "1",
        name: "Sarah Johnson",
        email: Some("sarah.johnson@email.com"),
        phone: Some("+1 (555) 123-4567"),
        position: "Senior Frontend Developer",
        days_ago: 2,
        stage: PipelineStage::Applied,
        score: Some(92),
        skills: &["React", "TypeScript", "Tailwind CSS"],
    },
    SeedCandidate {
        id: "2",
        name: "Michael Chen",
        email: Some("michael.chen@email.com"),
        phone: None,
        position: "Backend Engineer",
        days_ago: 3,
        stage: PipelineStage::Applied,
        score: Some(78),
        skills: &["Rust", "PostgreSQL", "Kubernetes"],
    },
    SeedCandidate {
        id: "3",
        name: "Emily Rodriguez",
        email: Some("emily.r@email.com"),
        phone: Some("+1 (555) 987-6543"),
        position: "Product Designer",
        days_ago: 5,
        stage: PipelineStage::Screening,
        score: Some(88),
        skills: &["Figma", "User Research", "Prototyping"],
    },
    SeedCandidate {
        id: "4",
        name: "David Kim",
        email: None,
        phone: None,
        position: "DevOps Engineer",
        days_ago: 6,
        stage: PipelineStage::Screening,
        score: None,
        skills: &["Terraform", "AWS"],
    },
    SeedCandidate {
        id: "5",
        name: "Jessica Williams",
        email: Some("jess.williams@email.com"),
        phone: None,
        position: "Frontend Developer",
        days_ago: 9,
        stage: PipelineStage::Interview,
        score: Some(81),
        skills: &["Vue", "JavaScript", "CSS"],
    },
    SeedCandidate {
        id: "6",
        name: "Robert Taylor",
        email: Some("r.taylor@email.com"),
        phone: Some("+1 (555) 246-8101"),
        position: "Data Scientist",
        days_ago: 12,
        stage: PipelineStage::Offer,
        score: Some(95),
        skills: &["Python", "PyTorch", "SQL"],
    },
    SeedCandidate {
        id: "7",
        name: "Amanda Martinez",
        email: Some("amanda.m@email.com"),
        phone: None,
        position: "Marketing Manager",
        days_ago: 20,
        stage: PipelineStage::Hired,
        score: Some(87),
        skills: &["SEO", "Content Strategy"],
    },
    SeedCandidate {
        id: "8",
        name: "James Anderson",
        email: Some("j.anderson@email.com"),
        phone: None,
        position: "Backend Engineer",
        days_ago: 15,
        stage: PipelineStage::Rejected,
        score: Some(54),
        skills: &["Java", "Spring"],
    },
];

/// Candidates spread across every stage, with a mix of scored and unscored records.
pub fn demo_candidates(now: DateTime<Utc>) -> Vec<Candidate> {
    CANDIDATES
        .iter()
        .map(|seed| {
            let mut candidate = Candidate::applied(
                CandidateId::new(seed.id),
                seed.name,
                seed.position,
                now - Duration::days(seed.days_ago),
            )
            .with_stage(seed.stage)
            .with_skills(seed.skills.iter().copied());
            candidate.email = seed.email.map(str::to_string);
            candidate.phone = seed.phone.map(str::to_string);
            candidate.ai_score = seed.score;
            candidate
        })
        .collect()
}

pub fn demo_jobs(today: NaiveDate) -> Vec<JobPosting> {
    let job = |id: &str,
               title: &str,
               department: &str,
               location: &str,
               employment_type: EmploymentType,
               status: JobStatus,
               days_ago: i64,
               applicants: u32| JobPosting {
        id: id.to_string(),
        title: title.to_string(),
        department: department.to_string(),
        location: location.to_string(),
        employment_type,
        status,
        posted_on: today - Duration::days(days_ago),
        applicants,
    };

    vec![
        job(
            "job-1",
            "Senior Frontend Developer",
            "Engineering",
            "San Francisco, CA",
            EmploymentType::FullTime,
            JobStatus::Open,
            7,
            45,
        ),
        job(
            "job-2",
            "Backend Engineer",
            "Engineering",
            "Remote",
            EmploymentType::FullTime,
            JobStatus::Open,
            14,
            38,
        ),
        job(
            "job-3",
            "Product Designer",
            "Design",
            "New York, NY",
            EmploymentType::FullTime,
            JobStatus::Open,
            3,
            22,
        ),
        job(
            "job-4",
            "Data Scientist",
            "Data",
            "Remote",
            EmploymentType::Contract,
            JobStatus::Paused,
            30,
            17,
        ),
        job(
            "job-5",
            "Marketing Manager",
            "Marketing",
            "Austin, TX",
            EmploymentType::FullTime,
            JobStatus::Closed,
            60,
            64,
        ),
        job(
            "job-6",
            "Engineering Intern",
            "Engineering",
            "Remote",
            EmploymentType::Internship,
            JobStatus::Open,
            1,
            9,
        ),
    ]
}
