use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Paused,
    Closed,
}

impl FromStr for JobStatus {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "paused" => Ok(Self::Paused),
            "closed" => Ok(Self::Closed),
            _ => Err(PipelineError::InvalidJobStatus {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

/// Advertised role candidates apply against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub status: JobStatus,
    pub posted_on: NaiveDate,
    pub applicants: u32,
}

/// Case-insensitive search over title, department, and location, optionally narrowed by status.
pub fn filter_jobs(jobs: &[JobPosting], query: &str, status: Option<JobStatus>) -> Vec<JobPosting> {
    let needle = query.trim().to_lowercase();
    jobs.iter()
        .filter(|job| status.map_or(true, |status| job.status == status))
        .filter(|job| {
            needle.is_empty()
                || [&job.title, &job.department, &job.location]
                    .into_iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
