//! Simulated CV intake. The dashboard has no storage backend, so an upload is a fixed delay
//! followed by a new candidate entering the `APPLIED` column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

use super::domain::{Candidate, CandidateId};

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub file_name: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub applied_position: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl UploadRequest {
    pub fn validate(&self) -> Result<(), UploadError> {
        let file_name = self.file_name.trim();
        if file_name.is_empty() {
            return Err(UploadError::EmptyFileName);
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedFileType {
                file_name: file_name.to_string(),
            });
        }

        if self.full_name.trim().is_empty() {
            return Err(UploadError::MissingField { field: "full_name" });
        }
        if self.applied_position.trim().is_empty() {
            return Err(UploadError::MissingField {
                field: "applied_position",
            });
        }
        Ok(())
    }

    fn into_candidate(self, applied_date: DateTime<Utc>) -> Candidate {
        let mut candidate = Candidate::applied(
            next_candidate_id(),
            self.full_name.trim(),
            self.applied_position.trim(),
            applied_date,
        )
        .with_skills(self.skills);
        candidate.email = self.email.filter(|email| !email.trim().is_empty());
        candidate.phone = self.phone.filter(|phone| !phone.trim().is_empty());
        candidate.cv_file_name = Some(self.file_name.trim().to_string());
        candidate
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("an upload is already in progress")]
    InFlight,
    #[error("no CV file selected")]
    EmptyFileName,
    #[error("unsupported CV file '{file_name}' (accepted: pdf, doc, docx)")]
    UnsupportedFileType { file_name: String },
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },
}

/// Admits one upload at a time. Re-submission is refused while an upload is in flight.
#[derive(Debug)]
pub struct UploadGate {
    latency: Duration,
    in_flight: AtomicBool,
}

struct InFlightPermit<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightPermit<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl UploadGate {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<InFlightPermit<'_>, UploadError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| UploadError::InFlight)?;
        Ok(InFlightPermit {
            flag: &self.in_flight,
        })
    }

    /// Validate, wait out the simulated latency, and return the new `APPLIED` candidate.
    ///
    /// The gate is released when the call finishes or its future is dropped.
    pub async fn submit(
        &self,
        request: UploadRequest,
        applied_date: DateTime<Utc>,
    ) -> Result<Candidate, UploadError> {
        request.validate()?;
        let _permit = self.acquire()?;

        tokio::time::sleep(self.latency).await;

        let candidate = request.into_candidate(applied_date);
        info!(
            candidate_id = %candidate.id,
            file = candidate.cv_file_name.as_deref().unwrap_or_default(),
            "cv upload accepted"
        );
        Ok(candidate)
    }
}
