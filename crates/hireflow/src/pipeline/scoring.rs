use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::domain::Candidate;

/// Per-dimension view of a candidate's match score, shown on the candidate detail panel.
///
/// Presentation data only: the board never reads it and the overall score stays externally
/// supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills_match: u8,
    pub experience: u8,
    pub education: u8,
    pub culture_fit: u8,
}

impl ScoreBreakdown {
    pub const SPREAD: i16 = 10;

    /// Placeholder breakdown scattered within `SPREAD` points of `score`.
    pub fn around<R: Rng + ?Sized>(score: u8, rng: &mut R) -> Self {
        let mut component = || {
            let offset = rng.gen_range(-Self::SPREAD..=Self::SPREAD);
            (i16::from(score.min(100)) + offset).clamp(0, 100) as u8
        };
        Self {
            skills_match: component(),
            experience: component(),
            education: component(),
            culture_fit: component(),
        }
    }

    /// Breakdown seeded from the candidate id, so the detail panel shows the same numbers on
    /// every visit. `None` when the candidate has no score.
    pub fn for_candidate(candidate: &Candidate) -> Option<Self> {
        let score = candidate.ai_score?;
        let seed = candidate
            .id
            .as_str()
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
            });
        Some(Self::around(score, &mut StdRng::seed_from_u64(seed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::{CandidateId, PipelineStage};
    use chrono::Utc;

    #[test]
    fn seeded_breakdowns_are_reproducible() {
        let first = ScoreBreakdown::around(80, &mut StdRng::seed_from_u64(7));
        let second = ScoreBreakdown::around(80, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn components_stay_near_score_and_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for score in [0_u8, 5, 50, 97, 100] {
            let breakdown = ScoreBreakdown::around(score, &mut rng);
            let components = [
                breakdown.skills_match,
                breakdown.experience,
                breakdown.education,
                breakdown.culture_fit,
            ];
            for value in components {
                assert!(value <= 100);
                assert!((i16::from(value) - i16::from(score)).abs() <= ScoreBreakdown::SPREAD);
            }
        }
    }

    #[test]
    fn candidate_breakdown_is_stable_and_requires_score() {
        let unscored = Candidate::applied(CandidateId::new("c-1"), "Lin", "QA", Utc::now())
            .with_stage(PipelineStage::Interview);
        assert!(ScoreBreakdown::for_candidate(&unscored).is_none());

        let scored = unscored.with_ai_score(77);
        assert_eq!(
            ScoreBreakdown::for_candidate(&scored),
            ScoreBreakdown::for_candidate(&scored)
        );
    }
}
