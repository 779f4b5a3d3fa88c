use serde::Serialize;

use super::columns::{total_count, PipelineColumn};
use super::domain::{Candidate, PipelineStage};

#[derive(Debug, Clone, Serialize)]
pub struct StageCountEntry {
    pub stage: PipelineStage,
    pub stage_label: &'static str,
    pub count: usize,
}

/// Header statistics for the candidates page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub total_candidates: usize,
    pub in_progress_count: usize,
    pub hired_count: usize,
    pub conversion_rate: u32,
}

impl PipelineSummary {
    pub fn from_columns(columns: &[PipelineColumn]) -> Self {
        let total_candidates = total_count(columns);
        let hired_count = hired_count(columns);
        Self {
            total_candidates,
            in_progress_count: in_progress_count(columns),
            hired_count,
            conversion_rate: conversion_rate(hired_count, total_candidates),
        }
    }
}

pub fn in_progress_count(columns: &[PipelineColumn]) -> usize {
    columns
        .iter()
        .filter(|column| !column.id.is_terminal())
        .map(|column| column.count)
        .sum()
}

pub fn hired_count(columns: &[PipelineColumn]) -> usize {
    columns
        .iter()
        .find(|column| column.id == PipelineStage::Hired)
        .map_or(0, |column| column.count)
}

/// Whole-number hire percentage; zero when the board is empty.
pub fn conversion_rate(hired: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((hired as f64 / total as f64) * 100.0).round() as u32
}

/// Flatten columns into the list view: stage order first, then insertion order.
pub fn all_filtered_candidates(columns: &[PipelineColumn]) -> Vec<Candidate> {
    columns
        .iter()
        .flat_map(|column| column.candidates.iter().cloned())
        .collect()
}

pub fn stage_breakdown(columns: &[PipelineColumn]) -> Vec<StageCountEntry> {
    PipelineStage::ordered()
        .into_iter()
        .map(|stage| StageCountEntry {
            stage,
            stage_label: stage.label(),
            count: columns
                .iter()
                .find(|column| column.id == stage)
                .map_or(0, |column| column.count),
        })
        .collect()
}
