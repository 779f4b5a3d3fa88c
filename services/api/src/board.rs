use crate::infra::{parse_score_filter, seeded_service};
use clap::Args;
use hireflow::error::AppError;
use hireflow::pipeline::{
    all_filtered_candidates, ColumnFilter, FilteredBoard, PipelineSummary, ScoreFilter,
    TracingNotifications,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub(crate) struct BoardArgs {
    /// Case-insensitive search over name, position, and e-mail
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Score bucket: all, high (85+), medium (70-84), low (<70)
    #[arg(long, value_parser = parse_score_filter)]
    pub(crate) score: Option<ScoreFilter>,
    /// Print the flat list view instead of columns
    #[arg(long)]
    pub(crate) list: bool,
}

pub(crate) fn run_board(args: BoardArgs) -> Result<(), AppError> {
    let BoardArgs { query, score, list } = args;
    let service = seeded_service(Duration::ZERO, Arc::new(TracingNotifications));
    let filter = ColumnFilter::new(query.unwrap_or_default(), score.unwrap_or_default());

    let board = service.columns(&filter)?;
    let summary = service.summary()?;
    render_summary(&summary);
    if list {
        render_list(&board);
    } else {
        render_columns(&board);
    }
    Ok(())
}

pub(crate) fn render_summary(summary: &PipelineSummary) {
    println!("Candidate pipeline");
    println!(
        "Total {} | In progress {} | Hired {} | Conversion {}%",
        summary.total_candidates,
        summary.in_progress_count,
        summary.hired_count,
        summary.conversion_rate
    );
}

pub(crate) fn render_columns(board: &FilteredBoard) {
    if board.has_active_filters {
        println!(
            "\nShowing {} of {} candidates",
            board.filtered_total, board.total_candidates
        );
    }

    for column in &board.columns {
        println!("\n{} ({})", column.title, column.count);
        for candidate in &column.candidates {
            let score = match candidate.ai_score {
                Some(score) => format!("{score}"),
                None => "-".to_string(),
            };
            println!(
                "- [{}] {} | {} | score {}",
                candidate.id, candidate.full_name, candidate.applied_position, score
            );
        }
    }
}

fn render_list(board: &FilteredBoard) {
    let candidates = all_filtered_candidates(&board.columns);
    if candidates.is_empty() {
        println!("\nNo candidates match the current filters");
        return;
    }

    println!();
    for candidate in candidates {
        println!(
            "- {} | {} | {} | applied {}",
            candidate.full_name,
            candidate.applied_position,
            candidate.stage.label(),
            candidate.applied_date.format("%Y-%m-%d")
        );
    }
}
