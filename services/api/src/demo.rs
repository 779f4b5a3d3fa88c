use crate::board::{render_columns, render_summary};
use crate::infra::seeded_service;
use clap::Args;
use hireflow::error::AppError;
use hireflow::pipeline::session::{MemorySessionStore, SessionContext, SessionError, SessionUser};
use hireflow::pipeline::{
    CandidateId, ColumnFilter, DragEvent, InMemoryNotifications, NotificationSink,
    PipelineService, PipelineStage, UploadRequest,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Simulated upload latency in milliseconds
    #[arg(long, default_value_t = 300)]
    pub(crate) upload_delay_ms: u64,
    /// Skip the CV upload portion of the demo
    #[arg(long)]
    pub(crate) skip_upload: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let notifications = Arc::new(InMemoryNotifications::default());
    let service = seeded_service(
        Duration::from_millis(args.upload_delay_ms),
        notifications.clone(),
    );

    let mut session = SessionContext::rehydrate(Arc::new(MemorySessionStore::default()))
        .map_err(session_error)?;
    session
        .login(SessionUser {
            id: "recruiter-1".to_string(),
            name: "Demo Recruiter".to_string(),
            email: "recruiter@hireflow.dev".to_string(),
            company: None,
        })
        .map_err(session_error)?;
    if let Some(user) = session.user() {
        println!("Signed in as {} <{}>", user.name, user.email);
    }

    println!("=== Starting board ===");
    render_summary(&service.summary()?);

    println!("\n=== Drag and drop ===");
    let gestures = [
        ("1", Some(PipelineStage::Screening)),
        ("3", Some(PipelineStage::Interview)),
        ("6", Some(PipelineStage::Hired)),
        ("2", None),
        ("5", Some(PipelineStage::Interview)),
    ];
    for (candidate_id, target) in gestures {
        run_gesture(&service, candidate_id, target)?;
    }

    if !args.skip_upload {
        println!("\n=== CV upload ===");
        let candidate = service
            .upload(UploadRequest {
                file_name: "alex_morgan_cv.pdf".to_string(),
                full_name: "Alex Morgan".to_string(),
                email: Some("alex.morgan@email.com".to_string()),
                phone: None,
                applied_position: "Site Reliability Engineer".to_string(),
                skills: vec!["Linux".to_string(), "Prometheus".to_string()],
            })
            .await?;
        println!(
            "Uploaded {} for {} -> {}",
            candidate.cv_file_name.as_deref().unwrap_or_default(),
            candidate.full_name,
            candidate.stage.label()
        );
    }

    println!("\n=== Notifications ===");
    for notice in notifications.events() {
        println!("- {}", notice.message());
    }

    println!("\n=== Final board ===");
    render_summary(&service.summary()?);
    render_columns(&service.columns(&ColumnFilter::default())?);

    session.logout().map_err(session_error)?;
    println!("\nSigned out");
    Ok(())
}

fn session_error(err: SessionError) -> AppError {
    AppError::State(err.to_string())
}

fn run_gesture<N>(
    service: &PipelineService<N>,
    candidate_id: &str,
    target: Option<PipelineStage>,
) -> Result<(), AppError>
where
    N: NotificationSink + 'static,
{
    service.handle_drag(DragEvent::Start {
        candidate_id: CandidateId::new(candidate_id),
    })?;
    service.handle_drag(DragEvent::Over { target })?;
    let notice = service.handle_drag(DragEvent::End { target })?;

    match (target, notice) {
        (_, Some(notice)) => println!("- {}", notice.message()),
        (Some(stage), None) => println!(
            "- candidate {candidate_id} already in {}, nothing to do",
            stage.label()
        ),
        (None, None) => println!("- candidate {candidate_id} dropped outside the board"),
    }
    Ok(())
}
