use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::api_client::HttpTransport;
use screener::config::Config;
use screener::models::{NewJob, ResumeUpload};
use screener::repositories::ScreenerApi;
use screener::view::{
    Notification, NotificationLevel, RefreshController, RefreshOutcome, RenderedView, Section,
    ViewSlot,
};

#[derive(Parser)]
#[command(about = "talent screening console: jobs, resumes and candidate rankings")]
struct Cmd {
    #[command(subcommand)]
    command: SubCommandType,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Totals, average relevancy and recent activity
    Dashboard,
    /// Job openings
    Jobs,
    /// Uploaded resumes
    Resumes,
    /// Ranked candidates for a job (job selector when no job is given)
    Rankings {
        #[arg(long)]
        job: Option<i64>,
    },
    /// Create a job opening
    CreateJob {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Comma-separated
        #[arg(long)]
        required_skills: String,
        #[arg(long)]
        preferred_skills: Option<String>,
        #[arg(long, default_value_t = 0)]
        min_experience: u32,
        #[arg(long)]
        education_level: Option<String>,
        #[arg(long)]
        job_type: Option<String>,
    },
    /// Upload a resume file (pdf, docx, doc)
    Upload {
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    /// Ask the server to (re)parse an uploaded resume
    Parse { resume_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cmd::parse();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the rendered view.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Screener v{} against {} ({:?} ranking fan-out)",
        env!("CARGO_PKG_VERSION"),
        config.api_url,
        config.fan_out
    );

    let transport = HttpTransport::new(config.api_url.clone(), config.timeout)
        .context("Failed to build HTTP client")?;
    let api = ScreenerApi::new(Arc::new(transport));
    let (controller, mut notifications) = RefreshController::new(api, config.fan_out);

    let result = run(&controller, args.command).await;
    drain_notifications(&mut notifications);
    result
}

async fn run(controller: &RefreshController, command: SubCommandType) -> Result<()> {
    match command {
        SubCommandType::Dashboard => show_section(controller, Section::Dashboard).await,
        SubCommandType::Jobs => show_section(controller, Section::Jobs).await,
        SubCommandType::Resumes => show_section(controller, Section::Resumes).await,
        SubCommandType::Rankings { job: None } => {
            show_section(controller, Section::Rankings).await?;
            controller.show_rankings(None).await;
            print_slot(controller, ViewSlot::RankingList)
        }
        SubCommandType::Rankings { job: Some(id) } => {
            if controller.show_rankings(Some(id)).await == RefreshOutcome::Failed {
                bail!("Failed to load rankings for job {id}");
            }
            print_slot(controller, ViewSlot::RankingList)
        }
        SubCommandType::CreateJob {
            title,
            description,
            required_skills,
            preferred_skills,
            min_experience,
            education_level,
            job_type,
        } => {
            let job = controller
                .create_job(NewJob {
                    title,
                    description,
                    required_skills,
                    preferred_skills,
                    min_experience_years: min_experience,
                    education_level,
                    job_type,
                })
                .await?;
            info!("Created job {}", job.id);
            print_slot(controller, ViewSlot::Jobs)
        }
        SubCommandType::Upload { path, name } => {
            let upload = ResumeUpload::from_path(&path)
                .await
                .with_context(|| format!("Cannot upload {}", path.display()))?
                .with_candidate_name(name);
            let resume = controller.upload_resume(upload).await?;
            info!("Uploaded resume {}", resume.id);
            print_slot(controller, ViewSlot::Resumes)
        }
        SubCommandType::Parse { resume_id } => {
            controller.parse_resume(resume_id).await?;
            print_slot(controller, ViewSlot::Resumes)
        }
    }
}

async fn show_section(controller: &RefreshController, section: Section) -> Result<()> {
    if controller.refresh(section).await == RefreshOutcome::Failed {
        bail!("Failed to load {section:?}");
    }
    print_slot(controller, section.slot())
}

fn print_slot(controller: &RefreshController, slot: ViewSlot) -> Result<()> {
    match controller.view(slot) {
        Some(view) => print_view(&view),
        None => {
            info!("{slot:?} has nothing to show");
            Ok(())
        }
    }
}

fn print_view(view: &RenderedView) -> Result<()> {
    let json = serde_json::to_string_pretty(view).context("Failed to serialize view")?;
    println!("{json}");
    Ok(())
}

fn drain_notifications(rx: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        match notification.level {
            NotificationLevel::Success => info!("{}", notification.message),
            NotificationLevel::Error => error!("{}", notification.message),
        }
    }
}
