use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use sfbos_scraper::browser::Session;
use sfbos_scraper::{calendar, pipeline};

const CALENDAR_URL: &str = "https://sfbos.org/events/calendar/past?field_event_category_tid=54";
const DOC_KIND: &str = "Agenda";

#[derive(Parser)]
#[command(
    name = "sfbos_scraper",
    about = "Downloads SF Board of Supervisors meeting agendas as HTML"
)]
struct Cli {
    /// Root of the date-organized output tree
    #[arg(long, default_value = "San_Fran_Board_of_Supervisors_File")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let session = Session::launch().await?;
    // Run the whole pipeline, then tear the browser down on every path.
    let result = run(&session, &cli.output_dir).await;
    session.close().await;

    if result.is_ok() {
        info!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    }
    result
}

async fn run(session: &Session, output_dir: &Path) -> Result<()> {
    // Only the initial load is fatal; everything after is record-isolated.
    session.goto(CALENDAR_URL).await?;

    let events = calendar::collect_events(session).await;
    let events = calendar::filter_in_scope(events);
    info!("{} in-scope meetings", events.len());

    let client = reqwest::Client::new();
    let pb = ProgressBar::new(events.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut saved = 0usize;
    let mut failed = 0usize;
    for event in &events {
        match pipeline::process_event(&client, output_dir, event, DOC_KIND).await {
            Ok(()) => saved += 1,
            Err(e) => {
                failed += 1;
                warn!("{}: {e}", event.event);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "Processed {} meetings: {} saved, {} failed",
        events.len(),
        saved,
        failed
    );
    Ok(())
}
