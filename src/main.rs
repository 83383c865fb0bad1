use nlchat::adapters::{EnvToken, ReqwestHttpClient};
use nlchat::config::SessionConfig;
use nlchat::render::RenderCursor;
use nlchat::session::{Session, SessionState};

use color_eyre::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the conversation as it changes.
///
/// Bot text is written to stdout as it streams in, status updates and
/// errors go to stderr.
fn spawn_renderer(mut rx: watch::Receiver<SessionState>) -> JoinHandle<std::io::Result<()>> {
    tokio::spawn(async move {
        let mut cursor = RenderCursor::starting_at(&rx.borrow_and_update());

        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            let update = cursor.render_delta(&state);

            for notice in &update.notices {
                eprintln!("{}", notice);
            }
            if !update.text.is_empty() {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(update.text.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok::<(), std::io::Error>(())
    })
}

fn print_help() {
    eprintln!("nlchat {}", VERSION);
    eprintln!("Type a question and press enter.");
    eprintln!("  /reset  cancel the current answer and start a new thread");
    eprintln!("  /quit   exit");
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nlchat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SessionConfig::from_env();
    tracing::info!(endpoint = %config.endpoint_url(), "starting nlchat {}", VERSION);

    let session = Session::new(ReqwestHttpClient::new(), EnvToken, config);
    let renderer = spawn_renderer(session.subscribe());
    let mut in_flight: Option<JoinHandle<()>> = None;

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/reset" => {
                session.reset();
                eprintln!("[new conversation]");
            }
            query => {
                // A new query supersedes whatever is still streaming
                let session = session.clone();
                let query = query.to_string();
                in_flight = Some(tokio::spawn(async move {
                    session.send_message(query).await;
                }));
            }
        }
    }

    session.reset();
    if let Some(task) = in_flight {
        if let Err(e) = task.await {
            tracing::warn!("request task ended abnormally: {}", e);
        }
    }
    if renderer.is_finished() {
        match renderer.await {
            Ok(Err(e)) => tracing::warn!("stopped printing output: {}", e),
            Ok(Ok(())) | Err(_) => {}
        }
    } else {
        renderer.abort();
    }
    Ok(())
}
