use copilot_inbox::config::env_parse;
use copilot_inbox::{InboxEvent, repl, spawn_inbox_from_env};
use tokio::io::BufReader;
use tokio::sync::{broadcast, watch};

const DEFAULT_INITIAL_WIDTH_PX: u32 = 1280;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let initial_width = env_parse("INBOX_INITIAL_WIDTH", DEFAULT_INITIAL_WIDTH_PX);

    let (width, viewport) = watch::channel(initial_width);
    let handle = spawn_inbox_from_env(viewport).expect("invalid inbox config");

    // Print view events as they arrive.
    let printer = tokio::spawn(print_events(handle.subscribe()));

    tracing::info!(width_px = initial_width, "copilot inbox ready");
    println!("{}", repl::help());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    if let Err(err) = repl::run(stdin, &mut stdout, &handle, &width).await {
        tracing::error!(error = %err, "terminal driver stopped");
    }

    match handle.shutdown().await {
        Ok(cancelled) => tracing::info!(cancelled, "inbox shut down"),
        Err(err) => tracing::warn!(error = %err, "inbox already closed"),
    }
    printer.abort();
}

async fn print_events(mut events: broadcast::Receiver<InboxEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::warn!(error = %err, "event not serializable"),
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event printer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
