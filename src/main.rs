use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

use openapi_sleuth::logging::init_logging;
use openapi_sleuth::{CatalogDownloader, Config, Error, Event};

#[derive(Parser, Debug)]
#[clap(
    name = "openapi-sleuth",
    about = "Enumerate and download OpenAPI specs from a vendor's enumeration endpoint, storing them in a base folder.",
    after_help = "Example usage:\n  openapi-sleuth --base-url https://api.hubspot.com/public/api/spec/v1/specs --prefix hubspot",
    rename_all = "kebab-case",
    rename_all_env = "screaming-snake"
)]
pub struct Args {
    /// Base URL for the vendor's API enumeration endpoint [default: HubSpot specs endpoint]
    #[clap(long, env = "OPENAPI_SLEUTH_BASE_URL")]
    base_url: Option<String>,

    /// Prefix for the output file names; a base folder will be created with this name [default: hubspot]
    #[clap(long, env = "OPENAPI_SLEUTH_PREFIX")]
    prefix: Option<String>,

    /// Directory in which the prefix folder is created [default: .]
    #[clap(long, env = "OPENAPI_SLEUTH_OUTPUT_ROOT")]
    output_root: Option<PathBuf>,

    /// Per-request timeout in seconds [default: none]
    #[clap(long, env = "OPENAPI_SLEUTH_TIMEOUT")]
    timeout: Option<u64>,

    /// Events buffered for the status printer before older lines are dropped [default: 1024]
    #[clap(long, env = "OPENAPI_SLEUTH_EVENT_CAPACITY")]
    event_capacity: Option<usize>,

    /// JSON config file; command-line flags override its values
    #[clap(long, env = "OPENAPI_SLEUTH_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[clap(long, default_value = "warn")]
    log_level: String,

    /// Print progress events as JSON lines
    #[clap(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> openapi_sleuth::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if let Some(output_root) = self.output_root {
            config.output_root = output_root;
        }
        if let Some(secs) = self.timeout {
            config.http.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(capacity) = self.event_capacity {
            config.event_capacity = capacity;
        }
        Ok(config)
    }
}

// The run itself is unaffected; only status output was lost
fn print_dropped(skipped: u64, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "type": "dropped", "count": skipped }));
    } else {
        println!(
            "Status output fell behind: {skipped} status line(s) dropped (raise --event-capacity)."
        );
    }
}

fn print_event(event: &Event, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "failed to serialize event"),
        }
    } else {
        // Blank line before the summary, matching the per-item output above it
        if matches!(event, Event::Completed { .. }) {
            println!();
        }
        println!("{event}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let json = args.json;
    let config = args.into_config()?;
    let downloader = CatalogDownloader::new(config)?;

    let mut events = downloader.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => print_event(&event, json),
                Err(RecvError::Lagged(skipped)) => print_dropped(skipped, json),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let result = downloader.run().await;
    // Dropping the only sender closes the channel so the printer drains and exits
    drop(downloader);
    printer.await?;

    match result {
        Ok(_) => {}
        Err(e @ Error::Io(_)) => println!("Error preparing output folder: {e}"),
        Err(e) => println!("Error fetching enumeration endpoint: {e}"),
    }

    Ok(())
}
