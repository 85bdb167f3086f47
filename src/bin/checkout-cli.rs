use clap::{Parser, Subcommand};
use futures_util::stream::{self, StreamExt};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "checkout-cli")]
#[command(about = "Workload driver for the checkout simulator", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3003")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query /healthz
    Health,
    /// Lower the service health flag (irreversible until restart)
    BreakHealth,
    /// Fire a batch of checkouts and summarize the outcomes
    Checkout {
        /// Number of checkouts to send
        #[arg(short = 'n', long, default_value_t = 100)]
        count: usize,

        /// Requests in flight at once
        #[arg(short, long, default_value_t = 10)]
        concurrency: usize,

        /// Base delay in ms added to the random jitter
        #[arg(short, long)]
        delay: Option<f64>,
    },
    /// Print the Prometheus exposition
    Metrics,
}

#[derive(Default)]
struct Summary {
    approved: usize,
    failed: usize,
    transport_errors: usize,
    total_time_ms: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/healthz", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::BreakHealth => {
            let res = client.get(format!("{}/bad-health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Checkout {
            count,
            concurrency,
            delay,
        } => {
            let url = match delay {
                Some(d) => format!("{}/checkout?delay={}", cli.url, d),
                None => format!("{}/checkout", cli.url),
            };
            let summary = run_checkouts(&client, &url, count, concurrency.max(1)).await;
            print_summary(&summary);
        }
        Commands::Metrics => {
            let res = client.get(format!("{}/metrics", cli.url)).send().await?;
            println!("{}", res.text().await?);
        }
    }

    Ok(())
}

async fn run_checkouts(
    client: &reqwest::Client,
    url: &str,
    count: usize,
    concurrency: usize,
) -> Summary {
    let results: Vec<Result<(bool, Value), reqwest::Error>> = stream::iter(0..count)
        .map(|_| async move {
            let res = client.get(url).send().await?;
            let ok = res.status().is_success();
            let body: Value = res.json().await?;
            Ok::<_, reqwest::Error>((ok, body))
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut summary = Summary::default();
    for result in results {
        match result {
            Ok((true, body)) => {
                summary.approved += 1;
                summary.total_time_ms += body["transactionTime"]
                    .as_str()
                    .and_then(|t| t.trim_end_matches("ms").parse::<f64>().ok())
                    .unwrap_or(0.0);
            }
            Ok((false, _)) => summary.failed += 1,
            Err(e) => {
                eprintln!("Request error: {}", e);
                summary.transport_errors += 1;
            }
        }
    }
    summary
}

fn print_summary(summary: &Summary) {
    let mean = if summary.approved > 0 {
        summary.total_time_ms / summary.approved as f64
    } else {
        0.0
    };
    let report = serde_json::json!({
        "approved": summary.approved,
        "failed": summary.failed,
        "transport_errors": summary.transport_errors,
        "mean_transaction_time_ms": mean,
    });
    println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
