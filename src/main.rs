mod config;
mod export;
mod parser;
mod record;
mod reddit;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use config::Credentials;
use record::Field;
use reddit::RedditClient;

#[derive(Parser)]
#[command(name = "ptordenado", about = "Salary post harvester for r/PTOrdenado")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch new posts, parse them and export the confident ones
    Run {
        /// Subreddit to read from
        #[arg(short, long, default_value = "PTOrdenado")]
        subreddit: String,
        /// Max posts to fetch
        #[arg(short = 'n', long, default_value = "100")]
        limit: usize,
        /// Output file (semicolon separated)
        #[arg(short, long, default_value = "parsed_posts.csv")]
        output: PathBuf,
        /// Keep records whose confidence is strictly above this
        #[arg(short, long, default_value_t = export::DEFAULT_THRESHOLD)]
        threshold: f64,
    },
    /// Parse a local post body and print the record as JSON
    Parse {
        /// Text file to parse ("-" reads stdin)
        file: PathBuf,
        /// Source URL to attach
        #[arg(long, default_value = "")]
        url: String,
        /// Flair/category to attach
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            subreddit,
            limit,
            output,
            threshold,
        } => {
            // Fail on missing credentials before touching the network.
            let creds = Credentials::from_env()?;
            let client = RedditClient::login(&creds, config::USER_AGENT).await?;

            let posts = client.new_posts(&subreddit, limit).await?;
            if posts.is_empty() {
                println!("No posts found in r/{}.", subreddit);
            }

            println!("Parsing {} posts...", posts.len());
            let scored = parser::process_posts(&posts);
            let records = export::select(scored, threshold);

            export::write_file(&output, &records)?;
            info!("Wrote {} records to {}", records.len(), output.display());
            println!(
                "Kept {} of {} posts (confidence > {}) -> {}",
                records.len(),
                posts.len(),
                threshold,
                output.display()
            );
            Ok(())
        }
        Commands::Parse {
            file,
            url,
            category,
        } => {
            let text = read_input(&file)?;
            let record = parser::extract::extract(&text, &url, category.as_deref());
            let confidence = record.confidence();

            let mut json = serde_json::to_value(&record)?;
            if let Some(obj) = json.as_object_mut() {
                obj.insert("confidence".into(), serde_json::json!(confidence));
                obj.insert(
                    "flags".into(),
                    serde_json::json!({
                        "multinational": record.flag(Field::Multinational),
                        "oncall": record.flag(Field::Oncall),
                    }),
                );
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["ptordenado", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                subreddit,
                limit,
                output,
                threshold,
            } => {
                assert_eq!(subreddit, "PTOrdenado");
                assert_eq!(limit, 100);
                assert_eq!(output, PathBuf::from("parsed_posts.csv"));
                assert_eq!(threshold, 0.5);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn durations() {
        use std::time::Duration;
        assert_eq!(format_duration(Duration::from_secs(75)), "1m 15s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
