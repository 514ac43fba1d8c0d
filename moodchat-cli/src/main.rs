use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use moodchat_classify::{LexiconClassifier, RemoteClassifier};
use moodchat_core::{
    Classification, Classifier, MoodEvent, Orchestrator, SuggestionPools,
};
use moodchat_store::{CsvEventStore, JsonAlertStore};

mod config;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(name = "moodchat", version, about = "Mood journaling with trend alerts")]
struct Cli {
    /// User the command applies to
    #[arg(long, global = true, default_value = "me")]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify and log a mood entry, then report trend + suggestion
    Log {
        /// The entry text ("I'm feeling...")
        text: String,

        /// Backfill onto a past day (YYYY-MM-DD, local to the configured
        /// timezone); defaults to now
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show recent entries
    History {
        /// How many days back to show
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// Full statistics + alert report
    Report {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Acknowledge the current alert and return to NORMAL
    ResetAlert,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
}

/// Config-selected classifier backend.
enum AnyClassifier {
    Lexicon(LexiconClassifier),
    Remote(RemoteClassifier),
}

impl Classifier for AnyClassifier {
    fn classify(&self, text: &str) -> moodchat_core::Result<Classification> {
        match self {
            AnyClassifier::Lexicon(c) => c.classify(text),
            AnyClassifier::Remote(c) => c.classify(text),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Log { text, date } => {
            let cfg = config::load_config()?;
            let orch = build_orchestrator(&cfg)?;
            let timestamp = match date {
                Some(d) => Some(backfill_timestamp(d, &cfg.policy.timezone)?),
                None => None,
            };

            let resp = orch
                .submit_entry(&cli.user, &text, timestamp)
                .context("logging entry")?;

            println!(
                "Mood: {} (confidence {:.1}%)",
                resp.event.label.as_str(),
                resp.event.confidence * 100.0
            );
            println!(
                "Window: {} negative of {} data-days in the last {} days",
                resp.stats.negative_days, resp.stats.days_with_data, resp.stats.window_days
            );
            println!("Suggestion: {}", resp.suggestion.text);

            if resp.alert_fired {
                println!();
                println!(
                    "ALERT: {:.0}% of your recent days read negative.",
                    resp.stats.negative_ratio * 100.0
                );
                println!("Please consider talking to someone you trust or a professional.");
            }
        }

        Command::History { days } => {
            let cfg = config::load_config()?;
            let orch = build_orchestrator(&cfg)?;
            let cutoff = Utc::now() - chrono::Duration::days(days as i64);

            let history = orch.history(&cli.user)?;
            let recent: Vec<&MoodEvent> =
                history.iter().filter(|e| e.timestamp >= cutoff).collect();

            if recent.is_empty() {
                println!("No entries in the last {days} days. Start with: moodchat log \"...\"");
                return Ok(());
            }
            for ev in recent {
                println!(
                    "{}  {:<8}  {}",
                    ev.timestamp.format("%Y-%m-%d %H:%M"),
                    ev.label.as_str(),
                    ev.raw_text
                );
            }
        }

        Command::Report { json } => {
            let cfg = config::load_config()?;
            let orch = build_orchestrator(&cfg)?;
            let report = orch.health_report(&cli.user, Utc::now())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report::print_report(&report)?;
            }
        }

        Command::ResetAlert => {
            let cfg = config::load_config()?;
            let orch = build_orchestrator(&cfg)?;
            let state = orch.reset_alert(&cli.user)?;
            println!("Alert state reset to {:?} for {}", state.status, cli.user);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
    }

    Ok(())
}

fn build_orchestrator(
    cfg: &config::Config,
) -> Result<Orchestrator<AnyClassifier, CsvEventStore, JsonAlertStore>> {
    let classifier = match cfg.classifier.provider.as_str() {
        "lexicon" => AnyClassifier::Lexicon(LexiconClassifier::new()?),
        "remote" => {
            let token = std::env::var(&cfg.classifier.api_token_env).ok();
            AnyClassifier::Remote(RemoteClassifier::new(&cfg.classifier.endpoint, token))
        }
        other => bail!("unknown classifier provider: {other} (expected lexicon|remote)"),
    };

    let events = CsvEventStore::open(state::events_dir()?)?;
    let alerts = JsonAlertStore::open(state::alerts_dir()?)?;
    let pools = cfg.suggestions.clone().unwrap_or_else(SuggestionPools::default);

    Ok(Orchestrator::new(
        classifier,
        events,
        alerts,
        cfg.policy.clone(),
        pools,
    )?)
}

/// Turn a backfill date into noon local time in the configured timezone.
/// Future dates are rejected; the window end must not outrun the log.
fn backfill_timestamp(date: NaiveDate, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone in config: {tz}"))?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    if date > today {
        bail!("cannot log a future date: {date}");
    }
    let noon = date.and_hms_opt(12, 0, 0).context("noon is valid")?;
    let local = tz
        .from_local_datetime(&noon)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous local time for {date} in {tz}"))?;
    Ok(local.with_timezone(&Utc))
}
