use chrono::NaiveDate;
use clap::Args;
use momentum_core::model::DATE_FORMAT;
use momentum_core::{Config, RewardInputs};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProgressArgs {
    /// Snapshot JSON with members, habits and completions
    #[arg(short, long)]
    input: PathBuf,
    /// Compute as of this day (YYYY-MM-DD) instead of the local date
    #[arg(long)]
    today: Option<String>,
    /// Only print this member's progress
    #[arg(short, long)]
    member: Option<String>,
}

pub fn run(args: ProgressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = match args.today.as_deref() {
        Some(raw) => parse_day(raw)?,
        None => chrono::Local::now().date_naive(),
    };

    tracing::debug!(%today, input = %args.input.display(), "computing progress");

    let config = Config::load_or_default();
    let inputs = RewardInputs::load(&args.input)?;
    let mut progress = inputs.progress(&config.engine(), today);

    match args.member {
        Some(id) => {
            let entry = progress
                .remove(&id)
                .ok_or_else(|| format!("no active member with id '{id}'"))?;
            super::print_json(&entry, config.output.pretty)
        }
        None => super::print_json(&progress, config.output.pretty),
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| format!("invalid --today '{raw}' (expected YYYY-MM-DD): {e}"))
}
