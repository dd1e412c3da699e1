use clap::Args;
use momentum_core::{Config, RewardInputs};
use std::path::PathBuf;

#[derive(Args)]
pub struct DefaultsArgs {
    /// Snapshot JSON with members and habits
    #[arg(short, long)]
    input: PathBuf,
}

pub fn run(args: DefaultsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let inputs = RewardInputs::load(&args.input)?;
    let defaults = inputs.default_focus(&config.engine());
    super::print_json(&defaults, config.output.pretty)
}
