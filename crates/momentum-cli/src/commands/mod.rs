pub mod config;
pub mod defaults;
pub mod progress;

use serde::Serialize;

/// Print `value` as JSON, honoring `output.pretty`.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
