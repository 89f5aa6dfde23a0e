use anyhow::Result;

use propbus::PropertyPool;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Pattern resolution command
pub fn execute(pool: &PropertyPool, pattern: &str, format: OutputFormat) -> Result<()> {
    let names = pool.matching(pattern).map_err(|e| {
        ui::print_property_error(&e);
        e
    })?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    ui::print_header(&format!("Matches for {}", pattern));
    if names.is_empty() {
        ui::print_warning("Pattern matches no registered property.");
    }
    for name in &names {
        println!("  {}", name);
    }
    ui::print_result("Total", &names.len().to_string());

    Ok(())
}
