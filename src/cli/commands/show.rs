use anyhow::Result;

use propbus::PropertyPool;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Pool display command
pub fn execute(pool: &PropertyPool, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&pool.snapshot())?);
        return Ok(());
    }

    ui::print_header("Property Pool");
    if pool.is_empty() {
        ui::print_info("No properties registered.");
        return Ok(());
    }

    for entry in pool.snapshot().properties {
        let group = if entry.group.is_empty() { "-".to_string() } else { entry.group };
        ui::print_result(
            &entry.name,
            &format!(
                "{} ({}, group {}, id {}, {} writes{})",
                entry.value,
                entry.type_name,
                group,
                entry.id,
                entry.mod_count,
                if entry.locked { ", locked" } else { "" }
            ),
        );
    }
    println!();
    ui::print_text(&pool.as_string());

    Ok(())
}
