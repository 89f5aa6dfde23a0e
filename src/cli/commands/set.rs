use anyhow::{anyhow, Result};
use log::info;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use propbus::{ChangeListener, ErasedChange, ErasedProperty, Property, PropertyError, PropertyPool};

use crate::cli::ui;
use crate::cli::OutputFormat;

/// One notification observed while writing
#[derive(Debug, Serialize)]
struct ChangeRecord {
    name: String,
    old: String,
    new: String,
}

/// Write command: watch a pattern, write one value, report what fired
pub fn execute(
    pool: &PropertyPool,
    name: &str,
    raw_value: &str,
    watch: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let records = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&records);
    let listener: Rc<dyn ChangeListener> =
        Rc::new(move |sender: &dyn ErasedProperty, change: &ErasedChange<'_>| {
            sink.borrow_mut().push(ChangeRecord {
                name: sender.name().to_string(),
                old: change.old_text(),
                new: change.new_text(),
            });
        });

    let pattern = watch.unwrap_or(name);
    let watched = pool
        .add_subscription(listener, pattern)
        .map_err(report)?;
    info!("Watching {} properties through {:?}", watched, pattern);

    write_text(pool, name, raw_value)?;

    let records = records.borrow();
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&*records)?);
        return Ok(());
    }

    ui::print_header(&format!("Set {}", name));
    if records.is_empty() {
        ui::print_warning("No watched property reported a change.");
    }
    for record in records.iter() {
        ui::print_change(&record.name, &record.old, &record.new);
    }
    ui::print_success(&format!("{} written", name));
    ui::print_text(&pool.as_string());

    Ok(())
}

/// Parse `raw` as the payload type of the named property and write it
fn write_text(pool: &PropertyPool, name: &str, raw: &str) -> Result<()> {
    let property = pool
        .get(name)
        .ok_or_else(|| report(PropertyError::KeyNotFound(name.to_string())))?;
    let any = property.as_any();

    let result = if let Some(p) = any.downcast_ref::<Property<i64>>() {
        p.set_value(raw.parse()?)
    } else if let Some(p) = any.downcast_ref::<Property<f64>>() {
        p.set_value(raw.parse()?)
    } else if let Some(p) = any.downcast_ref::<Property<bool>>() {
        p.set_value(raw.parse()?)
    } else if let Some(p) = any.downcast_ref::<Property<String>>() {
        p.set_value(raw.to_string())
    } else {
        return Err(anyhow!(
            "Cannot parse a value for {} of type {}",
            name,
            property.type_name()
        ));
    };

    result.map_err(report)
}

fn report(error: PropertyError) -> anyhow::Error {
    ui::print_property_error(&error);
    error.into()
}
