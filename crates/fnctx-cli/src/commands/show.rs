//! Display of the resolved configuration

use colored::Colorize;
use fnctx_core::Settings;
use fnctx_core::model::{API_URL, CURRENT_CONTEXT, PROVIDER, REGISTRY, RECOGNIZED_KEYS};
use serde::Serialize;

use crate::error::Result;

/// One resolved key for display.
#[derive(Debug, Serialize)]
struct Entry {
    key: &'static str,
    value: String,
    source: String,
}

fn entries(settings: &Settings) -> Vec<Entry> {
    let mut keys = vec![CURRENT_CONTEXT, PROVIDER, API_URL, REGISTRY];
    // Optional keys are only shown when some layer sets them
    let optional: Vec<&'static str> = RECOGNIZED_KEYS
        .iter()
        .copied()
        .filter(|key| !keys.contains(key) && settings.get(key).is_some())
        .collect();
    keys.extend(optional);

    keys.into_iter()
        .map(|key| match settings.lookup(key) {
            Some((value, source)) => Entry {
                key,
                value,
                source: source.to_string(),
            },
            None => Entry {
                key,
                value: String::new(),
                source: "unset".to_string(),
            },
        })
        .collect()
}

/// Print the effective value of each recognized key.
pub fn run_show(settings: &Settings, json: bool) -> Result<()> {
    let entries = entries(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", "Resolved Configuration".bold());
    println!();
    for entry in &entries {
        let value = if entry.value.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            entry.value.clone()
        };
        println!(
            "  {:<18} {} {}",
            format!("{}:", entry.key).dimmed(),
            value,
            format!("[{}]", entry.source).dimmed()
        );
    }

    Ok(())
}
