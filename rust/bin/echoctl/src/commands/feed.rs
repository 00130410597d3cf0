//! `echoctl feed`: load both streams and print them merged.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use echo_inbox::{InteractionItem, ItemDetail, format_relative};

use crate::commands::{build_client, build_feed};
use crate::config::ClientConfig;

pub async fn run(output_json: bool, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let feed = build_feed(&config, build_client(&config));
    feed.initialize().await;

    let items = feed.items();
    if let Some(error) = feed.error() {
        eprintln!("error: {}", error);
    }

    if output_json {
        let rows: Vec<serde_json::Value> = items.iter().map(item_json).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if feed.is_sample_data() {
        println!("(showing sample comments; the backend has no live data)");
    }
    if items.is_empty() {
        println!("No interactions.");
        return Ok(());
    }
    let now = Utc::now();
    for item in &items {
        println!("{}", header_line(item, now));
        println!("    {}", item.body_text);
        if let ItemDetail::Comment { post_caption: Some(caption), .. } = &item.detail {
            println!("    on: {}", caption);
        }
    }
    Ok(())
}

fn header_line(item: &InteractionItem, now: DateTime<Utc>) -> String {
    let when = item
        .timestamp
        .map(|at| format_relative(at, now))
        .unwrap_or_else(|| "unknown time".to_string());
    format!(
        "{}{} @{} {} ({})",
        if item.is_new { "[NEW] " } else { "" },
        item.key.kind,
        item.author_handle,
        item.key.id,
        when,
    )
}

fn item_json(item: &InteractionItem) -> serde_json::Value {
    let mut row = serde_json::json!({
        "kind": item.key.kind,
        "id": item.key.id,
        "author": item.author_handle,
        "text": item.body_text,
        "timestamp": item.timestamp.map(|t| t.to_rfc3339()),
        "is_new": item.is_new,
    });
    if let ItemDetail::Comment { post_caption, post_id, avatar_url } = &item.detail {
        row["post_id"] = serde_json::json!(post_id);
        row["post_caption"] = serde_json::json!(post_caption);
        row["avatar_url"] = serde_json::json!(avatar_url);
    }
    row
}
