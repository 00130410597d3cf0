//! `echoctl suggest`: fetch reply suggestions for one item.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use echo_client::{InboxApi, SuggestTarget, SuggestionSet};
use echo_inbox::{CopyTarget, InteractionKind, ItemKey, ReplySlot};

use crate::commands::{build_client, build_feed};
use crate::config::ClientConfig;

pub struct SuggestArgs<'a> {
    pub kind: InteractionKind,
    pub id: &'a str,
    pub post_id: Option<&'a str>,
    pub copy: Option<ReplySlot>,
    pub output_json: bool,
}

pub async fn run(args: SuggestArgs<'_>, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let client = build_client(&config);
    let feed = build_feed(&config, client.clone());
    let key = ItemKey::new(args.kind, args.id);

    let set: Arc<SuggestionSet> = match (args.kind, args.post_id) {
        (InteractionKind::Message, Some(_)) => {
            anyhow::bail!("--post-id only applies to comments.");
        }
        (InteractionKind::Comment, Some(post_id)) => {
            let target = SuggestTarget::Comment {
                comment_id: args.id.to_string(),
                post_id: Some(post_id.to_string()),
            };
            let set = client
                .suggest_reply(&target)
                .await
                .map_err(|e| anyhow!("{}", e.detail().map(str::to_string).unwrap_or_else(|| e.to_string())))?;
            Arc::new(set)
        }
        (kind, None) => {
            // Comments are loaded first so the request carries their post id.
            if kind == InteractionKind::Comment {
                feed.refresh_comments().await;
            }
            feed.toggle_suggestions(key.clone()).await;
            feed.suggestions(&key).ok_or_else(|| {
                anyhow!(feed.error().unwrap_or_else(|| "No suggestions returned.".to_string()))
            })?
        }
    };

    if args.output_json {
        println!("{}", serde_json::to_string_pretty(&*set)?);
    } else {
        print!("{}", render(&set));
    }

    if let Some(slot) = args.copy {
        let text = slot_text(&set, slot)
            .ok_or_else(|| anyhow!("No reply in slot {}.", slot))?
            .to_string();
        let marker = CopyTarget::new(key, slot);
        feed.copy(text, marker.clone()).await;
        if !feed.is_copied(&marker) {
            anyhow::bail!("Could not write to the clipboard.");
        }
        eprintln!("Copied reply {} to the clipboard.", slot);
    }
    Ok(())
}

fn slot_text(set: &SuggestionSet, slot: ReplySlot) -> Option<&str> {
    match slot {
        ReplySlot::Main => Some(&set.primary.text),
        ReplySlot::Alternative(i) => set.alternatives.get(i).map(|a| a.text.as_str()),
    }
}

fn render(set: &SuggestionSet) -> String {
    let mut out = format!("[main] ({}) {}\n", set.primary.tone, set.primary.text);
    if set.primary.includes_cta == Some(true) {
        out.push_str("       includes a call to action\n");
    }
    for (i, alt) in set.alternatives.iter().enumerate() {
        out.push_str(&format!("[{}] ({}) {}\n", i, alt.tone, alt.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_client::{AlternativeReply, SuggestedReply};

    fn set() -> SuggestionSet {
        SuggestionSet {
            primary: SuggestedReply {
                text: "Thanks for watching!".into(),
                tone: "friendly".into(),
                analysis: None,
                includes_cta: Some(true),
            },
            alternatives: vec![AlternativeReply { text: "Glad you liked it".into(), tone: "casual".into() }],
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(
            render(&set()),
            "[main] (friendly) Thanks for watching!\n       includes a call to action\n[0] (casual) Glad you liked it\n"
        );
    }

    #[test]
    fn test_slot_text() {
        let set = set();
        assert_eq!(slot_text(&set, ReplySlot::Main), Some("Thanks for watching!"));
        assert_eq!(slot_text(&set, ReplySlot::Alternative(0)), Some("Glad you liked it"));
        assert_eq!(slot_text(&set, ReplySlot::Alternative(1)), None);
    }
}
