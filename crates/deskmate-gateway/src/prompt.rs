//! Message assembly for chat queries.

use crate::error::GatewayError;
use crate::wire::ChatMessage;
use deskmate_protocol::{ClientRecord, TaskRecord};
use serde_json::{Value, json};

/// Line separating the user's query from the data snapshot.
pub const CONTEXT_HEADER: &str = "Current tasks and clients (JSON):";

/// Snapshot of all tasks and clients sent as chat context.
pub fn context_snapshot(tasks: &[TaskRecord], clients: &[ClientRecord]) -> Value {
    json!({
        "tasks": tasks,
        "clients": clients,
    })
}

/// Build the outgoing message list: optional system prompt, then the query
/// with the serialized snapshot appended.
pub fn build_messages(
    system_prompt: Option<&str>,
    query: &str,
    tasks: &[TaskRecord],
    clients: &[ClientRecord],
) -> Result<Vec<ChatMessage>, GatewayError> {
    let snapshot = serde_json::to_string(&context_snapshot(tasks, clients))?;
    let mut messages = Vec::with_capacity(2);
    if let Some(prompt) = system_prompt.filter(|prompt| !prompt.trim().is_empty()) {
        messages.push(ChatMessage::system(prompt));
    }
    messages.push(ChatMessage::user(format!(
        "{query}\n\n{CONTEXT_HEADER}\n{snapshot}"
    )));
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::{CONTEXT_HEADER, build_messages};
    use crate::ChatRole;
    use chrono::Utc;
    use deskmate_protocol::{ClientDraft, ClientRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn user_message_embeds_query_and_snapshot() {
        let client = ClientRecord::from_draft(
            ClientDraft {
                name: "Meera".to_string(),
                ..ClientDraft::default()
            },
            Utc::now(),
        );
        let messages =
            build_messages(Some("be brief"), "who is next?", &[], &[client]).expect("messages");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert!(messages[1].content.starts_with("who is next?\n\n"));
        assert!(messages[1].content.contains(CONTEXT_HEADER));
        assert!(messages[1].content.contains("\"name\":\"Meera\""));
        assert!(messages[1].content.contains("\"tasks\":[]"));
    }

    #[test]
    fn blank_system_prompt_is_skipped() {
        let messages = build_messages(Some("  "), "hi", &[], &[]).expect("messages");
        assert_eq!(messages.len(), 1);
        let messages = build_messages(None, "hi", &[], &[]).expect("messages");
        assert_eq!(messages.len(), 1);
    }
}
