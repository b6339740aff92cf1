//! Chat queries, local schedule summaries and the gateway credential.

use super::Assistant;
use crate::error::AssistantError;
use crate::format::format_time;
use crate::sort::sort_refs;
use deskmate_gateway::build_messages;
use deskmate_protocol::TaskRecord;
use deskmate_store::CREDENTIAL_KEY;
use log::{debug, info, warn};

/// Reply shown when a chat query is made without a saved credential.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "No chat API key saved. Save one first with `deskmate key set <KEY>`.";

const DETAILS_TRIGGERS: [&str; 2] = ["all tasks", "details"];
const NEXT_TRIGGERS: [&str; 2] = ["next", "agla"];

impl Assistant {
    /// Numbered listing of every task in schedule order.
    pub fn details(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks yet.".to_string();
        }
        let lines: Vec<String> = sort_refs(&self.tasks)
            .into_iter()
            .enumerate()
            .map(|(index, task)| {
                format!(
                    "{}. {} | {} | {} | {}",
                    index + 1,
                    task.title,
                    format_time(task.time),
                    task.location,
                    task.category
                )
            })
            .collect();
        format!("Today's details:\n{}", lines.join("\n"))
    }

    /// First timed task in schedule order, regardless of the current time.
    pub fn next_task(&self) -> Option<&TaskRecord> {
        sort_refs(&self.tasks)
            .into_iter()
            .find(|task| task.time.is_some())
    }

    pub fn next_summary(&self) -> String {
        match self.next_task() {
            Some(task) => format!(
                "Next task: {} at {} ({}).",
                task.title,
                format_time(task.time),
                task.location
            ),
            None => "No timed task found.".to_string(),
        }
    }

    /// Persist the chat credential.
    pub fn save_credential(&mut self, credential: &str) -> Result<(), AssistantError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(AssistantError::EmptyCredential);
        }
        self.store.save_raw(CREDENTIAL_KEY, credential)?;
        info!("chat credential saved");
        Ok(())
    }

    /// Remove the stored credential. Returns whether one existed.
    pub fn clear_credential(&mut self) -> Result<bool, AssistantError> {
        let removed = self.store.remove(CREDENTIAL_KEY)?;
        info!("chat credential cleared (existed={removed})");
        Ok(removed)
    }

    pub fn has_credential(&self) -> bool {
        matches!(self.credential(), Ok(Some(_)))
    }

    /// Stored credential, else the fallback passed to the builder.
    fn credential(&self) -> Result<Option<String>, AssistantError> {
        let stored = self
            .store
            .load_raw(CREDENTIAL_KEY)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(stored.or_else(|| self.fallback_credential.clone()))
    }

    /// Answer a chat query as user-facing text.
    ///
    /// Returns None for blank input. Failures are rendered into the reply.
    pub async fn answer(&self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if self.config.assistant.local_shortcuts {
            if let Some(reply) = self.local_reply(query) {
                return Some(reply);
            }
        }
        match self.ask(query).await {
            Ok(reply) => Some(reply),
            Err(AssistantError::MissingCredential) => Some(MISSING_CREDENTIAL_MESSAGE.to_string()),
            Err(err) => {
                warn!("chat request failed: {err}");
                Some(format!("Chat request failed: {err}"))
            }
        }
    }

    /// Send a query to the chat gateway with the current tasks and clients.
    pub async fn ask(&self, query: &str) -> Result<String, AssistantError> {
        let Some(credential) = self.credential()? else {
            debug!("chat query skipped, no credential");
            return Err(AssistantError::MissingCredential);
        };
        let messages = build_messages(
            self.config.gateway.system_prompt.as_deref(),
            query,
            &self.tasks,
            &self.clients,
        )?;
        info!(
            "chat query sent (tasks={}, clients={})",
            self.tasks.len(),
            self.clients.len()
        );
        Ok(self.gateway.complete(&credential, messages).await?)
    }

    fn local_reply(&self, query: &str) -> Option<String> {
        let lower = query.to_lowercase();
        if DETAILS_TRIGGERS.iter().any(|trigger| lower.contains(trigger)) {
            return Some(self.details());
        }
        if NEXT_TRIGGERS.iter().any(|trigger| lower.contains(trigger)) {
            return Some(self.next_summary());
        }
        None
    }
}
