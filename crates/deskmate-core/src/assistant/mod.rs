//! Coordinator owning tasks, clients and reminders.
//!
//! All mutation goes through `&mut Assistant`. Every mutation is written
//! through to the [`Store`] and re-arms reminders before returning.

mod chat;

pub use chat::MISSING_CREDENTIAL_MESSAGE;

use crate::board::StatusBoard;
use crate::error::AssistantError;
use crate::format::format_time;
use crate::parser::TaskParser;
use crate::scheduler::{LogNotifier, ReminderEntry, ReminderScheduler, TokioTimerDriver};
use crate::sort::sort_tasks;
use chrono::Utc;
use deskmate_config::DeskmateConfig;
use deskmate_gateway::{ChatGateway, HttpChatGateway};
use deskmate_protocol::{
    ClientDraft, ClientRecord, Clock, Notifier, SystemClock, TaskRecord, TaskStatus, TimerDriver,
};
use deskmate_store::{CLIENTS_KEY, Store, TASKS_KEY, load_json, save_json};
use log::{info, warn};
use std::sync::Arc;

/// Builder wiring an [`Assistant`] to its collaborators.
pub struct AssistantBuilder {
    store: Arc<dyn Store>,
    config: DeskmateConfig,
    clock: Option<Arc<dyn Clock>>,
    timer_driver: Option<Arc<dyn TimerDriver>>,
    notifier: Option<Arc<dyn Notifier>>,
    gateway: Option<Arc<dyn ChatGateway>>,
    fallback_credential: Option<String>,
}

impl AssistantBuilder {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            config: DeskmateConfig::default(),
            clock: None,
            timer_driver: None,
            notifier: None,
            gateway: None,
            fallback_credential: None,
        }
    }

    pub fn config(mut self, config: DeskmateConfig) -> Self {
        self.config = config;
        self
    }

    /// Clock used for `created_at` stamps and reminder delays.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Driver arming reminder timers. Defaults to a tokio driver on the current runtime.
    pub fn timer_driver(mut self, driver: Arc<dyn TimerDriver>) -> Self {
        self.timer_driver = Some(driver);
        self
    }

    /// Notifier for the default tokio driver. Ignored when a driver is supplied.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Chat gateway. Defaults to the HTTP gateway described by the config.
    pub fn gateway(mut self, gateway: Arc<dyn ChatGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Credential used when none is saved in the store.
    pub fn fallback_credential(mut self, credential: impl Into<String>) -> Self {
        let credential = credential.into();
        if !credential.trim().is_empty() {
            self.fallback_credential = Some(credential);
        }
        self
    }

    /// Load persisted records and arm reminders.
    pub fn build(self) -> Result<Assistant, AssistantError> {
        let driver = match self.timer_driver {
            Some(driver) => driver,
            None => {
                let notifier = self
                    .notifier
                    .unwrap_or_else(|| Arc::new(LogNotifier) as Arc<dyn Notifier>);
                Arc::new(TokioTimerDriver::current(notifier)?) as Arc<dyn TimerDriver>
            }
        };
        let gateway = match self.gateway {
            Some(gateway) => gateway,
            None => Arc::new(HttpChatGateway::from_config(&self.config.gateway)?)
                as Arc<dyn ChatGateway>,
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        let tasks: Vec<TaskRecord> = load_json(self.store.as_ref(), TASKS_KEY)?;
        let clients: Vec<ClientRecord> = load_json(self.store.as_ref(), CLIENTS_KEY)?;
        info!(
            "assistant loaded (tasks={}, clients={})",
            tasks.len(),
            clients.len()
        );

        let mut assistant = Assistant {
            config: self.config,
            store: self.store,
            clock,
            gateway,
            parser: TaskParser::new(),
            scheduler: ReminderScheduler::new(driver),
            tasks,
            clients,
            fallback_credential: self.fallback_credential,
        };
        assistant.reschedule();
        Ok(assistant)
    }
}

/// Single owner of the task and client collections.
pub struct Assistant {
    config: DeskmateConfig,
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    gateway: Arc<dyn ChatGateway>,
    parser: TaskParser,
    scheduler: ReminderScheduler,
    tasks: Vec<TaskRecord>,
    clients: Vec<ClientRecord>,
    fallback_credential: Option<String>,
}

impl Assistant {
    pub fn builder(store: Arc<dyn Store>) -> AssistantBuilder {
        AssistantBuilder::new(store)
    }

    pub fn config(&self) -> &DeskmateConfig {
        &self.config
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// Tasks in schedule order.
    pub fn sorted_tasks(&self) -> Vec<TaskRecord> {
        sort_tasks(&self.tasks)
    }

    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn board(&self) -> StatusBoard {
        StatusBoard::from_tasks(&self.tasks)
    }

    /// Entries from the most recent scheduling pass.
    pub fn reminders(&self) -> &[ReminderEntry] {
        self.scheduler.entries()
    }

    /// Number of reminder timers still waiting to fire.
    pub fn active_reminders(&self) -> usize {
        self.scheduler.active_count()
    }

    /// Cancel and re-arm every reminder against the current time.
    pub fn reschedule(&mut self) -> &[ReminderEntry] {
        let now = self.clock.now();
        self.scheduler.schedule(&self.tasks, now);
        self.scheduler.entries()
    }

    /// Parse and append a task, persist the collection and re-arm reminders.
    pub fn add_task(&mut self, text: &str) -> Result<&TaskRecord, AssistantError> {
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyInput);
        }
        let task = self.parser.parse(text, self.clock.now().with_timezone(&Utc));
        self.tasks.push(task);
        if let Err(err) = save_json(self.store.as_ref(), TASKS_KEY, &self.tasks) {
            self.tasks.pop();
            return Err(err.into());
        }
        let index = self.tasks.len() - 1;
        info!(
            "task added (id={}, time={})",
            self.tasks[index].id,
            format_time(self.tasks[index].time)
        );
        self.reschedule();
        Ok(&self.tasks[index])
    }

    /// One-line acknowledgement for a freshly added task.
    pub fn confirmation(task: &TaskRecord) -> String {
        format!(
            "Got it: {} ({}, {}).",
            task.title,
            format_time(task.time),
            task.location
        )
    }

    /// Move a task to another board column.
    ///
    /// `id` may be the full id or any unique prefix of it.
    pub fn set_status(
        &mut self,
        id: &str,
        status: TaskStatus,
    ) -> Result<&TaskRecord, AssistantError> {
        let index = self.resolve_task(id)?;
        let previous = self.tasks[index].status;
        self.tasks[index].status = status;
        if let Err(err) = save_json(self.store.as_ref(), TASKS_KEY, &self.tasks) {
            self.tasks[index].status = previous;
            return Err(err.into());
        }
        info!(
            "task status changed (id={}, from={previous}, to={status})",
            self.tasks[index].id
        );
        self.reschedule();
        Ok(&self.tasks[index])
    }

    /// Append a client record built from `draft` and persist the collection.
    pub fn add_client(&mut self, draft: ClientDraft) -> Result<&ClientRecord, AssistantError> {
        let client = ClientRecord::from_draft(draft, self.clock.now().with_timezone(&Utc));
        self.clients.push(client);
        if let Err(err) = save_json(self.store.as_ref(), CLIENTS_KEY, &self.clients) {
            self.clients.pop();
            return Err(err.into());
        }
        let index = self.clients.len() - 1;
        info!("client added (id={})", self.clients[index].id);
        Ok(&self.clients[index])
    }

    fn resolve_task(&self, id: &str) -> Result<usize, AssistantError> {
        let needle = id.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(AssistantError::UnknownTask(id.to_string()));
        }
        let matches: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.id.to_string().starts_with(&needle))
            .map(|(index, _)| index)
            .collect();
        match matches.as_slice() {
            [] => Err(AssistantError::UnknownTask(id.to_string())),
            [index] => Ok(*index),
            _ => {
                warn!(
                    "ambiguous task id prefix (prefix={needle}, matches={})",
                    matches.len()
                );
                Err(AssistantError::AmbiguousTask {
                    prefix: id.to_string(),
                    matches: matches.len(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Assistant;
    use crate::error::AssistantError;
    use crate::parser::parse_task;
    use deskmate_protocol::{ClientDraft, TaskStatus};
    use deskmate_store::{CREDENTIAL_KEY, MemoryStore, Store, TASKS_KEY, save_json};
    use deskmate_test_utils::{FixedGateway, ManualClock, ManualTimerDriver, RecordingNotifier};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use uuid::Uuid;

    fn assistant(store: Arc<MemoryStore>) -> Assistant {
        let clock = Arc::new(ManualClock::at_local(2026, 6, 10, 9, 0));
        let driver = Arc::new(ManualTimerDriver::new(
            clock.clone(),
            Arc::new(RecordingNotifier::default()),
        ));
        Assistant::builder(store)
            .clock(clock)
            .timer_driver(driver)
            .gateway(Arc::new(FixedGateway::new("ok")))
            .build()
            .expect("assistant")
    }

    #[test]
    fn blank_task_is_rejected() {
        let mut assistant = assistant(Arc::new(MemoryStore::default()));
        let err = assistant.add_task("   ").unwrap_err();
        assert!(matches!(err, AssistantError::EmptyInput));
        assert!(assistant.tasks().is_empty());
    }

    #[test]
    fn blank_credential_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let mut assistant = assistant(store.clone());
        let err = assistant.save_credential("  ").unwrap_err();
        assert!(matches!(err, AssistantError::EmptyCredential));
        assert_eq!(err.to_string(), "chat credential is empty");
        assert_eq!(store.load_raw(CREDENTIAL_KEY).expect("load"), None);
        assert!(!assistant.has_credential());
    }

    #[test]
    fn add_task_writes_through() {
        let store = Arc::new(MemoryStore::default());
        let mut assistant = assistant(store.clone());
        let task = assistant.add_task("Client call at 3pm").expect("add");
        assert_eq!(
            Assistant::confirmation(task),
            "Got it: Client call at (03:00 PM, Office)."
        );
        let raw = store.load_raw(TASKS_KEY).expect("load").expect("present");
        assert!(raw.contains("Client call at"));
    }

    #[test]
    fn set_status_by_prefix() {
        let mut assistant = assistant(Arc::new(MemoryStore::default()));
        let id = assistant.add_task("write report").expect("add").id.to_string();
        let task = assistant
            .set_status(&id[..8].to_uppercase(), TaskStatus::Done)
            .expect("status");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(assistant.board().done.len(), 1);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let mut assistant = assistant(Arc::new(MemoryStore::default()));
        assistant.add_task("anything").expect("add");
        let err = assistant.set_status("zzzz", TaskStatus::Done).unwrap_err();
        assert!(matches!(err, AssistantError::UnknownTask(_)));
        let err = assistant.set_status("  ", TaskStatus::Done).unwrap_err();
        assert!(matches!(err, AssistantError::UnknownTask(_)));
    }

    #[test]
    fn shared_prefix_is_ambiguous() {
        let store = Arc::new(MemoryStore::default());
        let mut first = parse_task("one");
        first.id = Uuid::parse_str("abcd0000-0000-4000-8000-000000000001").expect("uuid");
        let mut second = parse_task("two");
        second.id = Uuid::parse_str("abcd0000-0000-4000-8000-000000000002").expect("uuid");
        save_json(store.as_ref(), TASKS_KEY, &vec![first, second]).expect("seed");

        let mut assistant = assistant(store);
        let err = assistant.set_status("abcd", TaskStatus::Done).unwrap_err();
        assert!(matches!(err, AssistantError::AmbiguousTask { matches: 2, .. }));
        let task = assistant
            .set_status("abcd0000-0000-4000-8000-000000000002", TaskStatus::InProgress)
            .expect("full id");
        assert_eq!(task.title, "two");
    }

    #[test]
    fn client_fields_default_to_dash() {
        let mut assistant = assistant(Arc::new(MemoryStore::default()));
        let client = assistant
            .add_client(ClientDraft {
                name: "Asha".to_string(),
                ..ClientDraft::default()
            })
            .expect("client");
        assert_eq!(client.name, "Asha");
        assert_eq!(client.contact, "-");
        assert_eq!(assistant.clients().len(), 1);
    }
}
