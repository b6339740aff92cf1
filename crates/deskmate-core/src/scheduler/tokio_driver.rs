//! Timer driver backed by tokio tasks.

use crate::error::AssistantError;
use deskmate_protocol::{Notifier, TimerDriver, TimerHandle};
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Spawns one sleeping task per reminder; cancelling aborts the task.
#[derive(Clone)]
pub struct TokioTimerDriver {
    runtime: Handle,
    notifier: Arc<dyn Notifier>,
}

impl TokioTimerDriver {
    pub fn new(runtime: Handle, notifier: Arc<dyn Notifier>) -> Self {
        Self { runtime, notifier }
    }

    /// Driver bound to the runtime of the calling context.
    pub fn current(notifier: Arc<dyn Notifier>) -> Result<Self, AssistantError> {
        let runtime =
            Handle::try_current().map_err(|err| AssistantError::Runtime(err.to_string()))?;
        Ok(Self::new(runtime, notifier))
    }
}

impl TimerDriver for TokioTimerDriver {
    fn arm(&self, delay: Duration, message: String) -> Box<dyn TimerHandle> {
        let notifier = Arc::clone(&self.notifier);
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.notify(&message);
        });
        Box::new(TokioTimerHandle { task })
    }
}

struct TokioTimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle for TokioTimerHandle {
    fn cancel(&self) {
        if !self.task.is_finished() {
            debug!("timer aborted");
        }
        self.task.abort();
    }

    fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}
