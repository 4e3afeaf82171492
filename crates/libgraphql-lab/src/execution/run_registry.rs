use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Which operations are running, each with the token that stops it. An
/// operation id is registered at most once at a time.
#[derive(Clone, Debug, Default)]
pub struct RunRegistry {
    runs: Arc<Mutex<HashMap<Uuid, RegisteredRun>>>,
}
impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `operation_id` as running. `None` if it already is.
    pub fn try_register(&self, operation_id: Uuid) -> Option<RunTicket> {
        let mut runs = self.runs.lock();
        if runs.contains_key(&operation_id) {
            return None;
        }

        let ticket = RunTicket {
            operation_id,
            run_id: Uuid::new_v4(),
            token: CancellationToken::new(),
        };
        runs.insert(operation_id, RegisteredRun {
            run_id: ticket.run_id,
            token: ticket.token.clone(),
        });
        Some(ticket)
    }

    /// Clears the running marker held by `ticket`. A marker that has since
    /// been replaced by a newer run of the same operation is left alone.
    pub fn finish(&self, ticket: &RunTicket) {
        let mut runs = self.runs.lock();
        if runs.get(&ticket.operation_id).is_some_and(|run| run.run_id == ticket.run_id) {
            runs.remove(&ticket.operation_id);
        }
    }

    /// Cancels the operation's run and clears its marker right away.
    /// Returns whether anything was running.
    pub fn stop(&self, operation_id: Uuid) -> bool {
        match self.runs.lock().remove(&operation_id) {
            Some(run) => {
                run.token.cancel();
                true
            },
            None => false,
        }
    }

    pub fn is_running(&self, operation_id: Uuid) -> bool {
        self.runs.lock().contains_key(&operation_id)
    }
}

#[derive(Debug)]
struct RegisteredRun {
    run_id: Uuid,
    token: CancellationToken,
}

/// Proof of registration handed to whoever performs the run.
#[derive(Clone, Debug)]
pub struct RunTicket {
    operation_id: Uuid,
    run_id: Uuid,
    token: CancellationToken,
}
impl RunTicket {
    pub fn operation_id(&self) -> Uuid {
        self.operation_id
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
