use crate::env::Environment;
use crate::preflight::HostMessage;
use crate::preflight::LogLevel;
use crate::preflight::PreflightConfig;
use crate::preflight::PreflightStatus;
use crate::preflight::WorkerMessage;
use parking_lot::Mutex;
use rhai::Dynamic;
use rhai::Engine;
use rhai::EvalAltResult;
use rhai::module_resolvers::DummyModuleResolver;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use tokio::sync::mpsc as tokio_mpsc;

/// Host-side end of a running interpreter thread. Dropping it stops the
/// script at its next progress check.
pub(super) struct Worker {
    outbox: tokio_mpsc::UnboundedReceiver<WorkerMessage>,
    inbox: mpsc::Sender<HostMessage>,
    cancelled: Arc<AtomicBool>,
}
impl Worker {
    pub(super) fn spawn(
        script: String,
        env: Environment,
        config: PreflightConfig,
    ) -> std::io::Result<Self> {
        let (outbox_tx, outbox) = tokio_mpsc::unbounded_channel();
        let (inbox, inbox_rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));

        let worker_cancelled = Arc::clone(&cancelled);
        std::thread::Builder::new()
            .name("graphql-lab-preflight".to_string())
            .spawn(move || {
                let outcome = run_script(
                    &script,
                    env,
                    &config,
                    outbox_tx.clone(),
                    inbox_rx,
                    worker_cancelled,
                );
                // The host may already be gone; nobody is left to tell.
                let _ = outbox_tx.send(outcome);
            })?;

        Ok(Self {
            outbox,
            inbox,
            cancelled,
        })
    }

    /// The next message from the script. `None` once the thread has exited.
    pub(super) async fn recv(&mut self) -> Option<WorkerMessage> {
        self.outbox.recv().await
    }

    pub(super) fn reply(&self, message: HostMessage) -> bool {
        self.inbox.send(message).is_ok()
    }
}
impl Drop for Worker {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

fn run_script(
    script: &str,
    env: Environment,
    config: &PreflightConfig,
    outbox: tokio_mpsc::UnboundedSender<WorkerMessage>,
    inbox: mpsc::Receiver<HostMessage>,
    cancelled: Arc<AtomicBool>,
) -> WorkerMessage {
    let env = Arc::new(Mutex::new(env));
    let engine = sandboxed_engine(config, &env, outbox, inbox, cancelled);

    match engine.run(script) {
        Ok(()) => WorkerMessage::Result {
            status: PreflightStatus::Success,
            env: Some(env.lock().clone()),
            error: None,
        },
        Err(err) => WorkerMessage::Result {
            status: PreflightStatus::Error,
            env: None,
            error: Some(err.to_string()),
        },
    }
}

fn sandboxed_engine(
    config: &PreflightConfig,
    env: &Arc<Mutex<Environment>>,
    outbox: tokio_mpsc::UnboundedSender<WorkerMessage>,
    inbox: mpsc::Receiver<HostMessage>,
    cancelled: Arc<AtomicBool>,
) -> Engine {
    let mut engine = Engine::new();
    engine
        .set_module_resolver(DummyModuleResolver::new())
        .disable_symbol("eval")
        .set_max_operations(config.max_operations)
        .set_max_call_levels(config.max_call_levels)
        .on_progress(move |_| {
            cancelled
                .load(Ordering::Relaxed)
                .then(|| Dynamic::from("preflight run was cancelled".to_string()))
        });

    let print_outbox = outbox.clone();
    let debug_outbox = outbox.clone();
    engine
        .on_print(move |text| send_log(&print_outbox, LogLevel::Log, text.into()))
        .on_debug(move |text, _source, _pos| send_log(&debug_outbox, LogLevel::Log, text.into()));

    for (name, level) in [
        ("log_info", LogLevel::Log),
        ("log_warn", LogLevel::Warn),
        ("log_error", LogLevel::Error),
    ] {
        let outbox = outbox.clone();
        engine.register_fn(name, move |value: Dynamic| {
            send_log(&outbox, level, dynamic_to_json(&value));
        });
    }

    let get_env = Arc::clone(env);
    let set_env = Arc::clone(env);
    let delete_env = Arc::clone(env);
    engine
        .register_fn("env_get", move |key: &str| -> Dynamic {
            match get_env.lock().get(key) {
                Some(value) => value.to_string().into(),
                None => Dynamic::UNIT,
            }
        })
        .register_fn("env_set", move |key: &str, value: Dynamic| {
            set_env.lock().set(key, value.to_string());
        })
        .register_fn("env_delete", move |key: &str| {
            delete_env.lock().remove(key);
        });

    let prompt = Arc::new(Prompter {
        outbox,
        inbox: Mutex::new(inbox),
    });
    let prompt_with_default = Arc::clone(&prompt);
    engine
        .register_fn("prompt", move |placeholder: &str| prompt.ask(placeholder, None))
        .register_fn("prompt", move |placeholder: &str, default_value: Dynamic| {
            let default_value = (!default_value.is_unit()).then(|| default_value.to_string());
            prompt_with_default.ask(placeholder, default_value)
        });

    engine
}

/// Blocks the script on a round trip to the host.
struct Prompter {
    outbox: tokio_mpsc::UnboundedSender<WorkerMessage>,
    inbox: Mutex<mpsc::Receiver<HostMessage>>,
}
impl Prompter {
    fn ask(
        &self,
        placeholder: &str,
        default_value: Option<String>,
    ) -> Result<Dynamic, Box<EvalAltResult>> {
        let request = WorkerMessage::Prompt {
            placeholder: placeholder.to_string(),
            default_value,
        };
        if self.outbox.send(request).is_err() {
            return Err("preflight host is gone".into());
        }

        match self.inbox.lock().recv() {
            Ok(HostMessage::PromptResult { value: Some(value) }) => Ok(value.into()),
            Ok(HostMessage::PromptResult { value: None }) => Ok(Dynamic::UNIT),
            Err(_) => Err("preflight host is gone".into()),
        }
    }
}

fn send_log(
    outbox: &tokio_mpsc::UnboundedSender<WorkerMessage>,
    level: LogLevel,
    value: serde_json::Value,
) {
    let _ = outbox.send(WorkerMessage::Log {
        level,
        message: vec![value],
    });
}

fn dynamic_to_json(value: &Dynamic) -> serde_json::Value {
    if value.is_string() {
        return serde_json::Value::String(value.to_string());
    }
    rhai::serde::from_dynamic::<serde_json::Value>(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()))
}
