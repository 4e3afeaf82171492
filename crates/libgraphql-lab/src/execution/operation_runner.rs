use crate::env::Environment;
use crate::execution::ExecutionError;
use crate::execution::RequestParts;
use crate::execution::RunOutcome;
use crate::execution::RunRegistry;
use crate::execution::RunTicket;
use crate::execution::SubscriptionEvent;
use crate::execution::graphql_ws;
use crate::history::HistoryRecord;
use crate::history::HistoryRequest;
use crate::history::HistoryStore;
use crate::history::HistorySubscription;
use crate::operation::Operation;
use crate::preflight::PreflightLog;
use crate::preflight::PreflightRunner;
use crate::preflight::PromptHandler;
use crate::schema::IntrospectionError;
use crate::schema::Schema;
use futures::Stream;
use futures::StreamExt;
use indexmap::IndexMap;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use std::time::Duration;
use std::time::Instant;
use uuid::Uuid;

type Result<T> = std::result::Result<T, ExecutionError>;

#[derive(Clone, Debug, PartialEq)]
pub struct RunnerConfig {
    /// How long a subscription server gets to answer `connection_init`.
    pub connection_ack_timeout: Duration,
    pub user_agent: String,
}
impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            connection_ack_timeout: Duration::from_secs(5),
            user_agent: format!("graphql-lab/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// The websocket endpoint for an HTTP endpoint: the first `http` becomes
/// `ws`, so `https://` maps to `wss://`.
pub fn websocket_url(endpoint: &str) -> String {
    endpoint.replacen("http", "ws", 1)
}

/// Runs operations against an endpoint and records what happened.
///
/// An operation id runs at most once at a time. Clones share the running
/// markers and the history store.
#[derive(Clone, Debug)]
pub struct OperationRunner {
    client: reqwest::Client,
    config: RunnerConfig,
    registry: RunRegistry,
    history: HistoryStore,
}
impl OperationRunner {
    pub fn new(config: RunnerConfig, history: HistoryStore) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client, config, history))
    }

    pub fn with_client(client: reqwest::Client, config: RunnerConfig, history: HistoryStore) -> Self {
        Self {
            client,
            config,
            registry: RunRegistry::new(),
            history,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn is_running(&self, operation_id: Uuid) -> bool {
        self.registry.is_running(operation_id)
    }

    /// Aborts an in-flight request or tears down a live subscription. The
    /// running marker is cleared before this returns.
    pub fn stop(&self, operation_id: Uuid) -> bool {
        let stopped = self.registry.stop(operation_id);
        if stopped {
            tracing::info!(%operation_id, "Stopped operation.");
        }
        stopped
    }

    pub async fn fetch_schema(
        &self,
        endpoint: &str,
        headers: &IndexMap<String, String>,
    ) -> std::result::Result<Schema, IntrospectionError> {
        crate::schema::fetch_schema(&self.client, endpoint, headers).await
    }

    /// Runs `script` (when given) before the operation, the way the Run
    /// button does. A successful script's environment replaces `env` and
    /// its logs are attached to the history record. A failing script stops
    /// the run.
    pub async fn run_with_preflight<P: PromptHandler>(
        &self,
        operation: &Operation,
        endpoint: &str,
        env: &mut Environment,
        preflight: Option<(&PreflightRunner, &str)>,
        prompts: &P,
    ) -> Result<RunOutcome> {
        let preflight_logs = match preflight {
            Some((runner, script)) => {
                let result = runner.run(script, env, prompts).await?;
                if !result.is_success() {
                    return Ok(RunOutcome::PreflightFailed(result));
                }
                *env = result.env;
                result.logs
            },
            None => vec![],
        };

        self.run(operation, endpoint, env, preflight_logs).await
    }

    /// Runs the operation with `env` interpolated into its headers,
    /// variables and extensions.
    ///
    /// Queries and mutations are POSTed and awaited; the response is
    /// recorded in history even when it is an error or never arrived (then
    /// with status `0`). Subscriptions return as soon as the server has
    /// acknowledged them and keep appending messages in the background.
    ///
    /// Only malformed headers/variables/extensions text is an `Err`, and it
    /// is reported before the operation is marked as running.
    pub async fn run(
        &self,
        operation: &Operation,
        endpoint: &str,
        env: &Environment,
        preflight_logs: Vec<PreflightLog>,
    ) -> Result<RunOutcome> {
        if operation.query.trim().is_empty() {
            return Ok(RunOutcome::Failed {
                reason: "operation has no query text".to_string(),
            });
        }

        let parts = RequestParts::resolve(operation, env)?;
        let Some(ticket) = self.registry.try_register(operation.id) else {
            tracing::debug!(operation_id = %operation.id, "Operation is already running.");
            return Ok(RunOutcome::AlreadyRunning);
        };

        let outcome = if operation.is_subscription() {
            self.start_subscription(ticket, operation, endpoint, &parts, preflight_logs).await
        } else {
            self.send_request(ticket, operation, endpoint, &parts, preflight_logs).await
        };
        Ok(outcome)
    }

    async fn send_request(
        &self,
        ticket: RunTicket,
        operation: &Operation,
        endpoint: &str,
        parts: &RequestParts,
        preflight_logs: Vec<PreflightLog>,
    ) -> RunOutcome {
        let request = self.client
            .post(endpoint)
            .headers(request_headers(&parts.headers))
            .body(parts.request_body(&operation.query).to_string());

        let started = Instant::now();
        let exchange = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let headers = response_headers_json(response.headers());
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, headers, body))
        };

        let result = tokio::select! {
            biased;
            result = exchange => Some(result),
            _ = ticket.token().cancelled() => None,
        };
        self.registry.finish(&ticket);
        let duration = started.elapsed();

        let (status, headers, response) = match result {
            None => {
                tracing::info!(operation = %operation.name, "Request aborted.");
                return RunOutcome::Aborted;
            },
            Some(Ok(exchange)) => exchange,
            Some(Err(err)) => {
                tracing::warn!(operation = %operation.name, error = %err, "Request failed.");
                (0, "{}".to_string(), err.to_string())
            },
        };

        let record = HistoryRequest {
            id: Uuid::new_v4(),
            status,
            duration,
            size: response.len(),
            response,
            headers,
            operation: operation.clone(),
            preflight_logs,
            created_at: self.history.timestamp(),
        };
        tracing::info!(
            operation = %operation.name,
            status,
            duration_ms = duration.as_millis() as u64,
            size = record.size,
            "Request completed.",
        );
        self.history.add(HistoryRecord::Request(record.clone()));
        RunOutcome::Completed(record)
    }

    async fn start_subscription(
        &self,
        ticket: RunTicket,
        operation: &Operation,
        endpoint: &str,
        parts: &RequestParts,
        preflight_logs: Vec<PreflightLog>,
    ) -> RunOutcome {
        let url = websocket_url(endpoint);
        let connecting = graphql_ws::subscribe(
            &url,
            parts.connection_params(),
            parts.request_body(&operation.query),
            self.config.connection_ack_timeout,
        );

        let connected = tokio::select! {
            biased;
            _ = ticket.token().cancelled() => None,
            connected = connecting => Some(connected),
        };
        let events = match connected {
            None => {
                self.registry.finish(&ticket);
                return RunOutcome::Aborted;
            },
            Some(Err(err)) => {
                self.registry.finish(&ticket);
                tracing::warn!(operation = %operation.name, %url, error = %err, "Subscription failed to start.");
                return RunOutcome::Failed {
                    reason: err.to_string(),
                };
            },
            Some(Ok(events)) => events,
        };

        let history_id = self.history.add(HistoryRecord::Subscription(HistorySubscription {
            id: Uuid::new_v4(),
            responses: vec![],
            operation: operation.clone(),
            preflight_logs,
            created_at: self.history.timestamp(),
        }));
        tracing::info!(operation = %operation.name, %url, "Subscription started.");

        let runner = self.clone();
        tokio::spawn(async move {
            runner.pump_subscription(ticket, history_id, events).await;
        });
        RunOutcome::Subscribed { history_id }
    }

    /// Appends every message of `events` to the history record
    /// `history_id` until the stream ends or the run is stopped, then
    /// clears the running marker. Returns how many messages were recorded.
    ///
    /// A subscription whose transport fails before its first message leaves
    /// no history behind; its record is removed.
    pub(super) async fn pump_subscription<S>(
        &self,
        ticket: RunTicket,
        history_id: Uuid,
        events: S,
    ) -> usize
    where
        S: Stream<Item = SubscriptionEvent>,
    {
        let mut events = std::pin::pin!(events);
        let mut received = 0;
        let mut transport_failed = false;
        loop {
            let event = tokio::select! {
                biased;
                _ = ticket.token().cancelled() => {
                    tracing::debug!(%history_id, "Subscription stopped.");
                    break;
                },
                event = events.next() => event,
            };

            match event {
                Some(SubscriptionEvent::Next(payload)) => {
                    self.history.append_response(history_id, payload.to_string());
                    received += 1;
                },
                Some(SubscriptionEvent::Error(error)) => {
                    tracing::warn!(%history_id, %error, "Subscription ended with an error.");
                    transport_failed = true;
                    break;
                },
                Some(SubscriptionEvent::Complete) => {
                    tracing::info!(%history_id, "Subscription completed.");
                    break;
                },
                Some(SubscriptionEvent::Closed) | None => {
                    tracing::info!(%history_id, "Subscription connection closed.");
                    transport_failed = true;
                    break;
                },
            }
        }

        if transport_failed && received == 0 {
            self.history.remove(history_id);
        }
        self.registry.finish(&ticket);
        received
    }

    #[cfg(test)]
    pub(super) fn registry(&self) -> &RunRegistry {
        &self.registry
    }
}

/// The operation's headers with `Content-Type: application/json` forced on
/// top. Headers that are not valid HTTP are skipped.
fn request_headers(headers: &IndexMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len() + 1);
    for (name, value) in headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            },
            _ => tracing::warn!("Skipping invalid header `{name}`."),
        }
    }
    map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    map
}

fn response_headers_json(headers: &HeaderMap) -> String {
    let object = headers
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.as_str().to_string(), serde_json::Value::String(value))
        })
        .collect::<serde_json::Map<_, _>>();
    serde_json::to_string_pretty(&object).unwrap_or_else(|_| "{}".to_string())
}
