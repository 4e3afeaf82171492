use futures::SinkExt;
use futures::Stream;
use futures::StreamExt;
use futures::stream::BoxStream;
use std::time::Duration;
use tokio_tungstenite::MaybeTlsStream;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;

type Result<T> = std::result::Result<T, TransportError>;
type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Sub-protocol negotiated with the server.
pub const GRAPHQL_WS_PROTOCOL: &str = "graphql-transport-ws";

/// The single subscription a connection carries.
const SUBSCRIPTION_ID: &str = "1";

/// What a subscription delivers. Every variant except `Next` is the last
/// event of its stream.
#[derive(Clone, Debug, PartialEq)]
pub enum SubscriptionEvent {
    Next(serde_json::Value),
    Error(String),
    Complete,
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("failed to encode a graphql-ws message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("server did not acknowledge the connection within {0:?}")]
    AckTimeout(Duration),

    #[error("expected connection_ack, got {0}")]
    UnexpectedMessage(String),

    #[error("connection closed before it was acknowledged")]
    ClosedBeforeAck,
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    ConnectionInit {
        payload: serde_json::Map<String, serde_json::Value>,
    },
    Subscribe {
        id: String,
        payload: serde_json::Value,
    },
    Pong {
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<serde_json::Value>,
    },
}
impl ClientMessage {
    fn into_message(self) -> Result<Message> {
        Ok(Message::text(serde_json::to_string(&self)?))
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerMessage {
    ConnectionAck {
        #[serde(default)]
        #[allow(dead_code)]
        payload: Option<serde_json::Value>,
    },
    Next {
        #[allow(dead_code)]
        id: String,
        payload: serde_json::Value,
    },
    Error {
        #[serde(default)]
        #[allow(dead_code)]
        id: Option<String>,
        payload: serde_json::Value,
    },
    Complete {
        #[allow(dead_code)]
        id: String,
    },
    Ping {
        #[serde(default)]
        payload: Option<serde_json::Value>,
    },
    Pong {
        #[serde(default)]
        #[allow(dead_code)]
        payload: Option<serde_json::Value>,
    },
}

/// Opens a graphql-ws connection to `url`, waits for the server's
/// acknowledgement and subscribes with `request` (a GraphQL request body).
///
/// The returned stream ends after its first terminal event. Dropping it
/// drops the connection.
pub(super) async fn subscribe(
    url: &str,
    connection_params: serde_json::Map<String, serde_json::Value>,
    request: serde_json::Value,
    ack_timeout: Duration,
) -> Result<BoxStream<'static, SubscriptionEvent>> {
    let mut ws_request = url.into_client_request()?;
    ws_request.headers_mut().insert(
        SEC_WEBSOCKET_PROTOCOL,
        HeaderValue::from_static(GRAPHQL_WS_PROTOCOL),
    );

    let (mut socket, _response) = connect_async(ws_request).await?;
    tracing::debug!(url, "Websocket connected; sending connection_init.");
    socket
        .send(ClientMessage::ConnectionInit { payload: connection_params }.into_message()?)
        .await?;

    tokio::time::timeout(ack_timeout, wait_for_ack(&mut socket))
        .await
        .map_err(|_| TransportError::AckTimeout(ack_timeout))??;

    socket
        .send(ClientMessage::Subscribe {
            id: SUBSCRIPTION_ID.to_string(),
            payload: request,
        }.into_message()?)
        .await?;

    Ok(events(socket).boxed())
}

async fn wait_for_ack(socket: &mut Socket) -> Result<()> {
    while let Some(message) = socket.next().await {
        let text = match message? {
            Message::Text(text) => text,
            Message::Close(_) => return Err(TransportError::ClosedBeforeAck),
            _ => continue,
        };
        match serde_json::from_str::<ServerMessage>(text.as_str()) {
            Ok(ServerMessage::ConnectionAck { .. }) => return Ok(()),
            Ok(ServerMessage::Ping { payload }) =>
                socket.send(ClientMessage::Pong { payload }.into_message()?).await?,
            _ => return Err(TransportError::UnexpectedMessage(text.as_str().to_string())),
        }
    }
    Err(TransportError::ClosedBeforeAck)
}

fn events(socket: Socket) -> impl Stream<Item = SubscriptionEvent> + Send {
    futures::stream::unfold(Some(socket), |socket| async move {
        let mut socket = socket?;
        loop {
            let terminal = match socket.next().await {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(ServerMessage::Next { payload, .. }) =>
                            return Some((SubscriptionEvent::Next(payload), Some(socket))),
                        Ok(ServerMessage::Ping { payload }) => {
                            let pong = ClientMessage::Pong { payload }.into_message();
                            if let Ok(pong) = pong
                                && let Err(err) = socket.send(pong).await {
                                SubscriptionEvent::Error(err.to_string())
                            } else {
                                continue;
                            }
                        },
                        Ok(ServerMessage::Error { payload, .. }) =>
                            SubscriptionEvent::Error(payload.to_string()),
                        Ok(ServerMessage::Complete { .. }) => SubscriptionEvent::Complete,
                        Ok(ServerMessage::ConnectionAck { .. } | ServerMessage::Pong { .. }) =>
                            continue,
                        Err(err) => SubscriptionEvent::Error(
                            format!("unreadable graphql-ws message: {err}"),
                        ),
                    }
                },
                Some(Ok(Message::Close(_))) | None => SubscriptionEvent::Closed,
                Some(Ok(_)) => continue,
                Some(Err(err)) => SubscriptionEvent::Error(err.to_string()),
            };
            return Some((terminal, None));
        }
    })
}
