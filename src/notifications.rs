//! # Notification Feed
//!
//! Staff panels show a live list of server notifications (new orders,
//! delivery updates). The server pushes them as text frames over a
//! WebSocket; each frame is parsed into a [`Notification`] and kept in a
//! bounded [`NotificationFeed`], newest first.
//!
//! The listener runs in its own task and never touches the resource stores.
//! Panels that want fresh data after a notification dispatch a fetch
//! themselves.

use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("websocket error: {0}")]
    WebSocket(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for NotificationError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        NotificationError::WebSocket(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub received_at: DateTime<Utc>,
    pub payload: Value,
}

impl Notification {
    /// The human-readable line to show, taken from a `message` field when the
    /// payload has one.
    pub fn message(&self) -> String {
        match &self.payload {
            Value::String(text) => text.clone(),
            Value::Object(fields) => match fields.get("message") {
                Some(Value::String(text)) => text.clone(),
                _ => self.payload.to_string(),
            },
            other => other.to_string(),
        }
    }
}

/// Turns one text frame into a notification. Frames that are not JSON are
/// kept verbatim as a string payload; blank frames are dropped.
pub fn parse_notification(text: &str) -> Option<Notification> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let payload = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
    Some(Notification {
        received_at: Utc::now(),
        payload,
    })
}

struct FeedState {
    items: VecDeque<Notification>,
    unread: usize,
}

/// Bounded, newest-first list of notifications shared between the listener
/// task and the panels.
#[derive(Clone)]
pub struct NotificationFeed {
    capacity: usize,
    state: Arc<Mutex<FeedState>>,
    changed: Arc<watch::Sender<usize>>,
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            capacity: capacity.max(1),
            state: Arc::new(Mutex::new(FeedState {
                items: VecDeque::new(),
                unread: 0,
            })),
            changed: Arc::new(changed),
        }
    }

    pub fn push(&self, notification: Notification) {
        let unread = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.items.push_front(notification);
            state.items.truncate(self.capacity);
            state.unread = (state.unread + 1).min(self.capacity);
            state.unread
        };
        self.changed.send_replace(unread);
    }

    pub fn items(&self) -> Vec<Notification> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unread(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).unread
    }

    pub fn mark_all_read(&self) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).unread = 0;
        self.changed.send_replace(0);
    }

    /// Yields the unread count every time it changes.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.changed.subscribe()
    }
}

/// Handle to a running listener task.
pub struct NotificationListener {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), NotificationError>>,
}

impl NotificationListener {
    /// Connects to `url` in a background task and feeds every text frame into
    /// `feed` until the server closes the socket or [`stop`](Self::stop) is
    /// called.
    pub fn spawn(url: String, feed: NotificationFeed) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(listen(url, feed, shutdown_rx));
        Self {
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    /// True once the task has ended on its own: the server closed the socket
    /// or the connection failed.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn stop(mut self) -> Result<(), NotificationError> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(NotificationError::WebSocket(format!("listener task failed: {e}"))),
        }
    }
}

async fn listen(
    url: String,
    feed: NotificationFeed,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<(), NotificationError> {
    info!(%url, "Connecting to notification channel");
    let (stream, _) = tokio::select! {
        connected = connect_async(url.as_str()) => connected?,
        _ = &mut shutdown => {
            info!("Notification channel stopped before it connected");
            return Ok(());
        }
    };
    let (mut write, mut read) = stream.split();
    info!("Notification channel connected");

    loop {
        tokio::select! {
            message = read.next() => {
                match message {
                    Some(Ok(WsMessage::Text(text))) => {
                        if let Some(notification) = parse_notification(text.as_str()) {
                            debug!("Notification received");
                            feed.push(notification);
                        }
                    }
                    Some(Ok(WsMessage::Ping(data))) => {
                        write.send(WsMessage::Pong(data)).await?;
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        info!(?frame, "Notification channel closed by server");
                        return Ok(());
                    }
                    Some(Ok(WsMessage::Binary(_))) => {
                        warn!("Ignoring binary notification frame");
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!(?e, "Notification channel error");
                        return Err(e.into());
                    }
                    None => {
                        info!("Notification channel ended");
                        return Ok(());
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Closing notification channel");
                let _ = write.send(WsMessage::Close(None)).await;
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_parse_notification() {
        let parsed = parse_notification(r#"{"message":"New order ORD-7"}"#).unwrap();
        assert_eq!(parsed.payload, json!({"message": "New order ORD-7"}));
        assert_eq!(parsed.message(), "New order ORD-7");

        let plain = parse_notification("Order shipped").unwrap();
        assert_eq!(plain.payload, Value::String("Order shipped".into()));
        assert_eq!(plain.message(), "Order shipped");

        assert!(parse_notification("   ").is_none());
    }

    #[test]
    fn test_feed_is_bounded_and_newest_first() {
        let feed = NotificationFeed::new(2);
        for text in ["one", "two", "three"] {
            feed.push(parse_notification(text).unwrap());
        }

        let messages: Vec<String> = feed.items().iter().map(Notification::message).collect();
        assert_eq!(messages, vec!["three", "two"]);
        assert_eq!(feed.unread(), 2);

        feed.mark_all_read();
        assert_eq!(feed.unread(), 0);
        assert_eq!(feed.len(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_unread_count() {
        let feed = NotificationFeed::new(5);
        let mut unread = feed.subscribe();

        feed.push(parse_notification("hello").unwrap());
        unread.changed().await.unwrap();
        assert_eq!(*unread.borrow(), 1);
    }

    #[tokio::test]
    async fn test_stop_while_handshake_is_pending() {
        let server = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        let (accepted_tx, accepted_rx) = oneshot::channel();
        let silent_peer = tokio::spawn(async move {
            let (socket, _) = server.accept().await.unwrap();
            let _ = accepted_tx.send(());
            // Hold the socket open without answering the upgrade.
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let url = format!("ws://{addr}/notifications");
        let listener = NotificationListener::spawn(url, NotificationFeed::new(5));
        accepted_rx.await.unwrap();

        let stopped = tokio::time::timeout(Duration::from_secs(5), listener.stop()).await;
        assert!(matches!(stopped, Ok(Ok(()))));
        silent_peer.abort();
    }

    #[tokio::test]
    async fn test_listener_reports_connection_failure() {
        let feed = NotificationFeed::new(5);
        let listener = NotificationListener::spawn("ws://127.0.0.1:1/notifications".into(), feed);
        tokio::time::timeout(Duration::from_secs(5), async {
            while !listener.is_finished() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        assert!(listener.stop().await.is_err());
    }
}
