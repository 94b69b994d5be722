use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::error::ClientError;

use super::{Connection, ConnectionEvent};

/// Websocket transport. Frames are moved across unbounded channels by a
/// background task; all state handling stays with whoever drains the events.
pub struct WsConnection {
    url: String,
    open: Arc<AtomicBool>,
    outbound: Option<mpsc::UnboundedSender<Outbound>>,
    events: mpsc::UnboundedSender<ConnectionEvent>,
    task: Option<JoinHandle<()>>,
}

enum Outbound {
    Text(String),
    Close,
}

impl WsConnection {
    pub fn new(url: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<ConnectionEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let connection = Self {
            url: url.into(),
            open: Arc::new(AtomicBool::new(false)),
            outbound: None,
            events,
            task: None,
        };
        (connection, events_rx)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Connection for WsConnection {
    fn open(&mut self) -> Result<(), ClientError> {
        // a previous task is left to finish its close handshake; it keeps its
        // own open flag so it cannot clear the new one
        if self.task.take().is_some_and(|task| !task.is_finished()) {
            tracing::debug!("previous game server connection still closing");
        }
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        self.outbound = Some(outbound_tx);
        self.open = Arc::new(AtomicBool::new(false));

        let url = self.url.clone();
        let open = Arc::clone(&self.open);
        let events = self.events.clone();
        self.task = Some(tokio::spawn(async move {
            let close_reason = Mutex::new(None);
            if let Err(e) = run_connection(&url, &open, &events, outbound_rx, &close_reason).await {
                tracing::warn!("game server WS error: {e}");
                close_reason.lock().get_or_insert_with(|| e.to_string());
            }
            open.store(false, Ordering::SeqCst);
            let reason = close_reason.lock().take();
            let _ = events.send(ConnectionEvent::Closed { reason });
        }));
        Ok(())
    }

    fn close(&mut self) {
        self.open.store(false, Ordering::SeqCst);
        if let Some(outbound) = self.outbound.take() {
            let _ = outbound.send(Outbound::Close);
        }
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn send(&mut self, text: String) -> Result<(), ClientError> {
        if !self.is_open() {
            return Err(ClientError::NotConnected);
        }
        let outbound = self.outbound.as_ref().ok_or(ClientError::NotConnected)?;
        outbound
            .send(Outbound::Text(text))
            .map_err(|_| ClientError::NotConnected)
    }
}

impl Drop for WsConnection {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_connection(
    url: &str,
    open: &AtomicBool,
    events: &mpsc::UnboundedSender<ConnectionEvent>,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    close_reason: &Mutex<Option<String>>,
) -> Result<(), ClientError> {
    tracing::info!("connecting to game server: {url}");
    let (ws_stream, _) = connect_async(url).await?;
    tracing::info!("game server WS connected");

    let (mut write, mut read) = ws_stream.split();
    open.store(true, Ordering::SeqCst);
    let _ = events.send(ConnectionEvent::Opened);

    loop {
        tokio::select! {
            cmd = outbound.recv() => match cmd {
                Some(Outbound::Text(text)) => write.send(Message::Text(text)).await?,
                Some(Outbound::Close) | None => {
                    let _ = write.send(Message::Close(None)).await;
                    break;
                }
            },
            msg = read.next() => {
                let Some(msg) = msg else { break };
                match msg? {
                    Message::Text(text) => {
                        let _ = events.send(ConnectionEvent::Message(text));
                    }
                    Message::Close(frame) => {
                        if let Some(frame) = frame {
                            tracing::info!("game server closed connection: {} {}", frame.code, frame.reason);
                            *close_reason.lock() = Some(frame.reason.to_string());
                        }
                        break;
                    }
                    _ => continue,
                }
            }
        }
    }

    Ok(())
}
