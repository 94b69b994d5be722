pub mod ws;

use crate::error::ClientError;

pub use ws::WsConnection;

/// What the transport reports back to the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Opened,
    Message(String),
    Closed { reason: Option<String> },
}

/// A bidirectional text-frame channel to the game server.
///
/// `open` starts connecting and returns immediately; the outcome arrives later
/// as a [`ConnectionEvent`]. Implementations never retry on their own.
pub trait Connection {
    fn open(&mut self) -> Result<(), ClientError>;
    fn close(&mut self);
    fn is_open(&self) -> bool;
    fn send(&mut self, text: String) -> Result<(), ClientError>;
}

/// In-memory connection. Everything sent is kept in `sent`.
#[derive(Debug, Default)]
pub struct MemoryConnection {
    pub open: bool,
    pub opens: usize,
    pub sent: Vec<String>,
}

impl Connection for MemoryConnection {
    fn open(&mut self) -> Result<(), ClientError> {
        self.opens += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn send(&mut self, text: String) -> Result<(), ClientError> {
        if !self.open {
            return Err(ClientError::NotConnected);
        }
        self.sent.push(text);
        Ok(())
    }
}
