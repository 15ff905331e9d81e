//! In-process FusedLocation provider for integration tests.
//!
//! Serves the provider interface on one end of a unix socket pair and hands
//! the other end back as a peer-to-peer client connection, so no bus daemon
//! is involved.

#![allow(dead_code)]

use std::{
    io::{self, Write},
    os::{fd::OwnedFd, unix::net::UnixStream},
    sync::{Arc, Mutex},
};

use fusedloc::services::{Position, fused_location::OBJECT_PATH};
use zbus::{Connection, Guid, connection, fdo, zvariant};

/// A method call as the stub received it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register,
    Echo(String),
    Accuracy(u32),
    Interval(u32),
    Subscribe(u32),
}

/// Provider stub recording every call it receives.
#[derive(Debug, Clone, Default)]
pub struct StubServer {
    calls: Arc<Mutex<Vec<Call>>>,
    positions: Arc<Vec<Position>>,
    trailing: Arc<Vec<u8>>,
}

impl StubServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions written to every subscriber before the stream is closed.
    pub fn with_positions(mut self, positions: Vec<Position>) -> Self {
        self.positions = Arc::new(positions);
        self
    }

    /// Raw bytes written after the positions, before closing.
    pub fn with_trailing_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.trailing = Arc::new(bytes);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[zbus::interface(name = "org.tizen.lbs.Providers.FusedLocation.Server")]
impl StubServer {
    #[zbus(name = "registerClient")]
    fn register_client(&self) {
        self.record(Call::Register);
    }

    #[zbus(name = "echo")]
    fn echo(&self, message: String) -> String {
        self.record(Call::Echo(message.clone()));
        message
    }

    #[zbus(name = "setAccuracy")]
    fn set_accuracy(&self, level: u32) {
        self.record(Call::Accuracy(level));
    }

    #[zbus(name = "setDesiredInterval")]
    fn set_desired_interval(&self, interval: u32) -> fdo::Result<()> {
        self.record(Call::Interval(interval));
        if interval == 0 {
            return Err(fdo::Error::Failed("interval must be positive".to_string()));
        }
        Ok(())
    }

    #[zbus(name = "subscribe")]
    fn subscribe(&self, interval: u32) -> fdo::Result<zvariant::OwnedFd> {
        self.record(Call::Subscribe(interval));

        let (reader, mut writer) = io::pipe().map_err(|e| fdo::Error::IOError(e.to_string()))?;
        for position in self.positions.iter() {
            writer
                .write_all(&position.to_record())
                .map_err(|e| fdo::Error::IOError(e.to_string()))?;
        }
        writer
            .write_all(&self.trailing)
            .map_err(|e| fdo::Error::IOError(e.to_string()))?;
        drop(writer);

        Ok(OwnedFd::from(reader).into())
    }
}

/// Serves `stub` and returns `(server, client)` connections.
///
/// The server connection must be kept alive for as long as the client is
/// used.
pub async fn connect_pair(stub: StubServer) -> zbus::Result<(Connection, Connection)> {
    let (server_end, client_end) = UnixStream::pair()?;
    let guid = Guid::generate();

    futures::try_join!(
        connection::Builder::unix_stream(server_end)
            .server(guid)?
            .p2p()
            .serve_at(OBJECT_PATH, stub)?
            .build(),
        connection::Builder::unix_stream(client_end).p2p().build(),
    )
}

pub fn position(timestamp: i32) -> Position {
    Position {
        timestamp,
        latitude: 50.0614 + f64::from(timestamp) * 0.001,
        longitude: 19.9366,
        altitude: 219.0,
    }
}
