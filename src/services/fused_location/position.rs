use std::{
    fs::File,
    io::{ErrorKind, Read},
    os::fd::OwnedFd,
};

use futures::{Stream, stream};
use serde::{Deserialize, Serialize};
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    net::unix::pipe,
};
use tracing::{debug, warn};

use super::FusedLocationError;

/// Size in bytes of one position record on the update stream.
pub const RECORD_SIZE: usize = 32;

const TIMESTAMP_OFFSET: usize = 0;
const LATITUDE_OFFSET: usize = 8;
const LONGITUDE_OFFSET: usize = 16;
const ALTITUDE_OFFSET: usize = 24;

/// A single position fix pushed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Unix time of the measurement, in seconds
    pub timestamp: i32,
    /// Latitude in degrees, -90.0 to 90.0
    pub latitude: f64,
    /// Longitude in degrees, -180.0 to 180.0
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: f64,
}

impl Position {
    /// Decodes a record in the service's native struct layout.
    ///
    /// The timestamp occupies the first four bytes and is followed by four
    /// bytes of padding; the three coordinates follow as native-endian
    /// doubles.
    pub fn from_record(record: &[u8; RECORD_SIZE]) -> Self {
        let mut timestamp = [0u8; 4];
        timestamp.copy_from_slice(&record[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 4]);

        Self {
            timestamp: i32::from_ne_bytes(timestamp),
            latitude: f64_at(record, LATITUDE_OFFSET),
            longitude: f64_at(record, LONGITUDE_OFFSET),
            altitude: f64_at(record, ALTITUDE_OFFSET),
        }
    }

    /// Encodes the position in the layout [`Position::from_record`] reads.
    pub fn to_record(&self) -> [u8; RECORD_SIZE] {
        let mut record = [0u8; RECORD_SIZE];
        record[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 4]
            .copy_from_slice(&self.timestamp.to_ne_bytes());
        record[LATITUDE_OFFSET..LATITUDE_OFFSET + 8].copy_from_slice(&self.latitude.to_ne_bytes());
        record[LONGITUDE_OFFSET..LONGITUDE_OFFSET + 8]
            .copy_from_slice(&self.longitude.to_ne_bytes());
        record[ALTITUDE_OFFSET..ALTITUDE_OFFSET + 8].copy_from_slice(&self.altitude.to_ne_bytes());
        record
    }
}

fn f64_at(record: &[u8; RECORD_SIZE], offset: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&record[offset..offset + 8]);
    f64::from_ne_bytes(bytes)
}

/// Position updates received from a subscription.
///
/// Owns the reading end handed out by the service's `subscribe` method.
/// Dropping it closes the descriptor, which the service observes as the
/// client going away.
#[derive(Debug)]
pub struct PositionUpdates<R = File> {
    source: R,
}

impl PositionUpdates<File> {
    /// Wraps the descriptor returned by `subscribe`.
    pub fn from_fd(fd: impl Into<OwnedFd>) -> Self {
        Self::new(File::from(fd.into()))
    }
}

impl<R: Read> PositionUpdates<R> {
    /// Reads records from an arbitrary byte source.
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Blocks until the next complete record arrives.
    ///
    /// Returns `Ok(None)` when the service closes the stream on a record
    /// boundary.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError::StreamClosed` if the stream ends inside
    /// a record, `FusedLocationError::Io` if reading fails.
    pub fn next_position(&mut self) -> Result<Option<Position>, FusedLocationError> {
        let mut record = [0u8; RECORD_SIZE];
        let mut filled = 0;

        while filled < RECORD_SIZE {
            match self.source.read(&mut record[filled..]) {
                Ok(0) if filled == 0 => {
                    debug!("Position stream closed by the service");
                    return Ok(None);
                }
                Ok(0) => {
                    return Err(FusedLocationError::StreamClosed {
                        received: filled,
                        expected: RECORD_SIZE,
                    });
                }
                Ok(read) => filled += read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(FusedLocationError::Io(e)),
            }
        }

        Ok(Some(Position::from_record(&record)))
    }
}

impl<R: Read> Iterator for PositionUpdates<R> {
    type Item = Result<Position, FusedLocationError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_position().transpose()
    }
}

impl PositionUpdates<File> {
    /// Converts the updates into an async stream.
    ///
    /// The descriptor is switched to non-blocking mode and registered with
    /// the tokio reactor, so this must be called from within a tokio
    /// runtime. The stream owns the descriptor: dropping it closes the
    /// subscription without waiting for the service.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError::Io` if the descriptor is not the read
    /// end of a pipe or cannot be registered.
    pub fn into_stream(
        self,
    ) -> Result<impl Stream<Item = Result<Position, FusedLocationError>> + Send, FusedLocationError>
    {
        let receiver = pipe::Receiver::from_owned_fd(OwnedFd::from(self.source))?;
        Ok(stream_positions(receiver))
    }
}

/// Streams position records from an async byte source.
///
/// Ends at end of file on a record boundary, or after the first error,
/// which is yielded.
fn stream_positions<R>(source: R) -> impl Stream<Item = Result<Position, FusedLocationError>> + Send
where
    R: AsyncRead + Unpin + Send,
{
    stream::unfold(Some(source), |source| async move {
        let mut source = source?;

        match read_record(&mut source).await {
            Ok(Some(position)) => Some((Ok(position), Some(source))),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Position stream failed");
                Some((Err(e), None))
            }
        }
    })
}

async fn read_record<R>(source: &mut R) -> Result<Option<Position>, FusedLocationError>
where
    R: AsyncRead + Unpin,
{
    let mut record = [0u8; RECORD_SIZE];
    let mut filled = 0;

    while filled < RECORD_SIZE {
        match source.read(&mut record[filled..]).await {
            Ok(0) if filled == 0 => {
                debug!("Position stream closed by the service");
                return Ok(None);
            }
            Ok(0) => {
                return Err(FusedLocationError::StreamClosed {
                    received: filled,
                    expected: RECORD_SIZE,
                });
            }
            Ok(read) => filled += read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FusedLocationError::Io(e)),
        }
    }

    Ok(Some(Position::from_record(&record)))
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Cursor, Write},
        time::Duration,
    };

    use futures::StreamExt;
    use tokio::{pin, runtime::Runtime};

    use super::*;

    fn sample(timestamp: i32) -> Position {
        Position {
            timestamp,
            latitude: 52.2297,
            longitude: 21.0122,
            altitude: 100.5,
        }
    }

    #[test]
    fn record_layout_matches_native_struct() {
        let record = sample(1_462_000_000).to_record();

        assert_eq!(&record[0..4], &1_462_000_000i32.to_ne_bytes());
        assert_eq!(&record[4..8], &[0, 0, 0, 0]);
        assert_eq!(&record[8..16], &52.2297f64.to_ne_bytes());
        assert_eq!(&record[24..32], &100.5f64.to_ne_bytes());
    }

    #[test]
    fn reads_consecutive_records_then_ends() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&sample(1).to_record());
        bytes.extend_from_slice(&sample(2).to_record());

        let mut updates = PositionUpdates::new(Cursor::new(bytes));

        assert_eq!(updates.next_position().unwrap(), Some(sample(1)));
        assert_eq!(updates.next_position().unwrap(), Some(sample(2)));
        assert_eq!(updates.next_position().unwrap(), None);
    }

    #[test]
    fn truncated_record_is_an_error() {
        let record = sample(7).to_record();
        let mut updates = PositionUpdates::new(Cursor::new(record[..20].to_vec()));

        let err = updates.next_position().unwrap_err();
        assert!(matches!(
            err,
            FusedLocationError::StreamClosed {
                received: 20,
                expected: RECORD_SIZE
            }
        ));
    }

    #[test]
    fn reassembles_records_split_across_reads() {
        struct Trickle {
            data: Vec<u8>,
            pos: usize,
        }

        impl Read for Trickle {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.pos >= self.data.len() || buf.is_empty() {
                    return Ok(0);
                }
                let n = 3.min(buf.len()).min(self.data.len() - self.pos);
                buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
                self.pos += n;
                Ok(n)
            }
        }

        let updates = PositionUpdates::new(Trickle {
            data: sample(42).to_record().to_vec(),
            pos: 0,
        });

        let positions: Vec<Position> = updates.map(|u| u.unwrap()).collect();
        assert_eq!(positions, vec![sample(42)]);
    }

    #[tokio::test]
    async fn stream_yields_records_then_ends() {
        let mut bytes = Vec::new();
        for t in 0..3 {
            bytes.extend_from_slice(&sample(t).to_record());
        }

        let positions: Vec<_> = stream_positions(Cursor::new(bytes)).collect().await;

        assert_eq!(positions.len(), 3);
        assert_eq!(positions[2].as_ref().unwrap().timestamp, 2);
    }

    #[tokio::test]
    async fn stream_stops_after_error() {
        let mut bytes = sample(1).to_record().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);

        let updates: Vec<_> = stream_positions(Cursor::new(bytes)).collect().await;

        assert_eq!(updates.len(), 2);
        assert!(updates[0].is_ok());
        assert!(matches!(
            updates[1],
            Err(FusedLocationError::StreamClosed { received: 3, .. })
        ));
    }

    #[tokio::test]
    async fn pipe_stream_reads_records_as_they_arrive() {
        let (reader, mut writer) = std::io::pipe().unwrap();
        let stream = PositionUpdates::from_fd(OwnedFd::from(reader))
            .into_stream()
            .unwrap();
        pin!(stream);

        writer.write_all(&sample(5).to_record()).unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap(), sample(5));

        drop(writer);
        assert!(stream.next().await.is_none());
    }

    #[test]
    fn into_stream_rejects_non_pipe_descriptor() {
        let runtime = Runtime::new().unwrap();
        let file = tempfile::tempfile().unwrap();

        let result = runtime.block_on(async { PositionUpdates::new(file).into_stream().map(|_| ()) });

        assert!(matches!(result, Err(FusedLocationError::Io(_))));
    }

    #[test]
    fn dropping_stream_closes_descriptor_without_waiting_for_service() {
        let (reader, mut writer) = std::io::pipe().unwrap();
        let runtime = Runtime::new().unwrap();

        runtime.block_on(async {
            let stream = PositionUpdates::from_fd(OwnedFd::from(reader))
                .into_stream()
                .unwrap();
            pin!(stream);

            let pending = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
            assert!(pending.is_err(), "no record was written yet");
        });

        let err = writer.write_all(&sample(1).to_record()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            drop(runtime);
            let _ = done_tx.send(());
        });
        assert!(
            done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
            "runtime shutdown waited on the subscription"
        );
    }
}
