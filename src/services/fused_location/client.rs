use tracing::{debug, info, instrument};
use zbus::{Connection, connection, fdo::DBusProxy, names::BusName, proxy::CacheProperties};

use crate::config::{BusKind, ClientConfig};

use super::{
    AccuracyLevel, Destination, FusedLocationError, FusedLocationServerProxy, Interval,
    PositionUpdates,
};

/// Opens a private connection to the configured bus.
///
/// Every call opens a new connection; nothing is shared with other
/// clients in the process.
pub(crate) async fn open_connection(config: &ClientConfig) -> Result<Connection, FusedLocationError> {
    let builder = match config.bus {
        BusKind::Session => connection::Builder::session(),
        BusKind::System => connection::Builder::system(),
    }
    .map_err(FusedLocationError::connection)?;

    let builder = match config.method_timeout() {
        Some(timeout) => builder.method_timeout(timeout),
        None => builder,
    };

    builder.build().await.map_err(FusedLocationError::connection)
}

/// Checks whether `service` currently has an owner on the bus `connection`
/// is attached to.
pub(crate) async fn service_has_owner(
    connection: &Connection,
    service: &str,
) -> Result<bool, FusedLocationError> {
    let name = BusName::try_from(service).map_err(|e| FusedLocationError::InvalidArgument {
        arg: "service",
        reason: e.to_string(),
    })?;

    let dbus = DBusProxy::new(connection)
        .await
        .map_err(|e| FusedLocationError::from_call("NameHasOwner", service, e))?;

    dbus.name_has_owner(name)
        .await
        .map_err(|e| FusedLocationError::from_call("NameHasOwner", service, e.into()))
}

/// Async client for the FusedLocation service.
///
/// Owns its bus connection for its whole lifetime; dropping the client
/// releases it. Every remote operation forwards its arguments unchanged and
/// surfaces the service's error replies as [`FusedLocationError`].
///
/// A client cannot be cloned into a second handle on the same connection:
///
/// ```compile_fail
/// fn needs_clone<T: Clone>() {}
/// needs_clone::<fusedloc::services::FusedLocationClient>();
/// ```
#[derive(Debug)]
pub struct FusedLocationClient {
    connection: Connection,
    proxy: FusedLocationServerProxy<'static>,
    destination: Destination,
}

impl FusedLocationClient {
    /// Connects to the FusedLocation service on the configured bus.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError::Connection` if the bus is unreachable.
    /// Returns `FusedLocationError::ServiceNotFound` if no process owns the
    /// service name.
    #[instrument(skip(config), fields(bus = %config.bus))]
    pub async fn connect(config: &ClientConfig) -> Result<Self, FusedLocationError> {
        Self::connect_to(config, Destination::default()).await
    }

    /// Connects to a service at a non-default destination.
    ///
    /// # Errors
    ///
    /// Same as [`FusedLocationClient::connect`].
    pub async fn connect_to(
        config: &ClientConfig,
        destination: Destination,
    ) -> Result<Self, FusedLocationError> {
        let connection = open_connection(config).await?;

        if !service_has_owner(&connection, &destination.service).await? {
            return Err(FusedLocationError::ServiceNotFound {
                service: destination.service,
            });
        }

        let client = Self::with_connection(connection, destination).await?;
        info!(service = %client.destination.service, "Connected to location service");

        Ok(client)
    }

    /// Builds a client on a connection owned by the caller.
    ///
    /// No ownership check is made, so a missing service only shows up on the
    /// first call. Used with peer-to-peer connections, which have no bus
    /// daemon to ask.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError::InvalidArgument` if `destination` holds
    /// an invalid bus name, path or interface name.
    pub async fn with_connection(
        connection: Connection,
        destination: Destination,
    ) -> Result<Self, FusedLocationError> {
        let proxy = FusedLocationServerProxy::builder(&connection)
            .destination(destination.service.clone())
            .and_then(|b| b.path(destination.path.clone()))
            .and_then(|b| b.interface(destination.interface.clone()))
            .map_err(|e| FusedLocationError::InvalidArgument {
                arg: "destination",
                reason: e.to_string(),
            })?
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .map_err(|e| FusedLocationError::from_call("Introspect", &destination.service, e))?;

        Ok(Self {
            connection,
            proxy,
            destination,
        })
    }

    /// The remote object this client is bound to.
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// The underlying bus connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Registers this connection as a location consumer.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    #[instrument(skip(self))]
    pub async fn register_client(&self) -> Result<(), FusedLocationError> {
        debug!("Registering the client");
        self.proxy
            .register_client()
            .await
            .map_err(|e| self.call_error("registerClient", e))
    }

    /// Sends `message` and returns the service's answer.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    #[instrument(skip(self))]
    pub async fn echo(&self, message: &str) -> Result<String, FusedLocationError> {
        debug!("Sending an echo");
        self.proxy
            .echo(message)
            .await
            .map_err(|e| self.call_error("echo", e))
    }

    /// Sets the desired accuracy level.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    #[instrument(skip(self))]
    pub async fn set_accuracy(&self, level: AccuracyLevel) -> Result<(), FusedLocationError> {
        debug!("Setting desired accuracy");
        self.proxy
            .set_accuracy(level.into())
            .await
            .map_err(|e| self.call_error("setAccuracy", e))
    }

    /// Sets the desired update interval.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    #[instrument(skip(self))]
    pub async fn set_desired_interval(&self, interval: Interval) -> Result<(), FusedLocationError> {
        debug!("Setting desired interval");
        self.proxy
            .set_desired_interval(interval.as_millis())
            .await
            .map_err(|e| self.call_error("setDesiredInterval", e))
    }

    /// Subscribes to position updates no more frequent than `interval`.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, interval: Interval) -> Result<PositionUpdates, FusedLocationError> {
        debug!("Subscribing to position updates");
        let fd = self
            .proxy
            .subscribe(interval.as_millis())
            .await
            .map_err(|e| self.call_error("subscribe", e))?;

        Ok(PositionUpdates::from_fd(fd))
    }

    fn call_error(&self, method: &'static str, error: zbus::Error) -> FusedLocationError {
        FusedLocationError::from_call(method, &self.destination.service, error)
    }
}
