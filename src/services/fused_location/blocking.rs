use std::fs::File;

use tracing::{debug, info, instrument};
use zbus::{blocking::Connection, proxy::CacheProperties};

use crate::config::ClientConfig;

use super::{
    AccuracyLevel, Destination, FusedLocationError, FusedLocationServerProxyBlocking, Interval,
    PositionUpdates,
    client::{open_connection, service_has_owner},
};

/// Synchronous proxy for the FusedLocation service.
///
/// Every operation blocks the calling thread until the service replies or
/// the call fails. The proxy exclusively owns its bus connection: two
/// proxies built with [`ServiceProxy::connect`] never share one, and the
/// connection is released when the proxy is dropped.
#[derive(Debug)]
pub struct ServiceProxy {
    connection: Connection,
    proxy: FusedLocationServerProxyBlocking<'static>,
    destination: Destination,
}

impl ServiceProxy {
    /// Remote operations exposed by the proxy, by their wire names.
    pub const OPERATIONS: [&'static str; 4] =
        ["registerClient", "echo", "setAccuracy", "setDesiredInterval"];

    /// Connects to the FusedLocation service on the configured bus.
    ///
    /// Fails early: the service name must have an owner when the proxy is
    /// built.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError::Connection` if the bus is unreachable.
    /// Returns `FusedLocationError::ServiceNotFound` if no process owns the
    /// service name.
    #[instrument(skip(config), fields(bus = %config.bus))]
    pub fn connect(config: &ClientConfig) -> Result<Self, FusedLocationError> {
        Self::connect_to(config, Destination::default())
    }

    /// Connects to a service at a non-default destination.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceProxy::connect`].
    pub fn connect_to(
        config: &ClientConfig,
        destination: Destination,
    ) -> Result<Self, FusedLocationError> {
        let connection = zbus::block_on(async {
            let connection = open_connection(config).await?;
            if service_has_owner(&connection, &destination.service).await? {
                Ok::<_, FusedLocationError>(connection)
            } else {
                Err(FusedLocationError::ServiceNotFound {
                    service: destination.service.clone(),
                })
            }
        })?;

        let proxy = Self::with_connection(Connection::from(connection), destination)?;
        info!(service = %proxy.destination.service, "Connected to location service");

        Ok(proxy)
    }

    /// Builds a proxy on a connection owned by the caller.
    ///
    /// No ownership check is made; a missing service surfaces as
    /// `FusedLocationError::ServiceNotFound` on the first call.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError::InvalidArgument` if `destination` holds
    /// an invalid bus name, path or interface name.
    pub fn with_connection(
        connection: Connection,
        destination: Destination,
    ) -> Result<Self, FusedLocationError> {
        let proxy = FusedLocationServerProxyBlocking::builder(&connection)
            .destination(destination.service.clone())
            .and_then(|b| b.path(destination.path.clone()))
            .and_then(|b| b.interface(destination.interface.clone()))
            .map_err(|e| FusedLocationError::InvalidArgument {
                arg: "destination",
                reason: e.to_string(),
            })?
            .cache_properties(CacheProperties::No)
            .build()
            .map_err(|e| FusedLocationError::from_call("Introspect", &destination.service, e))?;

        Ok(Self {
            connection,
            proxy,
            destination,
        })
    }

    /// The remote object this proxy is bound to.
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
    pub fn register_client(&self) -> Result<(), FusedLocationError> {
        debug!("Registering the client");
        self.proxy
            .register_client()
            .map_err(|e| self.call_error("registerClient", e))
    }

    /// Sends `message` and returns the service's answer.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    pub fn echo(&self, message: &str) -> Result<String, FusedLocationError> {
        debug!(message, "Sending an echo");
        self.proxy
            .echo(message)
            .map_err(|e| self.call_error("echo", e))
    }

    /// Sets the desired accuracy level.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    pub fn set_accuracy(&self, level: AccuracyLevel) -> Result<(), FusedLocationError> {
        debug!(%level, "Setting desired accuracy");
        self.proxy
            .set_accuracy(level.into())
            .map_err(|e| self.call_error("setAccuracy", e))
    }

    /// Sets the desired update interval.
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    pub fn set_desired_interval(&self, interval: Interval) -> Result<(), FusedLocationError> {
        debug!(%interval, "Setting desired interval");
        self.proxy
            .set_desired_interval(interval.as_millis())
            .map_err(|e| self.call_error("setDesiredInterval", e))
    }

    /// Subscribes to position updates no more frequent than `interval`.
    ///
    /// The returned reader blocks on [`PositionUpdates::next_position`].
    ///
    /// # Errors
    ///
    /// Returns `FusedLocationError` if the remote call fails.
    pub fn subscribe(&self, interval: Interval) -> Result<PositionUpdates<File>, FusedLocationError> {
        debug!(%interval, "Subscribing to position updates");
        let fd = self
            .proxy
            .subscribe(interval.as_millis())
            .map_err(|e| self.call_error("subscribe", e))?;

        Ok(PositionUpdates::from_fd(fd))
    }

    fn call_error(&self, method: &'static str, error: zbus::Error) -> FusedLocationError {
        FusedLocationError::from_call(method, &self.destination.service, error)
    }
}
