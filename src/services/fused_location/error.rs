use std::io;

/// Well-known D-Bus error names reported when the remote object is missing.
const SERVICE_MISSING_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
    "org.freedesktop.DBus.Error.UnknownObject",
];

/// Well-known D-Bus error names reported when a reply never arrived.
const TIMEOUT_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.NoReply",
    "org.freedesktop.DBus.Error.Timeout",
    "org.freedesktop.DBus.Error.TimedOut",
];

/// Errors that can occur while talking to the FusedLocation service
#[derive(thiserror::Error, Debug)]
pub enum FusedLocationError {
    /// The message bus could not be reached
    #[error("Failed to connect to the message bus: {0}")]
    Connection(#[source] zbus::Error),

    /// The service name or object is not registered on the bus
    #[error("Service {service} is not available on the bus")]
    ServiceNotFound {
        /// Service or object that could not be resolved
        service: String,
    },

    /// The remote method failed or returned an error reply
    #[error("Remote call {method} failed: {}", describe_remote(.name, .message))]
    RemoteCall {
        /// Remote method that failed
        method: &'static str,
        /// D-Bus error name, if the failure was an error reply
        name: Option<String>,
        /// Error message reported by the bus or the service
        message: String,
    },

    /// No reply arrived before the bus timeout expired
    #[error("Remote call {method} timed out")]
    Timeout {
        /// Remote method that timed out
        method: &'static str,
    },

    /// An argument cannot be represented on the wire
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The offending argument
        arg: &'static str,
        /// Why the argument was rejected
        reason: String,
    },

    /// The position stream ended in the middle of a record
    #[error("Position stream closed after {received} of {expected} bytes")]
    StreamClosed {
        /// Bytes of the partial record that did arrive
        received: usize,
        /// Size of a complete record
        expected: usize,
    },

    /// Reading the position stream failed
    #[error("Position stream error: {0}")]
    Io(#[from] io::Error),
}

fn describe_remote(name: &Option<String>, message: &str) -> String {
    match name {
        Some(name) => format!("{name}: {message}"),
        None => message.to_string(),
    }
}

impl FusedLocationError {
    /// Wraps an error raised while opening the bus connection.
    pub fn connection(error: zbus::Error) -> Self {
        FusedLocationError::Connection(error)
    }

    /// Classifies a failure of the remote call `method`.
    ///
    /// Error replies are mapped by their D-Bus error name; transport
    /// failures keep the bus library's message.
    pub fn from_call(method: &'static str, service: &str, error: zbus::Error) -> Self {
        match error {
            zbus::Error::MethodError(name, detail, _) => {
                Self::from_error_reply(method, service, name.as_str(), detail)
            }
            zbus::Error::FDO(fdo) => Self::from_fdo(method, service, *fdo),
            zbus::Error::InputOutput(io_error) if io_error.kind() == io::ErrorKind::TimedOut => {
                FusedLocationError::Timeout { method }
            }
            transport @ (zbus::Error::InputOutput(_)
            | zbus::Error::Address(_)
            | zbus::Error::Handshake(_)) => FusedLocationError::Connection(transport),
            other => FusedLocationError::RemoteCall {
                method,
                name: None,
                message: other.to_string(),
            },
        }
    }

    /// Classifies an error reply by its D-Bus error name.
    pub fn from_error_reply(
        method: &'static str,
        service: &str,
        name: &str,
        detail: Option<String>,
    ) -> Self {
        if SERVICE_MISSING_ERRORS.contains(&name) {
            return FusedLocationError::ServiceNotFound {
                service: service.to_string(),
            };
        }

        if TIMEOUT_ERRORS.contains(&name) {
            return FusedLocationError::Timeout { method };
        }

        FusedLocationError::RemoteCall {
            method,
            name: Some(name.to_string()),
            message: detail.unwrap_or_default(),
        }
    }

    fn from_fdo(method: &'static str, service: &str, error: zbus::fdo::Error) -> Self {
        use zbus::fdo::Error;

        match error {
            Error::ServiceUnknown(_) | Error::NameHasNoOwner(_) | Error::UnknownObject(_) => {
                FusedLocationError::ServiceNotFound {
                    service: service.to_string(),
                }
            }
            Error::NoReply(_) | Error::Timeout(_) | Error::TimedOut(_) => {
                FusedLocationError::Timeout { method }
            }
            Error::ZBus(inner) => Self::from_call(method, service, inner),
            other => FusedLocationError::RemoteCall {
                method,
                name: None,
                message: other.to_string(),
            },
        }
    }
}
