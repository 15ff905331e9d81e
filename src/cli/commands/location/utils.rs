use crate::{
    cli::CliError,
    config::ClientConfig,
    services::{FusedLocationClient, FusedLocationError},
};

/// Connects to the location service, reporting failures as CLI errors
///
/// # Errors
///
/// Returns `CliError::ServiceError` if the bus or the service is unreachable
pub async fn connect(config: &ClientConfig) -> Result<FusedLocationClient, CliError> {
    FusedLocationClient::connect(config)
        .await
        .map_err(service_error)
}

/// Wraps a location service failure
pub fn service_error(error: FusedLocationError) -> CliError {
    CliError::ServiceError {
        service: "FusedLocation".to_string(),
        details: error.to_string(),
    }
}

/// Wraps an argument parse failure for `arg`
pub fn argument_error(arg: &str, error: FusedLocationError) -> CliError {
    let reason = match error {
        FusedLocationError::InvalidArgument { reason, .. } => reason,
        other => other.to_string(),
    };

    CliError::InvalidArgument {
        arg: arg.to_string(),
        reason,
    }
}
