/// FusedLocation service commands
pub mod location;
