//! One-shot position requests.
//!
//! Platform location services are not wired in; the tool either knows a fixed
//! position (from config or flags) or reports the capability as unsupported.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::GeolocationError, model::Coordinates};

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    /// Whether position requests can be made at all.
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// No position source available on this device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Pick a source from an optional fixed position.
pub fn from_home(home: Option<Coordinates>) -> Box<dyn LocationSource> {
    match home {
        Some(at) => Box::new(FixedLocation(at)),
        None => Box::new(NoLocation),
    }
}
