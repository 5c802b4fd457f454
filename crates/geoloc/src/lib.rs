//! Geolocation collaborator port.
//!
//! Positions come from an external capability (a platform location service)
//! modelled as an async [`PositionSource`]. A request has three outcomes:
//! success, denial/error, and timeout. On any failure [`resolve_position`]
//! substitutes the fixed fallback coordinate and carries a human-readable
//! reason; it never retries on its own.

#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use questline_core::Coordinate;
use tracing::warn;

/// Coordinate used when no live fix is available: Melbourne CBD.
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    latitude: -37.8136,
    longitude: 144.9631,
};

/// Display name for the fallback coordinate.
pub const FALLBACK_LABEL: &str = "Melbourne CBD";

/// Options for a position request.
#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    /// Ask the platform for a high-accuracy fix
    pub high_accuracy: bool,

    /// Upper bound on the request, after which it counts as failed
    pub timeout_ms: u64,

    /// Maximum age of a cached fix the source may return
    pub max_cache_age_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout_ms: 10_000,
            max_cache_age_ms: 300_000,
        }
    }
}

/// Errors a position source can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The user denied the location permission
    #[error("location permission denied")]
    PermissionDenied,

    /// No location capability, or the platform could not produce a fix
    #[error("location unavailable")]
    Unavailable,

    /// The request exceeded its timeout
    #[error("location request timed out")]
    Timeout,
}

/// An external capability that can produce the device's position.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Request the current position.
    async fn request_position(&self, options: &PositionOptions) -> Result<Coordinate, PositionError>;
}

/// Where a resolved fix came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOrigin {
    /// A live position from the source
    Live,
    /// The fixed fallback coordinate
    Fallback,
}

/// The outcome of [`resolve_position`]: always a usable coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    /// The coordinate to use
    pub coordinate: Coordinate,

    /// Whether the coordinate is live or the fallback
    pub origin: FixOrigin,

    /// Human-readable reason when the fallback was substituted
    pub message: Option<String>,
}

/// Resolve a position, substituting the fallback coordinate on any failure.
///
/// The source is awaited under a timeout of `options.timeout_ms`; a source
/// that hangs past it counts as [`PositionError::Timeout`]. The fallback is
/// a plain coordinate; downstream code never needs to know it was
/// substituted.
pub async fn resolve_position(
    source: &dyn PositionSource,
    options: &PositionOptions,
) -> PositionFix {
    let timeout = Duration::from_millis(options.timeout_ms);
    let outcome = match tokio::time::timeout(timeout, source.request_position(options)).await {
        Ok(result) => result,
        Err(_) => Err(PositionError::Timeout),
    };

    match outcome {
        Ok(coordinate) => PositionFix {
            coordinate,
            origin: FixOrigin::Live,
            message: None,
        },
        Err(e) => {
            warn!("position request failed: {e}");
            let message = match e {
                PositionError::PermissionDenied => {
                    format!("Location permission denied. Using {FALLBACK_LABEL} instead.")
                }
                PositionError::Unavailable => {
                    format!("Location is unavailable. Using {FALLBACK_LABEL} instead.")
                }
                PositionError::Timeout => {
                    format!("Location request timed out. Using {FALLBACK_LABEL} instead.")
                }
            };
            PositionFix {
                coordinate: FALLBACK_COORDINATE,
                origin: FixOrigin::Fallback,
                message: Some(message),
            }
        }
    }
}

/// Source that always returns a fixed coordinate. Useful for tests and for
/// supplying a position from the command line.
pub struct StaticPositionSource(pub Coordinate);

#[async_trait]
impl PositionSource for StaticPositionSource {
    async fn request_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, PositionError> {
        Ok(self.0)
    }
}

/// Source that always reports a denied permission.
pub struct DeniedPositionSource;

#[async_trait]
impl PositionSource for DeniedPositionSource {
    async fn request_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, PositionError> {
        Err(PositionError::PermissionDenied)
    }
}
