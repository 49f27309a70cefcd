//! Error types for the delivery process.

use process_engine::ActivityFailure;
use thiserror::Error;

/// Failure of one delivery instance.
///
/// Delivery has no deterministic failure of its own; the only way it fails is
/// an activity exhausting its retry policy. Never retried at the process
/// level - the parent absorbs the failure as a business outcome.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Activity(#[from] ActivityFailure),
}
