//! Guard wrapped around every outbound call a handler makes.
//!
//! The guard races the call against the request's cancellation token and
//! catches panics raised while polling it. Every fault ends up as an
//! [`ErrorKind::UnknownError`](super::ErrorKind::UnknownError) carrying the
//! underlying message unless the caller supplies its own classification.

use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::Error;

/// Message reported when the request was cancelled mid-call.
pub const CANCELLED_MESSAGE: &str = "operation cancelled before completion";

/// Run `call`, converting adapter errors, panics and cancellation into
/// [`Error::unknown`].
pub async fn guard_persistence<T, E, Fut>(cancel: &CancellationToken, call: Fut) -> Result<T, Error>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    guard_persistence_with(cancel, call, |err| Error::unknown(err.to_string())).await
}

/// Like [`guard_persistence`] but lets the caller classify adapter errors.
///
/// Panics and cancellation are still reported as unknown errors.
pub async fn guard_persistence_with<T, E, Fut, F>(
    cancel: &CancellationToken,
    call: Fut,
    classify: F,
) -> Result<T, Error>
where
    Fut: Future<Output = Result<T, E>>,
    F: FnOnce(E) -> Error,
{
    let guarded = AssertUnwindSafe(call).catch_unwind();
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            warn!("outbound call cancelled");
            Err(Error::unknown(CANCELLED_MESSAGE))
        }
        outcome = guarded => match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(classify(err)),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!(%message, "outbound call panicked");
                Err(Error::unknown(message))
            }
        },
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "outbound call panicked".to_owned()
    }
}
