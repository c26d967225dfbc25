use crate::ports::{ResolutionLibrary, ResolutionRequest};
use ferrous_lookup_domain::{ResponseValue, TransactionId, TransportFailure};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub(crate) enum Event {
    Completed(ResponseValue),
    TransportError(TransportFailure),
}

pub(crate) struct Notification {
    pub(crate) id: TransactionId,
    pub(crate) event: Event,
}

/// Body of one transaction: awaits the library and posts the result back to
/// the loop. Cancellation ends the future without posting anything; the
/// engine delivers `Cancelled` itself.
pub(crate) async fn resolve_transaction(
    id: TransactionId,
    library: Arc<dyn ResolutionLibrary>,
    request: ResolutionRequest,
    token: CancellationToken,
    notifications: mpsc::UnboundedSender<Notification>,
) {
    let resolution = AssertUnwindSafe(library.resolve(request)).catch_unwind();

    let event = tokio::select! {
        biased;
        _ = token.cancelled() => return,
        result = resolution => match result {
            Ok(Ok(response)) => Event::Completed(response),
            Ok(Err(failure)) => Event::TransportError(failure),
            Err(panic) => Event::TransportError(TransportFailure::error(format!(
                "resolution library panicked: {}",
                panic_message(panic.as_ref())
            ))),
        },
    };

    // The receiver only goes away with the engine, which no longer wants it.
    let _ = notifications.send(Notification { id, event });
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
