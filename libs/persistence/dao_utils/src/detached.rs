use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinHandle;

/// Runs a fallible future on a background task, logging the outcome instead of
/// returning it.
///
/// The task may outlive the request that spawned it; callers must not depend
/// on it completing before their response is sent.
pub fn spawn_detached<F, E>(task: &'static str, fut: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        match fut.await {
            Ok(()) => tracing::debug!("Detached task '{}' completed", task),
            Err(e) => tracing::error!("Detached task '{}' failed: {}", task, e),
        }
    })
}
