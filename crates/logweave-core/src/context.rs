//! Ambient correlation context
//!
//! A tokio task-local carries the correlation id for one logical unit of
//! work. Binding is structural: the id is visible to everything executed
//! inside the scoped future or closure, nested scopes shadow the outer id,
//! and the outer id becomes visible again once the inner scope returns.
//! There is no teardown call.
//!
//! `tokio::spawn` does not inherit task-locals; work handed to a fresh task
//! that must stay correlated re-binds the id explicitly. The HTTP middleware
//! wraps the whole handler future, so ordinary handler code is covered.

use std::future::Future;

tokio::task_local! {
    static CORRELATION_ID: String;
}

/// Run a future with the given correlation id bound as ambient context.
pub async fn with_correlation_id<F>(id: impl Into<String>, f: F) -> F::Output
where
    F: Future,
{
    CORRELATION_ID.scope(id.into(), f).await
}

/// Run a synchronous closure with the given correlation id bound.
pub fn with_correlation_id_sync<F, R>(id: impl Into<String>, f: F) -> R
where
    F: FnOnce() -> R,
{
    CORRELATION_ID.sync_scope(id.into(), f)
}

/// Read the ambient correlation id, if any enclosing scope bound one.
pub fn current_correlation_id() -> Option<String> {
    CORRELATION_ID.try_with(|id| id.clone()).ok()
}
