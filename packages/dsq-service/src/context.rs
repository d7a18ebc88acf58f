//! Per-request correlation identity.
//!
//! A [`RequestContext`] binds a fresh request id to one logical call chain. Code running inside
//! the scope, at any depth, reads it back through [`current`] without the id being passed along.
//! The binding is task-local: concurrent requests on the same runtime never observe each other's
//! id, and leaving the scope (normally, by error, or by unwinding) removes it.

use std::future::Future;

use tracing::Instrument;
use uuid::Uuid;

/// Returned by [`current`] outside of any request scope.
pub const UNKNOWN_REQUEST_ID: &str = "unknown";

tokio::task_local! {
	static REQUEST_ID: String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
	request_id: String,
}
impl RequestContext {
	/// Issues a new random (v4) request id.
	pub fn begin() -> Self {
		Self { request_id: Uuid::new_v4().to_string() }
	}

	/// The context bound to the caller, if any. Used to carry the binding across a thread hop
	/// such as `spawn_blocking`, where task-locals are not inherited.
	pub fn capture() -> Option<Self> {
		REQUEST_ID.try_with(|request_id| Self { request_id: request_id.clone() }).ok()
	}

	pub fn request_id(&self) -> &str {
		&self.request_id
	}

	/// Runs `future` with this context bound. The binding ends with the future.
	pub async fn scope<F>(self, future: F) -> F::Output
	where
		F: Future,
	{
		let span = tracing::info_span!("request", request_id = %self.request_id);

		REQUEST_ID.scope(self.request_id, future.instrument(span)).await
	}

	/// Synchronous counterpart of [`RequestContext::scope`].
	pub fn sync_scope<F, R>(self, f: F) -> R
	where
		F: FnOnce() -> R,
	{
		let span = tracing::info_span!("request", request_id = %self.request_id);
		let _entered = span.enter();

		REQUEST_ID.sync_scope(self.request_id, f)
	}
}

/// Request id bound to the running call chain, or [`UNKNOWN_REQUEST_ID`].
pub fn current() -> String {
	REQUEST_ID.try_with(Clone::clone).unwrap_or_else(|_| UNKNOWN_REQUEST_ID.to_string())
}
