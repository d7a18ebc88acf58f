use axum::{
	Json, Router,
	body::Bytes,
	extract::{
		DefaultBodyLimit, Multipart, Request, State,
		multipart::{MultipartError, MultipartRejection},
		rejection::JsonRejection,
	},
	http::{HeaderValue, StatusCode},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use dsq_domain::FeatureSet;
use dsq_service::{
	IngestError, QualityFlagsResponse, QualityResponse, QualityService, RequestContext, Upload,
};

use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
struct HealthResponse {
	status: &'static str,
	service: String,
	version: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	detail: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	detail: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		detail: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), detail: detail.into(), fields }
	}

	fn invalid_request(detail: impl Into<String>, fields: Option<Vec<String>>) -> Self {
		Self::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REQUEST", detail, fields)
	}
}

impl From<IngestError> for ApiError {
	fn from(err: IngestError) -> Self {
		Self::new(StatusCode::BAD_REQUEST, err.code(), err.to_string(), None)
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::invalid_request(rejection.body_text(), None)
	}
}

impl From<MultipartRejection> for ApiError {
	fn from(rejection: MultipartRejection) -> Self {
		Self::new(rejection.status(), "INVALID_MULTIPART", rejection.body_text(), None)
	}
}

impl From<MultipartError> for ApiError {
	fn from(err: MultipartError) -> Self {
		let status = err.status();
		let error_code = if status == StatusCode::PAYLOAD_TOO_LARGE {
			"PAYLOAD_TOO_LARGE"
		} else {
			"INVALID_MULTIPART"
		};

		Self::new(status, error_code, err.body_text(), None)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, detail: self.detail, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

/// File part of a multipart upload, owned so it can move onto a blocking thread.
struct UploadedFile {
	content_type: Option<String>,
	bytes: Bytes,
}
impl UploadedFile {
	fn as_upload(&self) -> Upload<'_> {
		Upload { content_type: self.content_type.as_deref(), bytes: &self.bytes }
	}
}

pub fn router(state: AppState) -> Router {
	let upload_limit = DefaultBodyLimit::max(state.service.cfg.ingest.max_upload_bytes);

	Router::new()
		.route("/health", get(health))
		.route("/quality", post(quality))
		.route("/quality-from-csv", post(quality_from_csv).layer(upload_limit.clone()))
		.route("/quality-flags-from-csv", post(quality_flags_from_csv).layer(upload_limit))
		.layer(middleware::from_fn(request_context))
		.with_state(state)
}

/// Binds a fresh request id to everything the request runs and echoes it back as a header.
async fn request_context(req: Request, next: Next) -> Response {
	let context = RequestContext::begin();
	let request_id = context.request_id().to_string();
	let mut response = context
		.scope(async move {
			tracing::debug!(method = %req.method(), uri = %req.uri(), "Request started.");

			let response = next.run(req).await;

			tracing::debug!(status = %response.status(), "Request completed.");

			response
		})
		.await;

	if let Ok(value) = HeaderValue::from_str(&request_id) {
		response.headers_mut().insert(REQUEST_ID_HEADER, value);
	}

	response
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
		service: state.service.cfg.service.name.clone(),
		version: dsq_cli::PKG_VERSION,
	})
}

async fn quality(
	State(state): State<AppState>,
	payload: Result<Json<FeatureSet>, JsonRejection>,
) -> Result<Json<QualityResponse>, ApiError> {
	let Json(features) = payload?;
	let invalid = features.invalid_fields();

	if !invalid.is_empty() {
		return Err(ApiError::invalid_request("Feature values are out of range.", Some(invalid)));
	}

	Ok(Json(state.service.quality(&features)))
}

async fn quality_from_csv(
	State(state): State<AppState>,
	multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<QualityResponse>, ApiError> {
	let file = read_file(multipart?).await?;
	let response =
		run_blocking(&state, move |service| service.quality_from_csv(&file.as_upload())).await??;

	Ok(Json(response))
}

async fn quality_flags_from_csv(
	State(state): State<AppState>,
	multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<QualityFlagsResponse>, ApiError> {
	let file = read_file(multipart?).await?;
	let response =
		run_blocking(&state, move |service| service.quality_flags_from_csv(&file.as_upload()))
			.await??;

	Ok(Json(response))
}

async fn read_file(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
	while let Some(field) = multipart.next_field().await? {
		if field.name() != Some(FILE_FIELD) {
			continue;
		}

		let content_type = field.content_type().map(ToString::to_string);
		let bytes = field.bytes().await?;

		return Ok(UploadedFile { content_type, bytes });
	}

	Err(ApiError::invalid_request("Multipart field `file` is required.", Some(vec![
		"$.file".to_string(),
	])))
}

/// Runs CSV work off the async workers, re-entering the caller's request context.
async fn run_blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
	F: 'static + Send + FnOnce(&QualityService) -> T,
	T: 'static + Send,
{
	let service = state.service.clone();
	let context = RequestContext::capture();

	tokio::task::spawn_blocking(move || match context {
		Some(context) => context.sync_scope(|| f(&*service)),
		None => f(&*service),
	})
	.await
	.map_err(|err| {
		tracing::error!(error = %err, "Blocking dataset task failed.");

		ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "Internal server error.", None)
	})
}
