use std::sync::Arc;

use dsq_service::{QualityService, Telemetry};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<QualityService>,
}
impl AppState {
	/// Opens the telemetry sinks once for the lifetime of the process.
	pub fn new(config: dsq_config::Config) -> color_eyre::Result<Self> {
		let telemetry = Telemetry::init(&config.telemetry)?;
		let service = QualityService::new(config, telemetry);

		Ok(Self { service: Arc::new(service) })
	}
}
