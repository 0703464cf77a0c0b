use std::time::Duration;

use log::debug;

use crate::error::HolidayError;
use crate::model::YearResponse;

/// Seam between the holiday repository and the outside world. Implemented
/// by the real HTTP client and by counting mocks in tests.
pub trait HolidayTransport {
    /// Fetch and decode the raw year payload. Exactly one outbound call
    /// per invocation; no caching at this layer.
    fn fetch_raw(&self, year: i32) -> Result<YearResponse, HolidayError>;
}

/// Blocking HTTP transport against a timor.tech-style endpoint,
/// `GET {base}/{year}`.
#[derive(Clone)]
pub struct HttpHolidayTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpHolidayTransport {
    pub const DEFAULT_ENDPOINT: &'static str = "https://timor.tech/api/holiday/year";

    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }
}

impl Default for HttpHolidayTransport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENDPOINT)
    }
}

impl HolidayTransport for HttpHolidayTransport {
    fn fetch_raw(&self, year: i32) -> Result<YearResponse, HolidayError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), year);
        debug!("requesting holiday data: {url}");

        let response = self.agent.get(&url).call().map_err(|err| match err {
            ureq::Error::Status(status, _) => HolidayError::Status { status },
            other => HolidayError::Transport(other.to_string()),
        })?;

        response
            .into_json::<YearResponse>()
            .map_err(|err| HolidayError::Transport(err.to_string()))
    }
}
