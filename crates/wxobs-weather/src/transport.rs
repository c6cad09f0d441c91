//! Blocking HTTP transport shared by every fetcher.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::error::ObservationError;

pub const USER_AGENT: &str = concat!(
    "wxobs/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/wxobs/wxobs)"
);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self, ObservationError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the body text.
    ///
    /// `timeout` bounds this single request. A non-2xx status is reported
    /// as an error, like a failed connection.
    pub fn get(
        &self,
        url: &str,
        accept: Option<&str>,
        timeout: Duration,
    ) -> Result<String, reqwest::Error> {
        let mut request = self.client.get(url).timeout(timeout);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request.send()?.error_for_status()?;
        response.text()
    }
}
