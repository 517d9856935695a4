use crate::{
    Error,
    Result,
    States,
    StatesQuery,
};
use reqwest::{
    Client as HttpClient,
    StatusCode,
};
use std::{
    fmt,
    time::Duration,
};
use url::Url;

/// Account used for basic auth. Anonymous access works too but is rate
/// limited more aggressively.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OpenSkyClient {
    http_client: HttpClient,
    states_url: Url,
    credentials: Option<Credentials>,
}

impl OpenSkyClient {
    pub const DEFAULT_API_URL: &'static str = "https://opensky-network.org/api";

    pub fn new(api_url: &Url, credentials: Option<Credentials>, timeout: Duration) -> Result<Self> {
        let mut states_url = api_url.clone();
        states_url
            .path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(api_url.clone()))?
            .pop_if_empty()
            .extend(["states", "all"]);

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            states_url,
            credentials,
        })
    }

    pub fn states_url(&self) -> &Url {
        &self.states_url
    }

    /// Fetch the current state vectors.
    ///
    /// `Ok(None)` means the API answered without data (rate limited, in
    /// maintenance, ...). Rejected credentials are an error.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_states(&self, query: &StatesQuery) -> Result<Option<States>> {
        let mut request = self.http_client.get(self.states_url.clone()).query(&query.params());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(Error::Unauthorized(status)),
            status if !status.is_success() => {
                debug!(%status, url = %self.states_url, "OpenSky API returned no state vectors");
                return Ok(None);
            }
            _ => {}
        }

        let body = response.bytes().await?;
        let Some(states) = serde_json::from_slice::<Option<States>>(&body)? else {
            debug!(url = %self.states_url, "OpenSky API answered with a null body");
            return Ok(None);
        };
        debug!(time = states.time, count = states.states.len(), "received state vectors");
        Ok(Some(states))
    }
}
