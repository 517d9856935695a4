use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request to the OpenSky API failed")]
    Http(#[from] reqwest::Error),
    #[error("the OpenSky API rejected the credentials ({0})")]
    Unauthorized(StatusCode),
    #[error("the state vector response could not be decoded")]
    Decode(#[from] serde_json::Error),
    #[error("{0} cannot be used as an API base URL")]
    InvalidBaseUrl(url::Url),
}
