//! # OpenSky Client
//!
//! A small typed client for the OpenSky Network REST API. Only the
//! `/states/all` endpoint is covered: it returns the current state vector of
//! every aircraft the network sees, optionally narrowed by transponder
//! address or bounding box.
//!
//! ## Key Components
//!
//! - **`OpenSkyClient`**: issues the request, handles authentication and status codes
//! - **`StatesQuery`** / **`BoundingBox`**: request filters
//! - **`States`** / **`StateVector`**: the decoded snapshot

#[macro_use]
extern crate tracing;

mod client;
mod error;
mod query;
mod state_vector;

pub use client::{
    Credentials,
    OpenSkyClient,
};
pub use error::{
    Error,
    Result,
};
pub use query::{
    BoundingBox,
    StatesQuery,
};
pub use state_vector::{
    PositionSource,
    StateVector,
    States,
};
