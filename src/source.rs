use opensky_client::{
    OpenSkyClient,
    States,
    StatesQuery,
};
use std::{
    future::Future,
    pin::Pin,
};

/// Where snapshots come from.
pub trait StateSource {
    /// `Ok(None)` when the provider answered without a snapshot.
    fn fetch(&self) -> Pin<Box<dyn Future<Output = opensky_client::Result<Option<States>>> + Send + '_>>;
}

/// The OpenSky API with a fixed query.
#[derive(Debug, Clone)]
pub struct OpenSkySource {
    client: OpenSkyClient,
    query: StatesQuery,
}

impl OpenSkySource {
    pub fn new(client: OpenSkyClient, query: StatesQuery) -> Self {
        Self { client, query }
    }
}

impl StateSource for OpenSkySource {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = opensky_client::Result<Option<States>>> + Send + '_>> {
        Box::pin(self.client.get_states(&self.query))
    }
}
