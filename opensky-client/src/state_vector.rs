use serde::{
    de::{
        self,
        IgnoredAny,
        SeqAccess,
        Visitor,
    },
    Deserialize,
    Deserializer,
};
use std::fmt;

/// Response of `/states/all`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct States {
    /// Unix timestamp (seconds) the state vectors are associated with.
    pub time: i64,
    /// The API sends `null` instead of an empty array when nothing matches.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub states: Vec<StateVector>,
}

/// One aircraft as reported by the network.
///
/// The API encodes state vectors as positional JSON arrays in the field order
/// below. The trailing `category` is only sent for extended requests, and any
/// elements after it are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// Unique ICAO 24-bit transponder address, hex encoded.
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: String,
    pub time_position: Option<i64>,
    pub last_contact: i64,
    /// WGS-84 longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// WGS-84 latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Barometric altitude in meters.
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    /// Velocity over ground in m/s.
    pub velocity: Option<f64>,
    /// Clockwise from north, in decimal degrees.
    pub true_track: Option<f64>,
    /// Vertical rate in m/s, positive when climbing.
    pub vertical_rate: Option<f64>,
    pub sensors: Option<Vec<i64>>,
    /// Geometric altitude in meters.
    pub geo_altitude: Option<f64>,
    pub squawk: Option<String>,
    pub spi: bool,
    pub position_source: PositionSource,
    pub category: Option<u8>,
}

impl<'de> Deserialize<'de> for StateVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(StateVectorVisitor)
    }
}

const MIN_FIELDS: usize = 17;

struct StateVectorVisitor;

impl<'de> Visitor<'de> for StateVectorVisitor {
    type Value = StateVector;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a state vector array with at least {MIN_FIELDS} elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<StateVector, A::Error> {
        // Struct fields are evaluated in source order, which is the wire order.
        let vector = StateVector {
            icao24: required(&mut seq, 0)?,
            callsign: required(&mut seq, 1)?,
            origin_country: required(&mut seq, 2)?,
            time_position: required(&mut seq, 3)?,
            last_contact: required(&mut seq, 4)?,
            longitude: required(&mut seq, 5)?,
            latitude: required(&mut seq, 6)?,
            baro_altitude: required(&mut seq, 7)?,
            on_ground: required(&mut seq, 8)?,
            velocity: required(&mut seq, 9)?,
            true_track: required(&mut seq, 10)?,
            vertical_rate: required(&mut seq, 11)?,
            sensors: required(&mut seq, 12)?,
            geo_altitude: required(&mut seq, 13)?,
            squawk: required(&mut seq, 14)?,
            spi: required(&mut seq, 15)?,
            position_source: required(&mut seq, 16)?,
            category: seq.next_element::<Option<u8>>()?.flatten(),
        };
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(vector)
    }
}

fn required<'de, A, T>(seq: &mut A, index: usize) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, &StateVectorVisitor))
}

impl StateVector {
    /// `(latitude, longitude)` when both coordinates are known.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum PositionSource {
    AdsB,
    Asterix,
    Mlat,
    Flarm,
    Other(u8),
}

impl From<u8> for PositionSource {
    fn from(value: u8) -> Self {
        match value {
            0 => PositionSource::AdsB,
            1 => PositionSource::Asterix,
            2 => PositionSource::Mlat,
            3 => PositionSource::Flarm,
            other => PositionSource::Other(other),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<StateVector>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<StateVector>>::deserialize(deserializer)?.unwrap_or_default())
}
