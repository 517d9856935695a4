use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    str::FromStr,
};

/// Filters for a `/states/all` request. The default asks for everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatesQuery {
    /// Unix timestamp to retrieve states for; the API rounds it down.
    pub time: Option<i64>,
    /// Only return these transponder addresses.
    pub icao24: Vec<String>,
    pub bbox: Option<BoundingBox>,
    /// Ask for the aircraft category as an 18th state vector field.
    pub extended: bool,
}

impl StatesQuery {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(time) = self.time {
            params.push(("time", time.to_string()));
        }
        for icao24 in &self.icao24 {
            params.push(("icao24", icao24.to_lowercase()));
        }
        if let Some(bbox) = &self.bbox {
            params.extend([
                ("lamin", bbox.lamin.to_string()),
                ("lomin", bbox.lomin.to_string()),
                ("lamax", bbox.lamax.to_string()),
                ("lomax", bbox.lomax.to_string()),
            ]);
        }
        if self.extended {
            params.push(("extended", "1".to_string()));
        }
        params
    }
}

/// WGS-84 area in decimal degrees, written as `lamin,lomin,lamax,lomax`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundingBox {
    pub lamin: f64,
    pub lomin: f64,
    pub lamax: f64,
    pub lomax: f64,
}

impl BoundingBox {
    pub fn new(lamin: f64, lomin: f64, lamax: f64, lomax: f64) -> Result<Self, String> {
        let lat_ok = |v: f64| (-90.0..=90.0).contains(&v);
        let lon_ok = |v: f64| (-180.0..=180.0).contains(&v);
        if !(lat_ok(lamin) && lat_ok(lamax)) {
            return Err(format!("latitudes must be within ±90, got {lamin} and {lamax}"));
        }
        if !(lon_ok(lomin) && lon_ok(lomax)) {
            return Err(format!("longitudes must be within ±180, got {lomin} and {lomax}"));
        }
        if lamin > lamax || lomin > lomax {
            return Err("minimum coordinates must not exceed maximum coordinates".to_string());
        }
        Ok(Self {
            lamin,
            lomin,
            lamax,
            lomax,
        })
    }
}

impl FromStr for BoundingBox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid coordinate {part:?}: {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            [lamin, lomin, lamax, lomax] => Self::new(*lamin, *lomin, *lamax, *lomax),
            _ => Err(format!(
                "expected lamin,lomin,lamax,lomax but got {} values",
                values.len()
            )),
        }
    }
}

impl TryFrom<String> for BoundingBox {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BoundingBox> for String {
    fn from(value: BoundingBox) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.lamin, self.lomin, self.lamax, self.lomax)
    }
}
