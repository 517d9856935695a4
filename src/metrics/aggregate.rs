use opensky_client::StateVector;

/// Statistics over one snapshot. Recomputed from scratch every poll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateMetrics {
    /// All vectors, including ones without altitude, speed or position.
    pub flight_count: usize,
    /// Mean geometric altitude in meters, `0.0` when no vector reports one.
    pub avg_altitude: f64,
    /// Mean ground speed in m/s, `0.0` when no vector reports one.
    pub avg_speed: f64,
}

impl AggregateMetrics {
    pub fn from_states(states: &[StateVector]) -> Self {
        Self {
            flight_count: states.len(),
            avg_altitude: mean(states.iter().filter_map(|s| s.geo_altitude)),
            avg_speed: mean(states.iter().filter_map(|s| s.velocity)),
        }
    }
}

/// Last known coordinates of one aircraft.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionMetric {
    pub icao24: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Positions of every vector that has both coordinates, in snapshot order.
pub fn positions(states: &[StateVector]) -> Vec<PositionMetric> {
    states
        .iter()
        .filter_map(|s| {
            let (latitude, longitude) = s.position()?;
            Some(PositionMetric {
                icao24: s.icao24.clone(),
                latitude,
                longitude,
            })
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use opensky_client::PositionSource;
    use pretty_assertions::assert_eq;

    pub(crate) fn vector(
        icao24: &str,
        position: (Option<f64>, Option<f64>),
        geo_altitude: Option<f64>,
        velocity: Option<f64>,
    ) -> StateVector {
        StateVector {
            icao24: icao24.to_string(),
            callsign: None,
            origin_country: "Germany".to_string(),
            time_position: None,
            last_contact: 1717171717,
            longitude: position.1,
            latitude: position.0,
            baro_altitude: geo_altitude,
            on_ground: false,
            velocity,
            true_track: None,
            vertical_rate: None,
            sensors: None,
            geo_altitude,
            squawk: None,
            spi: false,
            position_source: PositionSource::AdsB,
            category: None,
        }
    }

    #[test]
    fn undefined_values_are_left_out_of_the_mean() {
        let states = [
            vector("a", (None, None), Some(100.0), Some(200.0)),
            vector("b", (None, None), Some(200.0), None),
            vector("c", (None, None), None, Some(250.0)),
        ];
        let aggregate = AggregateMetrics::from_states(&states);
        assert_eq!(
            aggregate,
            AggregateMetrics {
                flight_count: 3,
                avg_altitude: 150.0,
                avg_speed: 225.0,
            }
        );
    }

    #[test]
    fn missing_values_fall_back_to_zero() {
        let states = [
            vector("a", (Some(50.0), Some(8.0)), None, None),
            vector("b", (None, None), None, None),
        ];
        let aggregate = AggregateMetrics::from_states(&states);
        assert_eq!(aggregate.flight_count, 2);
        assert_eq!(aggregate.avg_altitude, 0.0);
        assert_eq!(aggregate.avg_speed, 0.0);
        assert!(!aggregate.avg_altitude.is_nan());
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        assert_eq!(AggregateMetrics::from_states(&[]), AggregateMetrics::default());
        assert!(positions(&[]).is_empty());
    }

    #[test]
    fn positions_need_both_coordinates() {
        let states = [
            vector("a", (Some(50.0), Some(8.5)), None, None),
            vector("b", (Some(47.4), None), None, None),
            vector("c", (None, Some(9.1)), None, None),
            vector("d", (Some(-33.9), Some(151.2)), None, None),
        ];
        assert_eq!(
            positions(&states),
            vec![
                PositionMetric {
                    icao24: "a".to_string(),
                    latitude: 50.0,
                    longitude: 8.5,
                },
                PositionMetric {
                    icao24: "d".to_string(),
                    latitude: -33.9,
                    longitude: 151.2,
                },
            ]
        );
    }

    #[test]
    fn duplicate_aircraft_keep_snapshot_order() {
        let states = [
            vector("a", (Some(50.0), Some(8.5)), None, None),
            vector("a", (Some(51.0), Some(9.5)), None, None),
        ];
        let positions = positions(&states);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1].latitude, 51.0);
    }
}
