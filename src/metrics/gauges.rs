use super::{
    AggregateMetrics,
    PositionMetric,
};
use prometheus::{
    Gauge,
    GaugeVec,
    IntGauge,
    Opts,
    Registry,
    TextEncoder,
};

/// The gauges pushed every cycle, registered in a registry owned by this
/// struct rather than the process-wide default one.
pub struct FlightGauges {
    registry: Registry,
    flight_count: IntGauge,
    avg_altitude: Gauge,
    avg_speed: Gauge,
    latitude: GaugeVec,
    longitude: GaugeVec,
    prune_positions: bool,
}

impl FlightGauges {
    /// With `prune_positions` the labeled position series are cleared before
    /// every record, otherwise aircraft that left the snapshot keep their last
    /// coordinates.
    pub fn new(prune_positions: bool) -> prometheus::Result<Self> {
        let flight_count = IntGauge::new("opensky_flight_count", "Number of aircraft currently reported")?;
        let avg_altitude = Gauge::new("opensky_avg_altitude", "Mean geometric altitude of all aircraft in meters")?;
        let avg_speed = Gauge::new("opensky_avg_speed", "Mean ground speed of all aircraft in m/s")?;
        let latitude = GaugeVec::new(
            Opts::new("opensky_flight_latitude", "Latitude of each aircraft"),
            &["icao24"],
        )?;
        let longitude = GaugeVec::new(
            Opts::new("opensky_flight_longitude", "Longitude of each aircraft"),
            &["icao24"],
        )?;

        let registry = Registry::new();
        registry.register(Box::new(flight_count.clone()))?;
        registry.register(Box::new(avg_altitude.clone()))?;
        registry.register(Box::new(avg_speed.clone()))?;
        registry.register(Box::new(latitude.clone()))?;
        registry.register(Box::new(longitude.clone()))?;

        Ok(Self {
            registry,
            flight_count,
            avg_altitude,
            avg_speed,
            latitude,
            longitude,
            prune_positions,
        })
    }

    /// Set every gauge. Later positions for the same aircraft overwrite earlier ones.
    pub fn record(&self, aggregate: &AggregateMetrics, positions: &[PositionMetric]) {
        self.flight_count.set(aggregate.flight_count as i64);
        self.avg_altitude.set(aggregate.avg_altitude);
        self.avg_speed.set(aggregate.avg_speed);

        if self.prune_positions {
            self.latitude.reset();
            self.longitude.reset();
        }
        for position in positions {
            let labels = [position.icao24.as_str()];
            self.latitude.with_label_values(&labels).set(position.latitude);
            self.longitude.with_label_values(&labels).set(position.longitude);
        }
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn encode(&self) -> prometheus::Result<String> {
        let mut buffer = String::new();
        TextEncoder::new().encode_utf8(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Value of a gauge series as it would be scraped, `None` if absent.
    pub(crate) fn gauge_value(registry: &Registry, name: &str, icao24: Option<&str>) -> Option<f64> {
        registry
            .gather()
            .iter()
            .find(|family| family.get_name() == name)?
            .get_metric()
            .iter()
            .find(|metric| match icao24 {
                Some(icao24) => metric.get_label().iter().any(|l| l.get_value() == icao24),
                None => true,
            })
            .map(|metric| metric.get_gauge().get_value())
    }

    fn series_count(registry: &Registry, name: &str) -> usize {
        registry
            .gather()
            .iter()
            .find(|family| family.get_name() == name)
            .map(|family| family.get_metric().len())
            .unwrap_or(0)
    }

    fn position(icao24: &str, latitude: f64, longitude: f64) -> PositionMetric {
        PositionMetric {
            icao24: icao24.to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn records_aggregates() {
        let gauges = FlightGauges::new(false).unwrap();
        gauges.record(
            &AggregateMetrics {
                flight_count: 3,
                avg_altitude: 150.0,
                avg_speed: 225.5,
            },
            &[],
        );
        let registry = gauges.registry();
        assert_eq!(gauge_value(registry, "opensky_flight_count", None), Some(3.0));
        assert_eq!(gauge_value(registry, "opensky_avg_altitude", None), Some(150.0));
        assert_eq!(gauge_value(registry, "opensky_avg_speed", None), Some(225.5));
    }

    #[test]
    fn last_position_of_an_aircraft_wins() {
        let gauges = FlightGauges::new(false).unwrap();
        gauges.record(
            &AggregateMetrics::default(),
            &[position("3c6444", 50.0, 8.5), position("3c6444", 51.0, 9.5)],
        );
        let registry = gauges.registry();
        assert_eq!(gauge_value(registry, "opensky_flight_latitude", Some("3c6444")), Some(51.0));
        assert_eq!(gauge_value(registry, "opensky_flight_longitude", Some("3c6444")), Some(9.5));
        assert_eq!(series_count(registry, "opensky_flight_latitude"), 1);
    }

    #[test]
    fn positions_accumulate_across_records() {
        let gauges = FlightGauges::new(false).unwrap();
        gauges.record(&AggregateMetrics::default(), &[position("a", 1.0, 2.0), position("b", 3.0, 4.0)]);
        gauges.record(&AggregateMetrics::default(), &[position("b", 5.0, 6.0)]);

        let registry = gauges.registry();
        assert_eq!(series_count(registry, "opensky_flight_latitude"), 2);
        assert_eq!(gauge_value(registry, "opensky_flight_latitude", Some("a")), Some(1.0));
        assert_eq!(gauge_value(registry, "opensky_flight_latitude", Some("b")), Some(5.0));
    }

    #[test]
    fn pruning_drops_aircraft_missing_from_the_snapshot() {
        let gauges = FlightGauges::new(true).unwrap();
        gauges.record(&AggregateMetrics::default(), &[position("a", 1.0, 2.0), position("b", 3.0, 4.0)]);
        gauges.record(&AggregateMetrics::default(), &[position("b", 5.0, 6.0)]);

        let registry = gauges.registry();
        assert_eq!(series_count(registry, "opensky_flight_latitude"), 1);
        assert_eq!(series_count(registry, "opensky_flight_longitude"), 1);
        assert_eq!(gauge_value(registry, "opensky_flight_latitude", Some("a")), None);
    }

    #[test]
    fn encodes_text_exposition() {
        let gauges = FlightGauges::new(false).unwrap();
        gauges.record(
            &AggregateMetrics {
                flight_count: 1,
                avg_altitude: 0.0,
                avg_speed: 0.0,
            },
            &[position("3c6444", 50.5, 8.5)],
        );
        let text = gauges.encode().unwrap();
        assert!(text.contains("# TYPE opensky_flight_count gauge"));
        assert!(text.contains("opensky_flight_count 1"));
        assert!(text.contains("opensky_avg_altitude 0"));
        assert!(text.contains(r#"opensky_flight_latitude{icao24="3c6444"} 50.5"#));
    }
}
