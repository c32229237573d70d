use metrika_core::MetricRecord;

/// Counter name for the number of samples taken.
pub const POLL_COUNT: &str = "PollCount";
/// Gauge name for the per-sample random value.
pub const RANDOM_VALUE: &str = "RandomValue";

/// Readings from the most recent sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub gauges: Vec<(&'static str, f64)>,
    pub poll_count: i64,
    pub random_value: f64,
}

impl Snapshot {
    /// Replace the readings, count the sample, and store a fresh jitter value.
    /// Non-finite readings are dropped since they have no wire encoding.
    pub fn refresh(&mut self, readings: Vec<(&'static str, f64)>, random_value: f64) {
        self.gauges = readings.into_iter().filter(|(_, v)| v.is_finite()).collect();
        self.poll_count = self.poll_count.saturating_add(1);
        self.random_value = random_value;
    }

    /// One record per gauge, then `PollCount` (running total) and `RandomValue`.
    pub fn records(&self) -> Vec<MetricRecord> {
        let mut out: Vec<MetricRecord> = self
            .gauges
            .iter()
            .map(|(name, v)| MetricRecord::gauge(*name, *v))
            .collect();
        out.push(MetricRecord::counter(POLL_COUNT, self.poll_count));
        out.push(MetricRecord::gauge(RANDOM_VALUE, self.random_value));
        out
    }
}
