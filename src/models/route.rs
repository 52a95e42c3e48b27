/// Raw totals reported by a routing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub total_distance_m: f64,
    pub total_time_s: f64,
}

/// Route result as shown to the user: kilometres to two decimals and whole
/// minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteInfo {
    pub distance_km: f64,
    pub minutes: i64,
}

impl From<RouteSummary> for RouteInfo {
    fn from(summary: RouteSummary) -> Self {
        Self {
            distance_km: (summary.total_distance_m / 10.0).round() / 100.0,
            minutes: (summary.total_time_s / 60.0).round() as i64,
        }
    }
}

impl RouteInfo {
    pub fn distance_label(&self) -> String {
        format!("{:.2}", self.distance_km)
    }
}
