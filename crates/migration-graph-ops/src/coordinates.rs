//! Per-state coordinate lookup used to place nodes on the map.

use std::collections::HashMap;

use migration_graph_core::StateCoordinate;
use tracing::warn;

/// Approximate geographic centres of the US states and DC.
const US_STATES: &[(&str, f64, f64)] = &[
    ("Alabama", 32.806671, -86.791130),
    ("Alaska", 61.370716, -152.404419),
    ("Arizona", 33.729759, -111.431221),
    ("Arkansas", 34.969704, -92.373123),
    ("California", 36.116203, -119.681564),
    ("Colorado", 39.059811, -105.311104),
    ("Connecticut", 41.597782, -72.755371),
    ("Delaware", 39.318523, -75.507141),
    ("District of Columbia", 38.897438, -77.026817),
    ("Florida", 27.766279, -81.686783),
    ("Georgia", 33.040619, -83.643074),
    ("Hawaii", 21.094318, -157.498337),
    ("Idaho", 44.240459, -114.478828),
    ("Illinois", 40.349457, -88.986137),
    ("Indiana", 39.849426, -86.258278),
    ("Iowa", 42.011539, -93.210526),
    ("Kansas", 38.526600, -96.726486),
    ("Kentucky", 37.668140, -84.670067),
    ("Louisiana", 31.169546, -91.867805),
    ("Maine", 44.693947, -69.381927),
    ("Maryland", 39.063946, -76.802101),
    ("Massachusetts", 42.230171, -71.530106),
    ("Michigan", 43.326618, -84.536095),
    ("Minnesota", 45.694454, -93.900192),
    ("Mississippi", 32.741646, -89.678696),
    ("Missouri", 38.456085, -92.288368),
    ("Montana", 46.921925, -110.454353),
    ("Nebraska", 41.125370, -98.268082),
    ("Nevada", 38.313515, -117.055374),
    ("New Hampshire", 43.452492, -71.563896),
    ("New Jersey", 40.298904, -74.521011),
    ("New Mexico", 34.840515, -106.248482),
    ("New York", 42.165726, -74.948051),
    ("North Carolina", 35.630066, -79.806419),
    ("North Dakota", 47.528912, -99.784012),
    ("Ohio", 40.388783, -82.764915),
    ("Oklahoma", 35.565342, -96.928917),
    ("Oregon", 44.572021, -122.070938),
    ("Pennsylvania", 40.590752, -77.209755),
    ("Rhode Island", 41.680893, -71.511780),
    ("South Carolina", 33.856892, -80.945007),
    ("South Dakota", 44.299782, -99.438828),
    ("Tennessee", 35.747845, -86.692345),
    ("Texas", 31.054487, -97.563461),
    ("Utah", 40.150032, -111.862434),
    ("Vermont", 44.045876, -72.710686),
    ("Virginia", 37.769337, -78.169968),
    ("Washington", 47.400902, -121.490494),
    ("West Virginia", 38.491226, -80.954453),
    ("Wisconsin", 44.268543, -89.616508),
    ("Wyoming", 42.755966, -107.302490),
];

/// Coordinates keyed by state name, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    entries: Vec<StateCoordinate>,
    index: HashMap<String, usize>,
}

impl CoordinateTable {
    /// Build a table from parsed records. Later duplicates of a name are ignored.
    pub fn from_records(records: impl IntoIterator<Item = StateCoordinate>) -> Self {
        let mut table = Self::default();
        for record in records {
            if table.index.contains_key(&record.name) {
                warn!(state = %record.name, "Duplicate coordinate entry ignored");
                continue;
            }
            table.index.insert(record.name.clone(), table.entries.len());
            table.entries.push(record);
        }
        table
    }

    /// Built-in table of the 50 states plus DC.
    pub fn us_states() -> Self {
        Self::from_records(
            US_STATES
                .iter()
                .map(|&(name, lat, lon)| StateCoordinate::new(name, lat, lon)),
        )
    }

    /// Look up a state by exact name.
    pub fn get(&self, name: &str) -> Option<&StateCoordinate> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Whether the state has coordinates.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// State names in table order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.name.as_str())
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no states.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_states_has_fifty_one_entries() {
        let table = CoordinateTable::us_states();
        assert_eq!(table.len(), 51);
        assert!(table.contains("District of Columbia"));
        let ca = table.get("California").unwrap();
        assert!(ca.latitude > 30.0 && ca.longitude < -110.0);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let table = CoordinateTable::from_records([
            StateCoordinate::new("Ohio", 1.0, 2.0),
            StateCoordinate::new("Ohio", 3.0, 4.0),
            StateCoordinate::new("Utah", 5.0, 6.0),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Ohio").unwrap().latitude, 1.0);
        assert_eq!(table.state_names().collect::<Vec<_>>(), ["Ohio", "Utah"]);
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = CoordinateTable::us_states();
        assert!(table.get("california").is_none());
        assert!(table.get("Atlantis").is_none());
    }
}
