use serde::{Deserialize, Serialize};

/// A monitoring station from `station/findAll`. Other fields the API sends are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: u32,
    pub station_name: String,
}

/// What a sensor measures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub param_name: String,
    /// Short code such as `PM10`; not every payload carries it.
    #[serde(default)]
    pub param_code: Option<String>,
}

/// A sensor from `station/sensors/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sensor {
    pub id: u32,
    pub param: Param,
}

/// One raw reading. `date` looks like `2024-06-08 10:00:00`; only its first 16
/// characters matter. `value` is `null` when the station reported nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub date: String,
    pub value: Option<f64>,
}

/// Payload of `data/getData/{sensorId}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorData {
    #[serde(default)]
    pub key: Option<String>,
    /// `None` when the key is missing entirely, which is distinct from an empty series.
    #[serde(default)]
    pub values: Option<Vec<Measurement>>,
}

/// Stations in display order (ascending by name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationList {
    stations: Vec<Station>,
}

impl StationList {
    /// Sort by name; stations with equal names keep their API order.
    pub fn from_stations(mut stations: Vec<Station>) -> Self {
        stations.sort_by(|a, b| a.station_name.cmp(&b.station_name));
        Self { stations }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    /// Station id for a display row.
    pub fn id_at(&self, index: usize) -> Option<u32> {
        self.get(index).map(|s| s.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(|s| s.station_name.as_str())
    }
}

/// Sensors of the currently selected station, in API order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorList {
    sensors: Vec<Sensor>,
}

impl SensorList {
    pub fn new(sensors: Vec<Sensor>) -> Self {
        Self { sensors }
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sensor> {
        self.sensors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.iter()
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.sensors.iter().map(|s| s.param.param_name.as_str())
    }

    /// Find a sensor by parameter name or code, ignoring case and surrounding blanks.
    pub fn find_param(&self, query: &str) -> Option<(usize, &Sensor)> {
        let q = query.trim().to_lowercase();
        self.sensors.iter().enumerate().find(|(_, s)| {
            s.param.param_name.to_lowercase() == q
                || s.param
                    .param_code
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase() == q)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: u32, name: &str) -> Station {
        Station {
            id,
            station_name: name.into(),
        }
    }

    #[test]
    fn stations_sorted_by_name_with_parallel_ids() {
        let list = StationList::from_stations(vec![
            station(3, "Warszawa-Ursynów"),
            station(1, "Kraków, Aleja Krasińskiego"),
            station(2, "Gdańsk Wyzwolenia"),
        ]);
        let names: Vec<_> = list.names().collect();
        assert_eq!(
            names,
            ["Gdańsk Wyzwolenia", "Kraków, Aleja Krasińskiego", "Warszawa-Ursynów"]
        );
        assert_eq!(list.id_at(0), Some(2));
        assert_eq!(list.id_at(2), Some(3));
        assert_eq!(list.id_at(3), None);
    }

    #[test]
    fn equal_names_keep_api_order() {
        let list = StationList::from_stations(vec![station(9, "B"), station(5, "A"), station(7, "B")]);
        let ids: Vec<_> = list.iter().map(|s| s.id).collect();
        assert_eq!(ids, [5, 9, 7]);
    }

    #[test]
    fn find_param_by_name_or_code() {
        let sensors = SensorList::new(vec![
            Sensor {
                id: 10,
                param: Param {
                    param_name: "pył zawieszony PM10".into(),
                    param_code: Some("PM10".into()),
                },
            },
            Sensor {
                id: 11,
                param: Param {
                    param_name: "dwutlenek azotu".into(),
                    param_code: None,
                },
            },
        ]);
        assert_eq!(sensors.find_param("pm10").map(|(i, s)| (i, s.id)), Some((0, 10)));
        assert_eq!(
            sensors.find_param(" Dwutlenek azotu ").map(|(i, _)| i),
            Some(1)
        );
        assert!(sensors.find_param("O3").is_none());
    }
}
