use gios_rs::models::{SensorList, StationList};
use gios_rs::{Sensor, SensorData, Station};

#[test]
fn parse_station_list() {
    let sample = r#"
    [
      {
        "id": 114,
        "stationName": "Wrocław, ul. Bartnicza",
        "gegrLat": "51.115933",
        "gegrLon": "17.141125",
        "city": {"id": 1064, "name": "Wrocław"},
        "addressStreet": "ul. Bartnicza"
      },
      {
        "id": 16,
        "stationName": "Bielawa, ul. Parkowa",
        "gegrLat": "50.682510",
        "gegrLon": "16.617348",
        "city": null,
        "addressStreet": null
      }
    ]
    "#;

    let stations: Vec<Station> = serde_json::from_str(sample).unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].id, 114);

    let list = StationList::from_stations(stations);
    assert_eq!(list.id_at(0), Some(16));
    assert_eq!(list.get(1).unwrap().station_name, "Wrocław, ul. Bartnicza");
    assert_eq!(list.id_at(2), None);
}

#[test]
fn parse_sensor_list() {
    let sample = r#"
    [
      {
        "id": 92,
        "stationId": 14,
        "param": {
          "paramName": "pył zawieszony PM10",
          "paramFormula": "PM10",
          "paramCode": "PM10",
          "idParam": 3
        }
      },
      {
        "id": 88,
        "stationId": 14,
        "param": {"paramName": "dwutlenek azotu"}
      }
    ]
    "#;

    let sensors: Vec<Sensor> = serde_json::from_str(sample).unwrap();
    assert_eq!(sensors[0].param.param_code.as_deref(), Some("PM10"));
    assert_eq!(sensors[1].param.param_code, None);

    let list = SensorList::new(sensors);
    assert_eq!(list.find_param(" pm10 ").map(|(i, s)| (i, s.id)), Some((0, 92)));
    assert_eq!(
        list.find_param("DWUTLENEK AZOTU").map(|(i, s)| (i, s.id)),
        Some((1, 88))
    );
    assert!(list.find_param("O3").is_none());
}

#[test]
fn parse_sensor_data_with_nulls() {
    let sample = r#"
    {
      "key": "PM10",
      "values": [
        {"date": "2024-06-08 12:00:00", "value": 7.2},
        {"date": "2024-06-08 11:00:00", "value": null},
        {"date": "2024-06-08 10:00:00", "value": 5}
      ]
    }
    "#;

    let data: SensorData = serde_json::from_str(sample).unwrap();
    assert_eq!(data.key.as_deref(), Some("PM10"));
    let values = data.values.unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(values[1].value, None);
    assert_eq!(values[2].value, Some(5.0));
}

#[test]
fn missing_values_key_is_distinct_from_empty() {
    let missing: SensorData = serde_json::from_str(r#"{"key": "PM10"}"#).unwrap();
    assert!(missing.values.is_none());

    let empty: SensorData = serde_json::from_str(r#"{"key": "PM10", "values": []}"#).unwrap();
    assert_eq!(empty.values, Some(Vec::new()));
}

#[test]
fn wrong_shape_fails() {
    let err = serde_json::from_str::<Vec<Station>>(r#"{"error": "not found"}"#).unwrap_err();
    let err: gios_rs::Error = err.into();
    assert!(matches!(err, gios_rs::Error::Parse(_)));
}
