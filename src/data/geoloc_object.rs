use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates { latitude, longitude }
    }
}

/// A tracked object whose position is served by an HTTP endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GeolocatableObject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(skip_deserializing, default = "default_method")]
    pub method: String,
    /// Non-object values (e.g. an empty list) are treated as no parameters.
    #[serde(default, deserialize_with = "query_params_or_empty")]
    pub query_params: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub latitude_json_path: String,
    #[serde(default)]
    pub longitude_json_path: String,
    #[serde(default, rename = "enable_sandbox")]
    pub sandbox: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

fn query_params_or_empty<'de, D>(
    deserializer: D,
) -> Result<serde_json::Map<String, serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_from_full_entry() {
        let obj: GeolocatableObject = serde_json::from_value(json!({
            "name": "Bus 12",
            "url": "https://tracker.example/bus/12",
            "query_params": {"token": "abc", "limit": 1},
            "latitude_json_path": "lat",
            "longitude_json_path": "lng",
            "enable_sandbox": true
        }))
        .unwrap();
        assert_eq!(obj.name, "Bus 12");
        assert_eq!(obj.method, "GET");
        assert_eq!(obj.query_params["token"], "abc");
        assert_eq!(obj.latitude_json_path, "lat");
        assert!(obj.sandbox);
    }

    #[test]
    fn test_object_defaults() {
        let obj: GeolocatableObject = serde_json::from_value(json!({})).unwrap();
        assert_eq!(obj.name, "");
        assert_eq!(obj.method, "GET");
        assert!(obj.query_params.is_empty());
        assert!(!obj.sandbox);
    }

    #[test]
    fn test_list_query_params_become_empty() {
        let obj: GeolocatableObject =
            serde_json::from_value(json!({"name": "x", "query_params": []})).unwrap();
        assert!(obj.query_params.is_empty());
    }

    #[test]
    fn test_method_in_config_is_ignored() {
        let obj: GeolocatableObject =
            serde_json::from_value(json!({"name": "x", "method": "POST"})).unwrap();
        assert_eq!(obj.method, "GET");
    }
}
