use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// A delivery route: an ordered list of stops scheduled for a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: u64,
    pub points: Vec<RoutePoint>,
    pub date: Option<NaiveDate>,
}

// A single stop. Address and courier note are not always provisioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl Route {
    pub fn new(id: u64, date: NaiveDate, points: Vec<RoutePoint>) -> Self {
        Self {
            id,
            points,
            date: Some(date),
        }
    }
}

impl RoutePoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            address: None,
            additional_info: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = Some(info.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let point = RoutePoint::new(49.8225, 19.0444)
            .with_address("Bielsko-Biała, ul. Cyniarska 11")
            .with_additional_info("Paczka przy kasie");

        let json = serde_json::to_value(&point).unwrap();

        assert!(json.get("additionalInfo").is_some());
        assert!(json.get("additional_info").is_none());
    }

    #[test]
    fn omitted_optional_fields_deserialize_to_none() {
        let point: RoutePoint = serde_json::from_str(r#"{"lat":49.8,"lng":19.0}"#).unwrap();

        assert!(point.address.is_none());
        assert!(point.additional_info.is_none());
    }
}
