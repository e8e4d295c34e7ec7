//! Vehicle record types
//!
//! Records are created once when a dataset is loaded and never mutated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body style of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Sedan,
    Suv,
    Truck,
    Coupe,
    Hatchback,
    Convertible,
    Van,
    Wagon,
    Minivan,
}

impl VehicleType {
    /// Every type, in the order the listing form offers them
    pub const ALL: [VehicleType; 9] = [
        VehicleType::Sedan,
        VehicleType::Suv,
        VehicleType::Truck,
        VehicleType::Coupe,
        VehicleType::Hatchback,
        VehicleType::Convertible,
        VehicleType::Van,
        VehicleType::Wagon,
        VehicleType::Minivan,
    ];

    /// Get the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Sedan => "sedan",
            VehicleType::Suv => "suv",
            VehicleType::Truck => "truck",
            VehicleType::Coupe => "coupe",
            VehicleType::Hatchback => "hatchback",
            VehicleType::Convertible => "convertible",
            VehicleType::Van => "van",
            VehicleType::Wagon => "wagon",
            VehicleType::Minivan => "minivan",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string names no known vehicle type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vehicle type: {0}")]
pub struct UnknownVehicleType(pub String);

impl FromStr for VehicleType {
    type Err = UnknownVehicleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVehicleType(s.to_string()))
    }
}

/// One vehicle entry in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: String,
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub price: f64,
    pub fuel_type: String,
    pub transmission: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl VehicleRecord {
    /// "Manufacturer Model", as shown in headings
    pub fn display_name(&self) -> String {
        format!("{} {}", self.manufacturer, self.model)
    }

    /// Check the numeric fields are non-negative and finite
    pub fn validate(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("vehicle {} has invalid price {}", self.id, self.price));
        }
        if let Some(mileage) = self.mileage {
            if !mileage.is_finite() || mileage < 0.0 {
                return Err(format!("vehicle {} has invalid mileage {}", self.id, mileage));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vehicle_type_round_trips_through_str() {
        for t in VehicleType::ALL {
            assert_eq!(t.as_str().parse::<VehicleType>().unwrap(), t);
        }
        assert!("spaceship".parse::<VehicleType>().is_err());
        assert_eq!(
            "Sedan".parse::<VehicleType>().unwrap_err().to_string(),
            "unknown vehicle type: Sedan"
        );
    }

    #[test]
    fn test_record_uses_camel_case_fields() {
        let record: VehicleRecord = serde_json::from_value(json!({
            "id": "a1",
            "manufacturer": "Honda",
            "model": "Jazz",
            "year": 2019,
            "type": "hatchback",
            "price": 12000,
            "fuelType": "petrol",
            "transmission": "Manual",
            "features": ["Bluetooth"],
            "description": "Small car"
        }))
        .unwrap();

        assert_eq!(record.vehicle_type, VehicleType::Hatchback);
        assert_eq!(record.fuel_type, "petrol");
        assert_eq!(record.mileage, None);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "hatchback");
        assert_eq!(value["fuelType"], "petrol");
        assert!(value.get("mileage").is_none());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut record: VehicleRecord = serde_json::from_value(json!({
            "id": "x",
            "manufacturer": "Kia",
            "model": "Rio",
            "year": 2020,
            "type": "sedan",
            "price": 9000,
            "fuelType": "petrol",
            "transmission": "Manual"
        }))
        .unwrap();
        assert!(record.validate().is_ok());

        record.price = -1.0;
        assert!(record.validate().is_err());

        record.price = 1.0;
        record.mileage = Some(-5.0);
        assert!(record.validate().is_err());
    }
}
