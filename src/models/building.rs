use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::null_default;
use crate::form::{self, EditableRecord, FormError};

/// Kind of property
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildingType {
    #[default]
    House,
    Apartment,
    Condo,
    Townhouse,
    /// Anything else the backend stored, kept verbatim
    Other(String),
}

impl BuildingType {
    pub fn as_str(&self) -> &str {
        match self {
            BuildingType::House => "house",
            BuildingType::Apartment => "apartment",
            BuildingType::Condo => "condo",
            BuildingType::Townhouse => "townhouse",
            BuildingType::Other(raw) => raw,
        }
    }
}

impl From<String> for BuildingType {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "house" => BuildingType::House,
            "apartment" => BuildingType::Apartment,
            "condo" => BuildingType::Condo,
            "townhouse" => BuildingType::Townhouse,
            _ => BuildingType::Other(raw),
        }
    }
}

impl From<BuildingType> for String {
    fn from(kind: BuildingType) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for BuildingType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BuildingType::from(s.to_string()))
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing status
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Availability {
    #[default]
    Available,
    Pending,
    Sold,
    Other(String),
}

impl Availability {
    pub fn as_str(&self) -> &str {
        match self {
            Availability::Available => "available",
            Availability::Pending => "pending",
            Availability::Sold => "sold",
            Availability::Other(raw) => raw,
        }
    }
}

impl From<String> for Availability {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "available" => Availability::Available,
            "pending" => Availability::Pending,
            "sold" => Availability::Sold,
            _ => Availability::Other(raw),
        }
    }
}

impl From<Availability> for String {
    fn from(status: Availability) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for Availability {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Availability::from(s.to_string()))
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property listing.
///
/// The backend names the key `buildingId`; older payloads use `id` or
/// `building_id`, and the numeric columns sometimes arrive in snake_case.
/// All of those land in the same field here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Building {
    #[serde(
        rename = "buildingId",
        alias = "id",
        alias = "building_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(alias = "guide_id")]
    pub guide_id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub address: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    #[serde(alias = "zip_code", deserialize_with = "null_default")]
    pub zip_code: String,
    #[serde(deserialize_with = "null_default")]
    pub price: f64,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: BuildingType,
    #[serde(deserialize_with = "null_default")]
    pub bedrooms: u32,
    #[serde(deserialize_with = "null_default")]
    pub bathrooms: u32,
    #[serde(alias = "area_sqft", deserialize_with = "null_default")]
    pub area_sqft: u32,
    #[serde(deserialize_with = "null_default")]
    pub availability: Availability,
    #[serde(deserialize_with = "null_default")]
    pub image: String,
    #[serde(deserialize_with = "null_default")]
    pub featured: bool,
}

impl EditableRecord for Building {
    const FIELDS: &'static [&'static str] = &[
        "guideId",
        "name",
        "address",
        "city",
        "state",
        "zipCode",
        "price",
        "type",
        "bedrooms",
        "bathrooms",
        "areaSqft",
        "availability",
        "image",
        "featured",
    ];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match form::field_key(field).as_str() {
            "guideid" | "guide" => self.guide_id = form::coerce_id(value),
            "name" => self.name = value.to_string(),
            "address" => self.address = value.to_string(),
            "city" => self.city = value.to_string(),
            "state" => self.state = value.to_string(),
            "zipcode" | "zip" => self.zip_code = value.to_string(),
            "price" => self.price = form::coerce_amount(value),
            "type" | "kind" => self.kind = BuildingType::from(value.to_string()),
            "bedrooms" => self.bedrooms = form::coerce_count(value),
            "bathrooms" => self.bathrooms = form::coerce_count(value),
            "areasqft" | "area" => self.area_sqft = form::coerce_count(value),
            "availability" | "status" => {
                self.availability = Availability::from(value.to_string())
            }
            "image" => self.image = value.to_string(),
            "featured" => self.featured = form::coerce_flag(field, value)?,
            _ => return Err(FormError::unknown::<Self>(field)),
        }
        Ok(())
    }
}
