use serde::{Deserialize, Serialize};

use super::null_default;
use crate::form::{self, EditableRecord, FormError};

/// An agent/broker who represents listings. Distinct from a [`super::User`]
/// account, though it may point at one through `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Guide {
    #[serde(
        rename = "guideId",
        alias = "id",
        alias = "guide_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(deserialize_with = "null_default")]
    pub phone: String,
    #[serde(alias = "experience_years", deserialize_with = "null_default")]
    pub experience_years: u32,
    /// 0 to 5
    #[serde(deserialize_with = "null_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_default")]
    pub specialization: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    #[serde(deserialize_with = "null_default")]
    pub available: bool,
    #[serde(alias = "joined_date", deserialize_with = "null_default")]
    pub joined_date: String,
    #[serde(deserialize_with = "null_default")]
    pub image: String,
    #[serde(alias = "user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Default for Guide {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            experience_years: 0,
            rating: 0.0,
            specialization: String::new(),
            city: String::new(),
            state: String::new(),
            available: true,
            joined_date: String::new(),
            image: String::new(),
            user_id: None,
        }
    }
}

impl EditableRecord for Guide {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "email",
        "phone",
        "experienceYears",
        "rating",
        "specialization",
        "city",
        "state",
        "available",
        "joinedDate",
        "image",
        "userId",
    ];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match form::field_key(field).as_str() {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "experienceyears" | "experience" => self.experience_years = form::coerce_count(value),
            "rating" => self.rating = form::coerce_amount(value).clamp(0.0, 5.0),
            "specialization" => self.specialization = value.to_string(),
            "city" => self.city = value.to_string(),
            "state" => self.state = value.to_string(),
            "available" => self.available = form::coerce_flag(field, value)?,
            "joineddate" | "joined" => self.joined_date = value.trim().to_string(),
            "image" => self.image = value.to_string(),
            "userid" | "user" => {
                let value = value.trim();
                self.user_id = (!value.is_empty()).then(|| value.to_string());
            }
            _ => return Err(FormError::unknown::<Self>(field)),
        }
        Ok(())
    }
}
