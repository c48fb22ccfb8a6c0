use chrono::NaiveDate;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex of an animal. Stored as "Male"/"Female" text in the database
/// and serialized the same way on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseGenderError(pub String);

impl fmt::Display for ParseGenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid gender: {}", self.0)
    }
}

impl std::error::Error for ParseGenderError {}

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(ParseGenderError(other.to_string())),
        }
    }
}

/// One tracked animal belonging to a farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cattle {
    pub id: String,
    /// ID of the farm this animal belongs to
    pub farm_id: String,
    pub breed: String,
    pub gender: Gender,
    /// Date of birth (ISO 8601, YYYY-MM-DD)
    pub dob: String,
    pub name: Option<String>,
    pub nick_name: Option<String>,
    /// URL of the hosted profile image, if one was uploaded
    pub image_url: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_price: Option<f64>,
    /// Free-form status, e.g. "Active", "Sold", "Deceased"
    pub status: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

impl Cattle {
    /// Age in whole months as of the given date, if the date of birth parses.
    /// Display helper for clients; the backend never depends on it.
    pub fn age_in_months(&self, as_of: NaiveDate) -> Option<u32> {
        let dob = NaiveDate::parse_from_str(&self.dob, "%Y-%m-%d").ok()?;
        if dob > as_of {
            return Some(0);
        }
        let years = as_of.years_since(dob)?;
        let months_into_year = (as_of.month() as i32 - dob.month() as i32).rem_euclid(12) as u32;
        Some(years * 12 + months_into_year)
    }
}

/// Health event for one animal: a category plus free-text description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: String,
    pub cattle_id: String,
    /// Date of the event (ISO 8601, YYYY-MM-DD)
    pub date: String,
    /// e.g. "Vaccination", "Treatment", "Checkup"
    pub category: String,
    pub description: String,
}

/// Weight measurement for one animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub id: String,
    pub cattle_id: String,
    pub date: String,
    /// Mass in kilograms
    pub weight: f64,
}

/// Daily milk yield for one animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilkRecord {
    pub id: String,
    pub cattle_id: String,
    pub date: String,
    /// Volume in litres
    pub volume: f64,
}

/// Breeding/calving event for one animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReproductiveRecord {
    pub id: String,
    pub cattle_id: String,
    pub date: String,
    pub breeding_date: Option<String>,
    pub calving_date: Option<String>,
    pub calf_gender: Option<Gender>,
}

/// Top-level ownership unit containing cattle, owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: String,
    pub name: String,
    pub location: String,
    pub owner_id: String,
    pub created_at: String,
}

/// Application user mirrored from the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// The identity provider's user id; unique, used as the upsert key
    pub provider_user_id: String,
    pub email: String,
    pub name: String,
    pub role: Option<String>,
    pub created_at: String,
}

/// Composed read of one animal and all of its record history.
/// Field names are camelCase on the wire; this is the contract the
/// cattle detail page consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CattleProfile {
    pub cattle: Cattle,
    pub health_records: Vec<HealthRecord>,
    pub weight_records: Vec<WeightRecord>,
    pub milk_production: Vec<MilkRecord>,
    pub reproductive_history: Vec<ReproductiveRecord>,
}

/// Request body for POST /api/cattle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCattleRequest {
    pub farm_id: String,
    pub breed: String,
    pub gender: Gender,
    pub dob: String,
    pub name: Option<String>,
    pub nick_name: Option<String>,
    pub image_url: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_price: Option<f64>,
    pub status: String,
}

/// Request body for PUT /api/cattle/:id. Every field optional; only
/// the fields present are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCattleRequest {
    pub farm_id: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub dob: Option<String>,
    pub name: Option<String>,
    pub nick_name: Option<String>,
    pub image_url: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_price: Option<f64>,
    pub status: Option<String>,
}

/// Request body for POST /api/farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFarmRequest {
    pub name: String,
    pub location: String,
    pub owner_id: String,
}

/// Request body for POST /api/user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub provider_user_id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHealthRecordRequest {
    pub cattle_id: String,
    pub date: String,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWeightRecordRequest {
    pub cattle_id: String,
    pub date: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMilkRecordRequest {
    pub cattle_id: String,
    pub date: String,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReproductiveRecordRequest {
    pub cattle_id: String,
    pub date: String,
    pub breeding_date: Option<String>,
    pub calving_date: Option<String>,
    pub calf_gender: Option<Gender>,
}

/// Event envelope posted by the identity provider's webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: IdentityEventData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityEventData {
    /// The provider's user id
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

impl IdentityEventData {
    /// Primary email, if the provider sent any
    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses
            .first()
            .map(|e| e.email_address.as_str())
    }

    /// "First Last" with missing parts dropped; "Unnamed User" if both absent
    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();
        if name.is_empty() {
            "Unnamed User".to_string()
        } else {
            name
        }
    }
}

/// Response body for POST /api/upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}
