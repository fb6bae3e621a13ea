use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{json_identifier, json_number, present_text, IdField, ValidationError};

/// Catalog entry as stored in the `universities` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct University {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub degree_level: String,
    pub tuition_fee: f64,
    pub required_gpa: f64,
    pub required_ielts: f64,
    /// Lower is better.
    pub ranking: i32,
}

/// Raw query-string criteria for the filtered listing.
///
/// Values stay unparsed here; [`super::filter::FilterQuery`] owns the
/// interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterCriteria {
    pub country: Option<String>,
    pub degree_level: Option<String>,
    pub min_fee: Option<String>,
    pub max_fee: Option<String>,
    pub user_gpa: Option<String>,
    pub user_ielts: Option<String>,
}

/// Identifier assigned by the store to a saved application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

/// Application body as posted by the client.
///
/// Numeric fields stay loosely typed so both `3.5` and `"3.5"` are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationSubmission {
    pub university_id: Option<Value>,
    pub university_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub gpa: Option<Value>,
    pub ielts: Option<Value>,
    pub message: Option<String>,
}

/// Validated application, ready for a single insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApplication {
    pub university_id: i64,
    pub university_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub gpa: Option<f64>,
    pub ielts: Option<f64>,
    pub message: Option<String>,
}

impl ApplicationSubmission {
    /// Checks the required fields and normalizes the optional ones.
    ///
    /// Every missing required field is reported, in declaration order.
    /// Malformed numbers are only reported once the required set is complete.
    pub fn validate(self) -> Result<NewApplication, ValidationError> {
        let mut missing = Vec::new();

        let university_id = match json_identifier("university_id", self.university_id.as_ref()) {
            Ok(IdField::Present(id)) => Some(Ok(id)),
            Ok(IdField::Missing) => {
                missing.push("university_id");
                None
            }
            Err(err) => Some(Err(err)),
        };

        let mut required = |field: &'static str, value: Option<&str>| {
            let text = present_text(value).map(str::to_string);
            if text.is_none() {
                missing.push(field);
            }
            text
        };
        let university_name = required("university_name", self.university_name.as_deref());
        let full_name = required("full_name", self.full_name.as_deref());
        let email = required("email", self.email.as_deref());

        let (Some(university_id), Some(university_name), Some(full_name), Some(email)) =
            (university_id, university_name, full_name, email)
        else {
            return Err(ValidationError::MissingRequiredFields(missing));
        };

        Ok(NewApplication {
            university_id: university_id?,
            university_name,
            full_name,
            email,
            phone: optional_text(self.phone.as_deref()),
            country: optional_text(self.country.as_deref()),
            gpa: json_number("gpa", self.gpa.as_ref())?,
            ielts: json_number("ielts", self.ielts.as_ref())?,
            message: optional_text(self.message.as_deref()),
        })
    }
}

fn optional_text(value: Option<&str>) -> Option<String> {
    present_text(value).map(str::to_string)
}

/// Body returned after a successful insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationReceipt {
    pub success: bool,
    pub message: &'static str,
    pub application_id: ApplicationId,
}

impl ApplicationReceipt {
    pub const CONFIRMATION: &'static str = "Application submitted successfully!";

    pub fn new(application_id: ApplicationId) -> Self {
        Self {
            success: true,
            message: Self::CONFIRMATION,
            application_id,
        }
    }
}
