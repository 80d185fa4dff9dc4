use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_email, validate_required};
use crate::entity::site_settings;
use crate::error::AppError;

/// Settings update with PATCH semantics; the row is created on first save.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub site_name: Option<String>,
    pub tagline: Option<String>,
    pub about_text: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub event_start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub event_end_date: Option<Option<DateTime<Utc>>>,
    pub registration_open: Option<bool>,
}

pub fn validate_update_settings(req: &UpdateSettingsRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.site_name {
        validate_required("Site name", name, 128)?;
    }
    if let Some(ref email) = req.contact_email {
        validate_email(email)?;
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    #[schema(example = "TechShethra")]
    pub site_name: String,
    pub tagline: String,
    pub about_text: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub venue: String,
    pub event_start_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
    pub registration_open: bool,
    /// NULL until the settings are saved for the first time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SettingsResponse {
    fn default() -> Self {
        Self {
            site_name: "TechShethra".into(),
            tagline: "National Level Technical Symposium".into(),
            about_text: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            venue: String::new(),
            event_start_date: None,
            event_end_date: None,
            registration_open: true,
            updated_at: None,
        }
    }
}

impl From<site_settings::Model> for SettingsResponse {
    fn from(m: site_settings::Model) -> Self {
        Self {
            site_name: m.site_name,
            tagline: m.tagline,
            about_text: m.about_text,
            contact_email: m.contact_email,
            contact_phone: m.contact_phone,
            venue: m.venue,
            event_start_date: m.event_start_date,
            event_end_date: m.event_end_date,
            registration_open: m.registration_open,
            updated_at: Some(m.updated_at),
        }
    }
}

impl SettingsResponse {
    /// Apply a PATCH onto these values.
    pub fn merge(mut self, req: UpdateSettingsRequest) -> Self {
        if let Some(v) = req.site_name {
            self.site_name = v.trim().to_string();
        }
        if let Some(v) = req.tagline {
            self.tagline = v;
        }
        if let Some(v) = req.about_text {
            self.about_text = v;
        }
        if let Some(v) = req.contact_email {
            self.contact_email = v.trim().to_string();
        }
        if let Some(v) = req.contact_phone {
            self.contact_phone = v;
        }
        if let Some(v) = req.venue {
            self.venue = v;
        }
        if let Some(v) = req.event_start_date {
            self.event_start_date = v;
        }
        if let Some(v) = req.event_end_date {
            self.event_end_date = v;
        }
        if let Some(v) = req.registration_open {
            self.registration_open = v;
        }
        self
    }
}
