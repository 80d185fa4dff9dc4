use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Primary key of the single settings row.
pub const SETTINGS_ID: i32 = 1;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub site_name: String,
    pub tagline: String,
    #[sea_orm(column_type = "Text")]
    pub about_text: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub venue: String,
    pub event_start_date: Option<DateTimeUtc>,
    pub event_end_date: Option<DateTimeUtc>,
    pub registration_open: bool,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
