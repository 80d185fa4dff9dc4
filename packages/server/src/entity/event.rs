use common::EventType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Poster URL.
    pub image: Option<String>,
    pub event_type: EventType,
    pub capacity: i32,
    /// Fee in rupees; 0 for free events.
    pub registration_fee: f64,

    /// Ordered list of prize descriptions, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub prizes: serde_json::Value,
    /// Ordered list of requirements, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub requirements: serde_json::Value,

    pub is_team_event: bool,
    pub team_size_min: i32,
    pub team_size_max: i32,

    #[sea_orm(default_value = true, indexed)]
    pub is_active: bool,

    pub venue: Option<String>,
    pub event_date: Option<DateTimeUtc>,

    #[sea_orm(has_many)]
    pub registrations: HasMany<super::registration::Entity>,

    #[sea_orm(has_many)]
    pub schedules: HasMany<super::schedule::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
