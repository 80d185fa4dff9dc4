#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

string_enum! {
    /// Kind of symposium activity.
    pub enum EventType {
        Workshop => "workshop",
        Competition => "competition",
        Hackathon => "hackathon",
        Talk => "talk",
        Panel => "panel",
    }
}
