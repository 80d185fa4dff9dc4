#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

string_enum! {
    pub enum SponsorTier {
        Title => "title",
        Gold => "gold",
        Silver => "silver",
        Bronze => "bronze",
        Partner => "partner",
    }
}
