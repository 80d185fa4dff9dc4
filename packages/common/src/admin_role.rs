#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

string_enum! {
    /// Back-office role.
    pub enum AdminRole {
        Admin => "admin",
        /// Can also manage other admin accounts.
        Superadmin => "superadmin",
    }
}

impl AdminRole {
    pub fn is_superadmin(&self) -> bool {
        matches!(self, Self::Superadmin)
    }
}
