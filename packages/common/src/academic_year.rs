#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

string_enum! {
    /// Year of study of a student.
    pub enum AcademicYear {
        First => "1",
        Second => "2",
        Third => "3",
        Fourth => "4",
        Fifth => "5",
        Others => "Others",
    }
}
