pub mod admin;
pub mod contact;
pub mod event;
pub mod registration;
pub mod schedule;
pub mod site_settings;
pub mod speaker;
pub mod sponsor;
pub mod student;
