pub mod admin;
pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod event;
pub mod registration;
pub mod schedule;
pub mod settings;
pub mod speaker;
pub mod sponsor;
pub mod student;
