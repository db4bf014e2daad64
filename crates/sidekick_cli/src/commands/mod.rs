pub mod chat;
pub mod checkin;
pub mod classify;
pub mod profile;
