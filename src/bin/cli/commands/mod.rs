pub mod account;
pub mod config;
pub mod progress;
pub mod quiz;
pub mod sets;
pub mod study;
pub mod transfer;
