//! # Data Transfer Objects

pub mod upload_config;
