//! Assistant routes - canned-response chat

pub mod api;

pub use api::api_assistant;
