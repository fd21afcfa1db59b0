// AI-assisted features: career coach, project insights, message draft, status probe.
// All completion calls go through llm_client; each feature owns one controller.

pub mod board;
pub mod controller;
pub mod handlers;
pub mod prompts;
pub mod status;
