pub mod config;
pub mod genai;
pub mod telemetry;
