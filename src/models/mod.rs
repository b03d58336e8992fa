pub mod question;
pub mod web;

pub use question::QuestionRecord;
pub use web::{ErrorResponse, GenerateResponse, HealthResponse};
