//! Response types for HTTP handlers.

mod action_response;
mod error_response;
mod monitors;
mod questions;
mod tags;

pub use action_response::ActionResponse;
pub use error_response::ErrorResponse;
pub use monitors::*;
pub use questions::*;
pub use tags::*;
