pub mod normalize;
pub mod request;
pub mod values;

pub use normalize::normalize;
pub use request::{parse_request, validate_request};
