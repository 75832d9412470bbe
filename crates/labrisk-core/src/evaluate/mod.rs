pub mod advice;
pub mod aggregate;
pub mod environment;
pub mod flammability;
pub mod incompatibility;
pub mod outcome;
pub mod toxicity;

pub use aggregate::aggregate;
pub use environment::adjust_for_environment;
pub use flammability::{classify_by_flash_point, evaluate_flammability};
pub use incompatibility::{evaluate_all_pairs, evaluate_pair};
pub use toxicity::evaluate_toxicity;
