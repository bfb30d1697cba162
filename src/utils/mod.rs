pub mod password;
pub mod validation;

pub use password::*;
pub use validation::*;
