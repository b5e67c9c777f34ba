mod compare;
mod convert;
mod extract;

pub use compare::run_compare;
pub use convert::run_convert;
pub use extract::run_extract;
