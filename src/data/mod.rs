//! Information structures produced by one collection pass

pub mod fact;
pub mod record;

pub use fact::{Fact, Value};
pub use record::Record;
