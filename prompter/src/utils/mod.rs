pub mod sanitize;
pub use sanitize::{Check, DesiredType, Rejection, Sanitize, Value};

pub mod terminal;
pub use terminal::Terminal;
