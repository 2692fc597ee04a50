pub mod duration;
pub mod issues;
pub mod utils;

pub use duration::{format_duration, sum_worklogs};
pub use issues::print_rows;
pub use utils::{fit, truncate};
