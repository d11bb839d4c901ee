pub mod timing;

pub use timing::{Timer, timed, timed_async};
