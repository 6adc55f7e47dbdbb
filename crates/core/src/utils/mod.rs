pub mod escape;
pub mod time_utils;
