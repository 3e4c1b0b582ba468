pub mod cjk_utils;
pub mod ja;
