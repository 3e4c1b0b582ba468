pub mod japanese;
pub mod wanakana;
