// docport/src/utils/mod.rs
pub mod input;
