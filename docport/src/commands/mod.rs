// docport/src/commands/mod.rs
pub mod highlight;
pub mod intake;
pub mod normalize;
pub mod scan;
