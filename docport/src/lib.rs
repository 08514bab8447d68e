// docport/src/lib.rs
//! # DocPort CLI Application
//!
//! This crate provides the terminal interface for the DocPort intake text
//! core: normalize extracted text, review it for sensitive keywords, and
//! assemble intake reports from the command line.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
