//! Command line front end: thin handlers over the library plus terminal rendering

pub mod commands;
pub mod display;
