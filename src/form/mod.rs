//! Form Module - Interactive Surface
//! Console form, command parsing and result rendering

pub mod console;

pub use console::*;
