//! 命令行输出辅助

pub mod printer;

pub use printer::{PrintMode, Printer};
