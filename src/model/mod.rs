//! 数据模型层

pub mod calculator;
pub mod display;
pub mod number;
pub mod settings;
