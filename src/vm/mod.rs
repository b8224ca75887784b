//! 视图模型层

pub mod action;
pub mod bridge;
pub mod keymap;
pub mod view;
