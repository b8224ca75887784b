//! 四则运算计算器库
//!
//! 提供与UI无关的输入状态机、显示格式化与键盘映射，
//! 遵循MVVM架构模式，桌面窗口只是其中一种绑定方式

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::calculator::{CalcError, Calculator, CalculatorSnapshot, Operation, Outcome};
pub use model::display::format_display;
pub use model::settings::{Settings, SettingsError};
pub use vm::action::Action;
pub use vm::keymap::action_for_key;
pub use vm::view::DisplayLines;
