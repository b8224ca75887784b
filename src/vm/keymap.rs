//! 键盘映射：同时接受DOM风格的键名与Slint的按键文本

use crate::model::calculator::Operation;
use crate::vm::action::Action;

// Slint `Key` 命名空间中对应按键的文本
pub const SLINT_KEY_RETURN: &str = "\n";
pub const SLINT_KEY_ESCAPE: &str = "\u{1b}";
pub const SLINT_KEY_BACKSPACE: &str = "\u{8}";

/// 将按键翻译为动作；无法识别的按键返回 None
pub fn action_for_key(key: &str, ctrl: bool) -> Option<Action> {
    if ctrl {
        return match key {
            "c" | "C" => Some(Action::CopyResult),
            _ => None,
        };
    }

    match key {
        "Enter" | "=" | SLINT_KEY_RETURN => return Some(Action::Calculate),
        "Escape" | SLINT_KEY_ESCAPE => return Some(Action::Clear),
        "Backspace" | SLINT_KEY_BACKSPACE => return Some(Action::Delete),
        "%" => return Some(Action::Percent),
        "*" => return Some(Action::Operator(Operation::Multiply)),
        "/" => return Some(Action::Operator(Operation::Divide)),
        _ => {}
    }

    if let Some(op) = Operation::from_symbol(key) {
        return Some(Action::Operator(op));
    }

    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() || c == '.' => Some(Action::Digit(c)),
        _ => None,
    }
}
