//! Action：UI层与计算器状态机之间的显式接口
//!
//! 任何UI（Slint窗口、终端、测试）都把输入事件翻译为Action，再交给 `apply`。

use crate::model::calculator::{CalcError, Calculator, Operation, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(char),
    Operator(Operation),
    Calculate,
    Clear,
    Delete,
    Percent,
    /// 复制当前值，只由UI处理，不改变状态
    CopyResult,
}

impl Action {
    /// 将动作作用于计算器
    pub fn apply(self, calc: &mut Calculator) -> Result<Outcome, CalcError> {
        match self {
            Action::Digit(token) => Ok(calc.append_digit(token)),
            Action::Operator(op) => calc.choose_operation(op),
            Action::Calculate => calc.calculate(),
            Action::Clear => Ok(calc.clear()),
            Action::Delete => Ok(calc.delete_last_digit()),
            Action::Percent => Ok(calc.percent()),
            Action::CopyResult => Ok(Outcome::Unchanged),
        }
    }
}
