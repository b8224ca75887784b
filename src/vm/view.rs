//! 显示行：由状态快照生成两行显示文本

use crate::model::calculator::CalculatorSnapshot;
use crate::model::display::format_display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLines {
    /// 上一操作数与运算符，无待定运算时为空
    pub previous: String,
    pub current: String,
}

impl From<&CalculatorSnapshot> for DisplayLines {
    fn from(snapshot: &CalculatorSnapshot) -> Self {
        let previous = match snapshot.operation {
            Some(op) => format!("{} {}", format_display(&snapshot.previous_operand), op.symbol()),
            None => String::new(),
        };
        Self {
            previous,
            current: format_display(&snapshot.current_operand),
        }
    }
}
