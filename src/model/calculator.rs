//! Calculator：计算器输入状态机
//!
//! 持有当前操作数、上一操作数、待执行运算与重置标志，
//! 所有状态迁移都通过方法完成，不依赖任何UI。

use serde::Serialize;
use thiserror::Error;

use crate::model::number::{format_number, parse_operand};

/// 初始/清空后的当前操作数
pub const ZERO: &str = "0";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("不能除以零")]
    DivideByZero,
}

/// 四则运算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// 显示用符号
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    /// 由显示符号解析
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operation::Add),
            "-" => Some(Operation::Subtract),
            "×" => Some(Operation::Multiply),
            "÷" => Some(Operation::Divide),
            _ => None,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Operation::Add => Ok(lhs + rhs),
            Operation::Subtract => Ok(lhs - rhs),
            Operation::Multiply => Ok(lhs * rhs),
            Operation::Divide if rhs == 0.0 => Err(CalcError::DivideByZero),
            Operation::Divide => Ok(lhs / rhs),
        }
    }
}

/// 一次操作的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// 输入被忽略，状态未变
    Unchanged,
    /// 状态已更新
    Updated,
    /// 完成一次计算，UI可据此播放结果闪烁效果
    Computed(f64),
}

/// 只读状态快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorSnapshot {
    pub current_operand: String,
    pub previous_operand: String,
    pub operation: Option<Operation>,
    pub should_reset_screen: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculator {
    current_operand: String,
    previous_operand: String,
    operation: Option<Operation>,
    should_reset_screen: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            current_operand: ZERO.to_string(),
            previous_operand: String::new(),
            operation: None,
            should_reset_screen: false,
        }
    }

    pub fn current_operand(&self) -> &str {
        &self.current_operand
    }

    pub fn previous_operand(&self) -> &str {
        &self.previous_operand
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn should_reset_screen(&self) -> bool {
        self.should_reset_screen
    }

    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot {
            current_operand: self.current_operand.clone(),
            previous_operand: self.previous_operand.clone(),
            operation: self.operation,
            should_reset_screen: self.should_reset_screen,
        }
    }

    /// 追加一个数字或小数点
    pub fn append_digit(&mut self, token: char) -> Outcome {
        if !(token.is_ascii_digit() || token == '.') {
            return Outcome::Unchanged;
        }

        if self.should_reset_screen {
            self.current_operand.clear();
            self.should_reset_screen = false;
        }

        if token == '.' && self.current_operand.contains('.') {
            return Outcome::Unchanged;
        }
        if self.current_operand == ZERO && token != '.' {
            self.current_operand = token.to_string();
        } else {
            self.current_operand.push(token);
        }
        Outcome::Updated
    }

    /// 选择运算；若已有待执行运算则先按从左到右求值
    ///
    /// 链式求值遇到除零时状态已被清空，仍会继续记录新运算，并把错误返回给调用方。
    pub fn choose_operation(&mut self, op: Operation) -> Result<Outcome, CalcError> {
        if self.current_operand.is_empty() {
            return Ok(Outcome::Unchanged);
        }

        let chained = if self.previous_operand.is_empty() {
            Ok(Outcome::Updated)
        } else {
            self.calculate()
        };

        self.operation = Some(op);
        self.previous_operand = std::mem::take(&mut self.current_operand);

        match chained {
            Ok(Outcome::Computed(value)) => Ok(Outcome::Computed(value)),
            Ok(_) => Ok(Outcome::Updated),
            Err(e) => Err(e),
        }
    }

    /// 执行待定运算
    pub fn calculate(&mut self) -> Result<Outcome, CalcError> {
        let (Some(prev), Some(current)) = (
            parse_operand(&self.previous_operand),
            parse_operand(&self.current_operand),
        ) else {
            return Ok(Outcome::Unchanged);
        };
        let Some(op) = self.operation else {
            return Ok(Outcome::Unchanged);
        };

        let value = match op.apply(prev, current) {
            Ok(value) => value,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        self.current_operand = format_number(value);
        self.operation = None;
        self.previous_operand.clear();
        self.should_reset_screen = true;
        Ok(Outcome::Computed(value))
    }

    /// 清空（不改变重置标志）
    pub fn clear(&mut self) -> Outcome {
        self.current_operand = ZERO.to_string();
        self.previous_operand.clear();
        self.operation = None;
        Outcome::Updated
    }

    /// 删除最后一位；刚得到结果时改为整体清空
    pub fn delete_last_digit(&mut self) -> Outcome {
        if self.should_reset_screen {
            return self.clear();
        }

        let len = self.current_operand.chars().count();
        if len == 1 || (len == 2 && self.current_operand.starts_with('-')) {
            self.current_operand = ZERO.to_string();
        } else {
            self.current_operand.pop();
        }
        Outcome::Updated
    }

    /// 当前操作数除以100
    pub fn percent(&mut self) -> Outcome {
        if self.current_operand.is_empty() {
            return Outcome::Unchanged;
        }
        let Some(value) = parse_operand(&self.current_operand) else {
            return Outcome::Unchanged;
        };
        self.current_operand = format_number(value / 100.0);
        Outcome::Updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(calc: &mut Calculator, digits: &str) {
        for c in digits.chars() {
            calc.append_digit(c);
        }
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.current_operand(), "0");
        assert_eq!(calc.previous_operand(), "");
        assert_eq!(calc.operation(), None);
        assert!(!calc.should_reset_screen());
    }

    #[test]
    fn test_digits_accumulate_and_replace_leading_zero() {
        let mut calc = Calculator::new();
        type_digits(&mut calc, "1203");
        assert_eq!(calc.current_operand(), "1203", "数字应按输入顺序累积");

        let mut calc = Calculator::new();
        type_digits(&mut calc, "0.05");
        assert_eq!(calc.current_operand(), "0.05", "小数点不应替换前导0");
    }

    #[test]
    fn test_second_decimal_point_is_ignored() {
        let mut calc = Calculator::new();
        type_digits(&mut calc, "3.");
        assert_eq!(calc.append_digit('.'), Outcome::Unchanged);
        assert_eq!(calc.append_digit('.'), Outcome::Unchanged);
        assert_eq!(calc.current_operand(), "3.");
    }

    #[test]
    fn test_non_digit_token_is_ignored() {
        let mut calc = Calculator::new();
        assert_eq!(calc.append_digit('x'), Outcome::Unchanged);
        assert_eq!(calc.current_operand(), "0");
    }

    #[test]
    fn test_simple_addition() {
        let mut calc = Calculator::new();
        calc.append_digit('2');
        calc.choose_operation(Operation::Add).unwrap();
        assert_eq!(calc.previous_operand(), "2");
        assert_eq!(calc.current_operand(), "");
        calc.append_digit('3');

        let outcome = calc.calculate().unwrap();
        assert_eq!(outcome, Outcome::Computed(5.0));
        assert_eq!(calc.current_operand(), "5");
        assert_eq!(calc.previous_operand(), "");
        assert_eq!(calc.operation(), None);
        assert!(calc.should_reset_screen());
    }

    #[test]
    fn test_chained_operations_evaluate_left_to_right() {
        let mut calc = Calculator::new();
        calc.append_digit('4');
        calc.choose_operation(Operation::Add).unwrap();
        calc.append_digit('2');
        let chained = calc.choose_operation(Operation::Multiply).unwrap();
        assert_eq!(chained, Outcome::Computed(6.0), "链式运算应先求出4+2");
        assert_eq!(calc.previous_operand(), "6");
        assert_eq!(calc.operation(), Some(Operation::Multiply));
        calc.append_digit('3');
        calc.calculate().unwrap();
        assert_eq!(calc.current_operand(), "18");
    }

    #[test]
    fn test_chain_with_plus() {
        let mut calc = Calculator::new();
        calc.append_digit('4');
        calc.choose_operation(Operation::Add).unwrap();
        calc.append_digit('2');
        calc.choose_operation(Operation::Add).unwrap();
        calc.append_digit('1');
        calc.calculate().unwrap();
        assert_eq!(calc.current_operand(), "7");
    }

    #[test]
    fn test_choose_operation_without_operand_is_noop() {
        let mut calc = Calculator::new();
        calc.append_digit('8');
        calc.choose_operation(Operation::Subtract).unwrap();
        let outcome = calc.choose_operation(Operation::Divide).unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(calc.operation(), Some(Operation::Subtract), "空操作数时不应切换运算");
    }

    #[test]
    fn test_divide_by_zero_resets_to_idle() {
        let mut calc = Calculator::new();
        calc.append_digit('9');
        calc.choose_operation(Operation::Divide).unwrap();
        calc.append_digit('0');

        assert_eq!(calc.calculate(), Err(CalcError::DivideByZero));
        assert_eq!(calc.current_operand(), "0");
        assert_eq!(calc.previous_operand(), "");
        assert_eq!(calc.operation(), None);
    }

    #[test]
    fn test_divide_by_zero_in_chain_still_records_operation() {
        let mut calc = Calculator::new();
        calc.append_digit('9');
        calc.choose_operation(Operation::Divide).unwrap();
        calc.append_digit('0');

        assert_eq!(calc.choose_operation(Operation::Add), Err(CalcError::DivideByZero));
        assert_eq!(calc.previous_operand(), "0");
        assert_eq!(calc.current_operand(), "");
        assert_eq!(calc.operation(), Some(Operation::Add));
    }

    #[test]
    fn test_calculate_without_operands_is_noop() {
        let mut calc = Calculator::new();
        calc.append_digit('5');
        assert_eq!(calc.calculate(), Ok(Outcome::Unchanged));
        assert_eq!(calc.current_operand(), "5");

        calc.choose_operation(Operation::Add).unwrap();
        assert_eq!(calc.calculate(), Ok(Outcome::Unchanged), "缺少右操作数时应忽略");
        assert_eq!(calc.previous_operand(), "5");
    }

    #[test]
    fn test_result_starts_fresh_operand() {
        let mut calc = Calculator::new();
        calc.append_digit('2');
        calc.choose_operation(Operation::Multiply).unwrap();
        calc.append_digit('6');
        calc.calculate().unwrap();

        calc.append_digit('7');
        assert_eq!(calc.current_operand(), "7", "结果之后输入应开始新数字");
        assert!(!calc.should_reset_screen());
    }

    #[test]
    fn test_delete_last_digit() {
        let mut calc = Calculator::new();
        type_digits(&mut calc, "12");
        calc.delete_last_digit();
        assert_eq!(calc.current_operand(), "1");
        calc.delete_last_digit();
        assert_eq!(calc.current_operand(), "0");
    }

    #[test]
    fn test_delete_on_computed_negative_clears() {
        let mut calc = Calculator::new();
        calc.append_digit('3');
        calc.choose_operation(Operation::Subtract).unwrap();
        calc.append_digit('8');
        calc.calculate().unwrap();
        assert_eq!(calc.current_operand(), "-5");

        calc.delete_last_digit();
        assert_eq!(calc.current_operand(), "0", "计算结果上的删除应整体清空");
        assert_eq!(calc.previous_operand(), "");
    }

    #[test]
    fn test_delete_trims_negative_single_digit() {
        // 负数只能由计算产生且此时重置标志已置位，这里直接构造输入中的 "-5"
        let mut calc = Calculator {
            current_operand: "-5".to_string(),
            ..Calculator::new()
        };
        calc.delete_last_digit();
        assert_eq!(calc.current_operand(), "0", "负号加一位数字删除后应回到0");

        let mut calc = Calculator {
            current_operand: "-52".to_string(),
            ..Calculator::new()
        };
        calc.delete_last_digit();
        assert_eq!(calc.current_operand(), "-5");
    }

    #[test]
    fn test_delete_on_empty_operand_keeps_it_empty() {
        let mut calc = Calculator::new();
        calc.append_digit('5');
        calc.choose_operation(Operation::Add).unwrap();

        assert_eq!(calc.delete_last_digit(), Outcome::Updated);
        assert_eq!(calc.current_operand(), "", "空操作数删除后仍为空");
        assert_eq!(calc.previous_operand(), "5");
        assert_eq!(calc.operation(), Some(Operation::Add));
    }

    #[test]
    fn test_chain_with_unparsable_operand_moves_it_anyway() {
        let mut calc = Calculator::new();
        calc.append_digit('5');
        calc.choose_operation(Operation::Add).unwrap();
        calc.append_digit('.');

        assert_eq!(calc.choose_operation(Operation::Multiply), Ok(Outcome::Updated));
        assert_eq!(calc.previous_operand(), ".", "无法解析时不求值，直接记录新运算");
        assert_eq!(calc.operation(), Some(Operation::Multiply));
        assert_eq!(calc.current_operand(), "");
    }

    #[test]
    fn test_delete_after_chained_operator_clears_pending_operation() {
        let mut calc = Calculator::new();
        calc.append_digit('4');
        calc.choose_operation(Operation::Add).unwrap();
        calc.append_digit('2');
        calc.choose_operation(Operation::Subtract).unwrap();
        assert!(calc.should_reset_screen(), "链式求值后重置标志应已置位");

        calc.delete_last_digit();
        assert_eq!(calc.current_operand(), "0");
        assert_eq!(calc.previous_operand(), "");
        assert_eq!(calc.operation(), None, "删除应清掉待定运算");
        assert!(calc.should_reset_screen());
    }

    #[test]
    fn test_delete_after_result_clears_everything() {
        let mut calc = Calculator::new();
        type_digits(&mut calc, "12");
        calc.choose_operation(Operation::Add).unwrap();
        type_digits(&mut calc, "30");
        calc.calculate().unwrap();
        assert_eq!(calc.current_operand(), "42");

        calc.delete_last_digit();
        assert_eq!(calc.current_operand(), "0", "结果之后删除应整体清空");
        assert_eq!(calc.operation(), None);
    }

    #[test]
    fn test_clear_keeps_reset_flag() {
        let mut calc = Calculator::new();
        calc.append_digit('1');
        calc.choose_operation(Operation::Add).unwrap();
        calc.append_digit('1');
        calc.calculate().unwrap();

        calc.clear();
        assert_eq!(calc.current_operand(), "0");
        assert!(calc.should_reset_screen(), "清空不会重置标志");
    }

    #[test]
    fn test_percent() {
        let mut calc = Calculator::new();
        type_digits(&mut calc, "50");
        assert_eq!(calc.percent(), Outcome::Updated);
        assert_eq!(calc.current_operand(), "0.5");
    }

    #[test]
    fn test_percent_on_empty_or_invalid_operand_is_noop() {
        let mut calc = Calculator::new();
        calc.append_digit('5');
        calc.choose_operation(Operation::Add).unwrap();
        assert_eq!(calc.percent(), Outcome::Unchanged);
        assert_eq!(calc.current_operand(), "");

        calc.append_digit('.');
        assert_eq!(calc.percent(), Outcome::Unchanged, "无法解析的操作数应被忽略");
        assert_eq!(calc.current_operand(), ".");
    }

    #[test]
    fn test_negative_zero_result_shows_zero() {
        let mut calc = Calculator::new();
        calc.choose_operation(Operation::Subtract).unwrap();
        calc.append_digit('5');
        calc.calculate().unwrap();
        assert_eq!(calc.current_operand(), "-5");

        // -5 × 0 = -0
        calc.choose_operation(Operation::Multiply).unwrap();
        calc.append_digit('0');
        assert_eq!(calc.calculate(), Ok(Outcome::Computed(-0.0)));
        assert_eq!(calc.current_operand(), "0");
    }

    #[test]
    fn test_operation_symbols() {
        for op in [
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ] {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operation::from_symbol("*"), None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut calc = Calculator::new();
        calc.append_digit('7');
        calc.choose_operation(Operation::Divide).unwrap();
        let json = serde_json::to_value(calc.snapshot()).unwrap();
        assert_eq!(json["previous_operand"], "7");
        assert_eq!(json["operation"], "Divide");
        assert_eq!(json["current_operand"], "");
    }
}
