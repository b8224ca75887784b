//! 数值文本工具：宽松解析与结果文本化
//!
//! 操作数始终以文本形式保存，只有在计算时才解析为f64

/// 宽松解析十进制文本
///
/// 跳过前导空白后取最长的合法数字前缀（`[+-]数字[.数字][e[+-]数字]`），
/// 至少需要一个数字；同时接受带符号的 `Infinity`。其余情况返回 None。
pub fn parse_operand(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // 指数部分只有在完整时才纳入前缀
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    // "12." 与 ".5" 都是 f64::from_str 可接受的形式
    s[..end].parse::<f64>().ok()
}

/// 将计算结果转为规范文本
///
/// 不使用指数形式；负零输出 "0"；非有限值输出 "Infinity"/"-Infinity"/"NaN"
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
