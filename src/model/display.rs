//! 显示格式化：整数部分千分位分组，小数部分原样保留

/// 千分位分隔符（固定为 en 风格）
pub const GROUP_SEPARATOR: char = ',';

/// 将操作数文本格式化为显示文本
///
/// 按第一个 `.` 拆分：整数部分做千分位分组，无法识别时显示为空；
/// 只要存在小数点（包括末尾的 `.`），就追加 `.` 与原始小数位。
pub fn format_display(text: &str) -> String {
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };

    let mut out = format_integer(integer);
    if let Some(fraction) = fraction {
        // 只取到下一个小数点为止
        let digits = fraction.split('.').next().unwrap_or_default();
        out.push('.');
        out.push_str(digits);
    }
    out
}

/// 整数部分分组；非数字文本返回空串
fn format_integer(integer: &str) -> String {
    let (sign, rest) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer.strip_prefix('+').unwrap_or(integer)),
    };

    if rest == "Infinity" {
        return format!("{sign}∞");
    }
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return String::new();
    }

    let trimmed = rest.trim_start_matches('0');
    let digits = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{sign}{}", group_digits(digits))
}

/// 每三位插入分隔符
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}
