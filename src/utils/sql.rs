/// 转义 LIKE 模式中的通配符
///
/// 搜索关键字作为字面量匹配，`%`、`_` 与转义符本身都需要处理。
pub fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// 拆解排序参数：`-` 前缀表示倒序
///
/// 返回 (字段名, 是否倒序)；空白输入返回 None，由调用方落回默认排序。
pub fn parse_ordering(raw: Option<&str>) -> Option<(&str, bool)> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.strip_prefix('-') {
        Some(field) => Some((field, true)),
        None => Some((raw, false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ordering() {
        assert_eq!(parse_ordering(None), None);
        assert_eq!(parse_ordering(Some("  ")), None);
        assert_eq!(parse_ordering(Some("due_date")), Some(("due_date", false)));
        assert_eq!(parse_ordering(Some("-score")), Some(("score", true)));
    }

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("plain"), "plain");
        assert_eq!(escape_like_pattern("50%"), "50\\%");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
        assert_eq!(escape_like_pattern("back\\slash"), "back\\\\slash");
    }
}
