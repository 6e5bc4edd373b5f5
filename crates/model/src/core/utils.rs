/// Removes trailing ASCII spaces only, leaving other whitespace intact.
pub fn right_trim_whitespace(value: &str) -> &str {
    value.trim_end_matches(' ')
}

/// Pads `value` with spaces on the right up to `width` characters.
pub fn right_pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + width - len);
    out.push_str(value);
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

/// Quotes a SQL string literal, doubling embedded single quotes.
pub fn quote_sql_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_trim_keeps_leading_and_tabs() {
        assert_eq!(right_trim_whitespace("  a b  "), "  a b");
        assert_eq!(right_trim_whitespace("a\t "), "a\t");
        assert_eq!(right_trim_whitespace("   "), "");
    }

    #[test]
    fn test_right_pad() {
        assert_eq!(right_pad("ab", 4), "ab  ");
        assert_eq!(right_pad("abcd", 2), "abcd");
    }

    #[test]
    fn test_quote_sql_string() {
        assert_eq!(quote_sql_string("A'B'C"), "'A''B''C'");
    }
}
