//! Text normalization for property values

const TAB_WIDTH: usize = 8;

/// Normalize property text the way SGF viewers expect to display it
///
/// Tabs expand to 8-column stops and carriage returns are dropped.
/// Simple text collapses all whitespace runs into single spaces and is
/// trimmed on both ends. Multi-line text turns vertical tabs and form
/// feeds into paragraph breaks and is trimmed on the right. Returns
/// `None` when nothing but whitespace remains.
pub fn normalize_text(text: &str, simple: bool) -> Option<String> {
    let mut result = String::with_capacity(text.len());
    let mut column = 0;

    for ch in text.chars() {
        match ch {
            '\r' => {}
            '\t' => {
                let spaces = TAB_WIDTH - column % TAB_WIDTH;
                result.extend(std::iter::repeat(' ').take(spaces));
                column += spaces;
            }
            '\n' => {
                result.push('\n');
                column = 0;
            }
            '\x0b' | '\x0c' if !simple => {
                result.push_str("\n\n\n\n");
                column = 0;
            }
            ch => {
                result.push(ch);
                column += 1;
            }
        }
    }

    let normalized = if simple {
        result.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        result.trim_end().to_string()
    };

    if normalized.trim().is_empty() {
        None
    } else {
        Some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_text_collapses_whitespace() {
        assert_eq!(
            normalize_text("  Honinbo \r\n\tTitle  ", true),
            Some("Honinbo Title".to_string())
        );
    }

    #[test]
    fn test_tabs_expand_to_stops() {
        assert_eq!(normalize_text("ab\tc", false), Some("ab      c".to_string()));
        assert_eq!(normalize_text("x\n\ty", false), Some("x\n        y".to_string()));
    }

    #[test]
    fn test_multiline_keeps_leading_space() {
        assert_eq!(
            normalize_text("  first\r\nsecond \n\n", false),
            Some("  first\nsecond".to_string())
        );
        assert_eq!(normalize_text("a\x0cb", false), Some("a\n\n\n\nb".to_string()));
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(normalize_text(" \t\r\n", false), None);
        assert_eq!(normalize_text("", true), None);
    }
}
