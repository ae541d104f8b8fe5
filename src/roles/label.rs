//! # 位点标签解析
//!
//! 从 "Sb1", "Th2A", "O1" 一类的位点标签中提取元素符号。
//!
//! ## 依赖关系
//! - 被 `parsers/json.rs` 用于补全缺省的元素符号
//! - 使用 `regex` crate

use super::mendeleev::is_element;

use regex::Regex;
use std::sync::LazyLock;

static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])([a-z]?)").expect("static label pattern"));

/// 提取标签开头的元素符号
///
/// 优先匹配两字母符号，不是已知元素时退回单字母符号。
pub fn atom_type_from_label(label: &str) -> Option<String> {
    let caps = LABEL_PATTERN.captures(label.trim())?;
    let first = caps.get(1)?.as_str();
    let second = caps.get(2).map(|m| m.as_str()).unwrap_or("");

    let two_letter = format!("{}{}", first, second);
    if !second.is_empty() && is_element(&two_letter) {
        return Some(two_letter);
    }
    if is_element(first) {
        return Some(first.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_labels() {
        assert_eq!(atom_type_from_label("Sb1").as_deref(), Some("Sb"));
        assert_eq!(atom_type_from_label("Th2").as_deref(), Some("Th"));
        assert_eq!(atom_type_from_label("O1").as_deref(), Some("O"));
    }

    #[test]
    fn test_suffixed_labels() {
        assert_eq!(atom_type_from_label("Th2A").as_deref(), Some("Th"));
        assert_eq!(atom_type_from_label("Co1B").as_deref(), Some("Co"));
        // "Ua" 不是元素，退回 "U"
        assert_eq!(atom_type_from_label("Ua1").as_deref(), Some("U"));
    }

    #[test]
    fn test_unparseable_labels() {
        assert!(atom_type_from_label("1Sb").is_none());
        assert!(atom_type_from_label("").is_none());
        assert!(atom_type_from_label("Qq1").is_none());
    }
}
