//! # 结构角色分类模块
//!
//! 将结构中的 2/3/4 种不同元素映射为有序的结构角色：
//! - 二元: A, B
//! - 三元: R, M, X
//! - 四元: A, B, C, D
//!
//! ## 子模块
//! - `mendeleev`: Pettifor Mendeleev 数表
//! - `label`: 位点标签 -> 元素符号
//!
//! ## 依赖关系
//! - 被 `features/` 和 `parsers/json.rs` 使用

pub mod label;
pub mod mendeleev;

pub use label::atom_type_from_label;

use crate::error::{CoordfeatError, Result};

const BINARY_ROLES: [&str; 2] = ["A", "B"];
const TERNARY_ROLES: [&str; 3] = ["R", "M", "X"];
const QUATERNARY_ROLES: [&str; 4] = ["A", "B", "C", "D"];

/// 有序的 (角色名, 元素符号) 列表，长度为 2、3 或 4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet {
    roles: Vec<(String, String)>,
}

impl RoleSet {
    /// 由已排好序的元素构造角色集合
    pub fn from_ordered(elements: &[String]) -> Result<Self> {
        let names: &[&str] = match elements.len() {
            2 => &BINARY_ROLES,
            3 => &TERNARY_ROLES,
            4 => &QUATERNARY_ROLES,
            count => {
                return Err(CoordfeatError::UnsupportedArity {
                    count,
                    elements: elements.join(", "),
                })
            }
        };

        let roles = names
            .iter()
            .zip(elements)
            .map(|(name, element)| (name.to_string(), element.clone()))
            .collect();

        Ok(RoleSet { roles })
    }

    /// 角色数（即结构的元素数）
    pub fn arity(&self) -> usize {
        self.roles.len()
    }

    /// 按顺序遍历 (角色名, 元素符号)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.roles.iter().map(|(r, e)| (r.as_str(), e.as_str()))
    }

    /// 元素对应的角色名
    pub fn role_of(&self, element: &str) -> Option<&str> {
        self.roles
            .iter()
            .find(|(_, e)| e == element)
            .map(|(r, _)| r.as_str())
    }

}

/// 角色分类器
pub trait RoleClassifier {
    fn classify(&self, unique_elements: &[String]) -> Result<RoleSet>;
}

/// 按 Mendeleev 数升序分配角色
#[derive(Debug, Clone, Copy, Default)]
pub struct MendeleevClassifier;

impl RoleClassifier for MendeleevClassifier {
    fn classify(&self, unique_elements: &[String]) -> Result<RoleSet> {
        // 先检查元素数，避免对无效结构报告未知元素
        if !(2..=4).contains(&unique_elements.len()) {
            return RoleSet::from_ordered(unique_elements);
        }

        let mut ranked = unique_elements
            .iter()
            .map(|el| {
                mendeleev::mendeleev_number(el)
                    .map(|n| (n, el.clone()))
                    .ok_or_else(|| CoordfeatError::UnknownElement(el.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        ranked.sort_by_key(|(n, _)| *n);
        let ordered: Vec<String> = ranked.into_iter().map(|(_, el)| el).collect();

        RoleSet::from_ordered(&ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_binary_roles() {
        let roles = MendeleevClassifier
            .classify(&elements(&["Sb", "Th"]))
            .unwrap();
        let order: Vec<_> = roles.iter().collect();
        assert_eq!(order, vec![("A", "Th"), ("B", "Sb")]);
        assert_eq!(roles.role_of("Sb"), Some("B"));
    }

    #[test]
    fn test_ternary_roles() {
        // La (33) < Co (64) < Si (85)
        let roles = MendeleevClassifier
            .classify(&elements(&["Si", "La", "Co"]))
            .unwrap();
        let order: Vec<_> = roles.iter().collect();
        assert_eq!(order, vec![("R", "La"), ("M", "Co"), ("X", "Si")]);
    }

    #[test]
    fn test_quaternary_roles() {
        let roles = MendeleevClassifier
            .classify(&elements(&["O", "Cu", "Ba", "Y"]))
            .unwrap();
        assert_eq!(roles.arity(), 4);
        let order: Vec<_> = roles.iter().collect();
        assert_eq!(order, vec![("A", "Ba"), ("B", "Y"), ("C", "Cu"), ("D", "O")]);
    }

    #[test]
    fn test_unsupported_arity() {
        let err = MendeleevClassifier
            .classify(&elements(&["Li", "Na", "K", "Rb", "Cs"]))
            .unwrap_err();
        assert!(matches!(err, CoordfeatError::UnsupportedArity { count: 5, .. }));

        let err = MendeleevClassifier.classify(&elements(&["Fe"])).unwrap_err();
        assert!(matches!(err, CoordfeatError::UnsupportedArity { count: 1, .. }));
    }

    #[test]
    fn test_unknown_element() {
        let err = MendeleevClassifier
            .classify(&elements(&["Xx", "Sb"]))
            .unwrap_err();
        assert!(matches!(err, CoordfeatError::UnknownElement(ref el) if el == "Xx"));
    }
}
