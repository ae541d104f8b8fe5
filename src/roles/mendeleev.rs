//! # Mendeleev 数表
//!
//! Pettifor 化学标度对应的 Mendeleev 数，用于元素排序。
//!
//! ## 依赖关系
//! - 被 `roles/mod.rs` (角色排序) 和 `roles/label.rs` (元素识别) 使用
//! - 纯静态数据，无外部依赖

use std::collections::HashMap;
use std::sync::LazyLock;

/// 元素符号 -> Mendeleev 数
pub static MENDELEEV_NUMBERS: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    let table: &[(&str, u32)] = &[
        // --- 稀有气体 ---
        ("He", 1), ("Ne", 2), ("Ar", 3), ("Kr", 4), ("Xe", 5), ("Rn", 6),
        // --- 碱金属 / 碱土金属 ---
        ("Fr", 7), ("Cs", 8), ("Rb", 9), ("K", 10), ("Na", 11), ("Li", 12),
        ("Ra", 13), ("Ba", 14), ("Sr", 15), ("Ca", 16),
        // --- 二价镧系 / 钪族 ---
        ("Yb", 17), ("Eu", 18), ("Sc", 19), ("Lu", 20), ("Tm", 21), ("Er", 22),
        ("Ho", 23), ("Dy", 24), ("Y", 25), ("Tb", 26), ("Gd", 27), ("Sm", 28),
        ("Pm", 29), ("Nd", 30), ("Pr", 31), ("Ce", 32), ("La", 33),
        // --- 锕系 ---
        ("Lr", 34), ("No", 35), ("Md", 36), ("Fm", 37), ("Es", 38), ("Cf", 39),
        ("Bk", 40), ("Cm", 41), ("Am", 42), ("Pu", 43), ("Np", 44), ("U", 45),
        ("Pa", 46), ("Th", 47), ("Ac", 48),
        // --- 过渡金属 ---
        ("Zr", 49), ("Hf", 50), ("Ti", 51), ("Ta", 52), ("Nb", 53), ("V", 54),
        ("W", 55), ("Mo", 56), ("Cr", 57), ("Re", 58), ("Tc", 59), ("Mn", 60),
        ("Fe", 61), ("Ru", 62), ("Os", 63), ("Co", 64), ("Rh", 65), ("Ir", 66),
        ("Ni", 67), ("Pt", 68), ("Pd", 69), ("Au", 70), ("Ag", 71), ("Cu", 72),
        // --- 主族 ---
        ("Mg", 73), ("Hg", 74), ("Cd", 75), ("Zn", 76), ("Be", 77), ("Tl", 78),
        ("In", 79), ("Al", 80), ("Ga", 81), ("Pb", 82), ("Sn", 83), ("Ge", 84),
        ("Si", 85), ("B", 86), ("Bi", 87), ("Sb", 88), ("As", 89), ("P", 90),
        ("Po", 91), ("Te", 92), ("Se", 93), ("S", 94), ("C", 95), ("At", 96),
        ("I", 97), ("Br", 98), ("Cl", 99), ("N", 100), ("O", 101), ("F", 102),
        ("H", 103),
    ];
    table.iter().copied().collect()
});

/// 查询元素的 Mendeleev 数
pub fn mendeleev_number(element: &str) -> Option<u32> {
    MENDELEEV_NUMBERS.get(element).copied()
}

/// 是否为已知元素符号
pub fn is_element(symbol: &str) -> bool {
    MENDELEEV_NUMBERS.contains_key(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_numbers() {
        assert_eq!(mendeleev_number("He"), Some(1));
        assert_eq!(mendeleev_number("Th"), Some(47));
        assert_eq!(mendeleev_number("Sb"), Some(88));
        assert_eq!(mendeleev_number("H"), Some(103));
    }

    #[test]
    fn test_numbers_are_unique() {
        let mut values: Vec<u32> = MENDELEEV_NUMBERS.values().copied().collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), MENDELEEV_NUMBERS.len());
        assert_eq!(values.len(), 103);
    }

    #[test]
    fn test_unknown_symbol() {
        assert!(mendeleev_number("Xx").is_none());
        assert!(!is_element("sb"));
    }
}
