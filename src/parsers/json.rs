//! # 结构连接表 JSON 解析器
//!
//! ## 格式说明
//! ```text
//! {
//!   "name": "ThSb",
//!   "unique_elements": ["Th", "Sb"],
//!   "connections": {
//!     "Th1": {
//!       "position": [0.0, 0.0, 0.0],
//!       "neighbors": [
//!         { "label": "Sb1", "position": [1.67, 1.67, 1.67], "distance": 2.9 },
//!         ...
//!       ]
//!     }
//!   },
//!   "CN_max_gap_per_site": {
//!     "Th1": { "dist_by_shortest_dist": { "CN": 4 }, ... }
//!   }
//! }
//! ```
//! `element` 字段可省略，此时由标签推断；`name` 省略时取文件名。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/structure.rs`, `roles/label.rs`
//! - 使用 `serde_json` crate

use crate::error::{CoordfeatError, Result};
use crate::models::StructureInput;
use crate::roles::atom_type_from_label;

use std::fs;
use std::path::Path;

/// 解析结构 JSON 文件
pub fn parse_json_file(path: &Path) -> Result<StructureInput> {
    let content = fs::read_to_string(path).map_err(|e| CoordfeatError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut structure: StructureInput =
        serde_json::from_str(&content).map_err(|e| CoordfeatError::JsonError {
            path: path.display().to_string(),
            source: e,
        })?;

    if structure.name.is_empty() {
        structure.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
    }

    normalize(&mut structure)?;
    Ok(structure)
}

/// 从字符串内容解析
pub fn parse_json_content(content: &str, default_name: &str) -> Result<StructureInput> {
    let mut structure: StructureInput =
        serde_json::from_str(content).map_err(|e| CoordfeatError::JsonError {
            path: default_name.to_string(),
            source: e,
        })?;

    if structure.name.is_empty() {
        structure.name = default_name.to_string();
    }

    normalize(&mut structure)?;
    Ok(structure)
}

/// 补全元素符号、去重元素并检查连接表约束
fn normalize(structure: &mut StructureInput) -> Result<()> {
    let mut unique: Vec<String> = Vec::new();
    for el in structure.unique_elements.drain(..) {
        let el = el.trim().to_string();
        if !el.is_empty() && !unique.contains(&el) {
            unique.push(el);
        }
    }
    structure.unique_elements = unique;

    for (label, site) in structure.connections.iter_mut() {
        if site.element.is_empty() {
            site.element = resolve_element(label)?;
        }

        let mut previous = 0.0;
        for neighbor in site.neighbors.iter_mut() {
            if neighbor.element.is_empty() {
                neighbor.element = resolve_element(&neighbor.label)?;
            }
            if !neighbor.distance.is_finite() || neighbor.distance < 0.0 {
                return Err(CoordfeatError::InvalidConnections {
                    site: label.clone(),
                    reason: format!("invalid distance {} to '{}'", neighbor.distance, neighbor.label),
                });
            }
            if neighbor.distance < previous {
                return Err(CoordfeatError::InvalidConnections {
                    site: label.clone(),
                    reason: "neighbors are not sorted by distance".to_string(),
                });
            }
            previous = neighbor.distance;
        }
    }

    for (label, methods) in &structure.cn_max_gap_per_site {
        let site = structure
            .connections
            .get(label)
            .ok_or_else(|| CoordfeatError::UnknownSite(label.clone()))?;

        for (method, data) in methods {
            if data.cn > site.neighbors.len() {
                return Err(CoordfeatError::InvalidConnections {
                    site: label.clone(),
                    reason: format!(
                        "method '{}' selects CN {} but only {} neighbors are listed",
                        method,
                        data.cn,
                        site.neighbors.len()
                    ),
                });
            }
        }
    }

    Ok(())
}

fn resolve_element(label: &str) -> Result<String> {
    atom_type_from_label(label).ok_or_else(|| {
        CoordfeatError::InvalidFormat(format!("cannot infer element from label '{}'", label))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CnSelector, ConnectionProvider};

    const SAMPLE: &str = r#"{
        "unique_elements": ["Th", "Sb", "Sb"],
        "connections": {
            "Th1": {
                "position": [0.0, 0.0, 0.0],
                "neighbors": [
                    { "label": "Sb1", "position": [2.9, 0.0, 0.0], "distance": 2.9 },
                    { "label": "Sb2", "element": "Sb", "position": [0.0, 3.0, 0.0], "distance": 3.0 },
                    { "label": "Th2", "position": [0.0, 0.0, 3.3], "distance": 3.3 }
                ]
            }
        },
        "CN_max_gap_per_site": {
            "Th1": { "dist_by_shortest_dist": { "CN": 2 }, "dist_by_radius_sum": { "CN": 3 } }
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let s = parse_json_content(SAMPLE, "ThSb").unwrap();

        assert_eq!(s.name, "ThSb");
        assert_eq!(s.unique_elements, vec!["Th", "Sb"]);

        let th1 = s.site("Th1").unwrap();
        assert_eq!(th1.element, "Th");
        assert_eq!(th1.neighbors[0].element, "Sb");
        assert_eq!(th1.neighbors[2].element, "Th");
        assert_eq!(s.coordination_number("Th1", "dist_by_radius_sum"), Some(3));
    }

    #[test]
    fn test_unsorted_neighbors_rejected() {
        let content = SAMPLE.replace("\"distance\": 3.3", "\"distance\": 1.0");
        let err = parse_json_content(&content, "bad").unwrap_err();
        assert!(matches!(err, CoordfeatError::InvalidConnections { .. }));
    }

    #[test]
    fn test_cn_exceeding_neighbors_rejected() {
        let content = SAMPLE.replace("{ \"CN\": 3 }", "{ \"CN\": 7 }");
        let err = parse_json_content(&content, "bad").unwrap_err();
        assert!(matches!(err, CoordfeatError::InvalidConnections { .. }));
    }

    #[test]
    fn test_cn_for_unknown_site_rejected() {
        let content = SAMPLE.replace("\"Th1\": { \"dist_by", "\"Th9\": { \"dist_by");
        let err = parse_json_content(&content, "bad").unwrap_err();
        assert!(matches!(err, CoordfeatError::UnknownSite(ref l) if l == "Th9"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_json_content("{ not json", "bad").unwrap_err();
        assert!(matches!(err, CoordfeatError::JsonError { .. }));
    }

    #[test]
    fn test_parse_file_uses_stem_as_name() {
        let dir = std::env::temp_dir().join("coordfeat_json_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ThSb_test.json");
        fs::write(&path, SAMPLE).unwrap();

        let s = parse_json_file(&path).unwrap();
        assert_eq!(s.name, "ThSb_test");

        fs::remove_file(&path).ok();
    }
}
