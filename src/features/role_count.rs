//! # 近邻角色计数
//!
//! 对每个成功构造多面体的 (位点, 方法)，以多面体报告的顶点数作为有效 CN，
//! 统计最近的有效 CN 个近邻中各结构角色的原子数。
//! 不属于任何角色的元素不计入；所有角色都会出现在结果中（缺省为 0）。
//!
//! ## 依赖关系
//! - 被 `features/assemble.rs` 调用
//! - 使用 `features/polyhedron.rs` 的结果和 `roles::RoleSet`

use super::coordination_shell;
use super::polyhedron::PolyhedronTable;
use crate::error::{CoordfeatError, Result};
use crate::models::{ConnectionProvider, MetricRecord, MetricTable, Neighbor};
use crate::roles::RoleSet;

/// 角色计数的指标名，如 "R_count"
pub fn count_key(role: &str) -> String {
    format!("{}_count", role)
}

/// 统计全部 (位点, 方法) 的近邻角色数
pub fn count_roles<C>(connections: &C, polyhedra: &PolyhedronTable, roles: &RoleSet) -> Result<MetricTable>
where
    C: ConnectionProvider + ?Sized,
{
    let mut table = MetricTable::new();

    for (label, methods) in polyhedra {
        for (method, outcome) in methods {
            let Some(metrics) = outcome.metrics() else {
                continue;
            };
            let site = connections
                .site(label)
                .ok_or_else(|| CoordfeatError::UnknownSite(label.clone()))?;
            let shell = coordination_shell(label, site, metrics.number_of_vertices)?;

            table.insert(label.as_str(), method.as_str(), count_shell(shell, roles));
        }
    }

    Ok(table)
}

/// 统计单个壳层
fn count_shell(shell: &[Neighbor], roles: &RoleSet) -> MetricRecord {
    let mut record: MetricRecord = roles.iter().map(|(role, _)| (count_key(role), 0.0)).collect();

    for neighbor in shell {
        if let Some(role) = roles.role_of(&neighbor.element) {
            *record.entry(count_key(role)).or_insert(0.0) += 1.0;
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::polyhedron::{compute_polyhedron_table, PolyhedronOutcome};
    use crate::features::test_utils::{site, structure, TETRAHEDRAL};
    use crate::geometry::{ConvexHullGeometry, HullError, PolyhedronGeometry, PolyhedronMetrics};
    use crate::roles::{MendeleevClassifier, RoleClassifier};

    use std::collections::BTreeMap;

    /// 报告固定顶点数的桩几何原语
    struct FixedVertices(usize);

    impl PolyhedronGeometry for FixedVertices {
        fn compute(&self, points: &[[f64; 3]]) -> std::result::Result<PolyhedronMetrics, HullError> {
            let mut metrics = ConvexHullGeometry.compute(points)?;
            metrics.number_of_vertices = self.0;
            Ok(metrics)
        }
    }

    fn th_sb() -> crate::models::StructureInput {
        let th1 = site(
            "Th",
            &[
                ("Sb1", TETRAHEDRAL[0], 2.9),
                ("Sb2", TETRAHEDRAL[1], 3.0),
                ("Sb3", TETRAHEDRAL[2], 3.05),
                ("Sb4", TETRAHEDRAL[3], 3.1),
                ("Th2", [0.0, 0.0, 1.0], 3.3),
            ],
        );
        structure(&["Th", "Sb"], vec![("Th1", th1)], &[("Th1", "m1", 4)])
    }

    fn binary_roles() -> RoleSet {
        MendeleevClassifier
            .classify(&["Th".to_string(), "Sb".to_string()])
            .unwrap()
    }

    #[test]
    fn test_binary_counts_use_reported_vertices() {
        let s = th_sb();
        let polyhedra = compute_polyhedron_table(&s, &s, &ConvexHullGeometry).unwrap();
        let counts = count_roles(&s, &polyhedra, &binary_roles()).unwrap();

        let record = &counts.site("Th1").unwrap()["m1"];
        assert_eq!(record["A_count"], 0.0);
        assert_eq!(record["B_count"], 4.0);
    }

    #[test]
    fn test_counts_follow_geometry_not_raw_cn() {
        let s = th_sb();
        // 顶点数 5 时第五近邻 Th2 也被计入
        let polyhedra = compute_polyhedron_table(&s, &s, &FixedVertices(5)).unwrap();
        let counts = count_roles(&s, &polyhedra, &binary_roles()).unwrap();
        let record = &counts.site("Th1").unwrap()["m1"];
        assert_eq!(record["A_count"], 1.0);
        assert_eq!(record["B_count"], 4.0);

        let polyhedra = compute_polyhedron_table(&s, &s, &FixedVertices(3)).unwrap();
        let counts = count_roles(&s, &polyhedra, &binary_roles()).unwrap();
        let record = &counts.site("Th1").unwrap()["m1"];
        assert_eq!(record["A_count"] + record["B_count"], 3.0);
    }

    #[test]
    fn test_unknown_elements_are_excluded_and_roles_default_to_zero() {
        let mut s = th_sb();
        // 第一个近邻替换为不在角色集合中的元素
        if let Some(site) = s.connections.get_mut("Th1") {
            site.neighbors[0].element = "Ga".to_string();
        }
        let polyhedra = compute_polyhedron_table(&s, &s, &ConvexHullGeometry).unwrap();
        let roles = MendeleevClassifier
            .classify(&["Th".to_string(), "Sb".to_string(), "Co".to_string()])
            .unwrap();
        let counts = count_roles(&s, &polyhedra, &roles).unwrap();

        let record = &counts.site("Th1").unwrap()["m1"];
        assert_eq!(record.len(), 3);
        assert_eq!(record["R_count"], 0.0);
        assert_eq!(record["M_count"], 0.0);
        assert_eq!(record["X_count"], 3.0);
        let total: f64 = record.values().sum();
        assert!(total <= 4.0);
    }

    #[test]
    fn test_absent_polyhedra_produce_no_counts() {
        let s = th_sb();
        let mut polyhedra = PolyhedronTable::new();
        let mut methods = BTreeMap::new();
        methods.insert("m1".to_string(), PolyhedronOutcome::DegenerateHull);
        methods.insert("m2".to_string(), PolyhedronOutcome::TooFewPoints);
        polyhedra.insert("Th1".to_string(), methods);

        let counts = count_roles(&s, &polyhedra, &binary_roles()).unwrap();
        assert!(counts.is_empty());
    }
}
