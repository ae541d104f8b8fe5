//! # 最短距离环境特征
//!
//! 基于每个位点的第一、第二最短近邻距离，按结构角色汇总环境特征。
//! 每个角色有一个"最佳位点"（最短距离最小的位点，距离相同时取标签顺序靠前者），
//! 非 `avg` 特征取自最佳位点，`avg` 特征为该角色全部位点的平均。
//!
//! 特征名形如 `ENV_R_shortest_dist_count`、`ENV_M_count_at_X_shortest_dist`；
//! 无法定义的特征（如缺少第二近邻距离）不输出。
//!
//! ## 依赖关系
//! - 被 `commands/featurize.rs` 调用
//! - 使用 `models/structure.rs` 和 `roles::RoleSet`

use crate::models::{ConnectionProvider, Neighbor};
use crate::roles::RoleSet;

use std::collections::BTreeMap;

/// 判定两个距离相同的容差 (Å)
pub const DISTANCE_TOLERANCE: f64 = 1e-3;

/// 默认最短距离相对容差
pub const DEFAULT_SHORTEST_TOLERANCE: f64 = 0.05;

/// 单个位点的距离摘要
#[derive(Debug, Clone)]
struct SiteDistances<'a> {
    shortest: f64,
    shortest_count: usize,
    second: Option<(f64, usize)>,
    within_tol_count: usize,
    homoatomic: Option<f64>,
    /// 处于最短距离上的近邻
    shortest_shell: &'a [Neighbor],
}

impl<'a> SiteDistances<'a> {
    fn new(element: &str, neighbors: &'a [Neighbor], tol: f64) -> Option<Self> {
        let shortest = neighbors.first()?.distance;

        let shortest_count = neighbors
            .iter()
            .take_while(|n| n.distance - shortest <= DISTANCE_TOLERANCE)
            .count();

        let second = neighbors.get(shortest_count).map(|first_beyond| {
            let d = first_beyond.distance;
            let count = neighbors[shortest_count..]
                .iter()
                .take_while(|n| n.distance - d <= DISTANCE_TOLERANCE)
                .count();
            (d, count)
        });

        let limit = shortest * (1.0 + tol);
        let within_tol_count = neighbors
            .iter()
            .take_while(|n| n.distance <= limit + DISTANCE_TOLERANCE)
            .count();

        let homoatomic = neighbors
            .iter()
            .find(|n| n.element == element)
            .map(|n| n.distance);

        Some(SiteDistances {
            shortest,
            shortest_count,
            second,
            within_tol_count,
            homoatomic,
            shortest_shell: &neighbors[..shortest_count],
        })
    }

    fn second_by_first(&self) -> Option<f64> {
        self.second
            .filter(|_| self.shortest > 0.0)
            .map(|(d, _)| d / self.shortest)
    }

    fn homoatomic_by_shortest(&self) -> Option<f64> {
        self.homoatomic
            .filter(|_| self.shortest > 0.0)
            .map(|d| d / self.shortest)
    }

    fn count_of(&self, element: &str) -> usize {
        self.shortest_shell
            .iter()
            .filter(|n| n.element == element)
            .count()
    }
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// 计算全部角色的最短距离环境特征
pub fn compute_environment_features<C>(connections: &C, roles: &RoleSet, tol: f64) -> BTreeMap<String, f64>
where
    C: ConnectionProvider + ?Sized,
{
    let mut features = BTreeMap::new();

    for (role, element) in roles.iter() {
        let sites: Vec<SiteDistances> = connections
            .site_labels()
            .into_iter()
            .filter_map(|label| connections.site(label))
            .filter(|site| site.element == element)
            .filter_map(|site| SiteDistances::new(element, &site.neighbors, tol))
            .collect();

        // 距离相同时保留靠前的位点
        let Some(best) = sites
            .iter()
            .reduce(|best, cur| if cur.shortest < best.shortest { cur } else { best })
        else {
            continue;
        };

        let mut put = |name: String, value: Option<f64>| {
            if let Some(v) = value {
                features.insert(format!("ENV_{}_{}", role, name), v);
            }
        };

        put("shortest_dist_count".into(), Some(best.shortest_count as f64));
        put(
            "avg_shortest_dist_count".into(),
            mean(sites.iter().map(|s| s.shortest_count as f64)),
        );
        put("shortest_tol_dist_count".into(), Some(best.within_tol_count as f64));
        put(
            "avg_shortest_dist_within_tol_count".into(),
            mean(sites.iter().map(|s| s.within_tol_count as f64)),
        );
        put("second_by_first_shortest_dist".into(), best.second_by_first());
        put(
            "avg_second_by_first_shortest_dist".into(),
            mean(sites.iter().filter_map(|s| s.second_by_first())),
        );
        put(
            "second_shortest_dist_count".into(),
            best.second.map(|(_, c)| c as f64),
        );
        put(
            "avg_second_shortest_dist_count".into(),
            mean(sites.iter().filter_map(|s| s.second.map(|(_, c)| c as f64))),
        );
        put("homoatomic_dist_by_shortest_dist".into(), best.homoatomic_by_shortest());
        put(
            "avg_homoatomic_dist_by_shortest_dist".into(),
            mean(sites.iter().filter_map(|s| s.homoatomic_by_shortest())),
        );

        // 其它角色在本角色最短距离壳层中的数量
        for (other_role, other_element) in roles.iter() {
            features.insert(
                format!("ENV_{}_count_at_{}_shortest_dist", other_role, role),
                best.count_of(other_element) as f64,
            );
            if let Some(avg) = mean(sites.iter().map(|s| s.count_of(other_element) as f64)) {
                features.insert(
                    format!("ENV_{}_avg_count_at_{}_shortest_dist", other_role, role),
                    avg,
                );
            }
        }
    }

    features
}
