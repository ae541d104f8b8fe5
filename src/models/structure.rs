//! # 结构连接表数据模型
//!
//! 描述一个晶体结构的原子位点、近邻列表（按距离升序）以及
//! 每个位点在各 CN 判定方法下选出的配位数。
//!
//! ## 依赖关系
//! - 被 `parsers/json.rs` 填充
//! - 被 `features/` 通过 `ConnectionProvider` / `CnSelector` 只读访问

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 近邻原子记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// 近邻位点标签 (e.g. "Sb1")
    pub label: String,

    /// 元素符号；输入缺省时由标签推断
    #[serde(default)]
    pub element: String,

    /// 笛卡尔坐标 (Å)
    pub position: [f64; 3],

    /// 到中心原子的距离 (Å)
    pub distance: f64,
}

impl Neighbor {
    pub fn new(
        label: impl Into<String>,
        element: impl Into<String>,
        position: [f64; 3],
        distance: f64,
    ) -> Self {
        Neighbor {
            label: label.into(),
            element: element.into(),
            position,
            distance,
        }
    }
}

/// 单个位点的连接信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConnections {
    /// 中心原子元素符号；输入缺省时由位点标签推断
    #[serde(default)]
    pub element: String,

    /// 中心原子笛卡尔坐标 (Å)
    pub position: [f64; 3],

    /// 近邻列表，距离非递减
    pub neighbors: Vec<Neighbor>,
}

impl SiteConnections {
    pub fn new(element: impl Into<String>, position: [f64; 3], neighbors: Vec<Neighbor>) -> Self {
        SiteConnections {
            element: element.into(),
            position,
            neighbors,
        }
    }
}

/// 某一方法给出的配位数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnData {
    #[serde(rename = "CN")]
    pub cn: usize,
}

/// 一个结构的全部输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureInput {
    /// 结构名称（缺省取文件名）
    #[serde(default)]
    pub name: String,

    /// 结构中的不同元素
    pub unique_elements: Vec<String>,

    /// 位点标签 -> 连接信息
    pub connections: BTreeMap<String, SiteConnections>,

    /// 位点标签 -> 方法名 -> 配位数
    #[serde(rename = "CN_max_gap_per_site")]
    pub cn_max_gap_per_site: BTreeMap<String, BTreeMap<String, CnData>>,
}

/// 连接表提供者
pub trait ConnectionProvider {
    /// 所有位点标签（稳定顺序）
    fn site_labels(&self) -> Vec<&str>;

    /// 查询单个位点
    fn site(&self, label: &str) -> Option<&SiteConnections>;
}

/// 配位数选择器
pub trait CnSelector {
    /// 有 CN 数据的位点标签（稳定顺序）
    fn selected_sites(&self) -> Vec<&str>;

    /// 某位点可用的 CN 判定方法
    fn methods(&self, label: &str) -> Vec<&str>;

    /// 某位点在某方法下的配位数
    fn coordination_number(&self, label: &str, method: &str) -> Option<usize>;
}

impl ConnectionProvider for StructureInput {
    fn site_labels(&self) -> Vec<&str> {
        self.connections.keys().map(String::as_str).collect()
    }

    fn site(&self, label: &str) -> Option<&SiteConnections> {
        self.connections.get(label)
    }
}

impl CnSelector for StructureInput {
    fn selected_sites(&self) -> Vec<&str> {
        self.cn_max_gap_per_site.keys().map(String::as_str).collect()
    }

    fn methods(&self, label: &str) -> Vec<&str> {
        self.cn_max_gap_per_site
            .get(label)
            .map(|methods| methods.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn coordination_number(&self, label: &str, method: &str) -> Option<usize> {
        self.cn_max_gap_per_site
            .get(label)
            .and_then(|methods| methods.get(method))
            .map(|data| data.cn)
    }
}
