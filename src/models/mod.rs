//! # 数据模型模块
//!
//! 定义结构连接表输入与特征计算的中间数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `features/` 和 `commands/` 使用
//! - 子模块: structure, table

pub mod structure;
pub mod table;

pub use structure::{CnSelector, ConnectionProvider, Neighbor, SiteConnections, StructureInput};
pub use table::{FeatureRow, GlobalSummary, MetricRecord, MetricTable, SiteSummary, Stats};
