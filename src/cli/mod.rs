//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `featurize`: 计算配位环境特征并导出 CSV
//! - `inspect`: 查看单个结构各位点、各方法的多面体结果
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: featurize, inspect

pub mod featurize;
pub mod inspect;

use clap::{Parser, Subcommand};

/// coordfeat - 晶体结构配位环境特征工具
#[derive(Parser)]
#[command(name = "coordfeat")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Coordination environment featurizer for crystal structures", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute coordination features for one structure or a directory of structures
    Featurize(featurize::FeaturizeArgs),

    /// Show per-site, per-method polyhedron results for one structure
    Inspect(inspect::InspectArgs),
}
