//! # featurize 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/featurize.rs`

use clap::Args;
use std::path::PathBuf;

/// featurize 子命令参数
#[derive(Args, Debug)]
pub struct FeaturizeArgs {
    /// Input: structure JSON file or directory containing structure files
    pub input: PathBuf,

    /// Output CSV file (one row per structure)
    #[arg(short, long, default_value = "features.csv")]
    pub output: PathBuf,

    /// Glob pattern for input files (batch mode, e.g., "*.json,*_connections.json")
    #[arg(long, default_value = "*.json")]
    pub pattern: String,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Also compute shortest-distance environment features (ENV_*)
    #[arg(long, default_value_t = false)]
    pub env: bool,

    /// Relative tolerance on the shortest distance for ENV_*_tol_* features
    #[arg(long, default_value_t = 0.05)]
    pub tol: f64,

    /// Print the feature table to the terminal (single file mode)
    #[arg(long, default_value_t = false)]
    pub show: bool,
}
