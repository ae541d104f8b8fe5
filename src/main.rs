//! # coordfeat - 晶体结构配位环境特征工具
//!
//! 从结构的近邻连接表和 CN 选择结果计算定长数值特征，用于机器学习。
//!
//! ## 子命令
//! - `featurize` - 计算配位多面体、近邻角色计数与环境特征，导出 CSV
//! - `inspect`   - 查看单个结构各位点、各方法的多面体结果
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (结构输入解析)
//!   │     ├── features/  (特征计算与导出)
//!   │     │     ├── geometry/ (凸包与多面体指标)
//!   │     │     └── roles/    (元素角色分类)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod features;
mod geometry;
mod models;
mod parsers;
mod roles;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
