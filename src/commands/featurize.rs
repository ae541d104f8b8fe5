//! # featurize 命令实现
//!
//! 对单个结构文件或目录中的全部结构计算配位环境特征，导出 CSV。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 按结构并行计算（rayon）
//! - 元素数不受支持等致命错误：该结构不输出特征行，计入失败列表
//! - 可选最短距离环境特征 (ENV_*)
//!
//! ## 依赖关系
//! - 使用 `cli/featurize.rs` 定义的 FeaturizeArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `parsers/` 读取结构，`features/` 计算特征

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::featurize::FeaturizeArgs;
use crate::error::{CoordfeatError, Result};
use crate::features::{self, export};
use crate::geometry::ConvexHullGeometry;
use crate::models::{FeatureRow, StructureInput};
use crate::parsers;
use crate::roles::{MendeleevClassifier, RoleClassifier};
use crate::utils::output;

use std::path::PathBuf;
use std::sync::Arc;
use tabled::{Table, Tabled};

/// 特征计算配置
#[derive(Debug, Clone)]
pub struct FeaturizeConfig {
    /// 是否计算 ENV_* 特征
    pub environment: bool,
    /// 最短距离相对容差
    pub tolerance: f64,
}

impl Default for FeaturizeConfig {
    fn default() -> Self {
        FeaturizeConfig {
            environment: false,
            tolerance: features::environment::DEFAULT_SHORTEST_TOLERANCE,
        }
    }
}

/// 终端展示用的特征行
#[derive(Debug, Clone, Tabled)]
struct FeatureDisplayRow {
    #[tabled(rename = "Feature")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// 执行 featurize 命令
pub fn execute(args: FeaturizeArgs) -> Result<()> {
    output::print_header("Coordination Environment Features");

    if !args.input.exists() {
        return Err(CoordfeatError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }
    if !args.tol.is_finite() || args.tol < 0.0 {
        return Err(CoordfeatError::InvalidArgument(format!(
            "Tolerance must be a non-negative number, got {}",
            args.tol
        )));
    }

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    let single = args.input.is_file();
    if single {
        output::print_info(&format!("Single file mode: '{}'", args.input.display()));
    } else {
        output::print_info(&format!(
            "Batch mode: {} structure files in '{}'",
            files.len(),
            args.input.display()
        ));
    }

    // 创建共享配置
    let config = Arc::new(FeaturizeConfig {
        environment: args.env,
        tolerance: args.tol,
    });

    let runner = BatchRunner::new(args.jobs);
    let mut result = runner.run(files, |file| process_file(file, &config))?;
    result.outputs.sort_by(|a, b| a.structure.cmp(&b.structure));

    if single && args.show {
        if let Some(row) = result.outputs.first() {
            print_feature_table(row);
        }
    }

    export::to_csv(&result.outputs, &args.output)?;

    // 打印统计
    output::print_separator();
    output::print_success(&format!(
        "Featurization complete: {} of {} structures, {} failed",
        result.success(),
        result.total(),
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Structures without a feature row:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    output::print_success(&format!(
        "Features for {} structures saved to '{}'",
        result.success(),
        args.output.display()
    ));

    Ok(())
}

/// 处理单个结构文件
fn process_file(input: &PathBuf, config: &Arc<FeaturizeConfig>) -> ProcessResult<FeatureRow> {
    let outcome = parsers::parse_structure_file(input)
        .and_then(|structure| featurize_structure(&structure, config));

    match outcome {
        Ok(row) => ProcessResult::Success(row),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 计算单个结构的完整特征行
pub fn featurize_structure(structure: &StructureInput, config: &FeaturizeConfig) -> Result<FeatureRow> {
    let classifier = MendeleevClassifier;

    let coordination = features::assemble(
        structure,
        &structure.unique_elements,
        &ConvexHullGeometry,
        &classifier,
    )?;
    let mut row = coordination.to_row(&structure.name);

    if config.environment {
        let roles = classifier.classify(&structure.unique_elements)?;
        let env = features::compute_environment_features(structure, &roles, config.tolerance);
        row.extend_with_values(&env);
    }

    Ok(row)
}

/// 打印特征表
fn print_feature_table(row: &FeatureRow) {
    output::print_header(&format!("Features of {}", row.structure));

    let rows: Vec<FeatureDisplayRow> = row
        .values
        .iter()
        .map(|(name, value)| FeatureDisplayRow {
            name: name.clone(),
            value: format!("{:.4}", value),
        })
        .collect();

    println!("{}", Table::new(&rows));
}
