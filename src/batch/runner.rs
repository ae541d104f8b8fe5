//! # 批量执行器
//!
//! 并行执行批量处理任务，每个结构互相独立。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/featurize.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{CoordfeatError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    /// 处理成功
    Success(T),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功的输出（保持输入顺序）
    pub outputs: Vec<T>,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        BatchResult {
            outputs: Vec::new(),
            failed: 0,
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(output) => self.outputs.push(output),
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 成功数量
    pub fn success(&self) -> usize {
        self.outputs.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success() + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理文件列表
    pub fn run<T, F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult<T>>
    where
        T: Send,
        F: Fn(&PathBuf) -> ProcessResult<T> + Sync + Send,
    {
        let total = files.len();
        let pb = progress::create_progress_bar(total as u64, "Featurizing");

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| CoordfeatError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult<T>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_keeps_input_order() {
        let files: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{}.json", i))).collect();
        let runner = BatchRunner::new(4);

        let result = runner
            .run(files, |f| {
                let stem = f.file_stem().unwrap().to_str().unwrap();
                let n: usize = stem.parse().unwrap();
                if n % 5 == 0 {
                    ProcessResult::Failed(f.display().to_string(), "boom".to_string())
                } else {
                    ProcessResult::Success(n)
                }
            })
            .unwrap();

        assert_eq!(result.total(), 20);
        assert_eq!(result.failed, 4);
        assert_eq!(result.success(), 16);
        assert_eq!(result.outputs[..5], [1, 2, 3, 4, 6]);
        assert_eq!(result.failures[0].0, "0.json");
    }
}
