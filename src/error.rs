//! # 统一错误处理模块
//!
//! 定义 coordfeat 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// coordfeat 统一错误类型
#[derive(Error, Debug)]
pub enum CoordfeatError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse structure file: {path}\nReason: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid structure data: {0}")]
    InvalidFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 输入契约错误（调用方数据有误）
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid connection data for site '{site}': {reason}")]
    InvalidConnections { site: String, reason: String },

    #[error("Site '{0}' has no connection data")]
    UnknownSite(String),

    #[error("Unknown element symbol: {0}")]
    UnknownElement(String),

    // ─────────────────────────────────────────────────────────────
    // 特征计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unsupported number of unique elements: {count} ({elements}); expected 2, 3 or 4")]
    UnsupportedArity { count: usize, elements: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CoordfeatError>;
