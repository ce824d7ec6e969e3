//! 错误类型

use std::path::PathBuf;
use thiserror::Error;

/// 转换过程中的致命错误
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("读取 {path:?} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析 {path:?} 失败: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("序列化失败: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("遍历目录 {path:?} 失败: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("无效的属性文件名: {0:?}")]
    InvalidStatsFilename(String),

    #[error("无效的 {kind} 值: {value:?}")]
    InvalidEnum { kind: &'static str, value: String },

    #[error("无效的刷新关系: {0}")]
    InvalidRelation(String),

    #[error("无效的 UUID: {0:?}")]
    InvalidUuid(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
