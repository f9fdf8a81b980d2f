//! 目录列举
//!
//! 只列出直接子项的名字（不递归、不过滤隐藏文件），顺序沿用文件系统枚举顺序，
//! 调用方不应依赖顺序。"目录不存在"与"不是目录"是显式结果，不与其他故障混淆。

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::ser::SerializeStruct;

/// 目录列举失败的分类。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListDirectoryError {
    #[error("目录不存在")]
    DirectoryNotFound,

    #[error("指定的路径不是目录")]
    NotADirectory,

    #[error("{0}")]
    Unknown(String),
}

impl ListDirectoryError {
    pub fn code(&self) -> &'static str {
        match self {
            ListDirectoryError::DirectoryNotFound => "DIRECTORY_NOT_FOUND",
            ListDirectoryError::NotADirectory => "NOT_A_DIRECTORY",
            ListDirectoryError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

impl From<io::Error> for ListDirectoryError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ListDirectoryError::DirectoryNotFound,
            _ => ListDirectoryError::Unknown(err.to_string()),
        }
    }
}

impl Serialize for ListDirectoryError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ListDirectoryError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// 列出 `directory` 的直接子项名字。
pub fn list_directory(directory: &Path) -> Result<Vec<String>, ListDirectoryError> {
    let metadata = fs::metadata(directory)?;
    if !metadata.is_dir() {
        return Err(ListDirectoryError::NotADirectory);
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry.map_err(|e| ListDirectoryError::Unknown(e.to_string()))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    log::debug!("📂 列举目录 - 路径: {} 子项: {}", directory.display(), names.len());
    Ok(names)
}
