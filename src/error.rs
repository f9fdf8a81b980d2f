//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，所有 `#[tauri::command]` 函数统一返回
//! `Result<T, AppError>`，前端通过 `Serialize` 获得结构化的错误信息。
//!
//! 用户取消、"不是目录"、"目录不存在" 这类预期内的结果不走错误通道，
//! 由各模块以显式的结果值返回；这里只承载真正的故障。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError`、`std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 每个变体都有稳定的机器码（`code()`），序列化为 `{ code, message }`。

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::image_handler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 剪贴板读写操作失败
    #[error("剪贴板操作失败: {0}")]
    Clipboard(String),

    /// 图片解码 / 校验 / 缩放失败
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 原生对话框调用失败
    #[error("对话框操作失败: {0}")]
    Dialog(String),

    /// 系统 shell 打开路径 / URL 失败
    #[error("打开失败: {0}")]
    Shell(String),

    /// 请求参数不合法（Base64 无法解码、文件名非法等）
    #[error("无效的输入: {0}")]
    Payload(String),

    /// 临时 PNG 文件作用域内的操作失败，临时目录已清理
    #[error("处理 PNG 临时文件失败: {source}")]
    TempFile {
        #[source]
        source: Box<AppError>,
    },

    /// 平台路径（日志目录、下载目录等）不可用
    #[error("平台路径不可用: {0}")]
    Environment(String),

    /// 配置读写失败
    #[error("配置错误: {0}")]
    Config(String),

    /// 阻塞任务线程执行失败
    #[error("后台任务执行失败: {0}")]
    Task(String),
}

impl AppError {
    /// 前端可用于分支判断的稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Clipboard(_) => "CLIPBOARD_ERROR",
            AppError::Image(_) => "IMAGE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Dialog(_) => "DIALOG_ERROR",
            AppError::Shell(_) => "SHELL_ERROR",
            AppError::Payload(_) => "INVALID_PAYLOAD",
            AppError::TempFile { .. } => "TEMP_FILE_ERROR",
            AppError::Environment(_) => "ENVIRONMENT_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Task(_) => "TASK_ERROR",
        }
    }

    /// 将作用域内的失败包装为 `TempFile`，保留原始错误作为 `source`。
    pub(crate) fn in_temp_file(source: AppError) -> Self {
        AppError::TempFile {
            source: Box::new(source),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        AppError::Task(error.to_string())
    }
}

/// Tauri IPC 要求返回值实现 `Serialize`。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AppError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
