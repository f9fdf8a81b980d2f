//! # 错误模型模块
//!
//! 使用单一错误枚举承载图片链路中的所有错误来源，调用侧可按分支匹配，
//! 命令层通过 `From` 上转为 `AppError`。

/// 图片处理统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("解码错误：{0}")]
    Decode(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl ImageError {
    /// 出错阶段，便于日志检索。
    pub fn stage(&self) -> &'static str {
        match self {
            ImageError::FileSystem(_) => "load",
            ImageError::InvalidFormat(_) | ImageError::Decode(_) => "decode",
            ImageError::ResourceLimit(_) => "validate",
        }
    }
}
