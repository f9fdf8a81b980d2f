//! 剪贴板桥接模块
//!
//! # 设计思路
//!
//! 统一管理与系统剪贴板交换文件路径列表和图片的能力：
//! - **文件路径**：通过 `arboard` 写入/读取系统原生的文件列表格式（Windows 为 `CF_HDROP`），
//!   让用户可以直接在资源管理器 / Finder 中粘贴
//! - **图片**：写入 RGBA 像素数据，带有限重试
//!
//! # 实现思路
//!
//! - 平台细节收敛在 `ClipboardBackend` trait 之后，`SystemClipboard` 为默认实现，
//!   测试注入内存实现。
//! - 空路径列表直接成功返回，不触碰系统剪贴板。
//! - 剪贴板 API 是阻塞的，统一放到 `spawn_blocking` 中执行。
//! - 并发写入不做串行化，最后写入者生效。

pub mod platform;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::error::AppError;

pub use platform::SystemClipboard;

/// 剪贴板中的文件列表与伴随的纯文本。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClipboardFiles {
    pub paths: Vec<PathBuf>,
    pub text: String,
}

/// 可直接写入剪贴板的 RGBA 像素数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    /// 图像宽度（像素）。
    pub width: usize,
    /// 图像高度（像素）。
    pub height: usize,
    /// RGBA 字节数组（`width * height * 4`）。
    pub bytes: Vec<u8>,
}

/// 系统剪贴板能力（阻塞调用）。
pub trait ClipboardBackend: Send + Sync {
    fn write_file_paths(&self, paths: &[PathBuf]) -> Result<(), AppError>;

    /// 没有文件或文本时返回空集合，而不是错误。
    fn read_file_paths(&self) -> Result<ClipboardFiles, AppError>;

    fn write_image(&self, image: &ClipboardImage) -> Result<(), AppError>;
}

/// 将文件路径列表写入剪贴板；空列表直接成功。
pub async fn write_file_paths(
    backend: Arc<dyn ClipboardBackend>,
    paths: Vec<PathBuf>,
) -> Result<(), AppError> {
    if paths.is_empty() {
        log::debug!("📋 文件路径列表为空，跳过写入剪贴板");
        return Ok(());
    }

    let count = paths.len();
    tokio::task::spawn_blocking(move || backend.write_file_paths(&paths)).await??;
    log::info!("📋 已复制 {} 个文件路径到剪贴板", count);
    Ok(())
}

/// 读取剪贴板中的文件路径列表与纯文本。
pub async fn read_file_paths(backend: Arc<dyn ClipboardBackend>) -> Result<ClipboardFiles, AppError> {
    let files = tokio::task::spawn_blocking(move || backend.read_file_paths()).await??;
    log::info!(
        "📋 从剪贴板读取 - 文件: {} 个 文本: {} 字符",
        files.paths.len(),
        files.text.chars().count()
    );
    Ok(files)
}

/// 写入图片，失败时最多尝试 `attempts` 次。
pub async fn write_image_with_retry(
    backend: Arc<dyn ClipboardBackend>,
    image: ClipboardImage,
    attempts: u32,
    retry_delay_ms: u64,
) -> Result<(), AppError> {
    log::debug!("📋 准备复制图片到剪贴板 - {}x{}", image.width, image.height);
    let attempts = attempts.max(1);

    tokio::task::spawn_blocking(move || {
        let mut last_error = None;

        for attempt in 1..=attempts {
            if attempt > 1 {
                log::debug!("🔄 重试 {}/{}", attempt, attempts);
                std::thread::sleep(Duration::from_millis(retry_delay_ms));
            }

            match backend.write_image(&image) {
                Ok(()) => {
                    log::info!("✅ 图片已复制到剪贴板 (尝试 {})", attempt);
                    return Ok(());
                }
                Err(err) => {
                    log::warn!("❌ 尝试 {} 失败: {}", attempt, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::Clipboard("未知错误".to_string())))
    })
    .await?
}
