//! # 图片剪贴板服务（image_handler）
//!
//! ## 设计思路
//!
//! 将"来源落地 → 解码校验 → 写入剪贴板"拆开：
//!
//! - `pipeline`：负责从磁盘解码、像素限制、降采样
//! - `error`：图片链路错误模型
//! - 本文件：两条对外流程（本地文件 / Base64）
//!
//! ## 调用链
//!
//! ```text
//! copy_image_from_path                 copy_image_from_base64
//!    │                                    │
//!    │                                 temp_file::with_decoded_png_file
//!    │                                    │ (临时 PNG，结束即删除)
//!    ├──────────── pipeline::load_for_clipboard ◄┘
//!    ↓
//! clipboard::write_image_with_retry
//! ```

mod error;
mod pipeline;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::clipboard::{self, ClipboardBackend};
use crate::config::ServiceConfig;
use crate::error::AppError;
use crate::temp_file;

pub use error::ImageError;
pub use pipeline::load_for_clipboard;

/// 解码本地图片并写入剪贴板。
pub async fn copy_image_from_path(
    clipboard: Arc<dyn ClipboardBackend>,
    path: PathBuf,
    config: &ServiceConfig,
) -> Result<(), AppError> {
    log::info!("📁 复制本地图片 - 路径: {}", path.display());
    decode_and_copy(clipboard, path, config).await
}

/// 将 Base64 图片落地为临时 PNG，再按本地图片流程写入剪贴板。
///
/// 临时目录在流程结束时删除，无论成功与否。
pub async fn copy_image_from_base64(
    clipboard: Arc<dyn ClipboardBackend>,
    temp_root: &Path,
    payload: &str,
    config: &ServiceConfig,
) -> Result<(), AppError> {
    log::info!("📝 复制 Base64 图片 - 长度: {}", payload.len());
    temp_file::with_decoded_png_file(
        temp_root,
        &config.temp_dir_prefix,
        payload,
        &config.clipboard_image_name,
        |temp_png| decode_and_copy(clipboard, temp_png, config),
    )
    .await
}

async fn decode_and_copy(
    clipboard: Arc<dyn ClipboardBackend>,
    path: PathBuf,
    config: &ServiceConfig,
) -> Result<(), AppError> {
    let decode_config = config.clone();
    let image =
        tokio::task::spawn_blocking(move || pipeline::load_for_clipboard(&path, &decode_config))
            .await??;

    clipboard::write_image_with_retry(
        clipboard,
        image,
        config.clipboard_retries,
        config.clipboard_retry_delay_ms,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardFiles, ClipboardImage};
    use base64::Engine as _;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClipboard {
        images: Mutex<Vec<ClipboardImage>>,
    }

    impl ClipboardBackend for RecordingClipboard {
        fn write_file_paths(&self, _paths: &[PathBuf]) -> Result<(), AppError> {
            Ok(())
        }

        fn read_file_paths(&self) -> Result<ClipboardFiles, AppError> {
            Ok(ClipboardFiles::default())
        }

        fn write_image(&self, image: &ClipboardImage) -> Result<(), AppError> {
            self.images.lock().unwrap().push(image.clone());
            Ok(())
        }
    }

    fn png_data_url(width: u32, height: u32) -> String {
        let mut bytes = Vec::new();
        image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }

    #[tokio::test]
    async fn base64_image_reaches_clipboard_and_temp_dir_is_removed() {
        let root = tempfile::tempdir().expect("tempdir");
        let clipboard = Arc::new(RecordingClipboard::default());

        copy_image_from_base64(
            clipboard.clone(),
            root.path(),
            &png_data_url(4, 3),
            &ServiceConfig::default(),
        )
        .await
        .expect("copy");

        let images = clipboard.images.lock().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!((images[0].width, images[0].height), (4, 3));
        assert_eq!(std::fs::read_dir(root.path()).expect("read_dir").count(), 0);
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbImage::from_pixel(width, height, image::Rgb([9, 8, 7]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .expect("encode jpeg");
        bytes
    }

    #[tokio::test]
    async fn jpeg_data_url_reaches_clipboard() {
        let root = tempfile::tempdir().expect("tempdir");
        let clipboard = Arc::new(RecordingClipboard::default());
        let payload = format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(jpeg_bytes(6, 4))
        );

        copy_image_from_base64(clipboard.clone(), root.path(), &payload, &ServiceConfig::default())
            .await
            .expect("copy jpeg");

        let images = clipboard.images.lock().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!((images[0].width, images[0].height), (6, 4));
        assert_eq!(std::fs::read_dir(root.path()).expect("read_dir").count(), 0);
    }

    #[tokio::test]
    async fn extensionless_file_reaches_clipboard() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("IMG_0001");
        std::fs::write(&path, jpeg_bytes(3, 3)).expect("write");
        let clipboard = Arc::new(RecordingClipboard::default());

        copy_image_from_path(clipboard.clone(), path, &ServiceConfig::default())
            .await
            .expect("copy");

        let images = clipboard.images.lock().unwrap();
        assert_eq!((images[0].width, images[0].height), (3, 3));
    }

    #[tokio::test]
    async fn undecodable_base64_image_fails_without_leaking() {
        let root = tempfile::tempdir().expect("tempdir");
        let clipboard = Arc::new(RecordingClipboard::default());

        // 合法 Base64，但内容不是图片
        let err = copy_image_from_base64(
            clipboard.clone(),
            root.path(),
            "data:image/png;base64,AAAA",
            &ServiceConfig::default(),
        )
        .await
        .expect_err("should fail");

        assert_eq!(err.code(), "TEMP_FILE_ERROR");
        assert!(clipboard.images.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(root.path()).expect("read_dir").count(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_reported_as_image_error() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let err = copy_image_from_path(
            clipboard,
            PathBuf::from("/definitely/not/here.png"),
            &ServiceConfig::default(),
        )
        .await
        .expect_err("should fail");
        assert_eq!(err.code(), "IMAGE_ERROR");
    }
}
