//! 系统剪贴板实现
//!
//! 图片、纯文本与文件路径列表统一走 `arboard`：
//! Windows 为 `CF_HDROP`，macOS 为 NSURL，Linux 为 `text/uri-list`。

use std::borrow::Cow;
use std::path::PathBuf;

use super::{ClipboardBackend, ClipboardFiles, ClipboardImage};
use crate::error::AppError;

/// 默认的系统剪贴板。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

fn open_clipboard() -> Result<arboard::Clipboard, AppError> {
    arboard::Clipboard::new().map_err(|e| AppError::Clipboard(format!("无法访问剪贴板: {}", e)))
}

/// 剪贴板里没有对应内容时视为空值。
fn or_empty<T: Default>(result: Result<T, arboard::Error>, what: &str) -> Result<T, AppError> {
    match result {
        Ok(value) => Ok(value),
        Err(arboard::Error::ContentNotAvailable) => Ok(T::default()),
        Err(err) => Err(AppError::Clipboard(format!("读取{}失败: {}", what, err))),
    }
}

impl ClipboardBackend for SystemClipboard {
    fn write_file_paths(&self, paths: &[PathBuf]) -> Result<(), AppError> {
        let mut clipboard = open_clipboard()?;
        clipboard.set().file_list(paths).map_err(|e| {
            log::warn!("写入文件列表失败 (count={}): {}", paths.len(), e);
            AppError::Clipboard(format!("写入文件列表失败: {}", e))
        })
    }

    fn read_file_paths(&self) -> Result<ClipboardFiles, AppError> {
        let mut clipboard = open_clipboard()?;
        let paths = or_empty(clipboard.get().file_list(), "文件列表")?;
        let text = or_empty(clipboard.get_text(), "文本")?;
        Ok(ClipboardFiles { paths, text })
    }

    fn write_image(&self, image: &ClipboardImage) -> Result<(), AppError> {
        let mut clipboard = open_clipboard()?;
        let image_data = arboard::ImageData {
            width: image.width,
            height: image.height,
            bytes: Cow::Borrowed(&image.bytes),
        };
        clipboard
            .set_image(image_data)
            .map_err(|e| AppError::Clipboard(format!("写入图片失败: {}", e)))
    }
}
