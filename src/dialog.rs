//! # 原生对话框网关（分层门面）
//!
//! - 本文件：结果模型、选择模式与对外入口
//! - `native`：基于 `tauri-plugin-dialog` 的实现
//!
//! 用户取消是正常结果，统一归一为 `DialogResult::Canceled`，不走错误通道。
//! 对话框调用是阻塞的，入口函数统一放到 `spawn_blocking` 中执行。

#[path = "dialog/native.rs"]
mod native;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::AppError;

pub use native::TauriDialogs;

/// 一次对话框调用的结果：要么取消，要么至少包含一个路径。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "paths", rename_all = "camelCase")]
pub enum DialogResult {
    Canceled,
    Selected(Vec<PathBuf>),
}

impl DialogResult {
    /// 空选择视为取消，保证 `Selected` 永远非空。
    pub fn from_selection(selection: Option<Vec<PathBuf>>) -> Self {
        match selection {
            Some(paths) if !paths.is_empty() => DialogResult::Selected(paths),
            _ => DialogResult::Canceled,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, DialogResult::Canceled)
    }
}

/// 打开对话框的选择模式。
///
/// 同时允许目录与文件时显示目录选择器（Windows/Linux 原生对话框无法混选）；
/// 两者都未设置时显示文件选择器。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickMode {
    pub directories: bool,
    pub files: bool,
    pub multiple: bool,
}

impl PickMode {
    fn picks_directories(&self) -> bool {
        self.directories
    }
}

/// 文件类型过滤器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

/// 保存对话框参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDialogOptions {
    pub default_path: PathBuf,
    pub filters: Vec<DialogFilter>,
}

/// 原生对话框能力（阻塞调用）。
///
/// 返回 `None` 表示用户取消。
pub trait DialogBackend: Send + Sync {
    fn pick_folders(&self, multiple: bool) -> Option<Vec<PathBuf>>;

    fn pick_files(&self, multiple: bool) -> Option<Vec<PathBuf>>;

    fn save_file(&self, options: &SaveDialogOptions) -> Option<PathBuf>;
}

/// 构造 PNG 保存对话框参数：默认位于下载目录，附带 PNG 与全部文件两个过滤器。
pub fn png_save_options(download_dir: &Path, file_name_without_ext: &str) -> SaveDialogOptions {
    SaveDialogOptions {
        default_path: download_dir.join(format!("{}.png", file_name_without_ext)),
        filters: vec![
            DialogFilter {
                name: "PNG Image".to_string(),
                extensions: vec!["png".to_string()],
            },
            DialogFilter {
                name: "All Files".to_string(),
                extensions: vec!["*".to_string()],
            },
        ],
    }
}

async fn run_blocking<T, F>(backend: Arc<dyn DialogBackend>, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&dyn DialogBackend) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(backend.as_ref()))
        .await
        .map_err(|e| AppError::Dialog(format!("对话框线程执行失败: {}", e)))
}

/// 选择单个目录，只取第一个结果。
pub async fn pick_directory(backend: Arc<dyn DialogBackend>) -> Result<DialogResult, AppError> {
    let selection = run_blocking(backend, |dialogs| dialogs.pick_folders(false)).await?;
    let result = DialogResult::from_selection(
        selection.and_then(|paths| paths.into_iter().next().map(|first| vec![first])),
    );
    log::info!("📂 目录选择完成 - 已取消: {}", result.is_canceled());
    Ok(result)
}

/// 按模式选择目录或文件。
pub async fn pick_paths(
    backend: Arc<dyn DialogBackend>,
    mode: PickMode,
) -> Result<DialogResult, AppError> {
    let selection = run_blocking(backend, move |dialogs| {
        if mode.picks_directories() {
            dialogs.pick_folders(mode.multiple)
        } else {
            dialogs.pick_files(mode.multiple)
        }
    })
    .await?;

    let result = DialogResult::from_selection(selection);
    if let DialogResult::Selected(paths) = &result {
        log::info!("📂 路径选择完成 - 模式: {:?} 数量: {}", mode, paths.len());
    } else {
        log::info!("📂 路径选择已取消 - 模式: {:?}", mode);
    }
    Ok(result)
}

/// 显示 PNG 保存对话框，返回 `None` 表示取消。
pub async fn show_save_png_dialog(
    backend: Arc<dyn DialogBackend>,
    env: &dyn Environment,
    file_name_without_ext: &str,
) -> Result<Option<PathBuf>, AppError> {
    let options = png_save_options(&env.download_dir()?, file_name_without_ext);
    log::debug!("💾 显示保存对话框 - 默认路径: {}", options.default_path.display());
    run_blocking(backend, move |dialogs| dialogs.save_file(&options)).await
}
