//! # Tauri 命令层
//!
//! 命令层仅做 IPC 参数接收与结果返回，不承载业务逻辑。
//! 所有实际处理交由 `NativeServices`，保持命令函数薄、稳定。

use std::path::PathBuf;

use tauri::State;

use crate::clipboard::ClipboardFiles;
use crate::config::ServiceConfig;
use crate::dialog::{DialogResult, PickMode};
use crate::error::AppError;
use crate::export::ExportOutcome;
use crate::filesystem::ListDirectoryError;
use crate::service::NativeServices;

#[tauri::command]
pub async fn pick_directory(state: State<'_, NativeServices>) -> Result<DialogResult, AppError> {
    state.pick_directory().await
}

#[tauri::command]
pub async fn pick_paths(
    state: State<'_, NativeServices>,
    mode: PickMode,
) -> Result<DialogResult, AppError> {
    state.pick_paths(mode).await
}

/// 列出目录的直接子项，失败时返回带 `code` 的结构化错误。
#[tauri::command]
pub async fn list_directory(
    state: State<'_, NativeServices>,
    path: PathBuf,
) -> Result<Vec<String>, ListDirectoryError> {
    state.list_directory(path).await
}

#[tauri::command]
pub async fn copy_paths_to_clipboard(
    state: State<'_, NativeServices>,
    paths: Vec<PathBuf>,
) -> Result<(), AppError> {
    state.copy_paths_to_clipboard(paths).await
}

#[tauri::command]
pub async fn read_clipboard_file_paths(
    state: State<'_, NativeServices>,
) -> Result<ClipboardFiles, AppError> {
    state.read_clipboard_file_paths().await
}

/// 将本地图片复制到系统剪贴板。
#[tauri::command]
pub async fn copy_image_from_path(
    state: State<'_, NativeServices>,
    path: PathBuf,
) -> Result<(), AppError> {
    state.copy_image_from_path(path).await
}

/// 将 Base64 图片复制到系统剪贴板。
#[tauri::command]
pub async fn copy_image_from_base64(
    state: State<'_, NativeServices>,
    payload: String,
) -> Result<(), AppError> {
    state.copy_image_from_base64(&payload).await
}

/// 将 Base64 图片另存为 PNG，用户取消时返回 `Canceled`。
#[tauri::command]
pub async fn export_base64_as_png(
    state: State<'_, NativeServices>,
    payload: String,
    suggested_name: String,
) -> Result<ExportOutcome, AppError> {
    state.export_base64_as_png(&payload, &suggested_name).await
}

#[tauri::command]
pub async fn open_in_file_browser(
    state: State<'_, NativeServices>,
    path: PathBuf,
) -> Result<String, AppError> {
    state.open_in_file_browser(path).await
}

#[tauri::command]
pub async fn open_with_default_app(
    state: State<'_, NativeServices>,
    path: PathBuf,
) -> Result<(), AppError> {
    state.open_with_default_app(path).await
}

#[tauri::command]
pub async fn open_url(state: State<'_, NativeServices>, url: String) -> Result<(), AppError> {
    state.open_url(url)
}

#[tauri::command]
pub fn get_application_log_directory(
    state: State<'_, NativeServices>,
) -> Result<String, AppError> {
    let dir = state.application_log_dir()?;
    Ok(dir.to_string_lossy().to_string())
}

#[tauri::command]
pub fn get_service_config(state: State<'_, NativeServices>) -> Result<ServiceConfig, AppError> {
    state.config_snapshot()
}

#[tauri::command]
pub fn set_service_config(
    state: State<'_, NativeServices>,
    config: ServiceConfig,
) -> Result<(), AppError> {
    state.update_config(config)
}
