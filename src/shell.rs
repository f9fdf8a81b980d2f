//! 系统 shell 启动器（分层门面）
//!
//! - 本文件：对外入口与 `ShellBackend` 抽象
//! - `platform`：平台相关实现（ShellExecuteW / open / xdg-open）
//!
//! 原生"打开路径"调用以字符串报告结果：空字符串表示成功，非空为失败原因。

#[path = "shell/platform.rs"]
mod platform;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tauri::{AppHandle, Wry};
use tauri_plugin_opener::OpenerExt;

use crate::error::AppError;

const ALLOWED_URL_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

/// 系统 shell 能力。
pub trait ShellBackend: Send + Sync {
    /// 用系统默认方式打开路径（目录在文件管理器中打开）。
    ///
    /// 返回空字符串表示成功，否则为失败原因。
    fn open_path(&self, path: &Path) -> String;

    /// 用默认浏览器打开 URL。
    fn open_url(&self, url: &str) -> Result<(), AppError>;
}

/// 默认实现：路径走平台启动器，URL 走 `tauri-plugin-opener`。
pub struct SystemShell {
    app: AppHandle<Wry>,
}

impl SystemShell {
    pub fn new(app: AppHandle<Wry>) -> Self {
        Self { app }
    }
}

impl ShellBackend for SystemShell {
    fn open_path(&self, path: &Path) -> String {
        platform::open_path(path)
    }

    fn open_url(&self, url: &str) -> Result<(), AppError> {
        self.app
            .opener()
            .open_url(url, None::<&str>)
            .map_err(|e| AppError::Shell(format!("打开 URL 失败: {}", e)))
    }
}

/// 在文件管理器中打开路径，原样返回原生调用的状态信息。
pub async fn open_in_file_browser(
    shell: Arc<dyn ShellBackend>,
    path: PathBuf,
) -> Result<String, AppError> {
    let message = tokio::task::spawn_blocking(move || shell.open_path(&path)).await?;
    if !message.is_empty() {
        log::warn!("在文件管理器中打开路径返回: {}", message);
    }
    Ok(message)
}

/// 用关联的默认应用打开路径；原生调用返回非空信息即视为失败。
pub async fn open_with_default_app(
    shell: Arc<dyn ShellBackend>,
    path: PathBuf,
) -> Result<(), AppError> {
    let message = tokio::task::spawn_blocking(move || shell.open_path(&path)).await?;
    if message.is_empty() {
        Ok(())
    } else {
        log::warn!("用默认应用打开失败: {}", message);
        Err(AppError::Shell(format!("打开路径失败: {}", message)))
    }
}

/// 用默认浏览器打开 URL，不等待结果。
///
/// 只接受 http / https / mailto；启动失败只记录日志。
pub fn open_url(shell: Arc<dyn ShellBackend>, url: String) -> Result<(), AppError> {
    if !ALLOWED_URL_SCHEMES
        .iter()
        .any(|scheme| {
            url.len() > scheme.len()
                && url
                    .get(..scheme.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
        })
    {
        return Err(AppError::Shell(format!("不支持的 URL: {}", url)));
    }

    tokio::task::spawn_blocking(move || {
        if let Err(err) = shell.open_url(&url) {
            log::warn!("打开 URL 失败（已忽略）: {}", err);
        }
    });
    Ok(())
}
