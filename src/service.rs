//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! 使用 `NativeServices` 作为 Tauri 注入状态，持有四个原生能力
//! （平台路径、对话框、剪贴板、shell）与运行时配置，替代全局单例：
//! 1. 生命周期清晰（由 `main.rs` 统一管理）
//! 2. 测试可用内存实现构造独立实例
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<ServiceConfig>>` 支持运行时修改，单次请求使用同一快照。
//! - 每个对外操作都是对应模块函数的薄封装，负责注入依赖与配置。

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tauri::{AppHandle, Wry};

use crate::clipboard::{self, ClipboardBackend, ClipboardFiles, SystemClipboard};
use crate::config::{self, ServiceConfig};
use crate::dialog::{self, DialogBackend, DialogResult, PickMode, TauriDialogs};
use crate::environment::{Environment, TauriEnvironment};
use crate::error::AppError;
use crate::export::{self, ExportOutcome};
use crate::filesystem::{self, ListDirectoryError};
use crate::image_handler;
use crate::shell::{self, ShellBackend, SystemShell};

/// 原生集成服务状态。
pub struct NativeServices {
    env: Arc<dyn Environment>,
    dialogs: Arc<dyn DialogBackend>,
    clipboard: Arc<dyn ClipboardBackend>,
    shell: Arc<dyn ShellBackend>,
    config: Arc<RwLock<ServiceConfig>>,
    settings_path: Option<PathBuf>,
}

impl NativeServices {
    /// 使用显式注入的能力创建服务，配置不落盘。
    pub fn new(
        env: Arc<dyn Environment>,
        dialogs: Arc<dyn DialogBackend>,
        clipboard: Arc<dyn ClipboardBackend>,
        shell: Arc<dyn ShellBackend>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            env,
            dialogs,
            clipboard,
            shell,
            config: Arc::new(RwLock::new(config)),
            settings_path: None,
        }
    }

    /// 使用 Tauri 实现创建服务，并从设置文件加载配置。
    pub fn for_app(app: &AppHandle<Wry>) -> Result<Self, AppError> {
        let settings_path = config::settings_file_path(app)?;
        let loaded = config::load_config(&settings_path)?;

        let mut services = Self::new(
            Arc::new(TauriEnvironment::new(app.clone())),
            Arc::new(TauriDialogs::new(app.clone())),
            Arc::new(SystemClipboard),
            Arc::new(SystemShell::new(app.clone())),
            loaded,
        );
        services.settings_path = Some(settings_path);
        Ok(services)
    }

    /// 获取配置快照。
    pub fn config_snapshot(&self) -> Result<ServiceConfig, AppError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| AppError::Config("配置读取锁已中毒".to_string()))
    }

    /// 校验并替换配置；设置文件可用时同时落盘。
    pub fn update_config(&self, next: ServiceConfig) -> Result<(), AppError> {
        next.validate()?;
        if let Some(path) = &self.settings_path {
            config::save_config(path, &next)?;
        }

        let mut current = self
            .config
            .write()
            .map_err(|_| AppError::Config("配置写入锁已中毒".to_string()))?;
        *current = next;
        log::info!("⚙️ 已更新服务配置: {:?}", *current);
        Ok(())
    }

    pub async fn pick_directory(&self) -> Result<DialogResult, AppError> {
        dialog::pick_directory(Arc::clone(&self.dialogs)).await
    }

    pub async fn pick_paths(&self, mode: PickMode) -> Result<DialogResult, AppError> {
        dialog::pick_paths(Arc::clone(&self.dialogs), mode).await
    }

    pub async fn show_save_png_dialog(
        &self,
        file_name_without_ext: &str,
    ) -> Result<Option<PathBuf>, AppError> {
        dialog::show_save_png_dialog(
            Arc::clone(&self.dialogs),
            self.env.as_ref(),
            file_name_without_ext,
        )
        .await
    }

    pub async fn list_directory(&self, path: PathBuf) -> Result<Vec<String>, ListDirectoryError> {
        tokio::task::spawn_blocking(move || filesystem::list_directory(&path))
            .await
            .map_err(|e| ListDirectoryError::Unknown(e.to_string()))?
    }

    pub async fn copy_paths_to_clipboard(&self, paths: Vec<PathBuf>) -> Result<(), AppError> {
        clipboard::write_file_paths(Arc::clone(&self.clipboard), paths).await
    }

    pub async fn read_clipboard_file_paths(&self) -> Result<ClipboardFiles, AppError> {
        clipboard::read_file_paths(Arc::clone(&self.clipboard)).await
    }

    pub async fn copy_image_from_path(&self, path: PathBuf) -> Result<(), AppError> {
        let config = self.config_snapshot()?;
        image_handler::copy_image_from_path(Arc::clone(&self.clipboard), path, &config).await
    }

    pub async fn copy_image_from_base64(&self, payload: &str) -> Result<(), AppError> {
        let config = self.config_snapshot()?;
        image_handler::copy_image_from_base64(
            Arc::clone(&self.clipboard),
            &self.env.temp_dir(),
            payload,
            &config,
        )
        .await
    }

    pub async fn export_base64_as_png(
        &self,
        payload: &str,
        file_name_without_ext: &str,
    ) -> Result<ExportOutcome, AppError> {
        let config = self.config_snapshot()?;
        export::export_base64_as_png(
            Arc::clone(&self.dialogs),
            Arc::clone(&self.env),
            &config,
            payload,
            file_name_without_ext,
        )
        .await
    }

    pub async fn open_in_file_browser(&self, path: PathBuf) -> Result<String, AppError> {
        shell::open_in_file_browser(Arc::clone(&self.shell), path).await
    }

    pub async fn open_with_default_app(&self, path: PathBuf) -> Result<(), AppError> {
        shell::open_with_default_app(Arc::clone(&self.shell), path).await
    }

    pub fn open_url(&self, url: String) -> Result<(), AppError> {
        shell::open_url(Arc::clone(&self.shell), url)
    }

    /// 应用日志目录。
    pub fn application_log_dir(&self) -> Result<PathBuf, AppError> {
        self.env.log_dir()
    }

    /// 当前使用的设置文件（仅 `for_app` 创建的实例有）。
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }
}
