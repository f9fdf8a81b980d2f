//! 平台路径能力
//!
//! 日志目录、下载目录与临时目录都通过 `Environment` 注入，
//! 业务代码不直接依赖 Tauri 的全局应用句柄，测试可替换为固定路径。

use std::path::PathBuf;

use tauri::{AppHandle, Manager, Wry};

use crate::error::AppError;

/// 平台路径提供者。
pub trait Environment: Send + Sync {
    /// 应用日志目录。
    fn log_dir(&self) -> Result<PathBuf, AppError>;

    /// 用户下载目录，用作保存对话框的默认位置。
    fn download_dir(&self) -> Result<PathBuf, AppError>;

    /// 创建临时目录时使用的根目录。
    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

/// 基于 Tauri 路径解析器的实现。
pub struct TauriEnvironment {
    app: AppHandle<Wry>,
}

impl TauriEnvironment {
    pub fn new(app: AppHandle<Wry>) -> Self {
        Self { app }
    }
}

impl Environment for TauriEnvironment {
    fn log_dir(&self) -> Result<PathBuf, AppError> {
        self.app
            .path()
            .app_log_dir()
            .map_err(|e| AppError::Environment(format!("获取应用日志目录失败: {}", e)))
    }

    fn download_dir(&self) -> Result<PathBuf, AppError> {
        let resolver = self.app.path();
        match resolver.download_dir() {
            Ok(dir) => Ok(dir),
            Err(err) => {
                log::debug!("下载目录不可用，回退到 <home>/Downloads: {}", err);
                resolver
                    .home_dir()
                    .map(|home| home.join("Downloads"))
                    .map_err(|e| AppError::Environment(format!("获取用户主目录失败: {}", e)))
            }
        }
    }
}

/// 使用固定路径的实现，适用于无界面运行与测试。
#[derive(Debug, Clone)]
pub struct FixedEnvironment {
    pub log_dir: PathBuf,
    pub download_dir: PathBuf,
    pub temp_dir: PathBuf,
}

impl Environment for FixedEnvironment {
    fn log_dir(&self) -> Result<PathBuf, AppError> {
        Ok(self.log_dir.clone())
    }

    fn download_dir(&self) -> Result<PathBuf, AppError> {
        Ok(self.download_dir.clone())
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone()
    }
}
