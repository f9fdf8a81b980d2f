//! # 服务配置模块
//!
//! ## 设计思路
//!
//! 将原生集成层所有"可调策略"集中到 `ServiceConfig`：临时目录前缀、
//! 剪贴板重试、图片像素上限与降采样。所有字段均有默认值，
//! 设置文件缺失或缺少字段时自动回落。
//!
//! ## 实现思路
//!
//! - 设置以 JSON 形式保存在应用数据目录下的 `settings.json`。
//! - 文件不存在返回默认配置；内容无法解析返回 `AppError::Config`。
//! - 运行时由 `NativeServices` 持有 `RwLock`，单次请求使用快照。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager};

use crate::error::AppError;
use crate::temp_file;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// 原生集成层配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceConfig {
    /// 临时目录名前缀，后接随机后缀。
    pub temp_dir_prefix: String,
    /// Base64 图片写入剪贴板时使用的临时文件名（不含扩展名）。
    pub clipboard_image_name: String,
    /// 写入剪贴板失败时最大尝试次数。
    pub clipboard_retries: u32,
    /// 两次尝试之间的间隔（毫秒）。
    pub clipboard_retry_delay_ms: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 是否在写入剪贴板前降采样。
    pub adaptive_resize: bool,
    /// 降采样后宽/高单边最大值。
    pub clipboard_max_dimension: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            temp_dir_prefix: "photo-gallery-".to_string(),
            clipboard_image_name: "clipboard_image".to_string(),
            clipboard_retries: 3,
            clipboard_retry_delay_ms: 100,
            max_decoded_pixels: 40_000_000,
            adaptive_resize: false,
            clipboard_max_dimension: 4096,
        }
    }
}

impl ServiceConfig {
    /// 校验配置取值，拒绝会让流程无法执行的组合。
    pub fn validate(&self) -> Result<(), AppError> {
        if self.temp_dir_prefix.is_empty()
            || self.temp_dir_prefix.contains(['/', '\\'])
        {
            return Err(AppError::Config(format!(
                "临时目录前缀非法: '{}'",
                self.temp_dir_prefix
            )));
        }
        temp_file::validate_base_name(&self.clipboard_image_name).map_err(|_| {
            AppError::Config(format!(
                "剪贴板图片文件名非法: '{}'",
                self.clipboard_image_name
            ))
        })?;
        if self.clipboard_retries == 0 {
            return Err(AppError::Config("剪贴板尝试次数至少为 1".to_string()));
        }
        if self.clipboard_max_dimension == 0 || self.max_decoded_pixels == 0 {
            return Err(AppError::Config("图片尺寸上限必须大于 0".to_string()));
        }
        Ok(())
    }
}

/// 应用数据目录下的设置文件路径（目录不存在时自动创建）。
pub fn settings_file_path(app: &AppHandle) -> Result<PathBuf, AppError> {
    let app_data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| AppError::Environment(format!("获取应用数据目录失败: {}", e)))?;

    fs::create_dir_all(&app_data_dir)
        .map_err(|e| AppError::Config(format!("创建应用数据目录失败: {}", e)))?;

    Ok(app_data_dir.join(SETTINGS_FILE_NAME))
}

/// 从设置文件加载配置；文件不存在时返回默认值。
pub fn load_config(path: &Path) -> Result<ServiceConfig, AppError> {
    if !path.exists() {
        log::info!("⚙️ 设置文件不存在，使用默认配置: {}", path.display());
        return Ok(ServiceConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config = serde_json::from_str::<ServiceConfig>(&content)
        .map_err(|e| AppError::Config(format!("解析设置文件失败: {}", e)))?;
    config.validate()?;

    log::info!("⚙️ 已加载设置文件: {}", path.display());
    Ok(config)
}

/// 将配置写回设置文件。
pub fn save_config(path: &Path, config: &ServiceConfig) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| AppError::Config(format!("序列化设置失败: {}", e)))?;
    fs::write(path, content)?;
    Ok(())
}
