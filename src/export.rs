//! PNG 导出流程
//!
//! ```text
//! Start ─► TempFileWritten ─► DialogShown ─┬─► Canceled       （清理，返回 Canceled）
//!                                          ├─► SaveConfirmed  （复制到目标，清理）
//!                                          └─► Failed         （清理，返回错误）
//! ```
//!
//! 临时文件先于对话框写好，用户选择目标后**复制**过去（不移动），
//! 临时目录由 `temp_file::with_decoded_png_file` 在任何分支上删除。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::config::ServiceConfig;
use crate::dialog::{self, DialogBackend};
use crate::environment::Environment;
use crate::error::AppError;
use crate::temp_file;

/// 导出结果。取消不是错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "camelCase")]
pub enum ExportOutcome {
    Saved(PathBuf),
    Canceled,
}

/// 把 Base64 图片另存为用户选择的 PNG 文件。
pub async fn export_base64_as_png(
    dialogs: Arc<dyn DialogBackend>,
    env: Arc<dyn Environment>,
    config: &ServiceConfig,
    payload: &str,
    file_name_without_ext: &str,
) -> Result<ExportOutcome, AppError> {
    let temp_root = env.temp_dir();

    let outcome = temp_file::with_decoded_png_file(
        &temp_root,
        &config.temp_dir_prefix,
        payload,
        file_name_without_ext,
        |temp_png| async move {
            let destination =
                dialog::show_save_png_dialog(dialogs, env.as_ref(), file_name_without_ext).await?;

            let Some(destination) = destination else {
                log::info!("💾 用户取消了保存对话框");
                return Ok(ExportOutcome::Canceled);
            };

            copy_to_destination(&temp_png, &destination)?;
            Ok::<_, AppError>(ExportOutcome::Saved(destination))
        },
    )
    .await?;

    if let ExportOutcome::Saved(path) = &outcome {
        log::info!("💾 PNG 已导出 - 路径: {}", path.display());
    }
    Ok(outcome)
}

fn copy_to_destination(source: &Path, destination: &Path) -> Result<(), AppError> {
    let bytes = fs::copy(source, destination)?;
    log::debug!(
        "💾 已复制临时文件 - {} -> {} ({} bytes)",
        source.display(),
        destination.display(),
        bytes
    );
    Ok(())
}
