//! # 临时 PNG 文件管理
//!
//! ## 设计思路
//!
//! 部分原生接口（剪贴板读图、文件另存为）只接受文件路径，而前端给出的是
//! Base64 图片。这里把 Base64 落地为一个"短生命周期、独占"的 PNG 文件：
//! 每次调用创建一个全新的临时目录，目录在调用结束时无条件删除。
//!
//! ## 实现思路
//!
//! - `EphemeralPngFile` 是 RAII 守卫：构造时创建目录并写入文件，`Drop` 时删除目录，
//!   正常返回、`?` 提前返回、future 被丢弃都会走到清理。
//! - 先解码 Base64 再创建目录，解码失败时不会留下任何东西。
//! - 解码、写入与删除目录都在 `spawn_blocking` 中完成，不占用异步工作线程。
//! - 清理失败只记录 `warn` 日志，不覆盖业务结果。
//! - `with_decoded_png_file` 在回调失败时先清理，再把错误包装为 `AppError::TempFile` 返回。

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::TempDir;

use crate::error::AppError;

static DATA_URL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/[^;]+;base64,").expect("数据 URL 前缀正则无效"));

/// 标准字母表，填充可有可无。
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// 去掉 `data:image/<type>;base64,` 前缀；没有前缀时原样返回。
pub fn strip_data_url_prefix(payload: &str) -> &str {
    match DATA_URL_PREFIX.find(payload) {
        Some(prefix) => &payload[prefix.end()..],
        None => payload,
    }
}

/// 解码 Base64 负载（可带数据 URL 前缀，忽略空白字符）。
pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>, AppError> {
    let data: String = strip_data_url_prefix(payload.trim_start())
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    LENIENT_BASE64
        .decode(data.as_bytes())
        .map_err(|e| AppError::Payload(format!("Base64 解码失败: {}", e)))
}

/// 文件名（不含扩展名）必须是单个非空路径分量。
pub fn validate_base_name(base_name: &str) -> Result<(), AppError> {
    let trimmed = base_name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || base_name.contains(['/', '\\', '\0'])
    {
        return Err(AppError::Payload(format!("非法的文件名: '{}'", base_name)));
    }
    Ok(())
}

/// 独占的临时 PNG 文件，离开作用域时删除其所在的临时目录。
#[derive(Debug)]
pub struct EphemeralPngFile {
    dir: Option<TempDir>,
    dir_path: PathBuf,
    file_path: PathBuf,
}

impl EphemeralPngFile {
    /// 在 `temp_root` 下创建 `<prefix><随机后缀>/<base_name>.png`。
    pub fn create(
        temp_root: &Path,
        prefix: &str,
        payload: &str,
        base_name: &str,
    ) -> Result<Self, AppError> {
        validate_base_name(base_name)?;
        let bytes = decode_base64_payload(payload)?;

        let dir = tempfile::Builder::new().prefix(prefix).tempdir_in(temp_root)?;
        let dir_path = dir.path().to_path_buf();
        let file_path = dir_path.join(format!("{}.png", base_name));
        let file = Self {
            dir: Some(dir),
            dir_path,
            file_path,
        };

        // 写入失败时 `file` 被丢弃，目录随之删除
        fs::write(&file.file_path, &bytes)?;

        log::debug!(
            "📝 已写入临时 PNG - 路径: {} 大小: {} bytes",
            file.file_path.display(),
            bytes.len()
        );
        Ok(file)
    }

    /// 临时 PNG 文件路径。
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// 临时目录路径。
    pub fn dir_path(&self) -> &Path {
        &self.dir_path
    }
}

impl Drop for EphemeralPngFile {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        match dir.close() {
            Ok(()) => log::debug!("🧹 已清理临时目录: {}", self.dir_path.display()),
            Err(err) => log::warn!(
                "清理临时目录失败（已忽略）: {}: {}",
                self.dir_path.display(),
                err
            ),
        }
    }
}

/// 将 Base64 落地为临时 PNG，交给回调使用，结束后无条件清理。
///
/// - 目录创建前失败（文件名非法、解码失败、无法创建目录）直接返回原始错误。
/// - 回调失败时先清理，再返回 `AppError::TempFile`（原始错误在 `source` 中）。
pub async fn with_decoded_png_file<T, F, Fut>(
    temp_root: &Path,
    prefix: &str,
    payload: &str,
    base_name: &str,
    callback: F,
) -> Result<T, AppError>
where
    F: FnOnce(PathBuf) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let temp_root = temp_root.to_path_buf();
    let prefix = prefix.to_string();
    let payload = payload.to_string();
    let base_name = base_name.to_string();
    let file = tokio::task::spawn_blocking(move || {
        EphemeralPngFile::create(&temp_root, &prefix, &payload, &base_name)
    })
    .await??;

    let result = callback(file.path().to_path_buf()).await;

    // 删除目录同样是阻塞 I/O
    if let Err(err) = tokio::task::spawn_blocking(move || drop(file)).await {
        log::warn!("清理临时目录的任务异常退出: {}", err);
    }

    result.map_err(|err| {
        log::error!("处理 PNG 临时文件失败: {}", err);
        AppError::in_temp_file(err)
    })
}
