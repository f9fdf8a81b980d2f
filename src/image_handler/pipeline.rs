//! # 解码与变换流水线模块
//!
//! ## 设计思路
//!
//! 将"文件 → 图像 → RGBA"的过程集中管理，并在关键节点增加资源上限控制。
//! 优先读取 header 尺寸做像素检查，再进行完整解码。
//!
//! ## 实现思路
//!
//! 1. 校验文件存在，按内容识别格式并读取 header 尺寸
//! 2. 按像素上限快速拒绝
//! 3. 完整解码
//! 4. 根据配置决定是否降采样
//! 5. 转换 RGBA，并校验字节长度一致性

use std::fs;
use std::io::Cursor;
use std::path::Path;

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, ImageReader, Rgba};

use super::ImageError;
use crate::clipboard::ClipboardImage;
use crate::config::ServiceConfig;

const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// 从磁盘读取图片并转换为可写入剪贴板的 RGBA 数据。
pub fn load_for_clipboard(path: &Path, config: &ServiceConfig) -> Result<ClipboardImage, ImageError> {
    if !path.is_file() {
        return Err(ImageError::FileSystem(format!("文件不存在：{}", path.display())));
    }

    let bytes = fs::read(path)
        .map_err(|e| ImageError::FileSystem(format!("无法读取图片：{}", e)))?;

    // 格式只看内容，不看扩展名（Base64 落地的文件总是 .png）
    let format = image::guess_format(&bytes)
        .map_err(|e| ImageError::InvalidFormat(format!("不支持的图片格式：{}", e)))?;

    let (header_width, header_height) = inspect_dimensions(&bytes, format)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))?;
    drop(bytes);
    let (raw_width, raw_height) = decoded.dimensions();

    let optimized = maybe_downscale(decoded, config)?;
    let (width, height) = optimized.dimensions();
    let bytes = optimized.to_rgba8().into_raw();

    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| ImageError::ResourceLimit("图片尺寸导致内存溢出风险".to_string()))?;
    if bytes.len() != expected_len {
        return Err(ImageError::Decode("解码后像素数据长度异常".to_string()));
    }

    log::info!(
        "✅ 图片解码成功 - 路径: {} 原始尺寸: {}x{} 输出尺寸: {}x{}",
        path.display(),
        raw_width,
        raw_height,
        width,
        height
    );

    Ok(ClipboardImage {
        width: width as usize,
        height: height as usize,
        bytes,
    })
}

/// 仅通过图片头信息读取宽高，用于在完整解码前做像素限制检查。
fn inspect_dimensions(bytes: &[u8], format: ImageFormat) -> Result<(u32, u32), ImageError> {
    ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| ImageError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
}

/// 校验像素数量是否超过配置上限。
fn validate_pixel_limits(config: &ServiceConfig, width: u32, height: u32) -> Result<(), ImageError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| ImageError::ResourceLimit("图片像素数溢出".to_string()))?;

    if pixels == 0 {
        return Err(ImageError::InvalidFormat("图片尺寸为 0".to_string()));
    }
    if pixels > config.max_decoded_pixels {
        return Err(ImageError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }
    Ok(())
}

/// 目标尺寸：等比缩放到单边不超过 `max_dimension`，不放大。
fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    if width <= max_dimension && height <= max_dimension {
        return None;
    }
    let scale = (max_dimension as f64 / width as f64).min(max_dimension as f64 / height as f64);
    let target_width = ((width as f64 * scale).floor() as u32).clamp(1, max_dimension);
    let target_height = ((height as f64 * scale).floor() as u32).clamp(1, max_dimension);
    Some((target_width, target_height))
}

fn maybe_downscale(image: DynamicImage, config: &ServiceConfig) -> Result<DynamicImage, ImageError> {
    if !config.adaptive_resize {
        return Ok(image);
    }

    let (width, height) = image.dimensions();
    let Some((target_width, target_height)) =
        target_dimensions(width, height, config.clipboard_max_dimension)
    else {
        return Ok(image);
    };

    log::info!(
        "🧩 降采样：{}x{} -> {}x{}",
        width,
        height,
        target_width,
        target_height
    );

    match resize_with_fast_image_resize(&image, target_width, target_height) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 降采样失败，回退 image::resize_exact：{}", err);
            Ok(image.resize_exact(target_width, target_height, RESIZE_FILTER))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
) -> Result<DynamicImage, ImageError> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image =
        fr::images::Image::from_vec_u8(src_width, src_height, src.into_raw(), fr::PixelType::U8x4)
            .map_err(|e| ImageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;
    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear));
    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ImageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        target_width,
        target_height,
        dst_image.into_vec(),
    )
    .ok_or_else(|| ImageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

    Ok(DynamicImage::ImageRgba8(rgba))
}
