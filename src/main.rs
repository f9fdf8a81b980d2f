// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 相册应用 — 应用入口
//!
//! 本文件仅负责日志、插件、托管状态与命令注册。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use photo_gallery::commands;
use photo_gallery::service::NativeServices;
use tauri::Manager;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        // 插件初始化
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            log::info!("setup: begin");

            let services = NativeServices::for_app(app.handle())?;
            if let Some(path) = services.settings_path() {
                log::info!("setup: settings file {}", path.display());
            }
            match services.application_log_dir() {
                Ok(dir) => log::info!("setup: log directory {}", dir.display()),
                Err(err) => log::warn!("setup: 日志目录不可用: {err}"),
            }
            app.manage(services);

            log::info!("setup: complete");
            Ok(())
        })
        // 注册所有 Tauri 命令
        .invoke_handler(tauri::generate_handler![
            // 对话框
            commands::pick_directory,
            commands::pick_paths,
            // 文件系统
            commands::list_directory,
            // 剪贴板
            commands::copy_paths_to_clipboard,
            commands::read_clipboard_file_paths,
            commands::copy_image_from_path,
            commands::copy_image_from_base64,
            // 导出
            commands::export_base64_as_png,
            // shell
            commands::open_in_file_browser,
            commands::open_with_default_app,
            commands::open_url,
            // 环境与配置
            commands::get_application_log_directory,
            commands::get_service_config,
            commands::set_service_config,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}
