//! # 相册应用 — 原生集成层库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  前端 (React + TypeScript)                │
//! │        PhotoGallery ── invoke(命令名, 参数)               │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Tauri IPC (Result<T, AppError>)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  commands ──► service::NativeServices (State 注入)       │
//! │                  │                                       │
//! │                  ├─ dialog        目录/文件/保存对话框    │
//! │                  ├─ filesystem    目录列举 + 结果分类     │
//! │                  ├─ clipboard     文件路径列表 / 图片     │
//! │                  ├─ image_handler 解码 → 剪贴板           │
//! │                  ├─ export        Base64 → PNG 另存为     │
//! │                  ├─ temp_file     临时 PNG（RAII 清理）   │
//! │                  ├─ shell         打开路径 / URL          │
//! │                  └─ environment   日志/下载/临时目录      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有 Tauri command 的返回类型 |
//! | [`config`] | `ServiceConfig` 与 `settings.json` 读写 |
//! | [`environment`] | 平台路径注入（替代全局应用句柄） |
//! | [`temp_file`] | Base64 落地为临时 PNG，任何退出路径都删除临时目录 |
//! | [`dialog`] | 原生对话框，取消归一为 `DialogResult::Canceled` |
//! | [`filesystem`] | 目录直接子项列举，`DIRECTORY_NOT_FOUND` / `NOT_A_DIRECTORY` 分类 |
//! | [`clipboard`] | 文件路径列表与图片的剪贴板读写 |
//! | [`image_handler`] | 从文件 / Base64 解码图片并写入剪贴板 |
//! | [`export`] | PNG 导出流程（临时文件 → 保存对话框 → 复制） |
//! | [`shell`] | 在文件管理器 / 默认应用 / 浏览器中打开 |
//! | [`service`] | 可注入的服务状态 `NativeServices` |
//! | [`commands`] | Tauri 命令薄封装 |

pub mod error;
pub mod config;
pub mod environment;
pub mod temp_file;
pub mod dialog;
pub mod filesystem;
pub mod clipboard;
pub mod image_handler;
pub mod export;
pub mod shell;
pub mod service;
pub mod commands;
