use std::path::PathBuf;

use tauri::{AppHandle, Wry};
use tauri_plugin_dialog::{DialogExt, FilePath};

use super::{DialogBackend, SaveDialogOptions};

/// `tauri-plugin-dialog` 实现。
///
/// 所有方法都会阻塞当前线程直到用户关闭对话框，不能在主线程调用。
pub struct TauriDialogs {
    app: AppHandle<Wry>,
}

impl TauriDialogs {
    pub fn new(app: AppHandle<Wry>) -> Self {
        Self { app }
    }
}

fn into_paths(selected: Vec<FilePath>) -> Vec<PathBuf> {
    selected
        .into_iter()
        .filter_map(|path| match path.into_path() {
            Ok(path) => Some(path),
            Err(err) => {
                log::warn!("忽略无法转换为本地路径的选择项: {}", err);
                None
            }
        })
        .collect()
}

impl DialogBackend for TauriDialogs {
    fn pick_folders(&self, multiple: bool) -> Option<Vec<PathBuf>> {
        let builder = self.app.dialog().file();
        if multiple {
            builder.blocking_pick_folders().map(into_paths)
        } else {
            builder.blocking_pick_folder().map(|path| into_paths(vec![path]))
        }
    }

    fn pick_files(&self, multiple: bool) -> Option<Vec<PathBuf>> {
        let builder = self.app.dialog().file();
        if multiple {
            builder.blocking_pick_files().map(into_paths)
        } else {
            builder.blocking_pick_file().map(|path| into_paths(vec![path]))
        }
    }

    fn save_file(&self, options: &SaveDialogOptions) -> Option<PathBuf> {
        let mut builder = self.app.dialog().file();
        if let Some(dir) = options.default_path.parent() {
            builder = builder.set_directory(dir);
        }
        if let Some(name) = options.default_path.file_name() {
            builder = builder.set_file_name(name.to_string_lossy());
        }
        for filter in &options.filters {
            let extensions: Vec<&str> = filter.extensions.iter().map(String::as_str).collect();
            builder = builder.add_filter(filter.name.as_str(), &extensions);
        }

        builder
            .blocking_save_file()
            .and_then(|path| into_paths(vec![path]).into_iter().next())
    }
}
