#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use photo_gallery::clipboard::{ClipboardBackend, ClipboardFiles, ClipboardImage};
use photo_gallery::dialog::{DialogBackend, SaveDialogOptions};
use photo_gallery::environment::FixedEnvironment;
use photo_gallery::error::AppError;
use photo_gallery::shell::ShellBackend;

/// 按预设结果应答的对话框，记录收到的保存参数。
#[derive(Default)]
pub struct ScriptedDialogs {
    pub picked: Option<Vec<PathBuf>>,
    pub save_target: Option<PathBuf>,
    pub save_requests: Mutex<Vec<SaveDialogOptions>>,
    /// 对话框弹出时临时目录里的文件，用于确认"先写文件再弹窗"。
    pub files_seen_at_save: Mutex<Vec<PathBuf>>,
    pub temp_root: Option<PathBuf>,
}

impl DialogBackend for ScriptedDialogs {
    fn pick_folders(&self, _multiple: bool) -> Option<Vec<PathBuf>> {
        self.picked.clone()
    }

    fn pick_files(&self, _multiple: bool) -> Option<Vec<PathBuf>> {
        self.picked.clone()
    }

    fn save_file(&self, options: &SaveDialogOptions) -> Option<PathBuf> {
        self.save_requests.lock().unwrap().push(options.clone());
        if let Some(root) = &self.temp_root {
            let mut seen = self.files_seen_at_save.lock().unwrap();
            for dir in std::fs::read_dir(root).unwrap().flatten() {
                for file in std::fs::read_dir(dir.path()).unwrap().flatten() {
                    seen.push(file.path());
                }
            }
        }
        self.save_target.clone()
    }
}

/// 内存剪贴板。
#[derive(Default)]
pub struct MemoryClipboard {
    pub files: Mutex<ClipboardFiles>,
    pub images: Mutex<Vec<ClipboardImage>>,
    pub path_writes: Mutex<u32>,
}

impl ClipboardBackend for MemoryClipboard {
    fn write_file_paths(&self, paths: &[PathBuf]) -> Result<(), AppError> {
        *self.path_writes.lock().unwrap() += 1;
        self.files.lock().unwrap().paths = paths.to_vec();
        Ok(())
    }

    fn read_file_paths(&self) -> Result<ClipboardFiles, AppError> {
        Ok(self.files.lock().unwrap().clone())
    }

    fn write_image(&self, image: &ClipboardImage) -> Result<(), AppError> {
        self.images.lock().unwrap().push(image.clone());
        Ok(())
    }
}

/// 记录调用、按预设状态应答的 shell。
#[derive(Default)]
pub struct RecordingShell {
    pub status: String,
    pub opened: Mutex<Vec<String>>,
}

impl ShellBackend for RecordingShell {
    fn open_path(&self, path: &Path) -> String {
        self.opened.lock().unwrap().push(path.display().to_string());
        self.status.clone()
    }

    fn open_url(&self, url: &str) -> Result<(), AppError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn fixed_environment(root: &Path) -> FixedEnvironment {
    let env = FixedEnvironment {
        log_dir: root.join("logs"),
        download_dir: root.join("Downloads"),
        temp_dir: root.join("tmp"),
    };
    std::fs::create_dir_all(&env.download_dir).unwrap();
    std::fs::create_dir_all(&env.temp_dir).unwrap();
    env
}

pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
