mod common;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use common::{MemoryClipboard, RecordingShell, ScriptedDialogs, fixed_environment};
use photo_gallery::config::ServiceConfig;
use photo_gallery::dialog::{DialogResult, PickMode};
use photo_gallery::filesystem::ListDirectoryError;
use photo_gallery::service::NativeServices;

struct Harness {
    _root: tempfile::TempDir,
    root: PathBuf,
    dialogs: Arc<ScriptedDialogs>,
    clipboard: Arc<MemoryClipboard>,
    shell: Arc<RecordingShell>,
    services: NativeServices,
}

fn harness(dialogs: ScriptedDialogs, shell: RecordingShell) -> Harness {
    let root_dir = tempfile::tempdir().unwrap();
    let root = root_dir.path().to_path_buf();
    let env = Arc::new(fixed_environment(&root));
    let dialogs = Arc::new(dialogs);
    let clipboard = Arc::new(MemoryClipboard::default());
    let shell = Arc::new(shell);

    let services = NativeServices::new(
        env,
        dialogs.clone(),
        clipboard.clone(),
        shell.clone(),
        ServiceConfig::default(),
    );

    Harness {
        _root: root_dir,
        root,
        dialogs,
        clipboard,
        shell,
        services,
    }
}

fn default_harness() -> Harness {
    harness(ScriptedDialogs::default(), RecordingShell::default())
}

#[tokio::test]
async fn lists_directory_children_by_name() {
    let h = default_harness();
    let album = h.root.join("album");
    fs::create_dir(&album).unwrap();
    fs::write(album.join("a.png"), b"x").unwrap();
    fs::create_dir(album.join("nested")).unwrap();

    let mut names = h.services.list_directory(album).await.unwrap();
    names.sort();
    assert_eq!(names, vec!["a.png".to_string(), "nested".to_string()]);
}

#[tokio::test]
async fn list_directory_classifies_failures() {
    let h = default_harness();

    let missing = h.services.list_directory(h.root.join("missing")).await;
    assert!(matches!(missing, Err(ListDirectoryError::DirectoryNotFound)));

    let file = h.root.join("file.txt");
    fs::write(&file, b"x").unwrap();
    let not_dir = h.services.list_directory(file).await;
    assert!(matches!(not_dir, Err(ListDirectoryError::NotADirectory)));
}

#[tokio::test]
async fn clipboard_paths_round_trip() {
    let h = default_harness();
    let paths = vec![PathBuf::from("/photos/a.png"), PathBuf::from("/photos/b.png")];

    h.services
        .copy_paths_to_clipboard(paths.clone())
        .await
        .unwrap();
    let read = h.services.read_clipboard_file_paths().await.unwrap();

    assert_eq!(read.paths, paths);
    assert_eq!(*h.clipboard.path_writes.lock().unwrap(), 1);
}

#[tokio::test]
async fn empty_path_list_leaves_clipboard_alone() {
    let h = default_harness();
    h.services.copy_paths_to_clipboard(Vec::new()).await.unwrap();
    assert_eq!(*h.clipboard.path_writes.lock().unwrap(), 0);
}

#[tokio::test]
async fn copy_image_from_base64_reaches_clipboard() {
    let h = default_harness();
    let mut png = Vec::new();
    image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let payload = format!(
        "data:image/png;base64,{}",
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &png)
    );

    h.services.copy_image_from_base64(&payload).await.unwrap();

    let images = h.clipboard.images.lock().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!((images[0].width, images[0].height), (3, 2));
    assert_eq!(images[0].bytes.len(), 3 * 2 * 4);
    assert_eq!(fs::read_dir(h.root.join("tmp")).unwrap().count(), 0);
}

#[tokio::test]
async fn copy_image_from_jpeg_data_url_reaches_clipboard() {
    let h = default_harness();
    let mut jpeg = Vec::new();
    image::RgbImage::from_pixel(5, 4, image::Rgb([120, 60, 30]))
        .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();
    let payload = format!(
        "data:image/jpeg;base64,{}",
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &jpeg)
    );

    h.services.copy_image_from_base64(&payload).await.unwrap();

    let images = h.clipboard.images.lock().unwrap();
    assert_eq!((images[0].width, images[0].height), (5, 4));
    assert_eq!(fs::read_dir(h.root.join("tmp")).unwrap().count(), 0);
}

#[tokio::test]
async fn clipboard_text_comes_back_with_paths() {
    let h = default_harness();
    h.clipboard.files.lock().unwrap().text = "holiday.png".to_string();

    let read = h.services.read_clipboard_file_paths().await.unwrap();
    assert!(read.paths.is_empty());
    assert_eq!(read.text, "holiday.png");
}

#[tokio::test]
async fn pick_paths_reports_cancel_and_selection() {
    let h = default_harness();
    let result = h.services.pick_paths(PickMode::default()).await.unwrap();
    assert_eq!(result, DialogResult::Canceled);

    let selected = vec![PathBuf::from("/a"), PathBuf::from("/b")];
    let h = harness(
        ScriptedDialogs {
            picked: Some(selected.clone()),
            ..Default::default()
        },
        RecordingShell::default(),
    );
    let mode = PickMode {
        directories: true,
        files: false,
        multiple: true,
    };
    assert_eq!(
        h.services.pick_paths(mode).await.unwrap(),
        DialogResult::Selected(selected)
    );
    assert_eq!(
        h.services.pick_directory().await.unwrap(),
        DialogResult::Selected(vec![PathBuf::from("/a")])
    );
}

#[tokio::test]
async fn save_dialog_defaults_to_download_dir() {
    let h = harness(
        ScriptedDialogs {
            save_target: Some(PathBuf::from("/chosen.png")),
            ..Default::default()
        },
        RecordingShell::default(),
    );

    let chosen = h.services.show_save_png_dialog("photo").await.unwrap();
    assert_eq!(chosen, Some(PathBuf::from("/chosen.png")));

    let requests = h.dialogs.save_requests.lock().unwrap();
    assert_eq!(
        requests[0].default_path,
        h.root.join("Downloads").join("photo.png")
    );
}

#[tokio::test]
async fn open_with_default_app_surfaces_status_as_error() {
    let h = harness(
        ScriptedDialogs::default(),
        RecordingShell {
            status: "no handler".to_string(),
            ..Default::default()
        },
    );

    let status = h
        .services
        .open_in_file_browser(PathBuf::from("/photos"))
        .await
        .unwrap();
    assert_eq!(status, "no handler");

    let err = h
        .services
        .open_with_default_app(PathBuf::from("/photos/a.png"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SHELL_ERROR");
}

#[tokio::test]
async fn open_url_rejects_unsupported_schemes() {
    let h = default_harness();
    let err = h.services.open_url("file:///etc/passwd".to_string()).unwrap_err();
    assert_eq!(err.code(), "SHELL_ERROR");
    assert!(h.shell.opened.lock().unwrap().is_empty());
}

#[test]
fn application_log_dir_comes_from_environment() {
    let h = default_harness();
    assert_eq!(h.services.application_log_dir().unwrap(), h.root.join("logs"));
    assert!(h.services.settings_path().is_none());
}

#[test]
fn update_config_validates_before_replacing() {
    let h = default_harness();
    let bad = ServiceConfig {
        clipboard_retries: 0,
        ..ServiceConfig::default()
    };
    assert_eq!(h.services.update_config(bad).unwrap_err().code(), "CONFIG_ERROR");
    assert_eq!(h.services.config_snapshot().unwrap(), ServiceConfig::default());

    let bad_name = ServiceConfig {
        clipboard_image_name: "nested/clip".to_string(),
        ..ServiceConfig::default()
    };
    assert_eq!(h.services.update_config(bad_name).unwrap_err().code(), "CONFIG_ERROR");
    assert_eq!(h.services.config_snapshot().unwrap(), ServiceConfig::default());

    let good = ServiceConfig {
        adaptive_resize: true,
        ..ServiceConfig::default()
    };
    h.services.update_config(good.clone()).unwrap();
    assert_eq!(h.services.config_snapshot().unwrap(), good);
}
