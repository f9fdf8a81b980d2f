use std::path::Path;

fn format_sensitive_path_for_log(path: &Path) -> String {
    if cfg!(debug_assertions) {
        path.display().to_string()
    } else {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| format!("<basename:{}>", name))
            .unwrap_or_else(|| "<basename:unknown>".to_string())
    }
}

/// 用系统默认方式打开路径，返回空字符串表示成功。
pub fn open_path(path: &Path) -> String {
    if !path.exists() {
        log::warn!("open_path 失败: 路径不存在 {}", format_sensitive_path_for_log(path));
        return format!("路径不存在: {}", path.display());
    }

    match launch(path) {
        Ok(()) => {
            log::debug!("open_path 成功: {}", format_sensitive_path_for_log(path));
            String::new()
        }
        Err(message) => {
            log::warn!(
                "open_path 失败: {} ({})",
                format_sensitive_path_for_log(path),
                message
            );
            message
        }
    }
}

#[cfg(target_os = "windows")]
fn launch(path: &Path) -> Result<(), String> {
    use std::os::windows::ffi::OsStrExt;
    use windows::Win32::UI::Shell::ShellExecuteW;
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
    use windows::core::PCWSTR;

    let op: Vec<u16> = "open".encode_utf16().chain(std::iter::once(0)).collect();
    let path_wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let result = unsafe {
        ShellExecuteW(
            None,
            PCWSTR(op.as_ptr()),
            PCWSTR(path_wide.as_ptr()),
            PCWSTR::null(),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };

    // 返回值 <= 32 表示失败
    if result.0 as isize <= 32 {
        return Err(format!("ShellExecuteW 返回 {}", result.0 as isize));
    }
    Ok(())
}

/// 启动外部程序并在后台线程中回收，避免残留僵尸进程。
#[cfg(unix)]
fn spawn_and_reap(
    program: &str,
    path: &Path,
) -> Result<std::thread::JoinHandle<Option<std::process::ExitStatus>>, String> {
    let mut child = std::process::Command::new(program)
        .arg(path)
        .spawn()
        .map_err(|e| format!("启动 {} 失败: {}", program, e))?;

    let program = program.to_string();
    Ok(std::thread::spawn(move || match child.wait() {
        Ok(status) => {
            if !status.success() {
                log::debug!("{} 退出状态: {}", program, status);
            }
            Some(status)
        }
        Err(err) => {
            log::debug!("等待 {} 退出失败: {}", program, err);
            None
        }
    }))
}

#[cfg(target_os = "macos")]
fn launch(path: &Path) -> Result<(), String> {
    spawn_and_reap("open", path).map(drop)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn launch(path: &Path) -> Result<(), String> {
    spawn_and_reap("xdg-open", path).map(drop)
}
