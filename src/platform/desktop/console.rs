/// Hides the console window that Windows attaches to release builds started
/// from Explorer.
#[cfg(windows)]
pub fn hide_console_window() {
    use windows_sys::Win32::System::Console::GetConsoleWindow;
    use windows_sys::Win32::UI::WindowsAndMessaging::{ShowWindow, SW_HIDE};

    if cfg!(debug_assertions) {
        return;
    }
    // SAFETY: both calls take no pointers; a zero handle means no console.
    unsafe {
        let window = GetConsoleWindow();
        if window != 0 {
            ShowWindow(window, SW_HIDE);
        }
    }
}

#[cfg(not(windows))]
pub fn hide_console_window() {}
