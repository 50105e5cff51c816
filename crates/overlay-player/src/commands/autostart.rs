//! Start-on-logon management, backed by [`overlay_windows::autostart`].

pub fn enable() {
    report(overlay_windows::autostart::enable(), "Autostart enabled.");
}

pub fn disable() {
    report(overlay_windows::autostart::disable(), "Autostart disabled.");
}

pub fn status() {
    let state = if overlay_windows::autostart::is_enabled() {
        "enabled"
    } else {
        "disabled"
    };
    println!("Autostart is currently {state}.");
}

fn report(result: Result<(), String>, success: &str) {
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    println!("{success}");
}
