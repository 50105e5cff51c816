use std::path::Path;

use overlay_core::settings::{self, template};

/// Writes the commented default `settings.toml` to
/// `~/.config/overlay-player/`.
///
/// An existing file is kept unless `force` is set, which resets every
/// setting to its default.
pub fn execute(force: bool) {
    let Some(dir) = settings::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    let path = dir.join("settings.toml");
    if path.exists() && !force {
        println!("Already exists: {}", path.display());
        println!("Run `overlay-player init --force` to reset it to the defaults.");
        return;
    }

    write(&path, &template::generate_settings());
}

fn write(path: &Path, content: &str) {
    match std::fs::write(path, content) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => {
            eprintln!("Error: could not write {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}
