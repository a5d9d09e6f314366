//! r-plexpanel library core functionality

pub mod backlight;
pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod monitor;
pub mod plexamp;
pub mod router;
#[cfg(test)]
mod test_support;

/// Initialize the application directories
pub fn init_app_dirs() -> std::io::Result<()> {
    let default_path = config::Settings::default_path();
    if let Some(config_dir) = default_path.parent() {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir)?;
        }
    }
    Ok(())
}
