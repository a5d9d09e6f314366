//! Integration tests for configuration management
//!
//! These tests verify that the configuration system works correctly
//! across module boundaries.

use r_plexpanel::cli::Args;
use r_plexpanel::config::Settings;
use r_plexpanel::router::Autoplay;
use clap::Parser;
use std::error::Error;
use tempfile::tempdir;

#[cfg(test)]
mod config_integration_tests {
    use super::*;

    /// Test complete configuration workflow
    #[test]
    fn test_config_lifecycle() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");

        let mut settings = Settings::default();
        settings.plex_id = "0123456789abcdef".to_string();
        settings.autoplay = true;
        settings.start_volume = 35;
        settings.backlight_pin = Some(18);
        settings.screen_timeout_min = 10;

        settings.validate()?;
        settings.save(&config_path)?;

        let loaded = Settings::load(&config_path)?;
        assert_eq!(loaded, settings);

        // Command-line values win over the file
        let args = Args::parse_from(["r-plexpanel", "--plex-id", "override", "--no-autoplay"]);
        let mut effective = loaded;
        args.apply(&mut effective);
        effective.validate()?;
        assert_eq!(effective.plex_id, "override");

        let autoplay = Autoplay::from_settings(&effective);
        assert!(!autoplay.enabled);
        assert_eq!(autoplay.start_volume, Some(35));

        Ok(())
    }

    /// Test invalid configuration handling
    #[test]
    fn test_invalid_config_validation() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "player_url": "", "volume_step": 5 }"#)?;

        let settings = Settings::load(&config_path)?;
        let result = settings.validate();
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("URL cannot be empty"));
        }

        std::fs::write(&config_path, r#"{ "clk_pin": 12 }"#)?;
        let settings = Settings::load(&config_path)?;
        assert!(settings.validate().is_err());

        Ok(())
    }

    #[test]
    fn test_zero_start_volume_disables_volume_set() {
        let mut settings = Settings::default();
        settings.autoplay = true;
        settings.start_volume = 0;
        let autoplay = Autoplay::from_settings(&settings);
        assert!(autoplay.enabled);
        assert_eq!(autoplay.start_volume, None);
    }
}
