//! Command-line interface

use crate::config::Settings;
use clap::Parser;

/// Command-line arguments for r-plexpanel
#[derive(Parser, Debug)]
#[command(author, version, about = "Rotary encoder front panel for Plexamp", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, env = "PLEXPANEL_CONFIG")]
    pub config: Option<String>,

    /// Plexamp base URL
    #[arg(long, env = "PLEXAMP_URL")]
    pub player_url: Option<String>,

    /// machineIdentifier of the Plex server used for library radio
    #[arg(long, env = "PLEX_ID")]
    pub plex_id: Option<String>,

    /// Do not start playback on startup, whatever the config says
    #[arg(long)]
    pub no_autoplay: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Log as JSON lines
    #[arg(long, env = "PLEXPANEL_LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    /// Applies command-line overrides on top of the file settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.player_url {
            settings.player_url = url.clone();
        }
        if let Some(plex_id) = &self.plex_id {
            settings.plex_id = plex_id.clone();
        }
        if self.no_autoplay {
            settings.autoplay = false;
        }
    }
}
