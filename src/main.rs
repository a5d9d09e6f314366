use clap::Parser;
use r_plexpanel::backlight::{Backlight, BacklightWaker, GpioBacklight, NullBacklight};
use r_plexpanel::cli::Args;
use r_plexpanel::config::Settings;
use r_plexpanel::init_app_dirs;
use r_plexpanel::input::GpioInputs;
use r_plexpanel::logging;
use r_plexpanel::monitor::IdleMonitor;
use r_plexpanel::plexamp::{PlexampClient, Remote};
use r_plexpanel::router::{Autoplay, CommandPower, InputRouter};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log_json);

    let config_path = match &args.config {
        Some(path) => PathBuf::from(path),
        None => Settings::default_path(),
    };

    let mut settings = Settings::load(&config_path).map_err(|e| {
        error!("Could not load {}: {}", config_path.display(), e);
        e
    })?;
    args.apply(&mut settings);
    settings.validate()?;

    if args.init_config {
        init_app_dirs()?;
        settings.save(&config_path)?;
        info!("Settings written to {}", config_path.display());
        return Ok(());
    }

    if settings.plex_id.is_empty() {
        warn!("No Plex server identifier configured: autoplay and library radio are disabled");
    }

    let backlight: Arc<dyn Backlight> = match settings.backlight_pin {
        Some(pin) => Arc::new(GpioBacklight::open(pin, settings.backlight_active_low)?),
        None => Arc::new(NullBacklight::new()),
    };
    let waker = BacklightWaker::new(backlight.clone());

    let client = PlexampClient::new(&settings.player_url, settings.request_timeout());
    let remote = Arc::new(Remote::new(
        Arc::new(client),
        &settings.plex_id,
        settings.volume_step,
        waker.clone(),
    ));

    let monitor = IdleMonitor::new(
        remote.clone(),
        backlight,
        waker,
        settings.poll_interval(),
        settings.screen_timeout(),
    );
    let monitor_handle = tokio::spawn(monitor.run());

    let mut inputs = GpioInputs::open(&settings)?;
    let power = Arc::new(CommandPower::new(settings.shutdown_command.clone()));
    let mut router = InputRouter::new(remote.clone(), power, settings.short_press());

    Autoplay::from_settings(&settings).run(&remote).await;

    info!("Front panel ready, player at {}", settings.player_url);
    tokio::select! {
        _ = router.run(&mut inputs) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
            info!("Interrupted, exiting");
        }
    }

    monitor_handle.abort();
    Ok(())
}
