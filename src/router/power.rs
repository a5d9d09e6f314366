use async_trait::async_trait;
use std::error::Error;
use std::fmt;
use std::io;
use std::process::ExitStatus;
use tokio::process::Command;
use tracing::info;

const LOG_TARGET: &str = "r_plexpanel::router::power";

#[derive(Debug)]
pub enum PowerError {
    Spawn(io::Error),
    Exit(ExitStatus),
    EmptyCommand,
}

impl fmt::Display for PowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerError::Spawn(e) => write!(f, "Could not run shutdown command: {}", e),
            PowerError::Exit(status) => write!(f, "Shutdown command failed: {}", status),
            PowerError::EmptyCommand => write!(f, "No shutdown command configured"),
        }
    }
}

impl Error for PowerError {}

impl From<io::Error> for PowerError {
    fn from(e: io::Error) -> Self {
        PowerError::Spawn(e)
    }
}

/// Powers the device off.
#[async_trait]
pub trait SystemPower: Send + Sync {
    async fn power_off(&self) -> Result<(), PowerError>;
}

/// Powers off by running an external command, `sudo shutdown -h now` by default.
pub struct CommandPower {
    argv: Vec<String>,
}

impl CommandPower {
    pub fn new(argv: Vec<String>) -> Self {
        CommandPower { argv }
    }
}

#[async_trait]
impl SystemPower for CommandPower {
    async fn power_off(&self) -> Result<(), PowerError> {
        let (program, args) = self.argv.split_first().ok_or(PowerError::EmptyCommand)?;
        info!(target: LOG_TARGET, "Running {}", self.argv.join(" "));

        let status = Command::new(program).args(args).status().await?;
        if status.success() {
            Ok(())
        } else {
            Err(PowerError::Exit(status))
        }
    }
}
