use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use super::{Launcher, PlayerProcess};

/// Runs players as real child processes.
#[derive(Debug, Default)]
pub struct SystemLauncher;

pub struct SystemProcess {
    child: Child,
}

impl PlayerProcess for SystemProcess {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn terminate(&mut self) -> io::Result<()> {
        self.child.kill()
    }

    fn wait(&mut self) -> io::Result<()> {
        self.child.wait().map(|_| ())
    }

    fn try_wait(&mut self) -> io::Result<bool> {
        self.child.try_wait().map(|status| status.is_some())
    }
}

impl Launcher for SystemLauncher {
    type Process = SystemProcess;

    fn spawn(&mut self, executable: &str, flags: &[String], target: &Path) -> io::Result<SystemProcess> {
        // Detach all stdio: the player must not draw over the terminal display
        // or read the keys meant for us.
        let child = Command::new(executable)
            .args(flags)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(SystemProcess { child })
    }

    fn kill_all_by_name(&mut self, name: &str) -> io::Result<()> {
        let status = Command::new("pkill")
            .arg("-x")
            .arg(name)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        // pkill exits 1 when nothing matched.
        match status.code() {
            Some(0) | Some(1) => Ok(()),
            _ => Err(io::Error::other(format!("pkill -x {name} exited with {status}"))),
        }
    }
}
