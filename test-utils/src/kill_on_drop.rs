use std::io;
use std::ops::{Deref, DerefMut};
use std::process::Child;
use std::thread;
use std::time::Instant;
use crate::constants::{KILL_CHECK_INTERVAL, TERM_WAIT};
use crate::kill_term::ChildKillTermExt;

/// A daemon handle that asks the process to stop when the test lets go of
/// it, and kills it if asking does not help.
#[derive(Debug)]
pub struct KillOnDropChild(Child);

impl KillOnDropChild {
    /// `Ok(true)` once the process is gone, `Ok(false)` if it outlived
    /// [`TERM_WAIT`].
    fn terminate_and_wait(&mut self) -> io::Result<bool> {
        if self.0.try_wait()?.is_some() {
            return Ok(true)
        }
        self.0.kill_term()?;
        let started = Instant::now();
        while started.elapsed() < TERM_WAIT {
            if self.0.try_wait()?.is_some() {
                return Ok(true)
            }
            thread::sleep(KILL_CHECK_INTERVAL);
        }
        Ok(false)
    }
}

impl Drop for KillOnDropChild {
    fn drop(&mut self) {
        let pid = self.0.id();
        match self.terminate_and_wait() {
            Ok(true) => (),
            Ok(false) => {
                eprintln!(
                    "daemon {pid} ignored SIGTERM for {} ms, sending SIGKILL",
                    TERM_WAIT.as_millis(),
                );
                if let Err(e) = self.0.kill() {
                    eprintln!("could not kill daemon {pid}, leaking it: {e}");
                }
            },
            Err(e) => eprintln!("could not stop daemon {pid}, leaking it: {e}"),
        }
    }
}

impl Deref for KillOnDropChild {
    type Target = Child;
    fn deref(&self) -> &Child {
        &self.0
    }
}

impl DerefMut for KillOnDropChild {
    fn deref_mut(&mut self) -> &mut Child {
        &mut self.0
    }
}

pub trait ChildKillOnDropExt {
    fn kill_on_drop(self) -> KillOnDropChild;
}

impl ChildKillOnDropExt for Child {
    fn kill_on_drop(self) -> KillOnDropChild {
        KillOnDropChild(self)
    }
}
