use std::io;
use std::process::Child;

pub trait ChildKillTermExt {
    fn kill_term(&self) -> Result<(), io::Error>;
}

impl ChildKillTermExt for Child {
    fn kill_term(&self) -> Result<(), io::Error> {
        match unsafe { libc::kill(self.id().cast_signed(), libc::SIGTERM) } {
            -1 => Err(io::Error::last_os_error()),
            _ => Ok(()),
        }
    }
}
