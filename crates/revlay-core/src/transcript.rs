use std::io::{self, Write};
use std::path::Path;

use revlay_version::{RevisionId, VersionId};

use crate::context::ResolutionContext;

/// Human-readable decision log for one reconciliation run. Append-only,
/// single writer; an explicit value passed around, never ambient state.
pub struct Transcript<W: Write> {
    out: W,
}

impl<W: Write> Transcript<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn header(&mut self, ctx: &ResolutionContext) -> io::Result<()> {
        writeln!(self.out, "Application version: {}", ctx.version)?;
        match ctx.revision {
            Some(r) => writeln!(self.out, "Application revision: {}", r)?,
            None => writeln!(self.out, "Application revision: unknown")?,
        }
        writeln!(self.out, "{} Updating overlays... {}", "-".repeat(10), "-".repeat(10))
    }

    pub fn plugin(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "{} processing plugin {}", "-".repeat(8), name)
    }

    pub fn using(
        &mut self,
        dest: &Path,
        version: Option<VersionId>,
        revision: Option<RevisionId>,
    ) -> io::Result<()> {
        write!(self.out, "    Using")?;
        if let Some(v) = version {
            write!(self.out, " version {}", v)?;
        }
        if let Some(r) = revision {
            write!(self.out, " revision {}", r)?;
        }
        writeln!(self.out, " for file {}", dest.display())
    }

    pub fn obsolete(&mut self, dest: &Path) -> io::Result<()> {
        writeln!(self.out, "    Removing obsolete file {}", dest.display())
    }

    pub fn done(&mut self) -> io::Result<()> {
        writeln!(self.out, "Done")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
