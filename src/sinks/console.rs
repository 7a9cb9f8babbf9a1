use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::model::Gig;

/// Write one summary line per gig.
pub fn write_gigs<W: Write>(out: &mut W, gigs: &[Gig]) -> Result<()> {
    for gig in gigs {
        writeln!(out, "{}", gig.summary_line())?;
    }
    out.flush()?;
    debug!("printed {} gigs", gigs.len());
    Ok(())
}
