mod deb_writer;
mod rpm_writer;

pub use self::{deb_writer::DebWriter, rpm_writer::RpmWriter};
use crate::{config::OutputFormat, domain::Changelog, error::Result};

/// A trait for writing a collated [`Changelog`] in a concrete packaging
/// format.
///
/// Releases are written in the order the changelog holds them, newest first,
/// each with its commits newest first.
pub trait FormatWriter {
    fn write_changelog(&mut self, changelog: &Changelog) -> Result<()>;
}

/// Writer for `format` wrapping `out`
pub fn writer_for<'a, T: std::io::Write + 'a>(
    format: OutputFormat,
    out: &'a mut T,
) -> Box<dyn FormatWriter + 'a> {
    match format {
        OutputFormat::Rpm => Box::new(RpmWriter::new(out)),
        OutputFormat::Deb => Box::new(DebWriter::new(out)),
    }
}

/// Render `changelog` to a string
pub fn render(format: OutputFormat, changelog: &Changelog) -> Result<String> {
    let mut buffer = Vec::new();
    writer_for(format, &mut buffer).write_changelog(changelog)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
