use std::io;

use crate::{
    domain::{Changelog, ReleaseHeader},
    error::Result,
    fmt::FormatWriter,
};

/// Wraps a `std::io::Write` object to write a `debian/changelog` file
///
/// ```text
/// foopkg (1.2.0) xenial; urgency=low
///
///   * Fix the frobnicator
///
///  -- Jane Doe <jane@example.com>  Wed, 12 Jul 2017 10:00:00 -0000
///
/// ```
pub struct DebWriter<'a>(&'a mut dyn io::Write);

impl<'a> DebWriter<'a> {
    pub fn new<T: io::Write + 'a>(writer: &'a mut T) -> DebWriter<'a> {
        DebWriter(writer)
    }

    fn write_header(&mut self, header: &ReleaseHeader) -> Result<()> {
        writeln!(
            self.0,
            "{} ({}) {}; urgency={}\n",
            header.package_name.as_deref().unwrap_or_default(),
            header.version,
            header.distribution.as_deref().unwrap_or_default(),
            header.urgency
        )
        .map_err(Into::into)
    }

    fn write_trailer(&mut self, header: &ReleaseHeader) -> Result<()> {
        writeln!(
            self.0,
            "\n -- {} <{}>  {}\n",
            header.author_name,
            header.author_email,
            header.date_deb()
        )
        .map_err(Into::into)
    }
}

impl<'a> FormatWriter for DebWriter<'a> {
    fn write_changelog(&mut self, changelog: &Changelog) -> Result<()> {
        for (header, commits) in changelog.entries() {
            self.write_header(header)?;
            for commit in commits {
                writeln!(self.0, "  * {}", commit.headline())?;
            }
            self.write_trailer(header)?;
        }

        self.0.flush().map_err(Into::into)
    }
}
