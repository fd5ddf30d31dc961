use std::io;

use crate::{domain::Changelog, error::Result, fmt::FormatWriter};

/// Wraps a `std::io::Write` object to write an RPM `%changelog` section
///
/// ```text
/// * Wed Jul 12 2017 Jane Doe <jane@example.com> - 1.2.0
/// - Fix the frobnicator
///
/// ```
pub struct RpmWriter<'a>(&'a mut dyn io::Write);

impl<'a> RpmWriter<'a> {
    pub fn new<T: io::Write + 'a>(writer: &'a mut T) -> RpmWriter<'a> {
        RpmWriter(writer)
    }
}

impl<'a> FormatWriter for RpmWriter<'a> {
    fn write_changelog(&mut self, changelog: &Changelog) -> Result<()> {
        for (header, commits) in changelog.entries() {
            writeln!(
                self.0,
                "* {} {} <{}> - {}",
                header.date_rpm(),
                header.author_name,
                header.author_email,
                header.version
            )?;
            for commit in commits {
                writeln!(self.0, "- {}", commit.headline())?;
            }
            writeln!(self.0)?;
        }

        self.0.flush().map_err(Into::into)
    }
}
