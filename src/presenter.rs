use std::io::{self, Write};

use crate::models::RepositoryItem;

/// Print name, URL and star count, one per line.
pub fn display_repository<W: Write + ?Sized>(out: &mut W, repo: &RepositoryItem) -> io::Result<()> {
    writeln!(out, "Name: {}", repo.name)?;
    writeln!(out, "URL: {}", repo.html_url)?;
    writeln!(out, "Stars: {}", repo.stargazers_count)?;
    out.flush()
}
