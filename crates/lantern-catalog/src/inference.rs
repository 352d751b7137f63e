//! Backfilling descriptor fields from the market's path layout.
//!
//! Descriptors are published at `<collection>/<owner>/<slug>/<file>`, where
//! `owner` is the author's GitHub login and `slug` is the repository name.
//! A descriptor that omits `repo` or `author` gets them from its path.

use crate::descriptor::{Author, RawDescriptor};

/// Base URL for repository and profile links.
pub const GITHUB_BASE: &str = "https://github.com";

/// Owner and slug extracted from a descriptor path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathConvention<'a> {
    /// Second path segment: the author's login.
    pub owner: &'a str,
    /// Third path segment: the repository name.
    pub slug: &'a str,
}

impl<'a> PathConvention<'a> {
    /// Parse `<collection>/<owner>/<slug>/<file>`.
    ///
    /// Returns `None` when the path has fewer than four segments or the
    /// owner or slug segment is empty.
    #[must_use]
    pub fn parse(source_path: &'a str) -> Option<Self> {
        let mut segments = source_path.split('/');
        let _collection = segments.next()?;
        let owner = segments.next().filter(|s| !s.is_empty())?;
        let slug = segments.next().filter(|s| !s.is_empty())?;
        segments.next()?;
        Some(Self { owner, slug })
    }

    /// `owner/slug`.
    #[must_use]
    pub fn repo(&self) -> String {
        format!("{}/{}", self.owner, self.slug)
    }
}

/// Fill in `repo` and `author` from `source_path` where they are missing.
///
/// Present fields are never overwritten, and a path that does not follow the
/// layout leaves the descriptor untouched. Applying this twice is the same
/// as applying it once.
#[must_use]
pub fn infer(mut raw: RawDescriptor, source_path: &str) -> RawDescriptor {
    let Some(convention) = PathConvention::parse(source_path) else {
        return raw;
    };

    if raw.repo.as_deref().is_none_or(str::is_empty) {
        raw.repo = Some(convention.repo());
    }
    if raw.author.is_none() {
        raw.author = Some(Author::github(convention.owner));
    }
    raw
}
