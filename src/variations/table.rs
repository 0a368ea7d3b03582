use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::ext::PathDisplayExt;

pub const DEFAULT_BASE_DIR: &str = "./public/compressed";
pub const DEFAULT_TABLE_NAME: &str = "VARIATION_COUNTS";

const PNG_SUFFIX: &[u8] = b".png";

/// `A` to `Z`, then `0` to `9`.
pub fn variation_keys() -> impl Iterator<Item = char> {
    ('A'..='Z').chain('0'..='9')
}

/// Number of PNG files in each key directory that exists under a base
/// directory. Keys without a directory are absent, not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariationTable {
    counts: BTreeMap<char, usize>,
}

impl VariationTable {
    pub fn scan(base: &Path) -> Result<Self, ScanError> {
        if !base.is_dir() {
            warn!(
                "Base directory {} does not exist, no variations counted",
                base.best_effort_display()
            );
            return Ok(Self::default());
        }

        let mut counts = BTreeMap::new();
        for key in variation_keys() {
            let dir = base.join(key.to_string());
            if !dir.is_dir() {
                continue;
            }
            let count = count_png_files(&dir)?;
            debug!("{}: {} PNG files", dir.best_effort_display(), count);
            counts.insert(key, count);
        }

        Ok(Self { counts })
    }

    pub fn get(&self, key: char) -> Option<usize> {
        self.counts.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Renders the table as a literal block ready to paste into source code:
    ///
    /// ```text
    /// NAME = {
    ///   "A": 3,
    /// }
    /// ```
    pub fn render(&self, name: &str) -> String {
        let mut rendered = format!("{name} = {{\n");
        for (key, count) in &self.counts {
            let _ = writeln!(rendered, "  \"{key}\": {count},");
        }
        rendered.push_str("}\n");
        rendered
    }
}

impl FromIterator<(char, usize)> for VariationTable {
    fn from_iter<I: IntoIterator<Item = (char, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Counts directory entries that are files and whose name ends in `.png`.
/// The suffix match is case-sensitive and does not descend into children.
fn count_png_files(dir: &Path) -> Result<usize, ScanError> {
    let entries = fs::read_dir(dir).context(ReadDirSnafu { path: dir })?;

    let mut count = 0;
    for entry in entries {
        let entry = entry.context(ReadDirSnafu { path: dir })?;
        if !entry.file_name().as_encoded_bytes().ends_with(PNG_SUFFIX) {
            continue;
        }
        match entry.path().metadata() {
            Ok(metadata) if metadata.is_file() => count += 1,
            Ok(_) => {}
            // Dangling symlink
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).context(ReadDirSnafu { path: entry.path() });
            }
        }
    }

    Ok(count)
}

#[derive(Debug, Snafu)]
pub enum ScanError {
    #[snafu(display("Failed to list {}", path.best_effort_display()))]
    ReadDirError {
        path: PathBuf,
        source: std::io::Error,
    },
}
