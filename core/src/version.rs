use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("malformed version '{0}'")]
    Malformed(String),
}

/// One comparable piece of a version string
///
/// Variant order matters: a numeric segment always ranks above an alpha one,
/// so `1.0` is newer than `1.0rc`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment {
    Alpha(String),
    Numeric(u64),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Alpha(s) => write!(f, "{s}"),
            Segment::Numeric(n) => write!(f, "{n}"),
        }
    }
}

/// A version reduced to an ordered list of segments
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<Segment>,
    /// Original string representation
    original: String,
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Version {
    /// Parse an Arch `[epoch:]pkgver[-pkgrel]` string.
    ///
    /// Epoch and pkgrel only matter between Arch packages, never against an
    /// upstream release, so both are dropped before segmenting.
    pub fn from_pkgver(s: &str) -> Result<Self, VersionError> {
        let s = s.trim();

        let without_epoch = match s.split_once(':') {
            Some((epoch, rest)) if !epoch.is_empty() && epoch.bytes().all(|b| b.is_ascii_digit()) => {
                rest
            }
            _ => s,
        };

        let pkgver = without_epoch
            .split_once('-')
            .map_or(without_epoch, |(pkgver, _pkgrel)| pkgver);

        Ok(Self {
            segments: split_segments(pkgver).ok_or_else(|| VersionError::Malformed(s.to_string()))?,
            original: s.to_string(),
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments joined with dots, e.g. `1.2-3` becomes `1.2.3`
    pub fn normalized(&self) -> String {
        self.segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parse an upstream version such as `1.2-3` or `3.18.0`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Ok(Self {
            segments: split_segments(s).ok_or_else(|| VersionError::Malformed(s.to_string()))?,
            original: s.to_string(),
        })
    }
}

/// Split on any non-alphanumeric separator, then break every token into
/// runs of digits and runs of letters.
///
/// Returns `None` when nothing parseable remains or a number overflows.
fn split_segments(s: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();

    for token in s
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let mut rest = token;
        while let Some(first) = rest.chars().next() {
            let numeric = first.is_ascii_digit();
            let end = rest
                .find(|c: char| c.is_ascii_digit() != numeric)
                .unwrap_or(rest.len());
            let (run, tail) = rest.split_at(end);

            if numeric {
                segments.push(Segment::Numeric(run.parse().ok()?));
            } else {
                segments.push(Segment::Alpha(run.to_ascii_lowercase()));
            }
            rest = tail;
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        let zero = Segment::Numeric(0);

        for i in 0..len {
            let left = self.segments.get(i).unwrap_or(&zero);
            let right = other.segments.get(i).unwrap_or(&zero);
            match left.cmp(right) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
