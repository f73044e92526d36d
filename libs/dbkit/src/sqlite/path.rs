//! Where a SQLite DSN points, and how to turn relative file DSNs into absolute ones.

use std::io;
use std::path::{Component, Path, PathBuf};

use url::Url;

const MEMORY_DSN: &str = "sqlite::memory:";

/// Parsed form of a `sqlite:` DSN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteTarget {
    Memory,
    /// Decoded file path plus the raw query string (`mode=rwc`, ...).
    File { path: PathBuf, query: Option<String> },
}

impl SqliteTarget {
    /// Accepts `sqlite::memory:`, `sqlite:///abs/x.db`, `sqlite://rel/x.db` and
    /// `sqlite:rel.db`. Path segments are percent-decoded the same way sqlx does.
    pub fn parse(dsn: &str) -> io::Result<Self> {
        let dsn = dsn.trim();
        if is_memory_dsn(dsn) {
            return Ok(Self::Memory);
        }

        let url = Url::parse(dsn).map_err(|e| invalid(format!("Invalid SQLite DSN '{dsn}': {e}")))?;
        if url.scheme() != "sqlite" {
            return Err(invalid(format!("Not a SQLite DSN: {dsn}")));
        }

        // `sqlite://database/rental.db` puts the first segment in the host slot.
        let raw = match url.host_str() {
            Some(host) if !host.is_empty() => format!("{host}{}", url.path()),
            _ => url.path().to_owned(),
        };
        let decoded = urlencoding::decode(&raw)
            .map_err(|e| invalid(format!("SQLite path in '{dsn}' is not UTF-8: {e}")))?;
        if decoded.is_empty() || decoded == "/" {
            return Err(invalid(format!("Empty SQLite path in DSN '{dsn}'")));
        }

        Ok(Self::File {
            path: PathBuf::from(decoded.as_ref()),
            query: url.query().map(str::to_owned),
        })
    }

    /// Render back to a DSN sqlx understands.
    pub fn to_dsn(&self) -> String {
        match self {
            Self::Memory => MEMORY_DSN.to_owned(),
            Self::File { path, query } => {
                let mut out = format!("sqlite://{}", encode_path(path));
                if let Some(q) = query {
                    out.push('?');
                    out.push_str(q);
                }
                out
            }
        }
    }
}

/// True for DSNs that open an in-memory database.
pub fn is_memory_dsn(dsn: &str) -> bool {
    let lower = dsn.trim().to_ascii_lowercase();
    matches!(
        lower.as_str(),
        MEMORY_DSN | "sqlite://:memory:" | "sqlite://memory:"
    ) || lower
        .split_once('?')
        .is_some_and(|(_, q)| q.split('&').any(|kv| kv == "mode=memory"))
}

/// Create the parent directory of a file DSN when asked to. Returns the DSN to
/// hand to sqlx; memory DSNs collapse to `sqlite::memory:`.
pub(crate) fn prepare_sqlite_path(dsn: &str, create_dirs: bool) -> io::Result<String> {
    match SqliteTarget::parse(dsn)? {
        SqliteTarget::Memory => Ok(MEMORY_DSN.to_owned()),
        SqliteTarget::File { path, .. } => {
            if create_dirs {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Ok(dsn.trim().to_owned())
        }
    }
}

/// Resolve a relative file DSN against `base_dir`; absolute and memory DSNs pass through.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> io::Result<String> {
    let target = match SqliteTarget::parse(dsn)? {
        SqliteTarget::File { path, query } if path.is_relative() => SqliteTarget::File {
            path: base_dir.join(path),
            query,
        },
        other => other,
    };
    Ok(target.to_dsn())
}

fn encode_path(path: &Path) -> String {
    let mut prefix = String::new();
    let mut rooted = false;
    let mut segments = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => prefix = p.as_os_str().to_string_lossy().into_owned(),
            Component::RootDir => rooted = true,
            Component::CurDir => segments.push(".".to_owned()),
            Component::ParentDir => segments.push("..".to_owned()),
            Component::Normal(s) => {
                segments.push(urlencoding::encode(&s.to_string_lossy()).into_owned())
            }
        }
    }
    let root = if rooted { "/" } else { "" };
    format!("{prefix}{root}{}", segments.join("/"))
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, query: Option<&str>) -> SqliteTarget {
        SqliteTarget::File {
            path: PathBuf::from(path),
            query: query.map(str::to_owned),
        }
    }

    #[test]
    fn parses_file_forms() {
        assert_eq!(
            SqliteTarget::parse("sqlite:///var/db/rental.db").unwrap(),
            file("/var/db/rental.db", None)
        );
        assert_eq!(
            SqliteTarget::parse("sqlite://database/rental.db?mode=rwc").unwrap(),
            file("database/rental.db", Some("mode=rwc"))
        );
        assert_eq!(
            SqliteTarget::parse("sqlite:rental.db").unwrap(),
            file("rental.db", None)
        );
        assert_eq!(
            SqliteTarget::parse("sqlite://my%20db/rental.db").unwrap(),
            file("my db/rental.db", None)
        );
    }

    #[test]
    fn memory_forms() {
        for dsn in [
            "sqlite::memory:",
            "SQLITE://:MEMORY:",
            "sqlite://memory:",
            "sqlite:///x.db?cache=shared&mode=memory",
        ] {
            assert!(is_memory_dsn(dsn), "{dsn}");
            assert_eq!(SqliteTarget::parse(dsn).unwrap(), SqliteTarget::Memory);
        }
        assert!(!is_memory_dsn("sqlite://rental.db"));
        assert!(!is_memory_dsn("sqlite://memory-notes.db"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_paths() {
        assert!(SqliteTarget::parse("postgres://x/y").is_err());
        assert!(SqliteTarget::parse("sqlite://").is_err());
        assert!(SqliteTarget::parse("rental.db").is_err());
    }

    #[test]
    fn absolutize_relative_dsn() {
        let base = Path::new("/srv/rental");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://database/rental.db?mode=rwc", base).unwrap(),
            "sqlite:///srv/rental/database/rental.db?mode=rwc"
        );
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://my%20db/rental.db", base).unwrap(),
            "sqlite:///srv/rental/my%20db/rental.db"
        );
    }

    #[test]
    fn absolutize_keeps_absolute_and_memory() {
        let base = Path::new("/srv/rental");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite:///var/db/rental.db", base).unwrap(),
            "sqlite:///var/db/rental.db"
        );
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://:memory:", base).unwrap(),
            "sqlite::memory:"
        );
        assert!(absolutize_sqlite_dsn("postgres://x/y", base).is_err());
    }

    #[test]
    fn prepare_creates_decoded_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().to_string_lossy().replace('\\', "/");
        let dsn = format!("sqlite://{base}/my%20db/rental.db");

        assert_eq!(prepare_sqlite_path(&dsn, true).unwrap(), dsn);
        assert!(tmp.path().join("my db").is_dir());
        assert!(!tmp.path().join("my%20db").exists());
    }

    #[test]
    fn prepare_leaves_disk_alone_when_asked() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().to_string_lossy().replace('\\', "/");
        let dsn = format!("sqlite://{base}/untouched/rental.db");

        prepare_sqlite_path(&dsn, false).unwrap();
        assert!(!tmp.path().join("untouched").exists());
        assert_eq!(
            prepare_sqlite_path("sqlite://:memory:", true).unwrap(),
            "sqlite::memory:"
        );
    }
}
