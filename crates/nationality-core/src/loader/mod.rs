// crates/nationality-core/src/loader/mod.rs

//! # Catalog Loader
//!
//! Reads a replacement catalog from disk: a JSON array of
//! `{"code", "name", "flag"}` objects, optionally gzip-compressed
//! (feature `compact`, files ending in `.gz`). The builtin catalog needs no
//! loader; this exists for deployments that ship their own country list.

use crate::common::DbOptions;
use crate::error::{NationalityError, Result};
use crate::model::{Catalog, Country, NationalityDb};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Parses and validates a catalog from any JSON reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let countries: Vec<Country> = serde_json::from_reader(reader)?;
        Catalog::from_countries(countries)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_stream(path)?;
        let catalog = Self::from_reader(reader)?;
        info!(path = %path.display(), countries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}

impl NationalityDb {
    /// Loads a catalog file and builds a database over it.
    pub fn load_from_path(path: impl AsRef<Path>, options: DbOptions) -> Result<Self> {
        options.validate()?;
        let catalog = Catalog::load_from_path(path)?;
        Self::new(catalog, options)
    }
}

/// Opens a file, buffers it, and wraps it in a gzip decoder when the
/// extension asks for one.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        NationalityError::NotFound(format!("Catalog not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    {
        if is_gzip(path) {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }
    }

    Ok(Box::new(reader))
}

#[cfg(feature = "compact")]
fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NationalitySearch;
    use std::io::Write;
    use std::path::PathBuf;

    const SMALL: &str = r#"[
        {"code": "unknown", "name": "Prefer not to say", "flag": "🏳️"},
        {"code": "NO", "name": "Norway", "flag": "🇳🇴"},
        {"code": "SE", "name": "Sweden", "flag": "🇸🇪"}
    ]"#;

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("nationality-{}-{name}", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn loads_plain_json() {
        let path = temp_file("plain.json", SMALL.as_bytes());
        let db = NationalityDb::load_from_path(&path, DbOptions::default()).unwrap();
        assert_eq!(db.stats().countries, 3);
        assert_eq!(db.resolve(Some("NO")).name(), "Norway");
        assert!(db.resolve(Some("KR")).is_sentinel());
        std::fs::remove_file(path).ok();
    }

    #[cfg(feature = "compact")]
    #[test]
    fn loads_gzip_json() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SMALL.as_bytes()).unwrap();
        let path = temp_file("small.json.gz", &encoder.finish().unwrap());

        let catalog = Catalog::load_from_path(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Catalog::load_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, NationalityError::NotFound(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = Catalog::from_reader("[{".as_bytes()).unwrap_err();
        assert!(matches!(err, NationalityError::Json(_)));
    }

    #[test]
    fn invalid_catalog_is_rejected() {
        let unsorted = r#"[
            {"code": "unknown", "name": "Prefer not to say", "flag": "🏳️"},
            {"code": "SE", "name": "Sweden", "flag": "🇸🇪"},
            {"code": "NO", "name": "Norway", "flag": "🇳🇴"}
        ]"#;
        let err = Catalog::from_reader(unsorted.as_bytes()).unwrap_err();
        assert!(matches!(err, NationalityError::InvalidCatalog(_)));
    }

    #[test]
    fn zero_capacity_is_rejected_before_io() {
        let err = NationalityDb::load_from_path("/definitely/not/here.json", DbOptions::default().with_cache_capacity(0))
            .unwrap_err();
        assert!(matches!(err, NationalityError::InvalidOption(_)));
    }
}
