//! CSV import of address ranges into a lookup service.
//!
//! The expected layout is the DB-IP city CSV: no header, one range per row.
//!
//! | column | content |
//! |---|---|
//! | 0 | range start (or a CIDR network, with column 1 left empty) |
//! | 1 | range end |
//! | 2 | country |
//! | 3 | region |
//! | 5 | city |
//! | 7 | latitude |
//! | 8 | longitude |
//!
//! Rows must be sorted ascending and must not overlap.

use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use ipnet::IpNet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::ImportConfig;
use crate::error::{Error, Result};
use crate::index::IpIndex;
use crate::remote::{is_compressed, Downloader};
use crate::{GeoInfo, LookupService};

const COL_RANGE_START: usize = 0;
const COL_RANGE_END: usize = 1;
const COL_COUNTRY: usize = 2;
const COL_REGION: usize = 3;
const COL_CITY: usize = 5;
const COL_LATITUDE: usize = 7;
const COL_LONGITUDE: usize = 8;

/// Where a range source is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// HTTP(S) URL; compressed files are downloaded before importing
    Remote { url: String, compressed: bool },
    /// File on the local filesystem
    Local(PathBuf),
}

impl Source {
    /// Resolve a source URI.
    ///
    /// Accepts `http://`, `https://`, `file://` and plain filesystem paths.
    /// Local files ending in `.gz` are decompressed while reading.
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        match uri.split_once("://") {
            Some((scheme, _))
                if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
            {
                Ok(Source::Remote {
                    url: uri.to_string(),
                    compressed: is_compressed(uri),
                })
            }
            Some((scheme, path)) if scheme.eq_ignore_ascii_case("file") => {
                Ok(Source::Local(PathBuf::from(path)))
            }
            Some((scheme, _)) => Err(Error::UnsupportedScheme(scheme.to_string())),
            None if uri.is_empty() => Err(Error::Config("empty source URI".to_string())),
            None => Ok(Source::Local(PathBuf::from(uri))),
        }
    }
}

/// Summary of a finished import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStats {
    /// Rows read from the source
    pub rows: u64,
    /// Ranges in the index after the import
    pub ranges: usize,
    /// Distinct information records in the index after the import
    pub distinct_info: usize,
    /// Rows dropped because they start in a reserved network
    pub dropped: usize,
    /// Time spent importing
    pub duration: Duration,
}

/// ImportService reads range sources and feeds them into a lookup service.
pub struct ImportService {
    downloader: Downloader,
    download_dir: PathBuf,
}

impl ImportService {
    /// Create an import service from configuration.
    pub fn new(config: &ImportConfig) -> Self {
        Self::with_downloader(Downloader::new(), config.download_dir())
    }

    /// Create an import service with a custom downloader.
    pub fn with_downloader(downloader: Downloader, download_dir: impl AsRef<Path>) -> Self {
        Self {
            downloader,
            download_dir: download_dir.as_ref().to_path_buf(),
        }
    }

    /// Import all ranges from the source at `uri`.
    pub fn import<I: IpIndex>(
        &self,
        uri: &str,
        service: &mut LookupService<I>,
    ) -> Result<ImportStats> {
        log::info!("Import started, URI: {}", uri);

        let source = Source::parse(uri)?;
        let reader = self.open(&source)?;
        Self::import_reader(reader, service)
    }

    /// Open a reader over the source content.
    pub fn open(&self, source: &Source) -> Result<Box<dyn Read + Send>> {
        match source {
            Source::Remote {
                url,
                compressed: true,
            } => {
                let path = self.downloader.download(url, &self.download_dir, true)?;
                Ok(Box::new(BufReader::new(File::open(path)?)))
            }
            Source::Remote { url, .. } => {
                let reader: Box<dyn Read + Send> = self.downloader.open(url)?;
                Ok(reader)
            }
            Source::Local(path) => {
                let file = BufReader::new(File::open(path)?);
                if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
                    Ok(Box::new(GzDecoder::new(file)))
                } else {
                    Ok(Box::new(file))
                }
            }
        }
    }

    /// Import all ranges from CSV content.
    ///
    /// The first malformed row or rejected insertion aborts the import.
    pub fn import_reader<R: Read, I: IpIndex>(
        reader: R,
        service: &mut LookupService<I>,
    ) -> Result<ImportStats> {
        let started = Instant::now();
        let dropped_before = service.dropped_count();

        let mut csv = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut rows = 0u64;
        let mut record = StringRecord::new();
        while csv.read_record(&mut record)? {
            rows += 1;
            let line = record.position().map(|p| p.line()).unwrap_or(rows);
            let (start, end, info) = parse_record(&record, line)?;

            service.add(start, end, &info).map_err(|e| {
                log::error!("Import aborted at line {}: {}", line, e);
                e
            })?;
        }

        let stats = ImportStats {
            rows,
            ranges: service.range_count(),
            distinct_info: service.info_count(),
            dropped: service.dropped_count() - dropped_before,
            duration: started.elapsed(),
        };

        log::info!(
            "Import finished. IP ranges: {}, distinct info: {}, dropped: {}, time elapsed: {:?}",
            stats.ranges,
            stats.distinct_info,
            stats.dropped,
            stats.duration
        );

        Ok(stats)
    }
}

/// Parse one CSV row into a range and its information.
fn parse_record(record: &StringRecord, line: u64) -> Result<(IpAddr, IpAddr, GeoInfo)> {
    let field = move |idx: usize| {
        record.get(idx).ok_or_else(|| Error::InvalidRecord {
            line,
            reason: format!(
                "expected at least {} columns, got {}",
                COL_LONGITUDE + 1,
                record.len()
            ),
        })
    };

    let range_start = field(COL_RANGE_START)?;
    let (start, end) = if range_start.contains('/') {
        let net: IpNet = range_start.parse().map_err(|_| Error::InvalidRecord {
            line,
            reason: format!("invalid network: {}", range_start),
        })?;
        (net.network(), net.broadcast())
    } else {
        (
            parse_ip(range_start, line)?,
            parse_ip(field(COL_RANGE_END)?, line)?,
        )
    };

    let info = GeoInfo::new(field(COL_CITY)?, field(COL_REGION)?, field(COL_COUNTRY)?)
        .with_coordinates(
            parse_coordinate(field(COL_LATITUDE)?, line)?,
            parse_coordinate(field(COL_LONGITUDE)?, line)?,
        );

    Ok((start, end, info))
}

fn parse_ip(value: &str, line: u64) -> Result<IpAddr> {
    value.parse().map_err(|_| Error::InvalidRecord {
        line,
        reason: format!("invalid IP address: {}", value),
    })
}

fn parse_coordinate(value: &str, line: u64) -> Result<f32> {
    value.parse().map_err(|_| Error::InvalidRecord {
        line,
        reason: format!("invalid coordinate: {}", value),
    })
}
