//! IpLookup - An in-memory IP range index for geographic lookups.
//!
//! This crate answers "what location is associated with IP address X?" by
//! consulting a prebuilt table of non-overlapping address ranges, falling
//! back to a fixed table of reserved (bogon) networks.
//!
//! # Features
//!
//! - **Range index**: O(log n) point lookup over sorted, non-overlapping ranges
//! - **Deduplication**: ranges sharing identical location data share one record
//! - **Packed strings**: city, region and country stored in a single allocation
//! - **Reserved ranges**: private, loopback, multicast and other bogon networks
//! - **Atomic hand-off**: publish a fully built index to concurrent readers
//! - **CSV import**: load DB-IP style range files from disk or HTTP(S), gzip included
//!
//! # Quick Start
//!
//! ```
//! use iplookup::{GeoInfo, LookupService};
//!
//! let mut service = LookupService::new();
//! service.add(
//!     "1.0.0.0".parse().unwrap(),
//!     "1.0.16.255".parse().unwrap(),
//!     &GeoInfo::new("South Brisbane", "Queensland", "AU").with_coordinates(-27.4767, 153.017),
//! )?;
//!
//! let info = service.try_get("1.0.0.5".parse().unwrap()).unwrap();
//! assert_eq!(info.location().unwrap().city, "South Brisbane");
//!
//! // Reserved networks resolve without any insertion
//! let info = service.try_get("10.0.0.5".parse().unwrap()).unwrap();
//! assert_eq!(info.description(), Some("Private-use networks"));
//!
//! // Unknown public addresses are simply absent
//! assert!(service.try_get("8.8.8.8".parse().unwrap()).is_none());
//! # Ok::<(), iplookup::Error>(())
//! ```
//!
//! # Importing
//!
//! ```ignore
//! use iplookup::{ImportService, LookupService, SharedLookup};
//! use iplookup::config::ImportConfig;
//!
//! let config = ImportConfig::new("https://download.db-ip.com/free/dbip-city-lite-2024-06.csv.gz");
//! let mut service = LookupService::new();
//! let stats = ImportService::new(&config).import(&config.file_uri, &mut service)?;
//!
//! // Hand the frozen index to concurrent readers
//! let shared = SharedLookup::new(service);
//! ```
//!
//! # Lifecycle
//!
//! An index is built once by a single writer, in ascending range order,
//! and is read-only afterwards. Insertions take `&mut self`; lookups take
//! `&self` and never mutate state.

mod error;
mod info;
mod lookup;
mod shared;

pub mod config;
pub mod import;
pub mod index;
pub mod key;
pub mod remote;

// Re-export core types
pub use error::{ColumnError, Error, IntervalError, PackedStringError, Result};
pub use info::{GeoInfo, IpInfo};
pub use key::AddressKey;

// Re-export service types
pub use import::{ImportService, ImportStats};
pub use lookup::LookupService;
pub use shared::SharedLookup;
