//! Cloud storage backends
//!
//! Currently only Amazon S3 and S3-compatible services (MinIO, Cloudflare
//! R2, DigitalOcean Spaces) via [`S3Lister`]. Other backends can plug in by
//! implementing [`crate::lister::ObjectLister`].

pub mod s3_client;

pub use s3_client::{S3Lister, S3ListerBuilder};
