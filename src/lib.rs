//! # dupescan
//!
//! A one-shot utility for finding duplicate filenames in S3 buckets.
//!
//! ## Features
//!
//! - **Full pagination**: Follows `ListObjectsV2` continuation tokens until
//!   the prefix is exhausted
//! - **Order-preserving grouping**: Filenames and paths keep first-seen order
//! - **Dynamic CSV header**: Column count sized to the widest duplicate group
//! - **Pluggable backend**: One-method listing trait, so tests run against
//!   in-memory fakes instead of the network
//! - **S3-compatible services**: Custom endpoints and path-style addressing
//!   for MinIO, Cloudflare R2, DigitalOcean Spaces
//!
//! ## Quick Start
//!
//! ```no_run
//! use dupescan::cloud::S3Lister;
//! use dupescan::progress::ConsoleProgress;
//! use dupescan::report::generate_duplicate_report;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lister = S3Lister::builder().region("us-east-1").build().await?;
//!
//!     let outcome = generate_duplicate_report(
//!         &lister,
//!         "my-bucket",
//!         "",
//!         "data/duplicate_filenames.csv",
//!         &ConsoleProgress,
//!     )
//!     .await?;
//!
//!     match outcome {
//!         Some(path) => println!("✅ CSV report saved: {}", path.display()),
//!         None => println!("No duplicate filenames found."),
//!     }
//!     Ok(())
//! }
//! ```

pub mod cloud;
pub mod error;
pub mod lister;
pub mod progress;
pub mod report;

pub use cloud::S3Lister;
pub use error::{DupeScanError, Result};
pub use lister::{list_keys, ObjectLister, ObjectPage};
pub use progress::{ConsoleProgress, NoProgress, ProgressObserver};
pub use report::generate_duplicate_report;
