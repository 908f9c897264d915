#![warn(rust_2018_idioms)]

//! Codec for RTCP Extended Report (XR, RFC 3611) packets carrying a single
//! VoIP Metrics Report Block.
//!
//! ```
//! use bytes::Bytes;
//! use rtcp_xr::extended_report::{ExtendedReport, VoIPMetricsReportBlock};
//! use util::marshal::{Marshal, Unmarshal};
//!
//! # fn main() -> Result<(), util::Error> {
//! let xr = ExtendedReport {
//!     sender_ssrc: 0x01234567,
//!     report: Some(VoIPMetricsReportBlock {
//!         block_type: 7,
//!         block_length: 8,
//!         ssrc: 0x89abcdef,
//!         loss_rate: 10,
//!         ..Default::default()
//!     }),
//! };
//!
//! let raw: Bytes = xr.marshal()?;
//! assert_eq!(ExtendedReport::unmarshal(&mut raw.clone())?, xr);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extended_report;
pub mod header;
pub mod packet;

pub use error::Error;
