//! nationality-cli
//! ===============
//!
//! Command-line interface for the `nationality-core` catalog and picker.
//!
//! This crate primarily provides a binary (`nationality`). The small library
//! target only exists so the crate has a rendered documentation page.
//!
//! Basic usage:
//!
//! ```text
//! nationality --help
//! nationality stats
//! nationality resolve KR
//! nationality flag kr
//! nationality search kor
//! nationality select --keys enter,k,o,r,down,enter
//! nationality select --keys enter,enter --fail
//! ```
//!
//! For programmatic access use the [`nationality-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
