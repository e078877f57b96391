//! # WideCell
//!
//! Typed cell codecs for byte-oriented wide-column stores, with:
//! - Fixed-width big-endian encodings for floats, booleans, integers and timestamps
//! - Text and serde document cells
//! - Structured `<id>#<sequence>` row keys and prefix ranges
//! - An in-process table emulator to exercise them end to end
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    widecell-sample                           │
//! │              (scenario: write, read, check)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │    Table    │
//!   │   (pure)    │          │  (RwLock)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod table;
pub mod scenario;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{WideCellError, Result};
pub use config::Config;
pub use codec::{CellValue, KeyRange, RowKey};
pub use table::{Instance, Table};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of WideCell
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
