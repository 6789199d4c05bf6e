//! Result reporting
//!
//! - **text**: fixed-width table on stdout, seed listings, stream previews
//! - **json**: one record per batch, written to a file

pub mod json;
pub mod text;
