//! Terminal presentation: colors, status messages and tables.

pub mod output_format;
pub mod record_view;
pub mod theme;
