//! ezfetch library
//!
//! A terminal system information tool: independent probes collect host facts
//! in parallel, the facts are filtered and formatted per configuration and
//! laid out beside an ASCII logo under a color theme.

pub mod cache;
pub mod collectors;
pub mod colors;
pub mod config;
pub mod context;
pub mod data;
pub mod display;
pub mod error;
pub mod format;
pub mod host;
pub mod logo;
pub mod utils;

pub use cache::{with_cache, Cache};
pub use colors::{Role, Theme};
pub use config::Config;
pub use context::Context;
pub use data::{Fact, Record, Value};
pub use display::{RenderOptions, RenderPlan};
pub use error::{EzfetchError, Result};
pub use format::FilterConfig;
pub use host::Host;

/// Collect every fact about the host described by `ctx`
pub fn collect(ctx: &Context) -> Record {
    collectors::collect_record(ctx)
}

/// Filter, format and lay out a record as printable lines
pub fn render_record(record: &Record, config: &Config, theme: &Theme, logo: Option<&[String]>) -> Vec<String> {
    let filter = FilterConfig::from_config(config);
    let pairs = format::filter_and_format(record, &filter);
    display::render(&pairs, logo, theme, &RenderOptions::from_config(config))
}
