//! The probe catalog and the collection pass.
//!
//! Every probe reads one fact through the [`Context`]'s host. A probe that
//! errors or panics contributes `Unavailable`; it never aborts the pass.
//! Probes report "nothing found" as an `Err` and never return
//! `Ok(Value::Unavailable)`, so only real findings reach the cache.

pub mod desktop;
pub mod hardware;
pub mod network;
pub mod packages;
pub mod sensors;
pub mod system;

use crate::cache::with_cache;
use crate::context::Context;
use crate::data::{Fact, Record, Value};
use crate::error::Result;
use rayon::prelude::*;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use tracing::{debug, trace};

thread_local! {
    static IN_PROBE: Cell<bool> = const { Cell::new(false) };
}

/// Send panics raised inside a probe to `tracing` instead of stderr.
/// Panics anywhere else still reach the previous hook.
fn quiet_probe_panics() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if IN_PROBE.with(Cell::get) {
                debug!(%info, "probe panic");
            } else {
                previous(info);
            }
        }));
    });
}

pub struct Probe {
    pub label: &'static str,
    /// Results are memoized under this key when set
    pub cache_key: Option<&'static str>,
    run: fn(&Context) -> Result<Value>,
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe")
            .field("label", &self.label)
            .field("cache_key", &self.cache_key)
            .finish()
    }
}

const fn probe(label: &'static str, run: fn(&Context) -> Result<Value>) -> Probe {
    Probe {
        label,
        cache_key: None,
        run,
    }
}

const fn cached(label: &'static str, key: &'static str, run: fn(&Context) -> Result<Value>) -> Probe {
    Probe {
        label,
        cache_key: Some(key),
        run,
    }
}

/// Catalog order is display order
pub static CATALOG: &[Probe] = &[
    probe("User", system::user),
    probe("Host", system::host_model),
    probe("OS", system::os),
    probe("Kernel", system::kernel),
    probe("Uptime", system::uptime),
    cached("Packages", "packages", packages::packages),
    probe("Shell", desktop::shell),
    probe("Resolution", desktop::resolution),
    probe("DE", desktop::desktop_environment),
    probe("WM", desktop::window_manager),
    probe("Terminal", desktop::terminal),
    probe("CPU", hardware::cpu),
    cached("GPU", "gpu", hardware::gpu),
    probe("Memory", hardware::memory),
    probe("Swap", hardware::swap),
    probe("Disk", hardware::disk),
    probe("Local IP", network::local_ip),
    probe("Battery", sensors::battery),
    probe("Locale", system::locale),
];

pub fn labels() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|probe| probe.label)
}

pub fn find(label: &str) -> Option<&'static Probe> {
    CATALOG.iter().find(|probe| probe.label.eq_ignore_ascii_case(label))
}

impl Probe {
    /// Run without caching, errors included
    pub fn try_run(&self, ctx: &Context) -> Result<Value> {
        (self.run)(ctx)
    }

    /// Run through the cache, folding every failure into `Unavailable`
    pub fn run(&self, ctx: &Context) -> Fact {
        quiet_probe_panics();
        let was_in_probe = IN_PROBE.with(|flag| flag.replace(true));
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match self.cache_key {
            Some(key) => with_cache(&ctx.cache, key, || self.try_run(ctx)),
            None => self.try_run(ctx),
        }));
        IN_PROBE.with(|flag| flag.set(was_in_probe));

        let value = match outcome {
            Ok(Ok(value)) => {
                trace!(probe = self.label, %value, "probe finished");
                value
            }
            Ok(Err(err)) => {
                debug!(probe = self.label, %err, "probe failed");
                Value::Unavailable
            }
            Err(_) => {
                debug!(probe = self.label, "probe panicked");
                Value::Unavailable
            }
        };
        Fact::new(self.label, value)
    }
}

/// Run every probe in parallel; the record keeps catalog order
pub fn collect_record(ctx: &Context) -> Record {
    Record::new(CATALOG.par_iter().map(|probe| probe.run(ctx)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::error::EzfetchError;
    use std::time::Duration;

    #[test]
    fn catalog_order_is_fixed() {
        let labels: Vec<_> = labels().collect();
        assert_eq!(
            labels,
            vec![
                "User", "Host", "OS", "Kernel", "Uptime", "Packages", "Shell", "Resolution", "DE", "WM",
                "Terminal", "CPU", "GPU", "Memory", "Swap", "Disk", "Local IP", "Battery", "Locale",
            ]
        );
    }

    #[test]
    fn empty_host_yields_unavailable_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::sandboxed(dir.path().join("nothing-here"));
        let record = collect_record(&ctx);

        assert_eq!(record.len(), CATALOG.len());
        for fact in record.iter() {
            assert_eq!(fact.value, Value::Unavailable, "{} should be unavailable", fact.label);
        }
    }

    #[test]
    fn failing_and_panicking_probes_are_unavailable() {
        let ctx = Context::sandboxed("/nonexistent");
        let failing = probe("Broken", |_| Err(EzfetchError::detection("nope")));
        let panicking = probe("Panicky", |_| panic!("probe bug"));

        assert_eq!(failing.run(&ctx), Fact::unavailable("Broken"));
        assert_eq!(panicking.run(&ctx), Fact::unavailable("Panicky"));
    }

    #[test]
    fn panic_flag_is_cleared_after_a_probe() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::sandboxed(dir.path().join("root"));
        let panicking = probe("Panicky", |_| panic!("probe bug"));

        assert_eq!(panicking.run(&ctx).value, Value::Unavailable);
        assert!(!IN_PROBE.with(Cell::get));
    }

    #[test]
    fn cached_probes_reuse_stored_values() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path().join("cache"), Duration::from_secs(60));
        cache.set("gpu", &Value::text("Cached GPU"));

        let ctx = Context::sandboxed(dir.path().join("root")).with_cache(cache);
        let gpu = find("gpu").unwrap();
        assert_eq!(gpu.run(&ctx).value, Value::text("Cached GPU"));
        assert!(gpu.try_run(&ctx).is_err());
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path().join("cache"), Duration::from_secs(60));
        let ctx = Context::sandboxed(dir.path().join("root")).with_cache(cache.clone());

        assert_eq!(find("Packages").unwrap().run(&ctx).value, Value::Unavailable);
        assert_eq!(cache.get::<Value>("packages"), None);
    }
}
