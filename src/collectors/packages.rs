//! Installed package counts across package managers

use crate::context::Context;
use crate::data::Value;
use crate::error::{EzfetchError, Result};
use crate::host::Host;
use tracing::trace;

/// Supported package managers, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Dpkg,
    Pacman,
    Rpm,
    Xbps,
    Apk,
    Portage,
    Nix,
    Flatpak,
    Snap,
}

impl PackageManager {
    pub const ALL: [PackageManager; 9] = [
        PackageManager::Dpkg,
        PackageManager::Pacman,
        PackageManager::Rpm,
        PackageManager::Xbps,
        PackageManager::Apk,
        PackageManager::Portage,
        PackageManager::Nix,
        PackageManager::Flatpak,
        PackageManager::Snap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PackageManager::Dpkg => "dpkg",
            PackageManager::Pacman => "pacman",
            PackageManager::Rpm => "rpm",
            PackageManager::Xbps => "xbps",
            PackageManager::Apk => "apk",
            PackageManager::Portage => "portage",
            PackageManager::Nix => "nix",
            PackageManager::Flatpak => "flatpak",
            PackageManager::Snap => "snap",
        }
    }

    /// Number of installed packages; errors when the manager is absent
    pub fn count(self, host: &Host) -> Result<usize> {
        match self {
            PackageManager::Dpkg => {
                let status = host.read_to_string("/var/lib/dpkg/status")?;
                Ok(status
                    .lines()
                    .filter(|line| *line == "Status: install ok installed")
                    .count())
            }
            PackageManager::Pacman => host.count_dirs("/var/lib/pacman/local"),
            PackageManager::Rpm => {
                if !host.exists("/var/lib/rpm") {
                    return Err(EzfetchError::detection("no rpm database"));
                }
                count_lines(&host.run("rpm", &["-qa"])?)
            }
            PackageManager::Xbps => {
                if !host.exists("/var/db/xbps") {
                    return Err(EzfetchError::detection("no xbps database"));
                }
                count_lines(&host.run("xbps-query", &["-l"])?)
            }
            PackageManager::Apk => {
                let installed = host.read_to_string("/lib/apk/db/installed")?;
                Ok(installed.lines().filter(|line| line.starts_with("P:")).count())
            }
            PackageManager::Portage => {
                let mut count = 0;
                for category in host.read_dir_names("/var/db/pkg")? {
                    count += host.count_dirs(&format!("/var/db/pkg/{}", category)).unwrap_or(0);
                }
                Ok(count)
            }
            PackageManager::Nix => {
                if !host.exists("/nix/store") {
                    return Err(EzfetchError::detection("no nix store"));
                }
                count_lines(&host.run("nix-store", &["--query", "--requisites", "/run/current-system/sw"])?)
            }
            PackageManager::Flatpak => host.count_dirs("/var/lib/flatpak/app"),
            PackageManager::Snap => Ok(host
                .read_dir_names("/var/lib/snapd/snaps")?
                .iter()
                .filter(|name| name.ends_with(".snap"))
                .count()),
        }
    }
}

fn count_lines(output: &str) -> Result<usize> {
    Ok(output.lines().filter(|line| !line.trim().is_empty()).count())
}

/// Non-zero counts, e.g. `[(Dpkg, 1843), (Flatpak, 12)]`
pub fn package_counts(host: &Host) -> Vec<(PackageManager, usize)> {
    PackageManager::ALL
        .iter()
        .filter_map(|&manager| match manager.count(host) {
            Ok(0) => None,
            Ok(count) => Some((manager, count)),
            Err(err) => {
                trace!(manager = manager.name(), %err, "package manager not counted");
                None
            }
        })
        .collect()
}

/// "1843 (dpkg), 12 (flatpak)"
pub fn packages(ctx: &Context) -> Result<Value> {
    let counts = package_counts(&ctx.host);
    if counts.is_empty() {
        return Err(EzfetchError::detection("no package manager found"));
    }
    Ok(Value::text(
        counts
            .iter()
            .map(|(manager, count)| format!("{} ({})", count, manager.name()))
            .collect::<Vec<_>>()
            .join(", "),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DPKG_STATUS: &str = "Package: bash\nStatus: install ok installed\nVersion: 5.2\n\n\
                               Package: old-lib\nStatus: deinstall ok config-files\n\n\
                               Package: coreutils\nStatus: install ok installed\n";

    #[test]
    fn counts_dpkg_and_flatpak() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("var/lib/dpkg")).unwrap();
        fs::write(dir.path().join("var/lib/dpkg/status"), DPKG_STATUS).unwrap();
        for app in ["org.mozilla.firefox", "com.spotify.Client"] {
            fs::create_dir_all(dir.path().join("var/lib/flatpak/app").join(app)).unwrap();
        }

        let ctx = Context::sandboxed(dir.path());
        assert_eq!(packages(&ctx).unwrap(), Value::text("2 (dpkg), 2 (flatpak)"));
    }

    #[test]
    fn counts_pacman_portage_apk_and_snap() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for pkg in ["bash-5.2-1", "linux-6.9-1", "zsh-5.9-5"] {
            fs::create_dir_all(root.join("var/lib/pacman/local").join(pkg)).unwrap();
        }
        fs::write(root.join("var/lib/pacman/local/ALPM_DB_VERSION"), "9\n").unwrap();
        for pkg in ["sys-apps/portage-3.0", "sys-apps/sed-4.9", "dev-lang/rust-1.79"] {
            fs::create_dir_all(root.join("var/db/pkg").join(pkg)).unwrap();
        }
        fs::create_dir_all(root.join("lib/apk/db")).unwrap();
        fs::write(root.join("lib/apk/db/installed"), "C:Q1abc\nP:musl\nV:1.2\n\nP:busybox\n").unwrap();
        fs::create_dir_all(root.join("var/lib/snapd/snaps/partial")).unwrap();
        fs::write(root.join("var/lib/snapd/snaps/core22_1380.snap"), "").unwrap();

        let counts = package_counts(&Host::sandboxed(root));
        assert_eq!(
            counts,
            vec![
                (PackageManager::Pacman, 3),
                (PackageManager::Apk, 2),
                (PackageManager::Portage, 3),
                (PackageManager::Snap, 1),
            ]
        );
    }

    #[test]
    fn command_backed_managers_need_their_database() {
        let host = Host::sandboxed("/nonexistent");
        assert!(PackageManager::Rpm.count(&host).is_err());
        assert!(PackageManager::Nix.count(&host).is_err());
        assert!(packages(&Context::sandboxed("/nonexistent")).is_err());
    }
}
