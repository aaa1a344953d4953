//! Built-in ASCII logos, distro detection and custom logo files

use crate::config::Config;
use crate::host::Host;
use crate::utils::file::read_key_value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_LOGO: &str = "arch";

pub type Logo = Vec<String>;

const LOGOS: &[(&str, &str)] = &[
    ("alpine", include_str!("../ascii/alpine.txt")),
    ("arch", include_str!("../ascii/arch.txt")),
    ("debian", include_str!("../ascii/debian.txt")),
    ("fedora", include_str!("../ascii/fedora.txt")),
    ("gentoo", include_str!("../ascii/gentoo.txt")),
    ("kali", include_str!("../ascii/kali.txt")),
    ("mac", include_str!("../ascii/mac.txt")),
    ("manjaro", include_str!("../ascii/manjaro.txt")),
    ("mint", include_str!("../ascii/mint.txt")),
    ("popos", include_str!("../ascii/popos.txt")),
    ("redhat", include_str!("../ascii/redhat.txt")),
    ("ubuntu", include_str!("../ascii/ubuntu.txt")),
    ("windows", include_str!("../ascii/windows.txt")),
];

/// Alternative spellings, also accepted as os-release IDs
const ALIASES: &[(&str, &str)] = &[
    ("darwin", "mac"),
    ("linuxmint", "mint"),
    ("macos", "mac"),
    ("pop", "popos"),
    ("rhel", "redhat"),
];

/// Substrings searched in os-release when the ID is not a catalog name.
/// Order matters: "ubuntu" must win over "debian" on derivatives.
const RELEASE_HINTS: &[(&str, &str)] = &[
    ("arch", "arch"),
    ("ubuntu", "ubuntu"),
    ("debian", "debian"),
    ("mint", "mint"),
    ("fedora", "fedora"),
    ("manjaro", "manjaro"),
    ("popos", "popos"),
    ("pop", "popos"),
    ("alpine", "alpine"),
    ("gentoo", "gentoo"),
    ("kali", "kali"),
    ("red hat", "redhat"),
    ("redhat", "redhat"),
];

fn canonical(name: &str) -> Option<&'static str> {
    let key: String = name.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
    LOGOS
        .iter()
        .map(|(n, _)| *n)
        .find(|n| *n == key)
        .or_else(|| ALIASES.iter().find(|(alias, _)| *alias == key).map(|(_, target)| *target))
}

fn art(name: &str) -> &'static str {
    LOGOS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, art)| *art)
        .unwrap_or(LOGOS[1].1)
}

fn split_lines(text: &str) -> Logo {
    text.lines().map(str::to_string).collect()
}

/// Logo lines for `name`; unknown names get the default logo
pub fn lookup(name: &str) -> Logo {
    let resolved = canonical(name).unwrap_or_else(|| {
        debug!(name, "unknown logo, using default");
        DEFAULT_LOGO
    });
    split_lines(art(resolved))
}

pub fn is_known(name: &str) -> bool {
    canonical(name).is_some()
}

/// Every accepted logo name, aliases included
pub fn list_logos() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = LOGOS
        .iter()
        .map(|(n, _)| *n)
        .chain(ALIASES.iter().map(|(alias, _)| *alias))
        .collect();
    names.sort_unstable();
    names
}

/// Pick the catalog logo matching the running system
pub fn detect_distro(host: &Host) -> &'static str {
    if cfg!(target_os = "macos") {
        return "mac";
    }
    if cfg!(target_os = "windows") {
        return "windows";
    }

    let Ok(release) = host.read_to_string("/etc/os-release") else {
        return DEFAULT_LOGO;
    };
    if let Some(found) = read_key_value(&release, "ID").as_deref().and_then(canonical) {
        return found;
    }

    let release = release.to_lowercase();
    RELEASE_HINTS
        .iter()
        .find(|(hint, _)| release.contains(hint))
        .map(|(_, name)| *name)
        .unwrap_or(DEFAULT_LOGO)
}

/// Read a user-supplied logo; `None` when it cannot be read
pub fn load_custom(path: &str) -> Option<Logo> {
    let path = PathBuf::from(shellexpand::tilde(path).as_ref());
    match fs::read_to_string(&path) {
        Ok(text) => Some(split_lines(&text)),
        Err(err) => {
            debug!(path = %path.display(), %err, "custom logo unreadable");
            None
        }
    }
}

/// The logo to draw for `config`, or `None` when there should be none.
///
/// A custom logo file wins over `display.logo`, which wins over detection.
/// An unreadable custom logo means no logo at all.
pub fn from_config(config: &Config, host: &Host) -> Option<Logo> {
    if !config.get_or(&["display", "show_logo"], true) {
        return None;
    }
    if let Some(path) = config.get_str(&["display", "custom_logo"]) {
        return load_custom(&path);
    }
    let name = config
        .get_str(&["display", "logo"])
        .unwrap_or_else(|| detect_distro(host).to_string());
    Some(lookup(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_release(content: &str) -> (tempfile::TempDir, Host) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("etc")).unwrap();
        fs::write(dir.path().join("etc/os-release"), content).unwrap();
        let host = Host::sandboxed(dir.path());
        (dir, host)
    }

    #[test]
    fn every_logo_has_art() {
        for name in list_logos() {
            let logo = lookup(name);
            assert!(logo.len() > 3, "{} is too short", name);
        }
    }

    #[test]
    fn lookup_normalizes_names() {
        assert_eq!(lookup("Pop OS"), lookup("popos"));
        assert_eq!(lookup("macOS"), lookup("mac"));
        assert_eq!(lookup("RHEL"), lookup("redhat"));
        assert_eq!(lookup("templeos"), lookup("arch"));
        assert!(is_known("linuxmint"));
        assert!(!is_known("templeos"));
    }

    #[test]
    fn list_is_sorted_and_includes_aliases() {
        let names = list_logos();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"darwin"));
        assert!(names.contains(&"kali"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn detects_by_id_before_substring() {
        let (_dir, host) = host_with_release("NAME=\"Linux Mint\"\nID=linuxmint\nID_LIKE=\"ubuntu debian\"\n");
        assert_eq!(detect_distro(&host), "mint");

        let (_dir, host) = host_with_release("NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\n");
        assert_eq!(detect_distro(&host), "ubuntu");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn falls_back_to_substring_then_default() {
        let (_dir, host) = host_with_release("NAME=\"Red Hat Enterprise Linux\"\nID=\"rhel-like\"\n");
        assert_eq!(detect_distro(&host), "redhat");

        let (_dir, host) = host_with_release("NAME=\"NixOS\"\nID=nixos\n");
        assert_eq!(detect_distro(&host), "arch");

        let empty = tempfile::tempdir().unwrap();
        assert_eq!(detect_distro(&Host::sandboxed(empty.path())), "arch");
    }

    #[test]
    fn custom_logo_reads_lines_or_gives_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.txt");
        fs::write(&path, " /\\\n/  \\\n").unwrap();

        assert_eq!(load_custom(path.to_str().unwrap()), Some(vec![" /\\".to_string(), "/  \\".to_string()]));
        assert_eq!(load_custom(dir.path().join("missing.txt").to_str().unwrap()), None);
    }

    #[test]
    fn config_picks_custom_then_named_logo() {
        let dir = tempfile::tempdir().unwrap();
        let host = Host::sandboxed(dir.path());
        let mut config = Config::defaults();

        config.set(&["display", "logo"], "kali");
        assert_eq!(from_config(&config, &host), Some(lookup("kali")));

        let path = dir.path().join("mine.txt");
        fs::write(&path, "<>\n").unwrap();
        config.set(&["display", "custom_logo"], path.to_str().unwrap());
        assert_eq!(from_config(&config, &host), Some(vec!["<>".to_string()]));

        config.set(&["display", "custom_logo"], dir.path().join("gone.txt").to_str().unwrap());
        assert_eq!(from_config(&config, &host), None);

        config.set(&["display", "show_logo"], false);
        config.set(&["display", "custom_logo"], "");
        assert_eq!(from_config(&config, &host), None);
    }
}
