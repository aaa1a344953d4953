use ezfetch::Config;

#[derive(clap::Parser, Debug)]
#[clap(version)]
/// A fast terminal system information tool with themes and ASCII logos.
pub struct Args {
    /// Logo to display instead of the detected one (see --list-logos)
    #[clap(short, long, value_name = "NAME")]
    pub logo: Option<String>,
    /// List all available logos, and exit
    #[clap(long)]
    pub list_logos: bool,
    /// Don't display a logo
    #[clap(long)]
    pub no_logo: bool,
    /// Path to a text file with custom ASCII art
    #[clap(long, value_name = "PATH")]
    pub custom_logo: Option<String>,
    /// Color theme (see --list-themes)
    #[clap(short, long, value_name = "NAME")]
    pub theme: Option<String>,
    /// List all available themes, and exit
    #[clap(long)]
    pub list_themes: bool,
    /// Path to a config file (TOML, or JSON when it ends in .json)
    #[clap(short, long, value_name = "PATH")]
    pub config: Option<String>,
    /// Print every collected field as JSON, unfiltered
    #[clap(long)]
    pub json: bool,
    /// Disable colors in output
    #[clap(long)]
    pub no_color: bool,
    /// Show only this field. Can be passed multiple times
    #[clap(short, long = "field", value_name = "NAME")]
    pub fields: Vec<String>,
    /// Remove cached probe results, and exit
    #[clap(long)]
    pub clear_cache: bool,
    /// Print the effective configuration as TOML, and exit
    #[clap(long)]
    pub print_config: bool,
    /// Make logging output more verbose. By default only warnings are printed,
    /// but this can be changed by setting the RUST_LOG variable (e.g. `RUST_LOG=debug ezfetch`)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Layer command-line choices over the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(logo) = &self.logo {
            config.set(&["display", "logo"], logo.as_str());
        }
        if self.no_logo {
            config.set(&["display", "show_logo"], false);
        }
        if let Some(path) = &self.custom_logo {
            config.set(&["display", "custom_logo"], path.as_str());
        }
        if let Some(theme) = &self.theme {
            config.set(&["theme", "name"], theme.as_str());
        }
        if self.no_color {
            config.set(&["display", "show_colors"], false);
        }
        if !self.fields.is_empty() {
            config.set(&["fields", "enabled"], self.fields.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "ezfetch", "-l", "debian", "--no-color", "-t", "nord", "-f", "OS", "--field", "CPU", "-vv",
        ]);
        let mut config = Config::defaults();
        args.apply_to(&mut config);

        assert_eq!(config.get_str(&["display", "logo"]).as_deref(), Some("debian"));
        assert_eq!(config.get_str(&["theme", "name"]).as_deref(), Some("nord"));
        assert!(!config.get_or(&["display", "show_colors"], true));
        assert!(config.get_or(&["display", "show_logo"], false));
        assert_eq!(config.get_or(&["fields", "enabled"], Vec::<String>::new()), vec!["OS", "CPU"]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let args = Args::parse_from(["ezfetch"]);
        let mut config = Config::defaults();
        args.apply_to(&mut config);
        assert_eq!(config.get_or(&["fields", "enabled"], Vec::<String>::new()).len(), 19);
        assert!(config.get_str(&["display", "logo"]).is_none());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Args::try_parse_from(["ezfetch", "--frobnicate"]).is_err());
    }
}
