use std::net::Ipv4Addr;
use std::path::PathBuf;
use argh::FromArgs;

fn default_config_path () -> PathBuf {
    PathBuf::from("./lookup_config.toml")
}

#[derive(Debug, FromArgs)]
#[argh(description = "resolve a domain name to an IPv4 address by talking DNS directly")]
pub struct CliArgs {
    #[argh(positional, description = "domain name to resolve")]
    pub domain: String,

    #[argh(
        option,
        description = "config file path, default: './lookup_config.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,

    #[argh(
        option,
        description = "recursive resolver to ask instead of walking from the root"
    )]
    pub upstream: Option<Ipv4Addr>,

    #[argh(switch, short = 'v', description = "log each nameserver queried to stderr")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_domain_only() {
        let args = CliArgs::from_args(&["lookup"], &["example.com"]).unwrap();
        assert_eq!(args.domain, "example.com");
        assert_eq!(args.config, default_config_path());
        assert_eq!(args.upstream, None);
        assert!(!args.verbose);
    }

    #[test]
    fn verbose_switch() {
        let args = CliArgs::from_args(&["lookup"], &["-v", "example.com"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn upstream_and_config() {
        let args = CliArgs::from_args(
            &["lookup"],
            &["--upstream", "1.1.1.1", "--config", "/etc/lookup.toml", "example.com"],
        )
        .unwrap();
        assert_eq!(args.upstream, Some(Ipv4Addr::new(1, 1, 1, 1)));
        assert_eq!(args.config, PathBuf::from("/etc/lookup.toml"));
    }

    #[test]
    fn domain_is_required() {
        assert!(CliArgs::from_args(&["lookup"], &[]).is_err());
    }
}
