use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may also be spelled with a single dash (`-url`, `-threads=8`).
const SINGLE_DASH_FLAGS: &[&str] = &[
    "url", "file", "silent", "threads", "force", "timeout", "json", "no-color", "debug", "verbose",
];

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version,
    about = "Probe 40x URLs with header and verb mutations to find access-control bypasses",
    long_about = None,
    after_help = "Reads URLs from stdin when piped, otherwise from -file or -url.\n\nEXAMPLE:\n  cat domains.txt | httpx -silent -mc 401,403 | bypass403 -silent"
)]
pub struct Cli {
    /// URL(s) to probe, comma separated (https://foo.bar/admin)
    #[arg(long)]
    pub url: Option<String>,

    /// File containing newline-delimited URLs
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Don't print the banner. Ideal in a command chain
    #[arg(long, default_value_t = false)]
    pub silent: bool,

    /// Requests in flight at once. Be gentle or get blocked
    #[arg(short = 't', long, value_parser = clap::value_parser!(u16).range(1..), default_value_t = 4)]
    pub threads: u16,

    /// Probe every URL regardless of its initial HTTP status code
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10_u64)]
    pub timeout: u64,

    /// Emit JSON Lines instead of colored text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Disable ANSI colors
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse_from(normalize_args(std::env::args_os()))
}

/// Rewrite `-flag` to `--flag` for the known long flags so Go-style
/// invocations keep working. Everything after `--` is left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let rewritten = match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    None
                }
                Some(s) if is_single_dash_long(s) => Some(format!("-{}", s)),
                _ => None,
            };
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split('=').next().unwrap_or(rest);
    SINGLE_DASH_FLAGS.contains(&name)
}
