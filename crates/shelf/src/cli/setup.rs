use clap::Parser;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug, Default)]
#[command(name = "shelf", bin_name = "shelf", version = get_version())]
#[command(
    about = "Browse a folder of Markdown notes as grouped cards",
    long_about = None
)]
pub struct Cli {
    /// Vault directory (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Group by a property, e.g. note.status or file.folder
    #[arg(long, value_name = "ID", help_heading = "Grouping")]
    pub group_by: Option<String>,

    /// Second grouping level inside --group-by
    #[arg(long, value_name = "ID", help_heading = "Grouping")]
    pub sub_group_by: Option<String>,

    /// Use the folder tree as the outermost grouping
    #[arg(long, help_heading = "Grouping")]
    pub by_folder: bool,

    /// Collapse a group by path (done, done:high, folder::done); repeatable
    #[arg(long, value_name = "PATH", help_heading = "Grouping")]
    pub collapse: Vec<String>,

    /// Number of preview lines (0 hides the preview)
    #[arg(long, value_name = "N", help_heading = "Cards")]
    pub preview_lines: Option<usize>,

    /// Property used for the preview text
    #[arg(long, value_name = "ID", help_heading = "Cards")]
    pub preview_property: Option<String>,

    /// Show a subtitle line (the parent folder unless --subtitle-property is set)
    #[arg(long, help_heading = "Cards")]
    pub subtitle: bool,

    /// Property used for the subtitle; implies --subtitle
    #[arg(long, value_name = "ID", help_heading = "Cards")]
    pub subtitle_property: Option<String>,

    /// Hide thumbnails
    #[arg(long, help_heading = "Cards")]
    pub no_thumbnails: bool,

    /// Hide tags
    #[arg(long, help_heading = "Cards")]
    pub no_tags: bool,

    /// Hide the footer and property list
    #[arg(long, help_heading = "Cards")]
    pub no_metadata: bool,

    /// Hide member counts on group headers
    #[arg(long, help_heading = "Cards")]
    pub no_counts: bool,

    /// Property to list on each card; repeatable, shown in order
    #[arg(long = "property", value_name = "ID", help_heading = "Cards")]
    pub properties: Vec<String>,

    /// Print the render tree as JSON
    #[arg(long, help_heading = "Output")]
    pub json: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, help_heading = "Output")]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
