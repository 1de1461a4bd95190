use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

use commander::selectors::FilterSpec;

#[derive(Parser, Debug)]
#[command(
    name = "commander",
    version,
    about = "Run one shell command in every configured project"
)]
pub struct Cli {
    /// The command to execute in each project (passed to `sh -c` verbatim)
    #[arg(short = 'X', long, value_parser = NonEmptyStringValueParser::new())]
    pub command: String,

    /// Path to the configuration file [default: commander.yaml]
    #[arg(short, long)]
    pub config: Option<String>,

    /// Project in which the command should not run (repeatable)
    #[arg(short, long = "exclude", value_name = "PROJECT")]
    pub exclude: Vec<String>,

    /// Only run in projects carrying at least one of these tags (repeatable)
    #[arg(long = "tag-search", value_name = "TAG")]
    pub tag_search: Vec<String>,

    /// Skip projects carrying any of these tags (repeatable)
    #[arg(long = "tag-exclude", value_name = "TAG")]
    pub tag_exclude: Vec<String>,

    /// Print the selected projects and exit without running the command
    #[arg(long)]
    pub list: bool,

    /// Also write log records to this file
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Cli {
    /// Filters for this run, built once from the parsed arguments
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec::new(
            self.exclude.iter().cloned(),
            self.tag_search.iter().cloned(),
            self.tag_exclude.iter().cloned(),
        )
    }
}
