//! Command-line interface definitions for the eBooxly digest.
//!
//! Every option can also be supplied through an environment variable so the
//! generator can run unattended from a CI job.

use crate::config::{CatalogStrategy, DEFAULT_DEPLOY_COMMAND, DEFAULT_OUTPUT_FILE};
use crate::merge::MergePolicy;
use clap::Parser;

/// Command-line arguments for the eBooxly digest generator.
///
/// # Examples
///
/// ```sh
/// # Build public/index.html from the JSON catalog, books and news interleaved
/// ebooxly_digest
///
/// # Scrape the HTML pages instead and put two news items on top
/// ebooxly_digest --catalog pages --merge-policy sandwich
///
/// # Write and deploy
/// ebooxly_digest -o public/index.html --deploy
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the generated HTML page
    #[arg(short, long, env = "EBOOXLY_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// How catalog books and news items are combined
    #[arg(long, env = "EBOOXLY_MERGE_POLICY", value_enum, default_value_t = MergePolicy::Interleave)]
    pub merge_policy: MergePolicy,

    /// Where catalog books are read from
    #[arg(long, env = "EBOOXLY_CATALOG", value_enum, default_value_t = CatalogStrategy::Api)]
    pub catalog: CatalogStrategy,

    /// Run the hosting deploy command after writing the page
    #[arg(long, env = "EBOOXLY_DEPLOY")]
    pub deploy: bool,

    /// Deploy command line. Split on whitespace and run without a shell, so
    /// quoting is not interpreted and no argument may contain a space
    #[arg(long, env = "EBOOXLY_DEPLOY_COMMAND", default_value = DEFAULT_DEPLOY_COMMAND)]
    pub deploy_command: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ebooxly_digest"]);

        assert_eq!(cli.output, "public/index.html");
        assert_eq!(cli.merge_policy, MergePolicy::Interleave);
        assert_eq!(cli.catalog, CatalogStrategy::Api);
        assert!(!cli.deploy);
    }

    #[test]
    fn test_cli_explicit_choices() {
        let cli = Cli::parse_from([
            "ebooxly_digest",
            "-o",
            "/tmp/site/index.html",
            "--merge-policy",
            "sandwich",
            "--catalog",
            "pages",
            "--deploy",
        ]);

        assert_eq!(cli.output, "/tmp/site/index.html");
        assert_eq!(cli.merge_policy, MergePolicy::Sandwich);
        assert_eq!(cli.catalog, CatalogStrategy::Pages);
        assert!(cli.deploy);
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        let res = Cli::try_parse_from(["ebooxly_digest", "--merge-policy", "shuffle"]);
        assert!(res.is_err());
    }
}
