use crate::config::HarvestConfig;
use crate::policy::Category;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "repoharvester",
    version,
    about = "Harvest the text files of a repository into one document",
    long_about = "repoharvester clones a git repository (or reads a local directory) and writes \
                  every selected text file into output/<name>_all_files.txt, with files that \
                  are not valid UTF-8 listed in output/skipped_files.txt."
)]
pub struct Cli {
    /// Local directory or git URL (https://, ssh://, file://, git@host:path)
    #[arg(required_unless_present_any = ["list_categories", "init_config"])]
    pub source: Option<String>,

    /// Remove comments from files with a known comment syntax
    #[arg(short, long = "remove-comments", alias = "remove")]
    pub remove_comments: bool,

    /// Maximum file size in KB [default: 1000]
    #[arg(short, long = "max-size", value_name = "KB")]
    pub max_size: Option<f64>,

    /// Folder names to skip (comma-separated or repeated)
    #[arg(short, long, value_name = "NAME", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Extension categories to exclude (comma-separated or repeated)
    #[arg(short, long, value_enum, value_name = "CATEGORY", value_delimiter = ',')]
    pub skip: Vec<Category>,

    /// Exclude every built-in extension category
    #[arg(long)]
    pub skip_all: bool,

    /// Categories to keep even when selected elsewhere
    #[arg(long, value_enum, value_name = "CATEGORY", value_delimiter = ',')]
    pub no_skip: Vec<Category>,

    /// Extra extension tokens to exclude (comma-separated or repeated)
    #[arg(short = 'x', long = "skip-ext", value_name = "TOKEN", value_delimiter = ',')]
    pub skip_ext: Vec<String>,

    /// Output directory [default: output]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Repository label used in the header and output file name
    #[arg(short, long)]
    pub label: Option<String>,

    /// Branch or tag to clone
    #[arg(short = 'b', long = "branch", value_name = "REF")]
    pub git_ref: Option<String>,

    /// Authentication token for HTTPS GitHub clones
    #[arg(long, env = crate::remote::TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// Configuration file (YAML, JSON or TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comment pattern table replacing the built-in one (YAML)
    #[arg(long, value_name = "FILE")]
    pub comment_patterns: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Print the extension categories and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Write a configuration template and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = ".")]
    pub init_config: Option<PathBuf>,

    /// CI mode: no progress bar
    #[arg(long)]
    pub ci: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Category names selected on the command line, after `--skip-all` and
    /// `--no-skip` are applied on top of `base`.
    fn categories(&self, base: Vec<String>) -> Vec<String> {
        let mut names = base;
        if self.skip_all {
            names.extend(Category::ALL.iter().map(|c| c.as_str().to_string()));
        }
        names.extend(self.skip.iter().map(|c| c.as_str().to_string()));
        names.retain(|name| !self.no_skip.iter().any(|c| c.as_str() == name));

        let mut seen = std::collections::HashSet::new();
        names.retain(|name| seen.insert(name.clone()));
        names
    }

    /// Overlay command-line options on a loaded configuration.
    ///
    /// - Scalar options: CLI takes precedence when given
    /// - Boolean flags: CLI OR config
    /// - Lists: config first, then CLI
    pub fn apply(&self, config: HarvestConfig) -> HarvestConfig {
        let skip_categories = self.categories(config.skip_categories.clone());

        let mut excluded_folders = config.excluded_folders;
        excluded_folders.extend(self.exclude.iter().cloned());

        let mut skip_extensions = config.skip_extensions;
        // "-x md," splits into a trailing empty token
        skip_extensions.extend(self.skip_ext.iter().filter(|t| !t.is_empty()).cloned());

        HarvestConfig {
            repo_label: self.label.clone().or(config.repo_label),
            max_size_kb: self.max_size.unwrap_or(config.max_size_kb),
            excluded_folders,
            skip_categories,
            skip_extensions,
            strip_comments: self.remove_comments || config.strip_comments,
            output_dir: self.output.clone().unwrap_or(config.output_dir),
            git_ref: self.git_ref.clone().or(config.git_ref),
            comment_patterns: self.comment_patterns.clone().or(config.comment_patterns),
            extra_categories: config.extra_categories,
        }
    }
}
