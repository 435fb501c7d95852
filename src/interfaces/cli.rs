use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lb")]
#[command(about = "Language Translator: translate text from the command line.")]
#[command(version)]
pub struct Cli {
    /// Target language code (e.g. hi, es, zh-CN)
    #[arg(short = 't', long = "to")]
    pub target: Option<String>,

    /// Source language code
    #[arg(short = 'f', long = "from")]
    pub source: Option<String>,

    /// Read the translation aloud
    #[arg(short = 's', long)]
    pub speak: bool,

    /// Don't record this translation in history
    #[arg(long)]
    pub no_history: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// List supported languages
    #[arg(short = 'l', long)]
    pub languages: bool,

    /// Show translation history
    #[arg(long)]
    pub history: bool,

    /// Delete one history item by id
    #[arg(long, value_name = "ID")]
    pub delete: Option<i64>,

    /// Delete all history
    #[arg(long)]
    pub clear_history: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Text to translate
    #[arg(num_args = 1..)]
    pub text: Vec<String>,
}
