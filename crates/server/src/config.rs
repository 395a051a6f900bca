//! Command-line and environment configuration

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use template::{Delimiters, TemplateOptions};

/// Default template location, relative to the deployment root
pub const DEFAULT_TEMPLATE: &str = "templates/fieldtrip.docx";

/// Command-line arguments for the notice server
///
/// Every option can also come from the environment (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(name = "notice-server")]
#[command(about = "Field-trip notice generator: fills a DOCX template from form data")]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "NOTICE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Template file, relative paths resolve against the working directory
    #[arg(long, env = "NOTICE_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,

    /// Tag delimiter convention the template was authored with
    #[arg(long, env = "NOTICE_DELIMITERS", value_enum, default_value_t = DelimiterStyle::Double)]
    pub delimiters: DelimiterStyle,

    /// Directory of static files (the form UI) served at `/`
    #[arg(long, env = "NOTICE_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Tag delimiter convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DelimiterStyle {
    /// `{{name}}`
    Double,
    /// `{name}`
    Single,
}

impl DelimiterStyle {
    pub fn delimiters(self) -> Delimiters {
        match self {
            DelimiterStyle::Double => Delimiters::double_brace(),
            DelimiterStyle::Single => Delimiters::single_brace(),
        }
    }
}

impl Args {
    /// Renderer options for this deployment
    ///
    /// Paragraph scope and line breaks are always on.
    pub fn template_options(&self) -> TemplateOptions {
        TemplateOptions {
            delimiters: self.delimiters.delimiters(),
            ..TemplateOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["notice-server"]).unwrap();
        assert_eq!(args.port, 3000);
        assert_eq!(args.template, PathBuf::from(DEFAULT_TEMPLATE));
        assert_eq!(args.delimiters, DelimiterStyle::Double);
        assert_eq!(args.static_dir, None);
        assert_eq!(args.template_options(), TemplateOptions::default());
    }

    #[test]
    fn test_single_brace_option() {
        let args =
            Args::try_parse_from(["notice-server", "--delimiters", "single", "-p", "8080"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(
            args.template_options().delimiters,
            Delimiters::single_brace()
        );
    }

    #[test]
    fn test_rejects_unknown_delimiters() {
        assert!(Args::try_parse_from(["notice-server", "--delimiters", "angle"]).is_err());
    }
}
