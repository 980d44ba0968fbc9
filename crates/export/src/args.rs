//! Command-line options for the `asset-export` binary.

use assetdesk_core::export::{DEFAULT_EXPORT_DISK, DEFAULT_EXPORT_NAME};

/// Parsed `asset-export` options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    /// Output base name (`--output`).
    pub output: String,
    /// Target disk name (`--disk`).
    pub disk: String,
}

impl ExportArgs {
    /// Defaults from `EXPORT_OUTPUT` / `EXPORT_DISK`, falling back to
    /// `assets` / `cloud`.
    pub fn from_env_defaults() -> Self {
        Self {
            output: std::env::var("EXPORT_OUTPUT").unwrap_or_else(|_| DEFAULT_EXPORT_NAME.into()),
            disk: std::env::var("EXPORT_DISK").unwrap_or_else(|_| DEFAULT_EXPORT_DISK.into()),
        }
    }

    /// Apply `--output <name>` / `--disk <name>` (or `--flag=value`) over
    /// `self`. `args` excludes the program name.
    pub fn parse<I>(mut self, args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };

            let slot = match flag.as_str() {
                "--output" => &mut self.output,
                "--disk" => &mut self.disk,
                "-h" | "--help" => return Err(usage()),
                other => return Err(format!("Unknown argument '{other}'\n\n{}", usage())),
            };

            let value = match inline {
                Some(value) => value,
                None => args
                    .next()
                    .ok_or_else(|| format!("Missing value for {flag}\n\n{}", usage()))?,
            };
            *slot = value;
        }
        Ok(self)
    }
}

fn usage() -> String {
    "Usage: asset-export [--output <name>] [--disk <name>]".to_string()
}
