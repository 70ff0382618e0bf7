/// Log tags identify the subsystem that emitted a line
///
/// Each tag maps to a `--debug-<key>` flag through [`LogTag::to_debug_key`].

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Pipeline,
    Discovery,
    Volume,
    Api,
    Checkpoint,
    Output,
    Summary,
    Other(String),
}

impl LogTag {
    /// Key used by `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Pipeline => "pipeline".to_string(),
            LogTag::Discovery => "discovery".to_string(),
            LogTag::Volume => "volume".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Checkpoint => "checkpoint".to_string(),
            LogTag::Output => "output".to_string(),
            LogTag::Summary => "summary".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Uncolored label for file output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Other(s) => s.to_uppercase(),
            _ => self.to_debug_key().to_uppercase(),
        }
    }

    /// All built-in tags, used for help output
    pub fn all() -> &'static [LogTag] {
        &[
            LogTag::System,
            LogTag::Config,
            LogTag::Pipeline,
            LogTag::Discovery,
            LogTag::Volume,
            LogTag::Api,
            LogTag::Checkpoint,
            LogTag::Output,
            LogTag::Summary,
        ]
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
