use std::path::PathBuf;
use std::process::ExitStatus;

pub type ProvisionResult<T> = Result<T, ProvisionError>;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("command failed: {command}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("the domain was blank")]
    BlankDomain,

    #[error("{} cannot be blank", capitalize(.0))]
    BlankAnswer(&'static str),

    #[error("'{0}' is not a domain name: it must not contain path separators")]
    DomainNotAName(String),

    #[error(
        "please do not include 'www.' as part of the domain name, \
         it is a special case and must be configured differently"
    )]
    WwwPrefix,

    #[error("input closed before the '{0}' question was answered")]
    InputClosed(String),

    #[error("domain configuration discarded")]
    Discarded,

    #[error("couldn't write the configuration to {}", path.display())]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't copy the default website at ({})", skeleton.display())]
    CopySkeleton {
        skeleton: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("DNS error: {0}")]
    DnsError(String),

    #[error("environment variable missing: {0}")]
    EnvMissing(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
