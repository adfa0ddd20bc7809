/// Identifies which setting an [`OptionSpec`] fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    Domain,
    AllowWww,
    Wordpress,
}

impl OptionKey {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::AllowWww => "allow_www",
            Self::Wordpress => "wordpress",
        }
    }
}

/// The kind of answer a question expects, with its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Free text. Has no default: a blank answer is rejected.
    Text,
    /// `y`/`n`, falling back to the default for anything else.
    Flag { default: bool },
}

/// A collected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Flag(bool),
}

/// One question asked by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub key: OptionKey,
    pub prompt: &'static str,
    pub kind: OptionKind,
}

// Ordered so that conflicting answers are hard to give: the
// domain decides whether the www question matters at all.
const SCHEMA: [OptionSpec; 3] = [
    OptionSpec {
        key: OptionKey::Domain,
        prompt: "FQDN (domain name)",
        kind: OptionKind::Text,
    },
    OptionSpec {
        key: OptionKey::AllowWww,
        prompt: "Allow www.? [Y/N] Default=Y",
        kind: OptionKind::Flag { default: true },
    },
    OptionSpec {
        key: OptionKey::Wordpress,
        prompt: "Wordpress Site? [Y/N] Default=N",
        kind: OptionKind::Flag { default: false },
    },
];

/// The questions asked for every new site, in order.
#[must_use]
pub const fn schema() -> &'static [OptionSpec] {
    &SCHEMA
}
