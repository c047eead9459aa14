use clap::Args;

use crate::reorder::Slot;

const REORDER_HELP: &str = "\
A list of regular expressions matching test identifiers and one '*' to specify the order \
of unmatched tests. The tests will be reordered according to these patterns. If no \
arguments are passed, the default ordering is applied (unit tests, unmatched tests, \
integration tests, ui tests).
E.g. `--reorder '(^|.*/)(test_)?unit' '*' '(^|.*/)(test_)?db' '(^|.*/)(test_)?web'`.";

/// The `--reorder` command line option.
///
/// Flatten this into the host's own clap parser to offer reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
#[command(next_help_heading = "Tests reordering")]
pub struct ReorderArgs {
    #[arg(
        long = "reorder",
        value_name = "PATTERN",
        num_args = 0..,
        help = "Reorder tests by regular expressions matching their identifiers",
        long_help = REORDER_HELP,
    )]
    pub reorder: Option<Vec<String>>,
}

/// What the user asked for with `--reorder`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReorderOption {
    /// The option was not given, tests keep their discovery order.
    #[default]
    Absent,

    /// The option was given without patterns.
    Default,

    /// The option was given with patterns.
    Custom(Vec<Slot>),
}

impl ReorderOption {
    /// Translate the raw option values, turning `*` into [`Slot::Unmatched`].
    pub fn from_tokens<I, S>(tokens: Option<I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(tokens) = tokens else {
            return Self::Absent;
        };

        let slots: Vec<_> = tokens.into_iter().map(Slot::from_token).collect();
        match slots.is_empty() {
            true => Self::Default,
            false => Self::Custom(slots),
        }
    }
}

impl From<ReorderArgs> for ReorderOption {
    fn from(args: ReorderArgs) -> Self {
        Self::from_tokens(args.reorder)
    }
}
