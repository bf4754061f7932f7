pub(crate) const OPTIONS_END: &str = "--";
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const EQUALS: &str = "=";

pub(crate) const UNDERLINE_CHAR: char = '~';
pub(crate) const END_MARKER: char = '^';

pub(crate) const EXTRA_ARGUMENTS: &str = "extra command line arguments provided";
pub(crate) const EXPECTED_VALUE: &str = "expected a value";
pub(crate) const EXPECTED_COMMAND: &str = "expected a command";
pub(crate) const EXPECTED_KEYWORD: &str = "expected a keyword argument";

// Used when rendering help without a terminal (ex: output is piped).
pub(crate) const FALLBACK_TERMINAL_WIDTH: usize = 80;
