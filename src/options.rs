//! Resolved rendering options. Flag and environment parsing lives in the
//! binary; the renderer only ever sees this struct.

/// How a bool/tristate symbol resolved to `n` is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoValueMode {
    /// Omit the symbol entirely.
    #[default]
    Omit,
    /// Emit a `# "NAME" is not set` comment.
    Unset,
    /// Emit an explicit `"NAME" = no;` assignment.
    Explicit,
}

impl NoValueMode {
    /// Parse the `none|unset|no` payload accepted by `CONF2NIX_OUTPUT_N`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("none") {
            Some(NoValueMode::Omit)
        } else if raw.eq_ignore_ascii_case("unset") {
            Some(NoValueMode::Unset)
        } else if raw.eq_ignore_ascii_case("no") {
            Some(NoValueMode::Explicit)
        } else {
            None
        }
    }
}

/// Immutable option snapshot for one render invocation.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub no_value_mode: NoValueMode,
    /// Skip menus whose visibility predicate currently fails.
    pub skip_invisible: bool,
    /// Report user-overridden symbols that never made it into the output.
    pub warn_unused: bool,
    /// Annotate entries and section labels with prompt breadcrumbs.
    pub breadcrumbs: bool,
    /// Annotate freeform entries with the symbol's type, since string, hex
    /// and int all serialize to the same quoted literal.
    pub type_comments: bool,
    /// Emit freeform entries even when the payload is empty. Off by default
    /// because the nixpkgs config system mishandles `freeform ""`.
    pub emit_empty_strings: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            no_value_mode: NoValueMode::Omit,
            skip_invisible: true,
            warn_unused: true,
            breadcrumbs: false,
            type_comments: false,
            emit_empty_strings: false,
        }
    }
}
