use crate::options::{NoValueMode, RenderOptions};
use crate::parser::{Symbol, SymbolType, SymbolValue, Tristate};
use crate::renderer::renderer::INDENT;

/// Helper for serializing symbol values as Nix expressions
pub struct ValueRenderer;

impl ValueRenderer {
    /// Quote a scalar payload so it round-trips through the Nix string
    /// parser. `"`, `\` and `$` are escaped; everything else is copied
    /// verbatim. Total over any payload, including the empty one.
    pub fn escape_string(&self, raw: &str) -> String {
        let mut escaped = String::with_capacity(raw.len() + 2);
        escaped.push('"');
        for c in raw.chars() {
            if matches!(c, '"' | '\\' | '$') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('"');
        escaped
    }

    pub fn tristate_token(&self, tri: Tristate) -> &'static str {
        match tri {
            Tristate::No => "no",
            Tristate::Module => "module",
            Tristate::Yes => "yes",
        }
    }

    /// Scalars outside the enumerated tokens are wrapped in the `freeform`
    /// marker so the consumer knows not to interpret them.
    pub fn freeform(&self, raw: &str) -> String {
        format!("freeform {}", self.escape_string(raw))
    }
}

/// Helper for section labels and their depth markers
pub struct SectionFramer;

impl SectionFramer {
    /// Comment marker prefixing label lines: the base indent plus one `#`
    /// per level below the root, so nesting is recoverable from the text.
    pub fn depth_marker(&self, depth: usize) -> String {
        format!("{}{}", INDENT, "#".repeat(depth))
    }

    /// Join the inherited breadcrumb with this section's own prompt.
    pub fn compose_label(&self, breadcrumb: Option<&str>, prompt: &str) -> String {
        match breadcrumb {
            Some(parent) => format!("{parent} - {prompt}"),
            None => prompt.to_string(),
        }
    }
}

/// Formatter for a single resolved symbol
pub struct SymbolFormatter;

impl SymbolFormatter {
    /// Produce the symbol's output lines, or nothing for symbols that are
    /// anonymous, of unknown type, or never overridden by the user. Pure in
    /// (symbol, prompt, options); written-marker bookkeeping belongs to the
    /// tree walk.
    pub fn render(&self, symbol: &Symbol, prompt: &str, options: &RenderOptions) -> String {
        let Some(name) = symbol.name.as_deref() else {
            return String::new();
        };
        if symbol.kind == SymbolType::Unknown || !symbol.user_defined() {
            return String::new();
        }

        let values = ValueRenderer;
        let value = match &symbol.value {
            SymbolValue::Tristate(tri) => {
                if *tri == Tristate::No {
                    match options.no_value_mode {
                        NoValueMode::Omit => return String::new(),
                        NoValueMode::Unset => {
                            return format!("{INDENT}# \"{name}\" is not set\n");
                        }
                        NoValueMode::Explicit => {}
                    }
                }
                values.tristate_token(*tri).to_string()
            }
            SymbolValue::Freeform(payload) => {
                if payload.is_empty() && !options.emit_empty_strings {
                    return String::new();
                }
                values.freeform(payload)
            }
        };

        let mut line = format!("{INDENT}\"{name}\" = {value};");
        if options.type_comments && !symbol.kind.is_tristate_like() {
            line.push_str(&format!(" # {}", symbol.kind.keyword()));
        }
        if options.breadcrumbs {
            line.push_str(&format!(" # {prompt}"));
        }
        line.push('\n');
        line
    }
}
