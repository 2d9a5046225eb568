use serde::Deserialize;

/// Index of a symbol in the declaration-ordered symbol universe.
pub type SymbolId = usize;

// Raw dump structures, deserialized one-to-one from the JSON exported by the
// Kconfig evaluator.

#[derive(Debug, Deserialize)]
pub struct ConfigDump {
    #[serde(default)]
    #[allow(dead_code)] // Preserved to match the evaluator's dump format
    pub title: Option<String>,
    #[serde(default)]
    pub symbols: Vec<SymbolDump>,
    #[serde(default)]
    pub menus: Vec<MenuDump>,
}

#[derive(Debug, Deserialize)]
pub struct SymbolDump {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: SymbolType,
    /// Raw user-override payload, validated against `kind` during parsing.
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub default: Option<DefaultDump>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DefaultDump {
    Reference { symbol: String },
    Literal(String),
}

#[derive(Debug, Deserialize)]
pub struct MenuDump {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    /// Conjunction of `"NAME"` / `"!NAME"` visibility atoms.
    #[serde(default)]
    pub visible_if: Vec<String>,
    #[serde(default)]
    pub children: Vec<MenuDump>,
}

// Parsed data structures - the model the evaluator and renderer operate on.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    Bool,
    Tristate,
    String,
    Hex,
    Int,
    Unknown,
}

impl SymbolType {
    /// Whether values of this type are the three fixed tokens rather than
    /// escaped freeform literals.
    pub fn is_tristate_like(self) -> bool {
        matches!(self, SymbolType::Bool | SymbolType::Tristate)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SymbolType::Bool => "bool",
            SymbolType::Tristate => "tristate",
            SymbolType::String => "string",
            SymbolType::Hex => "hex",
            SymbolType::Int => "int",
            SymbolType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tristate {
    No,
    Module,
    Yes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolValue {
    Tristate(Tristate),
    Freeform(String),
}

impl SymbolValue {
    /// The value a symbol resolves to when neither a user override nor a
    /// default applies.
    pub fn zero(kind: SymbolType) -> Self {
        if kind.is_tristate_like() {
            SymbolValue::Tristate(Tristate::No)
        } else {
            SymbolValue::Freeform(String::new())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolDefault {
    Value(SymbolValue),
    Reference(SymbolId),
}

#[derive(Debug)]
pub struct Symbol {
    pub name: Option<String>,
    pub kind: SymbolType,
    /// Validated user override; only overridden symbols are ever rendered.
    pub user: Option<SymbolValue>,
    pub default: Option<SymbolDefault>,
    /// Current resolved value, recomputed by `Evaluator::stabilize`.
    pub value: SymbolValue,
}

impl Symbol {
    pub fn user_defined(&self) -> bool {
        self.user.is_some()
    }
}

/// One atom of a menu's visibility conjunction. A dangling reference keeps
/// `symbol` as `None` and evaluates as if the named symbol were `n`.
#[derive(Debug, Clone, Copy)]
pub struct Condition {
    pub symbol: Option<SymbolId>,
    pub negated: bool,
}

#[derive(Debug)]
pub struct Menu {
    pub prompt: Option<String>,
    pub symbol: Option<SymbolId>,
    pub visible_if: Vec<Condition>,
    pub children: Vec<Menu>,
}

/// Fully parsed configuration: the symbol universe in declaration order and
/// the top-level menu forest.
#[derive(Debug)]
pub struct ParsedConfig {
    pub symbols: Vec<Symbol>,
    pub menus: Vec<Menu>,
}
