use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::parser::types::*;

/// Read and parse an evaluator dump from disk. An unreadable or syntactically
/// invalid file is fatal; problems inside individual elements only degrade.
pub fn load_config(path: &Path) -> Result<ParsedConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<ParsedConfig> {
    let dump: ConfigDump =
        serde_json::from_str(raw).context("configuration dump is not valid JSON")?;
    Ok(ConfigParser::new(&dump).parse())
}

// Parser for converting the raw dump to the typed model
pub struct ConfigParser<'a> {
    dump: &'a ConfigDump,
    by_name: HashMap<&'a str, SymbolId>,
}

impl<'a> ConfigParser<'a> {
    pub fn new(dump: &'a ConfigDump) -> Self {
        let mut by_name = HashMap::new();
        for (id, symbol) in dump.symbols.iter().enumerate() {
            let Some(name) = symbol.name.as_deref() else {
                continue;
            };
            match by_name.entry(name) {
                Entry::Vacant(entry) => {
                    entry.insert(id);
                }
                Entry::Occupied(_) => {
                    warn!("duplicate symbol '{name}', keeping the first definition");
                }
            }
        }
        Self { dump, by_name }
    }

    pub fn parse(&self) -> ParsedConfig {
        let symbols = self
            .dump
            .symbols
            .iter()
            .map(|symbol| self.parse_symbol(symbol))
            .collect();
        let menus = self
            .dump
            .menus
            .iter()
            .map(|menu| self.parse_menu(menu))
            .collect();
        ParsedConfig { symbols, menus }
    }

    fn parse_symbol(&self, dump: &SymbolDump) -> Symbol {
        let user = dump
            .user
            .as_deref()
            .and_then(|raw| self.parse_value(dump, raw, "user value"));
        let default = dump
            .default
            .as_ref()
            .and_then(|default| self.parse_default(dump, default));
        Symbol {
            name: dump.name.clone(),
            kind: dump.kind,
            user,
            default,
            value: SymbolValue::zero(dump.kind),
        }
    }

    /// Validate a raw payload against the symbol's type. Invalid payloads are
    /// reported and dropped rather than aborting the whole dump.
    fn parse_value(&self, dump: &SymbolDump, raw: &str, what: &str) -> Option<SymbolValue> {
        let name = dump.name.as_deref().unwrap_or("<anonymous>");
        match dump.kind {
            SymbolType::Bool => match raw {
                "n" => Some(SymbolValue::Tristate(Tristate::No)),
                "y" => Some(SymbolValue::Tristate(Tristate::Yes)),
                _ => {
                    warn!("invalid {what} '{raw}' for bool symbol '{name}'");
                    None
                }
            },
            SymbolType::Tristate => match raw {
                "n" => Some(SymbolValue::Tristate(Tristate::No)),
                "m" => Some(SymbolValue::Tristate(Tristate::Module)),
                "y" => Some(SymbolValue::Tristate(Tristate::Yes)),
                _ => {
                    warn!("invalid {what} '{raw}' for tristate symbol '{name}'");
                    None
                }
            },
            SymbolType::String => Some(SymbolValue::Freeform(raw.to_string())),
            SymbolType::Hex => {
                if validate_hex(raw) {
                    Some(SymbolValue::Freeform(raw.to_string()))
                } else {
                    warn!("invalid {what} '{raw}' for hex symbol '{name}'");
                    None
                }
            }
            SymbolType::Int => {
                if validate_int(raw) {
                    Some(SymbolValue::Freeform(raw.to_string()))
                } else {
                    warn!("invalid {what} '{raw}' for int symbol '{name}'");
                    None
                }
            }
            // unknown-typed symbols are never rendered, but their override
            // still participates in the unused-symbol audit
            SymbolType::Unknown => Some(SymbolValue::Freeform(raw.to_string())),
        }
    }

    fn parse_default(&self, dump: &SymbolDump, default: &DefaultDump) -> Option<SymbolDefault> {
        match default {
            DefaultDump::Literal(raw) => self
                .parse_value(dump, raw, "default")
                .map(SymbolDefault::Value),
            DefaultDump::Reference { symbol } => {
                let name = dump.name.as_deref().unwrap_or("<anonymous>");
                let Some(&target) = self.by_name.get(symbol.as_str()) else {
                    warn!("symbol '{name}' defaults to undefined symbol '{symbol}'");
                    return None;
                };
                let target_kind = self.dump.symbols[target].kind;
                if target_kind.is_tristate_like() != dump.kind.is_tristate_like() {
                    warn!("symbol '{name}' defaults to '{symbol}' of incompatible type");
                    return None;
                }
                Some(SymbolDefault::Reference(target))
            }
        }
    }

    fn parse_menu(&self, dump: &MenuDump) -> Menu {
        let symbol = dump.symbol.as_deref().and_then(|name| {
            let id = self.by_name.get(name).copied();
            if id.is_none() {
                warn!("menu references undefined symbol '{name}'");
            }
            id
        });
        let visible_if = dump
            .visible_if
            .iter()
            .filter_map(|atom| self.parse_condition(atom))
            .collect();
        let children = dump
            .children
            .iter()
            .map(|child| self.parse_menu(child))
            .collect();
        Menu {
            // an empty prompt can not be displayed, treat it as absent
            prompt: dump.prompt.clone().filter(|prompt| !prompt.is_empty()),
            symbol,
            visible_if,
            children,
        }
    }

    fn parse_condition(&self, atom: &str) -> Option<Condition> {
        let (name, negated) = match atom.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (atom, false),
        };
        if name.is_empty() {
            warn!("ignoring empty visibility condition");
            return None;
        }
        let symbol = self.by_name.get(name).copied();
        if symbol.is_none() {
            warn!("visibility condition references undefined symbol '{name}'");
        }
        Some(Condition { symbol, negated })
    }
}

fn validate_int(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn validate_hex(raw: &str) -> bool {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
