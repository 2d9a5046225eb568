//! Value stabilization and visibility queries over the parsed configuration.
//!
//! The renderer never mutates this state; it only reads values and asks
//! visibility questions while walking the menu forest.

use tracing::{debug, warn};

use crate::parser::{
    Condition, Menu, ParsedConfig, Symbol, SymbolDefault, SymbolId, SymbolValue, Tristate,
};

/// Upper bound on stabilization passes. Defaults referencing other symbols
/// converge in at most one pass per link of the longest reference chain, so
/// hitting the cap means the dump is pathological (or cyclic).
pub const MAX_STABILIZE_PASSES: usize = 8;

pub struct Evaluator {
    symbols: Vec<Symbol>,
    menus: Vec<Menu>,
}

impl Evaluator {
    pub fn new(config: ParsedConfig) -> Self {
        Self {
            symbols: config.symbols,
            menus: config.menus,
        }
    }

    /// Recompute every symbol's resolved value until a fixed point is
    /// reached, capped at [`MAX_STABILIZE_PASSES`]. Returns the number of
    /// passes performed.
    pub fn stabilize(&mut self) -> usize {
        for pass in 1..=MAX_STABILIZE_PASSES {
            let mut changed = false;
            for id in 0..self.symbols.len() {
                let next = self.resolved_value(id);
                if next != self.symbols[id].value {
                    self.symbols[id].value = next;
                    changed = true;
                }
            }
            if !changed {
                debug!("symbol values stable after {pass} passes");
                return pass;
            }
        }
        warn!("symbol values did not stabilize after {MAX_STABILIZE_PASSES} passes");
        MAX_STABILIZE_PASSES
    }

    fn resolved_value(&self, id: SymbolId) -> SymbolValue {
        let symbol = &self.symbols[id];
        if let Some(user) = &symbol.user {
            return user.clone();
        }
        match &symbol.default {
            Some(SymbolDefault::Value(value)) => value.clone(),
            Some(SymbolDefault::Reference(target)) => self.symbols[*target].value.clone(),
            None => SymbolValue::zero(symbol.kind),
        }
    }

    /// A menu is visible when every atom of its `visible_if` conjunction
    /// holds against the current symbol values.
    pub fn is_visible(&self, menu: &Menu) -> bool {
        menu.visible_if.iter().all(|cond| self.condition_holds(cond))
    }

    fn condition_holds(&self, cond: &Condition) -> bool {
        // a dangling reference or a freeform value behaves as `n`
        let enabled = match cond.symbol.map(|id| &self.symbols[id].value) {
            Some(SymbolValue::Tristate(tri)) => *tri != Tristate::No,
            Some(SymbolValue::Freeform(_)) | None => false,
        };
        enabled != cond.negated
    }

    pub fn has_prompt(&self, menu: &Menu) -> bool {
        menu.prompt.is_some()
    }

    pub fn prompt<'a>(&self, menu: &'a Menu) -> Option<&'a str> {
        menu.prompt.as_deref()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }
}
