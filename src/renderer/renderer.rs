use tracing::warn;

use crate::eval::Evaluator;
use crate::options::RenderOptions;
use crate::renderer::context::RenderState;
use crate::renderer::tree::TreeRenderer;

pub const HEADING: &str = "{ lib }:
let
  inherit (lib.kernel) yes no module freeform;
in {";
pub const FOOTING: &str = "}";
pub const INDENT: &str = "  ";

/// Result of one render invocation: the full Nix document plus the names of
/// overridden symbols that never made it into it, in declaration order.
#[derive(Debug)]
pub struct RenderedConfig {
    pub text: String,
    pub unused_symbols: Vec<String>,
}

pub struct NixRenderer<'a> {
    eval: &'a Evaluator,
    options: &'a RenderOptions,
}

impl<'a> NixRenderer<'a> {
    pub fn new(eval: &'a Evaluator, options: &'a RenderOptions) -> Self {
        Self { eval, options }
    }

    /// Render the whole document. Written-symbol bookkeeping is scoped to
    /// this call, so repeated renders are independent and byte-identical.
    pub fn render(&self) -> RenderedConfig {
        let mut state = RenderState::new();
        let tree = TreeRenderer::new(self.eval, self.options);
        let body = tree.render_forest(self.eval.menus(), &mut state);
        let unused_symbols = self.audit_unused(&state);

        let mut text = String::with_capacity(HEADING.len() + body.len() + FOOTING.len() + 2);
        text.push_str(HEADING);
        text.push('\n');
        text.push_str(&body);
        text.push_str(FOOTING);
        text.push('\n');

        RenderedConfig {
            text,
            unused_symbols,
        }
    }

    /// Runs strictly after the tree walk: written status is only final once
    /// the traversal completes.
    fn audit_unused(&self, state: &RenderState) -> Vec<String> {
        let mut unused = Vec::new();
        for (id, symbol) in self.eval.symbols().iter().enumerate() {
            let Some(name) = symbol.name.as_deref() else {
                continue;
            };
            if symbol.user_defined() && !state.is_written(id) {
                unused.push(name.to_string());
            }
        }
        if self.options.warn_unused {
            for name in &unused {
                warn!("unused symbol: '{name}'");
            }
        }
        unused
    }
}
