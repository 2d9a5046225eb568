use crate::eval::Evaluator;
use crate::options::RenderOptions;
use crate::parser::Menu;
use crate::renderer::components::{SectionFramer, SymbolFormatter};
use crate::renderer::context::{RenderContext, RenderState};

/// The recursive tree walk. Every call renders one menu's whole subtree into
/// a string the caller stitches into its own buffer; a subtree that produces
/// nothing therefore surfaces no section label either.
pub struct TreeRenderer<'a> {
    eval: &'a Evaluator,
    options: &'a RenderOptions,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(eval: &'a Evaluator, options: &'a RenderOptions) -> Self {
        Self { eval, options }
    }

    pub fn render_forest(&self, menus: &[Menu], state: &mut RenderState) -> String {
        let context = RenderContext::top();
        menus
            .iter()
            .map(|menu| self.render_menu(menu, &context, state))
            .collect()
    }

    fn render_menu(&self, menu: &Menu, context: &RenderContext, state: &mut RenderState) -> String {
        if self.options.skip_invisible && !self.eval.is_visible(menu) {
            // the whole subtree is skipped and its symbols stay unclaimed,
            // so an overridden invisible symbol shows up in the audit
            return String::new();
        }

        let Some(prompt) = self.eval.prompt(menu) else {
            // promptless menus are structurally transparent
            return self.render_children(menu, context, state);
        };

        match menu.symbol {
            Some(id) => {
                // a config entry, possibly with nested entries below it
                let mut buffer = String::new();
                if state.claim(id) {
                    let formatter = SymbolFormatter;
                    buffer.push_str(&formatter.render(self.eval.symbol(id), prompt, self.options));
                }
                buffer.push_str(&self.render_children(menu, context, state));
                buffer
            }
            None => self.render_section(menu, prompt, context, state),
        }
    }

    /// A pure grouping menu: its label only appears if the subtree below it
    /// produced output. The blank-separator decision is captured before the
    /// children run, because in document order the label precedes everything
    /// the subtree emits.
    fn render_section(
        &self,
        menu: &Menu,
        prompt: &str,
        context: &RenderContext,
        state: &mut RenderState,
    ) -> String {
        let framer = SectionFramer;
        let label = framer.compose_label(context.breadcrumb.as_deref(), prompt);
        // in document order this label precedes the whole subtree, so it
        // consumes the pending separator; clearing the flag keeps a labeled
        // child from claiming the same separator again
        let needs_gap = state.label_closed;
        state.label_closed = false;

        let child_context = context.section(&label);
        let buffer = self.render_children(menu, &child_context, state);
        if buffer.is_empty() {
            // nothing surfaced, the separator stays pending
            state.label_closed = needs_gap;
            return String::new();
        }

        let marker = framer.depth_marker(context.depth);
        let mut output = String::new();
        if needs_gap {
            output.push('\n');
        }
        output.push_str(&format!("{marker} {label}\n"));
        output.push_str(&buffer);
        output.push_str(&format!("{marker} end of {label}\n"));
        state.label_closed = true;
        output
    }

    fn render_children(
        &self,
        menu: &Menu,
        context: &RenderContext,
        state: &mut RenderState,
    ) -> String {
        menu.children
            .iter()
            .map(|child| self.render_menu(child, context, state))
            .collect()
    }
}
