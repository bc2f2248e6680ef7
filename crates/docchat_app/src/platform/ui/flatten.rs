//! Turns reply markup back into plain terminal text.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

pub fn markup_to_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut ctx = FlattenContext::default();
    for child in fragment.root_element().children() {
        visit_node(child, &mut ctx);
    }
    ctx.finish()
}

#[derive(Default)]
struct FlattenContext {
    out: String,
    cells_in_row: usize,
}

impl FlattenContext {
    fn append_text(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn ensure_newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn finish(self) -> String {
        self.out.trim_end_matches('\n').to_string()
    }
}

fn visit_node(node: NodeRef<'_, Node>, ctx: &mut FlattenContext) {
    match node.value() {
        Node::Text(text) => ctx.append_text(text),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                visit_element(element, ctx);
            }
        }
        _ => {
            for child in node.children() {
                visit_node(child, ctx);
            }
        }
    }
}

fn visit_children(element: ElementRef<'_>, ctx: &mut FlattenContext) {
    for child in element.children() {
        visit_node(child, ctx);
    }
}

fn visit_element(element: ElementRef<'_>, ctx: &mut FlattenContext) {
    let tag = element.value().name().to_ascii_lowercase();
    match tag.as_str() {
        "br" => ctx.out.push('\n'),
        "h1" | "h2" | "h3" | "table" | "ul" => {
            ctx.ensure_newline();
            visit_children(element, ctx);
            ctx.ensure_newline();
        }
        "tr" => {
            ctx.ensure_newline();
            ctx.cells_in_row = 0;
            visit_children(element, ctx);
            ctx.ensure_newline();
        }
        "th" | "td" => {
            if ctx.cells_in_row > 0 {
                ctx.append_text(" | ");
            }
            ctx.cells_in_row += 1;
            visit_children(element, ctx);
        }
        "li" => {
            ctx.ensure_newline();
            ctx.append_text("- ");
            visit_children(element, ctx);
            ctx.ensure_newline();
        }
        _ => visit_children(element, ctx),
    }
}
