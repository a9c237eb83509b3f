use ego_tree::NodeId;
use regex::Regex;
use scraper::{Html, Node};
use std::ops::Deref;

/// Normalize a rich-text (HTML) problem description into canonical plain text.
///
/// Applied in order:
/// 1. `<sup>` inside `<code>` becomes `^` notation (e.g., `10^9`)
/// 2. non-breaking spaces become ordinary spaces
/// 3. blank lines directly after `Example N:` headers are removed
/// 4. `Constraints:` section lines are bulleted, blank-line runs collapse
///
/// Total function: malformed or empty markup yields empty or minimal output,
/// never an error.
pub fn normalize(html: &str) -> String {
    let document = Html::parse_fragment(html);

    let mut flat = String::new();
    flatten_node(document.tree.root().id(), &document.tree, &mut flat);

    let flat = flat.replace('\u{a0}', " ");
    let flat = collapse_example_gaps(&flat);
    format_constraints(&flat)
}

/// Walk the node tree, appending visible text in document order.
///
/// A `<code>` element with a `<sup>` descendant is rebuilt from its direct
/// children: text verbatim, direct `<sup>` children as `^` + their text,
/// any other element as its bare text. Everything else recurses.
fn flatten_node(node_id: NodeId, tree: &ego_tree::Tree<Node>, out: &mut String) {
    let node = tree.get(node_id).expect("valid node id");

    match node.value() {
        Node::Text(text) => out.push_str(text.deref()),
        Node::Element(elem) => {
            if elem.name() == "code" && has_sup_descendant(node_id, tree) {
                for child in node.children() {
                    match child.value() {
                        Node::Text(t) => out.push_str(t.deref()),
                        Node::Element(e) if e.name() == "sup" => {
                            out.push('^');
                            out.push_str(&collect_all_text(child.id(), tree));
                        }
                        Node::Element(_) => out.push_str(&collect_all_text(child.id(), tree)),
                        _ => {}
                    }
                }
            } else {
                for child in node.children() {
                    flatten_node(child.id(), tree, out);
                }
            }
        }
        // Document/fragment roots — recurse; comments and doctypes have no
        // visible text and no children worth visiting.
        _ => {
            for child in node.children() {
                flatten_node(child.id(), tree, out);
            }
        }
    }
}

fn has_sup_descendant(node_id: NodeId, tree: &ego_tree::Tree<Node>) -> bool {
    let node = tree.get(node_id).expect("valid node id");
    node.descendants()
        .skip(1)
        .any(|n| matches!(n.value(), Node::Element(e) if e.name() == "sup"))
}

/// Collect all text content under a node, recursively.
fn collect_all_text(node_id: NodeId, tree: &ego_tree::Tree<Node>) -> String {
    let node = tree.get(node_id).expect("valid node id");
    let mut text = String::new();

    for child in node.children() {
        match child.value() {
            Node::Text(t) => text.push_str(t.deref()),
            Node::Element(_) => text.push_str(&collect_all_text(child.id(), tree)),
            _ => {}
        }
    }

    text
}

/// Remove blank lines directly after `Example N:` lines so the example
/// body starts on the very next line.
fn collapse_example_gaps(text: &str) -> String {
    let re = Regex::new(r"(Example \d+:)\n\s*\n").unwrap();
    re.replace_all(text, "${1}\n").into_owned()
}

/// Bullet the `Constraints:` section and collapse blank-line runs elsewhere.
///
/// Once the `Constraints:` heading is seen the section never ends: every
/// later non-blank line is bulleted. The source descriptions always put
/// constraints last, so nothing else follows in practice; content after the
/// section would be bulleted too.
fn format_constraints(text: &str) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut in_constraints = false;
    let mut last_line_blank = false;

    for line in text.lines() {
        let stripped = line.trim();

        if stripped == "Constraints:" {
            // Exactly one blank line before the heading
            if output.last().is_some_and(|l| !l.is_empty()) {
                output.push(String::new());
            }
            output.push("Constraints:".to_string());
            in_constraints = true;
            continue;
        }

        if in_constraints {
            if !stripped.is_empty() {
                output.push(format!("• {stripped}"));
            }
        } else if stripped.is_empty() {
            if !last_line_blank {
                output.push(String::new());
                last_line_blank = true;
            }
        } else {
            output.push(line.to_string());
            last_line_blank = false;
        }
    }

    output.join("\n").trim().to_string()
}
