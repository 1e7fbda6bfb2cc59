//! Rendering
//!
//! The view is a pure function of a query snapshot: no fetching, no signal
//! reads, no mutation. Hosts walk the returned node tree, or use
//! [`to_text`] for terminals.

use crate::query::{QuerySnapshot, QueryStatus};

/// Text shown while a fetch is loading
pub const LOADING_TEXT: &str = "Loading...";

/// A rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Vertical group of child nodes
    Column(Vec<Node>),
    /// One labeled block per item
    Block {
        /// Item id
        id: u64,
        /// Item label
        label: String,
    },
    /// Loading or error text
    Text(String),
    /// The invisible end-of-list marker that drives fetching
    Sentinel,
}

impl Node {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a labeled block
    pub fn block(id: u64, label: impl Into<String>) -> Self {
        Self::Block {
            id,
            label: label.into(),
        }
    }

    /// Child nodes, empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Column(children) => children,
            _ => &[],
        }
    }

    /// Check if this is a sentinel node
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel)
    }
}

/// Render a query snapshot into a node tree.
///
/// - pending: the loading indicator alone
/// - error: the failure message alone
/// - success: one column per page in fetch order with a labeled block per
///   item, a trailing sentinel, the loading indicator while the next page
///   is in flight, and the last failure message when a fetch-next failed
pub fn render(snapshot: &QuerySnapshot) -> Node {
    match snapshot.status {
        QueryStatus::Pending => Node::text(LOADING_TEXT),
        QueryStatus::Error => Node::text(snapshot.error_detail.clone().unwrap_or_default()),
        QueryStatus::Success => {
            let mut children = Vec::with_capacity(snapshot.pages.len() + 3);
            for page in &snapshot.pages {
                children.push(Node::Column(
                    page.items
                        .iter()
                        .map(|item| Node::block(item.id, item.name.as_str()))
                        .collect(),
                ));
            }
            children.push(Node::Sentinel);
            if snapshot.is_fetching_next {
                children.push(Node::text(LOADING_TEXT));
            }
            if let Some(detail) = &snapshot.error_detail {
                children.push(Node::text(detail.as_str()));
            }
            Node::Column(children)
        }
    }
}

/// Flatten a node tree into line-per-element terminal text
pub fn to_text(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Column(children) => {
            for child in children {
                write_node(child, out);
            }
        }
        Node::Block { id, label } => {
            out.push_str(&format!("[{id}] {label}\n"));
        }
        Node::Text(text) => {
            out.push_str(text);
            out.push('\n');
        }
        Node::Sentinel => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Item, Page};
    use pretty_assertions::assert_eq;

    fn success_snapshot() -> QuerySnapshot {
        QuerySnapshot {
            pages: vec![
                Page::new(0, vec![Item::new(1, "A"), Item::new(2, "B")]).with_next_token(1u64),
                Page::new(1, vec![Item::new(3, "C")]),
            ],
            status: QueryStatus::Success,
            is_fetching_next: false,
            error_detail: None,
        }
    }

    /// Collect block labels in render order.
    fn labels(node: &Node) -> Vec<String> {
        match node {
            Node::Column(children) => children.iter().flat_map(labels).collect(),
            Node::Block { label, .. } => vec![label.clone()],
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_pending_renders_loading_only() {
        let node = render(&QuerySnapshot::pending());
        assert_eq!(node, Node::text(LOADING_TEXT));
    }

    #[test]
    fn test_error_renders_message_only() {
        let snapshot = QuerySnapshot {
            pages: Vec::new(),
            status: QueryStatus::Error,
            is_fetching_next: false,
            error_detail: Some("Source error: boom".to_string()),
        };
        let node = render(&snapshot);
        assert_eq!(node, Node::text("Source error: boom"));
    }

    #[test]
    fn test_success_renders_pages_in_fetch_order() {
        let node = render(&success_snapshot());
        assert_eq!(labels(&node), vec!["A", "B", "C"]);

        // One column per page, then the sentinel.
        let children = node.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].children().len(), 2);
        assert_eq!(children[1].children().len(), 1);
        assert!(children[2].is_sentinel());
    }

    #[test]
    fn test_fetching_next_appends_loading() {
        let mut snapshot = success_snapshot();
        snapshot.is_fetching_next = true;

        let node = render(&snapshot);
        let children = node.children();
        assert_eq!(children.last(), Some(&Node::text(LOADING_TEXT)));
        assert!(children[children.len() - 2].is_sentinel());
    }

    #[test]
    fn test_failed_fetch_next_overlays_notice() {
        let mut snapshot = success_snapshot();
        snapshot.error_detail = Some("Source error: flaky".to_string());

        let node = render(&snapshot);
        // Items stay on screen, the notice trails the list.
        assert_eq!(labels(&node), vec!["A", "B", "C"]);
        assert_eq!(
            node.children().last(),
            Some(&Node::text("Source error: flaky"))
        );
    }

    #[test]
    fn test_to_text() {
        let node = render(&success_snapshot());
        assert_eq!(to_text(&node), "[1] A\n[2] B\n[3] C\n");

        let node = render(&QuerySnapshot::pending());
        assert_eq!(to_text(&node), "Loading...\n");
    }
}
