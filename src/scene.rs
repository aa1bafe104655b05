//! Retained scene tree for composed widget rendering
//!
//! This module provides the render-tree host that dialog widgets compose
//! themselves into: an encapsulated root with named nodes whose membership
//! can be toggled at runtime. Widgets own their tree for their whole life
//! and only attach, detach, or reorder nodes; the structure itself is never
//! rebuilt.
//!
//! Node handles are plain indices into the owning tree. Handles from one
//! tree are meaningless to another; operations given a foreign handle are
//! ignored rather than treated as errors.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::theme::Theme;

/// Handle to a node in a [`SceneTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Scoped style sheet carried by a tree's style node
///
/// Styles travel with the tree rather than being resolved globally, so each
/// widget instance renders from its own namespaced scope.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// Dimming layer painted behind a modal presentation
    pub backdrop: Style,
    /// Panel border
    pub chrome_border: Style,
    /// Panel title
    pub chrome_title: Style,
    /// Slot text content
    pub slot_text: Style,
    /// Unselected action button
    pub button: Style,
    /// Selected action button
    pub button_selected: Style,
}

impl StyleSheet {
    /// Derive the dialog styles from a theme
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            backdrop: Style::default()
                .bg(Color::Black)
                .fg(theme.text)
                .add_modifier(Modifier::DIM),
            chrome_border: Style::default().fg(theme.border),
            chrome_title: Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
            slot_text: Style::default().fg(theme.text),
            button: Style::default().bg(theme.background_alt).fg(theme.text),
            button_selected: Style::default()
                .bg(theme.primary)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Debug)]
struct Node {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    lines: Vec<String>,
    sheet: Option<StyleSheet>,
    area: Rect,
}

impl Node {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            parent: None,
            children: Vec::new(),
            lines: Vec::new(),
            sheet: None,
            area: Rect::default(),
        }
    }
}

/// An encapsulated render scope: a tree of named visual nodes
///
/// Attachment is single-parent with move semantics: attaching a node that is
/// already attached somewhere relocates it, never duplicates it. Visibility
/// of a subtree is purely a question of membership under the root.
#[derive(Debug)]
pub struct SceneTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SceneTree {
    /// Create a new tree with a root node labeled after the given scope
    pub fn new(scope: impl Into<String>) -> Self {
        let mut nodes = Vec::new();
        nodes.push(Node::new(scope));
        Self {
            nodes,
            root: NodeId(0),
        }
    }

    /// The root node of this scope
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached node
    pub fn create_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(label));
        id
    }

    /// Get a node's label
    pub fn label(&self, node: NodeId) -> &str {
        self.nodes
            .get(node.0)
            .map(|n| n.label.as_str())
            .unwrap_or("")
    }

    /// Attach `child` as the last child of `parent`
    ///
    /// If `child` is already attached anywhere in the tree it is moved, so a
    /// node exists at most once. Re-attaching under the same parent reorders
    /// it to the end.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.nodes.get(parent.0).is_none() || self.nodes.get(child.0).is_none() {
            return;
        }
        self.remove_from_parent(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `node` as a sibling immediately before `anchor`
    ///
    /// Move semantics as with [`SceneTree::attach`]. No-op when the anchor is
    /// detached or unknown.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
        if anchor == node || self.nodes.get(node.0).is_none() {
            return;
        }
        let Some(parent) = self.nodes.get(anchor.0).and_then(|n| n.parent) else {
            return;
        };
        self.remove_from_parent(node);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == anchor)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[parent.0].children.insert(index, node);
        self.nodes[node.0].parent = Some(parent);
    }

    /// Detach a node from its parent
    ///
    /// Returns whether the node was attached. Detaching an already detached
    /// node is a no-op.
    pub fn detach(&mut self, node: NodeId) -> bool {
        self.remove_from_parent(node)
    }

    /// Whether a node is reachable from the root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes.get(current.0).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Children of a node, in attachment order
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of a node, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Replace a node's text content
    pub fn set_lines(&mut self, node: NodeId, lines: Vec<String>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.lines = lines;
        }
    }

    /// A node's text content
    pub fn lines(&self, node: NodeId) -> &[String] {
        self.nodes
            .get(node.0)
            .map(|n| n.lines.as_slice())
            .unwrap_or(&[])
    }

    /// Record the screen area a node was last rendered into
    pub fn set_area(&mut self, node: NodeId, area: Rect) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.area = area;
        }
    }

    /// The screen area a node was last rendered into
    pub fn area(&self, node: NodeId) -> Rect {
        self.nodes.get(node.0).map(|n| n.area).unwrap_or_default()
    }

    /// Store a style sheet on a node
    pub fn set_style_sheet(&mut self, node: NodeId, sheet: StyleSheet) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.sheet = Some(sheet);
        }
    }

    /// The style sheet stored on a node, if any
    pub fn style_sheet(&self, node: NodeId) -> Option<&StyleSheet> {
        self.nodes.get(node.0).and_then(|n| n.sheet.as_ref())
    }

    /// Find the topmost attached node whose recorded area contains a point
    ///
    /// Later siblings paint on top of earlier ones, and children on top of
    /// their parent, so traversal prefers the deepest, most recently attached
    /// match. Nodes with an empty recorded area are transparent to hits.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<NodeId> {
        self.hit_node(self.root, column, row)
    }

    fn hit_node(&self, node: NodeId, column: u16, row: u16) -> Option<NodeId> {
        let data = self.nodes.get(node.0)?;
        for &child in data.children.iter().rev() {
            if let Some(hit) = self.hit_node(child, column, row) {
                return Some(hit);
            }
        }
        if node != self.root && contains_point(data.area, column, row) {
            return Some(node);
        }
        None
    }

    fn remove_from_parent(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.nodes.get(node.0).and_then(|n| n.parent) else {
            return false;
        };
        self.nodes[parent.0].children.retain(|&c| c != node);
        self.nodes[node.0].parent = None;
        true
    }
}

fn contains_point(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_moves_instead_of_duplicating() {
        let mut tree = SceneTree::new("scope");
        let root = tree.root();
        let left = tree.create_node("left");
        let right = tree.create_node("right");
        let child = tree.create_node("child");
        tree.attach(root, left);
        tree.attach(root, right);

        tree.attach(left, child);
        tree.attach(right, child);

        assert!(tree.children(left).is_empty());
        assert_eq!(tree.children(right), &[child]);
        assert_eq!(tree.parent(child), Some(right));
    }

    #[test]
    fn test_insert_before_orders_siblings() {
        let mut tree = SceneTree::new("scope");
        let root = tree.root();
        let style = tree.create_node("styles");
        let wrapper = tree.create_node("wrapper");
        let backdrop = tree.create_node("backdrop");
        tree.attach(root, style);
        tree.attach(root, wrapper);

        tree.insert_before(wrapper, backdrop);
        assert_eq!(tree.children(root), &[style, backdrop, wrapper]);

        // Re-inserting moves the existing node, it never duplicates
        tree.insert_before(wrapper, backdrop);
        assert_eq!(tree.children(root), &[style, backdrop, wrapper]);
    }

    #[test]
    fn test_insert_before_detached_anchor_is_ignored() {
        let mut tree = SceneTree::new("scope");
        let anchor = tree.create_node("anchor");
        let node = tree.create_node("node");
        tree.insert_before(anchor, node);
        assert!(!tree.is_attached(node));
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut tree = SceneTree::new("scope");
        let root = tree.root();
        let node = tree.create_node("node");
        tree.attach(root, node);

        assert!(tree.detach(node));
        assert!(!tree.detach(node));
        assert!(!tree.is_attached(node));
    }

    #[test]
    fn test_is_attached_is_transitive() {
        let mut tree = SceneTree::new("scope");
        let root = tree.root();
        let wrapper = tree.create_node("wrapper");
        let body = tree.create_node("body");
        tree.attach(root, wrapper);
        tree.attach(wrapper, body);

        assert!(tree.is_attached(body));

        tree.detach(wrapper);
        assert!(!tree.is_attached(body));
        assert_eq!(tree.parent(body), Some(wrapper));
    }

    #[test]
    fn test_hit_test_prefers_topmost_descendant() {
        let mut tree = SceneTree::new("scope");
        let root = tree.root();
        let below = tree.create_node("below");
        let above = tree.create_node("above");
        let inner = tree.create_node("inner");
        tree.attach(root, below);
        tree.attach(root, above);
        tree.attach(above, inner);

        tree.set_area(below, Rect::new(0, 0, 20, 10));
        tree.set_area(above, Rect::new(0, 0, 20, 10));
        tree.set_area(inner, Rect::new(5, 5, 5, 2));

        assert_eq!(tree.hit_test(6, 6), Some(inner));
        assert_eq!(tree.hit_test(0, 0), Some(above));
        assert_eq!(tree.hit_test(19, 9), Some(above));
        assert_eq!(tree.hit_test(30, 30), None);
    }

    #[test]
    fn test_hit_test_skips_detached_subtrees() {
        let mut tree = SceneTree::new("scope");
        let root = tree.root();
        let body = tree.create_node("body");
        tree.attach(root, body);
        tree.set_area(body, Rect::new(0, 0, 10, 10));

        assert_eq!(tree.hit_test(1, 1), Some(body));
        tree.detach(body);
        assert_eq!(tree.hit_test(1, 1), None);
    }

    #[test]
    fn test_style_sheet_travels_with_node() {
        let mut tree = SceneTree::new("scope");
        let style = tree.create_node("styles");
        assert!(tree.style_sheet(style).is_none());

        tree.set_style_sheet(style, StyleSheet::from_theme(&Theme::dark()));
        assert!(tree.style_sheet(style).is_some());
    }
}
