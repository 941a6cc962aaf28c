use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    scroll_top: usize,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: HashMap<NodeId, Node>,
    ids: HashMap<String, NodeId>,
    root: NodeId,
    focused: Option<NodeId>,
    next: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            Node {
                tag: "body".to_string(),
                id: None,
                classes: Vec::new(),
                attrs: BTreeMap::new(),
                text: None,
                parent: None,
                children: Vec::new(),
                scroll_top: 0,
            },
        );
        Self {
            nodes,
            ids: HashMap::new(),
            root,
            focused: None,
            next: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `None` when `parent` is no longer part of the document.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        Some(self.insert(parent, element))
    }

    fn insert(&mut self, parent: NodeId, element: Element) -> NodeId {
        let node_id = NodeId(self.next);
        self.next += 1;

        if let Some(id) = &element.id {
            self.ids.insert(id.clone(), node_id);
        }

        self.nodes.insert(
            node_id,
            Node {
                tag: element.tag,
                id: element.id,
                classes: element.classes,
                attrs: element.attrs.into_iter().collect(),
                text: element.text,
                parent: Some(parent),
                children: Vec::new(),
                scroll_top: 0,
            },
        );
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(node_id);
        }

        for child in element.children {
            self.insert(node_id, child);
        }
        node_id
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Detaches `node` and everything below it. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root {
            return false;
        }
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|child| *child != node);
        }
        self.drop_subtree(node);
        true
    }

    /// Removes every child of `node`; calling it on an empty node is a no-op.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(&node) {
            Some(n) => std::mem::take(&mut n.children),
            None => return,
        };
        for child in children {
            self.drop_subtree(child);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.scroll_top = 0;
        }
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&current) {
                if let Some(id) = removed.id {
                    if self.ids.get(&id) == Some(&current) {
                        self.ids.remove(&id);
                    }
                }
                if self.focused == Some(current) {
                    self.focused = None;
                }
                stack.extend(removed.children);
            }
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.text = Some(text.into());
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).and_then(|n| n.text.as_deref())
    }

    /// Concatenated text of the node and all its descendants, in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.nodes.get(&node) else {
            return;
        };
        if let Some(text) = &n.text {
            out.push_str(text);
        }
        for child in &n.children {
            self.collect_text(*child, out);
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.attrs.remove(name);
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(&node)
            .and_then(|n| n.attrs.get(name).map(String::as_str))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.classes.retain(|c| c != class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.set_attr(node, "value", value);
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.attr(node, "value").unwrap_or("")
    }

    pub fn focus(&mut self, node: NodeId) {
        if self.contains(node) {
            self.focused = Some(node);
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Scroll height in child units: one unit per child element.
    pub fn scroll_height(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    pub fn scroll_top(&self, node: NodeId) -> usize {
        self.nodes.get(&node).map(|n| n.scroll_top).unwrap_or(0)
    }

    pub fn scroll_to_bottom(&mut self, node: NodeId) {
        let height = self.scroll_height(node);
        if let Some(n) = self.nodes.get_mut(&node) {
            n.scroll_top = height;
        }
    }

    pub fn descendants_with_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.has_class(current, class) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.nodes.get(&node) else {
            return;
        };
        out.push('<');
        out.push_str(&n.tag);
        if let Some(id) = &n.id {
            push_attr(out, "id", id);
        }
        if !n.classes.is_empty() {
            push_attr(out, "class", &n.classes.join(" "));
        }
        for (name, value) in &n.attrs {
            push_attr(out, name, value);
        }
        if self.focused == Some(node) {
            out.push_str(" autofocus");
        }
        out.push('>');
        if is_void(&n.tag) {
            return;
        }
        if let Some(text) = &n.text {
            out.push_str(&escape(text));
        }
        for child in &n.children {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&n.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img" | "meta" | "link")
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
