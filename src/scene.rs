// ============================================================================
// RETAINED SCENE TREE
// ============================================================================
//
// Each widget owns one `Scene`. Nodes live in an arena and are addressed by
// `NodeId` handles that the widget keeps for the parts it updates later, so
// nothing is ever looked up by class name.

use std::fmt::{self, Write};

use crate::geometry::Point;

/// Handle to a node of one particular scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Document root; `scale` multiplies the on-page size, not the geometry.
    Root { size: f64, scale: f64 },
    Group,
    Circle { cx: f64, cy: f64, r: f64 },
    Line { from: Point, to: Point },
    Path { d: String },
    Text {
        x: f64,
        y: f64,
        dy: f64,
        anchor: TextAnchor,
        content: String,
    },
}

impl Shape {
    fn tag(&self) -> &'static str {
        match self {
            Shape::Root { .. } => "svg",
            Shape::Group => "g",
            Shape::Circle { .. } => "circle",
            Shape::Line { .. } => "line",
            Shape::Path { .. } => "path",
            Shape::Text { .. } => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate { x: f64, y: f64 },
    TranslateRotate { x: f64, y: f64, degrees: f64 },
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Translate { x, y } => write!(f, "translate({x}, {y})"),
            Transform::TranslateRotate { x, y, degrees } => {
                write!(f, "translate({x}, {y}) rotate({degrees})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub shape: Shape,
    pub class: Option<String>,
    pub style: Vec<(&'static str, String)>,
    pub transform: Option<Transform>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            class: None,
            style: Vec::new(),
            transform: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::new(Shape::Group)
    }

    pub fn circle(center: Point, r: f64) -> Self {
        Self::new(Shape::Circle {
            cx: center.x,
            cy: center.y,
            r,
        })
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self::new(Shape::Line { from, to })
    }

    pub fn path(d: impl Into<String>) -> Self {
        Self::new(Shape::Path { d: d.into() })
    }

    pub fn text(x: f64, y: f64, dy: f64, anchor: TextAnchor, content: impl Into<String>) -> Self {
        Self::new(Shape::Text {
            x,
            y,
            dy,
            anchor,
            content: content.into(),
        })
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_style(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.style.push((name, value.to_string()));
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    nodes: Vec<Option<Node>>,
    /// Slots emptied by `remove`, reused by the next insertion.
    free: Vec<usize>,
    root: NodeId,
}

impl Scene {
    pub fn new(size: f64, scale: f64, class: impl Into<String>) -> Self {
        let root = Node::new(Shape::Root { size, scale }).with_class(class);
        Self {
            nodes: vec![Some(root)],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Appends `node` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        self.attach(parent, node, None)
    }

    /// Inserts `node` into `parent` just before `sibling`, or last when
    /// `sibling` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, node: Node, sibling: NodeId) -> NodeId {
        self.attach(parent, node, Some(sibling))
    }

    fn attach(&mut self, parent: NodeId, mut node: Node, before: Option<NodeId>) -> NodeId {
        let linked = self.contains(parent);
        node.parent = Some(parent);
        node.children.clear();
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        };
        if !linked {
            return id;
        }
        if let Some(parent) = self.get_mut(parent) {
            let at = before
                .and_then(|b| parent.children.iter().position(|c| *c == b))
                .unwrap_or(parent.children.len());
            parent.children.insert(at, id);
        }
        id
    }

    /// Removes a node and its whole subtree. The root stays.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        if let Some(parent) = self.get(id).and_then(Node::parent) {
            if let Some(parent) = self.get_mut(parent) {
                parent.children.retain(|c| *c != id);
            }
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(next.0).and_then(Option::take) {
                self.free.push(next.0);
                pending.extend(node.children);
            }
        }
        true
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(Node {
            shape: Shape::Text { content, .. },
            ..
        }) = self.get_mut(id)
        {
            *content = text.into();
        }
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) {
        if let Some(node) = self.get_mut(id) {
            node.transform = Some(transform);
        }
    }

    pub fn set_scale(&mut self, scale: f64) {
        let root = self.root;
        if let Some(Node {
            shape: Shape::Root { scale: current, .. },
            ..
        }) = self.get_mut(root)
        {
            *current = scale;
        }
    }

    /// On-page width and height of the whole widget.
    pub fn display_size(&self) -> f64 {
        match self.get(self.root).map(|n| &n.shape) {
            Some(Shape::Root { size, scale }) => size * scale,
            _ => 0.0,
        }
    }

    /// Nodes under `scope` (inclusive) carrying `class`, in document order.
    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending = vec![scope];
        while let Some(id) = pending.pop() {
            let Some(node) = self.get(id) else { continue };
            if node.has_class(class) {
                found.push(id);
            }
            pending.extend(node.children.iter().rev());
        }
        found
    }

    /// Serializes the scene as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_node(&mut out, self.root, 0);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Some(node) = self.get(id) else { return };
        let indent = "  ".repeat(depth);
        let tag = node.shape.tag();
        let _ = write!(out, "{indent}<{tag}");

        match &node.shape {
            Shape::Root { size, scale } => {
                let _ = write!(
                    out,
                    r#" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{w}" viewBox="0 0 {size} {size}""#,
                    w = size * scale,
                );
            }
            Shape::Group => {}
            Shape::Circle { cx, cy, r } => {
                let _ = write!(out, r#" cx="{cx}" cy="{cy}" r="{r}""#);
            }
            Shape::Line { from, to } => {
                let _ = write!(
                    out,
                    r#" x1="{}" y1="{}" x2="{}" y2="{}""#,
                    from.x, from.y, to.x, to.y
                );
            }
            Shape::Path { d } => {
                let _ = write!(out, r#" d="{}""#, escape(d));
            }
            Shape::Text { x, y, dy, anchor, .. } => {
                let _ = write!(
                    out,
                    r#" x="{x}" y="{y}" dy="{dy}" text-anchor="{}""#,
                    anchor.as_str()
                );
            }
        }
        if let Some(class) = &node.class {
            let _ = write!(out, r#" class="{}""#, escape(class));
        }
        if let Some(transform) = &node.transform {
            let _ = write!(out, r#" transform="{transform}""#);
        }
        if !node.style.is_empty() {
            let style: Vec<String> = node
                .style
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect();
            let _ = write!(out, r#" style="{}""#, escape(&style.join("; ")));
        }

        match (&node.shape, node.children.is_empty()) {
            (Shape::Text { content, .. }, _) => {
                let _ = writeln!(out, ">{}</{tag}>", escape(content));
            }
            (_, true) => {
                let _ = writeln!(out, "/>");
            }
            (_, false) => {
                let _ = writeln!(out, ">");
                for child in &node.children {
                    self.write_node(out, *child, depth + 1);
                }
                let _ = writeln!(out, "{indent}</{tag}>");
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
