//! Ownership tree of HUD elements.
//!
//! Each node is owned by exactly one parent; removing a node drops its whole
//! subtree. Children are stored back to front, so draw order is a pre-order
//! walk of the tree.

use glam::Vec2;

use crate::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Container,
    Image {
        texture: String,
        frame: usize,
        /// Unscaled size in HUD pixels.
        size: Vec2,
    },
    Rect {
        size: Vec2,
        fill: Rgb,
    },
    RoundRect {
        size: Vec2,
        radius: f32,
        fill: Rgb,
    },
    Text {
        content: String,
        font_size: f32,
        fill: Rgb,
        stroke: Option<(Rgb, f32)>,
    },
    Ellipse {
        size: Vec2,
        fill: Rgb,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Position relative to the parent, in top-left / y-down HUD space.
    pub position: Vec2,
    /// Anchor inside the element's own box, `(0.5, 0.5)` is centred.
    pub origin: Vec2,
    pub scale: Vec2,
    pub alpha: f32,
    pub visible: bool,
    pub tint: Rgb,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind, position: Vec2) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            origin: Vec2::splat(0.5),
            scale: Vec2::ONE,
            alpha: 1.0,
            visible: true,
            tint: Rgb::WHITE,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn container(name: impl Into<String>, position: Vec2) -> Self {
        Self::new(name, NodeKind::Container, position)
    }

    pub fn image(name: impl Into<String>, texture: &str, size: Vec2, position: Vec2) -> Self {
        Self::new(
            name,
            NodeKind::Image {
                texture: texture.to_string(),
                frame: 0,
                size,
            },
            position,
        )
    }

    pub fn rect(name: impl Into<String>, size: Vec2, fill: Rgb, position: Vec2) -> Self {
        Self::new(name, NodeKind::Rect { size, fill }, position)
    }

    pub fn round_rect(
        name: impl Into<String>,
        size: Vec2,
        radius: f32,
        fill: Rgb,
        position: Vec2,
    ) -> Self {
        Self::new(name, NodeKind::RoundRect { size, radius, fill }, position)
    }

    pub fn text(
        name: impl Into<String>,
        content: &str,
        font_size: f32,
        fill: Rgb,
        position: Vec2,
    ) -> Self {
        Self::new(
            name,
            NodeKind::Text {
                content: content.to_string(),
                font_size,
                fill,
                stroke: None,
            },
            position,
        )
    }

    pub fn ellipse(name: impl Into<String>, size: Vec2, fill: Rgb, position: Vec2) -> Self {
        Self::new(name, NodeKind::Ellipse { size, fill }, position)
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::splat(scale);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_stroke(mut self, color: Rgb, width: f32) -> Self {
        if let NodeKind::Text { stroke, .. } = &mut self.kind {
            *stroke = Some((color, width));
        }
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Unscaled size of the element's box, if it has one before layout.
    pub fn size(&self) -> Option<Vec2> {
        match &self.kind {
            NodeKind::Image { size, .. }
            | NodeKind::Rect { size, .. }
            | NodeKind::RoundRect { size, .. }
            | NodeKind::Ellipse { size, .. } => Some(*size),
            NodeKind::Container | NodeKind::Text { .. } => None,
        }
    }

    pub fn display_size(&self) -> Option<Vec2> {
        self.size().map(|size| size * self.scale)
    }
}

/// A node resolved against its ancestors, ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub id: NodeId,
    pub node: &'a Node,
    pub position: Vec2,
    pub scale: Vec2,
    pub alpha: f32,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct SceneTree {
    slots: Vec<Option<Node>>,
    root: NodeId,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Node::container("root", Vec2::ZERO))],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Adds `node` on top of `parent`'s children. Falls back to the root when
    /// `parent` has been removed.
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let parent = if self.contains(parent) {
            parent
        } else {
            self.root
        };
        let id = NodeId(self.slots.len() as u32);
        node.parent = Some(parent);
        node.children.clear();
        self.slots.push(Some(node));
        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Removes `id` and everything below it. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root {
            return false;
        }
        let Some(node) = self.slots.get_mut(id.index()).and_then(Option::take) else {
            return false;
        };
        if let Some(parent) = node.parent.and_then(|parent| self.get_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.slots.get_mut(child.index()).and_then(Option::take) {
                pending.extend(removed.children);
            }
        }
        true
    }

    /// Swaps `id` with the sibling directly behind it.
    pub fn move_down(&mut self, id: NodeId) {
        self.reorder(id, |siblings, at| {
            if at > 0 {
                siblings.swap(at, at - 1);
            }
        });
    }

    pub fn bring_to_top(&mut self, id: NodeId) {
        self.reorder(id, |siblings, at| {
            let node = siblings.remove(at);
            siblings.push(node);
        });
    }

    pub fn send_to_back(&mut self, id: NodeId) {
        self.reorder(id, |siblings, at| {
            let node = siblings.remove(at);
            siblings.insert(0, node);
        });
    }

    fn reorder(&mut self, id: NodeId, apply: impl FnOnce(&mut Vec<NodeId>, usize)) {
        let Some(parent) = self.get(id).and_then(Node::parent) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            if let Some(at) = parent.children.iter().position(|child| *child == id) {
                apply(&mut parent.children, at);
            }
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.get_mut(id) {
            node.visible = visible;
        }
    }

    pub fn set_alpha(&mut self, id: NodeId, alpha: f32) {
        if let Some(node) = self.get_mut(id) {
            node.alpha = alpha;
        }
    }

    pub fn set_tint(&mut self, id: NodeId, tint: Rgb) {
        if let Some(node) = self.get_mut(id) {
            node.tint = tint;
        }
    }

    pub fn set_scale(&mut self, id: NodeId, x: f32, y: f32) {
        if let Some(node) = self.get_mut(id) {
            node.scale = Vec2::new(x, y);
        }
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec2) {
        if let Some(node) = self.get_mut(id) {
            node.position = position;
        }
    }

    /// Sets the fill colour of shapes and text.
    pub fn set_fill(&mut self, id: NodeId, color: Rgb) {
        if let Some(node) = self.get_mut(id) {
            match &mut node.kind {
                NodeKind::Rect { fill, .. }
                | NodeKind::RoundRect { fill, .. }
                | NodeKind::Text { fill, .. }
                | NodeKind::Ellipse { fill, .. } => *fill = color,
                NodeKind::Container | NodeKind::Image { .. } => {}
            }
        }
    }

    pub fn set_width(&mut self, id: NodeId, width: f32) {
        if let Some(node) = self.get_mut(id) {
            match &mut node.kind {
                NodeKind::Image { size, .. }
                | NodeKind::Rect { size, .. }
                | NodeKind::RoundRect { size, .. }
                | NodeKind::Ellipse { size, .. } => size.x = width,
                NodeKind::Container | NodeKind::Text { .. } => {}
            }
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            if let NodeKind::Text { content, .. } = &mut node.kind {
                *content = text.into();
            }
        }
    }

    pub fn set_frame(&mut self, id: NodeId, index: usize) {
        if let Some(node) = self.get_mut(id) {
            if let NodeKind::Image { frame, .. } = &mut node.kind {
                *frame = index;
            }
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Text { content, .. } => Some(content.as_str()),
            _ => None,
        }
    }

    /// Every non-container node, back to front, resolved against its ancestors.
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::new();
        let Some(root) = self.get(self.root) else {
            return items;
        };

        let mut stack = vec![(self.root, root.position, root.scale, root.alpha, root.visible)];
        while let Some((id, position, scale, alpha, visible)) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if !matches!(node.kind, NodeKind::Container) {
                items.push(DrawItem {
                    id,
                    node,
                    position,
                    scale,
                    alpha,
                    visible,
                });
            }
            for child_id in node.children.iter().rev() {
                if let Some(child) = self.get(*child_id) {
                    stack.push((
                        *child_id,
                        position + scale * child.position,
                        scale * child.scale,
                        alpha * child.alpha,
                        visible && child.visible,
                    ));
                }
            }
        }
        items
    }
}
