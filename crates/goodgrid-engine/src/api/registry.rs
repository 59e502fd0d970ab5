use crate::error::NodeError;
use crate::node::DrawNode;

/// Ordered list of drawable nodes.
///
/// Ids are not required to be unique: a later registration under an existing id is
/// kept, but every id lookup returns the first match in draw order.
#[derive(Default)]
pub struct NodeRegistry {
    nodes: Vec<Box<dyn DrawNode>>,
    sort_dirty: bool,
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.nodes.iter().map(|n| (n.id(), n.z_order(), n.is_enabled())))
            .finish()
    }
}

impl NodeRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `node` under `id` and returns it for further setup.
    pub fn add<T: DrawNode>(&mut self, id: impl Into<String>, mut node: T) -> &mut T {
        let id = id.into();
        if self.nodes.iter().any(|n| n.id() == id) {
            log::debug!("draw node id '{id}' registered again; lookups keep returning the first");
        }
        node.base_mut().set_id(id);
        node.base_mut().clear_order_dirty();
        self.nodes.push(Box::new(node));
        self.sort_dirty = true;

        self.nodes
            .last_mut()
            .and_then(|n| (**n).as_any_mut().downcast_mut::<T>())
            .expect("last registered node has the type it was registered with")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in current draw order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn DrawNode> {
        self.nodes.iter().map(|n| &**n)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn DrawNode>> {
        self.nodes.iter_mut()
    }

    pub fn by_id(&self, id: &str) -> Result<&dyn DrawNode, NodeError> {
        self.nodes
            .iter()
            .find(|n| n.id() == id)
            .map(|n| &**n)
            .ok_or_else(|| NodeError::not_found(format!("id '{id}'")))
    }

    pub fn by_id_mut(&mut self, id: &str) -> Result<&mut dyn DrawNode, NodeError> {
        match self.nodes.iter_mut().find(|n| n.id() == id) {
            Some(n) => Ok(&mut **n),
            None => Err(NodeError::not_found(format!("id '{id}'"))),
        }
    }

    /// First node whose concrete type is `T`.
    pub fn first_of<T: DrawNode>(&self) -> Result<&T, NodeError> {
        self.nodes
            .iter()
            .find_map(|n| (**n).as_any().downcast_ref::<T>())
            .ok_or_else(|| NodeError::not_found(format!("type {}", std::any::type_name::<T>())))
    }

    pub fn first_of_mut<T: DrawNode>(&mut self) -> Result<&mut T, NodeError> {
        self.nodes
            .iter_mut()
            .find_map(|n| (**n).as_any_mut().downcast_mut::<T>())
            .ok_or_else(|| NodeError::not_found(format!("type {}", std::any::type_name::<T>())))
    }

    /// Node with `id`, checked to be a `T`.
    pub fn with_id<T: DrawNode>(&self, id: &str) -> Result<&T, NodeError> {
        let node = self.by_id(id)?;
        node.as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(id))
    }

    pub fn with_id_mut<T: DrawNode>(&mut self, id: &str) -> Result<&mut T, NodeError> {
        let node = self.by_id_mut(id)?;
        node.as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch::<T>(id))
    }

    /// Forces a re-sort before the next frame.
    #[inline]
    pub fn should_sort(&mut self) {
        self.sort_dirty = true;
    }

    /// Whether an explicit request or a z-order change invalidated the order.
    pub fn needs_sort(&self) -> bool {
        self.sort_dirty || self.nodes.iter().any(|n| n.base().order_dirty())
    }

    /// Stable sort by ascending z-order; equal z keeps registration order.
    pub fn sort(&mut self) {
        self.nodes.sort_by_key(|n| n.z_order());
        for n in &mut self.nodes {
            n.base_mut().clear_order_dirty();
        }
        self.sort_dirty = false;
        log::debug!("draw nodes sorted: {:?}", self);
    }
}

fn mismatch<T>(id: &str) -> NodeError {
    NodeError::TypeMismatch { id: id.to_owned(), expected: std::any::type_name::<T>() }
}
