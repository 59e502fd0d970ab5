/// Identity, enable flag and z-order shared by every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBase {
    id: String,
    z_order: i32,
    enabled: bool,
    order_dirty: bool,
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBase {
    /// An enabled node at z-order 0. The id is assigned on registration.
    pub fn new() -> Self {
        Self {
            id: String::new(),
            z_order: 0,
            enabled: true,
            order_dirty: false,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    #[inline]
    pub fn set_z_order(&mut self, z: i32) {
        self.z_order = z;
        self.order_dirty = true;
    }

    /// Whether the z-order changed since the registry last sorted.
    #[inline]
    pub(crate) fn order_dirty(&self) -> bool {
        self.order_dirty
    }

    #[inline]
    pub(crate) fn clear_order_dirty(&mut self) {
        self.order_dirty = false;
    }
}
