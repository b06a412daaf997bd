//! Base widget trait

use nodeboard_core::ElementId;

use crate::context::WidgetContext;

/// A widget backed by one element of the tree
pub trait Widget {
    /// Root element of the widget
    fn element(&self) -> ElementId;

    /// Attach the widget under `parent`
    fn mount(&self, ctx: &mut WidgetContext, parent: ElementId) -> bool {
        ctx.tree_mut().add_child(parent, self.element())
    }

    /// Detach the widget from its parent; it stays alive and can be mounted again
    fn unmount(&self, ctx: &mut WidgetContext) -> bool {
        ctx.tree_mut().remove_from_hierarchy(self.element())
    }
}
