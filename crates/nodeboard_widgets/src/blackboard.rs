//! Blackboard panel
//!
//! An overlay panel floating above a node-graph canvas. It hosts a titled
//! list of caller-owned content items and relays add/move/edit requests to
//! the host through optional callbacks; it never adds, moves or edits items
//! by itself.
//!
//! The panel is built from a template and stylesheet, can be dragged inside
//! its parent, resized from its corner handle, and switched between a
//! content-sized fixed layout and a scrollable one. Pointer-down, wheel and
//! drag-over events never bubble from the panel to the canvas.

use std::sync::{Arc, Mutex};

use nodeboard_core::ElementId;
use nodeboard_layout::{
    Capabilities, ElementBounds, ElementKind, ElementTree, OverflowMode, PositionMode,
    ResizeRestriction, TemplateLoader,
};

use crate::button::Button;
use crate::config::PanelConfig;
use crate::context::WidgetContext;
use crate::dragger::Dragger;
use crate::error::{BlackboardError, Result};
use crate::gesture_shield;
use crate::layout_mode::{LayoutMode, LayoutModeController};
use crate::resizer::Resizer;
use crate::scroll::ScrollContainer;
use crate::widget::Widget;

/// Class list of the panel root element
pub const PANEL_CLASS: &str = "blackboard";
/// Class added to the instantiated template root
pub const MAIN_CONTAINER_CLASS: &str = "mainContainer";
/// Class added to the header element
pub const HEADER_CLASS: &str = "blackboardHeader";

/// Element names the template must provide
pub mod names {
    pub const HEADER: &str = "header";
    pub const CONTENT: &str = "content";
    pub const ADD_BUTTON: &str = "addButton";
    pub const TITLE_LABEL: &str = "titleLabel";
    pub const SUBTITLE_LABEL: &str = "subTitleLabel";
    pub const CONTENT_CONTAINER: &str = "contentContainer";
}

/// Called with the panel element when the add button is activated
pub type AddItemCallback = Box<dyn FnMut(ElementId) + Send>;
/// Called with the panel element, the target index and the item to move
pub type MoveItemCallback = Box<dyn FnMut(ElementId, usize, ElementId) + Send>;
/// Called with the panel element, the item and its requested text
pub type EditTextCallback = Box<dyn FnMut(ElementId, ElementId, &str) + Send>;

#[derive(Default)]
struct RequestCallbacks {
    add_item: Option<AddItemCallback>,
    move_item: Option<MoveItemCallback>,
    edit_text: Option<EditTextCallback>,
}

/// Named template elements the panel wires up
struct TemplateParts {
    header: ElementId,
    content_root: ElementId,
    add_button: ElementId,
    title_label: ElementId,
    subtitle_label: ElementId,
    content_container: ElementId,
}

impl TemplateParts {
    fn find(tree: &ElementTree, root: ElementId) -> Result<Self> {
        let require = |name: &'static str| {
            tree.query(root, name)
                .ok_or(BlackboardError::MissingElement(name))
        };
        Ok(Self {
            header: require(names::HEADER)?,
            content_root: require(names::CONTENT)?,
            add_button: require(names::ADD_BUTTON)?,
            title_label: require(names::TITLE_LABEL)?,
            subtitle_label: require(names::SUBTITLE_LABEL)?,
            content_container: require(names::CONTENT_CONTAINER)?,
        })
    }
}

/// Blackboard panel widget
pub struct Blackboard {
    element: ElementId,
    main_container: ElementId,
    header: ElementId,
    title_label: ElementId,
    subtitle_label: ElementId,
    add_button: Button,
    resizer: Resizer,
    layout_mode: LayoutModeController,
    callbacks: Arc<Mutex<RequestCallbacks>>,
}

impl Blackboard {
    /// Build a panel from `config` and mount it under `parent`
    ///
    /// Fails if the template or stylesheet cannot be loaded, or if the
    /// template lacks one of the elements in [`names`]. Nothing is left in
    /// the tree on failure.
    pub fn new(
        ctx: &mut WidgetContext,
        parent: ElementId,
        config: &PanelConfig,
        loader: &dyn TemplateLoader,
    ) -> Result<Self> {
        let template = loader.load_template(&config.template)?;
        let style_sheet = loader.load_style_sheet(&config.style_sheet)?;

        let tree = ctx.tree_mut();
        let element = tree.create(ElementKind::Container);
        tree.add_style_sheet(element, style_sheet);
        let main_container = template.instantiate(tree);
        tree.add_class(main_container, MAIN_CONTAINER_CLASS);
        tree.add_child(element, main_container);

        let parts = match TemplateParts::find(ctx.tree(), main_container) {
            Ok(parts) => parts,
            Err(err) => {
                ctx.remove_element(element);
                tracing::warn!(%err, "blackboard template rejected");
                return Err(err);
            }
        };
        let TemplateParts {
            header,
            content_root,
            add_button,
            title_label,
            subtitle_label,
            content_container,
        } = parts;

        let tree = ctx.tree_mut();
        tree.add_class(header, HEADER_CLASS);
        tree.set_capabilities(element, Capabilities::MOVABLE | Capabilities::RESIZABLE);
        tree.update_inline_style(element, |style| {
            style.position = Some(PositionMode::Absolute);
            style.overflow = Some(OverflowMode::Hidden);
        });
        tree.clear_classes(element);
        tree.add_class(element, PANEL_CLASS);

        // The dragger must see pointer-down before the shield stops it
        Dragger::new(config.clamp_to_parent_edges).attach(ctx, element);

        let callbacks = Arc::new(Mutex::new(RequestCallbacks::default()));
        let add_button = Button::attach(ctx, add_button);
        let on_add = callbacks.clone();
        add_button.set_on_click(move || {
            if let Some(ref mut callback) = on_add.lock().unwrap().add_item {
                callback(element);
            }
        });

        let layout_mode = LayoutModeController::new(
            ctx,
            element,
            content_root,
            content_container,
            (config.default_width, config.default_height),
        );
        let resizer = Resizer::attach(ctx, element, (config.min_width, config.min_height));
        gesture_shield::install(ctx, element);

        if !ctx.tree_mut().add_child(parent, element) {
            tracing::warn!(?parent, "blackboard parent is not in the tree");
        }

        let mut panel = Self {
            element,
            main_container,
            header,
            title_label,
            subtitle_label,
            add_button,
            resizer,
            layout_mode,
            callbacks,
        };
        if let Some(title) = &config.title {
            panel.set_title(ctx, title.as_str());
        }
        if let Some(subtitle) = &config.subtitle {
            panel.set_subtitle(ctx, subtitle.as_str());
        }
        if config.scrollable {
            panel.set_scrollable(ctx, true);
        }

        tracing::debug!(element = ?panel.element, scrollable = config.scrollable, "blackboard created");
        Ok(panel)
    }

    // =========================================================================
    // Text
    // =========================================================================

    pub fn title<'a>(&self, ctx: &'a WidgetContext) -> &'a str {
        ctx.tree().text(self.title_label).unwrap_or_default()
    }

    pub fn set_title(&self, ctx: &mut WidgetContext, title: impl Into<String>) {
        ctx.tree_mut().set_text(self.title_label, title);
    }

    pub fn subtitle<'a>(&self, ctx: &'a WidgetContext) -> &'a str {
        ctx.tree().text(self.subtitle_label).unwrap_or_default()
    }

    pub fn set_subtitle(&self, ctx: &mut WidgetContext, subtitle: impl Into<String>) {
        ctx.tree_mut().set_text(self.subtitle_label, subtitle);
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Where content items are mounted
    ///
    /// The element is stable, but its parent changes with the layout mode.
    pub fn content_container(&self) -> ElementId {
        self.layout_mode.content_container()
    }

    /// The template's `content` element
    pub fn content_root(&self) -> ElementId {
        self.layout_mode.content_root()
    }

    pub fn main_container(&self) -> ElementId {
        self.main_container
    }

    pub fn header(&self) -> ElementId {
        self.header
    }

    pub fn add_button(&self) -> &Button {
        &self.add_button
    }

    pub fn resizer(&self) -> &Resizer {
        &self.resizer
    }

    // =========================================================================
    // Layout mode
    // =========================================================================

    pub fn scrollable(&self) -> bool {
        self.layout_mode.is_scrollable()
    }

    /// Switch between fixed and scrollable layout; setting the current value does nothing
    pub fn set_scrollable(&mut self, ctx: &mut WidgetContext, scrollable: bool) -> bool {
        let mode = if scrollable {
            LayoutMode::Scrollable
        } else {
            LayoutMode::Fixed
        };
        self.layout_mode.set_mode(ctx, mode)
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode.mode()
    }

    /// The scroll container, once the panel has been scrollable
    pub fn scroll_container(&self) -> Option<&ScrollContainer> {
        self.layout_mode.scroll_container()
    }

    pub fn resize_restriction(&self, ctx: &WidgetContext) -> ResizeRestriction {
        ctx.tree().resize_restriction(self.element)
    }

    pub fn capabilities(&self, ctx: &WidgetContext) -> Capabilities {
        ctx.tree().capabilities(self.element)
    }

    /// Measured bounds of the panel (NaN size until measured)
    pub fn layout(&self, ctx: &WidgetContext) -> ElementBounds {
        ctx.tree().layout(self.element)
    }

    // =========================================================================
    // Content items
    // =========================================================================

    pub fn add_item(&self, ctx: &mut WidgetContext, item: ElementId) -> bool {
        ctx.tree_mut().add_child(self.content_container(), item)
    }

    pub fn insert_item(&self, ctx: &mut WidgetContext, index: usize, item: ElementId) -> bool {
        ctx.tree_mut()
            .insert_child(self.content_container(), index, item)
    }

    /// Detach `item` if it is mounted in this panel
    pub fn remove_item(&self, ctx: &mut WidgetContext, item: ElementId) -> bool {
        if ctx.tree().parent(item) != Some(self.content_container()) {
            return false;
        }
        ctx.tree_mut().remove_from_hierarchy(item)
    }

    pub fn items<'a>(&self, ctx: &'a WidgetContext) -> &'a [ElementId] {
        ctx.tree().children(self.content_container())
    }

    // =========================================================================
    // Requests
    // =========================================================================

    pub fn set_on_add_item_requested<F>(&self, callback: F)
    where
        F: FnMut(ElementId) + Send + 'static,
    {
        self.callbacks.lock().unwrap().add_item = Some(Box::new(callback));
    }

    pub fn set_on_move_item_requested<F>(&self, callback: F)
    where
        F: FnMut(ElementId, usize, ElementId) + Send + 'static,
    {
        self.callbacks.lock().unwrap().move_item = Some(Box::new(callback));
    }

    pub fn set_on_edit_text_requested<F>(&self, callback: F)
    where
        F: FnMut(ElementId, ElementId, &str) + Send + 'static,
    {
        self.callbacks.lock().unwrap().edit_text = Some(Box::new(callback));
    }

    pub fn clear_on_add_item_requested(&self) {
        self.callbacks.lock().unwrap().add_item = None;
    }

    pub fn clear_on_move_item_requested(&self) {
        self.callbacks.lock().unwrap().move_item = None;
    }

    pub fn clear_on_edit_text_requested(&self) {
        self.callbacks.lock().unwrap().edit_text = None;
    }

    /// Ask the host to move `item` to `target_index`
    pub fn request_move_item(&self, target_index: usize, item: ElementId) {
        if let Some(ref mut callback) = self.callbacks.lock().unwrap().move_item {
            callback(self.element, target_index, item);
        }
    }

    /// Ask the host to change the text of `item`
    pub fn request_edit_text(&self, item: ElementId, new_text: &str) {
        if let Some(ref mut callback) = self.callbacks.lock().unwrap().edit_text {
            callback(self.element, item, new_text);
        }
    }

    /// Activate the add button as if it was clicked
    pub fn activate_add_button(&self) -> bool {
        self.add_button.activate()
    }
}

impl Widget for Blackboard {
    fn element(&self) -> ElementId {
        self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets;
    use nodeboard_layout::MemoryLoader;

    fn build(ctx: &mut WidgetContext, config: &PanelConfig) -> (ElementId, Blackboard) {
        let canvas = ctx.tree_mut().create(ElementKind::Container);
        let panel = Blackboard::new(ctx, canvas, config, &assets::builtin_loader()).unwrap();
        (canvas, panel)
    }

    #[test]
    fn test_construction_shape() {
        let mut ctx = WidgetContext::new();
        let (canvas, panel) = build(&mut ctx, &PanelConfig::default());
        let tree = ctx.tree();

        assert_eq!(tree.parent(panel.element()), Some(canvas));
        assert_eq!(tree.classes(panel.element()), [PANEL_CLASS.to_string()]);
        assert!(tree.has_class(panel.main_container(), MAIN_CONTAINER_CLASS));
        assert!(tree.has_class(panel.header(), HEADER_CLASS));
        assert_eq!(tree.parent(panel.content_container()), Some(panel.content_root()));
        assert_eq!(tree.parent(panel.resizer().element()), Some(panel.element()));
        assert_eq!(
            panel.capabilities(&ctx),
            Capabilities::MOVABLE | Capabilities::RESIZABLE
        );
        assert!(!panel.scrollable());
        assert!(panel.scroll_container().is_none());
    }

    #[test]
    fn test_panel_style() {
        let mut ctx = WidgetContext::new();
        let (_, panel) = build(&mut ctx, &PanelConfig::default());

        let style = ctx.tree().effective_style(panel.element());
        assert_eq!(style.position, Some(PositionMode::Absolute));
        assert_eq!(style.overflow, Some(OverflowMode::Hidden));
        assert_eq!(style.min_width, Some(100.0));
    }

    #[test]
    fn test_title_and_subtitle() {
        let mut ctx = WidgetContext::new();
        let config = PanelConfig::default().title("Variables").subtitle("Shader");
        let (_, panel) = build(&mut ctx, &config);

        assert_eq!(panel.title(&ctx), "Variables");
        assert_eq!(panel.subtitle(&ctx), "Shader");

        panel.set_title(&mut ctx, "");
        assert_eq!(panel.title(&ctx), "");
    }

    #[test]
    fn test_scrollable_config() {
        let mut ctx = WidgetContext::new();
        let (_, panel) = build(&mut ctx, &PanelConfig::default().scrollable(true));

        assert!(panel.scrollable());
        let bounds = panel.layout(&ctx);
        assert_eq!((bounds.width, bounds.height), (200.0, 400.0));
    }

    #[test]
    fn test_missing_element_leaves_no_trace() {
        let mut ctx = WidgetContext::new();
        let canvas = ctx.tree_mut().create(ElementKind::Container);
        let loader = MemoryLoader::new()
            .with_source(
                assets::TEMPLATE_PATH,
                "[root]\n[[root.children]]\nname = \"header\"\n",
            )
            .with_source(assets::STYLE_SHEET_PATH, "");

        let err = Blackboard::new(&mut ctx, canvas, &PanelConfig::default(), &loader)
            .err()
            .unwrap();
        assert!(matches!(err, BlackboardError::MissingElement(names::CONTENT)));
        assert_eq!(ctx.tree().len(), 1);
        assert!(ctx.tree().children(canvas).is_empty());
    }

    #[test]
    fn test_items_follow_content_container() {
        let mut ctx = WidgetContext::new();
        let (_, mut panel) = build(&mut ctx, &PanelConfig::default());
        let a = ctx.tree_mut().create(ElementKind::Label);
        let b = ctx.tree_mut().create(ElementKind::Label);

        assert!(panel.add_item(&mut ctx, a));
        panel.set_scrollable(&mut ctx, true);
        assert!(panel.insert_item(&mut ctx, 0, b));
        assert_eq!(panel.items(&ctx), [b, a]);

        assert!(panel.remove_item(&mut ctx, b));
        assert!(!panel.remove_item(&mut ctx, b));
        assert_eq!(panel.items(&ctx), [a]);
    }
}
