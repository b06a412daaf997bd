//! Shared fixtures for the widget integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use nodeboard_core::events::EventType;
use nodeboard_core::ElementId;
use nodeboard_layout::{ElementBounds, ElementKind};
use nodeboard_widgets::{assets, Blackboard, PanelConfig, WidgetContext};

/// Route `tracing` output through the test harness (`RUST_LOG=debug` to see it)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Scene {
    pub ctx: WidgetContext,
    pub canvas: ElementId,
    pub panel: Blackboard,
}

/// A 800x600 canvas hosting a panel built from the embedded assets
pub fn scene(config: PanelConfig) -> Scene {
    init_tracing();
    let mut ctx = WidgetContext::new();
    let canvas = ctx.tree_mut().create(ElementKind::Container);
    ctx.tree_mut().update_inline_style(canvas, |style| {
        style.width = Some(800.0);
        style.height = Some(600.0);
    });
    ctx.tree_mut()
        .set_layout(canvas, ElementBounds::new(0.0, 0.0, 800.0, 600.0));

    let panel = Blackboard::new(&mut ctx, canvas, &config, &assets::builtin_loader())
        .expect("embedded assets build a panel");
    Scene { ctx, canvas, panel }
}

/// Count how many times `event_type` reaches `element`
pub fn counter(ctx: &mut WidgetContext, element: ElementId, event_type: EventType) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = count.clone();
    ctx.listen(element, event_type, move |_, _| {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    count
}

pub fn count(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
