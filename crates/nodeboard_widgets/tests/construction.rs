//! Building panels from templates and configuration files

mod common;

use common::init_tracing;
use nodeboard_layout::{DirectoryLoader, ElementKind, MemoryLoader, TemplateError};
use nodeboard_widgets::blackboard::names;
use nodeboard_widgets::{assets, Blackboard, BlackboardError, PanelConfig, WidgetContext};

const MINIMAL_TEMPLATE: &str = r#"
[root]

[[root.children]]
name = "header"

[[root.children.children]]
name = "titleLabel"
kind = "label"

[[root.children.children]]
name = "subTitleLabel"
kind = "label"

[[root.children.children]]
name = "addButton"
kind = "button"

[[root.children]]
name = "content"

[[root.children.children]]
name = "contentContainer"
"#;

fn build(loader: &MemoryLoader) -> (WidgetContext, Result<Blackboard, BlackboardError>) {
    init_tracing();
    let mut ctx = WidgetContext::new();
    let canvas = ctx.tree_mut().create(ElementKind::Container);
    let panel = Blackboard::new(&mut ctx, canvas, &PanelConfig::default(), loader);
    (ctx, panel)
}

#[test]
fn custom_template_with_required_names_builds() {
    let loader = MemoryLoader::new()
        .with_source(assets::TEMPLATE_PATH, MINIMAL_TEMPLATE)
        .with_source(assets::STYLE_SHEET_PATH, "[rules.blackboard]\nmin-width = 50\n");

    let (ctx, panel) = build(&loader);
    let panel = panel.expect("template has every required element");
    assert_eq!(panel.title(&ctx), "");
    assert!(ctx.tree().has_class(panel.header(), "blackboardHeader"));
}

#[test]
fn missing_template_is_reported() {
    let loader = MemoryLoader::new().with_source(assets::STYLE_SHEET_PATH, "");

    let (ctx, panel) = build(&loader);
    match panel {
        Err(BlackboardError::Template(TemplateError::NotFound(path))) => {
            assert_eq!(path, assets::TEMPLATE_PATH)
        }
        other => panic!("expected a missing template, got {:?}", other.err()),
    }
    assert_eq!(ctx.tree().len(), 1, "nothing but the canvas is left behind");
}

#[test]
fn malformed_stylesheet_is_reported() {
    let loader = MemoryLoader::new()
        .with_source(assets::TEMPLATE_PATH, MINIMAL_TEMPLATE)
        .with_source(assets::STYLE_SHEET_PATH, "[rules.blackboard]\ncolour = \"red\"\n");

    let (_, panel) = build(&loader);
    assert!(matches!(
        panel,
        Err(BlackboardError::Template(TemplateError::Parse { .. }))
    ));
}

#[test]
fn each_required_name_is_checked() {
    for missing in [
        names::HEADER,
        names::CONTENT,
        names::ADD_BUTTON,
        names::TITLE_LABEL,
        names::SUBTITLE_LABEL,
        names::CONTENT_CONTAINER,
    ] {
        let renamed = MINIMAL_TEMPLATE.replace(&format!("name = \"{missing}\""), "name = \"other\"");
        let loader = MemoryLoader::new()
            .with_source(assets::TEMPLATE_PATH, renamed)
            .with_source(assets::STYLE_SHEET_PATH, "");

        let (ctx, panel) = build(&loader);
        match panel {
            Err(BlackboardError::MissingElement(name)) => assert_eq!(name, missing),
            other => panic!("expected {missing} to be missing, got {:?}", other.err()),
        }
        assert_eq!(ctx.tree().len(), 1);
    }
}

#[test]
fn directory_loader_reads_the_shipped_assets() {
    init_tracing();
    let loader = DirectoryLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"));
    let config = PanelConfig::from_toml_str(
        r#"
        title = "Blackboard"
        subtitle = "Shader Graph"
        "#,
        "panel.toml",
    )
    .unwrap();

    let mut ctx = WidgetContext::new();
    let canvas = ctx.tree_mut().create(ElementKind::Container);
    let panel = Blackboard::new(&mut ctx, canvas, &config, &loader).unwrap();
    assert_eq!(panel.title(&ctx), "Blackboard");
    assert_eq!(panel.subtitle(&ctx), "Shader Graph");
}

#[test]
fn directory_loader_reports_missing_files() {
    let loader = DirectoryLoader::new("/nonexistent/nodeboard");
    let mut ctx = WidgetContext::new();
    let canvas = ctx.tree_mut().create(ElementKind::Container);

    let err = Blackboard::new(&mut ctx, canvas, &PanelConfig::default(), &loader)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        BlackboardError::Template(TemplateError::NotFound(_))
    ));
    assert!(err.to_string().contains("blackboard.toml"));
}
