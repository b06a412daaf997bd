//! Embedded panel template and stylesheet

use nodeboard_layout::MemoryLoader;

/// Path of the blackboard template in [`builtin_loader`]
pub const TEMPLATE_PATH: &str = "blackboard.toml";
/// Path of the blackboard stylesheet in [`builtin_loader`]
pub const STYLE_SHEET_PATH: &str = "blackboard.style.toml";

const TEMPLATE: &str = include_str!("../assets/blackboard.toml");
const STYLE_SHEET: &str = include_str!("../assets/blackboard.style.toml");

/// Loader serving the built-in blackboard assets
pub fn builtin_loader() -> MemoryLoader {
    MemoryLoader::new()
        .with_source(TEMPLATE_PATH, TEMPLATE)
        .with_source(STYLE_SHEET_PATH, STYLE_SHEET)
}
