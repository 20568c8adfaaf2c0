//! Synthesis of the shared virtual helper module.
use anyhow::Result;
use regex::Regex;

use crate::engine::TransformEngine;
use crate::options::TransformOptions;

/// Reserved identifier for the virtual helper module.
///
/// The NUL prefix cannot occur in a real file path, so the id never
/// collides with a module on disk and cannot be imported by hand.
pub const HELPERS_ID: &str = "\0babelHelpers";

/// Helpers whose names are reserved words and cannot be used as
/// export bindings directly.
pub const KEYWORD_HELPERS: [&str; 3] = ["typeof", "extends", "instanceof"];

/// Build the source of the shared helper module.
///
/// The engine's helper library assigns each helper onto a
/// `babelHelpers` namespace object, one per top level line. Each of
/// those lines becomes an explicit export; keyword named helpers are
/// renamed with a leading underscore and re-exported under their
/// original names in a trailing export clause. The rewritten text is
/// run back through the engine so the helper module itself is
/// downleveled consistently with the rest of the build.
pub fn synthesize(
    engine: &dyn TransformEngine,
    whitelist: Option<&[String]>,
    options: &TransformOptions,
) -> Result<String> {
    let keywords = KEYWORD_HELPERS.join("|");
    let keyword_decl =
        Regex::new(&format!(r"(?m)^babelHelpers\.({}) =", keywords))?;
    let keyword_ref = Regex::new(&format!(r"babelHelpers\.({})", keywords))?;
    let decl = Regex::new(r"(?m)^babelHelpers\.")?;

    let raw = engine.build_helpers(whitelist)?;

    let mut source = keyword_decl
        .replace_all(&raw, "export var _$1 =")
        .into_owned();
    source = keyword_ref.replace_all(&source, "_$1").into_owned();
    source = decl.replace_all(&source, "export var ").into_owned();

    let aliases = KEYWORD_HELPERS
        .iter()
        .map(|word| format!("_{} as {}", word, word))
        .collect::<Vec<_>>()
        .join(", ");
    source.push_str(&format!("\n\nexport {{ {} }};\n", aliases));

    let transformed = engine.transform(&source, options)?;
    Ok(transformed.code)
}
