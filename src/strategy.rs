//! Detection of the engine's helper emission strategy.
//!
//! Which strategy is active depends on the combination of rules and
//! presets the engine was configured with and is not declared
//! anywhere, so it is inferred empirically: a fixed class snippet is
//! transformed with class lowering forced on and the output is
//! inspected for the signature of each strategy.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use dashmap::DashMap;

use swc_common::{
    errors::{emitter::ColorConfig, Handler},
    FileName, SourceMap,
};
use swc_ecma_ast::*;
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax};
use swc_ecma_visit::{Node, Visit, VisitWith};

use crate::engine::TransformEngine;
use crate::error::Error;
use crate::options::TransformOptions;

/// How the engine makes helpers available to transformed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperStrategy {
    /// Helpers are emitted as standalone functions in each file.
    Inline,
    /// Helpers are imported from a runtime support package.
    Runtime,
    /// Helpers are referenced through a shared `babelHelpers`
    /// namespace that must be supplied as a module.
    Bundled,
}

/// The snippet transformed to observe helper emission.
const PROBE: &str = "export default class Foo {}";

/// Class lowering rule appended to the probe option set.
const CLASS_LOWERING_RULE: &str = "transform-es2015-classes";

/// Probes the engine once per directory and caches the result.
///
/// Directories may carry local configuration overlays, so the cache
/// key is the directory of the file being transformed. Entries are
/// never invalidated; a concurrent duplicate probe for the same
/// directory is harmless because classification is a pure function
/// of the option set.
#[derive(Default)]
pub struct StrategyDetector {
    cache: DashMap<PathBuf, HelperStrategy>,
}

impl StrategyDetector {
    /// Create a detector with an empty cache.
    pub fn new() -> Self {
        Default::default()
    }

    /// Classify the helper strategy for files in `dir`.
    pub fn detect(
        &self,
        engine: &dyn TransformEngine,
        options: &TransformOptions,
        dir: &Path,
    ) -> Result<HelperStrategy> {
        if let Some(entry) = self.cache.get(dir) {
            return Ok(*entry.value());
        }

        let mut probe_options = options.clone();
        // Engine side file filtering must not swallow the probe.
        probe_options.extra.remove("only");
        probe_options.extra.remove("ignore");
        probe_options.filename =
            Some(dir.join("x.js").to_string_lossy().into_owned());
        probe_options
            .plugins
            .push(CLASS_LOWERING_RULE.to_string());

        let output = engine.transform(PROBE, &probe_options)?;
        let strategy = classify(&output.code)?;

        log::debug!(
            "Detected helper strategy {:?} for {}",
            strategy,
            dir.display()
        );

        self.cache.insert(dir.to_path_buf(), strategy);
        Ok(strategy)
    }
}

/// Classify probe output by the shapes found in its syntax tree.
fn classify(code: &str) -> Result<HelperStrategy> {
    let module = parse_probe(code)?;

    let mut scan = ProbeScan::default();
    module.visit_children_with(&mut scan);

    if !scan.export_default {
        return Err(Error::ModuleTransformDetected.into());
    }
    if scan.runtime_import {
        return Ok(HelperStrategy::Runtime);
    }
    if scan.inline_definition {
        return Ok(HelperStrategy::Inline);
    }
    if scan.bundled_reference {
        return Ok(HelperStrategy::Bundled);
    }
    Err(Error::UnknownHelperShape.into())
}

fn parse_probe(code: &str) -> Result<Module> {
    let sm: Arc<SourceMap> = Arc::new(Default::default());
    let handler = Handler::with_tty_emitter(
        ColorConfig::Auto,
        true,
        false,
        Some(sm.clone()),
    );

    let fm = sm.new_source_file(
        FileName::Custom("probe-output.js".into()),
        code.into(),
    );

    let lexer = Lexer::new(
        Syntax::Es(Default::default()),
        Default::default(),
        StringInput::from(&*fm),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    for e in parser.take_errors() {
        e.into_diagnostic(&handler).emit();
    }

    parser
        .parse_module()
        .map_err(|e| {
            e.into_diagnostic(&handler).emit();
            Error::ProbeParse.into()
        })
}

/// Signatures observed in the probe output.
#[derive(Default, Debug)]
struct ProbeScan {
    export_default: bool,
    runtime_import: bool,
    inline_definition: bool,
    bundled_reference: bool,
}

impl Visit for ProbeScan {
    fn visit_module_item(&mut self, n: &ModuleItem, _: &dyn Node) {
        if let ModuleItem::ModuleDecl(decl) = n {
            match decl {
                // export default class Foo {} / export default Foo;
                ModuleDecl::ExportDefaultDecl(_)
                | ModuleDecl::ExportDefaultExpr(_) => {
                    self.export_default = true;
                }
                // export { Foo as default };
                ModuleDecl::ExportNamed(export) => {
                    for spec in export.specifiers.iter() {
                        if let ExportSpecifier::Named(named) = spec {
                            let exported = named
                                .exported
                                .as_ref()
                                .unwrap_or(&named.orig);
                            if exported.sym.as_ref() == "default" {
                                self.export_default = true;
                            }
                        }
                    }
                }
                // import _classCallCheck from '...';
                ModuleDecl::Import(import) => {
                    for spec in import.specifiers.iter() {
                        let local = match spec {
                            ImportSpecifier::Default(item) => &item.local,
                            ImportSpecifier::Named(item) => &item.local,
                            ImportSpecifier::Namespace(item) => &item.local,
                        };
                        if local.sym.as_ref() == "_classCallCheck" {
                            self.runtime_import = true;
                        }
                    }
                    // Import locals are bindings, not references.
                    return;
                }
                _ => {}
            }
        }
        n.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, n: &FnDecl, _: &dyn Node) {
        if n.ident.sym.as_ref() == "_classCallCheck" {
            self.inline_definition = true;
        }
        n.visit_children_with(self);
    }

    fn visit_ident(&mut self, n: &Ident, _: &dyn Node) {
        if n.sym.as_ref() == "babelHelpers" {
            self.bundled_reference = true;
        }
    }
}
