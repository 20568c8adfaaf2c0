#![allow(dead_code)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;

use pumice::{TransformEngine, TransformOptions, TransformedCode};

/// The snippet the detector transforms to observe helper emission.
pub const PROBE: &str = "export default class Foo {}";

/// How the scripted engine renders the class probe.
#[derive(Debug, Clone, Copy)]
pub enum HelperMode {
    Inline,
    Runtime,
    Bundled,
    /// Output rewritten to CommonJS, losing the default export.
    ModuleRewrite,
    /// Output with no helper signature at all.
    Bare,
    /// Output that is not parseable as a module.
    Malformed,
}

/// A canned transform engine for driving the pipeline in tests.
pub struct ScriptedEngine {
    mode: HelperMode,
    used_helpers: Vec<String>,
    pub probe_calls: AtomicUsize,
    pub calls: Mutex<Vec<(String, TransformOptions)>>,
}

impl ScriptedEngine {
    pub fn new(mode: HelperMode) -> Self {
        Self::with_helpers(mode, &["classCallCheck"])
    }

    /// An engine that reports the given helpers for every real file.
    pub fn with_helpers(mode: HelperMode, helpers: &[&str]) -> Self {
        ScriptedEngine {
            mode,
            used_helpers: helpers.iter().map(|s| s.to_string()).collect(),
            probe_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn probe_output(&self) -> &'static str {
        match self.mode {
            HelperMode::Inline => {
                "function _classCallCheck(instance, Constructor) {}\n\
                 var Foo = function Foo() {\n  _classCallCheck(this, Foo);\n};\n\
                 export default Foo;"
            }
            HelperMode::Runtime => {
                "import _classCallCheck from 'babel-runtime/helpers/classCallCheck';\n\
                 var Foo = function Foo() {\n  _classCallCheck(this, Foo);\n};\n\
                 export { Foo as default };"
            }
            HelperMode::Bundled => {
                "var Foo = function Foo() {\n  babelHelpers.classCallCheck(this, Foo);\n};\n\
                 export default Foo;"
            }
            HelperMode::ModuleRewrite => {
                "\"use strict\";\n\
                 var Foo = function Foo() {};\n\
                 exports.default = Foo;"
            }
            HelperMode::Bare => {
                "var Foo = function Foo() {};\nexport default Foo;"
            }
            HelperMode::Malformed => "export default class Foo {",
        }
    }
}

impl TransformEngine for ScriptedEngine {
    fn transform(
        &self,
        code: &str,
        options: &TransformOptions,
    ) -> Result<TransformedCode> {
        self.calls
            .lock()
            .unwrap()
            .push((code.to_string(), options.clone()));

        if code == PROBE {
            self.probe_calls.fetch_add(1, Ordering::SeqCst);
            return Ok(TransformedCode {
                code: self.probe_output().to_string(),
                map: None,
                used_helpers: vec!["classCallCheck".to_string()],
            });
        }

        Ok(TransformedCode {
            code: format!("/* transformed */ {}", code),
            map: options.source_maps.then(|| "{}".to_string()),
            used_helpers: self.used_helpers.clone(),
        })
    }

    fn build_helpers(&self, whitelist: Option<&[String]>) -> Result<String> {
        let all = [
            ("typeof", "function (obj) { return typeof obj; }"),
            ("classCallCheck", "function (instance, Constructor) {}"),
            ("extends", "function (target) { return target; }"),
            (
                "instanceof",
                "function (left, right) { return left instanceof right; }",
            ),
            (
                "interopRequireDefault",
                "function (obj) { return babelHelpers.typeof(obj); }",
            ),
        ];
        let mut out = String::from("var babelHelpers = {};\n");
        for (name, body) in all.iter() {
            let wanted = whitelist
                .map(|list| list.iter().any(|w| w == name))
                .unwrap_or(true);
            if wanted {
                out.push_str(&format!("babelHelpers.{} = {};\n", name, body));
            }
        }
        Ok(out)
    }
}
