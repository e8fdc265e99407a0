//! The `typescript-express-server` generator.

use std::collections::{BTreeMap, BTreeSet};

use super::{CodeGenerator, GeneratorType, SupportingFile};

const NAME: &str = "typescript-express-server";

const TYPE_MAPPING: &[(&str, &str)] = &[
    ("Array", "Array"),
    ("array", "Array"),
    ("List", "Array"),
    ("set", "Set"),
    ("map", "Record"),
    ("boolean", "boolean"),
    ("string", "string"),
    ("char", "string"),
    ("int", "number"),
    ("integer", "number"),
    ("long", "number"),
    ("short", "number"),
    ("float", "number"),
    ("double", "number"),
    ("number", "number"),
    ("decimal", "string"),
    ("date", "string"),
    ("DateTime", "Date"),
    ("object", "object"),
    ("ByteArray", "string"),
    ("binary", "Buffer"),
    ("file", "Buffer"),
    ("UUID", "string"),
    ("URI", "string"),
    ("AnyType", "any"),
];

const INSTANTIATION_TYPES: &[(&str, &str)] = &[("array", "Array"), ("map", "Record")];

const PRIMITIVES: &[&str] = &[
    "string", "String", "boolean", "Boolean", "Double", "Integer", "Long", "Float", "Object",
    "Array", "Date", "number", "any", "object", "Buffer", "Error", "Map", "Set", "Record",
];

const RESERVED_WORDS: &[&str] = &[
    "abstract", "await", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "debugger", "default", "delete", "do", "double", "else", "enum", "export",
    "extends", "false", "final", "finally", "float", "for", "function", "goto", "if",
    "implements", "import", "in", "instanceof", "int", "interface", "let", "long", "native",
    "new", "null", "package", "private", "protected", "public", "return", "short", "static",
    "super", "switch", "synchronized", "this", "throw", "transient", "true", "try", "typeof",
    "var", "void", "volatile", "while", "with", "yield",
];

/// Emits an Express server written in TypeScript
#[derive(Debug, Clone, Copy, Default)]
pub struct TypescriptExpressServerGenerator;

impl TypescriptExpressServerGenerator {
    pub const NAME: &'static str = NAME;

    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for TypescriptExpressServerGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help(&self) -> &'static str {
        "Generates a typescript-express-server server."
    }

    fn generator_type(&self) -> GeneratorType {
        GeneratorType::Server
    }

    fn output_folder(&self) -> String {
        format!("generated-code/{}", NAME)
    }

    fn embedded_template_dir(&self) -> &'static str {
        NAME
    }

    fn api_package(&self) -> &'static str {
        "Apis"
    }

    fn model_package(&self) -> &'static str {
        "Models"
    }

    fn model_template_files(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("model.mustache".to_string(), ".zz".to_string())])
    }

    fn api_template_files(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("api.mustache".to_string(), ".zz".to_string())])
    }

    fn supporting_files(&self) -> Vec<SupportingFile> {
        vec![SupportingFile::new("README.mustache", "", "README.md")]
    }

    fn type_mapping(&self) -> BTreeMap<String, String> {
        to_map(TYPE_MAPPING)
    }

    fn instantiation_types(&self) -> BTreeMap<String, String> {
        to_map(INSTANTIATION_TYPES)
    }

    fn language_specific_primitives(&self) -> BTreeSet<String> {
        PRIMITIVES.iter().map(|p| p.to_string()).collect()
    }

    fn reserved_words(&self) -> BTreeSet<String> {
        RESERVED_WORDS.iter().map(|w| w.to_string()).collect()
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
