//! Reserved-word tables per language.

/// Keyword table for one language.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub constants: &'static [&'static str],
}

// Python 3 reserved words (`keyword.kwlist`), constants split out.
const PYTHON: KeywordSet = KeywordSet {
    name: "python",
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue",
        "def", "del", "elif", "else", "except", "finally", "for", "from",
        "global", "if", "import", "in", "is", "lambda", "nonlocal", "not",
        "or", "pass", "raise", "return", "try", "while", "with", "yield",
    ],
    constants: &["True", "False", "None"],
};

const RUST: KeywordSet = KeywordSet {
    name: "rust",
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn",
        "else", "enum", "extern", "fn", "for", "if", "impl", "in", "let",
        "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
        "self", "Self", "static", "struct", "super", "trait", "type",
        "unsafe", "use", "where", "while", "yield",
    ],
    constants: &["true", "false"],
};

const JAVASCRIPT: KeywordSet = KeywordSet {
    name: "javascript",
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const",
        "continue", "debugger", "default", "delete", "do", "else", "export",
        "extends", "finally", "for", "from", "function", "if", "import",
        "in", "instanceof", "let", "new", "of", "return", "static", "super",
        "switch", "this", "throw", "try", "typeof", "var", "void", "while",
        "with", "yield",
    ],
    constants: &["true", "false", "null", "undefined", "NaN", "Infinity"],
};

const ALL: &[KeywordSet] = &[PYTHON, RUST, JAVASCRIPT];

/// Looks up a keyword table by language name or common alias.
pub fn keyword_set(language: &str) -> Option<KeywordSet> {
    let name = match language.to_ascii_lowercase().as_str() {
        "python" | "py" => "python",
        "rust" | "rs" => "rust",
        "javascript" | "js" | "jsx" | "mjs" => "javascript",
        _ => return None,
    };
    ALL.iter().find(|set| set.name == name).copied()
}

/// Names of every language with a keyword table.
pub fn supported_languages() -> Vec<&'static str> {
    ALL.iter().map(|set| set.name).collect()
}
