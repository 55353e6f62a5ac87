/// JSON-quotes `text`, which is also a valid TypeScript and C string literal
/// for the identifiers and labels that reach the generators.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Converts a snake_case field name to lowerCamelCase, the way protobufjs
/// names properties of decoded messages (e.g. "build_id" becomes "buildId").
/// Only an underscore followed by a lowercase letter, itself followed by a
/// lowercase letter or the end of the name, is folded.
pub fn to_camel_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut camel = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if i > 0 && c == '_' {
            if let Some(&next) = chars.get(i + 1) {
                let folds = chars.get(i + 2).map_or(true, |f| f.is_ascii_lowercase());
                if next.is_ascii_lowercase() && folds {
                    camel.push(next.to_ascii_uppercase());
                    i += 2;
                    continue;
                }
            }
        }
        camel.push(c);
        i += 1;
    }
    camel
}

/// Converts a name to UPPER_SNAKE_CASE for C macros.
/// Consecutive uppercase letters stay together, so acronyms remain intact
/// (e.g. "PumpCtl" becomes "PUMP_CTL", "ADCTlm" becomes "ADC_TLM").
pub fn to_upper_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut snake = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            // Insert an underscore if the previous character is not uppercase,
            // or if the next character exists and is lowercase.
            if (!prev.is_uppercase() && prev != '_')
                || (prev.is_uppercase() && i + 1 < chars.len() && chars[i + 1].is_lowercase())
            {
                snake.push('_');
            }
        }
        snake.extend(c.to_uppercase());
    }
    snake
}

/// Escapes C reserved words by suffixing with an underscore.
pub fn escape_c_keyword(s: &str) -> String {
    let keywords = [
        "auto", "bool", "break", "case", "char", "const", "continue", "default",
        "do", "double", "else", "enum", "extern", "false", "float", "for", "goto",
        "if", "inline", "int", "long", "register", "restrict", "return", "short",
        "signed", "sizeof", "static", "struct", "switch", "true", "typedef",
        "union", "unsigned", "void", "volatile", "while",
    ];
    if keywords.contains(&s) {
        format!("{}_", s)
    } else {
        s.to_string()
    }
}
