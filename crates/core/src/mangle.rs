//! Class name mangling.
//!
//! A class compiled by the bytecode-to-native translator exposes its type
//! descriptor under an Itanium-style nested name:
//! `_ZN` + `<len><component>`... + `6class$E`, where `<len>` is the byte length
//! of each dotted component.

/// Prefix shared by every mangled class symbol.
pub const CLASS_SYMBOL_PREFIX: &str = "_ZN";

/// Trailer naming the `class$` descriptor and closing the nested name.
pub const CLASS_SYMBOL_SUFFIX: &str = "6class$E";

/// Mangle a fully-qualified, dot-separated class name into its class symbol.
///
/// Components are not escaped. Trailing empty components (from trailing dots)
/// are dropped; an empty input yields the degenerate `_ZN06class$E`.
///
/// ```
/// use jarlink_core::mangle::mangle_class_symbol;
/// assert_eq!(mangle_class_symbol("com.example.Foo"), "_ZN3com7example3Foo6class$E");
/// ```
pub fn mangle_class_symbol(qualified_name: &str) -> String {
    let mut symbol = String::with_capacity(
        CLASS_SYMBOL_PREFIX.len() + qualified_name.len() * 2 + CLASS_SYMBOL_SUFFIX.len(),
    );
    symbol.push_str(CLASS_SYMBOL_PREFIX);
    for component in components(qualified_name) {
        // `len()` is the UTF-8 byte length, which is what the linker sees.
        symbol.push_str(&component.len().to_string());
        symbol.push_str(component);
    }
    symbol.push_str(CLASS_SYMBOL_SUFFIX);
    symbol
}

/// Whether `symbol` has the shape of a mangled class symbol.
pub fn is_class_symbol(symbol: &str) -> bool {
    symbol.starts_with(CLASS_SYMBOL_PREFIX) && symbol.ends_with(CLASS_SYMBOL_SUFFIX)
}

fn components(qualified_name: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = qualified_name.split('.').collect();
    if qualified_name.contains('.') {
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
    }
    parts
}
