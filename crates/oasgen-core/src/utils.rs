//! String transformation utilities for file naming

/// Convert a string to UpperCamelCase, keeping existing capitals.
///
/// Words are split on any character that is not alphanumeric; the first
/// character of each word is uppercased and the rest is left untouched, so
/// acronyms survive (`HTTPResponse` stays `HTTPResponse`).
pub fn camelize(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Join optional prefix and suffix around a name with underscores, then camelize
pub fn camelize_with_affixes(prefix: Option<&str>, name: &str, suffix: Option<&str>) -> String {
    let joined = [prefix, Some(name), suffix]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    camelize(&joined)
}

/// Convert a dotted package name into a relative folder path
pub fn package_to_path(package: &str) -> String {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
