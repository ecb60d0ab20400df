use crate::config::CaptionConfig;

/// Turn a file stem into the name printed under a product photo.
///
/// Separators become spaces first, then every occurrence of the
/// placeholder token is swapped for the label, so with the defaults
/// `product-007` reads `Product #007`.
pub fn display_name(stem: &str, rules: &CaptionConfig) -> String {
    let spaced: String = stem
        .chars()
        .map(|c| if rules.separators.contains(&c) { ' ' } else { c })
        .collect();
    if rules.placeholder.is_empty() {
        spaced
    } else {
        spaced.replace(&rules.placeholder, &rules.label)
    }
}
