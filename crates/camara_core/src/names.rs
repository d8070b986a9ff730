use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical full name as it appears in the registry: "Apellido, Nombre".
pub fn nombre_completo(apellido: &str, nombre: &str) -> String {
    format!("{}, {}", apellido.trim(), nombre.trim())
}

/// Normalize a free-text name into a comparison-safe slug: lowercase,
/// diacritics folded, punctuation dropped, whitespace runs collapsed.
/// Total and idempotent; any input yields some slug.
pub fn slug(nombre: &str) -> String {
    let folded: String = nombre
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Known alternate spellings seen in acta vote entries, keyed by the
/// canonical registry name. The upstream joins deputies to votes by
/// formatted name only, and the two datasets do not always agree (extra
/// middle names, dropped particles). This table patches the known gaps;
/// `votos_sin_resolver` in `reconcilia` is the signal for new ones.
const ALIAS: &[(&str, &[&str])] = &[
    ("Acevedo, Sergio", &["Acevedo, Sergio Edgardo"]),
    ("Brambilla, Sofia", &["Brambilla, Sofía Victoria"]),
    ("Carrizo, Ana Carla", &["Carrizo, Carla"]),
    ("Dominguez, Victor Hugo", &["Domínguez, Víctor"]),
    ("Fernandez Patri, Gustavo", &["Fernández Patri, Gustavo Ramiro"]),
    ("Moreau, Cecilia", &["Moreau, Cecilia Yamila"]),
    ("Santillan, Nicolas", &["Santillán, Walter Nicolás"]),
];

/// Exact-string alias lookup: the canonical name a vote-entry spelling
/// belongs to, if registered. Used only after slug matching fails.
pub fn canonico_por_alias(nombre: &str) -> Option<&'static str> {
    ALIAS
        .iter()
        .find(|(_, variantes)| variantes.contains(&nombre))
        .map(|(canonico, _)| *canonico)
}
