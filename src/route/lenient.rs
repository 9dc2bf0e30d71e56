use serde::{Deserialize, Deserializer, de::IgnoredAny};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts a JSON number or a numeric string. Anything else, including
/// `null`, non-numeric text and non-finite values, decodes as `None` so the
/// node can be flagged instead of failing the whole document.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Some(value),
        Raw::Text(text) => text.trim().parse::<f64>().ok(),
        Raw::Other(_) => None,
    };
    Ok(value.filter(|value| value.is_finite()))
}
