//! Text helpers shared by the renderers.

pub const NO_IMAGE: &str = "https://via.placeholder.com/400x200?text=Sem+Imagem";
pub const NO_NAME: &str = "Nome não disponível";
pub const NO_DESCRIPTION: &str = "Descrição não disponível";

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The value, unless it is absent or empty.
pub fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

/// Two decimals; missing reads as zero.
pub fn format_price(price: Option<f64>) -> String {
    format!("{:.2}", price.unwrap_or(0.0))
}

/// Sort key approximating a pt-BR collation: case and common Latin accents
/// are ignored.
pub fn collation_key(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
