use reqwest::Url;

use crate::view::ViewMode;

/// Which page a location opens, and therefore which queries run on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Menu { category: Option<String> },
    Orders,
    Unknown,
}

impl Page {
    /// Accepts absolute URLs as well as paths like `/cardapio.html?category=pizza`.
    pub fn from_location(location: &str) -> Self {
        let Some(url) = parse_location(location) else {
            return Page::Unknown;
        };
        let path = url.path();

        if path.contains("cardapio") {
            let category = url
                .query_pairs()
                .find(|(key, _)| key == "category")
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty());
            Page::Menu { category }
        } else if path.contains("pedidos") {
            Page::Orders
        } else if path == "/" || path.contains("index") {
            Page::Home
        } else {
            Page::Unknown
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        match self {
            Page::Menu { .. } => ViewMode::Card,
            _ => ViewMode::Dish,
        }
    }
}

fn parse_location(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .or_else(|| Url::parse("http://localhost/").ok()?.join(location).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_with_category() {
        assert_eq!(
            Page::from_location("/cardapio.html?category=pizza"),
            Page::Menu { category: Some("pizza".into()) }
        );
        assert_eq!(
            Page::from_location("http://localhost:8080/cardapio?category=frutos%20do%20mar"),
            Page::Menu { category: Some("frutos do mar".into()) }
        );
        assert_eq!(Page::from_location("/cardapio.html?category="), Page::Menu { category: None });
    }

    #[test]
    fn test_other_pages() {
        assert_eq!(Page::from_location("/"), Page::Home);
        assert_eq!(Page::from_location("/index.html"), Page::Home);
        assert_eq!(Page::from_location("pedidos.html"), Page::Orders);
        assert_eq!(Page::from_location("/sobre.html"), Page::Unknown);
    }

    #[test]
    fn test_view_mode_follows_page() {
        assert_eq!(Page::Menu { category: None }.view_mode(), ViewMode::Card);
        assert_eq!(Page::Home.view_mode(), ViewMode::Dish);
    }
}
