//! Keyword vocabularies used by the relevance filter.
//!
//! Three static term sets drive classification:
//! - **require terms** confirm topical relevance; a candidate must match at
//!   least [`Vocabulary::MIN_REQUIRE_MATCHES`] distinct terms to survive
//! - **exclude terms** veto a candidate on any single match
//! - **locale terms** tag a candidate as regionally relevant, which the
//!   filter prefers over general matches
//!
//! All terms are lowercase; matching is plain substring search over the
//! lowercased candidate text. The default vocabulary targets privacy,
//! networking, and security topics with a Russian locale signal.

use once_cell::sync::Lazy;

/// Static keyword configuration for the relevance filter.
///
/// Not mutated at runtime; a run uses exactly one vocabulary.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Terms confirming topical relevance.
    pub require_terms: Vec<String>,
    /// Terms that veto a candidate outright.
    pub exclude_terms: Vec<String>,
    /// Terms flagging regional relevance.
    pub locale_terms: Vec<String>,
}

impl Vocabulary {
    /// Minimum number of distinct require-term matches for a candidate to be
    /// kept. A single incidental keyword hit (one generic tech word) is
    /// treated as noise.
    pub const MIN_REQUIRE_MATCHES: usize = 2;

    pub fn new<S: Into<String>>(
        require_terms: impl IntoIterator<Item = S>,
        exclude_terms: impl IntoIterator<Item = S>,
        locale_terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            require_terms: require_terms.into_iter().map(Into::into).collect(),
            exclude_terms: exclude_terms.into_iter().map(Into::into).collect(),
            locale_terms: locale_terms.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        DEFAULT_VOCABULARY.clone()
    }
}

/// The stock privacy/networking/security vocabulary.
static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(|| {
    Vocabulary::new(
        REQUIRE_TERMS.iter().copied(),
        EXCLUDE_TERMS.iter().copied(),
        LOCALE_TERMS.iter().copied(),
    )
});

const REQUIRE_TERMS: &[&str] = &[
    "vpn", "прокси", "туннель", "proxy", "tunnel", "шифрование", "encrypt",
    "приватность", "privacy", "безопасность", "security", "защита данных",
    "интернет", "internet", "сеть", "network", "протокол", "protocol",
    "анонимность", "anonymous", "скрытие", "incognito", "скрытый", "hidden",
    "цензура", "блокировка", "blocking", "censorship", "restrict", "ограничение",
    "dns", "dpi", "фильтр", "filter", "обход", "bypass", "роскомнадзор", "ркн",
    "трафик", "traffic", "пакет", "packet", "соединение", "connection",
    "tor", "darknet", "wireguard", "openvpn", "shadowsocks", "обфускация",
    "нейросеть", "ии", "ai", "llm", "gpt", "claude", "chatgpt",
    "уязвимость", "vulnerability", "эксплойт", "exploit", "zero-day",
    "malware", "вредонос", "кибератака", "взлом", "security patch", "notepad++",
];

const EXCLUDE_TERMS: &[&str] = &[
    "теннис", "футбол", "хоккей", "баскетбол", "спорт", "матч", "команда",
    "игра", "геймплей", "gameplay", "dungeon", "playstation", "xbox", "steam",
    "кино", "фильм", "сериал", "музыка", "концерт", "актер", "режиссер",
    "coca-cola", "pepsi", "tesla", "акции", "биржа", "инвестор", "выручка",
    "выборы", "президент", "парламент", "закон", "болезнь", "вирус", "covid",
    "биткойн", "bitcoin", "крипто", "crypto", "блокчейн", "автомобиль", "машина",
];

const LOCALE_TERMS: &[&str] = &["россия", "рф", "российск", "москв", "ркн"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_is_lowercase_and_nonempty() {
        let v = Vocabulary::default();
        assert!(v.require_terms.len() >= Vocabulary::MIN_REQUIRE_MATCHES);
        assert!(!v.exclude_terms.is_empty());
        assert!(!v.locale_terms.is_empty());
        for term in v
            .require_terms
            .iter()
            .chain(&v.exclude_terms)
            .chain(&v.locale_terms)
        {
            assert_eq!(term, &term.to_lowercase(), "term not lowercase: {term}");
            assert!(!term.is_empty());
        }
    }

    #[test]
    fn rkn_is_both_topical_and_locale_signal() {
        // "ркн" confirms topical relevance and flags the locale at once.
        let v = Vocabulary::default();
        assert!(v.require_terms.contains(&"ркн".to_string()));
        assert!(v.locale_terms.contains(&"ркн".to_string()));
    }
}
