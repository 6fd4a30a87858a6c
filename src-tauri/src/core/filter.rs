use super::render::RenderedCard;

/// One visibility flag per rendered card. A card stays visible when its title or
/// description contains the trimmed, lower-cased term; an empty term shows all.
pub fn filter_cards(cards: &[RenderedCard], term: &str) -> Vec<bool> {
    let needle = term.trim().to_lowercase();
    cards
        .iter()
        .map(|card| {
            needle.is_empty()
                || card.title.to_lowercase().contains(&needle)
                || card.description.to_lowercase().contains(&needle)
        })
        .collect()
}
