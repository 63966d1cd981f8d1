//! Plain-text rendering for the terminal.

use crate::core::address::{full_address, full_kana};
use crate::core::paginator::Paginator;
use crate::core::postal_code::format_display;
use crate::domain::model::ResultGroup;

const SEPARATOR: &str = "  ----";

/// Header with the postal code, then one block per address with a separator
/// between blocks (none after the last).
pub fn render_card(group: &ResultGroup) -> String {
    let mut lines = Vec::new();

    let code = group
        .first()
        .map(|address| format_display(&address.postal_code))
        .unwrap_or_default();
    lines.push(format!("〒{}", code));

    for (i, address) in group.iter().enumerate() {
        if i > 0 {
            lines.push(SEPARATOR.to_string());
        }
        lines.push(format!("  {}", full_address(address)));
        lines.push(format!("  {}", full_kana(address)));
    }

    lines.join("\n")
}

/// `◀ ○ ● ○ ▶` style indicator; arrows are hidden at the boundaries.
pub fn render_page_indicator(paginator: &Paginator) -> String {
    let dots: Vec<&str> = (0..paginator.page_count())
        .map(|i| if i == paginator.page_index() { "●" } else { "○" })
        .collect();

    format!(
        "{} {} {}",
        if paginator.can_prev() { "◀" } else { " " },
        dots.join(" "),
        if paginator.can_next() { "▶" } else { " " }
    )
}

pub fn render_history_page(paginator: &Paginator, page: &[ResultGroup]) -> String {
    let mut out = vec![format!(
        "History (page {}/{})",
        paginator.page_index() + 1,
        paginator.page_count()
    )];

    if page.is_empty() {
        out.push("  (no lookups yet)".to_string());
    }
    for group in page {
        out.push(render_card(group));
    }

    out.push(render_page_indicator(paginator));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Address;

    fn address(line3: &str) -> Address {
        Address {
            line1: "東京都".to_string(),
            line2: "千代田区".to_string(),
            line3: line3.to_string(),
            kana1: "ﾄｳｷｮｳﾄ".to_string(),
            kana2: "ﾁﾖﾀﾞｸ".to_string(),
            kana3: "ﾏﾙﾉｳﾁ".to_string(),
            region_code: "13".to_string(),
            postal_code: "1000001".to_string(),
        }
    }

    #[test]
    fn test_card_lists_every_address() {
        let card = render_card(&vec![address("丸の内1-1"), address("丸の内1-2")]);

        assert!(card.starts_with("〒100-0001"));
        assert!(card.contains("東京都千代田区丸の内1-1"));
        assert!(card.contains("トウキョウトチヨダクマルノウチ"));
        assert!(card.contains("東京都千代田区丸の内1-2"));
        assert_eq!(card.matches(SEPARATOR).count(), 1);
    }

    #[test]
    fn test_page_indicator_boundaries() {
        let mut paginator = Paginator::new(4);
        assert_eq!(render_page_indicator(&paginator), "  ● ○ ▶");

        paginator.next();
        assert_eq!(render_page_indicator(&paginator), "◀ ○ ●  ");
    }

    #[test]
    fn test_empty_history_page() {
        let paginator = Paginator::new(0);
        let page = render_history_page(&paginator, &[]);

        assert!(page.starts_with("History (page 1/1)"));
        assert!(page.contains("no lookups yet"));
    }
}
