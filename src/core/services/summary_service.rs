use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Entry, Page, PageKind};

/// Read-only aggregate calculations over pages and their entries. Nothing
/// here mutates or persists anything; callers pass in the pages they hold.
pub struct SummaryService;

/// Totals for a single page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageTotals {
    pub page_id: Uuid,
    pub title: String,
    pub kind: PageKind,
    pub entry_count: usize,
    pub money: f64,
    pub interest: f64,
}

/// Accumulated totals for every page of one kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KindTotals {
    pub pages: usize,
    pub entries: usize,
    pub money: f64,
    pub interest: f64,
}

/// Dashboard-level totals, split by page kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerOverview {
    pub deoya: KindTotals,
    pub neoya: KindTotals,
}

impl LedgerOverview {
    pub fn kind(&self, kind: PageKind) -> &KindTotals {
        match kind {
            PageKind::Deoya => &self.deoya,
            PageKind::Neoya => &self.neoya,
        }
    }

    fn kind_mut(&mut self, kind: PageKind) -> &mut KindTotals {
        match kind {
            PageKind::Deoya => &mut self.deoya,
            PageKind::Neoya => &mut self.neoya,
        }
    }
}

impl SummaryService {
    /// Sums the `money` column in entry order.
    pub fn sum_money(page: &Page) -> f64 {
        page.entries.iter().map(|entry| entry.money).sum()
    }

    /// Sums the `interest` column in entry order.
    pub fn sum_interest(page: &Page) -> f64 {
        page.entries.iter().map(|entry| entry.interest).sum()
    }

    pub fn page_totals(page: &Page) -> PageTotals {
        PageTotals {
            page_id: page.id,
            title: page.title.clone(),
            kind: page.kind,
            entry_count: page.entry_count(),
            money: Self::sum_money(page),
            interest: Self::sum_interest(page),
        }
    }

    /// Folds every page into per-kind totals.
    pub fn overview(pages: &[Page]) -> LedgerOverview {
        let mut overview = LedgerOverview::default();
        for page in pages {
            let totals = overview.kind_mut(page.kind);
            totals.pages += 1;
            totals.entries += page.entry_count();
            totals.money += Self::sum_money(page);
            totals.interest += Self::sum_interest(page);
        }
        overview
    }

    /// Sums the `money` column across every page of the given kind.
    pub fn total_by_kind(pages: &[Page], kind: PageKind) -> f64 {
        pages
            .iter()
            .filter(|page| page.kind == kind)
            .map(Self::sum_money)
            .sum()
    }

    /// Returns the pages of one kind, keeping their given order.
    pub fn pages_of_kind<'a>(pages: &'a [Page], kind: PageKind) -> Vec<&'a Page> {
        pages.iter().filter(|page| page.kind == kind).collect()
    }

    /// Returns the entries whose sequence number contains `query` in its
    /// decimal rendering. An empty query matches every entry.
    pub fn filter_by_number<'a>(page: &'a Page, query: &str) -> Vec<&'a Entry> {
        page.entries
            .iter()
            .filter(|entry| entry.no.to_string().contains(query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryInput;

    fn page_with_entries(kind: PageKind, rows: &[(i64, f64, f64)]) -> Page {
        let mut page = Page::new("Fixture", kind);
        for (no, money, interest) in rows {
            let entry = EntryInput::new(*no, *money)
                .with_interest(*interest)
                .into_entry()
                .unwrap();
            page.add_entry(entry);
        }
        page
    }

    #[test]
    fn sums_cover_all_entries() {
        let page = page_with_entries(
            PageKind::Deoya,
            &[(1, 100.0, 5.0), (2, 250.5, 0.0), (3, -50.0, 2.5)],
        );
        assert_eq!(SummaryService::sum_money(&page), 300.5);
        assert_eq!(SummaryService::sum_interest(&page), 7.5);

        let totals = SummaryService::page_totals(&page);
        assert_eq!(totals.entry_count, 3);
        assert_eq!(totals.money, 300.5);
    }

    #[test]
    fn empty_pages_sum_to_zero() {
        let page = Page::new("Empty", PageKind::Neoya);
        assert_eq!(SummaryService::sum_money(&page), 0.0);
        assert_eq!(SummaryService::sum_interest(&page), 0.0);
    }

    #[test]
    fn overview_splits_totals_by_kind() {
        let pages = vec![
            page_with_entries(PageKind::Deoya, &[(1, 100.0, 0.0)]),
            page_with_entries(PageKind::Deoya, &[(1, 50.0, 1.0), (2, 25.0, 1.0)]),
            page_with_entries(PageKind::Neoya, &[(1, 10.0, 0.5)]),
        ];
        let overview = SummaryService::overview(&pages);

        assert_eq!(overview.deoya.pages, 2);
        assert_eq!(overview.deoya.entries, 3);
        assert_eq!(overview.deoya.money, 175.0);
        assert_eq!(overview.deoya.interest, 2.0);

        assert_eq!(overview.neoya.pages, 1);
        assert_eq!(overview.kind(PageKind::Neoya).money, 10.0);
    }

    #[test]
    fn per_kind_total_ignores_the_other_kind() {
        let pages = vec![
            page_with_entries(PageKind::Deoya, &[(1, 900.0, 0.0)]),
            page_with_entries(PageKind::Neoya, &[(1, 10.0, 0.5), (2, 30.0, 0.0)]),
            page_with_entries(PageKind::Neoya, &[(1, 2.5, 0.0)]),
        ];
        assert_eq!(SummaryService::total_by_kind(&pages, PageKind::Neoya), 42.5);
        assert_eq!(SummaryService::total_by_kind(&pages, PageKind::Deoya), 900.0);
        assert_eq!(SummaryService::total_by_kind(&[], PageKind::Deoya), 0.0);
    }

    #[test]
    fn pages_of_kind_filters_without_reordering() {
        let pages = vec![
            page_with_entries(PageKind::Deoya, &[]),
            page_with_entries(PageKind::Neoya, &[]),
            page_with_entries(PageKind::Deoya, &[]),
        ];
        let deoya = SummaryService::pages_of_kind(&pages, PageKind::Deoya);
        assert_eq!(deoya.len(), 2);
        assert_eq!(deoya[0].id, pages[0].id);
        assert_eq!(deoya[1].id, pages[2].id);
    }

    #[test]
    fn filter_matches_substrings_of_the_sequence_number() {
        let page = page_with_entries(
            PageKind::Deoya,
            &[(12, 1.0, 0.0), (112, 1.0, 0.0), (3, 1.0, 0.0)],
        );
        let matches = SummaryService::filter_by_number(&page, "12");
        let numbers: Vec<i64> = matches.iter().map(|e| e.no).collect();
        assert_eq!(numbers, vec![12, 112]);

        assert_eq!(SummaryService::filter_by_number(&page, "").len(), 3);
        assert!(SummaryService::filter_by_number(&page, "9").is_empty());
    }
}
