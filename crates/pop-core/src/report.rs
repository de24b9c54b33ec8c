//! Paginated report documents
//!
//! Reports stream rows into a page-capacity-bounded document with a
//! running header and a per-page footer. The footer carries a
//! `{totalPages}` placeholder while pages are being drawn, because the
//! final count is unknown until the last row lands; a second pass patches
//! the placeholder once the document is complete.
//!
//! Byte-level rendering (PDF or otherwise) is outside this crate; the
//! document renders through [`render_text`] and the UI hands the result
//! to the browser's download machinery.

pub const TOTAL_PAGES_TOKEN: &str = "{totalPages}";

/// Body lines per page. Mirrors the vertical capacity of an A4 sheet at
/// the font sizes the reports use.
pub const DEFAULT_PAGE_CAPACITY: usize = 40;

const COLUMN_SEPARATOR: &str = "  |  ";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage {
    pub lines: Vec<String>,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: String,
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Second pass: replaces the total-pages placeholder in every footer
    /// now that the page count is known.
    pub fn patch_total_pages(&mut self) {
        let total = self.pages.len().to_string();
        for page in &mut self.pages {
            page.footer = page.footer.replace(TOTAL_PAGES_TOKEN, &total);
        }
    }
}

/// Streams rows into pages, breaking when the capacity is exhausted.
#[derive(Debug)]
pub struct ReportBuilder {
    title: String,
    generated_at: String,
    /// Column headers repeated at the top of every page; empty for
    /// free-form reports.
    head: Vec<String>,
    capacity: usize,
    pages: Vec<Vec<String>>,
    current: Vec<String>,
}

impl ReportBuilder {
    pub fn new(title: impl Into<String>, generated_at: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: generated_at.into(),
            head: Vec::new(),
            capacity: DEFAULT_PAGE_CAPACITY,
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Sets tabular column headers, drawn after the running header on
    /// every page.
    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.head = vec![columns.join(COLUMN_SEPARATOR)];
        self
    }

    fn remaining(&self) -> usize {
        self.capacity - self.current.len()
    }

    fn break_page(&mut self) {
        let full = std::mem::take(&mut self.current);
        self.pages.push(full);
    }

    /// Appends one body line, breaking the page first when full.
    pub fn push_line(&mut self, line: impl Into<String>) {
        if self.remaining() == 0 {
            self.break_page();
        }
        self.current.push(line.into());
    }

    /// Appends a tabular row using the column separator.
    pub fn push_row(&mut self, cells: &[&str]) {
        self.push_line(cells.join(COLUMN_SEPARATOR));
    }

    /// Breaks the page early unless at least `lines` body lines still
    /// fit, so a multi-line block is never split mid-group.
    pub fn ensure_room(&mut self, lines: usize) {
        if !self.current.is_empty() && self.remaining() < lines {
            self.break_page();
        }
    }

    pub fn blank_line(&mut self) {
        // A leading blank on a fresh page would be dead space.
        if !self.current.is_empty() {
            self.push_line("");
        }
    }

    /// First pass: assembles pages whose footers still carry the
    /// `{totalPages}` placeholder.
    pub fn build(mut self) -> ReportDocument {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        let pages = self
            .pages
            .into_iter()
            .enumerate()
            .map(|(index, mut lines)| {
                for (at, head) in self.head.iter().enumerate() {
                    lines.insert(at, head.clone());
                }
                ReportPage {
                    lines,
                    footer: format!("Página {} de {}", index + 1, TOTAL_PAGES_TOKEN),
                }
            })
            .collect();
        ReportDocument {
            title: self.title,
            generated_at: self.generated_at,
            pages,
        }
    }

    /// Both passes: build, then patch the total-page placeholder.
    pub fn finish(self) -> ReportDocument {
        let mut document = self.build();
        document.patch_total_pages();
        document
    }
}

/// Renders the document to plain text, one form-feed-separated page per
/// sheet, header and footer included.
pub fn render_text(document: &ReportDocument) -> String {
    let mut out = String::new();
    for (index, page) in document.pages.iter().enumerate() {
        if index > 0 {
            out.push('\u{c}');
            out.push('\n');
        }
        out.push_str(&document.title);
        out.push('\n');
        out.push_str(&format!("Gerado em: {}\n\n", document.generated_at));
        for line in &page.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&page.footer);
        out.push('\n');
    }
    out
}

/// Stock-report gating: both bounds must be set (non-zero) before any
/// request is issued.
pub fn stock_bounds_set(start: f64, end: f64) -> bool {
    start != 0.0 && end != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ReportBuilder {
        ReportBuilder::new("Relatório de Teste", "01/01/2026 às 12:00").with_capacity(5)
    }

    #[test]
    fn test_rows_break_pages_at_capacity() {
        let mut b = builder();
        for i in 0..12 {
            b.push_line(format!("linha {i}"));
        }
        let doc = b.finish();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages[0].lines.len(), 5);
        assert_eq!(doc.pages[2].lines.len(), 2);
    }

    #[test]
    fn test_two_pass_total_page_substitution() {
        let mut b = builder();
        for i in 0..7 {
            b.push_line(format!("linha {i}"));
        }
        let doc = b.build();
        // First pass leaves the placeholder in every footer.
        assert!(doc.pages.iter().all(|p| p.footer.contains(TOTAL_PAGES_TOKEN)));

        let mut doc = doc;
        doc.patch_total_pages();
        assert_eq!(doc.pages[0].footer, "Página 1 de 2");
        assert_eq!(doc.pages[1].footer, "Página 2 de 2");
    }

    #[test]
    fn test_column_headers_repeat_on_every_page() {
        let mut b = ReportBuilder::new("Relatório", "agora")
            .with_capacity(3)
            .with_columns(&["Nome", "Estoque"]);
        for i in 0..5 {
            b.push_row(&[&format!("item {i}"), "10"]);
        }
        let doc = b.finish();
        assert_eq!(doc.page_count(), 2);
        for page in &doc.pages {
            assert!(page.lines[0].contains("Nome"));
            assert!(page.lines[0].contains("Estoque"));
        }
    }

    #[test]
    fn test_ensure_room_keeps_groups_together() {
        let mut b = builder();
        b.push_line("a");
        b.push_line("b");
        b.push_line("c");
        // Four lines no longer fit on this page; the group moves whole.
        b.ensure_room(4);
        for line in ["d", "e", "f", "g"] {
            b.push_line(line);
        }
        let doc = b.finish();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].lines, vec!["a", "b", "c"]);
        assert_eq!(doc.pages[1].lines, vec!["d", "e", "f", "g"]);
    }

    #[test]
    fn test_empty_builder_still_produces_one_page() {
        let doc = builder().finish();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].footer, "Página 1 de 1");
    }

    #[test]
    fn test_render_text_includes_header_and_footer() {
        let mut b = builder();
        b.push_line("conteúdo");
        let text = render_text(&b.finish());
        assert!(text.contains("Relatório de Teste"));
        assert!(text.contains("Gerado em: 01/01/2026 às 12:00"));
        assert!(text.contains("conteúdo"));
        assert!(text.contains("Página 1 de 1"));
    }

    #[test]
    fn test_stock_bounds_gating() {
        assert!(!stock_bounds_set(0.0, 10.0));
        assert!(!stock_bounds_set(5.0, 0.0));
        assert!(stock_bounds_set(1.0, 10.0));
    }
}
