//! Heuristic field extractors.
//!
//! Each field has an ordered chain of `fn(&ListingPage) -> Option<String>`.
//! The first extractor that yields a non-empty string wins; otherwise the
//! field's default applies. No extractor can fail the whole extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::listing::ExtractedProjectData;

pub const DEFAULT_CLIENT_NAME: &str = "Cliente";
pub const DEFAULT_DESCRIPTION: &str =
    "Não foi possível extrair a descrição automaticamente. Por favor, preencha manualmente.";
pub const DEFAULT_VALUE: &str = "5000";

const DESCRIPTION_LABEL: &str = "Descrição do Projeto:";
const MIN_VALUE_LABEL: &str = "Valor Mínimo:";
const LONG_PARAGRAPH_CHARS: usize = 100;

static CLIENT_NAME_SEL: Lazy<Selector> = Lazy::new(|| selector(".info-usuario-nome"));
static CLIENT_HEADING_SEL: Lazy<Selector> = Lazy::new(|| {
    selector(
        "[class*='cliente'] h1, [class*='cliente'] h2, [class*='cliente'] h3, [class*='cliente'] h4",
    )
});
static DESCRIPTION_SEL: Lazy<Selector> = Lazy::new(|| selector(".project-description"));
static CONTAINER_SEL: Lazy<Selector> =
    Lazy::new(|| selector("div, section, article, p, li, td, dd, span"));
static PARAGRAPH_SEL: Lazy<Selector> = Lazy::new(|| selector("p"));

static CLIENT_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Cliente:\s*([\p{L}\p{N}][\p{L}\p{N} ]*)").unwrap());
static DESCRIPTION_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Descrição do Projeto:\s*").unwrap());
static CURRENCY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"R\$\s*([0-9][0-9.,]*)").unwrap());

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

pub type Extractor = fn(&ListingPage) -> Option<String>;

const CLIENT_NAME_CHAIN: &[Extractor] = &[
    client_name_by_selector,
    client_name_by_heading,
    client_name_by_label,
];

const DESCRIPTION_CHAIN: &[Extractor] = &[
    description_by_selector,
    description_by_label_container,
    description_by_long_paragraph,
];

const VALUE_CHAIN: &[Extractor] = &[value_by_minimum_label, value_anywhere];

/// Parsed page plus its visible text, one text node per line.
pub struct ListingPage {
    document: Html,
    text: String,
}

impl ListingPage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let text = document
            .root_element()
            .text()
            .map(collapse_whitespace)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Self { document, text }
    }

    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.document
            .select(selector)
            .map(element_text)
            .find(|t| !t.is_empty())
    }

    /// Texts of container elements mentioning `label`, innermost first.
    fn containers_with(&self, label: &str) -> Vec<String> {
        let mut texts: Vec<String> = self
            .document
            .select(&CONTAINER_SEL)
            .map(element_text)
            .filter(|t| t.contains(label))
            .collect();
        texts.sort_by_key(|t| t.chars().count());
        texts
    }
}

/// Runs every field chain against the page.
pub fn extract_listing(html: &str) -> ExtractedProjectData {
    let page = ListingPage::parse(html);
    ExtractedProjectData {
        client_name: first_success(CLIENT_NAME_CHAIN, &page)
            .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
        project_description: first_success(DESCRIPTION_CHAIN, &page)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        value: first_success(VALUE_CHAIN, &page).unwrap_or_else(|| DEFAULT_VALUE.to_string()),
    }
}

fn first_success(chain: &[Extractor], page: &ListingPage) -> Option<String> {
    chain
        .iter()
        .filter_map(|extract| extract(page))
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

// ── client name ─────────────────────────────────────────────────────────────

fn client_name_by_selector(page: &ListingPage) -> Option<String> {
    page.first_text(&CLIENT_NAME_SEL)
}

fn client_name_by_heading(page: &ListingPage) -> Option<String> {
    page.first_text(&CLIENT_HEADING_SEL)
}

fn client_name_by_label(page: &ListingPage) -> Option<String> {
    CLIENT_LABEL_RE
        .captures(&page.text)
        .map(|c| c[1].trim().to_string())
}

// ── description ─────────────────────────────────────────────────────────────

fn description_by_selector(page: &ListingPage) -> Option<String> {
    page.first_text(&DESCRIPTION_SEL)
}

fn description_by_label_container(page: &ListingPage) -> Option<String> {
    page.containers_with(DESCRIPTION_LABEL)
        .into_iter()
        .map(|t| DESCRIPTION_LABEL_RE.replace(&t, "").trim().to_string())
        .find(|t| !t.is_empty())
}

fn description_by_long_paragraph(page: &ListingPage) -> Option<String> {
    page.document
        .select(&PARAGRAPH_SEL)
        .map(element_text)
        .find(|t| t.chars().count() > LONG_PARAGRAPH_CHARS)
}

// ── value ───────────────────────────────────────────────────────────────────

/// Only amounts after the label count; earlier ones belong to other fields.
fn value_by_minimum_label(page: &ListingPage) -> Option<String> {
    page.containers_with(MIN_VALUE_LABEL).iter().find_map(|t| {
        let offset = t.find(MIN_VALUE_LABEL)?;
        find_currency(&t[offset + MIN_VALUE_LABEL.len()..])
    })
}

fn value_anywhere(page: &ListingPage) -> Option<String> {
    find_currency(&page.text)
}

/// First `R$` amount in `text`, as a plain decimal string.
fn find_currency(text: &str) -> Option<String> {
    CURRENCY_RE
        .captures_iter(text)
        .find_map(|c| normalize_brl(&c[1]))
}

/// `1.500,00` → `1500.00`. Returns `None` if the result is not a number.
pub fn normalize_brl(raw: &str) -> Option<String> {
    let normalized = raw
        .trim_end_matches(&['.', ','][..])
        .replace('.', "")
        .replace(',', ".");
    normalized.parse::<f64>().ok()?;
    Some(normalized)
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_LISTING: &str = r#"
        <html><body>
          <div class="perfil-cliente">
            <span class="info-usuario-nome"> Marcos   Teixeira </span>
          </div>
          <div class="project-description">
            Preciso de um sistema web para controle de estoque com relatórios.
          </div>
          <ul>
            <li><b>Valor Mínimo:</b> R$ 1.500,00</li>
            <li>Valor Máximo: R$ 3.000,00</li>
          </ul>
        </body></html>
    "#;

    #[test]
    fn test_primary_selectors_win() {
        let data = extract_listing(FULL_LISTING);
        assert_eq!(data.client_name, "Marcos Teixeira");
        assert_eq!(
            data.project_description,
            "Preciso de um sistema web para controle de estoque com relatórios."
        );
        assert_eq!(data.value, "1500.00");
    }

    #[test]
    fn test_heading_under_cliente_container() {
        let html = r#"<div class="box-cliente"><h3>Juliana Prado</h3></div>"#;
        assert_eq!(extract_listing(html).client_name, "Juliana Prado");
    }

    #[test]
    fn test_cliente_label_in_page_text() {
        let html = r#"<div><strong>Cliente:</strong> Roberto Nunes</div><p>Publicado ontem</p>"#;
        assert_eq!(extract_listing(html).client_name, "Roberto Nunes");
    }

    #[test]
    fn test_description_label_is_stripped() {
        let html = r#"
            <section>
              <div><strong>Descrição do Projeto:</strong> Criar landing page para curso online.</div>
            </section>
        "#;
        assert_eq!(
            extract_listing(html).project_description,
            "Criar landing page para curso online."
        );
    }

    #[test]
    fn test_long_paragraph_fallback() {
        let long = "Estamos buscando um desenvolvedor experiente para criar um aplicativo \
                    mobile de delivery com painel administrativo e integração de pagamentos.";
        let html = format!("<p>Curto.</p><p>{long}</p>");
        assert_eq!(extract_listing(&html).project_description, long);
    }

    #[test]
    fn test_currency_anywhere_when_label_missing() {
        let html = "<p>Orçamento aproximado de R$ 12.345,67 para o projeto.</p>";
        assert_eq!(extract_listing(html).value, "12345.67");
    }

    #[test]
    fn test_minimum_value_label_beats_earlier_amounts() {
        let html = r#"
            <p>Taxa da plataforma: R$ 10,00</p>
            <div><span>Valor Mínimo:</span> <span>R$ 800</span></div>
        "#;
        assert_eq!(extract_listing(html).value, "800");
    }

    #[test]
    fn test_minimum_value_ignores_amounts_before_label_in_same_container() {
        let html = r#"
            <div>
              <p>Taxa: R$ 10,00</p>
              <p>Valor Mínimo:</p>
              <p>R$ 800,00</p>
            </div>
        "#;
        assert_eq!(extract_listing(html).value, "800.00");
    }

    #[test]
    fn test_no_matches_falls_back_to_defaults() {
        let html = "<html><body><h1>Projeto</h1><p>Texto curto.</p></body></html>";
        let data = extract_listing(html);
        assert_eq!(
            data,
            ExtractedProjectData {
                client_name: DEFAULT_CLIENT_NAME.to_string(),
                project_description: DEFAULT_DESCRIPTION.to_string(),
                value: DEFAULT_VALUE.to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_brl() {
        assert_eq!(normalize_brl("1.500,00").as_deref(), Some("1500.00"));
        assert_eq!(normalize_brl("5.000").as_deref(), Some("5000"));
        assert_eq!(normalize_brl("750,5,").as_deref(), Some("750.5"));
        assert_eq!(normalize_brl(",,"), None);
    }
}
