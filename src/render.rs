use crate::dom::{Document, Element, NodeId};
use crate::models::{RankedEntry, Record, StatisticsPayload, display_value, is_present};
use crate::view::View;
use serde_json::Value;

const NOT_INFORMED: &str = "Não informado";
const NOT_AVAILABLE: &str = "Não disponível";
const ZERO_AMOUNT: &str = "0.00";
const CURRENCY: &str = "€";

pub fn render_statistics(view: &mut View, stats: &StatisticsPayload) {
    let handles = &view.handles;
    let doc = &mut view.doc;

    doc.set_text(handles.total_startups, stats.total_startups.to_string());
    doc.set_text(
        handles.last_update,
        format!("Última atualização {}", stats.last_update),
    );
    render_ranking(doc, handles.top_sectors, &stats.top_sectors);
    render_ranking(doc, handles.top_countries, &stats.top_countries);
}

fn render_ranking(doc: &mut Document, container: NodeId, entries: &[RankedEntry]) {
    doc.clear_children(container);
    for (index, entry) in entries.iter().enumerate() {
        doc.append(
            container,
            Element::new("div").class("list-item").children([
                Element::new("span")
                    .class("rank")
                    .text(format!("{}°", index + 1)),
                Element::new("span")
                    .class("name")
                    .text(pass_through(entry.name.as_ref())),
                Element::new("span")
                    .class("count")
                    .text(pass_through(entry.count.as_ref())),
            ]),
        );
    }
}

fn pass_through(value: Option<&Value>) -> String {
    value.map(display_value).unwrap_or_default()
}

pub fn render_records(view: &mut View, records: &[Record]) {
    let body = view.handles.records_body;
    let doc = &mut view.doc;

    doc.clear_children(body);
    for record in records {
        doc.append(body, record_row(record));
    }
}

fn record_row(record: &Record) -> Element {
    let cell = |text: String| Element::new("td").text(text);

    Element::new("tr").children([
        Element::new("td")
            .child(Element::new("strong").text(or_fallback(record.nome.as_ref(), NOT_INFORMED))),
        cell(or_fallback(record.investidor.as_ref(), NOT_INFORMED)),
        cell(or_fallback(record.status.as_ref(), NOT_AVAILABLE)),
        cell(or_fallback(record.pais.as_ref(), NOT_INFORMED)),
        cell(format!(
            "{CURRENCY} {}",
            or_fallback(record.tam.as_ref(), ZERO_AMOUNT)
        )),
        cell(or_fallback(record.setor.as_ref(), NOT_INFORMED)),
    ])
}

fn or_fallback(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(value) if is_present(Some(value)) => display_value(value),
        _ => fallback.to_string(),
    }
}
