use crate::dom::{Document, Element};

pub const SUGGESTIONS: [&str; 4] = [
    "Quais setores concentram mais startups?",
    "Quais países lideram o ranking?",
    "Quais startups receberam investimento recente?",
    "Resuma o status das startups de saúde.",
];

pub fn mount_document() -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, skeleton());
    doc
}

fn skeleton() -> Element {
    Element::new("main").class("app").children([
        header(),
        counters(),
        rankings(),
        startups_table(),
        chat_panel(),
        Element::new("div").id("notifications").class("notifications"),
    ])
}

fn header() -> Element {
    Element::new("header").children([
        Element::new("h1").text("Inception-match"),
        Element::new("p")
            .class("subtitle")
            .child(Element::new("span").id("current-datetime")),
        Element::new("div").class("controls").children([
            Element::new("form")
                .attr("method", "post")
                .attr("action", "/filter")
                .class("toggle-switch")
                .children([
                    Element::new("input")
                        .id("inception-filter")
                        .attr("type", "checkbox")
                        .attr("name", "enabled")
                        .attr("value", "on"),
                    Element::new("button")
                        .attr("type", "submit")
                        .class("tab")
                        .text("Filtro Inception"),
                ]),
            Element::new("form")
                .attr("method", "post")
                .attr("action", "/refresh")
                .child(
                    Element::new("button")
                        .attr("type", "submit")
                        .class("tab")
                        .text("Atualizar"),
                ),
        ]),
    ])
}

fn counters() -> Element {
    Element::new("section").class("panel").children([
        Element::new("div").class("stat").children([
            Element::new("span").class("label").text("Total de startups"),
            Element::new("span")
                .id("total-startups")
                .class("value")
                .text("0"),
            Element::new("span").id("last-update").class("hint"),
        ]),
    ])
}

fn rankings() -> Element {
    Element::new("section").class("panel").children([
        Element::new("div").class("stat").children([
            Element::new("span").class("label").text("Top setores"),
            Element::new("div").id("top-sectors").class("ranking"),
        ]),
        Element::new("div").class("stat").children([
            Element::new("span").class("label").text("Top países"),
            Element::new("div").id("top-countries").class("ranking"),
        ]),
    ])
}

fn startups_table() -> Element {
    let headings = ["Startup", "Investidor", "Status", "País", "TAM", "Setor"];
    Element::new("section").class("table-card").child(
        Element::new("table").children([
            Element::new("thead").child(
                Element::new("tr")
                    .children(headings.map(|heading| Element::new("th").text(heading))),
            ),
            Element::new("tbody").id("startups-table-body"),
        ]),
    )
}

fn chat_panel() -> Element {
    let suggestions = SUGGESTIONS.iter().enumerate().map(|(index, label)| {
        Element::new("button")
            .class("suggestion-btn")
            .attr("type", "submit")
            .attr("name", "index")
            .attr("value", index.to_string())
            .text(*label)
    });

    Element::new("section").class("chat").children([
        Element::new("h2").text("Chat Insights"),
        Element::new("form")
            .class("suggestions")
            .attr("method", "post")
            .attr("action", "/chat/suggestion")
            .children(suggestions),
        Element::new("div")
            .id("messages-container")
            .class("messages-container"),
        Element::new("form")
            .class("composer")
            .attr("method", "post")
            .attr("action", "/chat/send")
            .children([
                Element::new("input")
                    .id("message-input")
                    .class("message-input")
                    .attr("type", "text")
                    .attr("name", "message")
                    .attr("autocomplete", "off")
                    .attr("placeholder", "Pergunte sobre as startups..."),
                Element::new("button")
                    .class("send-message-btn")
                    .attr("type", "submit")
                    .text("Enviar"),
            ]),
    ])
}

/// Wraps the serialised document body in the full page.
///
/// The page reloads itself every `reload_secs` so new data shows up. A reload
/// throws away text typed but not yet sent, so it is left out while the
/// composer holds a draft. Text typed in the browser never reaches the server
/// before it is sent, so the interval is the data refresh period rather than
/// the clock tick.
pub fn render_page(doc: &Document, reload_secs: u64) -> String {
    let body: String = doc
        .children(doc.root())
        .iter()
        .map(|node| doc.to_html(*node))
        .collect();
    let composing = doc
        .by_id("message-input")
        .is_some_and(|input| !doc.value(input).is_empty());
    let reload = if composing {
        String::new()
    } else {
        format!(r#"<meta http-equiv="refresh" content="{}" />"#, reload_secs.max(1))
    };
    INDEX_HTML
        .replace("{{RELOAD}}", &reload)
        .replace("{{BODY}}", &body)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  {{RELOAD}}
  <title>Inception-match</title>
  <style>
    :root {
      --bg: #0a0a0a;
      --card: #1a1a1a;
      --ink: #ffffff;
      --muted: #888888;
      --accent: #00ff88;
      --danger: #ff4444;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1180px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 3vw, 2.4rem);
      color: var(--accent);
    }

    .subtitle,
    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    .controls {
      display: flex;
      gap: 8px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
    }

    .stat,
    .table-card,
    .chat {
      background: var(--card);
      border-radius: 14px;
      padding: 18px;
      display: grid;
      gap: 10px;
    }

    .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .value {
      font-size: 2rem;
      font-weight: 600;
      color: var(--accent);
    }

    .list-item {
      display: grid;
      grid-template-columns: 3rem 1fr auto;
      padding: 6px 0;
      border-bottom: 1px solid #262626;
    }

    .rank,
    .count {
      color: var(--accent);
      font-weight: 600;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      text-align: left;
      padding: 10px 8px;
      border-bottom: 1px solid #262626;
    }

    th {
      color: var(--muted);
      font-weight: 500;
    }

    button,
    .tab {
      appearance: none;
      border: 1px solid #333333;
      background: #111111;
      color: var(--ink);
      border-radius: 999px;
      padding: 8px 14px;
      cursor: pointer;
    }

    .suggestions {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .suggestion-active {
      border-color: var(--accent);
    }

    .messages-container {
      display: grid;
      gap: 8px;
      max-height: 420px;
      overflow-y: auto;
    }

    .msg {
      padding: 10px 14px;
      border-radius: 12px;
      max-width: 80%;
      white-space: pre-wrap;
    }

    .msg.user {
      justify-self: end;
      background: #00331c;
    }

    .msg.bot {
      justify-self: start;
      background: #262626;
    }

    .msg.loading {
      color: var(--muted);
    }

    .bot-sources {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
    }

    .bot-source-link {
      color: var(--accent);
    }

    .composer {
      display: flex;
      gap: 8px;
    }

    .message-input {
      flex: 1;
      background: #111111;
      color: var(--ink);
      border: 1px solid #333333;
      border-radius: 999px;
      padding: 10px 16px;
    }
  </style>
</head>
<body>
  {{BODY}}
</body>
</html>
"#;
