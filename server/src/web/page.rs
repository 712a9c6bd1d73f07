//! HTML rendering for the dashboard.

use std::fmt::Write;

use portmonitor_core::{DisplayRow, SortKey, SortOrder};

use super::notice::Notice;

const STYLE: &str = r#"
        body { font-family: sans-serif; margin: 20px; background-color: #f4f4f4; color: #333; }
        h1 { color: #0056b3; }
        .flash-message { padding: 10px; margin-bottom: 15px; border-radius: 5px; font-weight: bold; }
        .flash-message.success { background-color: #d4edda; color: #155724; border: 1px solid #c3e6cb; }
        .flash-message.error { background-color: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; background-color: #fff; box-shadow: 0 0 10px rgba(0,0,0,0.1); }
        th, td { padding: 12px 15px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #007bff; color: white; }
        tr:nth-child(even) { background-color: #f8f8f8; }
        tr:hover { background-color: #f1f1f1; }
        tr.mapped td:last-child { font-weight: bold; }
        .no-data { text-align: center; color: #666; padding: 20px; }
        footer { margin-top: 40px; text-align: center; color: #777; font-size: 0.9em; }
        .form-container { background-color: #fff; padding: 20px; margin-top: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .form-container label { display: block; margin-bottom: 5px; font-weight: bold; }
        .form-container input[type="text"], .form-container input[type="number"], .form-container select {
            width: calc(100% - 22px); padding: 10px; margin-bottom: 15px; border: 1px solid #ddd; border-radius: 4px;
        }
        .form-container button { background-color: #28a745; color: white; padding: 10px 20px; border: none; border-radius: 4px; cursor: pointer; font-size: 16px; margin-right: 10px; }
        .form-container button.delete { background-color: #dc3545; }
        .form-container button:hover { opacity: 0.9; }
        .filter-sort-form form { display: flex; flex-wrap: wrap; gap: 15px; }
        .filter-sort-form div { flex: 1; min-width: 150px; }
        .filter-sort-form button { align-self: flex-end; margin-bottom: 15px; }
"#;

const SORT_KEYS: [(SortKey, &str); 4] = [
    (SortKey::Port, "Porta"),
    (SortKey::ApplicationName, "Aplicação/Processo"),
    (SortKey::DisplayAddress, "Endereço Local"),
    (SortKey::Status, "Status"),
];

const SORT_ORDERS: [(SortOrder, &str); 2] = [
    (SortOrder::Asc, "Crescente"),
    (SortOrder::Desc, "Decrescente"),
];

/// Everything the dashboard page shows.
pub struct Page<'a> {
    pub host_name: &'a str,
    pub rows: &'a [DisplayRow],
    pub notice: Option<&'a Notice>,
    pub search_query: &'a str,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    /// Pre-formatted refresh time for the footer.
    pub generated_at: &'a str,
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

// Writing into a String cannot fail, so the fmt results below are ignored.
pub fn render(page: &Page<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Monitor de Portas Abertas</title>
    <style>{style}</style>
</head>
<body>
    <h1>Monitor de Portas Abertas no Servidor ({host})</h1>
"#,
        style = STYLE,
        host = escape(page.host_name),
    );

    if let Some(notice) = page.notice {
        let _ = writeln!(
            html,
            r#"    <div class="flash-message {}">{}</div>"#,
            notice.kind.css_class(),
            escape(&notice.message),
        );
    }

    html.push_str(
        r#"
    <div class="form-container">
        <h2>Adicionar/Atualizar/Remover Mapeamento de Porta</h2>
        <form method="POST" action="/update_mapping">
            <label for="port_to_map">Porta:</label>
            <input type="number" id="port_to_map" name="port" min="0" max="65535" required><br>

            <label for="app_name">Nome da Aplicação:</label>
            <input type="text" id="app_name" name="app_name"><br>

            <button type="submit">Salvar/Atualizar Mapeamento</button>
            <button type="submit" name="action" value="delete" class="delete">Remover Mapeamento</button>
        </form>
    </div>
"#,
    );

    let _ = write!(
        html,
        r#"
    <div class="form-container filter-sort-form">
        <h2>Filtrar e Ordenar</h2>
        <form method="GET" action="/">
            <div>
                <label for="search_query">Buscar:</label>
                <input type="text" id="search_query" name="search_query" value="{}">
            </div>
            <div>
                <label for="sort_by">Ordenar por:</label>
                <select id="sort_by" name="sort_by">
"#,
        escape(page.search_query),
    );
    for (key, label) in SORT_KEYS {
        let _ = writeln!(
            html,
            r#"                    <option value="{}"{}>{}</option>"#,
            key.as_param(),
            selected(key == page.sort_key),
            label,
        );
    }
    html.push_str(
        r#"                </select>
            </div>
            <div>
                <label for="sort_order">Ordem:</label>
                <select id="sort_order" name="sort_order">
"#,
    );
    for (order, label) in SORT_ORDERS {
        let _ = writeln!(
            html,
            r#"                    <option value="{}"{}>{}</option>"#,
            order.as_param(),
            selected(order == page.sort_order),
            label,
        );
    }
    html.push_str(
        r#"                </select>
            </div>
            <button type="submit">Aplicar</button>
        </form>
    </div>
"#,
    );

    if page.rows.is_empty() {
        html.push_str(r#"    <p class="no-data">Nenhuma conexão de escuta encontrada.</p>"#);
        html.push('\n');
    } else {
        html.push_str(
            r#"    <table>
        <thead>
            <tr>
                <th>Endereço Local</th>
                <th>Porta Local</th>
                <th>Status</th>
                <th>Aplicação/Processo</th>
            </tr>
        </thead>
        <tbody>
"#,
        );
        for row in page.rows {
            let class = if row.has_custom_mapping { "mapped" } else { "detected" };
            let _ = writeln!(
                html,
                r#"            <tr class="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                class,
                escape(&row.display_address),
                row.port,
                escape(&row.status),
                escape(&row.application_name),
            );
        }
        html.push_str("        </tbody>\n    </table>\n");
    }

    let _ = write!(
        html,
        r#"
    <footer>
        Atualizado em: {}
    </footer>
</body>
</html>
"#,
        escape(page.generated_at),
    );

    html
}

/// Minimal page for failed requests.
pub fn render_error(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head><meta charset="UTF-8"><title>Erro</title></head>
<body>
    <h1>Erro interno</h1>
    <p>{}</p>
    <p><a href="/">Voltar</a></p>
</body>
</html>
"#,
        escape(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(port: u16, name: &str, mapped: bool) -> DisplayRow {
        DisplayRow {
            local_ip: "127.0.0.1".to_string(),
            display_address: "Localhost Restrito".to_string(),
            port,
            status: "LISTEN".to_string(),
            application_name: name.to_string(),
            has_custom_mapping: mapped,
        }
    }

    fn page<'a>(rows: &'a [DisplayRow], notice: Option<&'a Notice>) -> Page<'a> {
        Page {
            host_name: "box",
            rows,
            notice,
            search_query: "",
            sort_key: SortKey::Port,
            sort_order: SortOrder::Desc,
            generated_at: "19/10/2026 10:00:00",
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_render_rows() {
        let rows = vec![row(5000, "<MyApp>", true), row(631, "Processo: cupsd", false)];
        let html = render(&page(&rows, None));

        assert!(html.contains("(box)"));
        assert!(html.contains(r#"<tr class="mapped"><td>Localhost Restrito</td><td>5000</td>"#));
        assert!(html.contains("&lt;MyApp&gt;"));
        assert!(html.contains(r#"<tr class="detected">"#));
        assert!(html.contains(r#"<option value="laddr.port" selected>"#));
        assert!(html.contains(r#"<option value="desc" selected>"#));
        assert!(!html.contains("no-data\">"));
        assert!(!html.contains(r#"class="flash-message"#));
    }

    #[test]
    fn test_render_empty_with_notice() {
        let notice = Notice::error("A porta é obrigatória!");
        let html = render(&page(&[], Some(&notice)));

        assert!(html.contains("Nenhuma conexão de escuta encontrada."));
        assert!(html.contains(r#"<div class="flash-message error">A porta é obrigatória!</div>"#));
        assert!(html.contains("Atualizado em: 19/10/2026 10:00:00"));
    }
}
