// HTML rendering of the draft view.
//
// Page layout:
//
// +--------------------------------------------------+
// | Title, notice                                     |
// +--------------------------------------------------+
// | Summary: team name, my team, draft log            |
// +-------------------------+------------------------+
// | Remove form              | Undo form              |
// | Offense selector + table | Defense selector+table |
// +-------------------------+------------------------+
// | Draft board (collapsed, 21 rounds)                |
// +--------------------------------------------------+
//
// Every form carries the current `off` / `def` selections as hidden fields so
// the redirect after a POST lands on the same view.

use crate::players::{PlayerRecord, Position, Side};
use crate::view::{DraftView, PositionPanel, RoundWidget, SelectForm, SummaryPanel, ViewSelection};

const STYLE: &str = "\
body{font-family:sans-serif;margin:1.5rem;}\
.columns{display:flex;gap:2rem;}\
.columns>section{flex:1;}\
.notice{background:#fde8e8;border:1px solid #e0a0a0;padding:.5rem;}\
.decided{color:#1b7f3b;}\
table{border-collapse:collapse;}\
td,th{padding:.2rem .6rem;border-bottom:1px solid #ddd;text-align:left;}\
form{margin:.4rem 0;}";

/// Render the complete page.
pub fn render_page(view: &DraftView) -> String {
    let mut html = String::with_capacity(16 * 1024);
    let title = escape(&view.title);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n"));

    if let Some(notice) = &view.notice {
        html.push_str(&format!("<p class=\"notice\" role=\"alert\">{}</p>\n", escape(notice)));
    }

    render_summary(&mut html, &view.summary);

    html.push_str("<div class=\"columns\">\n<section>\n");
    render_select_form(&mut html, "/remove", &view.remove_form, view.selection);
    render_position_panel(&mut html, &view.offense, view.selection);
    html.push_str("</section>\n<section>\n");
    render_select_form(&mut html, "/undo", &view.undo_form, view.selection);
    render_position_panel(&mut html, &view.defense, view.selection);
    html.push_str("</section>\n</div>\n");

    render_board(&mut html, &view.board, view.selection);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_summary(html: &mut String, summary: &SummaryPanel) {
    html.push_str(&format!(
        "<section class=\"summary\">\n<h2>{}</h2>\n",
        escape(&summary.team_name)
    ));

    html.push_str("<h3>My Team</h3>\n");
    if summary.my_team.is_empty() {
        html.push_str("<p>No players drafted yet.</p>\n");
    } else {
        html.push_str("<ol class=\"my-team\">\n");
        for name in &summary.my_team {
            html.push_str(&format!("<li>{}</li>\n", escape(name)));
        }
        html.push_str("</ol>\n");
    }

    html.push_str("<h3>Draft Log</h3>\n");
    if summary.draft_log.is_empty() {
        html.push_str("<p>No picks yet.</p>\n");
    } else {
        html.push_str("<ul class=\"draft-log\">\n");
        for name in &summary.draft_log {
            html.push_str(&format!("<li>{}</li>\n", escape(name)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
}

fn render_select_form(html: &mut String, action: &str, form: &SelectForm, selection: ViewSelection) {
    let disabled = if form.is_disabled() { " disabled" } else { "" };
    html.push_str(&format!("<form method=\"post\" action=\"{action}\">\n"));
    html.push_str(&hidden_selection(selection));
    html.push_str(&format!(
        "<label>{}<br><select name=\"name\"{disabled}>\n",
        escape(&form.label)
    ));
    html.push_str(&options(&form.options));
    html.push_str(&format!(
        "</select></label>\n<button type=\"submit\"{disabled}>{}</button>\n</form>\n",
        escape(&form.submit)
    ));
}

fn render_position_panel(html: &mut String, panel: &PositionPanel, selection: ViewSelection) {
    let (field, other_field, other) = match panel.side {
        Side::Offense => ("off", "def", selection.defense),
        Side::Defense => ("def", "off", selection.offense),
    };

    html.push_str(&format!("<h2>{}</h2>\n", panel.side));
    html.push_str("<form method=\"get\" action=\"/\">\n");
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"{other_field}\" value=\"{other}\">\n"
    ));
    html.push_str(&format!("<select name=\"{field}\">\n"));
    for pos in &panel.positions {
        let selected = if *pos == panel.selected { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{pos}\"{selected}>{pos}</option>\n"));
    }
    html.push_str("</select>\n<button type=\"submit\">Show</button>\n</form>\n");

    render_player_table(html, &panel.rows, panel.selected);
}

fn render_player_table(html: &mut String, rows: &[PlayerRecord], position: Position) {
    if rows.is_empty() {
        html.push_str(&format!("<p>No available {position} players.</p>\n"));
        return;
    }
    html.push_str("<table>\n<tr><th>RK</th><th>Player</th><th>Pos</th><th>Bye</th></tr>\n");
    for p in rows {
        let bye = p.bye.map(|b| b.to_string()).unwrap_or_else(|| "-".into());
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            p.rank,
            escape(&p.name),
            p.position,
            bye
        ));
    }
    html.push_str("</table>\n");
}

fn render_board(html: &mut String, board: &[RoundWidget], selection: ViewSelection) {
    html.push_str("<details class=\"draft-board\">\n<summary>Draft Board</summary>\n");
    for widget in board {
        match widget {
            RoundWidget::Decided { .. } => {
                if let Some(label) = widget.decided_label() {
                    html.push_str(&format!("<p class=\"decided\">{}</p>\n", escape(&label)));
                }
            }
            RoundWidget::Pending {
                round,
                side,
                position,
                options: names,
            } => {
                let disabled = if names.is_empty() { " disabled" } else { "" };
                html.push_str("<form method=\"post\" action=\"/pick\">\n");
                html.push_str(&hidden_selection(selection));
                html.push_str(&format!(
                    "<input type=\"hidden\" name=\"round\" value=\"{round}\">\n"
                ));
                html.push_str(&format!(
                    "<label>#{round} Pick ({side} {position})<br><select name=\"name\"{disabled}>\n"
                ));
                html.push_str(&options(names));
                html.push_str(&format!(
                    "</select></label>\n<button type=\"submit\"{disabled}>Pick</button>\n</form>\n"
                ));
            }
        }
    }
    html.push_str("</details>\n");
}

fn hidden_selection(selection: ViewSelection) -> String {
    format!(
        "<input type=\"hidden\" name=\"off\" value=\"{}\">\n<input type=\"hidden\" name=\"def\" value=\"{}\">\n",
        selection.offense, selection.defense
    )
}

fn options(names: &[String]) -> String {
    names
        .iter()
        .map(|n| {
            let n = escape(n);
            format!("<option value=\"{n}\">{n}</option>\n")
        })
        .collect()
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> DraftView {
        DraftView {
            title: "Draft Assistent".into(),
            notice: None,
            selection: ViewSelection {
                offense: Position::RB,
                defense: Position::LB,
            },
            summary: SummaryPanel {
                team_name: "Super Smash Bros.".into(),
                my_team: vec!["Derrick Henry".into()],
                draft_log: vec!["Josh Allen".into()],
            },
            remove_form: SelectForm {
                label: "Picked Player".into(),
                submit: "Remove Player".into(),
                options: vec!["Nick Chubb".into(), "Ja'Marr Chase".into()],
            },
            undo_form: SelectForm {
                label: "Undo Picked Player".into(),
                submit: "Undo".into(),
                options: vec![],
            },
            offense: PositionPanel {
                side: Side::Offense,
                positions: Side::Offense.positions().to_vec(),
                selected: Position::RB,
                rows: vec![PlayerRecord {
                    rank: 4,
                    name: "Nick Chubb".into(),
                    position: Position::RB,
                    bye: None,
                }],
            },
            defense: PositionPanel {
                side: Side::Defense,
                positions: Side::Defense.positions().to_vec(),
                selected: Position::LB,
                rows: vec![],
            },
            board: vec![
                RoundWidget::Decided {
                    round: 1,
                    name: "Derrick Henry".into(),
                },
                RoundWidget::Pending {
                    round: 2,
                    side: Side::Offense,
                    position: Position::RB,
                    options: vec!["Nick Chubb".into()],
                },
                RoundWidget::Pending {
                    round: 21,
                    side: Side::Offense,
                    position: Position::LB,
                    options: vec![],
                },
            ],
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape("<a href=\"x\">&'</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape("Plain Name"), "Plain Name");
    }

    #[test]
    fn page_contains_panels_and_board() {
        let html = render_page(&view());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Draft Assistent</h1>"));
        assert!(html.contains("<h2>Super Smash Bros.</h2>"));
        assert!(html.contains("<h2>Offense</h2>"));
        assert!(html.contains("<h2>Defense</h2>"));
        assert!(html.contains("<details class=\"draft-board\">"));
        assert!(html.contains("#1 Pick: Derrick Henry"));
        assert!(html.contains("<input type=\"hidden\" name=\"round\" value=\"2\">"));
        assert!(html.contains("No available LB players."));
        assert!(html.contains("<td>Nick Chubb</td><td>RB</td><td>-</td>"));
    }

    #[test]
    fn names_are_escaped() {
        let html = render_page(&view());
        assert!(html.contains("Ja&#39;Marr Chase"));
        assert!(!html.contains("Ja'Marr"));
    }

    #[test]
    fn forms_carry_selection_and_empty_forms_are_disabled() {
        let html = render_page(&view());
        assert!(html.contains("<input type=\"hidden\" name=\"off\" value=\"RB\">"));
        assert!(html.contains("<input type=\"hidden\" name=\"def\" value=\"LB\">"));
        assert!(html.contains("<option value=\"RB\" selected>RB</option>"));
        // Undo form and round 21 have nothing to submit.
        assert!(html.contains("<button type=\"submit\" disabled>Undo</button>"));
        assert!(html.contains("<button type=\"submit\" disabled>Pick</button>"));
        assert!(html.contains("<button type=\"submit\">Remove Player</button>"));
    }

    #[test]
    fn notice_rendered_when_present() {
        let mut v = view();
        assert!(!render_page(&v).contains("class=\"notice\""));
        v.notice = Some("unknown player: <Tom>".into());
        let html = render_page(&v);
        assert!(html.contains("<p class=\"notice\" role=\"alert\">unknown player: &lt;Tom&gt;</p>"));
    }
}
