use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use bmongo_notify::{Toast, ToastKind};

use crate::app::ConsoleApp;
use crate::overlay::{FormOverlay, Overlay, PendingConfirmation, UndoPanel};

// -- Color palette ----------------------------------------------------------

const ACCENT: Color = Color::Cyan;
const HEADER_FG: Color = Color::White;
const DIM: Color = Color::DarkGray;
const SELECTED_BG: Color = Color::Indexed(236);
const KEY_FG: Color = Color::Yellow;
const MUTED: Color = Color::Gray;
const DANGER_FG: Color = Color::Red;
const OK_FG: Color = Color::Green;

pub fn render_console(frame: &mut Frame, app: &ConsoleApp) {
    let area = frame.area();
    let pinned = app.pinned_items();

    let mut constraints = vec![Constraint::Length(3)];
    if !pinned.is_empty() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(3));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut row = 0;
    render_header(frame, rows[row], app);
    row += 1;
    if !pinned.is_empty() {
        render_quick_access(frame, rows[row], app);
        row += 1;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(20)])
        .split(rows[row]);
    render_sidebar(frame, columns[0], app);
    render_log_panel(frame, columns[1], app);
    row += 1;

    render_footer(frame, rows[row], app);

    match &app.overlay {
        Overlay::None => {}
        Overlay::Confirm(pending) => render_confirm(frame, area, pending),
        Overlay::Undo(panel) => render_undo(frame, area, panel),
        Overlay::Form(form) => render_form(frame, area, form),
    }

    render_toasts(frame, area, app.toasts.active());
}

pub fn connection_label(connected: bool) -> (&'static str, Color) {
    if connected {
        ("● conectado", OK_FG)
    } else {
        ("○ sem conexão", DANGER_FG)
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let (label, color) = connection_label(app.state.connected);
    let line = Line::from(vec![
        Span::styled(
            " BMongo VIP ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("— console de manutenção  ", Style::default().fg(MUTED)),
        Span::styled(label, Style::default().fg(color)),
    ]);
    let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(DIM));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_quick_access(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let mut spans = Vec::new();
    for (idx, item) in app.pinned_items().iter().enumerate().take(9) {
        spans.push(Span::styled(
            format!(" {} ", idx + 1),
            Style::default().fg(KEY_FG),
        ));
        spans.push(Span::styled(
            item.label.to_string(),
            Style::default().fg(HEADER_FG),
        ));
        spans.push(Span::styled("  ", Style::default()));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(" Atalhos ", Style::default().fg(MUTED)));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let mut lines = Vec::new();
    for (module_idx, module) in app.state.modules.iter().enumerate() {
        let module_selected = module_idx == app.state.selected_module;
        let module_style = if module_selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        lines.push(Line::from(Span::styled(module.name, module_style)));

        if !module_selected {
            continue;
        }
        for (item_idx, item) in module.items.iter().enumerate() {
            let selected = item_idx == app.state.selected_item;
            let marker = if app.pinned.contains(item.id) { "★ " } else { "  " };
            let fg = if item.dangerous { DANGER_FG } else { HEADER_FG };
            let mut style = Style::default().fg(fg);
            if selected {
                style = style.bg(SELECTED_BG).add_modifier(Modifier::BOLD);
            }
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(KEY_FG)),
                Span::styled(item.label.to_string(), style),
            ]));
            if selected {
                lines.push(Line::from(Span::styled(
                    format!("    {}", item.description),
                    Style::default().fg(DIM),
                )));
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(" Módulos ", Style::default().fg(MUTED)));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_log_panel(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let window = app.state.logs.window(visible_height.max(1), app.state.scroll_back);

    let lines: Vec<Line> = if window.is_empty() {
        vec![Line::from(Span::styled(
            "Nenhum log ainda. Execute uma operação.",
            Style::default().fg(DIM),
        ))]
    } else {
        window
            .iter()
            .map(|raw| Line::from(Span::styled((*raw).to_string(), log_line_style(raw))))
            .collect()
    };

    let title = if app.state.scroll_back > 0 {
        format!(" 📋 Log de Execução (−{}) ", app.state.scroll_back)
    } else {
        " 📋 Log de Execução ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(title, Style::default().fg(MUTED)));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn log_line_style(line: &str) -> Style {
    let lower = line.to_lowercase();
    if lower.contains("erro") || lower.contains("falha") || line.contains('❌') {
        Style::default().fg(DANGER_FG)
    } else if line.contains('✅') {
        Style::default().fg(OK_FG)
    } else if line.contains('⚠') {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(HEADER_FG)
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let hints = Line::from(vec![
        Span::styled(" ↑↓←→", Style::default().fg(KEY_FG)),
        Span::styled(" navegar ", Style::default().fg(DIM)),
        Span::styled("Enter", Style::default().fg(KEY_FG)),
        Span::styled(" executar ", Style::default().fg(DIM)),
        Span::styled("p", Style::default().fg(KEY_FG)),
        Span::styled(" fixar ", Style::default().fg(DIM)),
        Span::styled("u", Style::default().fg(KEY_FG)),
        Span::styled(" reverter ", Style::default().fg(DIM)),
        Span::styled("x", Style::default().fg(KEY_FG)),
        Span::styled(" cancelar op ", Style::default().fg(DIM)),
        Span::styled("l", Style::default().fg(KEY_FG)),
        Span::styled(" limpar log ", Style::default().fg(DIM)),
        Span::styled("r", Style::default().fg(KEY_FG)),
        Span::styled(" reconectar ", Style::default().fg(DIM)),
        Span::styled("Esc", Style::default().fg(KEY_FG)),
        Span::styled(" sair  ", Style::default().fg(DIM)),
        Span::styled(app.state.status_line.as_str(), Style::default().fg(ACCENT)),
    ]);
    let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(DIM));
    frame.render_widget(Paragraph::new(hints).block(block), area);
}

fn render_confirm(frame: &mut Frame, area: Rect, pending: &PendingConfirmation) {
    let popup = centered_rect(area, 60, 9);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            pending.title.clone(),
            Style::default().fg(DANGER_FG).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            pending.description.clone(),
            Style::default().fg(HEADER_FG),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(KEY_FG)),
            Span::styled("=confirmar  ", Style::default().fg(DIM)),
            Span::styled("Esc", Style::default().fg(KEY_FG)),
            Span::styled("=cancelar", Style::default().fg(DIM)),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DANGER_FG))
        .title(Span::styled(
            " Confirmar Ação ",
            Style::default().fg(HEADER_FG),
        ));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        popup,
    );
}

fn render_undo(frame: &mut Frame, area: Rect, panel: &UndoPanel) {
    let height = (panel.ops.len() as u16 + 6).clamp(7, area.height);
    let popup = centered_rect(area, 64, height);
    frame.render_widget(Clear, popup);

    let mut lines = Vec::new();
    if panel.ops.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nenhuma operação reversível no histórico.",
            Style::default().fg(DIM),
        )));
    } else {
        for (idx, op) in panel.ops.iter().enumerate() {
            let selected = idx == panel.selected;
            let mut style = Style::default().fg(HEADER_FG);
            if selected {
                style = style.bg(SELECTED_BG).add_modifier(Modifier::BOLD);
            }
            lines.push(Line::from(Span::styled(format_undo_row(op), style)));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(KEY_FG)),
        Span::styled("=reverter  ", Style::default().fg(DIM)),
        Span::styled("Esc", Style::default().fg(KEY_FG)),
        Span::styled("=fechar", Style::default().fg(DIM)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " 🆘 Deu Merda? Reverta Aqui! ",
            Style::default().fg(HEADER_FG),
        ));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn format_undo_row(op: &bmongo_core::types::UndoableOperation) -> String {
    format!("{}  ({})", op.label, op.timestamp)
}

fn render_form(frame: &mut Frame, area: Rect, form: &FormOverlay) {
    let height = (form.fields.len() as u16 * 2 + 6).clamp(8, area.height);
    let popup = centered_rect(area, 64, height);
    frame.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for (idx, field) in form.fields.iter().enumerate() {
        let focused = idx == form.focus;
        let label_style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        lines.push(Line::from(Span::styled(field.label.clone(), label_style)));

        let value = if field.is_choice() {
            format!("◂ {} ▸", field.display_value())
        } else if focused {
            format!("{}▏", field.display_value())
        } else {
            field.display_value().to_string()
        };
        let mut value_style = Style::default().fg(HEADER_FG);
        if focused {
            value_style = value_style.bg(SELECTED_BG);
        }
        lines.push(Line::from(Span::styled(format!("  {value}"), value_style)));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(KEY_FG)),
        Span::styled("=próximo campo  ", Style::default().fg(DIM)),
        Span::styled("←→", Style::default().fg(KEY_FG)),
        Span::styled("=opções  ", Style::default().fg(DIM)),
        Span::styled("Enter", Style::default().fg(KEY_FG)),
        Span::styled("=enviar  ", Style::default().fg(DIM)),
        Span::styled("Esc", Style::default().fg(KEY_FG)),
        Span::styled("=cancelar", Style::default().fg(DIM)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" {} ", form.title),
            Style::default().fg(HEADER_FG),
        ));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_toasts(frame: &mut Frame, area: Rect, toasts: &[Toast]) {
    for (idx, toast) in toasts.iter().enumerate() {
        let width = (toast.message.chars().count() as u16 + 4).min(area.width);
        let y = area.y + 1 + idx as u16 * 3;
        if y + 3 > area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };
        frame.render_widget(Clear, rect);

        let color = match toast.kind {
            ToastKind::Success => OK_FG,
            ToastKind::Error => DANGER_FG,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                toast.message.clone(),
                Style::default().fg(color),
            )))
            .block(block),
            rect,
        );
    }
}

/// Center a fixed-size popup inside `area`, clamping to its bounds.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
