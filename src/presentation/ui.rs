use crate::application::{App, AppMode, FieldKind, FormField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_form(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Alert) {
        render_alert_popup(f, app);
    }

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "calcform - Formula Fields | Field: {}",
        app.focused_field().label
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let constraints: Vec<Constraint> = app
        .fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, field) in app.fields.iter().enumerate() {
        let focused = index == app.focused && matches!(app.mode, AppMode::Form);
        render_field(f, field, focused, rows[index]);

        if focused {
            // Place the terminal cursor inside the field, after the border
            let col = field.value[..field.cursor].chars().count() as u16;
            f.set_cursor_position((rows[index].x + 1 + col, rows[index].y + 1));
        }
    }
}

fn render_field(f: &mut Frame, field: &FormField, focused: bool, area: Rect) {
    let title = match (&field.error, field.kind) {
        (Some(message), _) => format!(" {} - {} ", field.label, message),
        (None, FieldKind::Currency) => format!(" {} ", field.label),
        (None, FieldKind::Text) => format!(" {} (text) ", field.label),
    };

    let border_style = if field.error.is_some() {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content_style = if field.error.is_some() {
        Style::default().bg(Color::Rgb(255, 230, 230)).fg(Color::Black)
    } else {
        Style::default()
    };

    let widget = Paragraph::new(field.value.clone())
        .style(content_style)
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border_style));

    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Form => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Tab/Enter: next field | Shift+Tab: previous | =2+3*4 in a currency field to calculate | F1: help | Esc: quit".to_string()
            }
        }
        AppMode::Alert => "Formula error (Enter to dismiss)".to_string(),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Form => Style::default(),
            AppMode::Alert => Style::default().fg(Color::Red),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_alert_popup(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 6,
        y: area.height / 3,
        width: area.width * 2 / 3,
        height: 5,
    };

    f.render_widget(Clear, popup_area);

    let message = app.alert_message.as_deref().unwrap_or("");
    let alert = Paragraph::new(format!("{}\n\n(Enter to dismiss)", message))
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Formula Error")
            .border_style(Style::default().fg(Color::Red)))
        .style(Style::default().fg(Color::White));

    f.render_widget(alert, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("calcform Formula Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"CALCFORM FORMULA REFERENCE

=== BASIC CONCEPTS ===
• Currency fields accept plain numbers (42, 3.14) or formulas
• A formula starts with = and is calculated when you leave the field
• The field text is replaced by the result, rounded to 2 decimal places
• Plain numbers are left untouched - only =formulas are calculated
• Text fields (marked "text") accept anything and are never calculated

=== ARITHMETIC OPERATORS ===
+       Addition                    =5+3 → 8
-       Subtraction                 =10-3 → 7
*       Multiplication              =4*3 → 12
x       Multiplication (alias)      =2x3 → 6
/       Division                    =15/3 → 5
( )     Grouping                    =(2+3)*4 → 20

Standard precedence applies: * and / before + and -.
Unary minus works inside a formula: =10+-3 → 7.

=== WHILE TYPING ===
Digits          Always accepted
=               Only as the first character, only once
+ - * / ( )     Only after the leading =
.               One decimal point per number
Anything else   Rejected at the keystroke

=== RESULTS AND ERRORS ===
• Results are rounded to 2 decimal places (=10/3 → 3.33)
• Negative results are rejected: "Negative value detected."
• Broken formulas (=5+, =5/0, unbalanced parens) report
  "Invalid formula syntax."
• On an error the field keeps your text, turns red, and focus
  returns to it after you dismiss the alert

=== NAVIGATION ===
Tab / Enter     Calculate and move to the next field
Shift+Tab       Calculate and move to the previous field
↑ / ↓           Move between fields
← / →           Move the cursor inside a field
Backspace/Del   Edit the field text
F1              Show this help
Esc             Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/q        Close this help window"#.to_string()
}
