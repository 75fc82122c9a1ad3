use crate::application::{App, AppMode, RequestKind};
use crate::domain::GridView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let visible_view = app.panel.view().filter(|_| app.panel.is_visible()).cloned();
    match visible_view {
        Some(view) => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);
            render_editor(f, app, panes[0]);
            render_result(f, &view, panes[1]);
        }
        None => render_editor(f, app, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let (row, col) = app.editor.cursor();
    let activity = match app.in_flight().map(|p| p.kind) {
        Some(RequestKind::Run) => " | running...",
        Some(RequestKind::Sample) => " | loading sample...",
        None => "",
    };
    let header = Paragraph::new(format!(
        "plantdesk - Plant Layout Runner | Ln {}, Col {}{}",
        row + 1,
        col + 1,
        activity
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    app.editor.ensure_cursor_visible(inner_height);

    let scroll = app.editor.scroll_row;
    let text = app
        .editor
        .lines()
        .iter()
        .skip(scroll)
        .take(inner_height)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");

    let border_style = if matches!(app.mode, AppMode::Normal) {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let editor = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Model (YAML)")
            .border_style(border_style),
    );
    f.render_widget(editor, area);

    if matches!(app.mode, AppMode::Normal) && inner_width > 0 && inner_height > 0 {
        let (row, col) = app.editor.cursor();
        let x = area.x + 1 + col.min(inner_width - 1) as u16;
        let y = area.y + 1 + (row - scroll) as u16;
        f.set_cursor_position((x, y));
    }
}

fn render_result(f: &mut Frame, view: &GridView, area: Rect) {
    let header_style = Style::default().fg(Color::Yellow);
    let active_style = Style::default()
        .fg(Color::Black)
        .bg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);

    let mut headers = vec![Cell::from("")];
    headers.extend(
        view.column_headers
            .iter()
            .map(|label| Cell::from(label.clone()).style(header_style)),
    );

    let mut rows = vec![Row::new(headers).height(1)];
    for row in &view.rows {
        let mut cells = vec![Cell::from(row.header.clone()).style(header_style)];
        cells.extend(row.cells.iter().map(|cell| {
            let style = if cell.is_active() { active_style } else { Style::default() };
            Cell::from(cell.text.clone()).style(style)
        }));
        rows.push(Row::new(cells).height(1));
    }

    let mut widths = vec![Constraint::Length(view.index_width() as u16)];
    widths.extend(
        view.column_widths()
            .into_iter()
            .map(|w| Constraint::Length(w as u16)),
    );

    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Result (Ctrl+W close | Ctrl+E JSON | Ctrl+T CSV)"),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => match &app.status_message {
            Some(status) => status.clone(),
            None => "Ctrl+R: run | Ctrl+S: save model | Ctrl+O: import | Ctrl+L: sample | F1: help | Ctrl+Q: quit".to_string(),
        },
        AppMode::ImportFile => format!(
            "Import model from: {} (Enter to load, Esc to cancel)",
            app.filename_input
        ),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::ImportFile => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
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

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("plantdesk Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"PLANTDESK

Edit a plant model in YAML on the left, send it to the layout service,
and inspect the returned plant grid on the right.

=== RUNNING ===
Ctrl+R          Submit the model to the service
                Only one request runs at a time
Ctrl+L          Replace the model with the service's sample model

=== RESULT GRID ===
Column and row headers are 1-based.
Highlighted cells hold a station; blank cells are empty positions.
Ctrl+W          Close the result panel (also forgets the result)
Ctrl+E          Save the raw response as results.json
Ctrl+T          Save the grid as results.csv
Ctrl+Y          Copy the raw response to the clipboard

=== FILES ===
Ctrl+S          Save the model as model.yaml
Ctrl+O          Import a model from a file path
                Files are written into the output directory
                (--output-dir, default: current directory)

=== EDITING ===
Arrow keys      Move the cursor
Home/End        Start/end of line
Enter           New line
Tab             Insert two spaces
Backspace/Del   Delete characters

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/q        Close this help window

Ctrl+Q          Quit"#;
