use crate::model::{ArchitecturalElement, ElementKind, ElementParams, ElementState};
use crate::ui::app::{App, StatusKind, View};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
    },
    Frame,
};

// Brandbook colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C);
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0);
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68);
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C);
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65);
const BRAND_RED: Color = Color::Rgb(0xB0, 0x3A, 0x2E);

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);

/// Smallest half-extent of the plan view, in metres.
const PLAN_MIN_HALF_EXTENT: f64 = 6.0;
const PLAN_MARGIN: f64 = 1.0;

pub fn draw_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main_content(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let elements = app.elements();
    let count = |kind: ElementKind| elements.iter().filter(|e| e.kind() == kind).count();
    let title = format!(
        " BIM Configurator | {} walls | {} slabs | {} furniture ",
        count(ElementKind::Wall),
        count(ElementKind::Slab),
        count(ElementKind::Furniture),
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_main_content(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([
        Constraint::Percentage(30), // Elements
        Constraint::Percentage(40), // Plan
        Constraint::Percentage(30), // Properties
    ])
    .split(area);

    draw_elements(frame, chunks[0], app);
    draw_plan(frame, chunks[1], app);
    draw_properties(frame, chunks[2], app);
}

fn draw_elements(frame: &mut Frame, area: Rect, app: &App) {
    let elements = app.elements();
    let visible_rows = (area.height as usize).saturating_sub(3);

    let scroll_offset = if app.selected_index >= visible_rows {
        app.selected_index - visible_rows + 1
    } else {
        0
    };

    let header = Row::new(vec!["Element", "Id", "State"])
        .style(HEADER_STYLE)
        .height(1);

    let rows: Vec<Row> = elements
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, e)| {
            let style = match e.state {
                ElementState::Selected | ElementState::Editing => SELECTED_STYLE,
                _ if i == app.selected_index => Style::default().add_modifier(Modifier::BOLD),
                _ => Style::default(),
            };
            Row::new(vec![e.label(), e.id.short(), state_name(e.state).to_string()]).style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(55),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
    ];

    let title = format!(" Elements ({}) ", elements.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(table, area);

    if elements.len() > visible_rows {
        if let Some(scrollbar_area) = scrollbar_area(area) {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state =
                ScrollbarState::new(elements.len()).position(app.selected_index);
            frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
        }
    }
}

/// Column along the right border of a table pane, below its header.
fn scrollbar_area(area: Rect) -> Option<Rect> {
    if area.width == 0 || area.height < 3 {
        return None;
    }
    Some(Rect {
        x: (area.x + area.width).saturating_sub(1),
        y: area.y.saturating_add(2),
        width: 1,
        height: area.height.saturating_sub(3),
    })
}

/// Canvas bounds `(x, y)` covering every element footprint. Canvas `y` is
/// world `-z`, so +Z points down the screen.
#[must_use]
pub fn plan_bounds(app: &App) -> ([f64; 2], [f64; 2]) {
    let mut x = [-PLAN_MIN_HALF_EXTENT, PLAN_MIN_HALF_EXTENT];
    let mut y = [-PLAN_MIN_HALF_EXTENT, PLAN_MIN_HALF_EXTENT];
    for e in app.session.elements() {
        let bb = e.volume.aabb();
        x[0] = x[0].min(bb.min.x - PLAN_MARGIN);
        x[1] = x[1].max(bb.max.x + PLAN_MARGIN);
        y[0] = y[0].min(-bb.max.z - PLAN_MARGIN);
        y[1] = y[1].max(-bb.min.z + PLAN_MARGIN);
    }
    (x, y)
}

fn element_color(e: &ArchitecturalElement) -> Color {
    match e.state {
        ElementState::Selected | ElementState::Editing => BRAND_ORANGE,
        _ => {
            let (r, g, b) = e.material.rgb();
            Color::Rgb(r, g, b)
        }
    }
}

fn draw_plan(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Plan (click to pick) ")
        .borders(Borders::ALL);
    app.plan_area.set(block.inner(area));

    let (x_bounds, y_bounds) = plan_bounds(app);
    let elements = app.elements();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&CanvasLine::new(-0.5, 0.0, 0.5, 0.0, BRAND_MUTED));
            ctx.draw(&CanvasLine::new(0.0, -0.5, 0.0, 0.5, BRAND_MUTED));

            // selected elements last so they stay on top
            let (selected, rest): (Vec<_>, Vec<_>) = elements
                .iter()
                .partition(|e| matches!(e.state, ElementState::Selected | ElementState::Editing));
            for e in rest.into_iter().chain(selected) {
                let color = element_color(e);
                let fp = e.volume.footprint();
                for i in 0..4 {
                    let (x1, z1) = fp[i];
                    let (x2, z2) = fp[(i + 1) % 4];
                    ctx.draw(&CanvasLine::new(x1, -z1, x2, -z2, color));
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_properties(frame: &mut Frame, area: Rect, app: &App) {
    let Some(element) = app.session.selected() else {
        let hint = Paragraph::new("Select an element to view its properties.")
            .style(Style::default().fg(BRAND_MUTED))
            .block(Block::default().title(" Properties ").borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    };

    let rows = if app.view == View::Editing {
        edit_rows(app)
    } else {
        property_rows(element)
    };

    let widths = [Constraint::Percentage(45), Constraint::Percentage(55)];
    let title = if app.view == View::Editing {
        format!(" Editing {} ", element.kind())
    } else {
        format!(" {} ", element.kind())
    };
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Property", "Value"]).style(HEADER_STYLE))
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(table, area);
}

fn property_rows(element: &ArchitecturalElement) -> Vec<Row<'static>> {
    let mut rows = vec![
        Row::new(vec!["Id".to_string(), element.id.short()]),
        Row::new(vec![
            "State".to_string(),
            state_name(element.state).to_string(),
        ]),
    ];

    match &element.params {
        ElementParams::Wall(w) => {
            rows.push(Row::new(vec![
                "Start".to_string(),
                format!("{:.2}, {:.2}", w.start.x, w.start.z),
            ]));
            rows.push(Row::new(vec![
                "End".to_string(),
                format!("{:.2}, {:.2}", w.end.x, w.end.z),
            ]));
            rows.push(Row::new(vec![
                "Length".to_string(),
                format!("{:.2} m", element.length().unwrap_or(0.0)),
            ]));
            rows.push(Row::new(vec![
                "Height".to_string(),
                format!("{:.2} m", w.height),
            ]));
            rows.push(Row::new(vec![
                "Thickness".to_string(),
                format!("{:.2} m", w.thickness),
            ]));
        }
        ElementParams::Slab(s) => {
            rows.push(Row::new(vec!["Width".to_string(), format!("{:.2} m", s.width)]));
            rows.push(Row::new(vec!["Depth".to_string(), format!("{:.2} m", s.depth)]));
            rows.push(Row::new(vec![
                "Thickness".to_string(),
                format!("{:.2} m", s.thickness),
            ]));
        }
        ElementParams::Furniture(f) => {
            rows.push(Row::new(vec!["Model".to_string(), f.source_path.clone()]));
            rows.push(Row::new(vec![
                "Position".to_string(),
                format!("{:.2}, {:.2}", f.position_x, f.position_z),
            ]));
        }
    }

    let v = &element.volume;
    rows.push(Row::new(vec![
        "Center".to_string(),
        format!("{:.2}, {:.2}, {:.2}", v.center.x, v.center.y, v.center.z),
    ]));
    rows.push(Row::new(vec![
        "Yaw".to_string(),
        format!("{:.1}°", v.yaw.to_degrees()),
    ]));
    rows.push(
        Row::new(vec!["Color".to_string(), element.material.to_string()])
            .style(Style::default().fg(BRAND_GREEN)),
    );
    rows
}

fn edit_rows(app: &App) -> Vec<Row<'static>> {
    let Some(draft) = app.session.draft() else {
        return Vec::new();
    };
    let current = app.current_field();

    let mut rows: Vec<Row> = app
        .fields()
        .iter()
        .map(|field| {
            if Some(*field) == current {
                Row::new(vec![field.label().to_string(), format!("{}▏", app.input)])
                    .style(SELECTED_STYLE)
            } else {
                Row::new(vec![field.label().to_string(), field.value(draft)])
            }
        })
        .collect();

    match app.session.preview() {
        Some(Ok(built)) => rows.push(
            Row::new(vec![
                "Result".to_string(),
                format!(
                    "{:.2} × {:.2} × {:.2}",
                    built.volume.size.x, built.volume.size.y, built.volume.size.z
                ),
            ])
            .style(Style::default().fg(BRAND_GREEN)),
        ),
        Some(Err(e)) => rows.push(
            Row::new(vec!["Result".to_string(), e.to_string()])
                .style(Style::default().fg(BRAND_RED)),
        ),
        None => {}
    }
    rows
}

fn state_name(state: ElementState) -> &'static str {
    match state {
        ElementState::Created => "placed",
        ElementState::Selected => "selected",
        ElementState::Editing => "editing",
        ElementState::Removed => "removed",
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some((message, kind)) => {
            let color = match kind {
                StatusKind::Info => BRAND_GREEN,
                StatusKind::Warning => BRAND_ORANGE,
                StatusKind::Error => BRAND_RED,
            };
            Line::from(vec![
                Span::styled(format!(" {message} "), Style::default().fg(color)),
                Span::styled(help_text(app.view), Style::default().fg(BRAND_MUTED)),
            ])
        }
        None => Line::from(Span::styled(
            help_text(app.view),
            Style::default().fg(BRAND_MUTED),
        )),
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn help_text(view: View) -> &'static str {
    match view {
        View::Scene => {
            " w Wall | s Slab | f Furniture | ↑↓ Select | e Edit | d Remove | c Clear | q Quit "
        }
        View::Editing => " Tab/↑↓ Field | Enter Apply | Esc Cancel ",
    }
}
