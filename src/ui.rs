use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use wearable_catalog::{Catalog, Device, DeviceVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    AllDevices,
    SmartBands,
    SmartWatches,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::AllDevices, Page::SmartBands, Page::SmartWatches];

    pub fn next(&self) -> Self {
        match self {
            Page::AllDevices => Page::SmartBands,
            Page::SmartBands => Page::SmartWatches,
            Page::SmartWatches => Page::AllDevices,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::AllDevices => Page::SmartWatches,
            Page::SmartBands => Page::AllDevices,
            Page::SmartWatches => Page::SmartBands,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::AllDevices => "All Devices",
            Page::SmartBands => "SmartBands",
            Page::SmartWatches => "SmartWatches",
        }
    }

    fn variant(&self) -> Option<DeviceVariant> {
        match self {
            Page::AllDevices => None,
            Page::SmartBands => Some(DeviceVariant::SmartBand),
            Page::SmartWatches => Some(DeviceVariant::SmartWatch),
        }
    }
}

pub struct App {
    pub catalog: Catalog,
    pub state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        let mut state = TableState::default();
        if catalog.count() > 0 {
            state.select(Some(0));
        }

        Self {
            catalog,
            state,
            current_page: Page::AllDevices,
            show_detail: false,
        }
    }

    /// Catalog positions shown on the current page, in catalog order
    pub fn visible_indices(&self) -> Vec<usize> {
        let variant = self.current_page.variant();
        self.catalog
            .devices()
            .iter()
            .enumerate()
            .filter(|(_, d)| variant.map_or(true, |v| d.variant() == v))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected_device(&self) -> Option<&Device> {
        let row = self.state.selected()?;
        let index = *self.visible_indices().get(row)?;
        self.catalog.get_by_index(index)
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.reset_selection();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.reset_selection();
    }

    pub fn sort_ascending(&mut self) {
        self.catalog.sort_by_price_ascending();
        self.reset_selection();
    }

    pub fn sort_descending(&mut self) {
        self.catalog.sort_by_price_descending();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        if self.visible_indices().is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn next(&mut self) {
        let len = self.visible_indices().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_indices().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn last(&mut self) {
        let len = self.visible_indices().len();
        if len > 0 {
            self.state.select(Some(len - 1));
        }
    }

    /// Apply one key press; `false` means the browser should close
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Enter => self.toggle_detail(),
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => self.previous_page(),
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Char('a') => self.sort_ascending(),
            KeyCode::Char('d') => self.sort_descending(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home => self.reset_selection(),
            KeyCode::End => self.last(),
            _ => {}
        }
        true
    }
}

/// Raw mode + alternate screen for as long as the value lives
struct BrowserTerminal {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl BrowserTerminal {
    fn open() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
        })
    }
}

impl Drop for BrowserTerminal {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    let outcome = {
        let mut screen = BrowserTerminal::open()?;
        browse(&mut screen.terminal, app)
    };

    // Screen is restored by now, so the message stays visible
    if let Err(err) = outcome {
        tracing::error!(error = %err, "catalog browser failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn browse<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if !app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(f.size());
    let (tabs_area, body_area, status_area) = (rows[0], rows[1], rows[2]);

    render_header(f, tabs_area, app);

    if app.show_detail {
        let columns =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(body_area);
        render_table(f, columns[0], app);
        render_detail_panel(f, columns[1], app);
    } else {
        render_table(f, body_area, app);
    }

    render_status_bar(f, status_area, app);
}

fn page_tab(page: Page, current: Page) -> Span<'static> {
    let style = if page == current {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(page.title(), style)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let catalog = &app.catalog;
    let mut spans: Vec<Span> = Vec::new();

    for (i, page) in Page::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        spans.push(page_tab(page, app.current_page));
    }

    let counts = [
        (format!("Total: {}", catalog.count()), Color::White),
        (
            format!("Bands {}", catalog.count_by_variant(DeviceVariant::SmartBand)),
            Color::Green,
        ),
        (
            format!("Watches {}", catalog.count_by_variant(DeviceVariant::SmartWatch)),
            Color::Cyan,
        ),
    ];
    for (text, color) in counts {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(text, Style::default().fg(color)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Wearable Catalog "),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["#", "ID", "Manufacturer", "Model", "Type", "Size", "Material", "Price"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let visible = app.visible_indices();
    let rows: Vec<Row> = visible
        .iter()
        .filter_map(|&i| app.catalog.get_by_index(i).map(|d| (i, d)))
        .map(|(i, device)| {
            let color = match device.variant() {
                DeviceVariant::SmartBand => Color::Green,
                DeviceVariant::SmartWatch => Color::Cyan,
            };

            Row::new(vec![
                Cell::from(i.to_string()),
                Cell::from(device.id().to_string()),
                Cell::from(device.manufacturer_name().to_string()),
                Cell::from(device.model_name().to_string()),
                Cell::from(device.variant().as_str()).style(Style::default().fg(color)),
                Cell::from(device.size().to_string()),
                Cell::from(device.material().to_string()),
                Cell::from(format!("€{:.2}", device.price())),
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(11),
            Constraint::Length(13),
            Constraint::Length(31),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(21),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", app.current_page.title())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.visible_indices().len();

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        key("Enter"),
        Span::raw(" Details | "),
        key("Tab"),
        Span::raw(" Page | "),
        key("↑/↓"),
        Span::raw(" Nav | "),
        key("a/d"),
        Span::raw(" Sort price | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Device Details ");

    let device = match app.selected_device() {
        Some(d) => d,
        None => {
            f.render_widget(Paragraph::new("No device selected").block(block), area);
            return;
        }
    };

    let label = |text: &'static str| {
        Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    };

    let variant_line = match (device.heart_rate_monitor(), device.display_type()) {
        (Some(monitor), _) => Line::from(vec![
            label("  Heart monitor: "),
            Span::raw(if monitor { "yes" } else { "no" }),
        ]),
        (None, Some(display)) => Line::from(vec![
            label("  Display: "),
            Span::raw(display.to_string()),
        ]),
        (None, None) => Line::from(""),
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![label("  ID: "), Span::raw(device.id().to_string())]),
        Line::from(vec![
            label("  Manufacturer: "),
            Span::raw(device.manufacturer_name().to_string()),
        ]),
        Line::from(vec![label("  Model: "), Span::raw(device.model_name().to_string())]),
        Line::from(vec![
            label("  Price: "),
            Span::styled(format!("€{:.2}", device.price()), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            label("  Insurance: "),
            Span::raw(format!("€{:.2} per year", device.insurance_premium())),
        ]),
        variant_line,
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", device),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let detail_panel = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(detail_panel, area);
}
