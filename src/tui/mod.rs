//! Ratatui-based terminal dashboard.
//!
//! The dashboard provides a fitness-check form (category + g/km value) with its
//! verdict, the top-5 reducers snapshot, a map-style country listing and a bar
//! chart of the top reducers for a selectable year range.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use tracing::info;

use crate::app::pipeline::{ReductionRun, Snapshot};
use crate::domain::{BAR_CHART_TOP_N, FitnessVerdict, ReduceConfig, VehicleCategory};
use crate::error::AppError;
use crate::io::DatasetCache;
use crate::plot::ReductionBand;

mod plotters_chart;

use plotters_chart::{ReductionBarChart, band_color};

const FIELD_CATEGORY: usize = 0;
const FIELD_VALUE: usize = 1;
const FIELD_START: usize = 2;
const FIELD_END: usize = 3;

/// Start the TUI.
pub fn run(config: ReduceConfig) -> Result<(), AppError> {
    // Load before switching screens; a slow read would otherwise show a blank terminal.
    let mut app = App::new(config);

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::io(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::io(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::io(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: ReduceConfig,
    cache: DatasetCache,
    category: VehicleCategory,
    value_input: String,
    editing_value: bool,
    selected_field: usize,
    verdict: Option<FitnessVerdict>,
    years: Vec<i32>,
    start_idx: usize,
    end_idx: usize,
    snapshot: Snapshot,
    run: Option<ReductionRun>,
    show_methodology: bool,
    status: String,
}

impl App {
    fn new(config: ReduceConfig) -> Self {
        let mut cache = DatasetCache::new();
        let snapshot = crate::app::pipeline::snapshot(&mut cache, &config);

        let years = cache
            .get_or_load(&config.data_path, &config.columns)
            .map(|ds| crate::reduction::available_years(&ds.records))
            .unwrap_or_default();

        let mut app = Self {
            config,
            cache,
            category: VehicleCategory::Car,
            value_input: "100.0".to_string(),
            editing_value: false,
            selected_field: FIELD_CATEGORY,
            verdict: None,
            start_idx: 0,
            end_idx: years.len().saturating_sub(1),
            years,
            snapshot,
            run: None,
            show_methodology: false,
            status: "Your assessment result will appear here.".to_string(),
        };
        app.recompute();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::io(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::io(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::io(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_value {
            self.handle_value_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_END {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field == FIELD_VALUE {
                    self.editing_value = true;
                    self.status = "Editing g/km value. Enter to assess, Esc to cancel.".to_string();
                } else {
                    self.assess();
                }
            }
            KeyCode::Char('a') => self.assess(),
            KeyCode::Char('m') => {
                self.show_methodology = !self.show_methodology;
            }
            _ => {}
        }

        false
    }

    fn handle_value_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_value = false;
                self.status = "Value edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_value = false;
                self.assess();
            }
            KeyCode::Backspace => {
                self.value_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || (c == '.' && !self.value_input.contains('.')) {
                    self.value_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            FIELD_CATEGORY => {
                self.category = if delta >= 0 {
                    self.category.next()
                } else {
                    self.category.prev()
                };
                self.verdict = None;
                self.status = format!("category: {}", self.category);
            }
            FIELD_VALUE => {
                let current = self.value_input.trim().parse::<f64>().unwrap_or(0.0);
                let next = (current + f64::from(delta)).max(0.0);
                self.value_input = format!("{next:.1}");
                self.verdict = None;
            }
            FIELD_START => {
                self.start_idx = step_index(self.start_idx, delta, self.years.len());
                self.recompute();
            }
            FIELD_END => {
                self.end_idx = step_index(self.end_idx, delta, self.years.len());
                self.recompute();
            }
            _ => {}
        }
    }

    fn assess(&mut self) {
        let parsed = self
            .value_input
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::usage("Please enter a valid carbon footprint value."))
            .and_then(crate::fitness::validate_emission_value);

        match parsed {
            Ok(value) => {
                let verdict = crate::fitness::check_fitness(self.category, value);
                info!(category = %verdict.category, value, is_fit = verdict.is_fit, "assessed vehicle");
                self.status = if verdict.is_fit {
                    "Vehicle meets the target emission levels.".to_string()
                } else {
                    "Vehicle exceeds the target emission levels.".to_string()
                };
                self.verdict = Some(verdict);
            }
            Err(err) => {
                self.verdict = None;
                self.status = err.to_string();
            }
        }
    }

    fn recompute(&mut self) {
        let (Some(&start), Some(&end)) = (self.years.get(self.start_idx), self.years.get(self.end_idx)) else {
            self.run = None;
            return;
        };
        if self.years.len() < 2 {
            self.run = None;
            self.status = "The dataset needs at least two different years of data to compare.".to_string();
            return;
        }
        if let Err(err) = crate::reduction::validate_year_range(start, end) {
            self.run = None;
            self.status = err.to_string();
            return;
        }

        let dataset = match self.cache.get_or_load(&self.config.data_path, &self.config.columns) {
            Ok(ds) => ds,
            Err(err) => {
                self.run = None;
                self.status = err.to_string();
                return;
            }
        };

        match crate::app::pipeline::run_reduction_on(dataset, Some(start), Some(end), BAR_CHART_TOP_N) {
            Ok(run) => {
                self.status = if run.reductions.is_empty() {
                    format!("No data available for both {start} and {end}. Try a different year range.")
                } else {
                    format!("Comparing {start} → {end}: {} countries.", run.reductions.len())
                };
                self.run = Some(run);
            }
            Err(err) => {
                self.run = None;
                self.status = err.to_string();
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(8),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_fitness(frame, chunks[1]);
        if self.show_methodology {
            self.draw_methodology(frame, chunks[2]);
        } else {
            self.draw_data(frame, chunks[2]);
        }
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("co2", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" | {}", crate::report::TITLE)),
            ]),
            Line::from(Span::styled(
                "Check a vehicle against simplified EU CO2 standards (g/km) and explore national reductions.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_fitness(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let (start, end) = self.selected_years();
        let value_label = if self.editing_value {
            format!("{}_", self.value_input)
        } else {
            self.value_input.clone()
        };

        let items = vec![
            ListItem::new(format!("1. Vehicle category: {}", self.category)),
            ListItem::new(format!("2. Carbon footprint: {value_label} g/km")),
            ListItem::new(format!("Start year: {start}")),
            ListItem::new(format!("End year: {end}")),
        ];
        let list = List::new(items)
            .block(Block::default().title("Check Your Vehicle's Fitness").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let block = Block::default().title("Assessment Result").borders(Borders::ALL);
        let body = match &self.verdict {
            Some(verdict) => {
                let color = if verdict.is_fit { Color::Green } else { Color::Red };
                let mut lines = Vec::new();
                for (i, line) in crate::report::format_verdict(verdict).lines().enumerate() {
                    let style = if i == 0 {
                        Style::default().fg(color).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    lines.push(Line::from(Span::styled(line.to_string(), style)));
                }
                Paragraph::new(Text::from(lines))
            }
            None => Paragraph::new("Your assessment result will appear here.")
                .style(Style::default().fg(Color::Gray)),
        };
        frame.render_widget(body.wrap(Wrap { trim: true }).block(block), chunks[1]);
    }

    fn draw_data(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0)])
            .split(chunks[0]);

        self.draw_snapshot(frame, left[0]);
        self.draw_map(frame, left[1]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_snapshot(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("EU Emissions Snapshot").borders(Borders::ALL);
        let text = match &self.snapshot {
            Snapshot::Ready { start_year, end_year, top } => {
                crate::report::format_snapshot(top, *start_year, *end_year)
            }
            Snapshot::Unavailable(message) => message.clone(),
            Snapshot::NotEnoughYears => "Dataset needs more than one year of data to show reductions.".to_string(),
            Snapshot::NoOverlap { start_year, end_year } => {
                format!("Could not calculate reductions between {start_year} and {end_year}.")
            }
        };
        let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(p, area);
    }

    fn draw_map(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (start, end) = self.selected_years();
        let block = Block::default()
            .title(format!("CO2 Emission Reduction ({start} vs {end})"))
            .borders(Borders::ALL);

        let Some(run) = &self.run else {
            let p = Paragraph::new("No reduction data for this range.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(p, area);
            return;
        };

        let mut rows: Vec<_> = run.reductions.iter().collect();
        rows.sort_by(|a, b| a.country.cmp(&b.country));
        let items: Vec<ListItem> = rows
            .into_iter()
            .map(|r| {
                let band = ReductionBand::classify(r.percentage_reduction);
                ListItem::new(Line::from(vec![
                    Span::styled("██ ", Style::default().fg(band_color(band))),
                    Span::raw(format!("{:<24} {:>7.1}%", r.country, r.percentage_reduction)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Top {BAR_CHART_TOP_N} Countries by Emission Reduction"))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let bars: Vec<(String, f64)> = self
            .run
            .as_ref()
            .map(|run| {
                run.ranked
                    .iter()
                    .map(|r| (r.country.clone(), r.percentage_reduction))
                    .collect()
            })
            .unwrap_or_default();

        if bars.is_empty() {
            let msg = Paragraph::new("Add the emissions CSV and pick two years with data to see the chart.")
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true });
            frame.render_widget(msg, inner);
            return;
        }

        let widget = ReductionBarChart {
            bars: &bars,
            y_bounds: ReductionBarChart::bounds_for(&bars),
            y_label: "% reduction",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_methodology(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut text = String::new();
        for m in crate::fitness::all_methodologies() {
            text.push_str(&crate::report::format_methodology(&m));
            text.push('\n');
        }
        text.push_str(&crate::report::format_disclaimer());

        let p = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("How are Carbon Footprints Calculated in the EU?")
                    .borders(Borders::ALL),
            );
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit/assess  a assess  m methodology  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn selected_years(&self) -> (String, String) {
        let fmt = |idx: usize| {
            self.years
                .get(idx)
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        (fmt(self.start_idx), fmt(self.end_idx))
    }
}

/// Move an index by `delta`, clamped to `0..len`.
fn step_index(idx: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if delta >= 0 {
        (idx + delta as usize).min(len - 1)
    } else {
        idx.saturating_sub(delta.unsigned_abs() as usize)
    }
}
