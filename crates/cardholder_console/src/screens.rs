//! Screen rendering functions for the TUI.

use cardholder_core::forms::FieldSet;
use cardholder_core::models::Customer;
use cardholder_core::validation::ISO_DATE_FORMAT;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

use crate::controllers::{
    CustomerDetailController, CustomerFormController, CustomerListController, DetailState,
};
use crate::editor::{FieldEditor, Section, Slot};

/// Format an amount with two decimals
fn format_amount(n: f64) -> String {
    format!("{n:.2}")
}

/// A rectangle of `percent_x` by `height` centred in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn banner_line(message: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {message} "),
        Style::default().fg(Color::Black).bg(color),
    ))
}

/// Draw the landing screen
pub fn draw_home(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Customer & Credit Card Management",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Manage customers and the credit cards they hold."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("[c]", Style::default().fg(Color::Yellow)),
            Span::raw(" to view customers or "),
            Span::styled("[n]", Style::default().fg(Color::Yellow)),
            Span::raw(" to add one."),
        ]),
    ];

    let home = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Home ").borders(Borders::ALL));
    frame.render_widget(home, area);
}

/// Draw the customer table with its banners
pub fn draw_customer_list(
    frame: &mut Frame,
    area: Rect,
    list: &CustomerListController,
    selected: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let banner = if let Some(message) = list.success_message() {
        banner_line(&message, Color::Green)
    } else if let Some(message) = list.error_message() {
        banner_line(&message, Color::Red)
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(banner), chunks[0]);

    let block = Block::default().title(" Customers ").borders(Borders::ALL);

    if list.is_loading() {
        frame.render_widget(Paragraph::new("Loading customers...").block(block), chunks[1]);
        return;
    }
    if let Some(error) = list.error() {
        let text = Paragraph::new(error)
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(text, chunks[1]);
        return;
    }
    if list.customers().is_empty() {
        frame.render_widget(Paragraph::new("No customers found.").block(block), chunks[1]);
        return;
    }

    let header_cells = ["ID", "First Name", "Last Name", "Email", "Cards"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = list.customers().iter().enumerate().map(|(idx, customer)| {
        let style = if idx == selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(
                customer
                    .customer_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::from(customer.first_name.clone()),
            Cell::from(customer.last_name.clone()),
            Cell::from(customer.email.clone()),
            Cell::from(customer.cards().len().to_string()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Min(24),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, chunks[1]);
}

/// Lines for every field of `form`, with the focused one showing the draft.
///
/// Also returns the index of the focused field's line, if it is in `form`.
fn field_lines(
    form: &dyn FieldSet,
    section: Section,
    slots: &[Slot],
    editor: &FieldEditor,
) -> (Vec<Line<'static>>, Option<usize>) {
    let focused = slots.get(editor.focus()).copied();
    let violations = form.visible_violations();
    let mut lines = Vec::new();
    let mut focus_line = None;

    for &field in form.fields() {
        let is_focused = focused == Some(Slot { section, field });
        let value = if is_focused {
            format!("{}_", editor.draft())
        } else {
            form.text(field.name)
        };
        let label_style = if is_focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        if is_focused {
            focus_line = Some(lines.len());
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<26}", field.label), label_style),
            Span::raw(value),
        ]));

        let input_error = editor
            .input_error()
            .filter(|_| is_focused)
            .map(|v| v.message.clone());
        let messages = input_error.into_iter().chain(
            violations
                .iter()
                .filter(|v| v.field == field.name)
                .map(|v| v.message.clone()),
        );
        for message in messages {
            lines.push(Line::from(Span::styled(
                format!("    {message}"),
                Style::default().fg(Color::Red),
            )));
        }
    }
    (lines, focus_line)
}

/// Draw the creation form: contact fields then one block per card entry
pub fn draw_customer_form(
    frame: &mut Frame,
    area: Rect,
    controller: &CustomerFormController,
    slots: &[Slot],
    editor: &FieldEditor,
) {
    let form = &controller.form;
    let mut lines = Vec::new();

    if let Some(error) = controller.error() {
        lines.push(banner_line(error, Color::Red));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Customer",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let mut focus_line = 0;
    let (details, focused) = field_lines(&form.details, Section::NewCustomer, slots, editor);
    if let Some(offset) = focused {
        focus_line = lines.len() + offset;
    }
    lines.extend(details);

    for (index, card) in form.credit_cards().iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Credit card #{}  [Ctrl-R]Remove", index + 1),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let (entry, focused) = field_lines(card, Section::NewCustomerCard(index), slots, editor);
        if let Some(offset) = focused {
            focus_line = lines.len() + offset;
        }
        lines.extend(entry);
    }

    // Keep the focused field in view on long forms
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = focus_line.saturating_sub(visible.saturating_sub(3)) as u16;

    let paragraph = Paragraph::new(lines)
        .scroll((scroll, 0))
        .block(Block::default().title(" New Customer ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn customer_panel(customer: &Customer) -> Paragraph<'static> {
    let text = vec![
        Line::from(vec![
            Span::raw("Name:  "),
            Span::styled(
                customer.full_name(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![Span::raw("Email: "), Span::raw(customer.email.clone())]),
        Line::from(vec![
            Span::raw("ID:    "),
            Span::raw(
                customer
                    .customer_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            ),
        ]),
    ];
    Paragraph::new(text).block(Block::default().title(" Customer ").borders(Borders::ALL))
}

/// Draw a customer's page: contact panel and card table
pub fn draw_customer_detail(
    frame: &mut Frame,
    area: Rect,
    detail: &CustomerDetailController,
    selected_card: usize,
) {
    let customer = match detail.state() {
        DetailState::Loading => {
            let text = Paragraph::new("Loading customer details...")
                .block(Block::default().title(" Customer ").borders(Borders::ALL));
            frame.render_widget(text, area);
            return;
        }
        DetailState::Error(message) => {
            let text = Paragraph::new(message.clone())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title(" Customer ").borders(Borders::ALL));
            frame.render_widget(text, area);
            return;
        }
        DetailState::Loaded(customer) => customer,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    frame.render_widget(customer_panel(customer), chunks[0]);

    let cards_block = Block::default().title(" Credit Cards ").borders(Borders::ALL);
    if customer.cards().is_empty() {
        let empty = Paragraph::new("No credit cards on file.").block(cards_block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let header_cells = ["ID", "Number", "Expires", "Type", "Limit", "Balance"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = customer.cards().iter().enumerate().map(|(idx, card)| {
        let style = if idx == selected_card {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let balance_color = if card.current_balance > card.credit_limit {
            Color::Red
        } else {
            Color::Green
        };
        Row::new(vec![
            Cell::from(card.card_id.to_string()),
            Cell::from(card.card_number.clone()),
            Cell::from(card.expiration_date.format(ISO_DATE_FORMAT).to_string()),
            Cell::from(card.card_type.as_str()),
            Cell::from(format_amount(card.credit_limit)),
            Cell::from(format_amount(card.current_balance))
                .style(Style::default().fg(balance_color)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(cards_block);
    frame.render_widget(table, chunks[1]);
}

/// Draw a modal form over the current screen
pub fn draw_modal_form(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    form: &dyn FieldSet,
    section: Section,
    slots: &[Slot],
    editor: &FieldEditor,
) {
    let (mut lines, _) = field_lines(form, section, slots, editor);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter]Save [Esc]Close [Tab]Next field",
        Style::default().fg(Color::DarkGray),
    )));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect(70, height, area);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, popup);
}

/// Kind of blocking popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Confirm,
    Alert,
}

/// Draw a confirm or alert popup
pub fn draw_prompt(frame: &mut Frame, area: Rect, kind: PromptKind, message: &str) {
    let (title, hint, color) = match kind {
        PromptKind::Confirm => (" Confirm ", "[y]Yes  [n]No", Color::Yellow),
        PromptKind::Alert => (" Notice ", "Press any key", Color::Cyan),
    };
    let text = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];

    let popup = centered_rect(50, 7, area);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, popup);
}
