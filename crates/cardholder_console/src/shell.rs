//! Route-driven view switching and key dispatch.
//!
//! The shell owns the navigator and the controller for the current route.
//! It never touches the terminal: [`TuiApp`](crate::app::TuiApp) feeds it
//! key events and renders it every frame.

use std::sync::Arc;

use cardholder_client::{CreditCardApi, CustomerApi};
use cardholder_core::forms::FieldSet;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::controllers::{
    ActionOutcome, CustomerDetailController, CustomerFormController, CustomerListController,
};
use crate::dialogs::Dialogs;
use crate::editor::{slots_of, FieldEditor, Section, Slot};
use crate::navigation::{Navigator, Route};
use crate::screens;

const NO_CUSTOMER_SELECTED: &str = "No customer selected";
const NO_CARD_SELECTED: &str = "No credit card selected";
const CUSTOMER_NOT_LOADED: &str = "Customer details are not loaded";

/// Controller behind the current route
pub enum View {
    Home,
    List(CustomerListController),
    Form(CustomerFormController),
    Detail(CustomerDetailController),
}

/// Focusable fields of whatever form is being edited; empty when none is
fn editable_slots(view: &View) -> Vec<Slot> {
    match view {
        View::Form(controller) => {
            let form = &controller.form;
            let mut slots: Vec<Slot> = slots_of(Section::NewCustomer, &form.details).collect();
            for (index, card) in form.credit_cards().iter().enumerate() {
                slots.extend(slots_of(Section::NewCustomerCard(index), card));
            }
            slots
        }
        View::Detail(detail) => match modal_section(detail) {
            Some(section) => section_form(view, section)
                .map(|form| slots_of(section, form).collect())
                .unwrap_or_default(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Modal currently open on the detail view
fn modal_section(detail: &CustomerDetailController) -> Option<Section> {
    if detail.is_edit_customer_open() {
        Some(Section::EditCustomer)
    } else if detail.is_add_card_open() {
        Some(Section::AddCard)
    } else if detail.is_edit_card_open() {
        Some(Section::EditCard)
    } else {
        None
    }
}

fn section_form(view: &View, section: Section) -> Option<&dyn FieldSet> {
    match (view, section) {
        (View::Form(c), Section::NewCustomer) => Some(&c.form.details),
        (View::Form(c), Section::NewCustomerCard(i)) => {
            c.form.credit_cards().get(i).map(|f| f as &dyn FieldSet)
        }
        (View::Detail(c), Section::EditCustomer) => Some(&c.edit_customer_form),
        (View::Detail(c), Section::AddCard) => Some(&c.add_card_form),
        (View::Detail(c), Section::EditCard) => Some(&c.edit_card_form),
        _ => None,
    }
}

fn section_form_mut(view: &mut View, section: Section) -> Option<&mut dyn FieldSet> {
    match (view, section) {
        (View::Form(c), Section::NewCustomer) => Some(&mut c.form.details),
        (View::Form(c), Section::NewCustomerCard(i)) => {
            c.form.credit_card_mut(i).map(|f| f as &mut dyn FieldSet)
        }
        (View::Detail(c), Section::EditCustomer) => Some(&mut c.edit_customer_form),
        (View::Detail(c), Section::AddCard) => Some(&mut c.add_card_form),
        (View::Detail(c), Section::EditCard) => Some(&mut c.edit_card_form),
        _ => None,
    }
}

/// Application state independent of the terminal
pub struct Shell {
    customers_api: Arc<dyn CustomerApi>,
    cards_api: Arc<dyn CreditCardApi>,
    navigator: Navigator,
    view: View,
    /// Route the current view was built for
    view_route: Option<Route>,
    needs_activation: bool,
    /// Highlighted row in the customer or card table
    selected: usize,
    editor: FieldEditor,
    /// Footer hint for a key that had nothing to act on
    notice: Option<&'static str>,
    should_quit: bool,
}

impl Shell {
    pub fn new(
        customers_api: Arc<dyn CustomerApi>,
        cards_api: Arc<dyn CreditCardApi>,
        start: Route,
    ) -> Self {
        Self {
            customers_api,
            cards_api,
            navigator: Navigator::new(start),
            view: View::Home,
            view_route: None,
            needs_activation: false,
            selected: 0,
            editor: FieldEditor::new(),
            notice: None,
            should_quit: false,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True while a form field has focus and keys go to it
    pub fn is_editing(&self) -> bool {
        !editable_slots(&self.view).is_empty()
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// True when the navigator has moved away from the view on screen
    pub fn route_changed(&self) -> bool {
        self.view_route.as_ref() != Some(self.navigator.current())
    }

    /// Build the controller for the current route, not yet activated
    pub fn build_view(&mut self) {
        let route = self.navigator.current().clone();
        tracing::debug!(%route, "building view");

        self.view = match &route {
            Route::Home => View::Home,
            Route::CustomerList => {
                View::List(CustomerListController::new(Arc::clone(&self.customers_api)))
            }
            Route::CustomerForm => {
                View::Form(CustomerFormController::new(Arc::clone(&self.customers_api)))
            }
            Route::CustomerDetail(_) => View::Detail(CustomerDetailController::new(
                Arc::clone(&self.customers_api),
                Arc::clone(&self.cards_api),
            )),
        };
        self.view_route = Some(route);
        self.needs_activation = true;
        self.selected = 0;
        self.editor.reset();
        self.refocus();
    }

    /// Run the new view's initial load
    pub async fn activate_view(&mut self) {
        if !std::mem::take(&mut self.needs_activation) {
            return;
        }
        match (&mut self.view, &self.view_route) {
            (View::List(list), _) => list.activate().await,
            (View::Detail(detail), Some(Route::CustomerDetail(id))) => detail.activate(id).await,
            _ => {}
        }
    }

    /// Build and activate the view for the current route if it changed
    pub async fn sync_route(&mut self) {
        if self.route_changed() {
            self.build_view();
            self.activate_view().await;
        }
    }

    /// Dispatch one key press
    pub async fn handle_key(&mut self, key: KeyEvent, dialogs: &mut dyn Dialogs) {
        self.notice = None;
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let slots = editable_slots(&self.view);
        if !slots.is_empty() {
            self.handle_editing_key(key, &slots, dialogs).await;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('h') => {
                self.navigator.navigate_to(Route::Home);
            }
            KeyCode::Char('c') => {
                self.navigator.navigate_to(Route::CustomerList);
            }
            KeyCode::Char('n') => {
                self.navigator.navigate_to(Route::CustomerForm);
            }
            _ => self.handle_view_key(key.code, dialogs).await,
        }
    }

    async fn handle_view_key(&mut self, code: KeyCode, dialogs: &mut dyn Dialogs) {
        match &mut self.view {
            View::Home => {
                if code == KeyCode::Enter {
                    self.navigator.navigate_to(Route::CustomerList);
                }
            }
            View::List(list) => {
                let count = list.customers().len();
                match code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.selected = self.selected.saturating_sub(1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if self.selected < count.saturating_sub(1) {
                            self.selected += 1;
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(id) = list.customers().get(self.selected).and_then(|c| c.customer_id) {
                            self.navigator.navigate_to(Route::customer(id));
                        }
                    }
                    KeyCode::Char('d') => {
                        if list.delete_at(self.selected, dialogs).await == ActionOutcome::Unavailable {
                            self.notice = Some(NO_CUSTOMER_SELECTED);
                        }
                        self.selected = self.selected.min(list.customers().len().saturating_sub(1));
                    }
                    KeyCode::Char('r') => list.activate().await,
                    _ => {}
                }
            }
            View::Detail(detail) => {
                let count = detail.customer().map_or(0, |c| c.cards().len());
                match code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.selected = self.selected.saturating_sub(1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if self.selected < count.saturating_sub(1) {
                            self.selected += 1;
                        }
                    }
                    KeyCode::Char('e') => {
                        if !detail.open_edit_customer() {
                            self.notice = Some(CUSTOMER_NOT_LOADED);
                        }
                    }
                    KeyCode::Char('a') => {
                        if detail.customer().is_some() {
                            detail.open_add_card();
                        } else {
                            self.notice = Some(CUSTOMER_NOT_LOADED);
                        }
                    }
                    KeyCode::Char('u') | KeyCode::Enter => {
                        if !detail.open_edit_card_at(self.selected) {
                            self.notice = Some(NO_CARD_SELECTED);
                        }
                    }
                    KeyCode::Char('d') => {
                        if detail.delete_card_at(self.selected, dialogs).await == ActionOutcome::Unavailable {
                            self.notice = Some(NO_CARD_SELECTED);
                        }
                        let count = detail.customer().map_or(0, |c| c.cards().len());
                        self.selected = self.selected.min(count.saturating_sub(1));
                    }
                    KeyCode::Esc | KeyCode::Char('b') => {
                        self.navigator.navigate_to(Route::CustomerList);
                    }
                    _ => {}
                }
            }
            View::Form(_) => {}
        }
        // A modal may have opened
        self.editor.reset();
        self.refocus();
    }

    async fn handle_editing_key(&mut self, key: KeyEvent, slots: &[Slot], dialogs: &mut dyn Dialogs) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let focused = slots.get(self.editor.focus()).copied();

        match key.code {
            KeyCode::Tab => {
                let next = self.editor.next_index(slots.len());
                self.focus(next, slots);
            }
            KeyCode::BackTab => {
                let prev = self.editor.prev_index(slots.len());
                self.focus(prev, slots);
            }
            KeyCode::Char('a') if ctrl => {
                if let View::Form(controller) = &mut self.view {
                    controller.add_credit_card();
                }
            }
            KeyCode::Char('r') if ctrl => {
                if let Some(Slot { section: Section::NewCustomerCard(i), .. }) = focused {
                    if let View::Form(controller) = &mut self.view {
                        controller.remove_credit_card(i);
                    }
                    self.refocus();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(slot) = focused {
                    if let Some(form) = section_form_mut(&mut self.view, slot.section) {
                        self.editor.insert(form, slot.field.name, c);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(slot) = focused {
                    if let Some(form) = section_form_mut(&mut self.view, slot.section) {
                        self.editor.backspace(form, slot.field.name);
                    }
                }
            }
            KeyCode::Enter => {
                self.submit(dialogs).await;
                self.refocus();
            }
            KeyCode::Esc => {
                match &mut self.view {
                    View::Form(controller) => controller.cancel(&mut self.navigator),
                    View::Detail(detail) => match modal_section(detail) {
                        Some(Section::EditCustomer) => detail.close_edit_customer(),
                        Some(Section::AddCard) => detail.close_add_card(),
                        Some(Section::EditCard) => detail.close_edit_card(),
                        _ => {}
                    },
                    _ => {}
                }
                self.refocus();
            }
            _ => {}
        }
    }

    async fn submit(&mut self, dialogs: &mut dyn Dialogs) {
        match &mut self.view {
            View::Form(controller) => {
                controller.submit(&mut self.navigator).await;
            }
            View::Detail(detail) => match modal_section(detail) {
                Some(Section::EditCustomer) => {
                    detail.submit_edit_customer(dialogs).await;
                }
                Some(Section::AddCard) => {
                    detail.submit_add_card(dialogs).await;
                }
                Some(Section::EditCard) => {
                    detail.submit_edit_card(dialogs).await;
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn focus(&mut self, index: usize, slots: &[Slot]) {
        let target = slots
            .get(index)
            .and_then(|slot| section_form(&self.view, slot.section).map(|form| (slot, form)));
        match target {
            Some((slot, form)) => self.editor.set_focus(index, form, slot.field.name),
            None => self.editor.reset(),
        }
    }

    /// Re-sync the draft with the form, keeping focus in range
    fn refocus(&mut self) {
        let slots = editable_slots(&self.view);
        let index = self.editor.focus().min(slots.len().saturating_sub(1));
        self.focus(index, &slots);
    }

    /// Draw the whole screen
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Footer
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        let slots = editable_slots(&self.view);
        match &self.view {
            View::Home => screens::draw_home(frame, chunks[1]),
            View::List(list) => screens::draw_customer_list(frame, chunks[1], list, self.selected),
            View::Form(controller) => {
                screens::draw_customer_form(frame, chunks[1], controller, &slots, &self.editor)
            }
            View::Detail(detail) => {
                screens::draw_customer_detail(frame, chunks[1], detail, self.selected);
                if let Some(section) = modal_section(detail) {
                    let title = match section {
                        Section::EditCustomer => "Edit Customer",
                        Section::AddCard => "Add Credit Card",
                        _ => "Edit Credit Card",
                    };
                    if let Some(form) = section_form(&self.view, section) {
                        screens::draw_modal_form(
                            frame,
                            chunks[1],
                            title,
                            form,
                            section,
                            &slots,
                            &self.editor,
                        );
                    }
                }
            }
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let route = self.navigator.current();
        let title = format!(" Cardholder - {}  ({}) ", route.title(), route);
        let header = Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let footer_text = match &self.view {
            View::Home => " [Enter/c]Customers [n]New customer | [q]Quit ",
            View::List(_) => {
                " [Up/Down]Select [Enter]Open [d]Delete [n]New [r]Reload | [h]Home [q]Quit "
            }
            View::Form(_) => {
                " [Tab]Next field [Ctrl-A]Add card [Ctrl-R]Remove card [Enter]Save [Esc]Cancel "
            }
            View::Detail(detail) if modal_section(detail).is_some() => {
                " [Tab]Next field [Enter]Save [Esc]Close "
            }
            View::Detail(_) => {
                " [e]Edit customer [a]Add card [u]Edit card [d]Delete card [Esc]Back | [q]Quit "
            }
        };
        let footer = match self.notice {
            Some(notice) => Paragraph::new(format!(" {notice} |{footer_text}"))
                .style(Style::default().fg(Color::Yellow)),
            None => Paragraph::new(footer_text).style(Style::default().fg(Color::DarkGray)),
        }
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }
}
