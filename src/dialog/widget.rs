//! Modal and non-modal dialog widget
//!
//! The widget owns a private scene tree built once at construction: a root
//! holding a style node and an always-attached wrapper node, with the dialog
//! body (header, content and footer slots) attached and detached as a unit by
//! `show`/`hide`. Modal presentations additionally insert a backdrop node as
//! a sibling immediately before the wrapper so it paints beneath the body.
//!
//! Callers that need a decision can `wait()` for a [`Confirmation`] future,
//! settled by the success/failure actions wired to the built-in confirm and
//! cancel buttons. Hiding the dialog never settles an outstanding wait, and
//! a second `wait()` call silently orphans the first future; see
//! [`super::confirm`] for the contract.

use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tokio::sync::mpsc;
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

use super::confirm::{Confirmation, ConfirmationSlot};
use super::types::{DialogConfig, DialogEvent, DialogLayout, DialogObserver, DialogResult};
use crate::component::{Component, ComponentState};
use crate::events::Event;
use crate::scene::{NodeId, SceneTree, StyleSheet};
use crate::theme::Theme;
use crate::Frame;

/// A dialog widget with show/hide visibility and an awaitable confirmation
pub struct DialogWidget {
    /// Component state
    state: ComponentState,

    /// Dialog configuration
    config: DialogConfig,

    /// The widget's private render scope
    scene: SceneTree,

    /// Node handles into the scene, fixed for the widget's lifetime
    style_node: NodeId,
    wrapper: NodeId,
    backdrop: NodeId,
    body: NodeId,
    header: NodeId,
    content: NodeId,
    footer: NodeId,

    /// Pending confirmation slot
    confirmation: ConfirmationSlot,

    /// Registered notification observers
    observers: Vec<Box<dyn DialogObserver>>,

    /// Optional event channel for forwarding notifications
    event_sender: Option<mpsc::UnboundedSender<Event>>,

    /// Currently selected action button (true = confirm)
    selected_confirm: bool,

    /// Button labels
    confirm_label: String,
    cancel_label: String,

    /// Layout of the last render, if the dialog was visible
    layout: Option<DialogLayout>,
}

impl DialogWidget {
    /// Create a new dialog widget
    ///
    /// The node tree is built eagerly here and never rebuilt; `show`/`hide`
    /// only toggle membership of the backdrop and body nodes.
    pub fn new(config: DialogConfig) -> DialogResult<Self> {
        config.validate()?;

        let scope = config
            .class
            .clone()
            .unwrap_or_else(|| config.id.to_string());
        let mut scene = SceneTree::new(scope);
        let root = scene.root();

        let style_node = scene.create_node("styles");
        scene.set_style_sheet(style_node, StyleSheet::from_theme(&Theme::default()));
        let wrapper = scene.create_node("wrapper");
        scene.attach(root, style_node);
        scene.attach(root, wrapper);

        let backdrop = scene.create_node("backdrop");
        let body = scene.create_node("body");
        let header = scene.create_node("header");
        let content = scene.create_node("content");
        let footer = scene.create_node("footer");
        scene.attach(body, header);
        scene.attach(body, content);
        scene.attach(body, footer);

        Ok(Self {
            state: ComponentState::new(),
            config,
            scene,
            style_node,
            wrapper,
            backdrop,
            body,
            header,
            content,
            footer,
            confirmation: ConfirmationSlot::default(),
            observers: Vec::new(),
            event_sender: None,
            selected_confirm: false, // Default to cancel for safety
            confirm_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
            layout: None,
        })
    }

    /// Create a modal confirmation dialog with a question as its content
    pub fn confirm(
        id: impl Into<super::types::DialogId>,
        title: impl Into<String>,
        question: impl Into<String>,
    ) -> DialogResult<Self> {
        let config = DialogConfig::new(id).with_title(title).modal(true);
        let mut dialog = Self::new(config)?;
        dialog.set_content(vec![question.into()]);
        Ok(dialog)
    }

    /// The dialog configuration
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Read-only view of the widget's render scope
    pub fn scene(&self) -> &SceneTree {
        &self.scene
    }

    /// Handle to the dialog body node
    pub fn body_node(&self) -> NodeId {
        self.body
    }

    /// Handle to the backdrop (modal) slot node
    pub fn backdrop_node(&self) -> NodeId {
        self.backdrop
    }

    /// Handle to the header slot node
    pub fn header_node(&self) -> NodeId {
        self.header
    }

    /// Handle to the content slot node
    pub fn content_node(&self) -> NodeId {
        self.content
    }

    /// Handle to the footer slot node
    pub fn footer_node(&self) -> NodeId {
        self.footer
    }

    /// Replace the header slot content
    pub fn set_header(&mut self, text: impl Into<String>) {
        self.scene.set_lines(self.header, vec![text.into()]);
    }

    /// Replace the content slot lines
    pub fn set_content(&mut self, lines: Vec<String>) {
        self.scene.set_lines(self.content, lines);
    }

    /// Replace the footer slot content
    ///
    /// While the footer slot is empty the widget renders its built-in
    /// confirm/cancel button row there instead.
    pub fn set_footer(&mut self, text: impl Into<String>) {
        self.scene.set_lines(self.footer, vec![text.into()]);
    }

    /// Set custom labels for the built-in action buttons
    pub fn set_button_labels(
        &mut self,
        confirm_label: impl Into<String>,
        cancel_label: impl Into<String>,
    ) {
        self.confirm_label = confirm_label.into();
        self.cancel_label = cancel_label.into();
    }

    /// Register a notification observer
    pub fn add_observer(&mut self, observer: Box<dyn DialogObserver>) {
        self.observers.push(observer);
    }

    /// Set the event sender notifications are forwarded to
    pub fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<Event>) {
        self.event_sender = Some(sender);
    }

    /// Whether the dialog body is currently attached to the render tree
    pub fn visible(&self) -> bool {
        self.scene.is_attached(self.body)
    }

    /// The currently selected action button (true = confirm)
    pub fn selected_confirm(&self) -> bool {
        self.selected_confirm
    }

    /// Layout of the last render, if the dialog was visible then
    pub fn last_layout(&self) -> Option<&DialogLayout> {
        self.layout.as_ref()
    }

    /// Show the dialog, using the configured modality
    ///
    /// Idempotent: showing an already visible dialog reorders its nodes to
    /// the same positions and emits another show notification.
    pub fn show(&mut self) {
        self.show_with(false);
    }

    /// Show the dialog modally regardless of the configured modality
    pub fn show_modal(&mut self) {
        self.show_with(true);
    }

    fn show_with(&mut self, force_modal: bool) {
        let modal = force_modal || self.config.modal;
        if modal {
            // Insertion moves an already attached backdrop, never duplicates
            self.scene.insert_before(self.wrapper, self.backdrop);
        }
        self.scene.attach(self.wrapper, self.body);
        debug!(id = %self.config.id, modal, "dialog shown");
        self.notify(DialogEvent::Show {
            id: self.config.id.clone(),
            modal,
        });
    }

    /// Hide the dialog
    ///
    /// Removes the backdrop and body unconditionally; hiding an already
    /// hidden dialog is a defined no-op on the tree, though a hide
    /// notification is still emitted for the call. An outstanding `wait()`
    /// is NOT settled by hiding.
    pub fn hide(&mut self) {
        self.scene.detach(self.backdrop);
        self.scene.detach(self.body);
        debug!(id = %self.config.id, "dialog hidden");
        self.notify(DialogEvent::Hide {
            id: self.config.id.clone(),
        });
    }

    /// Wait for the user's confirmation decision
    ///
    /// Returns a future resolving to `true` on success and `false` on
    /// failure. Calling `wait()` again before the previous future settled
    /// silently orphans that future; only the most recent waiter is honored.
    pub fn wait(&mut self) -> Confirmation {
        self.confirmation.arm()
    }

    /// Settle a pending confirmation with an accepting result
    ///
    /// Silent no-op when no confirmation is pending; the success
    /// notification is only emitted when a waiter was settled.
    pub fn success(&mut self) {
        if self.confirmation.settle(true) {
            debug!(id = %self.config.id, "confirmation accepted");
            self.notify(DialogEvent::Success {
                id: self.config.id.clone(),
            });
        }
    }

    /// Settle a pending confirmation with a rejecting result
    pub fn failure(&mut self) {
        if self.confirmation.settle(false) {
            debug!(id = %self.config.id, "confirmation rejected");
            self.notify(DialogEvent::Failure {
                id: self.config.id.clone(),
            });
        }
    }

    /// Emit a notification to observers and the event channel
    ///
    /// Called strictly after the corresponding tree mutation, so observers
    /// always see the completed state.
    fn notify(&mut self, event: DialogEvent) {
        for observer in &mut self.observers {
            observer.on_dialog_event(&event, &self.scene);
        }
        if let Some(sender) = &self.event_sender {
            let _ = sender.send(Event::Dialog(event));
        }
    }

    /// Natural size of the slot content, without the border
    fn content_size(&self) -> (u16, u16) {
        let mut width = self
            .config
            .title
            .as_deref()
            .map(|title| title.width())
            .unwrap_or(0);
        let mut rows = 0usize;
        for node in [self.header, self.content, self.footer] {
            for line in self.scene.lines(node) {
                width = width.max(line.width());
                rows += 1;
            }
        }
        if self.scene.lines(self.footer).is_empty() {
            // Built-in button row: "[ confirm ]  [ cancel ]"
            width = width.max(self.confirm_label.width() + self.cancel_label.width() + 10);
            rows += 1;
        }
        ((width as u16).saturating_add(4), (rows as u16).saturating_add(1))
    }

    /// Render the built-in confirm/cancel button row
    fn render_buttons(&self, frame: &mut Frame, area: Rect, sheet: &StyleSheet) {
        let confirm_style = if self.selected_confirm {
            sheet.button_selected
        } else {
            sheet.button
        };
        let cancel_style = if self.selected_confirm {
            sheet.button
        } else {
            sheet.button_selected
        };

        let row = Line::from(vec![
            Span::styled(format!("[ {} ]", self.confirm_label), confirm_style),
            Span::raw("  "),
            Span::styled(format!("[ {} ]", self.cancel_label), cancel_style),
        ]);
        frame.render_widget(Paragraph::new(row).alignment(Alignment::Center), area);
    }

    /// Activate the selected action button
    fn activate_selection(&mut self) {
        if self.selected_confirm {
            self.success();
        } else {
            self.failure();
        }
    }
}

#[async_trait]
impl Component for DialogWidget {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if !self.visible() {
            return Ok(());
        }

        match (event.code, event.modifiers) {
            // Navigation between buttons
            (KeyCode::Left | KeyCode::Right | KeyCode::Tab, _) => {
                self.selected_confirm = !self.selected_confirm;
            }

            // Confirm selection
            (KeyCode::Enter | KeyCode::Char(' '), _) => {
                self.activate_selection();
            }

            // Direct confirm/cancel shortcuts
            (KeyCode::Char('y') | KeyCode::Char('Y'), _) => {
                self.success();
            }

            (KeyCode::Char('n') | KeyCode::Char('N'), _) => {
                self.failure();
            }

            // Dismiss without settling a pending confirmation
            (KeyCode::Esc, _) => {
                if self.config.closable {
                    self.hide();
                }
            }

            _ => {}
        }

        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            if !self.visible() {
                return Ok(());
            }
            let target = self.scene.hit_test(event.column, event.row);
            trace!(
                ?target,
                column = event.column,
                row = event.row,
                "dialog pointer activation"
            );
            // A click on the empty overlay area resolves to the body node
            // itself; clicks inside the panel resolve to a slot node.
            if self.config.can_ignore && target == Some(self.body) {
                self.hide();
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.state.size = area;
        // Refresh the scoped styles from the active theme
        self.scene
            .set_style_sheet(self.style_node, StyleSheet::from_theme(theme));
        self.scene.set_area(self.wrapper, area);

        if !self.visible() {
            self.layout = None;
            return;
        }

        let sheet = self
            .scene
            .style_sheet(self.style_node)
            .cloned()
            .unwrap_or_default();

        if self.scene.is_attached(self.backdrop) {
            self.scene.set_area(self.backdrop, area);
            frame.render_widget(Clear, area);
            frame.render_widget(Block::default().style(sheet.backdrop), area);
        }

        let layout = DialogLayout::calculate(&self.config, area, Some(self.content_size()));
        let dialog_area = layout.dialog_area;
        let content_area = layout.content_area;

        frame.render_widget(Clear, dialog_area);
        let mut block = Block::default()
            .borders(if self.config.has_border {
                Borders::ALL
            } else {
                Borders::NONE
            })
            .border_style(sheet.chrome_border);
        if let Some(title) = &self.config.title {
            block = block.title(title.clone());
        }
        frame.render_widget(block, dialog_area);

        let header_lines = self.scene.lines(self.header).to_vec();
        let content_lines = self.scene.lines(self.content).to_vec();
        let footer_lines = self.scene.lines(self.footer).to_vec();

        let header_rows = (header_lines.len() as u16).min(content_area.height);
        let footer_natural = if footer_lines.is_empty() {
            1 // Built-in button row
        } else {
            footer_lines.len() as u16
        };
        let footer_rows = footer_natural.min(content_area.height.saturating_sub(header_rows));

        let header_paint = Rect {
            x: content_area.x,
            y: content_area.y,
            width: content_area.width,
            height: header_rows,
        };
        let footer_paint = Rect {
            x: content_area.x,
            y: content_area.y + content_area.height.saturating_sub(footer_rows),
            width: content_area.width,
            height: footer_rows,
        };
        let content_paint = Rect {
            x: content_area.x,
            y: content_area.y + header_rows,
            width: content_area.width,
            height: content_area
                .height
                .saturating_sub(header_rows)
                .saturating_sub(footer_rows),
        };

        if header_paint.height > 0 {
            let header = Paragraph::new(header_lines.join("\n"))
                .style(sheet.chrome_title)
                .alignment(Alignment::Center);
            frame.render_widget(header, header_paint);
        }
        if content_paint.height > 0 && !content_lines.is_empty() {
            let content = Paragraph::new(content_lines.join("\n"))
                .style(sheet.slot_text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(content, content_paint);
        }
        if footer_paint.height > 0 {
            if footer_lines.is_empty() {
                self.render_buttons(frame, footer_paint, &sheet);
            } else {
                let footer = Paragraph::new(footer_lines.join("\n"))
                    .style(sheet.slot_text)
                    .alignment(Alignment::Center);
                frame.render_widget(footer, footer_paint);
            }
        }

        // Hit bands partition the panel by rows, border included, so any
        // click inside the panel resolves to a slot rather than the body.
        let dialog_bottom = dialog_area.y + dialog_area.height;
        let header_band = Rect {
            x: dialog_area.x,
            y: dialog_area.y,
            width: dialog_area.width,
            height: (header_paint.y + header_paint.height).saturating_sub(dialog_area.y),
        };
        let footer_band = Rect {
            x: dialog_area.x,
            y: footer_paint.y,
            width: dialog_area.width,
            height: dialog_bottom.saturating_sub(footer_paint.y),
        };
        let content_band = Rect {
            x: dialog_area.x,
            y: header_band.y + header_band.height,
            width: dialog_area.width,
            height: footer_band.y.saturating_sub(header_band.y + header_band.height),
        };

        self.scene.set_area(self.body, area);
        self.scene.set_area(self.header, header_band);
        self.scene.set_area(self.content, content_band);
        self.scene.set_area(self.footer, footer_band);
        self.layout = Some(layout);
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }

    fn has_focus(&self) -> bool {
        self.state.has_focus
    }

    fn set_focus(&mut self, focus: bool) {
        self.state.has_focus = focus;
    }

    fn is_visible(&self) -> bool {
        self.visible()
    }

    fn set_visible(&mut self, visible: bool) {
        if visible {
            self.show();
        } else {
            self.hide();
        }
    }
}
