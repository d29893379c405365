//! The single "which overlay is open" state.
//!
//! Modal visibility is one discriminated value instead of a flag per modal,
//! so two overlays being open at once is unrepresentable, and requesting a
//! new overlay always replaces the previous one (last-request-wins).

use serde::{Deserialize, Serialize};

use bmongo_backend::api::OperationRequest;
use bmongo_core::types::{OperationKind, UndoableOperation};

/// A deferred destructive action awaiting operator confirmation. The action
/// is a tagged request, not a closure: it can be logged, serialized and
/// asserted on, and is resolved by the dispatcher only after confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub title: String,
    pub description: String,
    pub request: OperationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoPanel {
    pub ops: Vec<UndoableOperation>,
    pub selected: usize,
}

impl UndoPanel {
    pub fn new(ops: Vec<UndoableOperation>) -> Self {
        Self { ops, selected: 0 }
    }

    pub fn selected_op(&self) -> Option<&UndoableOperation> {
        self.ops.get(self.selected)
    }

    /// Replace the list wholesale with the backend's refreshed view; the
    /// entries are never merged or spliced locally.
    pub fn replace_ops(&mut self, ops: Vec<UndoableOperation>) {
        self.ops = ops;
        if self.selected >= self.ops.len() {
            self.selected = self.ops.len().saturating_sub(1);
        }
    }

    pub fn move_selection_next(&mut self) {
        if self.ops.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.ops.len();
    }

    pub fn move_selection_previous(&mut self) {
        if self.ops.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.ops.len() - 1
        } else {
            self.selected - 1
        };
    }
}

/// One selectable option in a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceItem {
    pub id: String,
    pub label: String,
}

impl ChoiceItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            id: value.clone(),
            label: value,
        }
    }
}

/// A single form input: free text when `choices` is empty, otherwise a value
/// cycled through the fixed choice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub choices: Vec<ChoiceItem>,
    pub choice_idx: usize,
}

impl FormField {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            choices: Vec::new(),
            choice_idx: 0,
        }
    }

    pub fn choice(label: impl Into<String>, choices: Vec<ChoiceItem>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            choices,
            choice_idx: 0,
        }
    }

    pub fn is_choice(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn current_choice(&self) -> Option<&ChoiceItem> {
        self.choices.get(self.choice_idx)
    }

    /// What the operator sees for this field.
    pub fn display_value(&self) -> &str {
        match self.current_choice() {
            Some(choice) => choice.label.as_str(),
            None => self.value.as_str(),
        }
    }

    /// What the built request receives for this field.
    pub fn submitted_value(&self) -> &str {
        match self.current_choice() {
            Some(choice) => choice.id.as_str(),
            None => self.value.as_str(),
        }
    }

    pub fn cycle_next(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        self.choice_idx = (self.choice_idx + 1) % self.choices.len();
    }

    pub fn cycle_previous(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        self.choice_idx = if self.choice_idx == 0 {
            self.choices.len() - 1
        } else {
            self.choice_idx - 1
        };
    }

    pub fn push_char(&mut self, ch: char) {
        if self.is_choice() {
            return;
        }
        self.value.push(ch);
    }

    pub fn pop_char(&mut self) {
        if self.is_choice() {
            return;
        }
        self.value.pop();
    }
}

/// Argument-collecting overlay for operations that need input before they
/// can be dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOverlay {
    pub op: OperationKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl FormOverlay {
    pub fn new(op: OperationKind, title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            op,
            title: title.into(),
            fields,
            focus: 0,
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_previous(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "overlay", rename_all = "snake_case")]
pub enum Overlay {
    None,
    Confirm(PendingConfirmation),
    Undo(UndoPanel),
    Form(FormOverlay),
}

impl Overlay {
    pub fn is_none(&self) -> bool {
        matches!(self, Overlay::None)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChoiceItem, FormField, FormOverlay, Overlay, PendingConfirmation, UndoPanel};
    use bmongo_backend::api::OperationRequest;
    use bmongo_core::types::{OperationKind, UndoableOperation};

    fn mk_op(id: &str) -> UndoableOperation {
        UndoableOperation {
            id: id.to_string(),
            label: format!("Operação {id}"),
            timestamp: "2026-08-07 09:00:00".to_string(),
        }
    }

    #[test]
    fn undo_panel_selection_wraps() {
        let mut panel = UndoPanel::new(vec![mk_op("a"), mk_op("b")]);
        assert_eq!(panel.selected_op().map(|op| op.id.as_str()), Some("a"));

        panel.move_selection_previous();
        assert_eq!(panel.selected, 1);
        panel.move_selection_next();
        assert_eq!(panel.selected, 0);
    }

    #[test]
    fn replace_ops_clamps_the_selection() {
        let mut panel = UndoPanel::new(vec![mk_op("a"), mk_op("b"), mk_op("c")]);
        panel.selected = 2;
        panel.replace_ops(vec![mk_op("b")]);
        assert_eq!(panel.selected, 0);
        assert_eq!(panel.selected_op().map(|op| op.id.as_str()), Some("b"));

        panel.replace_ops(Vec::new());
        assert_eq!(panel.selected, 0);
        assert!(panel.selected_op().is_none());
    }

    #[test]
    fn text_field_edits_and_ignores_cycling() {
        let mut field = FormField::text("ObjectID");
        field.push_char('6');
        field.push_char('5');
        field.cycle_next();
        assert_eq!(field.display_value(), "65");
        field.pop_char();
        assert_eq!(field.submitted_value(), "6");
    }

    #[test]
    fn choice_field_cycles_and_submits_the_id() {
        let mut field = FormField::choice(
            "Formato",
            vec![
                ChoiceItem::new("xlsx", "XLSX"),
                ChoiceItem::new("csv", "CSV"),
            ],
        );
        assert_eq!(field.display_value(), "XLSX");
        assert_eq!(field.submitted_value(), "xlsx");

        field.cycle_next();
        assert_eq!(field.submitted_value(), "csv");
        field.cycle_next();
        assert_eq!(field.submitted_value(), "xlsx");
        field.cycle_previous();
        assert_eq!(field.submitted_value(), "csv");

        // Typing into a choice field does nothing.
        field.push_char('x');
        assert_eq!(field.display_value(), "CSV");
    }

    #[test]
    fn form_focus_wraps_in_both_directions() {
        let mut form = FormOverlay::new(
            OperationKind::AlterarChave,
            "Alterar Chave",
            vec![
                FormField::text("Chave atual"),
                FormField::text("Nova chave"),
            ],
        );
        form.focus_previous();
        assert_eq!(form.focus, 1);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn overlay_serializes_with_its_tag_and_pending_request() {
        let overlay = Overlay::Confirm(PendingConfirmation {
            title: "⚠️ Zerar TODO Estoque".to_string(),
            description: "Isso zera quantidade de TODOS os produtos! Tem certeza?".to_string(),
            request: OperationRequest::ZeroAllStock,
        });

        let value = serde_json::to_value(&overlay).expect("serialize");
        assert_eq!(value["overlay"], "confirm");
        assert_eq!(value["request"]["op"], "zero_all_stock");

        let decoded: Overlay = serde_json::from_value(value).expect("deserialize");
        assert_eq!(decoded, overlay);
        assert!(!decoded.is_none());
        assert!(Overlay::None.is_none());
    }
}
