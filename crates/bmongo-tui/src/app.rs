use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use bmongo_core::catalog::{self, OperationDescriptor};
use bmongo_core::pinned::PinnedActions;
use bmongo_core::types::OperationKind;
use bmongo_notify::{DiagnosticLog, ToastCenter};

use crate::action::{map_key_to_command, UiCommand};
use crate::event::{BackendCommand, UiEvent};
use crate::form;
use crate::model::ConsoleState;
use crate::overlay::{Overlay, UndoPanel};

const LOG_SCROLL_STEP: usize = 10;

/// The whole console: screen state, the single active overlay, transient
/// notifications, and the queue of backend work the runtime drains each
/// tick. Key handling and event application are synchronous and pure with
/// respect to the backend, which is what the gate and ordering tests lean
/// on.
#[derive(Debug)]
pub struct ConsoleApp {
    pub state: ConsoleState,
    pub overlay: Overlay,
    pub toasts: ToastCenter,
    pub diagnostics: DiagnosticLog,
    pub pinned: PinnedActions,
    commands: Vec<BackendCommand>,
    pub should_quit: bool,
}

impl ConsoleApp {
    pub fn new(pinned: PinnedActions, log_capacity: usize) -> Self {
        Self {
            state: ConsoleState::new(log_capacity),
            overlay: Overlay::None,
            toasts: ToastCenter::default(),
            diagnostics: DiagnosticLog::default(),
            pinned,
            commands: Vec::new(),
            should_quit: false,
        }
    }

    pub fn drain_commands(&mut self) -> Vec<BackendCommand> {
        std::mem::take(&mut self.commands)
    }

    fn push_command(&mut self, command: BackendCommand) {
        self.commands.push(command);
    }

    pub fn pinned_items(&self) -> Vec<OperationDescriptor> {
        self.pinned.materialize()
    }

    /// Entry point for every catalog action, whether it came from the
    /// sidebar or a pinned shortcut.
    pub fn trigger(&mut self, op: OperationKind) {
        if op == OperationKind::DeuMerda {
            self.push_command(BackendCommand::FetchUndoList);
            self.state.status_line = "carregando operações reversíveis...".to_string();
            return;
        }

        if form::needs_prefetch(op) {
            self.push_command(BackendCommand::Prefetch { target: op });
            let label = catalog::find(op).map(|d| d.label).unwrap_or("operação");
            self.state.status_line = format!("consultando dados para {label}...");
            return;
        }

        if form::has_form(op) {
            match form::build_form(op, &crate::event::PrefetchData::None) {
                Ok(overlay) => {
                    self.overlay = Overlay::Form(overlay);
                    self.state.status_line = "preencha o formulário".to_string();
                }
                Err(message) => self.state.status_line = message,
            }
            return;
        }

        if let Some(pending) = form::gated_request(op) {
            self.state.status_line = format!("confirmação pendente: {}", pending.title);
            // Last-request-wins: whatever overlay was open is replaced.
            self.overlay = Overlay::Confirm(pending);
        }
    }

    /// Resolve the confirmation gate. The title and request are captured
    /// and the dialog closed *before* the dispatch is queued, so a second
    /// confirm during the action's flight finds no overlay and does
    /// nothing.
    pub fn confirm_pending(&mut self) {
        match std::mem::replace(&mut self.overlay, Overlay::None) {
            Overlay::Confirm(pending) => {
                self.state.status_line = format!("executando: {}", pending.title);
                self.push_command(BackendCommand::Execute {
                    title: pending.title,
                    request: pending.request,
                });
            }
            other => self.overlay = other,
        }
    }

    /// Close whatever overlay is open without touching the backend. A
    /// declined confirmation is not an error and leaves no trace beyond the
    /// status line.
    pub fn dismiss_overlay(&mut self) {
        if !self.overlay.is_none() {
            self.overlay = Overlay::None;
            self.state.status_line = "ação cancelada".to_string();
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.handle_overlay_key(key) {
            return;
        }

        let Some(command) = map_key_to_command(key) else {
            return;
        };

        match command {
            UiCommand::Quit => self.should_quit = true,
            UiCommand::SelectNextModule => self.state.move_module_selection_next(),
            UiCommand::SelectPreviousModule => self.state.move_module_selection_previous(),
            UiCommand::SelectNextItem => self.state.move_item_selection_next(),
            UiCommand::SelectPreviousItem => self.state.move_item_selection_previous(),
            UiCommand::ActivateSelection => {
                if let Some(descriptor) = self.state.selected_descriptor() {
                    self.trigger(descriptor.id);
                }
            }
            UiCommand::TriggerPinned(slot) => {
                if let Some(descriptor) = self.pinned_items().get(slot).copied() {
                    self.trigger(descriptor.id);
                }
            }
            UiCommand::TogglePinSelected => self.toggle_pin_selected(),
            UiCommand::OpenUndoPanel => self.trigger(OperationKind::DeuMerda),
            UiCommand::CancelOperation => {
                self.push_command(BackendCommand::Cancel);
                self.state.status_line = "cancelamento solicitado".to_string();
            }
            UiCommand::ClearLogs => {
                self.state.logs.clear();
                self.state.scroll_back = 0;
                self.state.status_line = "log limpo".to_string();
            }
            UiCommand::Reconnect => {
                self.push_command(BackendCommand::Reconnect);
                self.state.status_line = "reconectando ao banco...".to_string();
            }
            UiCommand::ScrollLogsUp => self.state.scroll_up(LOG_SCROLL_STEP),
            UiCommand::ScrollLogsDown => self.state.scroll_down(LOG_SCROLL_STEP),
        }
    }

    /// Overlay-local key handling. Returns true when the key was consumed.
    fn handle_overlay_key(&mut self, key: KeyEvent) -> bool {
        match &mut self.overlay {
            Overlay::None => false,
            Overlay::Confirm(_) => {
                match key.code {
                    KeyCode::Enter | KeyCode::Char('s') => self.confirm_pending(),
                    KeyCode::Esc | KeyCode::Char('n') => self.dismiss_overlay(),
                    _ => {}
                }
                true
            }
            Overlay::Undo(panel) => {
                match key.code {
                    KeyCode::Down => panel.move_selection_next(),
                    KeyCode::Up => panel.move_selection_previous(),
                    KeyCode::Enter => {
                        let target = panel
                            .selected_op()
                            .map(|op| (op.id.clone(), op.label.clone()));
                        if let Some((id, label)) = target {
                            self.push_command(BackendCommand::Undo { id });
                            self.state.status_line = format!("revertendo: {label}...");
                        }
                    }
                    KeyCode::Esc => self.dismiss_overlay(),
                    _ => {}
                }
                true
            }
            Overlay::Form(_) => {
                match key.code {
                    KeyCode::Esc => self.dismiss_overlay(),
                    KeyCode::Enter => self.submit_form(),
                    KeyCode::Tab | KeyCode::Down => {
                        if let Overlay::Form(overlay) = &mut self.overlay {
                            overlay.focus_next();
                        }
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        if let Overlay::Form(overlay) = &mut self.overlay {
                            overlay.focus_previous();
                        }
                    }
                    KeyCode::Left => {
                        if let Overlay::Form(overlay) = &mut self.overlay {
                            if let Some(field) = overlay.focused_field_mut() {
                                field.cycle_previous();
                            }
                        }
                    }
                    KeyCode::Right => {
                        if let Overlay::Form(overlay) = &mut self.overlay {
                            if let Some(field) = overlay.focused_field_mut() {
                                field.cycle_next();
                            }
                        }
                    }
                    KeyCode::Backspace => {
                        if let Overlay::Form(overlay) = &mut self.overlay {
                            if let Some(field) = overlay.focused_field_mut() {
                                field.pop_char();
                            }
                        }
                    }
                    KeyCode::Char(ch) => {
                        if let Overlay::Form(overlay) = &mut self.overlay {
                            if let Some(field) = overlay.focused_field_mut() {
                                field.push_char(ch);
                            }
                        }
                    }
                    _ => {}
                }
                true
            }
        }
    }

    /// Validate and dispatch the open form. Invalid input keeps the form
    /// open with the problem in the status line; dangerous operations
    /// route through the confirmation gate instead of executing directly.
    fn submit_form(&mut self) {
        let Overlay::Form(overlay) = &self.overlay else {
            return;
        };
        match form::build_request(overlay) {
            Ok(request) => {
                let op = overlay.op;
                self.overlay = Overlay::None;
                if let Some(pending) = form::confirmation_after_form(op, request.clone()) {
                    self.state.status_line =
                        format!("confirmação pendente: {}", pending.title);
                    self.overlay = Overlay::Confirm(pending);
                } else {
                    let title = catalog::find(op)
                        .map(|descriptor| descriptor.label.to_string())
                        .unwrap_or_else(|| op.to_string());
                    self.state.status_line = format!("executando: {title}");
                    self.push_command(BackendCommand::Execute { title, request });
                }
            }
            Err(message) => self.state.status_line = message,
        }
    }

    fn toggle_pin_selected(&mut self) {
        let Some(descriptor) = self.state.selected_descriptor() else {
            return;
        };
        match self.pinned.toggle(descriptor.id) {
            Ok(true) => self.state.status_line = format!("fixado: {}", descriptor.label),
            Ok(false) => self.state.status_line = format!("desafixado: {}", descriptor.label),
            Err(err) => {
                self.diagnostics
                    .record("pinned store", err.to_string(), Utc::now());
                self.state.status_line = "falha ao gravar atalhos fixados".to_string();
            }
        }
    }

    pub fn apply_event(&mut self, event: UiEvent, now: DateTime<Utc>) {
        match event {
            UiEvent::LogLine { message } => self.state.logs.append_live(message),
            UiEvent::HistoryLoaded { lines } => self.state.logs.load_history(lines),
            UiEvent::ConnectionChecked { connected } => {
                self.state.connected = connected;
                self.state.status_line = if connected {
                    "conectado ao banco".to_string()
                } else {
                    "sem conexão com o banco".to_string()
                };
            }
            UiEvent::ReconnectFinished { connected, error } => match error {
                Some(message) => {
                    self.diagnostics.record("reconnect", message, now);
                    self.toasts
                        .push_error("❌ Falha ao reconectar ao banco de dados", now);
                }
                None => {
                    self.state.connected = connected;
                    if connected {
                        self.toasts
                            .push_success("✅ Reconectado ao banco com sucesso!", now);
                    }
                }
            },
            UiEvent::OperationSucceeded { title, affected } => {
                self.toasts
                    .push_success(format!("✅ {title} concluído com sucesso!"), now);
                self.state.status_line = match affected {
                    Some(count) => format!("{title}: {count} registros afetados"),
                    None => format!("{title}: concluído"),
                };
            }
            UiEvent::OperationFailed { title, error } => {
                self.diagnostics.record(title.clone(), error.clone(), now);
                self.toasts.push_error(format!("❌ {title} falhou"), now);
                self.state.status_line = format!("{title} falhou: {error}");
            }
            UiEvent::PrefetchReady { target, data } => match form::build_form(target, &data) {
                Ok(overlay) => {
                    self.overlay = Overlay::Form(overlay);
                    self.state.status_line = "preencha o formulário".to_string();
                }
                Err(message) => self.state.status_line = message,
            },
            UiEvent::PrefetchFailed { target, error } => {
                self.diagnostics
                    .record(format!("prefetch {target}"), error, now);
                self.toasts
                    .push_error("❌ Falha ao consultar dados do backend", now);
            }
            UiEvent::UndoListLoaded { ops } => {
                self.state.status_line = if ops.is_empty() {
                    "nenhuma operação reversível no histórico".to_string()
                } else {
                    format!("{} operação(ões) reversível(is)", ops.len())
                };
                self.overlay = Overlay::Undo(UndoPanel::new(ops));
            }
            UiEvent::UndoListFailed { error } => {
                // Fail closed: the panel never opens over a list we don't
                // actually have.
                self.diagnostics.record("undo list", error, now);
                self.toasts
                    .push_error("❌ Falha ao carregar operações reversíveis", now);
            }
            UiEvent::UndoApplied { ops } => {
                if let Overlay::Undo(panel) = &mut self.overlay {
                    if ops.is_empty() {
                        self.overlay = Overlay::None;
                        self.state.status_line =
                            "histórico de reversões vazio".to_string();
                    } else {
                        panel.replace_ops(ops);
                        self.state.status_line = "operação revertida".to_string();
                    }
                }
            }
            UiEvent::UndoFailed { error } => {
                // The panel keeps its previous contents so the operator can
                // retry or close manually.
                self.diagnostics.record("undo", error, now);
                self.toasts
                    .push_error("❌ Falha ao reverter operação", now);
            }
            UiEvent::StatusLine { message } => self.state.status_line = message,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use bmongo_backend::api::OperationRequest;
    use bmongo_core::pinned::PinnedActions;
    use bmongo_core::types::{OperationKind, UndoableOperation};
    use bmongo_notify::ToastKind;

    use super::ConsoleApp;
    use crate::event::{BackendCommand, PrefetchData, UiEvent};
    use crate::overlay::Overlay;

    fn mk_app() -> ConsoleApp {
        let path = std::env::temp_dir().join(format!(
            "bmongo-app-test-{}.json",
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        ConsoleApp::new(PinnedActions::load(path), 1000)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mk_undo(id: &str) -> UndoableOperation {
        UndoableOperation {
            id: id.to_string(),
            label: format!("Operação {id}"),
            timestamp: "2026-08-07 09:00:00".to_string(),
        }
    }

    #[test]
    fn declining_a_confirmation_never_dispatches() {
        let mut app = mk_app();
        app.trigger(OperationKind::ZerarEstoque);
        assert!(matches!(app.overlay, Overlay::Confirm(_)));

        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.overlay.is_none());
        assert!(app.drain_commands().is_empty());
        assert_eq!(app.state.status_line, "ação cancelada");
    }

    #[test]
    fn confirming_dispatches_exactly_once_under_double_confirm() {
        let mut app = mk_app();
        app.trigger(OperationKind::ZerarEstoque);

        // Rapid double-confirm: the gate hides itself before dispatching,
        // so the second Enter lands on no overlay.
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Enter));

        let commands = app.drain_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0],
            BackendCommand::Execute {
                title: "⚠️ Zerar TODO Estoque".to_string(),
                request: OperationRequest::ZeroAllStock,
            }
        );
    }

    #[test]
    fn zero_stock_scenario_ends_in_success_toast_and_log_line() {
        let mut app = mk_app();
        let now = Utc::now();

        app.trigger(OperationKind::ZerarEstoque);
        let Overlay::Confirm(pending) = &app.overlay else {
            panic!("expected confirmation overlay");
        };
        assert_eq!(pending.title, "⚠️ Zerar TODO Estoque");

        app.handle_key_event(key(KeyCode::Enter));
        let commands = app.drain_commands();
        assert!(matches!(
            &commands[0],
            BackendCommand::Execute { request: OperationRequest::ZeroAllStock, .. }
        ));

        app.apply_event(
            UiEvent::OperationSucceeded {
                title: "⚠️ Zerar TODO Estoque".to_string(),
                affected: Some(1532),
            },
            now,
        );
        let toasts = app.toasts.active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert!(toasts[0].message.contains("concluído com sucesso"));
        assert!(app.state.status_line.contains("1532"));

        app.apply_event(
            UiEvent::LogLine {
                message: "✅ 1532 produtos com estoque zerado".to_string(),
            },
            now,
        );
        assert_eq!(
            app.state.logs.lines().last().copied(),
            Some("✅ 1532 produtos com estoque zerado")
        );
    }

    #[test]
    fn a_second_trigger_replaces_the_pending_confirmation() {
        let mut app = mk_app();
        app.trigger(OperationKind::Inativar);
        app.trigger(OperationKind::Mei);

        let Overlay::Confirm(pending) = &app.overlay else {
            panic!("expected confirmation overlay");
        };
        assert_eq!(pending.title, "Habilitar MEI");

        // Confirming runs only the surviving request.
        app.handle_key_event(key(KeyCode::Enter));
        let commands = app.drain_commands();
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            &commands[0],
            BackendCommand::Execute { request: OperationRequest::EnableMei, .. }
        ));
    }

    #[test]
    fn operation_failure_records_a_diagnostic_and_error_toast() {
        let mut app = mk_app();
        let now = Utc::now();
        app.apply_event(
            UiEvent::OperationFailed {
                title: "Limpar Movimentações".to_string(),
                error: "sem conexão".to_string(),
            },
            now,
        );

        assert_eq!(app.diagnostics.len(), 1);
        assert_eq!(app.diagnostics.entries()[0].context, "Limpar Movimentações");
        let toasts = app.toasts.active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
    }

    #[test]
    fn undo_scenario_two_entries_then_empty_auto_closes() {
        let mut app = mk_app();
        let now = Utc::now();

        app.trigger(OperationKind::DeuMerda);
        assert_eq!(app.drain_commands(), vec![BackendCommand::FetchUndoList]);

        app.apply_event(
            UiEvent::UndoListLoaded {
                ops: vec![mk_undo("a"), mk_undo("b")],
            },
            now,
        );
        assert!(matches!(app.overlay, Overlay::Undo(_)));

        // Undo "a": the backend now reports only "b"; panel stays open.
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(
            app.drain_commands(),
            vec![BackendCommand::Undo { id: "a".to_string() }]
        );
        app.apply_event(UiEvent::UndoApplied { ops: vec![mk_undo("b")] }, now);
        let Overlay::Undo(panel) = &app.overlay else {
            panic!("panel should stay open with one entry");
        };
        assert_eq!(panel.ops.len(), 1);
        assert_eq!(panel.ops[0].id, "b");

        // Undo "b": the refreshed list is empty; panel auto-closes.
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(
            app.drain_commands(),
            vec![BackendCommand::Undo { id: "b".to_string() }]
        );
        app.apply_event(UiEvent::UndoApplied { ops: Vec::new() }, now);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn undo_list_fetch_failure_keeps_the_panel_closed() {
        let mut app = mk_app();
        app.trigger(OperationKind::DeuMerda);
        app.drain_commands();

        app.apply_event(
            UiEvent::UndoListFailed {
                error: "timeout".to_string(),
            },
            Utc::now(),
        );
        assert!(app.overlay.is_none());
        assert_eq!(app.diagnostics.len(), 1);
        assert_eq!(app.toasts.active().len(), 1);
    }

    #[test]
    fn undo_failure_keeps_previous_panel_contents() {
        let mut app = mk_app();
        let now = Utc::now();
        app.apply_event(
            UiEvent::UndoListLoaded {
                ops: vec![mk_undo("a"), mk_undo("b")],
            },
            now,
        );

        app.apply_event(
            UiEvent::UndoFailed {
                error: "operação não encontrada".to_string(),
            },
            now,
        );
        let Overlay::Undo(panel) = &app.overlay else {
            panic!("panel should stay open after a failed undo");
        };
        assert_eq!(panel.ops.len(), 2);
        assert_eq!(app.diagnostics.len(), 1);
    }

    #[test]
    fn log_lines_and_history_preserve_receipt_order() {
        let mut app = mk_app();
        let now = Utc::now();

        app.apply_event(UiEvent::LogLine { message: "vivo 1".to_string() }, now);
        app.apply_event(
            UiEvent::HistoryLoaded {
                lines: vec!["hist 1".to_string(), "hist 2".to_string()],
            },
            now,
        );
        app.apply_event(UiEvent::LogLine { message: "vivo 2".to_string() }, now);

        assert_eq!(
            app.state.logs.lines(),
            vec!["hist 1", "hist 2", "vivo 1", "vivo 2"]
        );
    }

    #[test]
    fn prefetch_ready_opens_the_form_and_submit_routes_to_the_gate() {
        let mut app = mk_app();
        let now = Utc::now();

        app.trigger(OperationKind::ApagarEmitente);
        assert_eq!(
            app.drain_commands(),
            vec![BackendCommand::Prefetch {
                target: OperationKind::ApagarEmitente
            }]
        );

        app.apply_event(
            UiEvent::PrefetchReady {
                target: OperationKind::ApagarEmitente,
                data: PrefetchData::Emitentes {
                    list: vec![bmongo_core::types::EmitenteSummary {
                        id: "64aa01".to_string(),
                        name: "Mercado Central LTDA".to_string(),
                        cnpj: "12.345.678/0001-90".to_string(),
                    }],
                },
            },
            now,
        );
        assert!(matches!(app.overlay, Overlay::Form(_)));

        // Submitting a dangerous form lands on the confirmation gate, not
        // on a direct dispatch.
        app.handle_key_event(key(KeyCode::Enter));
        let Overlay::Confirm(pending) = &app.overlay else {
            panic!("expected confirmation gate after dangerous form");
        };
        assert_eq!(pending.title, "⚠️ Excluir Emitente");
        assert!(app.drain_commands().is_empty());

        app.handle_key_event(key(KeyCode::Enter));
        let commands = app.drain_commands();
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            &commands[0],
            BackendCommand::Execute {
                request: OperationRequest::DeleteEmitente { emitente_id }, ..
            } if emitente_id == "64aa01"
        ));
    }

    #[test]
    fn invalid_form_input_keeps_the_form_open_with_the_error() {
        let mut app = mk_app();
        app.trigger(OperationKind::LimparPorData);
        assert!(matches!(app.overlay, Overlay::Form(_)));

        for ch in "31/01".chars() {
            app.handle_key_event(key(KeyCode::Char(ch)));
        }
        app.handle_key_event(key(KeyCode::Enter));

        assert!(matches!(app.overlay, Overlay::Form(_)));
        assert!(app.state.status_line.contains("data inválida"));
        assert!(app.drain_commands().is_empty());
    }

    #[test]
    fn valid_date_form_dispatches_without_a_gate() {
        let mut app = mk_app();
        app.trigger(OperationKind::LimparPorData);
        for ch in "2025-01-31".chars() {
            app.handle_key_event(key(KeyCode::Char(ch)));
        }
        app.handle_key_event(key(KeyCode::Enter));

        assert!(app.overlay.is_none());
        let commands = app.drain_commands();
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            &commands[0],
            BackendCommand::Execute {
                request: OperationRequest::CleanDatabaseByDate { before_date }, ..
            } if before_date == "2025-01-31"
        ));
    }

    #[test]
    fn pinned_digit_triggers_the_materialized_slot() {
        let mut app = mk_app();
        // Default seed slot 2 is "tributacao", which prefetches.
        app.handle_key_event(key(KeyCode::Char('3')));
        assert_eq!(
            app.drain_commands(),
            vec![BackendCommand::Prefetch {
                target: OperationKind::Tributacao
            }]
        );

        // Slot beyond the pinned list does nothing.
        app.handle_key_event(key(KeyCode::Char('9')));
        assert!(app.drain_commands().is_empty());
    }

    #[test]
    fn cancel_clear_and_reconnect_shortcuts_queue_commands() {
        let mut app = mk_app();
        let now = Utc::now();
        app.apply_event(UiEvent::LogLine { message: "linha".to_string() }, now);

        app.handle_key_event(key(KeyCode::Char('x')));
        app.handle_key_event(key(KeyCode::Char('r')));
        assert_eq!(
            app.drain_commands(),
            vec![BackendCommand::Cancel, BackendCommand::Reconnect]
        );

        app.handle_key_event(key(KeyCode::Char('l')));
        assert!(app.state.logs.is_empty());
    }

    #[test]
    fn reconnect_outcome_updates_connection_state_and_toasts() {
        let mut app = mk_app();
        let now = Utc::now();

        app.apply_event(
            UiEvent::ReconnectFinished {
                connected: true,
                error: None,
            },
            now,
        );
        assert!(app.state.connected);
        assert_eq!(app.toasts.active()[0].kind, ToastKind::Success);

        app.toasts.dismiss_all();
        app.apply_event(
            UiEvent::ReconnectFinished {
                connected: false,
                error: Some("refused".to_string()),
            },
            now,
        );
        assert_eq!(app.toasts.active()[0].kind, ToastKind::Error);
        assert_eq!(app.diagnostics.len(), 1);
    }

    #[test]
    fn quit_keys_work_in_normal_mode_but_esc_closes_overlays_first() {
        let mut app = mk_app();
        app.trigger(OperationKind::ZerarPrecos);
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.should_quit);
        assert!(app.overlay.is_none());

        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn pin_toggle_from_the_sidebar_updates_the_store() {
        let mut app = mk_app();
        // Selection starts on "gerenciador", which the seed has pinned.
        app.handle_key_event(key(KeyCode::Char('p')));
        assert!(!app.pinned.contains(OperationKind::Gerenciador));
        assert!(app.state.status_line.starts_with("desafixado"));

        app.handle_key_event(key(KeyCode::Char('p')));
        assert!(app.pinned.contains(OperationKind::Gerenciador));

        let _ = std::fs::remove_file(app.pinned.path());
    }
}
