//! Routing tables for catalog operations.
//!
//! Three shapes exist: argument-less operations that go straight to the
//! confirmation gate, operations that collect arguments in a form first
//! (some of which need a backend lookup before the form can open), and the
//! undo panel. Form submissions route back into the same gate-or-execute
//! path as everything else.

use chrono::NaiveDate;

use bmongo_backend::api::OperationRequest;
use bmongo_core::catalog;
use bmongo_core::types::OperationKind;

use crate::event::PrefetchData;
use crate::overlay::{ChoiceItem, FormField, FormOverlay, PendingConfirmation};

/// Operations whose form needs backend lookup data before it can open.
pub fn needs_prefetch(op: OperationKind) -> bool {
    matches!(
        op,
        OperationKind::Gerenciador
            | OperationKind::Tributacao
            | OperationKind::ApagarEmitente
            | OperationKind::AlterarChave
            | OperationKind::AlterarSituacao
    )
}

/// Operations that collect arguments in a form before dispatch.
pub fn has_form(op: OperationKind) -> bool {
    needs_prefetch(op)
        || matches!(
            op,
            OperationKind::LimparPorData
                | OperationKind::GerarInventario
                | OperationKind::BuscarId
                | OperationKind::AjustarEmitente
                | OperationKind::Backup
                | OperationKind::Restore
        )
}

/// Confirmation dialog + request for the argument-less operations. Every
/// backend mutation without a form passes through here; only pure reads
/// skip the gate.
pub fn gated_request(op: OperationKind) -> Option<PendingConfirmation> {
    let (title, description, request) = match op {
        OperationKind::Inativar => (
            "Inativar Produtos Zerados",
            "Inativa produtos com estoque ≤ 0, exceto kits e serviços.",
            OperationRequest::InactivateZeroProducts,
        ),
        OperationKind::Mei => (
            "Habilitar MEI",
            "Ativa configuração de estoque para Microempreendedor Individual.",
            OperationRequest::EnableMei,
        ),
        OperationKind::LimparMov => (
            "Limpar Movimentações",
            "Remove imagens de cartão e tabelas de movimentação pesadas.",
            OperationRequest::CleanMovements,
        ),
        OperationKind::LimparBase => (
            "Limpar Base (Parcial)",
            "Remove coleções mantendo apenas configurações e emitentes.",
            OperationRequest::CleanDatabase,
        ),
        OperationKind::NovaBase => (
            "⚠️ NOVA BASE (ZERO)",
            "ATENÇÃO: Isso DESTRÓI todos os dados! Use apenas para restore limpo.",
            OperationRequest::CreateNewDatabase,
        ),
        OperationKind::Registro => (
            "Limpar Registro Windows",
            "Remove chaves HKCU\\Software\\Digisat do registro.",
            OperationRequest::CleanRegistry,
        ),
        OperationKind::ZerarEstoque => (
            "⚠️ Zerar TODO Estoque",
            "Isso zera quantidade de TODOS os produtos! Tem certeza?",
            OperationRequest::ZeroAllStock,
        ),
        OperationKind::ZerarNegativo => (
            "Zerar Estoque Negativo",
            "Zera apenas estoques com quantidade negativa.",
            OperationRequest::ZeroNegativeStock,
        ),
        OperationKind::ZerarPrecos => (
            "⚠️ Zerar TODOS Preços",
            "Isso zera custo e venda de TODOS os produtos! Tem certeza?",
            OperationRequest::ZeroAllPrices,
        ),
        OperationKind::StopServices => (
            "Parar Serviços Digisat",
            "Isso para todos os serviços Digisat do Windows.",
            OperationRequest::StopServices,
        ),
        OperationKind::StartServices => (
            "Iniciar Serviços Digisat",
            "Isso inicia todos os serviços Digisat do Windows.",
            OperationRequest::StartServices,
        ),
        OperationKind::KillProcesses => (
            "⚠️ Encerrar Processos",
            "Isso força o encerramento de todos os processos Digisat!",
            OperationRequest::KillProcesses,
        ),
        OperationKind::RepairOffline => (
            "⚠️ Reparar MongoDB (Offline)",
            "Isso PARA o serviço MongoDB, executa reparo completo e reinicia. \
             A aplicação pode ficar indisponível por vários minutos.",
            OperationRequest::RepairOffline,
        ),
        OperationKind::RepairOnline => (
            "Reparar MongoDB (Ativo)",
            "Executa comando de reparo com o MongoDB rodando. Mais seguro mas menos efetivo.",
            OperationRequest::RepairOnline,
        ),
        OperationKind::LiberarPortas => (
            "Liberar Portas Firewall",
            "Adiciona regras no Windows Firewall para liberar portas usadas pelo Digisat.",
            OperationRequest::ReleaseFirewallPorts,
        ),
        OperationKind::PermitirSeguranca => (
            "Permitir Segurança",
            "Adiciona exclusões no Windows Defender e configura permissões de pasta.",
            OperationRequest::AllowSecurityExclusions,
        ),
        _ => return None,
    };

    Some(PendingConfirmation {
        title: title.to_string(),
        description: description.to_string(),
        request,
    })
}

/// Dangerous form-collected operations still pass the gate after their form
/// is submitted.
pub fn confirmation_after_form(
    op: OperationKind,
    request: OperationRequest,
) -> Option<PendingConfirmation> {
    if !catalog::is_dangerous(op) {
        return None;
    }
    let (title, description) = match op {
        OperationKind::ApagarEmitente => (
            "⚠️ Excluir Emitente",
            "TEM CERTEZA? Essa ação apaga TUDO (Movimentações, Estoques, Financeiro etc) \
             vinculado a este CNPJ e remove o info.dat do servidor se necessário. É irreversível!",
        ),
        _ => ("⚠️ Confirmar Ação", "Essa ação é irreversível. Tem certeza?"),
    };
    Some(PendingConfirmation {
        title: title.to_string(),
        description: description.to_string(),
        request,
    })
}

pub fn build_form(op: OperationKind, data: &PrefetchData) -> Result<FormOverlay, String> {
    match (op, data) {
        (OperationKind::Gerenciador, PrefetchData::ProductCount { total }) => Ok(FormOverlay::new(
            op,
            format!("Gerenciador Avançado — {total} produtos na base"),
            vec![
                FormField::text("NCM (prefixo, vazio = todos)"),
                FormField::choice(
                    "Ação",
                    vec![ChoiceItem::plain("Inativar"), ChoiceItem::plain("Ativar")],
                ),
            ],
        )),
        (OperationKind::Tributacao, PrefetchData::Tributations { options }) => {
            if options.is_empty() {
                return Err("nenhuma tributação disponível no backend".to_string());
            }
            let choices = options
                .iter()
                .map(|option| ChoiceItem::new(option.id.clone(), option.label.clone()))
                .collect();
            Ok(FormOverlay::new(
                op,
                "Alterar Tributação por NCM",
                vec![
                    FormField::text("NCMs (separados por vírgula)"),
                    FormField::choice("Tributação", choices),
                    FormField::choice(
                        "Esfera",
                        vec![
                            ChoiceItem::plain("Estadual"),
                            ChoiceItem::plain("Federal"),
                        ],
                    ),
                ],
            ))
        }
        (OperationKind::ApagarEmitente, PrefetchData::Emitentes { list }) => {
            if list.is_empty() {
                return Err("nenhum emitente encontrado".to_string());
            }
            let choices = list
                .iter()
                .map(|emitente| {
                    ChoiceItem::new(
                        emitente.id.clone(),
                        format!("{} — {}", emitente.name, emitente.cnpj),
                    )
                })
                .collect();
            Ok(FormOverlay::new(
                op,
                "Apagar Emitente",
                vec![FormField::choice("Emitente", choices)],
            ))
        }
        (OperationKind::AlterarChave, PrefetchData::InvoiceTypes { types }) => {
            if types.is_empty() {
                return Err("nenhum tipo de nota disponível".to_string());
            }
            Ok(FormOverlay::new(
                op,
                "Alterar Chave de Acesso",
                vec![
                    FormField::choice(
                        "Tipo de nota",
                        types.iter().cloned().map(ChoiceItem::plain).collect(),
                    ),
                    FormField::text("Chave atual (44 dígitos)"),
                    FormField::text("Nova chave (44 dígitos)"),
                ],
            ))
        }
        (OperationKind::AlterarSituacao, PrefetchData::InvoiceLookups { types, statuses }) => {
            if types.is_empty() || statuses.is_empty() {
                return Err("tipos ou situações de nota indisponíveis".to_string());
            }
            Ok(FormOverlay::new(
                op,
                "Alterar Situação de NF",
                vec![
                    FormField::choice(
                        "Tipo de nota",
                        types.iter().cloned().map(ChoiceItem::plain).collect(),
                    ),
                    FormField::text("Série"),
                    FormField::text("Número"),
                    FormField::choice(
                        "Nova situação",
                        statuses.iter().cloned().map(ChoiceItem::plain).collect(),
                    ),
                ],
            ))
        }
        (OperationKind::LimparPorData, PrefetchData::None) => Ok(FormOverlay::new(
            op,
            "Limpar por Data",
            vec![FormField::text("Data limite (AAAA-MM-DD)")],
        )),
        (OperationKind::GerarInventario, PrefetchData::None) => Ok(FormOverlay::new(
            op,
            "Gerar Inventário P7",
            vec![
                FormField::text("Data de corte (AAAA-MM-DD)"),
                FormField::text("Valor alvo (R$)"),
                FormField::choice(
                    "Formato",
                    vec![ChoiceItem::new("xlsx", "XLSX"), ChoiceItem::new("csv", "CSV")],
                ),
            ],
        )),
        (OperationKind::BuscarId, PrefetchData::None) => Ok(FormOverlay::new(
            op,
            "Buscar ObjectID",
            vec![FormField::text("ObjectID")],
        )),
        (OperationKind::AjustarEmitente, PrefetchData::None) => Ok(FormOverlay::new(
            op,
            "Alterar Emitente",
            vec![FormField::text("Caminho do info.dat")],
        )),
        (OperationKind::Backup, PrefetchData::None) => Ok(FormOverlay::new(
            op,
            "Fazer Backup",
            vec![FormField::text("Pasta de destino")],
        )),
        (OperationKind::Restore, PrefetchData::None) => Ok(FormOverlay::new(
            op,
            "Restaurar Backup",
            vec![
                FormField::text("Pasta do backup"),
                FormField::choice(
                    "Apagar base atual antes",
                    vec![ChoiceItem::plain("Não"), ChoiceItem::plain("Sim")],
                ),
            ],
        )),
        _ => Err(format!("dados de consulta inesperados para {op}")),
    }
}

pub fn build_request(form: &FormOverlay) -> Result<OperationRequest, String> {
    match form.op {
        OperationKind::Gerenciador => Ok(OperationRequest::BulkActivateByFilter {
            ncm_prefix: field(form, 0)?.trim().to_string(),
            activate: field(form, 1)? == "Ativar",
        }),
        OperationKind::Tributacao => Ok(OperationRequest::ChangeTributationByNcm {
            ncms: split_ncms(&field(form, 0)?)?,
            tributation_id: field(form, 1)?,
            federal: field(form, 2)? == "Federal",
        }),
        OperationKind::ApagarEmitente => Ok(OperationRequest::DeleteEmitente {
            emitente_id: require(&field(form, 0)?, "selecione um emitente")?,
        }),
        OperationKind::AlterarChave => Ok(OperationRequest::ChangeInvoiceKey {
            invoice_type: field(form, 0)?,
            old_key: validate_invoice_key(&field(form, 1)?)?,
            new_key: validate_invoice_key(&field(form, 2)?)?,
        }),
        OperationKind::AlterarSituacao => Ok(OperationRequest::ChangeInvoiceStatus {
            invoice_type: field(form, 0)?,
            serie: require(&field(form, 1)?, "informe a série")?,
            numero: require(&field(form, 2)?, "informe o número")?,
            new_status: field(form, 3)?,
        }),
        OperationKind::LimparPorData => Ok(OperationRequest::CleanDatabaseByDate {
            before_date: parse_date(&field(form, 0)?)?,
        }),
        OperationKind::GerarInventario => Ok(OperationRequest::GenerateInventoryReport {
            cutoff_date: parse_date(&field(form, 0)?)?,
            target_value: parse_target_value(&field(form, 1)?)?,
            format: field(form, 2)?,
        }),
        OperationKind::BuscarId => Ok(OperationRequest::FindObjectId {
            search_id: require(&field(form, 0)?, "informe o ObjectID")?,
        }),
        OperationKind::AjustarEmitente => Ok(OperationRequest::UpdateEmitenteFromFile {
            file_path: require(&field(form, 0)?, "informe o caminho do info.dat")?,
        }),
        OperationKind::Backup => Ok(OperationRequest::BackupDatabase {
            output_dir: require(&field(form, 0)?, "informe a pasta de destino")?,
        }),
        OperationKind::Restore => Ok(OperationRequest::RestoreDatabase {
            backup_path: require(&field(form, 0)?, "informe a pasta do backup")?,
            drop_existing: field(form, 1)? == "Sim",
        }),
        other => Err(format!("{other} não coleta argumentos em formulário")),
    }
}

fn field(form: &FormOverlay, idx: usize) -> Result<String, String> {
    form.fields
        .get(idx)
        .map(|f| f.submitted_value().to_string())
        .ok_or_else(|| "formulário incompleto".to_string())
}

fn require(value: &str, message: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(message.to_string());
    }
    Ok(trimmed.to_string())
}

fn parse_date(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("data inválida '{trimmed}' (use AAAA-MM-DD)"))
}

fn parse_target_value(value: &str) -> Result<f64, String> {
    let normalized = value.trim().replace(',', ".");
    let parsed = normalized
        .parse::<f64>()
        .map_err(|_| format!("valor inválido '{}'", value.trim()))?;
    if parsed <= 0.0 {
        return Err("o valor alvo deve ser maior que zero".to_string());
    }
    Ok(parsed)
}

fn split_ncms(value: &str) -> Result<Vec<String>, String> {
    let ncms: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    if ncms.is_empty() {
        return Err("informe ao menos um NCM".to_string());
    }
    Ok(ncms)
}

fn validate_invoice_key(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.len() != 44 || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return Err("a chave de acesso deve ter 44 dígitos".to_string());
    }
    Ok(trimmed.to_string())
}
