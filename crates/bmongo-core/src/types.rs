//! Core identifier and record types for the bmongo console.

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog operation. The wire representation and the
/// persisted pinned-action entries both use the snake_case form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Gerenciador,
    Inativar,
    Tributacao,
    Mei,
    LimparMov,
    LimparPorData,
    LimparBase,
    NovaBase,
    Registro,
    BuscarId,
    GerarInventario,
    ZerarEstoque,
    ZerarNegativo,
    ZerarPrecos,
    AjustarEmitente,
    ApagarEmitente,
    AlterarChave,
    AlterarSituacao,
    DeuMerda,
    Backup,
    Restore,
    StopServices,
    StartServices,
    KillProcesses,
    RepairOffline,
    RepairOnline,
    LiberarPortas,
    PermitirSeguranca,
}

impl OperationKind {
    pub const ALL: [OperationKind; 28] = [
        OperationKind::Gerenciador,
        OperationKind::Inativar,
        OperationKind::Tributacao,
        OperationKind::Mei,
        OperationKind::LimparMov,
        OperationKind::LimparPorData,
        OperationKind::LimparBase,
        OperationKind::NovaBase,
        OperationKind::Registro,
        OperationKind::BuscarId,
        OperationKind::GerarInventario,
        OperationKind::ZerarEstoque,
        OperationKind::ZerarNegativo,
        OperationKind::ZerarPrecos,
        OperationKind::AjustarEmitente,
        OperationKind::ApagarEmitente,
        OperationKind::AlterarChave,
        OperationKind::AlterarSituacao,
        OperationKind::DeuMerda,
        OperationKind::Backup,
        OperationKind::Restore,
        OperationKind::StopServices,
        OperationKind::StartServices,
        OperationKind::KillProcesses,
        OperationKind::RepairOffline,
        OperationKind::RepairOnline,
        OperationKind::LiberarPortas,
        OperationKind::PermitirSeguranca,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Gerenciador => "gerenciador",
            OperationKind::Inativar => "inativar",
            OperationKind::Tributacao => "tributacao",
            OperationKind::Mei => "mei",
            OperationKind::LimparMov => "limpar_mov",
            OperationKind::LimparPorData => "limpar_por_data",
            OperationKind::LimparBase => "limpar_base",
            OperationKind::NovaBase => "nova_base",
            OperationKind::Registro => "registro",
            OperationKind::BuscarId => "buscar_id",
            OperationKind::GerarInventario => "gerar_inventario",
            OperationKind::ZerarEstoque => "zerar_estoque",
            OperationKind::ZerarNegativo => "zerar_negativo",
            OperationKind::ZerarPrecos => "zerar_precos",
            OperationKind::AjustarEmitente => "ajustar_emitente",
            OperationKind::ApagarEmitente => "apagar_emitente",
            OperationKind::AlterarChave => "alterar_chave",
            OperationKind::AlterarSituacao => "alterar_situacao",
            OperationKind::DeuMerda => "deu_merda",
            OperationKind::Backup => "backup",
            OperationKind::Restore => "restore",
            OperationKind::StopServices => "stop_services",
            OperationKind::StartServices => "start_services",
            OperationKind::KillProcesses => "kill_processes",
            OperationKind::RepairOffline => "repair_offline",
            OperationKind::RepairOnline => "repair_online",
            OperationKind::LiberarPortas => "liberar_portas",
            OperationKind::PermitirSeguranca => "permitir_seguranca",
        }
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        OperationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == trimmed)
            .ok_or_else(|| format!("unknown operation id '{trimmed}'"))
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend-tracked record of a past destructive action that can still be
/// reversed. The backend owns these; the console only caches the list it was
/// last handed, replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoableOperation {
    pub id: String,
    pub label: String,
    pub timestamp: String,
}

/// Issuer (emitente) row used by the delete-issuer picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitenteSummary {
    pub id: String,
    pub name: String,
    pub cnpj: String,
}

#[cfg(test)]
mod tests {
    use super::{EmitenteSummary, OperationKind, UndoableOperation};

    #[test]
    fn operation_kind_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&OperationKind::ZerarEstoque).expect("serialize"),
            "\"zerar_estoque\""
        );
        assert_eq!(
            serde_json::to_string(&OperationKind::LimparPorData).expect("serialize"),
            "\"limpar_por_data\""
        );
    }

    #[test]
    fn as_str_and_from_str_roundtrip_for_all_operations() {
        for kind in OperationKind::ALL {
            let parsed: OperationKind = kind.as_str().parse().expect("parse known id");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn from_str_rejects_unknown_and_reports_the_id() {
        let err = "zerar_tudo".parse::<OperationKind>().expect_err("unknown id");
        assert!(err.contains("zerar_tudo"));
    }

    #[test]
    fn from_str_trims_whitespace() {
        let parsed: OperationKind = " backup ".parse().expect("parse with padding");
        assert_eq!(parsed, OperationKind::Backup);
    }

    #[test]
    fn all_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in OperationKind::ALL {
            assert!(seen.insert(kind.as_str()), "duplicate id {}", kind);
        }
        assert_eq!(seen.len(), 28);
    }

    #[test]
    fn undoable_operation_roundtrips_with_opaque_timestamp() {
        let op = UndoableOperation {
            id: "65f0c1".to_string(),
            label: "Inativar Zerados".to_string(),
            timestamp: "2026-08-07 14:03:11".to_string(),
        };
        let encoded = serde_json::to_string(&op).expect("serialize");
        let decoded: UndoableOperation = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded, op);
    }

    #[test]
    fn emitente_summary_roundtrip() {
        let emitente = EmitenteSummary {
            id: "64aa01".to_string(),
            name: "Mercado Central LTDA".to_string(),
            cnpj: "12.345.678/0001-90".to_string(),
        };
        let encoded = serde_json::to_string(&emitente).expect("serialize");
        let decoded: EmitenteSummary = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded, emitente);
    }
}
