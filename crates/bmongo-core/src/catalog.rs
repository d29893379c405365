//! Static catalog of maintenance operations, grouped into named modules.
//!
//! The catalog is the single source of truth for which operation identifiers
//! are valid. Downstream consumers treat identifiers that are not present
//! here as dead and skip them instead of erroring.

use crate::types::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub id: OperationKind,
    pub label: &'static str,
    pub description: &'static str,
    pub dangerous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionModule {
    pub name: &'static str,
    pub items: Vec<OperationDescriptor>,
}

const fn op(
    id: OperationKind,
    label: &'static str,
    description: &'static str,
) -> OperationDescriptor {
    OperationDescriptor {
        id,
        label,
        description,
        dangerous: false,
    }
}

const fn danger(
    id: OperationKind,
    label: &'static str,
    description: &'static str,
) -> OperationDescriptor {
    OperationDescriptor {
        id,
        label,
        description,
        dangerous: true,
    }
}

/// Ordered module list shown in the sidebar. Pure and infallible.
pub fn modules() -> Vec<ActionModule> {
    vec![
        ActionModule {
            name: "📦 Produtos",
            items: vec![
                op(
                    OperationKind::Gerenciador,
                    "Gerenciador Avançado",
                    "Filtra e gerencia produtos em lote",
                ),
                op(
                    OperationKind::Inativar,
                    "Inativar Zerados",
                    "Inativa produtos com estoque zerado ou negativo",
                ),
                op(
                    OperationKind::Tributacao,
                    "Alterar Tributação",
                    "Altera tributação por NCM (Estadual/Federal)",
                ),
                op(
                    OperationKind::Mei,
                    "Habilitar MEI",
                    "Ativa controle de estoque para MEI",
                ),
            ],
        },
        ActionModule {
            name: "🗄️ Base de Dados",
            items: vec![
                op(
                    OperationKind::LimparMov,
                    "Limpar Movimentações",
                    "Remove imagens de cartão e movimentações",
                ),
                op(
                    OperationKind::LimparPorData,
                    "Limpar por Data",
                    "Remove movimentações antes de uma data",
                ),
                op(
                    OperationKind::LimparBase,
                    "Limpar Base (Parcial)",
                    "Mantém config e emitentes",
                ),
                danger(
                    OperationKind::NovaBase,
                    "Nova Base (Zero)",
                    "⚠️ DESTRÓI TUDO - use com cuidado!",
                ),
            ],
        },
        ActionModule {
            name: "⚙️ Sistema",
            items: vec![
                op(
                    OperationKind::Registro,
                    "Limpar Registro Win",
                    "Remove chaves do Digisat no registro",
                ),
                op(
                    OperationKind::BuscarId,
                    "Buscar ObjectID",
                    "Procura ID em todas as coleções",
                ),
            ],
        },
        ActionModule {
            name: "📈 Estoque / Preços",
            items: vec![
                op(
                    OperationKind::GerarInventario,
                    "Gerar Inventário",
                    "Gera relatório P7 em XLSX/CSV com valor alvo",
                ),
                danger(
                    OperationKind::ZerarEstoque,
                    "Zerar TODO Estoque",
                    "Zera quantidade de todos os produtos",
                ),
                op(
                    OperationKind::ZerarNegativo,
                    "Zerar Estoque Negativo",
                    "Zera apenas estoques negativos",
                ),
                danger(
                    OperationKind::ZerarPrecos,
                    "Zerar Todos Preços",
                    "Zera custo e venda de todos produtos",
                ),
            ],
        },
        ActionModule {
            name: "👤 Emitente",
            items: vec![
                op(
                    OperationKind::AjustarEmitente,
                    "Alterar Emitente",
                    "Altera dados do emitente via info.dat",
                ),
                danger(
                    OperationKind::ApagarEmitente,
                    "Apagar Emitente",
                    "Remove emitente e dados associados",
                ),
            ],
        },
        ActionModule {
            name: "📄 Notas Fiscais",
            items: vec![
                op(
                    OperationKind::AlterarChave,
                    "Alterar Chave",
                    "Corrige chave de acesso de NF",
                ),
                op(
                    OperationKind::AlterarSituacao,
                    "Alterar Situação",
                    "Define situação de NF manualmente",
                ),
            ],
        },
        ActionModule {
            name: "🆘 Emergência",
            items: vec![danger(
                OperationKind::DeuMerda,
                "Deu Merda!",
                "Reverter operações recentes",
            )],
        },
        ActionModule {
            name: "💾 Backup / Restore",
            items: vec![
                op(
                    OperationKind::Backup,
                    "Fazer Backup",
                    "Cria backup do banco de dados",
                ),
                op(
                    OperationKind::Restore,
                    "Restaurar Backup",
                    "Restaura de uma pasta de backup",
                ),
            ],
        },
        ActionModule {
            name: "🖥️ Serviços Windows",
            items: vec![
                op(
                    OperationKind::StopServices,
                    "Parar Serviços",
                    "Para todos os serviços Digisat",
                ),
                op(
                    OperationKind::StartServices,
                    "Iniciar Serviços",
                    "Inicia todos os serviços Digisat",
                ),
                danger(
                    OperationKind::KillProcesses,
                    "Encerrar Processos",
                    "Força encerramento de processos Digisat",
                ),
            ],
        },
        ActionModule {
            name: "🔧 Manutenção",
            items: vec![
                danger(
                    OperationKind::RepairOffline,
                    "Reparar MongoDB (Offline)",
                    "Para o serviço e executa reparo completo",
                ),
                op(
                    OperationKind::RepairOnline,
                    "Reparar MongoDB (Ativo)",
                    "Repara banco com serviço rodando",
                ),
                op(
                    OperationKind::LiberarPortas,
                    "Liberar Portas Firewall",
                    "Adiciona regras para portas Digisat",
                ),
                op(
                    OperationKind::PermitirSeguranca,
                    "Permitir Segurança",
                    "Adiciona exclusões no Windows Defender",
                ),
            ],
        },
    ]
}

/// Look up the descriptor for an operation. Identifiers with no catalog
/// entry are dead: callers skip them rather than erroring.
pub fn find(id: OperationKind) -> Option<OperationDescriptor> {
    modules()
        .into_iter()
        .flat_map(|module| module.items)
        .find(|item| item.id == id)
}

pub fn is_dangerous(id: OperationKind) -> bool {
    find(id).map(|item| item.dangerous).unwrap_or(false)
}
