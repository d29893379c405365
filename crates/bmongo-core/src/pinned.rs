//! Persisted quick-access shortcuts.
//!
//! The pinned set is the only client-side state that survives restarts: one
//! JSON file holding the ordered list of pinned operation ids. Entries that
//! no longer resolve against the catalog are kept in the file but dropped
//! when the shortcut list is materialized, so a catalog change never turns
//! into a startup error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{self, OperationDescriptor};
use crate::types::OperationKind;

pub const DEFAULT_PINNED: [OperationKind; 4] = [
    OperationKind::Gerenciador,
    OperationKind::Inativar,
    OperationKind::Tributacao,
    OperationKind::BuscarId,
];

#[derive(Debug, thiserror::Error)]
pub enum PinnedStoreError {
    #[error("failed to create state directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode pinned actions: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write pinned actions to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedActions {
    ids: Vec<String>,
    path: PathBuf,
}

impl PinnedActions {
    /// Read the persisted set, falling back to the seed when the file is
    /// missing or does not parse as a JSON string list.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = fs::read_to_string(&path)
            .ok()
            .and_then(|body| serde_json::from_str::<Vec<String>>(&body).ok())
            .unwrap_or_else(seed_ids);
        Self { ids, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: OperationKind) -> bool {
        self.ids.iter().any(|entry| entry == id.as_str())
    }

    /// Flip membership and write the whole set back before returning, so the
    /// in-memory and persisted views never diverge. Returns whether the id is
    /// pinned after the toggle.
    pub fn toggle(&mut self, id: OperationKind) -> Result<bool, PinnedStoreError> {
        let id_str = id.as_str();
        let pinned = if self.contains(id) {
            self.ids.retain(|entry| entry != id_str);
            false
        } else {
            self.ids.push(id_str.to_string());
            true
        };
        self.persist()?;
        Ok(pinned)
    }

    /// Map the persisted id sequence through the catalog, dropping entries
    /// that no longer name a catalog operation.
    pub fn materialize(&self) -> Vec<OperationDescriptor> {
        self.ids
            .iter()
            .filter_map(|entry| entry.parse::<OperationKind>().ok())
            .filter_map(catalog::find)
            .collect()
    }

    fn persist(&self) -> Result<(), PinnedStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| PinnedStoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let body =
            serde_json::to_string(&self.ids).map_err(|source| PinnedStoreError::Encode { source })?;
        fs::write(&self.path, body).map_err(|source| PinnedStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn seed_ids() -> Vec<String> {
    DEFAULT_PINNED
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{PinnedActions, DEFAULT_PINNED};
    use crate::types::OperationKind;
    use std::path::PathBuf;

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "bmongo-pinned-{tag}-{}.json",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[test]
    fn load_without_file_yields_the_seed() {
        let store = PinnedActions::load(temp_store_path("missing"));
        let labels: Vec<OperationKind> =
            store.materialize().iter().map(|item| item.id).collect();
        assert_eq!(labels, DEFAULT_PINNED.to_vec());
    }

    #[test]
    fn load_with_unparseable_file_yields_the_seed() {
        let path = temp_store_path("corrupt");
        std::fs::write(&path, "{not json").expect("write corrupt fixture");
        let store = PinnedActions::load(&path);
        assert_eq!(store.ids().len(), DEFAULT_PINNED.len());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn toggle_roundtrips_across_a_reload() {
        let path = temp_store_path("roundtrip");
        let mut store = PinnedActions::load(&path);
        store
            .toggle(OperationKind::ZerarEstoque)
            .expect("pin zerar_estoque");
        store
            .toggle(OperationKind::Gerenciador)
            .expect("unpin gerenciador");

        // Simulated restart: a fresh load sees the same membership.
        let reloaded = PinnedActions::load(&path);
        assert!(reloaded.contains(OperationKind::ZerarEstoque));
        assert!(!reloaded.contains(OperationKind::Gerenciador));
        assert!(reloaded.contains(OperationKind::Inativar));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn toggle_appends_new_pins_at_the_end() {
        let path = temp_store_path("order");
        let mut store = PinnedActions::load(&path);
        store.toggle(OperationKind::Backup).expect("pin backup");

        let ids: Vec<&str> = store.ids().iter().map(String::as_str).collect();
        assert_eq!(
            ids,
            vec!["gerenciador", "inativar", "tributacao", "buscar_id", "backup"]
        );

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn materialize_silently_drops_ids_removed_from_the_catalog() {
        let path = temp_store_path("stale");
        std::fs::write(
            &path,
            r#"["inativar", "exportar_planilha", "zerar_precos"]"#,
        )
        .expect("write fixture with stale id");

        let store = PinnedActions::load(&path);
        let kinds: Vec<OperationKind> =
            store.materialize().iter().map(|item| item.id).collect();
        assert_eq!(
            kinds,
            vec![OperationKind::Inativar, OperationKind::ZerarPrecos]
        );
        // The stale entry survives in storage; only the view drops it.
        assert_eq!(store.ids().len(), 3);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn double_toggle_restores_the_original_membership() {
        let path = temp_store_path("double");
        let mut store = PinnedActions::load(&path);
        assert!(store.toggle(OperationKind::Restore).expect("pin"));
        assert!(!store.toggle(OperationKind::Restore).expect("unpin"));
        assert!(!store.contains(OperationKind::Restore));

        let _ = std::fs::remove_file(path);
    }
}
