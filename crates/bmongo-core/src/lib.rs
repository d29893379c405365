pub mod catalog;
pub mod config;
pub mod pinned;
pub mod types;

pub use catalog::*;
pub use config::*;
pub use pinned::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::{ConsoleConfig, OperationKind, PinnedActions, UndoableOperation};
    use std::any::TypeId;

    #[test]
    fn crate_root_reexports_core_types() {
        let _ = TypeId::of::<OperationKind>();
        let _ = TypeId::of::<UndoableOperation>();
        let _ = TypeId::of::<PinnedActions>();
        let _ = TypeId::of::<ConsoleConfig>();
    }

    #[test]
    fn crate_root_reexports_catalog_helpers() {
        let modules = super::modules();
        assert!(!modules.is_empty());
        assert!(super::find(OperationKind::DeuMerda).is_some());
    }
}
