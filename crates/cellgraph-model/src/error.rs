#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("cell id `{id}` is reserved")]
    ReservedId { id: String },

    #[error("duplicate cell id `{id}`")]
    DuplicateId { id: String },

    #[error("cell `{id}` references unknown parent `{parent}`")]
    UnknownParent { id: String, parent: String },

    #[error("parent chain of cell `{id}` forms a cycle")]
    ParentCycle { id: String },
}
