//! Service-level integration tests for the employee backend live in the
//! [[test]] targets of this crate.
